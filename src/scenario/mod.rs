//! Neighborhood scenarios
//!
//! A scenario is everything a run starts from: the houses with their initial
//! stock and the groups with their home house and size. It is loaded from a
//! neighborhood file before any actor starts; the refill feed at the end of
//! the same file stays unread until the supply actor asks for it.

pub mod error;
pub mod feed;
pub mod parser;

use std::path::Path;

use tokio::fs::File;
use tokio::io::BufReader;
use tracing::instrument;

use crate::Position;

pub use error::{LoadError, LoadResult};
pub use feed::{LineFeed, MemoryFeed, RefillSource};
pub use parser::parse_scenario;

/// Initial state of one house
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseRecord {
    pub position: Position,
    pub candy: u32,
}

/// Initial state of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRecord {
    /// Index of the house the group starts at
    pub home: usize,

    /// Number of children; candy requested per visit
    pub size: u32,
}

/// One supply event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refill {
    pub house: usize,
    pub amount: u32,
}

/// Houses and groups a run starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub houses: Vec<HouseRecord>,
    pub groups: Vec<GroupRecord>,
}

/// Feed type returned by [`load_scenario`]
pub type FileFeed = LineFeed<BufReader<File>>;

/// Load a neighborhood file.
///
/// The header is parsed eagerly; the returned feed keeps the file open and
/// reads refill events on demand.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub async fn load_scenario(
    path: impl AsRef<Path>,
    house_count: usize,
) -> LoadResult<(Scenario, FileFeed)> {
    let file = File::open(path.as_ref()).await?;
    parse_scenario(BufReader::new(file), house_count).await
}
