//! Line-oriented parser for neighborhood files
//!
//! ```text
//! 2          ← group count G
//! 1 2 5      ← house 0: x y candy
//! ...        ← one line per house
//! 3 4        ← group 0: home-house size
//! ...        ← one line per group
//! 3 2        ← refill feed: house amount (read lazily, see `feed`)
//! ```
//!
//! Fields are whitespace separated, blank lines are ignored.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, trace};

use crate::Position;

use super::error::{LoadError, LoadResult};
use super::feed::LineFeed;
use super::{GroupRecord, HouseRecord, Scenario};

/// Reads non-blank lines and tracks their 1-based line numbers
#[derive(Debug)]
pub struct RecordReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R> RecordReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// The next non-blank line with its number, or `None` at end of input
    pub async fn next_line(&mut self) -> LoadResult<Option<(usize, String)>> {
        while let Some(text) = self.lines.next_line().await? {
            self.line += 1;
            if !text.trim().is_empty() {
                return Ok(Some((self.line, text)));
            }
        }
        Ok(None)
    }
}

/// Parse exactly `N` unsigned integer fields from one line
pub fn parse_fields<const N: usize>(line: usize, text: &str) -> LoadResult<[u32; N]> {
    let mut fields = [0u32; N];
    let mut tokens = text.split_whitespace();

    for (i, field) in fields.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| LoadError::MalformedRecord {
            line,
            reason: format!("expected {N} fields, found {i}"),
        })?;
        *field = token.parse().map_err(|_| LoadError::MalformedRecord {
            line,
            reason: format!("'{token}' is not a non-negative integer"),
        })?;
    }

    if tokens.next().is_some() {
        return Err(LoadError::MalformedRecord {
            line,
            reason: format!("expected {N} fields, found more"),
        });
    }

    Ok(fields)
}

/// Parse the header of a neighborhood file.
///
/// Reads the group count, `house_count` house records and the group records.
/// The rest of the input is returned as a [`LineFeed`] for the supply actor.
pub async fn parse_scenario<R>(
    reader: R,
    house_count: usize,
) -> LoadResult<(Scenario, LineFeed<R>)>
where
    R: AsyncBufRead + Unpin,
{
    let mut records = RecordReader::new(reader);

    let (_, text) = records
        .next_line()
        .await?
        .ok_or(LoadError::MissingGroupCount)?;
    let group_count = match text.trim().parse::<usize>() {
        Ok(count) if count > 0 => count,
        _ => return Err(LoadError::InvalidGroupCount(text.trim().to_string())),
    };
    trace!(group_count, "parsed group count");

    let mut houses = Vec::with_capacity(house_count);
    for index in 0..house_count {
        let (line, text) = records
            .next_line()
            .await?
            .ok_or(LoadError::MissingHouse {
                index,
                expected: house_count,
            })?;
        let [x, y, candy] = parse_fields::<3>(line, &text)?;
        houses.push(HouseRecord {
            position: Position::new(x, y),
            candy,
        });
    }

    let mut groups = Vec::with_capacity(group_count);
    for index in 0..group_count {
        let (line, text) = records
            .next_line()
            .await?
            .ok_or(LoadError::MissingGroup {
                index,
                expected: group_count,
            })?;
        let [home, size] = parse_fields::<2>(line, &text)?;
        let home = home as usize;
        if home >= house_count {
            return Err(LoadError::HouseOutOfRange {
                line,
                house: home,
                house_count,
            });
        }
        groups.push(GroupRecord { home, size });
    }

    debug!(
        houses = houses.len(),
        groups = groups.len(),
        "parsed neighborhood header"
    );

    Ok((Scenario { houses, groups }, LineFeed::new(records, house_count)))
}
