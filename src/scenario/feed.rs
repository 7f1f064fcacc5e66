//! Refill feeds consumed by the supply actor
//!
//! A feed is an ordered, finite sequence of refill events. The file-backed
//! [`LineFeed`] reads the trailing lines of a neighborhood file lazily, one
//! event per call, so a long feed never has to be held in memory.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::io::AsyncBufRead;
use tracing::warn;

use super::Refill;
use super::error::{LoadError, LoadResult};
use super::parser::{RecordReader, parse_fields};

/// Source of refill events for the supply actor
#[async_trait]
pub trait RefillSource: Send {
    /// The next refill event, or `None` once the feed is exhausted
    async fn next_refill(&mut self) -> LoadResult<Option<Refill>>;

    /// Number of malformed entries skipped so far
    fn skipped(&self) -> usize {
        0
    }
}

/// Refill feed read line by line from the tail of a neighborhood file.
///
/// Malformed lines and lines naming a house that does not exist are logged
/// and skipped; only I/O failures are reported as errors.
#[derive(Debug)]
pub struct LineFeed<R> {
    records: RecordReader<R>,
    house_count: usize,
    skipped: usize,
}

impl<R> LineFeed<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(records: RecordReader<R>, house_count: usize) -> Self {
        Self {
            records,
            house_count,
            skipped: 0,
        }
    }

    fn parse(&self, line: usize, text: &str) -> LoadResult<Refill> {
        let [house, amount] = parse_fields::<2>(line, text)?;
        let house = house as usize;
        if house >= self.house_count {
            return Err(LoadError::HouseOutOfRange {
                line,
                house,
                house_count: self.house_count,
            });
        }
        Ok(Refill { house, amount })
    }
}

#[async_trait]
impl<R> RefillSource for LineFeed<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_refill(&mut self) -> LoadResult<Option<Refill>> {
        while let Some((line, text)) = self.records.next_line().await? {
            match self.parse(line, &text) {
                Ok(refill) => return Ok(Some(refill)),
                Err(e) => {
                    warn!("skipping refill entry: {e}");
                    self.skipped += 1;
                }
            }
        }
        Ok(None)
    }

    fn skipped(&self) -> usize {
        self.skipped
    }
}

/// In-memory refill feed
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    refills: VecDeque<Refill>,
}

impl From<Vec<Refill>> for MemoryFeed {
    fn from(refills: Vec<Refill>) -> Self {
        Self {
            refills: refills.into(),
        }
    }
}

#[async_trait]
impl RefillSource for MemoryFeed {
    async fn next_refill(&mut self) -> LoadResult<Option<Refill>> {
        Ok(self.refills.pop_front())
    }
}
