#![forbid(unsafe_code)]

//! Sentinel-framed record store.
//!
//! [`CommandStore`] keeps an ordered sequence of variable-length text records
//! back to back in one growable byte region. Each record is followed by
//! [`SENTINEL`], a byte that can never occur in UTF-8 text, so records need no
//! separate offset table: the k-th record starts after the k-th sentinel.
//!
//! # Region layout
//!
//! ```text
//! push("011|hi"), push("020"), push("002|1|1")
//! ┌──────────────────────────────────────────────┐
//! │ 011|hi ◆ 020 ◆ 002|1|1 ◆ 0 0 0 0 0 0 0 0 0 0 │
//! └──────────────────────────────────────────────┘
//!
//! erase_at(1): bytes nulled in place, nothing shifts
//! ┌──────────────────────────────────────────────┐
//! │ 011|hi ◆ 0 0 0 0 002|1|1 ◆ 0 0 0 0 0 0 0 0 0 │
//! └──────────────────────────────────────────────┘
//!
//! pop_last(): count drops, bytes stay until overwritten
//! ```
//!
//! Reads skip NUL runs left by [`erase_at`](CommandStore::erase_at), so an
//! erased record is invisible to every later lookup.
//!
//! # Cursor cache
//!
//! Each store remembers where its last lookup landed as a logical offset.
//! Lookups at or past the cached record resume from there, which makes a
//! front-to-back scan O(1) per record. The cache is a plain offset into the
//! region, so growth (which may move the allocation) never invalidates it.
//!
//! # Growth
//!
//! Before an append whose projected end would pass two thirds of the region,
//! the region grows to `2 * (capacity + len + 2)`. If that allocation fails
//! the append still proceeds when the record fits in the current region.

use std::cell::Cell;
use std::collections::TryReserveError;
use std::fmt;

use screenplay_core::config::StoreConfig;

use crate::error::StoreError;
use crate::record::Command;

/// Record terminator. `0xF6` is never valid in UTF-8, so no `&str` payload
/// can contain it.
pub const SENTINEL: u8 = 0xF6;

/// Filler written over erased records.
const ERASED: u8 = 0;

/// Where the last lookup landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    /// Logical record index.
    index: usize,
    /// Offset of the record's first payload byte.
    start: usize,
}

/// A growable store of sentinel-terminated text records.
///
/// Single writer, single reader: reads take `&self` (the cursor cache lives
/// in a [`Cell`]), so the type is `Send` but not `Sync`. Wrap it in a mutex
/// held across a whole replay if it must be shared between threads.
///
/// # Invariants
///
/// 1. `region.len()` is the capacity, and never drops below the configured
///    floor except through [`clear`](Self::clear) returning to it.
/// 2. The occupied prefix holds exactly `rows` live sentinels.
/// 3. No write ever lands past `region.len()`.
pub struct CommandStore {
    region: Vec<u8>,
    rows: usize,
    cursor: Cell<Option<Cursor>>,
    config: StoreConfig,
    #[cfg(test)]
    fail_growth: bool,
}

impl fmt::Debug for CommandStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandStore")
            .field("rows", &self.rows)
            .field("capacity", &self.region.len())
            .field("cursor", &self.cursor.get())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for CommandStore {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl CommandStore {
    /// Create an empty store at the configured floor capacity.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let config = config.with_initial_capacity(config.initial_capacity);
        Self {
            region: vec![ERASED; config.initial_capacity],
            rows: 0,
            cursor: Cell::new(None),
            config,
            #[cfg(test)]
            fail_growth: false,
        }
    }

    /// Create an empty store with default configuration.
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::new(StoreConfig::default())
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Number of live records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Check if the store holds no live record.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of live records, checked against the configured ceiling.
    pub fn size(&self) -> Result<usize, StoreError> {
        if self.rows > self.config.max_rows {
            return Err(StoreError::CorruptState(format!(
                "{} records exceed ceiling of {}",
                self.rows, self.config.max_rows
            )));
        }
        Ok(self.rows)
    }

    /// Current region size in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ====================================================================
    // Reads
    // ====================================================================

    /// Read the record at logical position `index`.
    pub fn read_at(&self, index: usize) -> Result<&str, StoreError> {
        let start = self.locate(index)?;
        self.cursor.set(Some(Cursor { index, start }));
        self.text_at(start)
    }

    /// Read the record after the one the last lookup returned.
    ///
    /// Fails with [`StoreError::InvalidCursorUse`] if nothing has been read
    /// since the store was created or last reorganized by an erase or clear.
    pub fn read_next(&self) -> Result<&str, StoreError> {
        let cursor = self.cursor.get().ok_or(StoreError::InvalidCursorUse)?;
        self.read_at(cursor.index + 1)
    }

    /// Iterate over every live record, front to back.
    pub fn records(&self) -> Records<'_> {
        Records {
            store: self,
            next: 0,
        }
    }

    // ====================================================================
    // Mutation
    // ====================================================================

    /// Append `payload` as the new last record.
    pub fn append(&mut self, payload: &str) -> Result<(), StoreError> {
        self.validate(payload)?;
        if self.rows >= self.config.max_rows {
            return Err(StoreError::RowLimit {
                max_rows: self.config.max_rows,
            });
        }

        let free = self.first_free()?;
        let len = payload.len();
        let end = free + len;
        let capacity = self.region.len();

        if end.saturating_add(2).saturating_mul(3) > capacity.saturating_mul(2) {
            let target = capacity
                .saturating_add(len)
                .saturating_add(2)
                .saturating_mul(2);
            match self.grow(target) {
                Ok(()) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(from = capacity, to = target, "store region grown");
                }
                Err(_err) if end < capacity => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        capacity,
                        target,
                        error = %_err,
                        "store growth failed, continuing at current capacity"
                    );
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(capacity, target, error = %_err, "store growth failed");
                    return Err(StoreError::AllocationFailure { requested: target });
                }
            }
        }

        self.region[free..end].copy_from_slice(payload.as_bytes());
        self.region[end] = SENTINEL;
        self.rows += 1;
        Ok(())
    }

    /// Encode `command` and append it.
    pub fn push_command(&mut self, command: &Command<'_>) -> Result<(), StoreError> {
        if !command.is_encodable() {
            return Err(StoreError::InvalidPayload(format!(
                "{} command has no record form",
                command.opcode()
            )));
        }
        self.append(&command.to_string())
    }

    /// Remove the last record and return a copy of its text.
    ///
    /// The bytes stay in the region until a later append overwrites them.
    pub fn pop_last(&mut self) -> Result<String, StoreError> {
        if self.rows == 0 {
            return Err(StoreError::EmptyStore);
        }
        let last = self.rows - 1;
        let text = self.text_at(self.locate(last)?)?.to_owned();
        self.rows = last;
        if self.cursor.get().is_some_and(|c| c.index >= last) {
            self.cursor.set(None);
        }
        Ok(text)
    }

    /// Null out the record at `index`, sentinel included.
    ///
    /// No bytes move; later reads skip the gap. Every record after `index`
    /// shifts down one logical position.
    pub fn erase_at(&mut self, index: usize) -> Result<(), StoreError> {
        let start = self.locate(index)?;
        let end = self.span_end(start)?;
        self.region[start..=end].fill(ERASED);
        self.rows -= 1;
        self.cursor.set(None);
        Ok(())
    }

    /// Drop every record and return the region to its floor capacity.
    ///
    /// If the smaller region cannot be allocated the current one is kept
    /// (zeroed) instead.
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cursor.set(None);
        let floor = self.config.initial_capacity;
        if self.region.len() != floor {
            let mut fresh = Vec::new();
            match fresh.try_reserve_exact(floor) {
                Ok(()) => {
                    fresh.resize(floor, ERASED);
                    self.region = fresh;
                    return;
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        capacity = self.region.len(),
                        floor,
                        error = %_err,
                        "store shrink failed, keeping larger region"
                    );
                }
            }
        }
        self.region.fill(ERASED);
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn validate(&self, payload: &str) -> Result<(), StoreError> {
        if payload.len() > self.config.max_record_len {
            return Err(StoreError::InvalidPayload(format!(
                "{} bytes exceeds maximum of {}",
                payload.len(),
                self.config.max_record_len
            )));
        }
        if let Some(offset) = memchr::memchr(ERASED, payload.as_bytes()) {
            return Err(StoreError::InvalidPayload(format!(
                "NUL byte at offset {offset}"
            )));
        }
        Ok(())
    }

    /// Offset of the first payload byte of record `index`.
    ///
    /// Resumes from the cursor when it sits at or before `index`. Does not
    /// update the cursor.
    fn locate(&self, index: usize) -> Result<usize, StoreError> {
        if index >= self.rows {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.rows,
            });
        }
        let (mut at, mut pos) = match self.cursor.get() {
            Some(c) if c.index <= index => (c.index, c.start),
            _ => (0, self.skip_erased(0)),
        };
        while at < index {
            pos = self.skip_erased(self.span_end(pos)? + 1);
            at += 1;
        }
        Ok(pos)
    }

    /// Offset of the sentinel terminating the record that starts at `start`.
    fn span_end(&self, start: usize) -> Result<usize, StoreError> {
        let tail = self.region.get(start..).unwrap_or_default();
        memchr::memchr(SENTINEL, tail)
            .map(|pos| start + pos)
            .ok_or_else(|| {
                StoreError::CorruptState(format!("no sentinel after offset {start}"))
            })
    }

    fn skip_erased(&self, mut pos: usize) -> usize {
        while self.region.get(pos) == Some(&ERASED) {
            pos += 1;
        }
        pos
    }

    fn text_at(&self, start: usize) -> Result<&str, StoreError> {
        let end = self.span_end(start)?;
        std::str::from_utf8(&self.region[start..end]).map_err(|err| {
            StoreError::CorruptState(format!("record at offset {start} is not UTF-8: {err}"))
        })
    }

    /// Offset just past the last live record's sentinel.
    fn first_free(&self) -> Result<usize, StoreError> {
        if self.rows == 0 {
            return Ok(0);
        }
        let start = self.locate(self.rows - 1)?;
        Ok(self.span_end(start)? + 1)
    }

    fn grow(&mut self, target: usize) -> Result<(), TryReserveError> {
        #[cfg(test)]
        if self.fail_growth {
            return Vec::<u8>::new().try_reserve_exact(usize::MAX);
        }
        let additional = target.saturating_sub(self.region.len());
        self.region.try_reserve_exact(additional)?;
        self.region.resize(target, ERASED);
        Ok(())
    }
}

/// Iterator over a store's live records. See [`CommandStore::records`].
#[derive(Debug)]
pub struct Records<'a> {
    store: &'a CommandStore,
    next: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<&'a str, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.store.len() {
            return None;
        }
        let item = self.store.read_at(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.store.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Records<'_> {}
