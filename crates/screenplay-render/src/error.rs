#![forbid(unsafe_code)]

//! Error types for the record store, the record decoder, and replay.

use std::fmt;

use screenplay_backend::SurfaceError;

use crate::record::Opcode;

/// Record store failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `pop_last` on a store with no records.
    EmptyStore,
    /// Read or erase past the last live record.
    IndexOutOfRange { index: usize, len: usize },
    /// Sequential read requested with no prior read to continue from.
    InvalidCursorUse,
    /// The region no longer satisfies the store's invariants.
    CorruptState(String),
    /// The region could not grow enough to hold the next record.
    AllocationFailure { requested: usize },
    /// A payload that can never be stored as a record.
    InvalidPayload(String),
    /// Append refused: the store already holds `max_rows` records.
    RowLimit { max_rows: usize },
}

/// Record decoding failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer than three leading digits, or junk between opcode and arguments.
    MalformedRecord,
    /// Three digits that name no known opcode.
    InvalidOpcode(u16),
    /// A required argument is absent.
    MissingArgument { opcode: Opcode, position: usize },
    /// An argument could not be parsed.
    InvalidArgument {
        opcode: Opcode,
        position: usize,
        token: String,
    },
}

/// Which coordinate a bounds failure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// Failures that end (or, under a skip policy, skip part of) a replay pass.
#[derive(Debug)]
pub enum ReplayError {
    /// Reading the store failed.
    Store(StoreError),
    /// The record at `index` could not be decoded.
    Decode { index: usize, error: DecodeError },
    /// The record at `index` would move the cursor off the surface.
    ///
    /// `value` is the requested row/col (or percentage), `limit` the bound
    /// it violated.
    OutOfBounds {
        index: usize,
        axis: Axis,
        value: f64,
        limit: f64,
    },
    /// The drawing surface rejected a primitive call.
    Surface(SurfaceError),
}

impl ReplayError {
    /// Index of the offending record, when the failure belongs to one.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Self::Decode { index, .. } | Self::OutOfBounds { index, .. } => Some(*index),
            Self::Store(_) | Self::Surface(_) => None,
        }
    }

    /// Whether the failure is confined to one record, so a pass could skip
    /// it and carry on.
    pub fn is_record_local(&self) -> bool {
        self.record_index().is_some()
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStore => write!(f, "store is empty, nothing to pop"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "record index {index} out of range (len {len})")
            }
            Self::InvalidCursorUse => write!(f, "sequential read with no prior read"),
            Self::CorruptState(msg) => write!(f, "store corrupted: {msg}"),
            Self::AllocationFailure { requested } => {
                write!(f, "region growth to {requested} bytes failed")
            }
            Self::InvalidPayload(msg) => write!(f, "invalid record payload: {msg}"),
            Self::RowLimit { max_rows } => write!(f, "store full at {max_rows} records"),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord => write!(f, "malformed record"),
            Self::InvalidOpcode(code) => write!(f, "invalid opcode {code:03}"),
            Self::MissingArgument { opcode, position } => {
                write!(f, "{opcode} missing argument {position}")
            }
            Self::InvalidArgument {
                opcode,
                position,
                token,
            } => write!(f, "{opcode} argument {position} invalid: {token:?}"),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Col => write!(f, "col"),
        }
    }
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Decode { index, error } => write!(f, "record {index}: {error}"),
            Self::OutOfBounds {
                index,
                axis,
                value,
                limit,
            } => write!(f, "record {index}: {axis} {value} out of bounds (limit {limit})"),
            Self::Surface(err) => write!(f, "{err}"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for StoreError {}

impl std::error::Error for DecodeError {}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Decode { error, .. } => Some(error),
            Self::OutOfBounds { .. } => None,
            Self::Surface(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<StoreError> for ReplayError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<SurfaceError> for ReplayError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}
