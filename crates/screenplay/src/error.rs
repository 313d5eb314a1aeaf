#![forbid(unsafe_code)]

//! Screenplay error model and recovery policy.
//!
//! Every layer keeps its own typed error ([`StoreError`], [`ReplayError`],
//! [`SurfaceError`]); this module folds them into one [`Error`] and maps
//! each variant to a [`RecoveryAction`], so the window controller decides
//! policy in one place instead of matching on every layer's variants.

use std::fmt;

use screenplay_backend::SurfaceError;
use screenplay_render::{ReplayError, StoreError};

use crate::window::WindowId;

/// Top-level error type for Screenplay.
#[derive(Debug)]
pub enum Error {
    /// Record store operation failed.
    Store(StoreError),
    /// Replay pass failed.
    Replay(ReplayError),
    /// Drawing surface failed outside a replay pass.
    Surface(SurfaceError),
    /// No window registered under this id.
    UnknownWindow(WindowId),
    /// Raw I/O error (terminal queries, demo output).
    Io(std::io::Error),
}

/// Standard result type for Screenplay APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the caller should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Drop the offending record and keep going.
    SkipRecord,
    /// Abandon the current operation or pass; state is intact.
    AbortPass,
    /// The store is unusable as is; clear it and rebuild its contents.
    RetryAfterClear,
    /// The output channel is gone; shut down.
    Shutdown,
}

impl Error {
    /// Decide how to recover from this error.
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            Self::Store(err) => store_recovery(err),
            Self::Replay(ReplayError::Decode { .. } | ReplayError::OutOfBounds { .. }) => {
                RecoveryAction::SkipRecord
            }
            Self::Replay(ReplayError::Store(err)) => store_recovery(err),
            Self::Replay(ReplayError::Surface(err)) | Self::Surface(err) => surface_recovery(err),
            Self::UnknownWindow(_) => RecoveryAction::AbortPass,
            Self::Io(_) => RecoveryAction::Shutdown,
        }
    }

    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Replay(_) => "replay",
            Self::Surface(_) => "surface",
            Self::UnknownWindow(_) => "window",
            Self::Io(_) => "io",
        }
    }

    /// Whether the error is recoverable (does not require shutdown).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.recovery(), RecoveryAction::Shutdown)
    }
}

fn store_recovery(err: &StoreError) -> RecoveryAction {
    match err {
        StoreError::InvalidPayload(_) => RecoveryAction::SkipRecord,
        StoreError::CorruptState(_) | StoreError::AllocationFailure { .. } => {
            RecoveryAction::RetryAfterClear
        }
        StoreError::EmptyStore
        | StoreError::IndexOutOfRange { .. }
        | StoreError::InvalidCursorUse
        | StoreError::RowLimit { .. } => RecoveryAction::AbortPass,
    }
}

fn surface_recovery(err: &SurfaceError) -> RecoveryAction {
    match err {
        SurfaceError::Io(_) => RecoveryAction::Shutdown,
        SurfaceError::CursorOutOfRange { .. } => RecoveryAction::AbortPass,
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Replay(err) => write!(f, "replay: {err}"),
            Self::Surface(err) => write!(f, "{err}"),
            Self::UnknownWindow(id) => write!(f, "no window with id {id}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkipRecord => write!(f, "skip_record"),
            Self::AbortPass => write!(f, "abort_pass"),
            Self::RetryAfterClear => write!(f, "retry_after_clear"),
            Self::Shutdown => write!(f, "shutdown"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Replay(err) => Some(err),
            Self::Surface(err) => Some(err),
            Self::UnknownWindow(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ReplayError> for Error {
    fn from(err: ReplayError) -> Self {
        Self::Replay(err)
    }
}

impl From<SurfaceError> for Error {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
