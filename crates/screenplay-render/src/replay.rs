#![forbid(unsafe_code)]

//! Replay: decode every stored record and drive a drawing surface.
//!
//! A pass clears the surface, walks the store front to back (first record by
//! index, the rest through the store's sequential cursor), executes each
//! decoded [`Command`], and refreshes the surface exactly once at the end.
//! A pass that fails never refreshes, so a half-drawn frame is never
//! presented.
//!
//! Decoding borrows each record, so replay leaves the store untouched and
//! replaying the same store twice issues the same calls twice.

use screenplay_backend::DrawSurface;

use crate::error::{Axis, ReplayError};
use crate::record::{Command, DELIMITER_STR};
use crate::store::CommandStore;

/// What a pass does when one record cannot be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayPolicy {
    /// Stop at the first bad record; nothing is refreshed.
    #[default]
    Abort,
    /// Skip records that fail to decode or move off the surface, and carry
    /// on. Store and surface failures still abort.
    SkipInvalid,
}

/// Outcome of a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    /// Records whose command ran.
    pub executed: usize,
    /// Records skipped under [`ReplayPolicy::SkipInvalid`].
    pub skipped: usize,
}

/// Replays a [`CommandStore`] onto a [`DrawSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Replayer {
    policy: ReplayPolicy,
}

impl Replayer {
    /// Create a replayer with the given policy.
    #[must_use]
    pub const fn new(policy: ReplayPolicy) -> Self {
        Self { policy }
    }

    /// Get the policy.
    #[must_use]
    pub const fn policy(&self) -> ReplayPolicy {
        self.policy
    }

    /// Run one full pass.
    pub fn replay<S>(&self, store: &CommandStore, surface: &mut S) -> Result<ReplayStats, ReplayError>
    where
        S: DrawSurface + ?Sized,
    {
        surface.clear()?;
        let rows = store.size()?;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("replay", records = rows).entered();

        let mut stats = ReplayStats::default();
        for index in 0..rows {
            let record = if index == 0 {
                store.read_at(0)?
            } else {
                store.read_next()?
            };

            let outcome = Command::parse(record)
                .map_err(|error| ReplayError::Decode { index, error })
                .and_then(|command| execute(index, &command, surface));

            match outcome {
                Ok(()) => stats.executed += 1,
                Err(err) if self.policy == ReplayPolicy::SkipInvalid && err.is_record_local() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(index, record, error = %err, "skipping record");
                    stats.skipped += 1;
                }
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(index, error = %err, "replay aborted");
                    return Err(err);
                }
            }
        }

        surface.refresh()?;
        Ok(stats)
    }
}

/// Run one pass with the default [`ReplayPolicy::Abort`].
pub fn replay<S>(store: &CommandStore, surface: &mut S) -> Result<ReplayStats, ReplayError>
where
    S: DrawSurface + ?Sized,
{
    Replayer::default().replay(store, surface)
}

/// Execute one decoded command. `index` only labels errors.
pub fn execute<S>(index: usize, command: &Command<'_>, surface: &mut S) -> Result<(), ReplayError>
where
    S: DrawSurface + ?Sized,
{
    match *command {
        Command::Delimiter => surface.print(DELIMITER_STR)?,
        Command::Move { row, col } => {
            let row = absolute(index, Axis::Row, row)?;
            let col = absolute(index, Axis::Col, col)?;
            surface.move_to(row, col)?;
        }
        Command::MoveRelative { dy, dx } => {
            let extent = surface.extent();
            let (row, col) = surface.cursor();
            let row = relative(index, Axis::Row, row, dy, extent.rows)?;
            let col = relative(index, Axis::Col, col, dx, extent.cols)?;
            surface.move_to(row, col)?;
        }
        Command::MovePercent { py, px } => {
            let extent = surface.extent();
            let row = percent(index, Axis::Row, py, extent.rows)?;
            let col = percent(index, Axis::Col, px, extent.cols)?;
            surface.move_to(row, col)?;
        }
        Command::Nop => {}
        Command::PrintText(text) => surface.print(text)?,
        Command::PrintInt(value) => surface.print(&value.to_string())?,
        Command::PrintFloat(value) => surface.print(&format!("{value:.6}"))?,
        Command::Border => surface.draw_border()?,
        Command::VLine { ch, len } => surface.vline(ch, len)?,
        Command::HLine { ch, len } => surface.hline(ch, len)?,
    }
    Ok(())
}

fn absolute(index: usize, axis: Axis, value: i32) -> Result<u16, ReplayError> {
    u16::try_from(value).map_err(|_| ReplayError::OutOfBounds {
        index,
        axis,
        value: f64::from(value),
        limit: f64::from(u16::MAX),
    })
}

/// Resolve a relative move on one axis.
///
/// A target equal to `extent` is already off the surface, so it is rejected
/// here as a record-local error rather than left for the surface to refuse.
fn relative(index: usize, axis: Axis, from: u16, delta: i32, extent: u16) -> Result<u16, ReplayError> {
    let target = i64::from(from) + i64::from(delta);
    if target < 0 || target >= i64::from(extent) {
        return Err(ReplayError::OutOfBounds {
            index,
            axis,
            value: target as f64,
            limit: f64::from(extent),
        });
    }
    // In range of `extent`, which is a u16.
    Ok(target as u16)
}

fn percent(index: usize, axis: Axis, pct: f64, extent: u16) -> Result<u16, ReplayError> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(ReplayError::OutOfBounds {
            index,
            axis,
            value: pct,
            limit: 100.0,
        });
    }
    let cell = (f64::from(extent) * pct / 100.0).floor() as u16;
    Ok(cell.min(extent.saturating_sub(1)))
}
