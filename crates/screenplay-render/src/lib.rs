#![forbid(unsafe_code)]

//! Render kernel: record store, draw-record codec, and replay.
//!
//! # Role in Screenplay
//! `screenplay-render` is the retained-mode core. Client code appends draw
//! records to a [`CommandStore`]; a replay pass decodes every record and
//! drives a [`DrawSurface`](screenplay_backend::DrawSurface), so a window's
//! whole picture can be rebuilt at any time from its store alone.
//!
//! # Primary responsibilities
//! - **CommandStore**: sentinel-framed records in one growable region, with
//!   a per-store sequential cursor.
//! - **Command**: typed, borrowed decode of a record, and its text encoding.
//! - **Replayer**: opcode dispatch with bounds validation and a
//!   configurable [`ReplayPolicy`].
//! - **HeadlessSurface**: in-memory surface for tests and fuzzing.
//!
//! # How it fits in the system
//! The facade's `Window` owns one store and one surface and calls
//! [`Replayer::replay`] whenever the window must be repainted. Terminal
//! output lives in `screenplay-tty`.

pub mod error;
pub mod headless;
pub mod record;
pub mod replay;
pub mod store;

pub use error::{Axis, DecodeError, ReplayError, StoreError};
pub use headless::{HeadlessSurface, SurfaceCall};
pub use record::{Command, DELIMITER, Opcode};
pub use replay::{ReplayPolicy, ReplayStats, Replayer, replay};
pub use store::{CommandStore, Records, SENTINEL};
