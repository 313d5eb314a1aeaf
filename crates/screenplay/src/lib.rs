#![forbid(unsafe_code)]

//! Screenplay public facade crate.
//!
//! Screenplay keeps each terminal window's picture as a list of draw
//! records and rebuilds the window from that list on demand. This crate
//! re-exports the pieces from the layer crates and adds the window
//! controller on top:
//!
//! ```
//! use screenplay::prelude::*;
//!
//! let mut window = Window::new(HeadlessSurface::new(3, 12), StoreConfig::default());
//! window.push("020")?;
//! window.push_command(&Command::Move { row: 1, col: 2 })?;
//! window.push_command(&Command::PrintText("hello"))?;
//! window.repaint()?;
//! assert_eq!(window.surface().row_text(1), "│ hello    │");
//! # Ok::<(), screenplay::Error>(())
//! ```

pub mod error;
pub mod window;

pub use error::{Error, RecoveryAction, Result};
pub use window::{Screen, Window, WindowId};

// --- Layer re-exports ------------------------------------------------------

pub use screenplay_backend::{DrawSurface, SurfaceError, SurfaceResult};
pub use screenplay_core::{Extent, Rect, StoreConfig, WindowSpec};
pub use screenplay_render::{
    Command, CommandStore, DecodeError, HeadlessSurface, Opcode, ReplayError, ReplayPolicy,
    ReplayStats, Replayer, StoreError,
};
pub use screenplay_tty::{AnsiColor, AnsiSurface, terminal_extent};

#[cfg(unix)]
pub use screenplay_tty::ResizeFlag;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnsiColor, AnsiSurface, Command, CommandStore, DrawSurface, Error, Extent,
        HeadlessSurface, Rect, RecoveryAction, ReplayPolicy, Result, Screen, StoreConfig, Window,
        WindowId, WindowSpec, terminal_extent,
    };

    pub use crate::{backend, core, render, tty};
}

pub use screenplay_backend as backend;
pub use screenplay_core as core;
pub use screenplay_render as render;
pub use screenplay_tty as tty;
