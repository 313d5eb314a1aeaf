#![forbid(unsafe_code)]

//! Core: geometry, window layout fractions, store configuration, and logging.
//!
//! # Role in Screenplay
//! `screenplay-core` is the leaf of the workspace. It holds the value types
//! every other crate agrees on (`Rect`, `Extent`), the tunables of a command
//! store (`StoreConfig`), and the optional logging bootstrap.
//!
//! # How it fits in the system
//! `screenplay-backend` describes drawing surfaces in terms of [`Extent`];
//! `screenplay-render` sizes its record stores from [`StoreConfig`]; the
//! facade resolves [`WindowSpec`] fractions into [`Rect`]s when it lays out
//! windows on a terminal.

pub mod config;
pub mod geometry;
pub mod layout;
pub mod logging;

pub use config::StoreConfig;
pub use geometry::{Extent, Rect};
pub use layout::WindowSpec;
