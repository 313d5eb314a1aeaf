#![forbid(unsafe_code)]

//! Window controller layer.
//!
//! A [`Window`] pairs one [`CommandStore`] with one drawing surface: callers
//! append records, then [`repaint`](Window::repaint) rebuilds the surface
//! from the store. A [`Screen`] is an ordered set of windows addressed by
//! [`WindowId`], repainted individually or all at once.

use std::fmt;

use screenplay_backend::DrawSurface;
use screenplay_core::config::StoreConfig;
use screenplay_render::{Command, CommandStore, ReplayPolicy, ReplayStats, Replayer};

use crate::error::{Error, RecoveryAction, Result};

/// Handle to a window inside a [`Screen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u32);

impl WindowId {
    /// Create an id from a raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record store bound to the surface it repaints.
#[derive(Debug)]
pub struct Window<S> {
    store: CommandStore,
    surface: S,
    replayer: Replayer,
}

impl<S: DrawSurface> Window<S> {
    /// Create a window with an empty store.
    pub fn new(surface: S, config: StoreConfig) -> Self {
        Self {
            store: CommandStore::new(config),
            surface,
            replayer: Replayer::default(),
        }
    }

    /// Set the replay policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ReplayPolicy) -> Self {
        self.replayer = Replayer::new(policy);
        self
    }

    /// Append a record.
    pub fn push(&mut self, record: &str) -> Result<()> {
        Ok(self.store.append(record)?)
    }

    /// Append a command in its record form.
    pub fn push_command(&mut self, command: &Command<'_>) -> Result<()> {
        Ok(self.store.push_command(command)?)
    }

    /// Remove and return the last record.
    pub fn pop(&mut self) -> Result<String> {
        Ok(self.store.pop_last()?)
    }

    /// Remove the record at `index`.
    pub fn erase(&mut self, index: usize) -> Result<()> {
        Ok(self.store.erase_at(index)?)
    }

    /// Drop every record. The surface is untouched until the next repaint.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the window has no records.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Rebuild the surface from the store.
    pub fn repaint(&mut self) -> Result<ReplayStats> {
        Ok(self.replayer.replay(&self.store, &mut self.surface)?)
    }

    /// Get the store.
    pub fn store(&self) -> &CommandStore {
        &self.store
    }

    /// Get the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Get the surface mutably (to resize or recolor it).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// An ordered set of windows.
#[derive(Debug)]
pub struct Screen<S> {
    windows: Vec<(WindowId, Window<S>)>,
    next_id: u32,
}

impl<S> Default for Screen<S> {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_id: 0,
        }
    }
}

impl<S: DrawSurface> Screen<S> {
    /// Create an empty screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window; it repaints after every window added before it.
    pub fn add(&mut self, window: Window<S>) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.windows.push((id, window));
        id
    }

    /// Remove a window.
    pub fn remove(&mut self, id: WindowId) -> Option<Window<S>> {
        let pos = self.windows.iter().position(|(wid, _)| *wid == id)?;
        Some(self.windows.remove(pos).1)
    }

    /// Look up a window.
    pub fn get(&self, id: WindowId) -> Option<&Window<S>> {
        self.windows
            .iter()
            .find_map(|(wid, w)| (*wid == id).then_some(w))
    }

    /// Look up a window mutably.
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window<S>> {
        self.windows
            .iter_mut()
            .find_map(|(wid, w)| (*wid == id).then_some(w))
    }

    /// Window ids in repaint order.
    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.iter().map(|(id, _)| *id)
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Check if the screen has no windows.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Append a record to one window.
    pub fn push(&mut self, id: WindowId, record: &str) -> Result<()> {
        self.window_mut(id)?.push(record)
    }

    /// Repaint one window.
    pub fn repaint(&mut self, id: WindowId) -> Result<ReplayStats> {
        self.window_mut(id)?.repaint()
    }

    /// Repaint every window in order.
    ///
    /// A window that fails is left as it was and the rest still repaint;
    /// the first such error is returned afterwards. An error that calls for
    /// shutdown stops immediately.
    pub fn repaint_all(&mut self) -> Result<ReplayStats> {
        let mut total = ReplayStats::default();
        let mut first_err = None;
        for (_id, window) in &mut self.windows {
            match window.repaint() {
                Ok(stats) => {
                    total.executed += stats.executed;
                    total.skipped += stats.skipped;
                }
                Err(err) if err.recovery() == RecoveryAction::Shutdown => return Err(err),
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        window = %_id,
                        error = %err,
                        recovery = %err.recovery(),
                        "window repaint failed"
                    );
                    first_err.get_or_insert(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(total),
        }
    }

    /// Look up a window mutably, failing with [`Error::UnknownWindow`].
    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut Window<S>> {
        self.get_mut(id).ok_or(Error::UnknownWindow(id))
    }
}
