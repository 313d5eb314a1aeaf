#![forbid(unsafe_code)]

//! SIGWINCH notification.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::signal::SIGWINCH;
use signal_hook::iterator::Signals;

/// Set whenever the terminal reports a size change.
///
/// A background thread waits on SIGWINCH and raises the flag; the upstream
/// loop polls [`take`](Self::take) and repaints when it returns true.
/// Dropping the flag stops the thread.
#[derive(Debug)]
pub struct ResizeFlag {
    pending: Arc<AtomicBool>,
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl ResizeFlag {
    /// Register for SIGWINCH.
    pub fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGWINCH]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let pending = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&pending);
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                if signal == SIGWINCH {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("SIGWINCH received");
                    flag.store(true, Ordering::Release);
                }
            }
        });
        Ok(Self {
            pending,
            handle,
            thread: Some(thread),
        })
    }

    /// Check and reset the flag.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Check the flag without resetting it.
    pub fn is_set(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Drop for ResizeFlag {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
