//! Keeps solver console output away from stdout
//!
//! `gag` allows a single redirect per stream per process. Solves running on
//! several threads therefore share one reference-counted [`Gag`]; the redirect
//! ends when the last [`GagHandle`] is dropped.

use std::io;
use std::sync::{Arc, Mutex, Weak};

use gag::Gag;
use tracing::trace;

/// Shared stdout redirect, released when the last handle goes away
pub struct GagHandle {
    _gag: Arc<Gag>,
}

impl GagHandle {
    /// Join the current stdout redirect or start a new one.
    pub fn stdout() -> io::Result<Self> {
        STDOUT_GAG.acquire()
    }
}

struct SharedGag {
    current: Mutex<Weak<Gag>>,
    open: fn() -> io::Result<Gag>,
}

impl SharedGag {
    const fn new(open: fn() -> io::Result<Gag>) -> Self {
        Self {
            current: Mutex::new(Weak::new()),
            open,
        }
    }

    fn acquire(&self) -> io::Result<GagHandle> {
        // A poisoned lock only means another solve panicked; the Weak inside is still sound
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(gag) = current.upgrade() {
            return Ok(GagHandle { _gag: gag });
        }

        let gag = Arc::new((self.open)()?);
        trace!("redirecting solver output");
        *current = Arc::downgrade(&gag);

        Ok(GagHandle { _gag: gag })
    }
}

static STDOUT_GAG: SharedGag = SharedGag::new(Gag::stdout);
