//! Scroll trigger

use super::visibility::{Registration, Sentinel, VisibilitySource};
use crate::error::{Error, Result};
use crate::feed::{PageFetcher, PaginationController};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::trace;

/// Loads the next page whenever a sentinel becomes visible
///
/// Detaches when dropped.
#[derive(Debug)]
pub struct ScrollTrigger {
    sentinel: Sentinel,
    registration: Registration,
}

impl ScrollTrigger {
    /// Observe `sentinel` on `source` and call `load_next` on each visibility event
    ///
    /// Must be called from inside a tokio runtime; each event spawns the load
    /// onto that runtime so the host callback never blocks.
    pub fn attach<F>(
        controller: PaginationController<F>,
        source: &dyn VisibilitySource,
        sentinel: Sentinel,
    ) -> Result<Self>
    where
        F: PageFetcher + 'static,
    {
        let runtime = Handle::try_current()
            .map_err(|e| Error::config(format!("ScrollTrigger needs a tokio runtime: {e}")))?;

        let observed = sentinel.clone();
        let on_visible = Arc::new(move || {
            trace!(sentinel = %observed, "Sentinel visible");
            let controller = controller.clone();
            runtime.spawn(async move {
                controller.load_next().await;
            });
        });

        let registration = source.register(&sentinel, on_visible);
        Ok(Self {
            sentinel,
            registration,
        })
    }

    /// Observed sentinel
    pub fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    /// Stop observing
    pub fn detach(self) {
        self.registration.cancel();
    }
}
