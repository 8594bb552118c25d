//! Cooperative cancellation. No tokio: the pipeline is
//! synchronous and rayon-driven, so a plain `Arc<AtomicBool>` is the whole
//! mechanism — checked at phase boundaries and every ~10 items within a
//! phase.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
