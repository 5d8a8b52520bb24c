//! Configuration types for the tree walker

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Deepest level listed; the root is level 0. Directories at the limit are
    /// listed but not read.
    pub max_depth: Option<usize>,
    pub dirs_only: bool,
    /// Checked before each directory visit.
    pub cancel: Option<CancelFlag>,
}

impl WalkerConfig {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// Cooperative cancellation shared between a walk and its host.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
