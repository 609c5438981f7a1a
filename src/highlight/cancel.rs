//! Cooperative cancellation and the per-document pass lifecycle.
//!
//! A document has at most one current pass. Starting a new one supersedes
//! (cancels) the previous; a superseded pass is discarded, never resumed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Answers "has a newer pass superseded this one?".
pub trait CancelIndicator {
    fn is_canceled(&self) -> bool;
}

impl<F> CancelIndicator for F
where
    F: Fn() -> bool,
{
    fn is_canceled(&self) -> bool {
        self()
    }
}

impl CancelIndicator for CancellationToken {
    fn is_canceled(&self) -> bool {
        self.is_cancelled()
    }
}

impl CancelIndicator for AtomicBool {
    fn is_canceled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// A pass nobody will ever cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelIndicator for NeverCancel {
    fn is_canceled(&self) -> bool {
        false
    }
}

/// Handle for one highlighting pass over one document.
#[derive(Debug, Clone)]
pub struct Pass {
    pub document: String,
    pub generation: u64,
    pub token: CancellationToken,
}

impl CancelIndicator for Pass {
    fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Tracks the current pass of every open document.
#[derive(Debug, Default)]
pub struct PassScheduler {
    current: DashMap<String, (u64, CancellationToken)>,
    generation: AtomicU64,
}

impl PassScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a pass for `document`, cancelling the one it supersedes.
    pub fn begin(&self, document: &str) -> Pass {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        if let Some((previous, old)) = self
            .current
            .insert(document.to_string(), (generation, token.clone()))
        {
            trace!(document, previous, generation, "superseding highlight pass");
            old.cancel();
        }
        Pass {
            document: document.to_string(),
            generation,
            token,
        }
    }

    /// True while no newer pass has started for the pass's document.
    pub fn is_current(&self, pass: &Pass) -> bool {
        self.current
            .get(&pass.document)
            .map_or(false, |entry| entry.0 == pass.generation)
    }

    /// Retires a finished pass if it is still the current one.
    pub fn finish(&self, pass: &Pass) {
        self.current
            .remove_if(&pass.document, |_, entry| entry.0 == pass.generation);
    }

    /// Cancels whatever runs for `document` and forgets it.
    pub fn close(&self, document: &str) {
        if let Some((_, (_, token))) = self.current.remove(document) {
            token.cancel();
        }
    }

    /// Number of documents with a pass in flight.
    pub fn in_flight(&self) -> usize {
        self.current.len()
    }
}
