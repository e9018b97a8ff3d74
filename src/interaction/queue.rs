//! The interaction queue.
//!
//! Holds everything that is waiting on the player or on the end of the
//! current operation:
//!
//! - the single open request
//! - a FIFO of requests raised while another one was open
//! - the pending chain of optional triggers
//! - the pending-effects list of deferred callbacks
//! - the batching depth and the "effect resolving" highlight
//!
//! The queue only stores things. The order in which they are drained
//! lives in `Engine::settle`.

use std::collections::VecDeque;

use tracing::debug;

use super::chain::{ChainEntry, ChainEntryId, Deferred};
use super::request::{InteractionPhase, Request, RequestId};

/// Queued interaction state.
#[derive(Debug, Default)]
pub struct InteractionQueue {
    open: Option<Request>,
    modal: VecDeque<Request>,
    chain: Vec<ChainEntry>,
    pending_effects: VecDeque<PendingEffect>,
    batching_depth: u32,
    resolving: bool,
    next_request: u32,
    next_chain: u32,
}

/// A deferred callback with a label for diagnostics.
pub(crate) struct PendingEffect {
    pub label: String,
    pub run: Deferred,
}

impl std::fmt::Debug for PendingEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingEffect").field("label", &self.label).finish_non_exhaustive()
    }
}

impl InteractionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Requests ===

    /// Raise a request: open it if nothing is open, queue it otherwise.
    pub fn raise(&mut self, mut request: Request) -> RequestId {
        self.next_request += 1;
        request.id = RequestId(self.next_request);
        let id = request.id;
        self.resolving = true;
        if self.open.is_none() {
            debug!(%id, kind = ?request.kind, "request opened");
            self.open = Some(request);
        } else {
            debug!(%id, kind = ?request.kind, queued = self.modal.len() + 1, "request queued");
            self.modal.push_back(request);
        }
        id
    }

    #[must_use]
    pub fn open(&self) -> Option<&Request> {
        self.open.as_ref()
    }

    /// Take the open request out (to answer or cancel it).
    pub(crate) fn take_open(&mut self) -> Option<Request> {
        self.open.take()
    }

    /// Put a request back after an invalid response.
    pub(crate) fn reopen(&mut self, request: Request) {
        self.open = Some(request);
    }

    /// Open the next queued request. Returns false if the queue is empty.
    pub(crate) fn open_next(&mut self) -> bool {
        match self.modal.pop_front() {
            Some(request) => {
                debug!(id = %request.id, "queued request opened");
                self.open = Some(request);
                true
            }
            None => false,
        }
    }

    /// Drop a queued (not open) request. Returns false if no queued
    /// request has that id.
    pub(crate) fn cancel_queued(&mut self, id: RequestId) -> Option<Request> {
        let index = self.modal.iter().position(|r| r.id == id)?;
        self.modal.remove(index)
    }

    /// Number of requests waiting behind the open one.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.modal.len()
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.open.as_ref().map_or(InteractionPhase::Idle, Request::phase)
    }

    // === Pending chain ===

    pub(crate) fn push_chain(&mut self, mut entry: ChainEntry) -> ChainEntryId {
        self.next_chain += 1;
        entry.id = ChainEntryId(self.next_chain);
        debug!(id = %entry.id, label = %entry.label, "chain entry added");
        let id = entry.id;
        self.chain.push(entry);
        id
    }

    #[must_use]
    pub fn chain(&self) -> &[ChainEntry] {
        &self.chain
    }

    /// Remove a chain entry by id.
    pub(crate) fn take_chain(&mut self, id: ChainEntryId) -> Option<ChainEntry> {
        let index = self.chain.iter().position(|e| e.id == id)?;
        Some(self.chain.remove(index))
    }

    // === Pending effects ===

    pub(crate) fn defer(&mut self, effect: PendingEffect) {
        debug!(label = %effect.label, "effect deferred");
        self.pending_effects.push_back(effect);
    }

    pub(crate) fn next_pending(&mut self) -> Option<PendingEffect> {
        self.pending_effects.pop_front()
    }

    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.len()
    }

    // === Batching ===

    pub(crate) fn begin_batch(&mut self) {
        self.batching_depth += 1;
    }

    /// Close one batching level. Returns true when the outermost batch
    /// closed.
    pub(crate) fn end_batch(&mut self) -> bool {
        self.batching_depth = self.batching_depth.saturating_sub(1);
        self.batching_depth == 0
    }

    #[must_use]
    pub fn is_batching(&self) -> bool {
        self.batching_depth > 0
    }

    // === Highlight ===

    /// True while an effect is being resolved or waits on the player.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    pub(crate) fn set_resolving(&mut self, resolving: bool) {
        self.resolving = resolving;
    }

    /// True when nothing at all is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.open.is_none()
            && self.modal.is_empty()
            && self.chain.is_empty()
            && self.pending_effects.is_empty()
    }

    /// Close every request and drop every queued callback.
    ///
    /// Ids keep counting up so a stale cancel can never hit a new request.
    pub fn close_all(&mut self) {
        self.open = None;
        self.modal.clear();
        self.chain.clear();
        self.pending_effects.clear();
        self.resolving = false;
    }
}
