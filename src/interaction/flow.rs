//! Driving the interaction queue.
//!
//! Every public action runs inside `run_batched`. Triggers raised while a
//! batch is open become chain entries; when the outermost batch closes the
//! engine settles the queue:
//!
//! 1. pending effects, in the order they were deferred
//! 2. the pending chain (one entry runs by itself, several open an
//!    ordering prompt)
//! 3. the next queued request
//!
//! Settling stops as soon as a request is open. The "effect resolving"
//! highlight clears only when everything is empty.

use tracing::{debug, warn};

use super::chain::{self, ChainEntryId, Deferred};
use super::queue::PendingEffect;
use super::request::{Prompt, Request, RequestId, RequestKind, Response, Selector};
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::engine::Engine;
use crate::zones::Slot;

fn unexpected(response: &Response) -> DuelError {
    DuelError::InvalidResponse(format!("unexpected response {response:?}"))
}

impl Engine {
    // === Batching ===

    /// Run an action as (part of) a batch.
    ///
    /// The outermost batch writes a rejection to the log feed and settles
    /// the queue when it closes.
    pub(crate) fn run_batched<T>(
        &mut self,
        action: impl FnOnce(&mut Self) -> Result<T, DuelError>,
    ) -> Result<T, DuelError> {
        let outermost = !self.interaction.is_batching();
        self.interaction.begin_batch();
        let result = action(self);
        let result = match result {
            Err(err) if outermost => Err(self.reject(err)),
            other => other,
        };
        if self.interaction.end_batch() {
            self.settle();
        }
        result
    }

    /// Run code on behalf of an effect.
    pub(crate) fn in_effect<T>(&mut self, action: impl FnOnce(&mut Self) -> T) -> T {
        self.effect_depth += 1;
        let out = action(self);
        self.effect_depth -= 1;
        out
    }

    /// Write a rejection to the log feed.
    pub(crate) fn reject(&mut self, err: DuelError) -> DuelError {
        warn!(error = %err, "action rejected");
        self.log(err.to_string());
        err
    }

    fn run_deferred(&mut self, label: &str, run: Deferred) {
        debug!(label, "running deferred effect");
        self.interaction.set_resolving(true);
        self.interaction.begin_batch();
        if let Err(err) = self.in_effect(run) {
            self.reject(err);
        }
        self.interaction.end_batch();
    }

    /// Drain pending effects, the chain and the modal queue.
    pub(crate) fn settle(&mut self) {
        loop {
            if self.interaction.open().is_some() {
                return;
            }
            if let Some(effect) = self.interaction.next_pending() {
                self.run_deferred(&effect.label, effect.run);
                continue;
            }

            let entries = self.interaction.chain();
            if !entries.is_empty() {
                let mut eligible = chain::eligible(entries, self.effects.priorities());
                if eligible.is_empty() {
                    eligible = (0..entries.len()).collect();
                }
                let ids: Vec<ChainEntryId> = eligible.iter().map(|i| entries[*i].id).collect();

                if let [only] = ids.as_slice() {
                    if let Some(entry) = self.interaction.take_chain(*only) {
                        self.run_deferred(&entry.label, entry.execute);
                    }
                    continue;
                }

                let labels = eligible.iter().map(|i| entries[*i].label.clone()).collect();
                self.open_chain_prompt(ids, labels);
                return;
            }

            if self.interaction.open_next() {
                return;
            }
            self.interaction.set_resolving(false);
            return;
        }
    }

    fn open_chain_prompt(&mut self, ids: Vec<ChainEntryId>, labels: Vec<String>) {
        debug!(candidates = ids.len(), "chain ordering prompt");
        let orders = ids.clone();
        let mut request = Request::new(
            RequestKind::EffectSelection,
            "Choose which effect to activate first",
            Prompt::Options(labels),
            move |engine, response| {
                let Response::Choose(index) = response else {
                    return Err(unexpected(&response));
                };
                let id = ids
                    .get(index)
                    .copied()
                    .ok_or_else(|| DuelError::InvalidResponse(format!("option {} does not exist", index + 1)))?;
                match engine.interaction.take_chain(id) {
                    Some(entry) => (entry.execute)(engine),
                    None => Ok(()),
                }
            },
        );
        request.orders = orders;
        self.interaction.raise(request);
    }

    // === Raising requests ===

    /// Raise a request. It opens now, or queues behind the open one.
    pub fn raise(&mut self, request: Request) -> RequestId {
        self.interaction.raise(request)
    }

    /// Defer code until the current batch closes.
    pub fn defer(
        &mut self,
        label: impl Into<String>,
        run: impl FnOnce(&mut Engine) -> Result<(), DuelError> + 'static,
    ) {
        self.interaction.defer(PendingEffect {
            label: label.into(),
            run: Box::new(run),
        });
    }

    /// Ask a yes/no question; `on_yes` runs only on "yes".
    pub fn confirm(
        &mut self,
        source: Option<InstanceId>,
        title: impl Into<String>,
        on_yes: impl FnOnce(&mut Engine) -> Result<(), DuelError> + 'static,
    ) -> RequestId {
        let mut request = Request::new(
            RequestKind::EffectSelection,
            title,
            Prompt::Confirm,
            move |engine, response| match response {
                Response::Confirm(true) => on_yes(engine),
                Response::Confirm(false) => Ok(()),
                other => Err(unexpected(&other)),
            },
        );
        request.source = source;
        self.raise(request)
    }

    /// Offer labelled options.
    pub fn choose_option(
        &mut self,
        source: Option<InstanceId>,
        title: impl Into<String>,
        options: Vec<String>,
        then: impl FnOnce(&mut Engine, usize) -> Result<(), DuelError> + 'static,
    ) -> RequestId {
        let mut request = Request::new(
            RequestKind::EffectSelection,
            title,
            Prompt::Options(options),
            move |engine, response| match response {
                Response::Choose(index) => then(engine, index),
                other => Err(unexpected(&other)),
            },
        );
        request.source = source;
        self.raise(request)
    }

    /// Search a zone for cards.
    ///
    /// Fails without opening anything if there are not enough candidates.
    pub fn search(
        &mut self,
        source: Option<InstanceId>,
        title: impl Into<String>,
        selector: Selector,
        then: impl FnOnce(&mut Engine, Vec<InstanceId>) -> Result<(), DuelError> + 'static,
    ) -> Result<RequestId, DuelError> {
        self.pick_cards(RequestKind::Search, source, title.into(), selector, then)
    }

    /// Target cards on the field or in the hand.
    pub fn target(
        &mut self,
        source: Option<InstanceId>,
        title: impl Into<String>,
        selector: Selector,
        then: impl FnOnce(&mut Engine, Vec<InstanceId>) -> Result<(), DuelError> + 'static,
    ) -> Result<RequestId, DuelError> {
        self.pick_cards(RequestKind::Targeting, source, title.into(), selector, then)
    }

    fn pick_cards(
        &mut self,
        kind: RequestKind,
        source: Option<InstanceId>,
        title: String,
        selector: Selector,
        then: impl FnOnce(&mut Engine, Vec<InstanceId>) -> Result<(), DuelError> + 'static,
    ) -> Result<RequestId, DuelError> {
        let available = selector.candidates(&self.view()).len();
        if available < selector.count.min {
            return Err(DuelError::MissingPrecondition(format!("{title}: no valid cards")));
        }
        let mut request = Request::new(kind, title, Prompt::Cards(selector), move |engine, response| match response {
            Response::Pick(picks) => then(engine, picks),
            other => Err(unexpected(&other)),
        });
        request.source = source;
        Ok(self.raise(request))
    }

    /// Ask for one of the given slots.
    pub fn choose_zone(
        &mut self,
        source: Option<InstanceId>,
        title: impl Into<String>,
        slots: Vec<Slot>,
        then: impl FnOnce(&mut Engine, Slot) -> Result<(), DuelError> + 'static,
    ) -> Result<RequestId, DuelError> {
        let title = title.into();
        if slots.is_empty() {
            return Err(DuelError::IllegalPlacement(format!("{title}: no zone is available")));
        }
        let mut request = Request::new(RequestKind::ZoneSelection, title, Prompt::Zones(slots), move |engine, response| {
            match response {
                Response::Zone(slot) => then(engine, slot),
                other => Err(unexpected(&other)),
            }
        });
        request.source = source;
        Ok(self.raise(request))
    }

    // === Answering ===

    /// Answer the open request.
    ///
    /// An invalid response is logged and the request stays open.
    pub fn respond(&mut self, id: RequestId, response: Response) -> Result<(), DuelError> {
        let request = match self.interaction.take_open() {
            Some(request) if request.id == id => request,
            Some(request) => {
                self.interaction.reopen(request);
                return Err(self.reject(DuelError::RequestMismatch(id)));
            }
            None => return Err(self.reject(DuelError::NoOpenRequest)),
        };
        if let Err(err) = request.validate(&self.view(), &response) {
            self.interaction.reopen(request);
            return Err(self.reject(err));
        }

        debug!(%id, ?response, "request answered");
        let resume = request.resume;
        self.run_batched(|engine| engine.in_effect(|engine| resume(engine, response)))
    }

    /// Cancel a request by id, open or queued.
    ///
    /// The continuation is dropped. Costs a handler paid before raising it
    /// stay paid. Cancelling a chain-ordering prompt discards the chain
    /// entries it offered.
    pub fn cancel(&mut self, id: RequestId) -> Result<(), DuelError> {
        let cancelled = match self.interaction.take_open() {
            Some(request) if request.id == id => request,
            Some(request) => {
                self.interaction.reopen(request);
                let Some(queued) = self.interaction.cancel_queued(id) else {
                    return Err(self.reject(DuelError::RequestMismatch(id)));
                };
                debug!(%id, "queued request cancelled");
                self.discard_chain(&queued.orders);
                return Ok(());
            }
            None => return Err(self.reject(DuelError::NoOpenRequest)),
        };
        debug!(%id, "request cancelled");
        self.discard_chain(&cancelled.orders);
        if !self.interaction.is_batching() {
            self.settle();
        }
        Ok(())
    }

    fn discard_chain(&mut self, ids: &[ChainEntryId]) {
        for id in ids {
            if let Some(entry) = self.interaction.take_chain(*id) {
                debug!(label = %entry.label, "chain entry discarded");
            }
        }
    }
}
