//! The move engine.
//!
//! `Engine::move_card` is the single atomic operation that relocates one
//! instance. In order it:
//!
//! 1. Finds the source (the hint wins; otherwise a full scan)
//! 2. Applies redirects (banish on leave, Pendulum to Extra Deck, Extra
//!    Deck monsters back to the Extra Deck)
//! 3. Validates the destination slot and the Normal Summon gate
//! 4. Takes a snapshot, unless the enclosing undo unit already has one
//! 5. Commits: removal, tributes, overlay reset, material cascade,
//!    placement, face-up state
//! 6. Writes one log line
//! 7. Dispatches effect handlers for the moved card and cascaded materials
//!
//! Steps 1 to 3 never touch the state, so a rejected move leaves nothing
//! behind but its log line. Tributes are checked in step 3 and the
//! destination slot is judged on the board without them.

use tracing::{info, warn};

use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::effects::{Reason, TriggerContext};
use crate::engine::Engine;
use crate::zones::{Location, Slot, ZoneKind, ZonePosition};

use super::context::{OperationContext, SummonVariant};
use super::messages::MoveLine;
use super::placement;

/// A request to move one card.
///
/// ## Example
///
/// ```ignore
/// engine.move_card(MoveRequest::new(id, ZoneKind::MonsterZone).at(2))?;
/// engine.move_card(MoveRequest::new(id, ZoneKind::Graveyard).without_trigger())?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub id: InstanceId,
    pub to: ZoneKind,
    /// Slot index for field zones, insertion index for list zones.
    pub index: Option<usize>,
    /// Where the caller believes the card is.
    pub hint: Option<Location>,
    pub suppress_trigger: bool,
    pub special: bool,
    pub variant: Option<SummonVariant>,
    pub drag: bool,
    /// Monsters tributed for a Normal Summon.
    pub tributes: Vec<InstanceId>,
}

impl MoveRequest {
    #[must_use]
    pub fn new(id: InstanceId, to: ZoneKind) -> Self {
        Self {
            id,
            to,
            index: None,
            hint: None,
            suppress_trigger: false,
            special: false,
            variant: None,
            drag: false,
            tributes: Vec::new(),
        }
    }

    /// Move into a specific slot.
    #[must_use]
    pub fn to_slot(id: InstanceId, slot: Slot) -> Self {
        Self::new(id, slot.zone).at(slot.index)
    }

    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: Location) -> Self {
        self.hint = Some(hint);
        self
    }

    #[must_use]
    pub fn without_trigger(mut self) -> Self {
        self.suppress_trigger = true;
        self
    }

    /// Special Summon (skips the Normal Summon gate).
    #[must_use]
    pub fn special(mut self) -> Self {
        self.special = true;
        self
    }

    /// Special Summon of a given variant.
    #[must_use]
    pub fn summoned(mut self, variant: SummonVariant) -> Self {
        self.special = true;
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn dragged(mut self) -> Self {
        self.drag = true;
        self
    }

    #[must_use]
    pub fn with_tributes(mut self, tributes: Vec<InstanceId>) -> Self {
        self.tributes = tributes;
        self
    }
}

/// Result of a committed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Moved {
    pub id: InstanceId,
    pub from: Location,
    pub to: Location,
    /// Materials sent to the Graveyard because their host left the field.
    pub cascaded: Vec<InstanceId>,
}

impl Moved {
    /// True if the card did not actually move (dropped on its own slot).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Clone, Copy, Debug)]
enum Target {
    Slot(Slot),
    List(ZoneKind, ZonePosition),
}

impl Engine {
    /// Move a card. See the module docs for the full pipeline.
    ///
    /// Rejections return the error and write it to the log feed.
    pub fn move_card(&mut self, request: MoveRequest) -> Result<Moved, DuelError> {
        let ctx = OperationContext::default().dragging(request.drag);
        self.run_batched(|engine| engine.move_with(request, ctx))
    }

    /// Detach a material from its host and send it to the Graveyard.
    pub fn detach_material(&mut self, host: InstanceId, material: InstanceId) -> Result<Moved, DuelError> {
        self.run_batched(|engine| {
            let hint = engine
                .state
                .zones
                .materials_of(host)
                .iter()
                .position(|m| *m == material)
                .map(|index| Location::Material { host, index })
                .ok_or(DuelError::StaleReference(material))?;
            let request = MoveRequest::new(material, ZoneKind::Graveyard).with_hint(hint);
            engine.move_with(request, OperationContext::default().detaching())
        })
    }

    /// Move with an explicit context. Does not log rejections.
    pub(crate) fn move_with(&mut self, request: MoveRequest, ctx: OperationContext) -> Result<Moved, DuelError> {
        let id = request.id;
        if self.state.instance(id).is_none() {
            return Err(DuelError::UnknownInstance(id));
        }

        let from = match request.hint {
            Some(hint) if self.state.zones.holds(hint, id) => hint,
            Some(_) => return Err(DuelError::StaleReference(id)),
            None => self
                .state
                .zones
                .locate(id)
                .ok_or(DuelError::StaleReference(id))?,
        };

        // === Validation (no mutation) ===

        let view = self.view();
        let name = view.name(id);
        let host_name = match from {
            Location::Material { host, .. } => Some(view.name(host)),
            Location::Zone { .. } => None,
        };
        let redirect = placement::redirect(&view, id, from, request.to, ctx.material_move);
        let dest = redirect.zone;

        let mut tributes = Vec::with_capacity(request.tributes.len());
        for (i, tribute) in request.tributes.iter().enumerate() {
            let at = view
                .location(*tribute)
                .filter(|l| l.zone_kind().is_some_and(ZoneKind::is_monster_field));
            let repeated = request.tributes[..i].contains(tribute);
            match at {
                Some(at) if *tribute != id && !repeated => tributes.push((*tribute, at)),
                _ => {
                    return Err(DuelError::IllegalPlacement(format!(
                        "{} cannot be tributed",
                        view.name(*tribute)
                    )))
                }
            }
        }

        // Tributes leave before the summoned monster arrives.
        let cleared;
        let board = if request.tributes.is_empty() {
            &self.state.zones
        } else {
            cleared = placement::board_without(&self.state.zones, &request.tributes);
            &cleared
        };
        let target = if dest.is_field() {
            let slot = match request.index {
                Some(index) => {
                    let slot = Slot::new(dest, index);
                    if from.slot() == Some(slot) {
                        return Ok(Moved { id, from, to: from, cascaded: Vec::new() });
                    }
                    placement::check_slot(&view, board, id, from, slot)?;
                    slot
                }
                None => placement::first_legal_slot(&view, board, id, from, dest)?,
            };
            Target::Slot(slot)
        } else {
            let position = match request.index {
                Some(index) if !redirect.redirected => ZonePosition::Index(index),
                _ => ZonePosition::Bottom,
            };
            Target::List(dest, position)
        };

        let normal_summon = from.zone_kind() == Some(ZoneKind::Hand)
            && dest == ZoneKind::MonsterZone
            && !request.special
            && request.variant.is_none();
        if normal_summon && self.state.normal_summon_used {
            return Err(DuelError::IllegalPlacement(
                "a Normal Summon was already used this turn".to_string(),
            ));
        }
        let required = if normal_summon {
            placement::tributes_required(view.effective_level(id))
        } else {
            0
        };
        let pendulum = view.is_pendulum(id);

        // === Commit ===

        self.checkpoint(&ctx);
        let unit = ctx.within_unit();

        self.state.zones.take(from, id);
        // Each tribute was found on a monster zone above and none repeats,
        // so sending it to the Graveyard cannot be refused.
        for (tribute, at) in tributes {
            let send = MoveRequest::new(tribute, ZoneKind::Graveyard).with_hint(at);
            self.move_with(send, unit.as_material())?;
        }
        if normal_summon && request.tributes.len() < required {
            warn!(instance = %id, required, offered = request.tributes.len(), "tribute shortfall");
            self.log(format!(
                "{name} needs {required} tribute(s) but {} were offered; summoning anyway",
                request.tributes.len()
            ));
        }

        let leaving = from.is_field() && !dest.is_field();
        let mut cascaded = Vec::new();
        if leaving {
            if let Some(instance) = self.state.instance_mut(id) {
                instance.clear_overlay();
            }
            cascaded = self.cascade_materials(id);
        }

        let to = match target {
            Target::Slot(slot) => {
                self.state.zones.set_slot(slot, Some(id));
                Location::from(slot)
            }
            Target::List(zone, position) => {
                self.state.zones.push(zone, id, position);
                let len = self.state.zones.list(zone).map_or(0, |l| l.len());
                let index = match position {
                    ZonePosition::Top => 0,
                    ZonePosition::Bottom => len.saturating_sub(1),
                    ZonePosition::Index(i) => i.min(len.saturating_sub(1)),
                };
                Location::zone(zone, index)
            }
        };

        let face_up = dest == ZoneKind::ExtraDeck && pendulum && from.is_field();
        if let Some(instance) = self.state.instance_mut(id) {
            instance.face_up = face_up;
            if request.variant == Some(SummonVariant::Pendulum) {
                instance.flags.pendulum_summoned = true;
            }
        }
        if normal_summon {
            self.state.normal_summon_used = true;
        }

        // === Log ===

        let drag_on_field = (request.drag || ctx.drag) && from.is_field() && dest.is_field();
        if !ctx.suppress_log && !(drag_on_field && !self.config.log_drag_moves) {
            let line = MoveLine {
                name: &name,
                host: host_name.as_deref(),
                from,
                to,
                normal_summon,
                special: request.special,
                variant: request.variant,
                face_up,
            };
            self.log(line.render());
        }
        info!(instance = %id, ?from, ?to, "card moved");

        // === Dispatch ===

        if !ctx.suppress_triggers && !request.suppress_trigger {
            let reason = if ctx.as_material {
                Reason::AsMaterial
            } else if self.effect_depth > 0 {
                Reason::Triggered
            } else {
                Reason::Moved
            };
            let mut triggers = Vec::with_capacity(1 + cascaded.len());
            if let Some(trigger) = self.trigger_for(id, reason, request.variant, request.special, Some(from), Some(to)) {
                triggers.push(trigger);
            }
            for material in &cascaded {
                let at = self.state.zones.locate(*material);
                if let Some(trigger) = self.trigger_for(*material, Reason::AsMaterial, None, false, None, at) {
                    triggers.push(trigger);
                }
            }
            self.dispatch(triggers);
        }

        Ok(Moved { id, from, to, cascaded })
    }

    /// Send every material under `host` (recursively) to the Graveyard.
    ///
    /// Part of the host's move: no separate log lines or snapshots.
    pub(crate) fn cascade_materials(&mut self, host: InstanceId) -> Vec<InstanceId> {
        let detached = self.state.zones.detach_all(host);
        for material in &detached {
            if let Some(instance) = self.state.instance_mut(*material) {
                instance.clear_overlay();
                instance.face_up = false;
            }
            self.state.zones.push(ZoneKind::Graveyard, *material, ZonePosition::Bottom);
        }
        detached
    }

    /// Attach `material` to `host`, wherever it currently is.
    ///
    /// Returns the materials that `material` itself carried, which were
    /// sent to the Graveyard.
    pub(crate) fn attach_material(&mut self, host: InstanceId, material: InstanceId) -> Result<Vec<InstanceId>, DuelError> {
        let from = self
            .state
            .zones
            .locate(material)
            .ok_or(DuelError::StaleReference(material))?;
        self.state.zones.take(from, material);
        let mut cascaded = Vec::new();
        if from.is_field() {
            if let Some(instance) = self.state.instance_mut(material) {
                instance.clear_overlay();
            }
            cascaded = self.cascade_materials(material);
        }
        self.state.zones.attach(host, material);
        Ok(cascaded)
    }

    fn trigger_for(
        &self,
        id: InstanceId,
        reason: Reason,
        variant: Option<SummonVariant>,
        special: bool,
        from: Option<Location>,
        to: Option<Location>,
    ) -> Option<TriggerContext> {
        let card = self.state.instance(id)?.card_id;
        Some(TriggerContext {
            source: id,
            card,
            reason,
            variant,
            special,
            from,
            to,
        })
    }
}
