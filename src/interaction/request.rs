//! Interactive requests.
//!
//! A request is a question for the player plus the continuation that runs
//! when it is answered. There are four kinds:
//!
//! - **Search**: pick cards out of a hidden or list zone (deck, graveyard)
//! - **EffectSelection**: yes/no confirmation or a choice between options
//! - **Targeting**: pick cards that are already public (field, hand)
//! - **ZoneSelection**: pick an empty field slot
//!
//! Card picks are described by a `Selector`, which is re-evaluated against
//! the live state when the response arrives. A response that no longer
//! fits is rejected and the request stays open.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardFilter;
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::DuelView;
use crate::engine::Engine;
use crate::summons::materials;
use crate::zones::{Slot, ZoneKind};

use super::chain::ChainEntryId;

/// Identifier of a raised request. Doubles as its cancellation token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u32);

impl RequestId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({})", self.0)
    }
}

/// The four request kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    Search,
    EffectSelection,
    Targeting,
    ZoneSelection,
}

/// What the engine is waiting for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionPhase {
    #[default]
    Idle,
    AwaitingSearch,
    AwaitingSelection,
    AwaitingTarget,
    AwaitingZone,
}

impl From<RequestKind> for InteractionPhase {
    fn from(kind: RequestKind) -> Self {
        match kind {
            RequestKind::Search => InteractionPhase::AwaitingSearch,
            RequestKind::EffectSelection => InteractionPhase::AwaitingSelection,
            RequestKind::Targeting => InteractionPhase::AwaitingTarget,
            RequestKind::ZoneSelection => InteractionPhase::AwaitingZone,
        }
    }
}

/// How many cards a selector accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickCount {
    pub min: usize,
    pub max: usize,
}

impl PickCount {
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    #[must_use]
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, n: usize) -> bool {
        self.min <= n && n <= self.max
    }
}

/// Constraint over the picked group as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupRule {
    #[default]
    None,
    /// One Tuner and one non-Tuner whose effective levels add up to the
    /// given level.
    SynchroLevel(i64),
    /// Material points add up to exactly the given Link rating.
    LinkRating(i64),
    /// Every slot of a Fusion recipe is filled by a distinct pick.
    FusionRecipe(Vec<CardFilter>),
}

impl GroupRule {
    /// Check a complete group of picks.
    pub fn check(&self, view: &DuelView<'_>, picks: &[InstanceId]) -> Result<(), String> {
        match self {
            GroupRule::None => Ok(()),
            GroupRule::SynchroLevel(level) => {
                if materials::is_synchro_pair(view, picks, *level) {
                    Ok(())
                } else {
                    Err(format!("pick one Tuner and one non-Tuner whose levels add up to {level}"))
                }
            }
            GroupRule::LinkRating(rating) => {
                if materials::link_points_reach(view, picks, *rating) {
                    Ok(())
                } else {
                    Err(format!("materials do not add up to Link-{rating}"))
                }
            }
            GroupRule::FusionRecipe(recipe) => {
                if materials::fills_recipe(view, recipe, picks) {
                    Ok(())
                } else {
                    Err("materials do not fit the Fusion recipe".to_string())
                }
            }
        }
    }
}

/// Declarative description of which cards may be picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Zones to look in, in display order.
    pub zones: SmallVec<[ZoneKind; 4]>,
    /// Also offer the materials attached to this host.
    pub attached_to: Option<InstanceId>,
    pub filter: CardFilter,
    pub count: PickCount,
    pub rule: GroupRule,
}

impl Selector {
    /// Pick exactly one card from the given zones.
    #[must_use]
    pub fn new(zones: &[ZoneKind], filter: CardFilter) -> Self {
        Self {
            zones: SmallVec::from_slice(zones),
            attached_to: None,
            filter,
            count: PickCount::exactly(1),
            rule: GroupRule::None,
        }
    }

    /// Pick from the field (main and extra monster zones).
    #[must_use]
    pub fn field_monsters(filter: CardFilter) -> Self {
        Self::new(&[ZoneKind::MonsterZone, ZoneKind::ExtraMonsterZone], filter)
    }

    /// Pick among the materials attached to `host`.
    #[must_use]
    pub fn materials_of(host: InstanceId) -> Self {
        Self {
            zones: SmallVec::new(),
            attached_to: Some(host),
            filter: CardFilter::Any,
            count: PickCount::exactly(1),
            rule: GroupRule::None,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: PickCount) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: GroupRule) -> Self {
        self.rule = rule;
        self
    }

    /// Cards that currently satisfy the selector.
    #[must_use]
    pub fn candidates(&self, view: &DuelView<'_>) -> Vec<InstanceId> {
        let zones = &view.state.zones;
        let mut out = Vec::new();
        for zone in &self.zones {
            if let Some(list) = zones.list(*zone) {
                out.extend(list.iter().copied());
            } else {
                out.extend(zones.occupied(*zone).map(|(_, id)| id));
            }
        }
        if let Some(host) = self.attached_to {
            out.extend(zones.materials_of(host));
        }
        out.retain(|id| self.filter.matches(view, *id));
        out
    }

    /// Validate a set of picks against the live state.
    pub fn validate(&self, view: &DuelView<'_>, picks: &[InstanceId]) -> Result<(), String> {
        if !self.count.contains(picks.len()) {
            return Err(format!(
                "expected between {} and {} cards, got {}",
                self.count.min,
                self.count.max,
                picks.len()
            ));
        }
        let candidates = self.candidates(view);
        for (i, id) in picks.iter().enumerate() {
            if picks[..i].contains(id) {
                return Err(format!("{id} was picked twice"));
            }
            if !candidates.contains(id) {
                return Err(format!("{} cannot be picked", view.name(*id)));
            }
        }
        self.rule.check(view, picks)
    }
}

/// What the request asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Yes or no.
    Confirm,
    /// One of several labelled options.
    Options(Vec<String>),
    /// Cards matching a selector.
    Cards(Selector),
    /// One of the listed slots.
    Zones(Vec<Slot>),
}

/// The player's answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Confirm(bool),
    Choose(usize),
    Pick(Vec<InstanceId>),
    Zone(Slot),
}

/// Code that runs when a request is answered.
pub type Continuation = Box<dyn FnOnce(&mut Engine, Response) -> Result<(), DuelError>>;

/// An interactive request.
pub struct Request {
    pub id: RequestId,
    pub kind: RequestKind,
    /// Text shown above the choice.
    pub title: String,
    /// Card whose effect raised the request.
    pub source: Option<InstanceId>,
    pub prompt: Prompt,
    pub(crate) resume: Continuation,
    /// Chain entries this request orders. Cancelling it discards them.
    pub(crate) orders: Vec<ChainEntryId>,
}

impl Request {
    /// Create a request. The id is assigned when it is raised.
    pub fn new(
        kind: RequestKind,
        title: impl Into<String>,
        prompt: Prompt,
        resume: impl FnOnce(&mut Engine, Response) -> Result<(), DuelError> + 'static,
    ) -> Self {
        Self {
            id: RequestId(0),
            kind,
            title: title.into(),
            source: None,
            prompt,
            resume: Box::new(resume),
            orders: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: InstanceId) -> Self {
        self.source = Some(source);
        self
    }

    /// Current phase this request puts the engine in.
    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.kind.into()
    }

    /// Live candidates for card prompts (empty for other prompts).
    #[must_use]
    pub fn candidates(&self, view: &DuelView<'_>) -> Vec<InstanceId> {
        match &self.prompt {
            Prompt::Cards(selector) => selector.candidates(view),
            _ => Vec::new(),
        }
    }

    /// Check a response against the prompt and the live state.
    pub fn validate(&self, view: &DuelView<'_>, response: &Response) -> Result<(), DuelError> {
        let result = match (&self.prompt, response) {
            (Prompt::Confirm, Response::Confirm(_)) => Ok(()),
            (Prompt::Options(options), Response::Choose(i)) => {
                if *i < options.len() {
                    Ok(())
                } else {
                    Err(format!("option {} does not exist", i + 1))
                }
            }
            (Prompt::Cards(selector), Response::Pick(picks)) => selector.validate(view, picks),
            (Prompt::Zones(slots), Response::Zone(slot)) => {
                if slots.contains(slot) {
                    Ok(())
                } else {
                    Err(format!("{slot} is not available"))
                }
            }
            (_, other) => Err(format!("{other:?} does not answer a {:?} request", self.kind)),
        };
        result.map_err(DuelError::InvalidResponse)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("source", &self.source)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}
