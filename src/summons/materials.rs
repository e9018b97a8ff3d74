//! Material checks for Extra Deck summons.
//!
//! Two kinds of question are answered here:
//!
//! - Is a complete group of picks valid? (`is_synchro_pair`,
//!   `link_points_reach`, `fills_recipe`), used when a response arrives.
//! - Could any valid group be formed from a pool? (`synchro_feasible`,
//!   `link_feasible`, `recipe_feasible`), used before a summon opens its
//!   first prompt.

use crate::cards::CardFilter;
use crate::core::entity::InstanceId;
use crate::core::state::DuelView;

/// Attribute that lets a card count as two Link materials.
pub const DOUBLE_LINK_MATERIAL: &str = "double_link_material";

/// Monsters on the field, main zones first.
#[must_use]
pub fn field_monsters(view: &DuelView<'_>) -> Vec<InstanceId> {
    view.state.zones.field_monsters().map(|(_, id)| id).collect()
}

/// Field monsters with a level (Synchro material candidates).
#[must_use]
pub fn synchro_candidates(view: &DuelView<'_>) -> Vec<InstanceId> {
    field_monsters(view)
        .into_iter()
        .filter(|id| view.effective_level(*id).is_some())
        .collect()
}

/// Field monsters whose level equals the rank.
#[must_use]
pub fn xyz_candidates(view: &DuelView<'_>, rank: i64) -> Vec<InstanceId> {
    field_monsters(view)
        .into_iter()
        .filter(|id| view.effective_level(*id) == Some(rank))
        .collect()
}

/// One Tuner plus one non-Tuner whose levels add up to `level`.
#[must_use]
pub fn is_synchro_pair(view: &DuelView<'_>, picks: &[InstanceId], level: i64) -> bool {
    let [a, b] = picks else {
        return false;
    };
    if view.is_tuner(*a) == view.is_tuner(*b) {
        return false;
    }
    match (view.effective_level(*a), view.effective_level(*b)) {
        (Some(x), Some(y)) => x + y == level,
        _ => false,
    }
}

/// Some pair in the pool satisfies `is_synchro_pair`.
#[must_use]
pub fn synchro_feasible(view: &DuelView<'_>, pool: &[InstanceId], level: i64) -> bool {
    pool.iter().enumerate().any(|(i, a)| {
        pool[i + 1..]
            .iter()
            .any(|b| is_synchro_pair(view, &[*a, *b], level))
    })
}

/// Values one card may count as toward a Link rating.
fn link_values(view: &DuelView<'_>, id: InstanceId) -> Vec<i64> {
    let mut values = vec![1];
    if let Some(rating) = view.definition(id).and_then(|d| d.link_rating()) {
        if rating > 1 {
            values.push(rating);
        }
    }
    if view
        .definition(id)
        .is_some_and(|d| d.get_bool(DOUBLE_LINK_MATERIAL, false))
        && !values.contains(&2)
    {
        values.push(2);
    }
    values
}

/// Sums reachable by letting every card pick one of its values.
fn reachable_sums(view: &DuelView<'_>, picks: &[InstanceId], cap: i64) -> Vec<bool> {
    let cap = usize::try_from(cap.max(0)).unwrap_or(0);
    let mut reachable = vec![false; cap + 1];
    reachable[0] = true;
    for id in picks {
        let mut next = vec![false; cap + 1];
        for (sum, ok) in reachable.iter().enumerate() {
            if !ok {
                continue;
            }
            for value in link_values(view, *id) {
                let Ok(value) = usize::try_from(value) else {
                    continue;
                };
                if sum + value <= cap {
                    next[sum + value] = true;
                }
            }
        }
        reachable = next;
    }
    reachable
}

/// The picks can count as exactly `rating` Link material points.
#[must_use]
pub fn link_points_reach(view: &DuelView<'_>, picks: &[InstanceId], rating: i64) -> bool {
    if picks.is_empty() || rating <= 0 {
        return false;
    }
    reachable_sums(view, picks, rating)
        .get(rating as usize)
        .copied()
        .unwrap_or(false)
}

/// Some non-empty subset of the pool reaches exactly `rating` points.
#[must_use]
pub fn link_feasible(view: &DuelView<'_>, pool: &[InstanceId], rating: i64) -> bool {
    if rating <= 0 {
        return false;
    }
    let cap = rating as usize;
    // reachable[sum]: some non-empty subset reaches `sum`
    let mut reachable = vec![false; cap + 1];
    for id in pool {
        let mut next = reachable.clone();
        for value in link_values(view, *id) {
            let value = value as usize;
            if value <= cap {
                next[value] = true;
            }
            for (sum, ok) in reachable.iter().enumerate() {
                if *ok && sum + value <= cap {
                    next[sum + value] = true;
                }
            }
        }
        reachable = next;
    }
    reachable[cap]
}

/// Every recipe slot is filled by a distinct pick, and every pick fills a
/// slot.
#[must_use]
pub fn fills_recipe(view: &DuelView<'_>, recipe: &[CardFilter], picks: &[InstanceId]) -> bool {
    picks.len() == recipe.len() && assign(view, recipe, picks, &mut vec![false; picks.len()])
}

/// Some selection from the pool fills the recipe.
#[must_use]
pub fn recipe_feasible(view: &DuelView<'_>, recipe: &[CardFilter], pool: &[InstanceId]) -> bool {
    !recipe.is_empty() && pool.len() >= recipe.len() && assign(view, recipe, pool, &mut vec![false; pool.len()])
}

fn assign(view: &DuelView<'_>, recipe: &[CardFilter], pool: &[InstanceId], used: &mut [bool]) -> bool {
    let Some((slot, rest)) = recipe.split_first() else {
        return true;
    };
    for (i, id) in pool.iter().enumerate() {
        if used[i] || !slot.matches(view, *id) {
            continue;
        }
        used[i] = true;
        if assign(view, rest, pool, used) {
            used[i] = false;
            return true;
        }
        used[i] = false;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardRegistry, CardType, LinkMarker, Subtype};
    use crate::core::state::DuelState;
    use crate::zones::Slot;

    const SCOUT: CardId = CardId::new(1);
    const WARDEN: CardId = CardId::new(2);
    const SPIDER: CardId = CardId::new(3);
    const TWIN: CardId = CardId::new(4);
    const COLOSSUS: CardId = CardId::new(5);

    fn cards() -> CardRegistry {
        CardRegistry::from_definitions(vec![
            CardDefinition::monster(SCOUT, "Vale Scout", 4, 1600, 1000).with_attr("archetype", "Vale"),
            CardDefinition::monster(WARDEN, "Vale Warden", 4, 1000, 1000).with_subtype(Subtype::Tuner),
            CardDefinition::new(SPIDER, "Vale Link Spider", CardType::Monster)
                .with_link_markers(&[LinkMarker::BottomLeft, LinkMarker::BottomRight]),
            CardDefinition::monster(TWIN, "Vale Twin Core", 2, 800, 800).with_attr(DOUBLE_LINK_MATERIAL, true),
            CardDefinition::monster(COLOSSUS, "Vale Colossus", 7, 2600, 2000),
        ])
    }

    fn board(cards: &[CardId]) -> (DuelState, Vec<InstanceId>) {
        let mut state = DuelState::new();
        let ids = cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let id = state.alloc_instance(*card);
                state.zones.set_slot(Slot::monster(i), Some(id));
                id
            })
            .collect();
        (state, ids)
    }

    #[test]
    fn test_synchro_pair() {
        let cards = cards();
        let (state, ids) = board(&[SCOUT, WARDEN, SCOUT]);
        let view = DuelView::new(&state, &cards);

        assert!(is_synchro_pair(&view, &[ids[0], ids[1]], 8));
        assert!(is_synchro_pair(&view, &[ids[1], ids[0]], 8));
        assert!(!is_synchro_pair(&view, &[ids[0], ids[2]], 8));
        assert!(!is_synchro_pair(&view, &[ids[0], ids[1]], 7));
        assert!(!is_synchro_pair(&view, &[ids[1]], 4));
        assert!(synchro_feasible(&view, &ids, 8));
        assert!(!synchro_feasible(&view, &ids, 9));
    }

    #[test]
    fn test_link_points() {
        let cards = cards();
        let (state, ids) = board(&[SCOUT, SPIDER, TWIN, SCOUT]);
        let view = DuelView::new(&state, &cards);
        let (scout, spider, twin) = (ids[0], ids[1], ids[2]);

        assert!(link_points_reach(&view, &[scout, ids[3]], 2));
        assert!(link_points_reach(&view, &[spider], 2));
        assert!(link_points_reach(&view, &[spider], 1));
        assert!(link_points_reach(&view, &[twin], 2));
        assert!(link_points_reach(&view, &[spider, twin], 4));
        assert!(link_points_reach(&view, &[spider, twin], 3));
        assert!(!link_points_reach(&view, &[spider, twin], 5));
        assert!(!link_points_reach(&view, &[], 0));

        assert!(link_feasible(&view, &[twin], 2));
        assert!(!link_feasible(&view, &[scout], 2));
        assert!(link_feasible(&view, &ids, 5));
    }

    #[test]
    fn test_recipe() {
        let cards = cards();
        let (state, ids) = board(&[SCOUT, WARDEN, COLOSSUS]);
        let view = DuelView::new(&state, &cards);
        let recipe = vec![CardFilter::archetype("Vale"), CardFilter::LevelAtLeast(7)];

        assert!(fills_recipe(&view, &recipe, &[ids[2], ids[0]]));
        assert!(!fills_recipe(&view, &recipe, &[ids[1], ids[0]]));
        assert!(!fills_recipe(&view, &recipe, &[ids[0]]));
        assert!(recipe_feasible(&view, &recipe, &ids));
        assert!(!recipe_feasible(&view, &recipe, &ids[..2]));
    }
}
