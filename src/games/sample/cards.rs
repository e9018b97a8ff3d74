//! Card definitions for the sample pool.

use crate::cards::{CardDefinition, CardFilter, CardId, CardRegistry, CardType, LinkMarker, Subtype, ARCHETYPE};
use crate::summons::materials::DOUBLE_LINK_MATERIAL;

pub const VALE_SCOUT: CardId = CardId::new(1);
pub const VALE_WARDEN: CardId = CardId::new(2);
pub const VALE_COLOSSUS: CardId = CardId::new(3);
pub const VALE_ORACLE: CardId = CardId::new(4);
pub const VALE_SENTINEL: CardId = CardId::new(5);
pub const EMBER_SPARK: CardId = CardId::new(6);
pub const EMBER_ASH: CardId = CardId::new(7);
pub const EMBER_HERALD: CardId = CardId::new(8);
pub const VALE_FUSION: CardId = CardId::new(9);
pub const VALE_CHIMERA: CardId = CardId::new(10);
pub const VALE_LANCER: CardId = CardId::new(11);
pub const VALE_BASTION: CardId = CardId::new(12);
pub const VALE_LINK_SPIDER: CardId = CardId::new(13);
pub const VALE_TWIN_CORE: CardId = CardId::new(14);
pub const VALE_BANNER: CardId = CardId::new(15);
pub const VALE_WARD: CardId = CardId::new(16);

fn vale(card: CardDefinition) -> CardDefinition {
    card.with_attr(ARCHETYPE, "Vale")
}

fn ember(card: CardDefinition) -> CardDefinition {
    card.with_attr(ARCHETYPE, "Ember")
}

/// Every card in the pool.
#[must_use]
pub fn definitions() -> Vec<CardDefinition> {
    vec![
        vale(CardDefinition::monster(VALE_SCOUT, "Vale Scout", 4, 1600, 1000))
            .with_subtype(Subtype::Effect)
            .with_description(
                "If this card is Summoned: you can add 1 \"Vale\" monster from your Deck to your hand, \
                 except \"Vale Scout\". Once per turn.",
            ),
        vale(CardDefinition::monster(VALE_WARDEN, "Vale Warden", 4, 1000, 1000)).with_subtype(Subtype::Tuner),
        vale(CardDefinition::monster(VALE_COLOSSUS, "Vale Colossus", 7, 2600, 2000)).with_subtype(Subtype::Normal),
        vale(CardDefinition::monster(VALE_ORACLE, "Vale Oracle", 3, 1000, 1000)).with_scale(1),
        vale(CardDefinition::monster(VALE_SENTINEL, "Vale Sentinel", 5, 1800, 1800)).with_scale(8),
        ember(CardDefinition::monster(EMBER_SPARK, "Ember Spark", 4, 1500, 800))
            .with_subtype(Subtype::Effect)
            .with_description("If this card is used as material: you can draw 1 card. Once per turn."),
        ember(CardDefinition::monster(EMBER_ASH, "Ember Ash", 4, 1400, 1200))
            .with_subtype(Subtype::Effect)
            .with_description(
                "If this card is used as material: you can add 1 other monster from your Graveyard to your hand.",
            ),
        ember(CardDefinition::monster(EMBER_HERALD, "Ember Herald", 4, 1700, 600))
            .with_subtype(Subtype::Effect)
            .with_description(
                "If this card is sent to the Graveyard as material: you can Special Summon it. \
                 Resolves before \"Ember Spark\".",
            ),
        vale(CardDefinition::spell(VALE_FUSION, "Vale Fusion")).with_description(
            "Fusion Summon 1 Fusion Monster from your Extra Deck, using monsters from your hand or field as material.",
        ),
        vale(
            CardDefinition::monster(VALE_CHIMERA, "Vale Chimera", 8, 2800, 2500)
                .with_fusion_materials(vec![CardFilter::archetype("Vale").and(CardFilter::Monster), CardFilter::Monster]),
        ),
        vale(CardDefinition::monster(VALE_LANCER, "Vale Lancer", 8, 2500, 2000)).with_subtype(Subtype::Synchro),
        vale(CardDefinition::new(VALE_BASTION, "Vale Bastion", CardType::Monster))
            .with_rank(4)
            .with_description(
                "Once per turn: you can detach 1 material from this card, then target 1 monster on the field; \
                 it gains 500 ATK.",
            )
            .with_stats(2200, 1800),
        vale(CardDefinition::new(VALE_LINK_SPIDER, "Vale Link Spider", CardType::Monster))
            .with_link_markers(&[LinkMarker::BottomLeft, LinkMarker::BottomRight])
            .with_attack(1400),
        vale(CardDefinition::monster(VALE_TWIN_CORE, "Vale Twin Core", 2, 800, 800))
            .with_attr(DOUBLE_LINK_MATERIAL, true),
        vale(CardDefinition::spell(VALE_BANNER, "Vale Banner")).with_subtype(Subtype::Field),
        vale(CardDefinition::trap(VALE_WARD, "Vale Ward")).with_subtype(Subtype::Continuous),
    ]
}

/// Registry of the pool.
#[must_use]
pub fn registry() -> CardRegistry {
    CardRegistry::from_definitions(definitions())
}
