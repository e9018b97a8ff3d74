//! Card system: definitions, instances, filters and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (type, subtypes, stats, link arrows)
//! - `CardInstance`: One copy in a duel, with its modifier overlay
//! - `CardFilter`: Declarative predicate used by selectors and recipes
//! - `CardRegistry`: Card definition lookup
//!
//! Definitions are read-only to the engine. Every live change goes through
//! the instance overlay.

pub mod attributes;
pub mod definition;
pub mod filter;
pub mod instance;
pub mod registry;

pub use attributes::{AttributeKey, AttributeValue, Attributes, ARCHETYPE};
pub use definition::{CardDefinition, CardId, CardType, LinkMarker, Subtype};
pub use filter::CardFilter;
pub use instance::{CardInstance, InstanceFlags, Modifiers};
pub use registry::CardRegistry;
