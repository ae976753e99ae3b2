//! Craftsim Core -- the transformation engine for a resource-crafting game.
//!
//! Raw ores and gems pass through a fixed catalog of machines. Each machine
//! maps one or more input items to a new item with recomputed value and
//! materials, a cumulative tag set, and an extended history.
//!
//! # Layers
//!
//! 1. **Vocabularies** -- closed enums for item types, tags, machines, dust
//!    types, ores and gems ([`vocab`]).
//! 2. **Item** -- the immutable value record every machine produces
//!    ([`item::Item`]).
//! 3. **Validation** -- precondition checks and input aggregation
//!    ([`validation`]).
//! 4. **Transformations** -- one plain function per machine, grouped by
//!    arity ([`transform::single`], [`transform::multi`]).
//! 5. **Registry** -- machine to rule table, frozen after build
//!    ([`registry::Registry`]).
//! 6. **Factory and pipelines** -- starting materials, step-by-step chains
//!    and fixed-order batches ([`factory`], [`pipeline`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use craftsim_core::factory::{ItemBuilder, create_ore};
//! use craftsim_core::transform::single;
//!
//! let bar = ItemBuilder::new(create_ore("Tin")?)
//!     .then(single::ore_cleaner)
//!     .then(single::ore_smelter)
//!     .execute()?;
//! assert_eq!(bar.value(), 24);
//! ```
//!
//! # Key Types
//!
//! - [`item::Item`] -- crafted good with value, materials, tags and history.
//! - [`transform::Rule`] -- a machine's transformation tagged by arity.
//! - [`registry::Registry`] -- immutable catalog, shared via
//!   [`registry::Registry::standard`].
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for material quantities.
//! - [`error::CraftError`] -- umbrella over every error layer.

pub mod error;
pub mod factory;
pub mod fixed;
pub mod item;
pub mod pipeline;
pub mod registry;
pub mod transform;
pub mod validation;
pub mod vocab;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
