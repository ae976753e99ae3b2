//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::fixed::{Fixed64, f64_to_fixed64};
use crate::item::Item;
use crate::vocab::{DustType, ItemType};

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    f64_to_fixed64(v).expect("test quantity out of Fixed64 range")
}

// ===========================================================================
// Item constructors
// ===========================================================================

/// A fresh item of any type: one unit of materials, no tags or history.
pub fn item(item_type: ItemType, value: u64) -> Item {
    Item::new(item_type, value)
}

pub fn ore(value: u64) -> Item {
    item(ItemType::Ore, value)
}

pub fn gem(value: u64) -> Item {
    item(ItemType::Gem, value)
}

pub fn bar(value: u64) -> Item {
    item(ItemType::Bar, value)
}

pub fn plate(value: u64) -> Item {
    item(ItemType::Plate, value)
}

/// One unit of dust of the given kind, worth 1.
pub fn dust(kind: DustType) -> Item {
    item(ItemType::Dust, 1).with_dustwork_type(kind)
}
