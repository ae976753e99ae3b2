//! Precondition checks shared by every transformation, and the aggregate used
//! to combine inputs of multi-input machines.
//!
//! All checks are pure: they either return `Ok(())` or an error carrying the
//! offending item so the caller can see exactly what was rejected.

use crate::fixed::Fixed64;
use crate::item::{History, Item, TagSet};
use crate::vocab::{DustType, ItemType, Tag};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An item failed a machine's precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("expected item type {}, got {actual} (item: {item})", one_of(.expected))]
    InvalidItemType {
        expected: Vec<ItemType>,
        actual: ItemType,
        item: Box<Item>,
    },
    #[error("prohibited tag {tag} is present (item: {item})")]
    TagConflict { tag: Tag, item: Box<Item> },
    #[error("required tag {tag} is missing (item: {item})")]
    TagMissing { tag: Tag, item: Box<Item> },
    #[error("expected {expected} dust, got {actual} {dust} (item: {item})")]
    InvalidDustType {
        expected: DustType,
        actual: ItemType,
        dust: DustType,
        item: Box<Item>,
    },
    #[error("materials cannot be negative, got {materials}")]
    NegativeMaterials { materials: Fixed64 },
    #[error("combined materials exceed {}", Fixed64::MAX)]
    MaterialsOverflow,
}

fn one_of(types: &[ItemType]) -> String {
    match types {
        [single] => single.to_string(),
        many => {
            let names: Vec<&str> = many.iter().map(|t| t.as_str()).collect();
            format!("one of [{}]", names.join(", "))
        }
    }
}

// ---------------------------------------------------------------------------
// Type checks
// ---------------------------------------------------------------------------

pub fn validate_type(item: &Item, expected: ItemType) -> Result<(), ValidationError> {
    if item.item_type() != expected {
        return Err(ValidationError::InvalidItemType {
            expected: vec![expected],
            actual: item.item_type(),
            item: Box::new(item.clone()),
        });
    }
    Ok(())
}

/// Every item must independently have one of the expected types.
pub fn validate_one_of_types(items: &[&Item], expected: &[ItemType]) -> Result<(), ValidationError> {
    for item in items {
        if !expected.contains(&item.item_type()) {
            return Err(ValidationError::InvalidItemType {
                expected: expected.to_vec(),
                actual: item.item_type(),
                item: Box::new((*item).clone()),
            });
        }
    }
    Ok(())
}

/// The item must be dust of the given dustwork type.
pub fn validate_dust_type(item: &Item, expected: DustType) -> Result<(), ValidationError> {
    if item.item_type() != ItemType::Dust || item.dustwork_type() != expected {
        return Err(ValidationError::InvalidDustType {
            expected,
            actual: item.item_type(),
            dust: item.dustwork_type(),
            item: Box::new(item.clone()),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tag checks
// ---------------------------------------------------------------------------

pub fn validate_tag_absent(item: &Item, tag: Tag) -> Result<(), ValidationError> {
    if item.has_tag(tag) {
        return Err(ValidationError::TagConflict {
            tag,
            item: Box::new(item.clone()),
        });
    }
    Ok(())
}

pub fn validate_tag_present(item: &Item, tag: Tag) -> Result<(), ValidationError> {
    if !item.has_tag(tag) {
        return Err(ValidationError::TagMissing {
            tag,
            item: Box::new(item.clone()),
        });
    }
    Ok(())
}

/// No item may carry any of `tags`.
pub fn validate_tags_absent(items: &[&Item], tags: &[Tag]) -> Result<(), ValidationError> {
    for item in items {
        for &tag in tags {
            validate_tag_absent(item, tag)?;
        }
    }
    Ok(())
}

/// Every item must carry every one of `tags`.
pub fn validate_tags_present(items: &[&Item], tags: &[Tag]) -> Result<(), ValidationError> {
    for item in items {
        for &tag in tags {
            validate_tag_present(item, tag)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum value and materials, union tags, and nest each input's history under a
/// single merge step. The result has type `unknown`; callers decide the
/// output type.
///
/// Value saturates at `u64::MAX`. Materials that no longer fit in
/// [`Fixed64`] are an error.
pub fn aggregate(items: &[&Item]) -> Result<Item, ValidationError> {
    let value = items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.value()));
    let materials = items
        .iter()
        .try_fold(Fixed64::ZERO, |acc, item| acc.checked_add(item.materials()))
        .ok_or(ValidationError::MaterialsOverflow)?;
    let tags: TagSet = items
        .iter()
        .flat_map(|item| item.tags().iter().copied())
        .collect();
    let sequence = History::merge(items.iter().map(|item| item.sequence().clone()).collect());

    Ok(Item::assemble(
        ItemType::Unknown,
        value,
        materials,
        DustType::Unknown,
        tags,
        sequence,
    ))
}
