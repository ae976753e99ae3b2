use crate::fixed::{Fixed64, fixed64_to_f64};
use crate::validation::ValidationError;
use crate::vocab::{DustType, ItemType, Machine, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Tags on an item. Unique and order-irrelevant; iteration is sorted so
/// output is deterministic.
pub type TagSet = BTreeSet<Tag>;

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// One entry in an item's provenance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// A machine the item passed through.
    Machine(Machine),
    /// Several items were combined; holds each input's full history.
    Merge(Vec<History>),
}

/// Append-only provenance of an item. Never mutated in place: extending a
/// history yields a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<Step>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A history holding a single merge of the given histories.
    pub fn merge(histories: Vec<History>) -> Self {
        Self(vec![Step::Merge(histories)])
    }

    /// This history followed by `machine`.
    pub fn then(&self, machine: Machine) -> Self {
        let mut steps = self.0.clone();
        steps.push(Step::Machine(machine));
        Self(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn last(&self) -> Option<&Step> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `machine` appears anywhere, including inside merged inputs.
    pub fn contains(&self, machine: Machine) -> bool {
        self.0.iter().any(|step| match step {
            Step::Machine(m) => *m == machine,
            Step::Merge(inputs) => inputs.iter().any(|h| h.contains(machine)),
        })
    }

    /// Total number of machine applications, counting merged inputs.
    pub fn machine_count(&self) -> usize {
        self.0
            .iter()
            .map(|step| match step {
                Step::Machine(_) => 1,
                Step::Merge(inputs) => inputs.iter().map(History::machine_count).sum(),
            })
            .sum()
    }

    /// Most recent step first, merges collapsed to the last step of each input.
    ///
    /// `Alloy Furnace <-| [Ore Smelter + Ore Smelter]`
    pub fn compact(&self) -> String {
        if self.0.is_empty() {
            return "no sequence".to_string();
        }
        self.0
            .iter()
            .rev()
            .map(Step::to_string)
            .collect::<Vec<_>>()
            .join(" <-| ")
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Machine(machine) => f.write_str(machine.as_str()),
            Step::Merge(inputs) => {
                let parts: Vec<String> = inputs
                    .iter()
                    .map(|h| h.last().map_or_else(|| "raw".to_string(), Step::to_string))
                    .collect();
                write!(f, "[{}]", parts.join(" + "))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A crafted good at one point in its lineage.
///
/// Items are values: every transformation returns a new item and leaves its
/// inputs untouched. Materials are never negative; the only fallible
/// constructor is [`Item::from_parts`] and deserialization goes through it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    item_type: ItemType,
    value: u64,
    materials: Fixed64,
    dustwork_type: DustType,
    tags: TagSet,
    sequence: History,
}

/// Plain field-for-field form of [`Item`] used on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_type: ItemType,
    pub value: u64,
    pub materials: Fixed64,
    #[serde(default = "unknown_dust")]
    pub dustwork_type: DustType,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default)]
    pub sequence: History,
}

fn unknown_dust() -> DustType {
    DustType::Unknown
}

impl Default for Item {
    fn default() -> Self {
        Self::new(ItemType::Unknown, 0)
    }
}

impl Item {
    /// A fresh item: one unit of materials, no tags, no history.
    pub fn new(item_type: ItemType, value: u64) -> Self {
        Self {
            item_type,
            value,
            materials: Fixed64::from_num(1),
            dustwork_type: DustType::Unknown,
            tags: TagSet::new(),
            sequence: History::new(),
        }
    }

    /// Build an item from every field, rejecting negative materials.
    pub fn from_parts(
        item_type: ItemType,
        value: u64,
        materials: Fixed64,
        dustwork_type: DustType,
        tags: TagSet,
        sequence: History,
    ) -> Result<Self, ValidationError> {
        if materials < Fixed64::ZERO {
            return Err(ValidationError::NegativeMaterials { materials });
        }
        Ok(Self::assemble(item_type, value, materials, dustwork_type, tags, sequence))
    }

    /// Infallible constructor for rule outputs whose materials derive from
    /// already-valid inputs.
    pub(crate) fn assemble(
        item_type: ItemType,
        value: u64,
        materials: Fixed64,
        dustwork_type: DustType,
        tags: TagSet,
        sequence: History,
    ) -> Self {
        debug_assert!(materials >= Fixed64::ZERO);
        Self {
            item_type,
            value,
            materials,
            dustwork_type,
            tags,
            sequence,
        }
    }

    /// Replace the material quantity.
    pub fn with_materials(self, materials: Fixed64) -> Result<Self, ValidationError> {
        if materials < Fixed64::ZERO {
            return Err(ValidationError::NegativeMaterials { materials });
        }
        Ok(Self { materials, ..self })
    }

    pub fn with_dustwork_type(self, dustwork_type: DustType) -> Self {
        Self {
            dustwork_type,
            ..self
        }
    }

    pub fn with_tags(self, tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut all = self.tags;
        all.extend(tags);
        Self { tags: all, ..self }
    }

    pub fn with_sequence(self, sequence: History) -> Self {
        Self { sequence, ..self }
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn materials(&self) -> Fixed64 {
        self.materials
    }

    pub fn dustwork_type(&self) -> DustType {
        self.dustwork_type
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn sequence(&self) -> &History {
        &self.sequence
    }

    /// Value earned per unit of materials, 0 when materials is 0.
    pub fn value_per_materials(&self) -> f64 {
        if self.materials == Fixed64::ZERO {
            0.0
        } else {
            self.value as f64 / fixed64_to_f64(self.materials)
        }
    }

    /// Like `Display` but with the compacted history in the last column.
    pub fn table_full(&self) -> String {
        self.row(&self.sequence.compact())
    }

    fn row(&self, last_column: &str) -> String {
        format!(
            "{:16} | Val: {:8} | Mats: {:4.1} | VPM: {:11.2} | {}",
            self.item_type,
            self.value,
            fixed64_to_f64(self.materials),
            self.value_per_materials(),
            last_column,
        )
    }
}

impl fmt::Display for Item {
    /// `type | Val | Mats | VPM | last step`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self
            .sequence
            .last()
            .map_or_else(|| "no sequence".to_string(), Step::to_string);
        f.write_str(&self.row(&last))
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Item::from_parts(
            record.item_type,
            record.value,
            record.materials,
            record.dustwork_type,
            record.tags,
            record.sequence,
        )
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            item_type: item.item_type,
            value: item.value,
            materials: item.materials,
            dustwork_type: item.dustwork_type,
            tags: item.tags,
            sequence: item.sequence,
        }
    }
}
