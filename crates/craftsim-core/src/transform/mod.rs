//! The machine catalog.
//!
//! Every implemented machine is a plain function from its inputs to a new
//! [`Item`]. [`Rule`] wraps those functions by arity so the registry can hold
//! them in one table. Dispatch is an enum match, no trait objects.

pub mod multi;
pub mod single;

use crate::item::Item;
use crate::validation::ValidationError;

/// A machine refused its inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The ore upgrader is only defined as the very first step of a chain.
    #[error("ore upgrader only accepts untouched ore; item already carries tags (item: {item})")]
    UpgradeAfterProcessing { item: Box<Item> },
    #[error("ore value {value} has no higher tier on the upgrade ladder")]
    LadderExhausted { value: u64 },
    #[error("machine takes {expected} input(s), got {got}")]
    ArityMismatch { expected: usize, got: usize },
}

pub type SingleRule = fn(&Item) -> Result<Item, TransformError>;
pub type PairRule = fn(&Item, &Item) -> Result<Item, TransformError>;
pub type TripleRule = fn(&Item, &Item, &Item) -> Result<Item, TransformError>;

/// A machine's transformation, tagged by how many inputs it takes.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Single(SingleRule),
    Pair(PairRule),
    Triple(TripleRule),
}

impl Rule {
    pub fn arity(&self) -> usize {
        match self {
            Rule::Single(_) => 1,
            Rule::Pair(_) => 2,
            Rule::Triple(_) => 3,
        }
    }

    /// Run the rule on `inputs`, which must match its arity.
    pub fn apply(&self, inputs: &[&Item]) -> Result<Item, TransformError> {
        match (self, inputs) {
            (Rule::Single(f), [a]) => f(a),
            (Rule::Pair(f), [a, b]) => f(a, b),
            (Rule::Triple(f), [a, b, c]) => f(a, b, c),
            _ => Err(TransformError::ArityMismatch {
                expected: self.arity(),
                got: inputs.len(),
            }),
        }
    }

    /// Feed the same item into every input slot. Used when a chain combines
    /// an item with a copy of itself (crucible, alloy furnace).
    pub fn apply_repeated(&self, item: &Item) -> Result<Item, TransformError> {
        match self {
            Rule::Single(f) => f(item),
            Rule::Pair(f) => f(item, item),
            Rule::Triple(f) => f(item, item, item),
        }
    }
}
