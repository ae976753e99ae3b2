//! Starting materials and step-by-step chains.
//!
//! [`create_ore`] and [`create_gem`] turn a name into a fresh item priced from
//! the ore and gem tables. [`ItemBuilder`] queues transformations and runs
//! them in order on [`execute`](ItemBuilder::execute).

use crate::error::CraftError;
use crate::item::Item;
use crate::registry::Registry;
use crate::transform::{Rule, SingleRule};
use crate::vocab::{Gem, ItemType, Machine, Ore, UnknownName};

/// A fresh ore item priced from the ore table.
pub fn ore_item(ore: Ore) -> Item {
    Item::new(ItemType::Ore, ore.value())
}

/// A fresh gem item priced from the gem table.
pub fn gem_item(gem: Gem) -> Item {
    Item::new(ItemType::Gem, gem.value())
}

/// Look up an ore by name (case-insensitive).
pub fn create_ore(name: &str) -> Result<Item, UnknownName> {
    Ok(ore_item(name.parse()?))
}

/// Look up a gem by name (case-insensitive).
pub fn create_gem(name: &str) -> Result<Item, UnknownName> {
    Ok(gem_item(name.parse()?))
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Rule(Rule),
    /// Resolved through the standard registry when the chain runs.
    Machine(Machine),
}

/// Queues transformations and applies them in order to a starting item.
///
/// Multi-input machines receive the current item in every slot, which is how
/// a chain self-combines through the crucible or the alloy furnace.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: Item,
    stages: Vec<Stage>,
}

impl ItemBuilder {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            stages: Vec::new(),
        }
    }

    /// Queue a single-input rule.
    pub fn then(mut self, rule: SingleRule) -> Self {
        self.stages.push(Stage::Rule(Rule::Single(rule)));
        self
    }

    /// Queue any rule, including multi-input ones.
    pub fn then_rule(mut self, rule: Rule) -> Self {
        self.stages.push(Stage::Rule(rule));
        self
    }

    /// Queue a machine by identity. Placeholders fail when the chain runs.
    pub fn then_machine(mut self, machine: Machine) -> Self {
        self.stages.push(Stage::Machine(machine));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every queued stage. The first failure aborts the chain.
    pub fn execute(self) -> Result<Item, CraftError> {
        let mut current = self.item;
        for stage in self.stages {
            let rule = match stage {
                Stage::Rule(rule) => rule,
                Stage::Machine(machine) => Registry::standard().rule(machine)?,
            };
            current = rule.apply_repeated(&current)?;
        }
        tracing::debug!(
            value = current.value(),
            steps = current.sequence().machine_count(),
            "chain finished"
        );
        Ok(current)
    }
}
