//! Resolved crafting plans, ready to run.

use craftsim_core::error::CraftError;
use craftsim_core::factory::ItemBuilder;
use craftsim_core::item::Item;
use craftsim_core::pipeline::{process_mats_complex, process_mats_simple};
use craftsim_core::transform::Rule;
use craftsim_core::vocab::Machine;

/// What a plan does with its inputs.
#[derive(Debug, Clone)]
pub enum Steps {
    /// One starting item and rules resolved at load time, applied in order.
    Chain {
        start: Item,
        rules: Vec<(Machine, Rule)>,
    },
    /// 1 to 4 starting items and the machines allowed in the batch order.
    Batch {
        inputs: Vec<Item>,
        machines: Vec<Machine>,
    },
}

/// A plan whose names have all been resolved.
#[derive(Debug, Clone)]
pub struct Plan {
    pub name: Option<String>,
    pub steps: Steps,
}

impl Plan {
    pub fn inputs(&self) -> &[Item] {
        match &self.steps {
            Steps::Chain { start, .. } => std::slice::from_ref(start),
            Steps::Batch { inputs, .. } => inputs,
        }
    }

    /// Machines the plan names, in file order.
    pub fn machines(&self) -> Vec<Machine> {
        match &self.steps {
            Steps::Chain { rules, .. } => rules.iter().map(|(m, _)| *m).collect(),
            Steps::Batch { machines, .. } => machines.clone(),
        }
    }

    /// Run the plan on fresh copies of its inputs.
    pub fn execute(&self) -> Result<Item, CraftError> {
        let output = match &self.steps {
            Steps::Chain { start, rules } => rules
                .iter()
                .fold(ItemBuilder::new(start.clone()), |builder, (_, rule)| {
                    builder.then_rule(*rule)
                })
                .execute()?,
            Steps::Batch { inputs, machines } => match inputs.as_slice() {
                [single] => process_mats_simple(single, machines)?,
                items => process_mats_complex(machines, items)?,
            },
        };
        tracing::debug!(
            plan = self.name.as_deref().unwrap_or("unnamed"),
            value = output.value(),
            "plan executed"
        );
        Ok(output)
    }
}
