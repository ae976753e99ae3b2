//! Fixed-topology batch processing.
//!
//! Raw ores and gems run through the stages below in this order. A stage
//! runs only when its machine was requested and the item currently has the
//! type the stage accepts:
//!
//! ```text
//! Ore Upgrader -> Ore Cleaner -> Polisher -> Philosophers Stone ->
//! Ore Smelter | Blast Furnace -> BTG -> Prismatic Gem Crucible ->
//! Gem Cutter -> GTB -> Alloy Furnace -> Tempering Forge
//! ```
//!
//! The order cannot be changed. For full control call the transformations
//! directly or use [`ItemBuilder`](crate::factory::ItemBuilder).

use crate::item::Item;
use crate::transform::{TransformError, multi, single};
use crate::validation::{ValidationError, validate_one_of_types};
use crate::vocab::{ItemType, Machine};

/// Raw material types a batch accepts.
pub const RAW: [ItemType; 2] = [ItemType::Ore, ItemType::Gem];

/// Every machine a batch knows how to place.
pub const BATCH_MACHINES: [Machine; 12] = [
    Machine::OreUpgrader,
    Machine::OreCleaner,
    Machine::Polisher,
    Machine::PhilosophersStone,
    Machine::OreSmelter,
    Machine::BlastFurnace,
    Machine::BarToGemTransmuter,
    Machine::PrismaticGemCrucible,
    Machine::GemCutter,
    Machine::GemToBarTransmuter,
    Machine::AlloyFurnace,
    Machine::TemperingForge,
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A batch could not be laid out for the inputs and machines given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessingError {
    #[error("a batch takes 2 to 4 items, got {0}")]
    ItemCount(usize),
    #[error("a batch needs an Alloy Furnace or a Prismatic Gem Crucible")]
    MissingCombiner,
    #[error("4 items need both an Alloy Furnace and a Prismatic Gem Crucible")]
    FourItemsNeedBothCombiners,
    #[error("Prismatic Gem Crucible needs 2 or 4 gems, got {0}")]
    UnbalancedGems(usize),
    #[error("expected 1 or 2 items before the Alloy Furnace, got {0}")]
    RemainingItems(usize),
    #[error("2 items remain but no Alloy Furnace was requested to combine them")]
    AlloyFurnaceRequired,
    #[error("Alloy Furnace needs two bars, last items are {first} and {second}")]
    AlloyTypeMismatch { first: ItemType, second: ItemType },
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl From<ValidationError> for ProcessingError {
    fn from(err: ValidationError) -> Self {
        ProcessingError::Transform(TransformError::Validation(err))
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Run one stage if it was requested and `item` has the accepted type.
fn stage<F>(
    machines: &[Machine],
    machine: Machine,
    accepts: Option<ItemType>,
    item: Item,
    rule: F,
) -> Result<Item, TransformError>
where
    F: FnOnce(&Item) -> Result<Item, TransformError>,
{
    if !machines.contains(&machine) {
        return Ok(item);
    }
    if accepts.is_some_and(|t| t != item.item_type()) {
        tracing::trace!(%machine, item_type = %item.item_type(), "stage skipped");
        return Ok(item);
    }
    let output = rule(&item)?;
    tracing::debug!(%machine, from = item.value(), to = output.value(), "stage applied");
    Ok(output)
}

/// Stages before the crucible: upgrade, clean, polish, infuse, smelt, BTG.
fn refine_raw(item: Item, machines: &[Machine]) -> Result<Item, TransformError> {
    let ore = Some(ItemType::Ore);
    let item = stage(machines, Machine::OreUpgrader, ore, item, single::ore_upgrader)?;
    let item = stage(machines, Machine::OreCleaner, ore, item, single::ore_cleaner)?;
    let item = stage(machines, Machine::Polisher, None, item, single::polisher)?;
    let item = stage(machines, Machine::PhilosophersStone, ore, item, single::philosophers_stone)?;
    // Smelting turns the ore into a bar, so at most one furnace runs.
    let item = stage(machines, Machine::OreSmelter, ore, item, single::ore_smelter)?;
    let item = stage(machines, Machine::BlastFurnace, ore, item, single::blast_furnace)?;
    stage(
        machines,
        Machine::BarToGemTransmuter,
        Some(ItemType::Bar),
        item,
        single::bar_to_gem,
    )
}

/// Stages after the crucible: cut, then GTB.
fn finish_gem(item: Item, machines: &[Machine]) -> Result<Item, TransformError> {
    let gem = Some(ItemType::Gem);
    let item = stage(machines, Machine::GemCutter, gem, item, single::gem_cutter)?;
    stage(machines, Machine::GemToBarTransmuter, gem, item, single::gem_to_bar)
}

fn temper(item: Item, machines: &[Machine]) -> Result<Item, TransformError> {
    stage(
        machines,
        Machine::TemperingForge,
        Some(ItemType::Bar),
        item,
        single::tempering_forge,
    )
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Process one ore or gem. The crucible and the alloy furnace combine the
/// item with itself.
pub fn process_mats_simple(item: &Item, machines: &[Machine]) -> Result<Item, ProcessingError> {
    validate_one_of_types(&[item], &RAW)?;

    let item = refine_raw(item.clone(), machines)?;
    let item = stage(
        machines,
        Machine::PrismaticGemCrucible,
        Some(ItemType::Gem),
        item,
        |gem| multi::prismatic_gem_crucible(gem, gem),
    )?;
    let item = finish_gem(item, machines)?;
    let item = stage(
        machines,
        Machine::AlloyFurnace,
        Some(ItemType::Bar),
        item,
        |bar| multi::alloy_furnace(bar, bar),
    )?;
    Ok(temper(item, machines)?)
}

/// Process 2 to 4 ores and gems into a single item.
///
/// Gems are paired in input order for the crucible. After the gem stages,
/// non-gems come first and combined gems after them; two remaining items
/// must both be bars and are alloyed.
pub fn process_mats_complex(machines: &[Machine], items: &[Item]) -> Result<Item, ProcessingError> {
    if !(2..=4).contains(&items.len()) {
        return Err(ProcessingError::ItemCount(items.len()));
    }
    let refs: Vec<&Item> = items.iter().collect();
    validate_one_of_types(&refs, &RAW)?;

    let alloy = machines.contains(&Machine::AlloyFurnace);
    let crucible = machines.contains(&Machine::PrismaticGemCrucible);
    if items.len() == 4 && !(alloy && crucible) {
        return Err(ProcessingError::FourItemsNeedBothCombiners);
    }
    if !alloy && !crucible {
        return Err(ProcessingError::MissingCombiner);
    }

    let refined = items
        .iter()
        .map(|item| refine_raw(item.clone(), machines))
        .collect::<Result<Vec<_>, _>>()?;
    let (mut gems, mut remaining): (Vec<Item>, Vec<Item>) = refined
        .into_iter()
        .partition(|item| item.item_type() == ItemType::Gem);

    if crucible {
        if gems.len() % 2 != 0 {
            return Err(ProcessingError::UnbalancedGems(gems.len()));
        }
        if gems.is_empty() {
            tracing::trace!(machine = %Machine::PrismaticGemCrucible, "no gems to combine");
        }
        gems = gems
            .chunks(2)
            .map(|pair| multi::prismatic_gem_crucible(&pair[0], &pair[1]))
            .collect::<Result<Vec<_>, _>>()?;
    }
    remaining.append(&mut gems);

    let remaining = remaining
        .into_iter()
        .map(|item| finish_gem(item, machines))
        .collect::<Result<Vec<_>, _>>()?;

    let last = match remaining.as_slice() {
        [only] => only.clone(),
        [first, second] => {
            if !alloy {
                return Err(ProcessingError::AlloyFurnaceRequired);
            }
            if first.item_type() != ItemType::Bar || second.item_type() != ItemType::Bar {
                return Err(ProcessingError::AlloyTypeMismatch {
                    first: first.item_type(),
                    second: second.item_type(),
                });
            }
            let output = multi::alloy_furnace(first, second)?;
            tracing::debug!(machine = %Machine::AlloyFurnace, to = output.value(), "stage applied");
            output
        }
        other => return Err(ProcessingError::RemainingItems(other.len())),
    };
    Ok(temper(last, machines)?)
}
