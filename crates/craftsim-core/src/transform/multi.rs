//! Machines that combine two or three items.
//!
//! Most rules validate each component, [`aggregate`] them, and scale the
//! summed value. The explosives maker and blasting powder chamber use their
//! own formulas instead.

use super::TransformError;
use crate::fixed::{Fixed64, scale_value};
use crate::item::{Item, TagSet};
use crate::validation::{
    aggregate, validate_dust_type, validate_one_of_types, validate_tag_absent,
    validate_tag_present, validate_tags_absent, validate_type,
};
use crate::vocab::{DustType, ItemType, Machine, Tag};

/// Jewellery the gilder accepts.
pub const JEWELLERY: [ItemType; 2] = [ItemType::Ring, ItemType::Amulet];

/// Casings the explosives maker accepts.
pub const CASINGS: [ItemType; 2] = [ItemType::MetalCasing, ItemType::CeramicCasing];

/// Aggregate `inputs`, scale the total value by `factor`, and stamp the result.
fn combine(
    inputs: &[&Item],
    item_type: ItemType,
    factor: f64,
    tag: Option<Tag>,
    machine: Machine,
) -> Result<Item, TransformError> {
    let totals = aggregate(inputs)?;
    let mut tags = totals.tags().clone();
    tags.extend(tag);
    let value = scale_value(totals.value(), factor);
    tracing::trace!(%machine, inputs = inputs.len(), total = totals.value(), value, "multi-input step");
    Ok(Item::assemble(
        item_type,
        value,
        totals.materials(),
        DustType::Unknown,
        tags,
        totals.sequence().then(machine),
    ))
}

// ---------------------------------------------------------------------------
// Metalwork
// ---------------------------------------------------------------------------

pub fn frame_maker(bar: &Item, bolts: &Item) -> Result<Item, TransformError> {
    validate_type(bar, ItemType::Bar)?;
    validate_type(bolts, ItemType::Bolts)?;
    combine(&[bar, bolts], ItemType::Frame, 1.25, None, Machine::FrameMaker)
}

pub fn casing_machine(frame: &Item, bolts: &Item, plate: &Item) -> Result<Item, TransformError> {
    validate_type(frame, ItemType::Frame)?;
    validate_type(bolts, ItemType::Bolts)?;
    validate_type(plate, ItemType::Plate)?;
    combine(
        &[frame, bolts, plate],
        ItemType::MetalCasing,
        1.3,
        None,
        Machine::CasingMachine,
    )
}

pub fn alloy_furnace(bar1: &Item, bar2: &Item) -> Result<Item, TransformError> {
    validate_one_of_types(&[bar1, bar2], &[ItemType::Bar])?;
    validate_tags_absent(&[bar1, bar2], &[Tag::Alloyed])?;
    combine(
        &[bar1, bar2],
        ItemType::Bar,
        1.2,
        Some(Tag::Alloyed),
        Machine::AlloyFurnace,
    )
}

pub fn engine_factory(
    mechanical_parts: &Item,
    pipe: &Item,
    metal_casing: &Item,
) -> Result<Item, TransformError> {
    validate_type(mechanical_parts, ItemType::MechanicalParts)?;
    validate_type(pipe, ItemType::Pipe)?;
    validate_type(metal_casing, ItemType::MetalCasing)?;
    combine(
        &[mechanical_parts, pipe, metal_casing],
        ItemType::Engine,
        2.0,
        None,
        Machine::EngineFactory,
    )
}

/// Needs a bar that has already been through the alloy furnace.
pub fn superconductor_constructor(
    alloyed_bar: &Item,
    ceramic_casing: &Item,
) -> Result<Item, TransformError> {
    validate_type(alloyed_bar, ItemType::Bar)?;
    validate_tag_present(alloyed_bar, Tag::Alloyed)?;
    validate_type(ceramic_casing, ItemType::CeramicCasing)?;
    combine(
        &[alloyed_bar, ceramic_casing],
        ItemType::Superconductor,
        3.0,
        None,
        Machine::SuperconductorConstructor,
    )
}

// ---------------------------------------------------------------------------
// Gems and jewellery
// ---------------------------------------------------------------------------

pub fn prismatic_gem_crucible(gem1: &Item, gem2: &Item) -> Result<Item, TransformError> {
    validate_one_of_types(&[gem1, gem2], &[ItemType::Gem])?;
    validate_tags_absent(&[gem1, gem2], &[Tag::Prismatic])?;
    combine(
        &[gem1, gem2],
        ItemType::Gem,
        1.15,
        Some(Tag::Prismatic),
        Machine::PrismaticGemCrucible,
    )
}

pub fn ring_maker(gem: &Item, coil: &Item) -> Result<Item, TransformError> {
    validate_type(gem, ItemType::Gem)?;
    validate_type(coil, ItemType::Coil)?;
    combine(&[gem, coil], ItemType::Ring, 1.7, None, Machine::RingMaker)
}

/// Needs a gem that has already been through the prismatic crucible.
pub fn amulet_maker(ring: &Item, frame: &Item, prismatic_gem: &Item) -> Result<Item, TransformError> {
    validate_type(ring, ItemType::Ring)?;
    validate_type(frame, ItemType::Frame)?;
    validate_type(prismatic_gem, ItemType::Gem)?;
    validate_tag_present(prismatic_gem, Tag::Prismatic)?;
    combine(
        &[ring, frame, prismatic_gem],
        ItemType::Amulet,
        2.0,
        None,
        Machine::AmuletMaker,
    )
}

/// Output keeps the jewellery's type (ring or amulet).
pub fn gilder(filigree: &Item, jewellery: &Item) -> Result<Item, TransformError> {
    validate_type(filigree, ItemType::Filigree)?;
    validate_one_of_types(&[jewellery], &JEWELLERY)?;
    validate_tag_absent(jewellery, Tag::Gilded)?;
    combine(
        &[filigree, jewellery],
        jewellery.item_type(),
        1.2,
        Some(Tag::Gilded),
        Machine::Gilder,
    )
}

// ---------------------------------------------------------------------------
// Electronics and optics
// ---------------------------------------------------------------------------

pub fn circuit_maker(glass: &Item, coil: &Item) -> Result<Item, TransformError> {
    validate_type(glass, ItemType::Glass)?;
    validate_type(coil, ItemType::Coil)?;
    combine(&[glass, coil], ItemType::Circuit, 2.0, None, Machine::CircuitMaker)
}

pub fn magnetic_machine(coil: &Item, metal_casing: &Item) -> Result<Item, TransformError> {
    validate_type(coil, ItemType::Coil)?;
    validate_type(metal_casing, ItemType::MetalCasing)?;
    combine(
        &[coil, metal_casing],
        ItemType::Electromagnet,
        1.5,
        None,
        Machine::MagneticMachine,
    )
}

pub fn optics_machine(lens: &Item, pipe: &Item) -> Result<Item, TransformError> {
    validate_type(lens, ItemType::Lens)?;
    validate_type(pipe, ItemType::Pipe)?;
    combine(&[lens, pipe], ItemType::Optics, 1.25, None, Machine::OpticsMachine)
}

pub fn tablet_factory(metal_casing: &Item, glass: &Item, circuit: &Item) -> Result<Item, TransformError> {
    validate_type(metal_casing, ItemType::MetalCasing)?;
    validate_type(glass, ItemType::Glass)?;
    validate_type(circuit, ItemType::Circuit)?;
    combine(
        &[metal_casing, glass, circuit],
        ItemType::Tablet,
        3.0,
        None,
        Machine::TabletFactory,
    )
}

pub fn laser_maker(optics: &Item, gem: &Item, circuit: &Item) -> Result<Item, TransformError> {
    validate_type(optics, ItemType::Optics)?;
    validate_type(gem, ItemType::Gem)?;
    validate_type(circuit, ItemType::Circuit)?;
    combine(
        &[optics, gem, circuit],
        ItemType::Laser,
        2.5,
        None,
        Machine::LaserMaker,
    )
}

pub fn power_core_assembler(
    metal_casing: &Item,
    superconductor: &Item,
    electromagnet: &Item,
) -> Result<Item, TransformError> {
    validate_type(metal_casing, ItemType::MetalCasing)?;
    validate_type(superconductor, ItemType::Superconductor)?;
    validate_type(electromagnet, ItemType::Electromagnet)?;
    combine(
        &[metal_casing, superconductor, electromagnet],
        ItemType::PowerCore,
        2.5,
        None,
        Machine::PowerCoreAssembler,
    )
}

// ---------------------------------------------------------------------------
// Explosives
// ---------------------------------------------------------------------------

/// Value is the casing's value times the powder's value, not the aggregate.
/// Only the casing's tags carry over.
pub fn explosives_maker(blasting_powder: &Item, casing: &Item) -> Result<Item, TransformError> {
    validate_type(blasting_powder, ItemType::BlastingPowder)?;
    validate_one_of_types(&[casing], &CASINGS)?;
    let totals = aggregate(&[blasting_powder, casing])?;
    Ok(Item::assemble(
        ItemType::Explosives,
        casing.value().saturating_mul(blasting_powder.value()),
        totals.materials(),
        DustType::Unknown,
        casing.tags().clone(),
        totals.sequence().then(Machine::ExplosivesMaker),
    ))
}

/// Metal dust plus stone dust always yields powder worth 2 with 1 material.
pub fn blasting_powder_chamber(metal_dust: &Item, stone_dust: &Item) -> Result<Item, TransformError> {
    validate_dust_type(metal_dust, DustType::Metal)?;
    validate_dust_type(stone_dust, DustType::Stone)?;
    let totals = aggregate(&[metal_dust, stone_dust])?;
    Ok(Item::assemble(
        ItemType::BlastingPowder,
        2,
        Fixed64::from_num(1),
        DustType::Unknown,
        TagSet::new(),
        totals.sequence().then(Machine::BlastingPowderChamber),
    ))
}
