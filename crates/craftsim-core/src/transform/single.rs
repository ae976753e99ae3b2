//! Machines that take one item.
//!
//! Shape of every rule: check type and tag preconditions, compute the new
//! value, carry materials over (the duplicator halves them), add the
//! machine's tag, and append the machine to the history. Additive values
//! saturate at `u64::MAX`. The output never keeps the input's dust kind.

use super::TransformError;
use crate::fixed::{Fixed64, halve, scale_value};
use crate::item::Item;
use crate::validation::{validate_one_of_types, validate_tag_absent, validate_type};
use crate::vocab::{DustType, ItemType, Machine, Tag};

/// Ore values the upgrader steps through, lowest first.
pub const ORE_LADDER: [u64; 15] = [
    10, 20, 30, 50, 65, 150, 180, 240, 300, 350, 400, 600, 1000, 1200, 2000,
];

/// Item types the electronic tuner accepts.
pub const TUNABLE: [ItemType; 4] = [
    ItemType::Circuit,
    ItemType::Electromagnet,
    ItemType::Tablet,
    ItemType::PowerCore,
];

fn derive(
    input: &Item,
    item_type: ItemType,
    value: u64,
    materials: Fixed64,
    tag: Option<Tag>,
    machine: Machine,
) -> Item {
    let mut tags = input.tags().clone();
    tags.extend(tag);
    tracing::trace!(%machine, from = input.value(), to = value, "single-input step");
    Item::assemble(
        item_type,
        value,
        materials,
        DustType::Unknown,
        tags,
        input.sequence().then(machine),
    )
}

// ---------------------------------------------------------------------------
// Ore
// ---------------------------------------------------------------------------

pub fn ore_cleaner(ore: &Item) -> Result<Item, TransformError> {
    validate_type(ore, ItemType::Ore)?;
    validate_tag_absent(ore, Tag::Cleaned)?;
    Ok(derive(
        ore,
        ItemType::Ore,
        ore.value().saturating_add(10),
        ore.materials(),
        Some(Tag::Cleaned),
        Machine::OreCleaner,
    ))
}

pub fn ore_smelter(ore: &Item) -> Result<Item, TransformError> {
    validate_type(ore, ItemType::Ore)?;
    Ok(derive(
        ore,
        ItemType::Bar,
        scale_value(ore.value(), 1.2),
        ore.materials(),
        Some(Tag::Smelted),
        Machine::OreSmelter,
    ))
}

pub fn blast_furnace(ore: &Item) -> Result<Item, TransformError> {
    validate_type(ore, ItemType::Ore)?;
    Ok(derive(
        ore,
        ItemType::Bar,
        scale_value(ore.value(), 0.8),
        ore.materials(),
        Some(Tag::Smelted),
        Machine::BlastFurnace,
    ))
}

pub fn philosophers_stone(ore: &Item) -> Result<Item, TransformError> {
    validate_type(ore, ItemType::Ore)?;
    validate_tag_absent(ore, Tag::GoldInfused)?;
    Ok(derive(
        ore,
        ItemType::Ore,
        scale_value(ore.value(), 1.25),
        ore.materials(),
        Some(Tag::GoldInfused),
        Machine::PhilosophersStone,
    ))
}

/// Bump a raw ore to the next value on [`ORE_LADDER`].
///
/// Only defined as the first step of a chain: an ore that carries any tag is
/// rejected with [`TransformError::UpgradeAfterProcessing`] rather than a
/// validation error.
pub fn ore_upgrader(ore: &Item) -> Result<Item, TransformError> {
    validate_type(ore, ItemType::Ore)?;
    if !ore.tags().is_empty() {
        return Err(TransformError::UpgradeAfterProcessing {
            item: Box::new(ore.clone()),
        });
    }
    let next = ORE_LADDER
        .iter()
        .position(|&v| v == ore.value())
        .and_then(|i| ORE_LADDER.get(i + 1))
        .copied()
        .ok_or(TransformError::LadderExhausted { value: ore.value() })?;
    Ok(derive(
        ore,
        ItemType::Ore,
        next,
        ore.materials(),
        Some(Tag::Upgraded),
        Machine::OreUpgrader,
    ))
}

// ---------------------------------------------------------------------------
// Bars and plates
// ---------------------------------------------------------------------------

pub fn coiler(bar: &Item) -> Result<Item, TransformError> {
    validate_type(bar, ItemType::Bar)?;
    Ok(derive(
        bar,
        ItemType::Coil,
        bar.value().saturating_add(20),
        bar.materials(),
        Some(Tag::Drawn),
        Machine::Coiler,
    ))
}

pub fn bolt_machine(bar: &Item) -> Result<Item, TransformError> {
    validate_type(bar, ItemType::Bar)?;
    Ok(derive(
        bar,
        ItemType::Bolts,
        bar.value().saturating_add(5),
        bar.materials(),
        Some(Tag::Bolts),
        Machine::BoltMachine,
    ))
}

pub fn plate_stamper(bar: &Item) -> Result<Item, TransformError> {
    validate_type(bar, ItemType::Bar)?;
    Ok(derive(
        bar,
        ItemType::Plate,
        bar.value().saturating_add(20),
        bar.materials(),
        Some(Tag::Plate),
        Machine::PlateStamper,
    ))
}

pub fn tempering_forge(bar: &Item) -> Result<Item, TransformError> {
    validate_type(bar, ItemType::Bar)?;
    validate_tag_absent(bar, Tag::Tempered)?;
    Ok(derive(
        bar,
        ItemType::Bar,
        bar.value().saturating_mul(2),
        bar.materials(),
        Some(Tag::Tempered),
        Machine::TemperingForge,
    ))
}

pub fn pipe_maker(plate: &Item) -> Result<Item, TransformError> {
    validate_type(plate, ItemType::Plate)?;
    Ok(derive(
        plate,
        ItemType::Pipe,
        plate.value().saturating_add(20),
        plate.materials(),
        Some(Tag::Pipe),
        Machine::PipeMaker,
    ))
}

pub fn mechanical_parts_maker(plate: &Item) -> Result<Item, TransformError> {
    validate_type(plate, ItemType::Plate)?;
    Ok(derive(
        plate,
        ItemType::MechanicalParts,
        plate.value().saturating_add(30),
        plate.materials(),
        Some(Tag::MechanicalParts),
        Machine::MechanicalPartsMaker,
    ))
}

pub fn filigree_cutter(plate: &Item) -> Result<Item, TransformError> {
    validate_type(plate, ItemType::Plate)?;
    Ok(derive(
        plate,
        ItemType::Filigree,
        scale_value(plate.value(), 1.1),
        plate.materials(),
        Some(Tag::Filigree),
        Machine::FiligreeCutter,
    ))
}

// ---------------------------------------------------------------------------
// Gems and transmutation
// ---------------------------------------------------------------------------

pub fn gem_cutter(gem: &Item) -> Result<Item, TransformError> {
    validate_type(gem, ItemType::Gem)?;
    validate_tag_absent(gem, Tag::Cut)?;
    Ok(derive(
        gem,
        ItemType::Gem,
        scale_value(gem.value(), 1.4),
        gem.materials(),
        Some(Tag::Cut),
        Machine::GemCutter,
    ))
}

/// Gem to bar. Value, materials and tags pass through untouched.
pub fn gem_to_bar(gem: &Item) -> Result<Item, TransformError> {
    validate_type(gem, ItemType::Gem)?;
    Ok(derive(
        gem,
        ItemType::Bar,
        gem.value(),
        gem.materials(),
        None,
        Machine::GemToBarTransmuter,
    ))
}

/// Bar to gem. Value, materials and tags pass through untouched.
pub fn bar_to_gem(bar: &Item) -> Result<Item, TransformError> {
    validate_type(bar, ItemType::Bar)?;
    Ok(derive(
        bar,
        ItemType::Gem,
        bar.value(),
        bar.materials(),
        None,
        Machine::BarToGemTransmuter,
    ))
}

// ---------------------------------------------------------------------------
// Glass, clay, electronics
// ---------------------------------------------------------------------------

/// The in-game lens cutter leaves no tag.
pub fn lens_cutter(glass: &Item) -> Result<Item, TransformError> {
    validate_type(glass, ItemType::Glass)?;
    Ok(derive(
        glass,
        ItemType::Lens,
        glass.value().saturating_add(50),
        glass.materials(),
        None,
        Machine::LensCutter,
    ))
}

/// Clay block to ceramic casing with a fixed value of 150.
pub fn ceramic_furnace(clay_block: &Item) -> Result<Item, TransformError> {
    validate_type(clay_block, ItemType::ClayBlock)?;
    Ok(derive(
        clay_block,
        ItemType::CeramicCasing,
        150,
        clay_block.materials(),
        Some(Tag::Ceramic),
        Machine::CeramicFurnace,
    ))
}

pub fn electronic_tuner(electronics: &Item) -> Result<Item, TransformError> {
    validate_tag_absent(electronics, Tag::Tuned)?;
    validate_one_of_types(&[electronics], &TUNABLE)?;
    Ok(derive(
        electronics,
        electronics.item_type(),
        electronics.value().saturating_add(50),
        electronics.materials(),
        Some(Tag::Tuned),
        Machine::ElectronicTuner,
    ))
}

// ---------------------------------------------------------------------------
// Any item
// ---------------------------------------------------------------------------

pub fn polisher(item: &Item) -> Result<Item, TransformError> {
    validate_tag_absent(item, Tag::Polished)?;
    Ok(derive(
        item,
        item.item_type(),
        item.value().saturating_add(10),
        item.materials(),
        Some(Tag::Polished),
        Machine::Polisher,
    ))
}

pub fn quality_assurance(item: &Item) -> Result<Item, TransformError> {
    validate_tag_absent(item, Tag::QualityAssured)?;
    Ok(derive(
        item,
        item.item_type(),
        scale_value(item.value(), 1.2),
        item.materials(),
        Some(Tag::QualityAssured),
        Machine::QualityAssuranceMachine,
    ))
}

/// Halves both value and materials: the other half is the duplicate.
pub fn duplicator(item: &Item) -> Result<Item, TransformError> {
    validate_tag_absent(item, Tag::Duplicated)?;
    Ok(derive(
        item,
        item.item_type(),
        scale_value(item.value(), 0.5),
        halve(item.materials()),
        Some(Tag::Duplicated),
        Machine::Duplicator,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Step;
    use crate::test_utils::*;
    use crate::validation::ValidationError;

    fn is_tag_conflict(result: Result<Item, TransformError>, tag: Tag) -> bool {
        matches!(
            result,
            Err(TransformError::Validation(ValidationError::TagConflict { tag: t, .. })) if t == tag
        )
    }

    fn is_wrong_type(result: Result<Item, TransformError>) -> bool {
        matches!(
            result,
            Err(TransformError::Validation(ValidationError::InvalidItemType { .. }))
        )
    }

    #[test]
    fn ore_cleaner_adds_ten_and_tag() {
        let out = ore_cleaner(&ore(10)).unwrap();
        assert_eq!(out.item_type(), ItemType::Ore);
        assert_eq!(out.value(), 20);
        assert!(out.has_tag(Tag::Cleaned));
        assert_eq!(out.sequence().last(), Some(&Step::Machine(Machine::OreCleaner)));
    }

    #[test]
    fn ore_cleaner_twice_conflicts() {
        let once = ore_cleaner(&ore(10)).unwrap();
        assert!(is_tag_conflict(ore_cleaner(&once), Tag::Cleaned));
    }

    #[test]
    fn ore_cleaner_rejects_gem() {
        assert!(is_wrong_type(ore_cleaner(&gem(75))));
    }

    #[test]
    fn smelter_and_blast_furnace() {
        let bar = ore_smelter(&ore(20)).unwrap();
        assert_eq!(bar.item_type(), ItemType::Bar);
        assert_eq!(bar.value(), 24);
        assert!(bar.has_tag(Tag::Smelted));

        let cheap = blast_furnace(&ore(20)).unwrap();
        assert_eq!(cheap.item_type(), ItemType::Bar);
        assert_eq!(cheap.value(), 16);
        assert!(is_wrong_type(ore_smelter(&bar)));
    }

    #[test]
    fn bar_products() {
        let b = bar(24);
        let coil = coiler(&b).unwrap();
        assert_eq!((coil.item_type(), coil.value()), (ItemType::Coil, 44));
        assert!(coil.has_tag(Tag::Drawn));

        let bolts = bolt_machine(&b).unwrap();
        assert_eq!((bolts.item_type(), bolts.value()), (ItemType::Bolts, 29));
        assert!(bolts.has_tag(Tag::Bolts));

        let plate = plate_stamper(&b).unwrap();
        assert_eq!((plate.item_type(), plate.value()), (ItemType::Plate, 44));
        assert!(plate.has_tag(Tag::Plate));
    }

    #[test]
    fn plate_products() {
        let p = plate(44);
        let pipe = pipe_maker(&p).unwrap();
        assert_eq!((pipe.item_type(), pipe.value()), (ItemType::Pipe, 64));
        let parts = mechanical_parts_maker(&p).unwrap();
        assert_eq!(
            (parts.item_type(), parts.value()),
            (ItemType::MechanicalParts, 74)
        );
        assert!(parts.has_tag(Tag::MechanicalParts));
        let filigree = filigree_cutter(&p).unwrap();
        assert_eq!(
            (filigree.item_type(), filigree.value()),
            (ItemType::Filigree, 48)
        );
        assert!(is_wrong_type(pipe_maker(&bar(10))));
    }

    #[test]
    fn tempering_forge_doubles_once() {
        let tempered = tempering_forge(&bar(29)).unwrap();
        assert_eq!(tempered.value(), 58);
        assert!(is_tag_conflict(tempering_forge(&tempered), Tag::Tempered));
    }

    #[test]
    fn gem_cutter_once() {
        let cut = gem_cutter(&gem(75)).unwrap();
        assert_eq!(cut.value(), 105);
        assert!(is_tag_conflict(gem_cutter(&cut), Tag::Cut));
    }

    #[test]
    fn philosophers_stone_once() {
        let infused = philosophers_stone(&ore(20)).unwrap();
        assert_eq!(infused.value(), 25);
        assert!(infused.has_tag(Tag::GoldInfused));
        assert!(is_tag_conflict(philosophers_stone(&infused), Tag::GoldInfused));
    }

    #[test]
    fn transmuters_round_trip() {
        let original = gem(300).with_tags([Tag::Cut]).with_materials(fixed(2.0)).unwrap();
        let as_bar = gem_to_bar(&original).unwrap();
        assert_eq!(as_bar.item_type(), ItemType::Bar);
        assert_eq!(as_bar.tags(), original.tags());
        let back = bar_to_gem(&as_bar).unwrap();
        assert_eq!(back.item_type(), ItemType::Gem);
        assert_eq!(back.value(), original.value());
        assert_eq!(back.materials(), original.materials());
        assert_eq!(back.sequence().len(), 2);
    }

    #[test]
    fn lens_cutter_adds_no_tag() {
        let lens = lens_cutter(&item(ItemType::Glass, 30)).unwrap();
        assert_eq!((lens.item_type(), lens.value()), (ItemType::Lens, 80));
        assert!(lens.tags().is_empty());
    }

    #[test]
    fn ceramic_furnace_fixed_value() {
        let casing = ceramic_furnace(&item(ItemType::ClayBlock, 7)).unwrap();
        assert_eq!(casing.item_type(), ItemType::CeramicCasing);
        assert_eq!(casing.value(), 150);
        assert!(casing.has_tag(Tag::Ceramic));
    }

    #[test]
    fn electronic_tuner_accepts_only_electronics() {
        let tuned = electronic_tuner(&item(ItemType::Circuit, 100)).unwrap();
        assert_eq!(tuned.value(), 150);
        assert_eq!(tuned.item_type(), ItemType::Circuit);
        assert!(is_tag_conflict(electronic_tuner(&tuned), Tag::Tuned));
        assert!(is_wrong_type(electronic_tuner(&bar(100))));
    }

    #[test]
    fn polisher_and_qa_accept_anything() {
        let polished = polisher(&gem(75)).unwrap();
        assert_eq!(polished.value(), 85);
        assert!(is_tag_conflict(polisher(&polished), Tag::Polished));

        let qa = quality_assurance(&item(ItemType::Engine, 1000)).unwrap();
        assert_eq!(qa.value(), 1200);
        assert_eq!(qa.item_type(), ItemType::Engine);
        assert!(is_tag_conflict(quality_assurance(&qa), Tag::QualityAssured));
    }

    #[test]
    fn duplicator_halves_value_and_materials() {
        let half = duplicator(&bar(25)).unwrap();
        assert_eq!(half.value(), 12);
        assert_eq!(half.materials(), fixed(0.5));
        assert!(is_tag_conflict(duplicator(&half), Tag::Duplicated));
    }

    #[test]
    fn ore_upgrader_steps_up_ladder() {
        let up = ore_upgrader(&ore(10)).unwrap();
        assert_eq!(up.value(), 20);
        assert!(up.has_tag(Tag::Upgraded));
    }

    #[test]
    fn ore_upgrader_refuses_tagged_ore() {
        let cleaned = ore_cleaner(&ore(10)).unwrap();
        assert!(matches!(
            ore_upgrader(&cleaned),
            Err(TransformError::UpgradeAfterProcessing { .. })
        ));
    }

    #[test]
    fn ore_upgrader_top_and_off_ladder() {
        assert_eq!(
            ore_upgrader(&ore(2000)),
            Err(TransformError::LadderExhausted { value: 2000 })
        );
        assert_eq!(
            ore_upgrader(&ore(30000)),
            Err(TransformError::LadderExhausted { value: 30000 })
        );
    }

    #[test]
    fn inputs_are_not_modified() {
        let input = ore(10);
        let snapshot = input.clone();
        let _ = ore_cleaner(&input).unwrap();
        assert_eq!(input, snapshot);
    }

    #[test]
    fn additive_values_saturate() {
        let polished = polisher(&Item::new(ItemType::Bar, u64::MAX - 5)).unwrap();
        assert_eq!(polished.value(), u64::MAX);
        let cleaned = ore_cleaner(&ore(u64::MAX)).unwrap();
        assert_eq!(cleaned.value(), u64::MAX);
        let tuned = electronic_tuner(&item(ItemType::Circuit, u64::MAX - 1)).unwrap();
        assert_eq!(tuned.value(), u64::MAX);
    }

    #[test]
    fn output_drops_dust_kind() {
        let polished = polisher(&dust(DustType::Metal)).unwrap();
        assert_eq!(polished.item_type(), ItemType::Dust);
        assert_eq!(polished.dustwork_type(), DustType::Unknown);
    }
}
