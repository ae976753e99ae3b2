//! Tin electronics example: from raw ore to a tuned tablet.
//!
//! Cleans, polishes and smelts a tin ore, alloys the bar with itself and
//! tempers it, then turns the alloy into bolts, a coil and a plate. Those
//! feed a frame, a metal casing, an electromagnet, a circuit and finally a
//! tablet. A second chain takes a painite through the crucible into a
//! tempered alloy and prints the full history of each step.
//!
//! Run with: `RUST_LOG=debug cargo run -p craftsim-examples --example tin_electronics`

use craftsim_core::factory::{ItemBuilder, create_gem, create_ore};
use craftsim_core::item::Item;
use craftsim_core::transform::{multi, single};
use craftsim_core::vocab::ItemType;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    // --- Tin: ore to tempered alloy ---

    let tin = create_ore("Tin").expect("tin is in the ore table");
    let tin_bar = ItemBuilder::new(tin.clone())
        .then(single::ore_cleaner)
        .then(single::polisher)
        .then(single::ore_smelter)
        .execute()
        .expect("smelt tin");
    let untempered = multi::alloy_furnace(&tin_bar, &tin_bar).expect("alloy tin");
    let alloy = single::tempering_forge(&untempered).expect("temper alloy");

    // --- Metalwork ---

    let bolts = single::bolt_machine(&alloy).expect("bolts");
    let coil = single::coiler(&alloy).expect("coil");
    let plate = single::plate_stamper(&alloy).expect("plate");
    let frame = multi::frame_maker(&alloy, &bolts).expect("frame");
    let casing = multi::casing_machine(&frame, &bolts, &plate).expect("casing");
    let magnet = multi::magnetic_machine(&coil, &casing).expect("electromagnet");
    let magnet_tuned = single::electronic_tuner(&magnet).expect("tune electromagnet");

    for item in [
        &tin, &tin_bar, &alloy, &bolts, &coil, &plate, &frame, &casing, &magnet, &magnet_tuned,
    ] {
        println!("{item}");
    }
    println!();

    // --- Electronics ---

    let glass = Item::new(ItemType::Glass, 30);
    let circuit = multi::circuit_maker(&glass, &coil).expect("circuit");
    let circuit = single::electronic_tuner(&circuit).expect("tune circuit");
    let tablet = multi::tablet_factory(&casing, &glass, &circuit).expect("tablet");
    println!("{}", tablet.table_full());
    println!();

    // --- Painite: prismatic alloy ---

    let cut = ItemBuilder::new(create_gem("Painite").expect("painite is in the gem table"))
        .then(single::polisher)
        .then(single::gem_cutter)
        .execute()
        .expect("cut painite");
    let prismatic = multi::prismatic_gem_crucible(&cut, &cut).expect("crucible");
    let bar = single::gem_to_bar(&prismatic).expect("gem to bar");
    let untempered = multi::alloy_furnace(&bar, &bar).expect("alloy painite");
    let tempered = single::tempering_forge(&untempered).expect("temper painite");

    for item in [&cut, &prismatic, &bar, &untempered, &tempered] {
        println!("{}", item.table_full());
    }
}
