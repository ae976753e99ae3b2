//! Closed vocabularies: item types, tags, machines, dust types, and the named
//! ores and gems that seed every crafting chain.
//!
//! Each vocabulary is a plain `Copy` enum carrying its in-game display string.
//! Parsing is case-insensitive and ignores spaces, underscores and hyphens, so
//! `"Ore Cleaner"`, `"ORE_CLEANER"` and `"ore-cleaner"` all name the same
//! machine. Serialized form is the display string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A name that did not match any member of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name: '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// Lowercase and drop separators so display names and identifiers compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $display:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The in-game display string.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $display),+
                }
            }

            fn aliases(self) -> &'static [&'static str] {
                match self {
                    $($name::$variant => &[$($alias),*]),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| {
                        normalize(member.as_str()) == wanted
                            || member.aliases().iter().any(|a| normalize(a) == wanted)
                    })
                    .ok_or_else(|| UnknownName {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

vocabulary! {
    /// Category of an item. Decides which machines accept it.
    ItemType, "item type" {
        Unknown => "unknown",
        Ore => "ore",
        Gem => "gem",
        Stone => "stone",
        Dust => "dust",
        BlastingPowder => "blasting_powder",
        Brick => "brick",
        ClayBlock => "clay_block",
        Glass => "glass",
        Lens => "lens",
        Cement => "cement",
        ConcreteBrick => "concrete_brick",
        CeramicCasing => "ceramic_casing",
        Bar => "bar",
        Coil => "coil",
        Bolts => "bolts",
        Plate => "plate",
        Pipe => "pipe",
        MechanicalParts => "mechanical_parts",
        Filigree => "filigree",
        Ring => "ring",
        Frame => "frame",
        Explosives => "explosives",
        Circuit => "circuit",
        MetalCasing => "metal_casing",
        Electromagnet => "electromagnet",
        Optics => "optics",
        Engine => "engine",
        Superconductor => "superconductor",
        Amulet => "amulet",
        Tablet => "tablet",
        Laser => "laser",
        PowerCore => "power_core",
    }
}

vocabulary! {
    /// Marker left on an item by a machine. Several machines refuse items that
    /// already carry their own tag.
    Tag, "tag" {
        Unknown => "UNKNOWN",
        Alloyed => "Alloyed",
        Cleaned => "Cleaned",
        Plate => "Plate",
        Tempered => "Tempered",
        Sifted => "Sifted",
        Prismatic => "Prismatic",
        QualityAssured => "Quality Assured",
        Upgraded => "Upgraded",
        MetalFrame => "Metal Frame",
        Smelted => "Smelted",
        Cut => "Cut",
        Drawn => "Drawn",
        Polished => "Polished",
        Ceramic => "Ceramic",
        Bolts => "Bolts",
        Duplicated => "Duplicated",
        Superconductor => "Superconductor",
        GoldInfused => "Gold Infused",
        MetalCasing => "Metal Casing",
        MechanicalParts => "MechanicalParts",
        Pipe => "Pipe",
        Tuned => "Tuned",
        Filigree => "Filigree",
        Gilded => "Gilded",
    }
}

vocabulary! {
    /// Every machine in the game, implemented or not.
    Machine, "machine" {
        Unknown => "UNKNOWN",
        OreCleaner => "Ore Cleaner",
        Polisher => "Polisher",
        ElectronicTuner => "Electronic Tuner",
        GemCutter => "Gem Cutter",
        TemperingForge => "Tempering Forge",
        QualityAssuranceMachine => "Quality Assurance Machine" | "QA Machine",
        PhilosophersStone => "Philosophers Stone",
        OreUpgrader => "Ore Upgrader",

        TopazProspector => "Topaz Prospector",
        EmeraldProspector => "Emerald Prospector",
        SapphireProspector => "Sapphire Prospector",
        RubyProspector => "Ruby Prospector",
        DiamondProspector => "Diamond Prospector",

        OreSmelter => "Ore Smelter",
        Crusher => "Crusher",
        Coiler => "Coiler",
        BrickMold => "Brick Mold",
        BoltMachine => "Bolt Machine",
        PlateStamper => "Plate Stamper",
        Sifter => "Sifter",
        PipeMaker => "Pipe Maker",
        Kiln => "Kiln",
        MechanicalPartsMaker => "Mechanical Parts Maker",
        BlastFurnace => "Blast Furnace",
        CeramicFurnace => "Ceramic Furnace",
        FiligreeCutter => "Filigree Cutter",
        LensCutter => "Lens Cutter",
        Duplicator => "Duplicator",
        NanoSifter => "Nano Sifter",
        GemToBarTransmuter => "Gem To Bar Transmuter" | "GTB",
        BarToGemTransmuter => "Bar To Gem Transmuter" | "BTG",

        CementMixer => "Cement Mixer",
        FrameMaker => "Frame Maker",
        RingMaker => "Ring Maker",
        BlastingPowderChamber => "Blasting Powder Chamber",
        ExplosivesMaker => "Explosives Maker",
        CircuitMaker => "Circuit Maker",
        ClayMixer => "Clay Mixer",
        CasingMachine => "Casing Machine",
        PrismaticGemCrucible => "Prismatic Gem Crucible",
        AlloyFurnace => "Alloy Furnace",
        MagneticMachine => "Magnetic Machine",
        OpticsMachine => "Optics Machine",
        Gilder => "Gilder",
        EngineFactory => "Engine Factory",
        SuperconductorConstructor => "Superconductor Constructor",
        AmuletMaker => "Amulet Maker",
        TabletFactory => "Tablet Factory",
        BlastingPowderRefiner => "Blasting Powder Refiner",
        LaserMaker => "Laser Maker",
        PowerCoreAssembler => "Power Core Assembler",
    }
}

vocabulary! {
    /// What kind of dust an item crushes into. Only the blasting powder
    /// chamber cares.
    DustType, "dust type" {
        Unknown => "unknown",
        Metal => "metal",
        Stone => "stone",
        Other => "other",
    }
}

vocabulary! {
    /// Named ores with fixed base sell values.
    Ore, "ore" {
        Tin => "Tin",
        Iron => "Iron",
        Lead => "Lead",
        Cobalt => "Cobalt",
        Aluminium => "Aluminium",
        Silver => "Silver",
        Uranium => "Uranium",
        Vanadium => "Vanadium",
        Tungsten => "Tungsten",
        Gold => "Gold",
        Titanium => "Titanium",
        Molybdenum => "Molybdenum",
        Plutonium => "Plutonium",
        Palladium => "Palladium",
        Mithril => "Mithril",
        Thorium => "Thorium",
        Iridium => "Iridium",
        Adamantium => "Adamantium",
        Rhodium => "Rhodium",
        Unobtainium => "Unobtainium",
    }
}

vocabulary! {
    /// Named gems with fixed base sell values.
    Gem, "gem" {
        Topaz => "Topaz",
        Emerald => "Emerald",
        Sapphire => "Sapphire",
        Ruby => "Ruby",
        Diamond => "Diamond",
        Poudretteite => "Poudretteite",
        Zultanite => "Zultanite",
        Grandidierite => "Grandidierite",
        Musgravite => "Musgravite",
        Painite => "Painite",
    }
}

impl Ore {
    /// Base sell value of the raw ore.
    pub const fn value(self) -> u64 {
        match self {
            Ore::Tin => 10,
            Ore::Iron => 20,
            Ore::Lead => 30,
            Ore::Cobalt => 50,
            Ore::Aluminium => 65,
            Ore::Silver => 150,
            Ore::Uranium => 180,
            Ore::Vanadium => 240,
            Ore::Tungsten => 300,
            Ore::Gold => 350,
            Ore::Titanium => 400,
            Ore::Molybdenum => 600,
            Ore::Plutonium => 1000,
            Ore::Palladium => 1200,
            Ore::Mithril => 2000,
            Ore::Thorium => 3200,
            Ore::Iridium => 3700,
            Ore::Adamantium => 4500,
            Ore::Rhodium => 15000,
            Ore::Unobtainium => 30000,
        }
    }
}

impl Gem {
    /// Base sell value of the uncut gem.
    pub const fn value(self) -> u64 {
        match self {
            Gem::Topaz => 75,
            Gem::Emerald => 200,
            Gem::Sapphire => 250,
            Gem::Ruby => 300,
            Gem::Diamond => 1500,
            Gem::Poudretteite => 1700,
            Gem::Zultanite => 2300,
            Gem::Grandidierite => 4500,
            Gem::Musgravite => 5800,
            Gem::Painite => 12000,
        }
    }
}
