use crate::error::CraftError;
use crate::item::Item;
use crate::transform::{Rule, multi, single};
use crate::vocab::{Machine, UnknownName};
use std::collections::HashMap;
use std::sync::LazyLock;

/// What the registry knows about a machine.
#[derive(Debug, Clone, Copy)]
pub enum Entry {
    Implemented(Rule),
    /// Known machine whose behaviour is not modelled. Resolving it fails.
    Placeholder,
}

/// The catalog shipped with the crate. Exhaustive over [`Machine`], so adding
/// a machine without deciding its entry does not compile.
pub fn standard_entry(machine: Machine) -> Option<Entry> {
    use Entry::{Implemented, Placeholder};
    use Rule::{Pair, Single, Triple};

    let entry = match machine {
        Machine::Unknown => return None,

        Machine::OreCleaner => Implemented(Single(single::ore_cleaner)),
        Machine::Polisher => Implemented(Single(single::polisher)),
        Machine::ElectronicTuner => Implemented(Single(single::electronic_tuner)),
        Machine::GemCutter => Implemented(Single(single::gem_cutter)),
        Machine::TemperingForge => Implemented(Single(single::tempering_forge)),
        Machine::QualityAssuranceMachine => Implemented(Single(single::quality_assurance)),
        Machine::PhilosophersStone => Implemented(Single(single::philosophers_stone)),
        Machine::OreUpgrader => Implemented(Single(single::ore_upgrader)),
        Machine::OreSmelter => Implemented(Single(single::ore_smelter)),
        Machine::Coiler => Implemented(Single(single::coiler)),
        Machine::BoltMachine => Implemented(Single(single::bolt_machine)),
        Machine::PlateStamper => Implemented(Single(single::plate_stamper)),
        Machine::PipeMaker => Implemented(Single(single::pipe_maker)),
        Machine::MechanicalPartsMaker => Implemented(Single(single::mechanical_parts_maker)),
        Machine::BlastFurnace => Implemented(Single(single::blast_furnace)),
        Machine::CeramicFurnace => Implemented(Single(single::ceramic_furnace)),
        Machine::FiligreeCutter => Implemented(Single(single::filigree_cutter)),
        Machine::LensCutter => Implemented(Single(single::lens_cutter)),
        Machine::Duplicator => Implemented(Single(single::duplicator)),
        Machine::GemToBarTransmuter => Implemented(Single(single::gem_to_bar)),
        Machine::BarToGemTransmuter => Implemented(Single(single::bar_to_gem)),

        Machine::FrameMaker => Implemented(Pair(multi::frame_maker)),
        Machine::RingMaker => Implemented(Pair(multi::ring_maker)),
        Machine::BlastingPowderChamber => Implemented(Pair(multi::blasting_powder_chamber)),
        Machine::ExplosivesMaker => Implemented(Pair(multi::explosives_maker)),
        Machine::CircuitMaker => Implemented(Pair(multi::circuit_maker)),
        Machine::CasingMachine => Implemented(Triple(multi::casing_machine)),
        Machine::PrismaticGemCrucible => Implemented(Pair(multi::prismatic_gem_crucible)),
        Machine::AlloyFurnace => Implemented(Pair(multi::alloy_furnace)),
        Machine::MagneticMachine => Implemented(Pair(multi::magnetic_machine)),
        Machine::OpticsMachine => Implemented(Pair(multi::optics_machine)),
        Machine::Gilder => Implemented(Pair(multi::gilder)),
        Machine::EngineFactory => Implemented(Triple(multi::engine_factory)),
        Machine::SuperconductorConstructor => {
            Implemented(Pair(multi::superconductor_constructor))
        }
        Machine::AmuletMaker => Implemented(Triple(multi::amulet_maker)),
        Machine::TabletFactory => Implemented(Triple(multi::tablet_factory)),
        Machine::LaserMaker => Implemented(Triple(multi::laser_maker)),
        Machine::PowerCoreAssembler => Implemented(Triple(multi::power_core_assembler)),

        // Dust handling and prospecting are not modelled.
        Machine::TopazProspector
        | Machine::EmeraldProspector
        | Machine::SapphireProspector
        | Machine::RubyProspector
        | Machine::DiamondProspector
        | Machine::Crusher
        | Machine::BrickMold
        | Machine::Sifter
        | Machine::Kiln
        | Machine::NanoSifter
        | Machine::CementMixer
        | Machine::ClayMixer
        | Machine::BlastingPowderRefiner => Placeholder,
    };
    Some(entry)
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<Machine, Entry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-filled with the standard catalog.
    pub fn standard() -> Self {
        let entries = Machine::ALL
            .iter()
            .filter_map(|&m| standard_entry(m).map(|entry| (m, entry)))
            .collect();
        Self { entries }
    }

    /// Register a rule for a machine that has no entry yet.
    pub fn register(&mut self, machine: Machine, rule: Rule) -> Result<(), RegistryError> {
        self.insert(machine, Entry::Implemented(rule))
    }

    /// Register a machine as known but not implemented.
    pub fn register_placeholder(&mut self, machine: Machine) -> Result<(), RegistryError> {
        self.insert(machine, Entry::Placeholder)
    }

    /// Replace whatever entry a machine has.
    pub fn replace(&mut self, machine: Machine, entry: Entry) {
        self.entries.insert(machine, entry);
    }

    fn insert(&mut self, machine: Machine, entry: Entry) -> Result<(), RegistryError> {
        if self.entries.contains_key(&machine) {
            return Err(RegistryError::DuplicateEntry(machine));
        }
        self.entries.insert(machine, entry);
        Ok(())
    }

    /// Finalize and build the immutable registry.
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

static STANDARD: LazyLock<Registry> = LazyLock::new(|| RegistryBuilder::standard().build());

/// Immutable machine-to-rule table. Frozen after build(). Thread-safe to share.
#[derive(Debug)]
pub struct Registry {
    entries: HashMap<Machine, Entry>,
}

impl Registry {
    /// The shared standard catalog, built on first use.
    pub fn standard() -> &'static Registry {
        &STANDARD
    }

    /// Resolve a machine by name (case-insensitive, display or identifier form).
    pub fn resolve(&self, name: &str) -> Result<Rule, RegistryError> {
        let machine: Machine = name.parse()?;
        self.rule(machine)
    }

    pub fn rule(&self, machine: Machine) -> Result<Rule, RegistryError> {
        match self.entries.get(&machine) {
            Some(Entry::Implemented(rule)) => Ok(*rule),
            Some(Entry::Placeholder) => {
                tracing::warn!(%machine, "resolved a machine with no implemented transformation");
                Err(RegistryError::NotImplemented(machine))
            }
            None => Err(RegistryError::UnknownMachine(UnknownName {
                kind: "machine",
                name: machine.to_string(),
            })),
        }
    }

    /// Resolve `machine` and run it on `inputs`.
    pub fn apply(&self, machine: Machine, inputs: &[&Item]) -> Result<Item, CraftError> {
        let rule = self.rule(machine)?;
        let output = rule.apply(inputs)?;
        tracing::debug!(%machine, value = output.value(), "applied machine");
        Ok(output)
    }

    pub fn entry(&self, machine: Machine) -> Option<Entry> {
        self.entries.get(&machine).copied()
    }

    pub fn is_implemented(&self, machine: Machine) -> bool {
        matches!(self.entries.get(&machine), Some(Entry::Implemented(_)))
    }

    /// Machines with a working rule, in declaration order.
    pub fn implemented(&self) -> Vec<Machine> {
        Machine::ALL
            .iter()
            .copied()
            .filter(|&m| self.is_implemented(m))
            .collect()
    }

    pub fn machine_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    UnknownMachine(#[from] UnknownName),
    #[error("transformation for {0} is not implemented")]
    NotImplemented(Machine),
    #[error("{0} is already registered")]
    DuplicateEntry(Machine),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::transform::TransformError;

    #[test]
    fn resolve_is_case_insensitive() {
        let reg = Registry::standard();
        for name in ["Ore Cleaner", "ORE_CLEANER", "ore cleaner", "OreCleaner"] {
            let rule = reg.resolve(name).unwrap();
            assert_eq!(rule.arity(), 1, "name: {name}");
        }
    }

    #[test]
    fn resolve_unknown_name() {
        let err = Registry::standard().resolve("Matter Compiler").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownMachine(_)));
    }

    #[test]
    fn placeholders_fail_loudly() {
        let reg = Registry::standard();
        for machine in [
            Machine::Crusher,
            Machine::ClayMixer,
            Machine::BlastingPowderRefiner,
            Machine::RubyProspector,
            Machine::NanoSifter,
        ] {
            assert_eq!(reg.rule(machine).unwrap_err(), RegistryError::NotImplemented(machine));
        }
        assert_eq!(
            reg.resolve("crusher").unwrap_err(),
            RegistryError::NotImplemented(Machine::Crusher)
        );
    }

    #[test]
    fn unknown_machine_variant_has_no_entry() {
        let reg = Registry::standard();
        assert!(reg.entry(Machine::Unknown).is_none());
        assert!(matches!(
            reg.rule(Machine::Unknown),
            Err(RegistryError::UnknownMachine(_))
        ));
    }

    #[test]
    fn every_known_machine_has_an_entry() {
        let reg = Registry::standard();
        assert_eq!(reg.machine_count(), Machine::ALL.len() - 1);
        assert_eq!(reg.implemented().len(), 38);
    }

    #[test]
    fn electronic_tuner_maps_to_tuner() {
        let tuned = Registry::standard()
            .apply(Machine::ElectronicTuner, &[&item(crate::vocab::ItemType::Circuit, 100)])
            .unwrap();
        assert_eq!(tuned.value(), 150);
    }

    #[test]
    fn apply_reports_arity_mismatch() {
        let b = bar(24);
        let err = Registry::standard()
            .apply(Machine::AlloyFurnace, &[&b])
            .unwrap_err();
        assert!(matches!(
            err,
            CraftError::Transform(TransformError::ArityMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn builder_rejects_duplicates_and_allows_replace() {
        let mut builder = RegistryBuilder::new();
        builder
            .register(Machine::OreCleaner, Rule::Single(single::ore_cleaner))
            .unwrap();
        assert_eq!(
            builder.register_placeholder(Machine::OreCleaner),
            Err(RegistryError::DuplicateEntry(Machine::OreCleaner))
        );
        builder.replace(Machine::OreCleaner, Entry::Placeholder);
        let reg = builder.build();
        assert!(!reg.is_implemented(Machine::OreCleaner));
        assert!(matches!(
            reg.rule(Machine::Polisher),
            Err(RegistryError::UnknownMachine(_))
        ));
    }
}
