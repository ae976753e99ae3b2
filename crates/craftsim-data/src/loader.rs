//! Resolution pipeline: reads plan files, resolves names, builds a [`Plan`].
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers used by [`load_plan`].

use crate::plan::{Plan, Steps};
use crate::schema::{MaterialData, MaterialKind, PlanData, PlanKind};
use craftsim_core::error::CraftError;
use craftsim_core::factory::{create_gem, create_ore};
use craftsim_core::item::Item;
use craftsim_core::pipeline::BATCH_MACHINES;
use craftsim_core::registry::Registry;
use craftsim_core::vocab::Machine;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a plan.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name did not match any ore, gem or machine.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// The plan parsed but its shape is unusable.
    #[error("invalid plan in {file}: {detail}")]
    InvalidPlan { file: PathBuf, detail: String },

    /// A machine resolved to a name but has no usable rule.
    #[error(transparent)]
    Craft(#[from] CraftError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a plan with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_plan_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let parse_error = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}

// ===========================================================================
// Name resolution
// ===========================================================================

fn resolve_material(material: &MaterialData, file: &Path) -> Result<Item, DataLoadError> {
    let (created, expected_kind) = match material.kind {
        MaterialKind::Ore => (create_ore(&material.name), "ore"),
        MaterialKind::Gem => (create_gem(&material.name), "gem"),
    };
    created.map_err(|_| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: material.name.clone(),
        expected_kind,
    })
}

fn resolve_machine(name: &str, file: &Path) -> Result<Machine, DataLoadError> {
    match name.parse::<Machine>() {
        Ok(Machine::Unknown) | Err(_) => Err(DataLoadError::UnresolvedRef {
            file: file.to_path_buf(),
            name: name.to_string(),
            expected_kind: "machine",
        }),
        Ok(machine) => Ok(machine),
    }
}

// ===========================================================================
// Top-level loading
// ===========================================================================

/// Load a plan file and resolve it against `registry`.
///
/// Chain plans resolve every machine to its rule here, so a placeholder or
/// unknown machine fails at load time rather than halfway through a run.
pub fn load_plan(path: &Path, registry: &Registry) -> Result<Plan, DataLoadError> {
    let data: PlanData = deserialize_file(path)?;
    resolve_plan(data, path, registry)
}

/// Resolve already-deserialized plan data. `file` is used in error messages.
pub fn resolve_plan(data: PlanData, file: &Path, registry: &Registry) -> Result<Plan, DataLoadError> {
    let invalid = |detail: String| DataLoadError::InvalidPlan {
        file: file.to_path_buf(),
        detail,
    };

    let mut inputs = data
        .inputs
        .iter()
        .map(|m| resolve_material(m, file))
        .collect::<Result<Vec<_>, _>>()?;
    let machines = data
        .machines
        .iter()
        .map(|name| resolve_machine(name, file))
        .collect::<Result<Vec<_>, _>>()?;

    let steps = match data.kind {
        PlanKind::Chain => {
            if inputs.len() != 1 {
                return Err(invalid(format!(
                    "a chain takes exactly 1 input, got {}",
                    inputs.len()
                )));
            }
            let rules = machines
                .iter()
                .map(|&m| registry.rule(m).map(|rule| (m, rule)))
                .collect::<Result<Vec<_>, _>>()
                .map_err(CraftError::from)?;
            let start = inputs.remove(0);
            Steps::Chain { start, rules }
        }
        PlanKind::Batch => {
            if !(1..=4).contains(&inputs.len()) {
                return Err(invalid(format!(
                    "a batch takes 1 to 4 inputs, got {}",
                    inputs.len()
                )));
            }
            for machine in machines.iter().filter(|m| !BATCH_MACHINES.contains(m)) {
                tracing::warn!(
                    %machine,
                    file = %file.display(),
                    "machine has no stage in a batch and will be ignored"
                );
            }
            Steps::Batch { inputs, machines }
        }
    };

    tracing::debug!(file = %file.display(), kind = ?data.kind, "plan loaded");
    Ok(Plan {
        name: data.name,
        steps,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use craftsim_core::registry::RegistryError;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "craftsim_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("plan.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("plan.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("plan.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("plan.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("plan")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_plan_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_plan_file_found_and_missing() {
        let dir = make_test_dir("find");
        fs::write(dir.join("tin.toml"), "").unwrap();

        assert_eq!(find_plan_file(&dir, "tin").unwrap(), Some(dir.join("tin.toml")));
        assert_eq!(find_plan_file(&dir, "iron").unwrap(), None);

        cleanup(&dir);
    }

    #[test]
    fn find_plan_file_conflict() {
        let dir = make_test_dir("conflict");
        fs::write(dir.join("tin.ron"), "").unwrap();
        fs::write(dir.join("tin.json"), "").unwrap();

        assert!(matches!(
            find_plan_file(&dir, "tin"),
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_plan
    // -----------------------------------------------------------------------

    #[test]
    fn load_chain_plan_ron() {
        let dir = make_test_dir("chain_ron");
        let path = dir.join("tin.ron");
        fs::write(
            &path,
            r#"(kind: chain, inputs: [(kind: ore, name: "tin")], machines: ["Ore Cleaner", "ore_smelter", "Alloy Furnace"])"#,
        )
        .unwrap();

        let plan = load_plan(&path, Registry::standard()).unwrap();
        assert_eq!(plan.inputs().len(), 1);
        assert_eq!(
            plan.machines(),
            vec![Machine::OreCleaner, Machine::OreSmelter, Machine::AlloyFurnace]
        );
        assert_eq!(plan.execute().unwrap().value(), 58);

        cleanup(&dir);
    }

    #[test]
    fn load_batch_plan_json() {
        let dir = make_test_dir("batch_json");
        let path = dir.join("alloy.json");
        fs::write(
            &path,
            r#"{
                "name": "tin-iron alloy",
                "kind": "batch",
                "inputs": [{"kind": "ore", "name": "Tin"}, {"kind": "ore", "name": "Iron"}],
                "machines": ["Ore Cleaner", "Ore Smelter", "Alloy Furnace", "Coiler"]
            }"#,
        )
        .unwrap();

        let plan = load_plan(&path, Registry::standard()).unwrap();
        assert_eq!(plan.name.as_deref(), Some("tin-iron alloy"));
        assert_eq!(plan.execute().unwrap().value(), 72);

        cleanup(&dir);
    }

    #[test]
    fn load_single_input_batch_toml() {
        let dir = make_test_dir("batch_toml");
        let path = dir.join("ruby.toml");
        fs::write(
            &path,
            r#"
                kind = "batch"
                machines = ["Prismatic Gem Crucible", "Gem Cutter"]

                [[inputs]]
                kind = "gem"
                name = "Ruby"
            "#,
        )
        .unwrap();

        let plan = load_plan(&path, Registry::standard()).unwrap();
        assert_eq!(plan.execute().unwrap().value(), 966);

        cleanup(&dir);
    }

    #[test]
    fn unknown_names_are_unresolved_refs() {
        let dir = make_test_dir("unresolved");
        let ore_path = dir.join("ore.json");
        fs::write(
            &ore_path,
            r#"{"kind": "chain", "inputs": [{"kind": "ore", "name": "Kryptonite"}], "machines": []}"#,
        )
        .unwrap();
        let machine_path = dir.join("machine.json");
        fs::write(
            &machine_path,
            r#"{"kind": "chain", "inputs": [{"kind": "gem", "name": "Topaz"}], "machines": ["Warp Core"]}"#,
        )
        .unwrap();

        match load_plan(&ore_path, Registry::standard()) {
            Err(DataLoadError::UnresolvedRef {
                name,
                expected_kind,
                ..
            }) => {
                assert_eq!(name, "Kryptonite");
                assert_eq!(expected_kind, "ore");
            }
            other => panic!("expected UnresolvedRef, got: {other:?}"),
        }
        assert!(matches!(
            load_plan(&machine_path, Registry::standard()),
            Err(DataLoadError::UnresolvedRef {
                expected_kind: "machine",
                ..
            })
        ));

        cleanup(&dir);
    }

    #[test]
    fn placeholder_machine_fails_chain_at_load() {
        let dir = make_test_dir("placeholder");
        let path = dir.join("crush.json");
        fs::write(
            &path,
            r#"{"kind": "chain", "inputs": [{"kind": "ore", "name": "Iron"}], "machines": ["Crusher"]}"#,
        )
        .unwrap();

        assert!(matches!(
            load_plan(&path, Registry::standard()),
            Err(DataLoadError::Craft(CraftError::Registry(
                RegistryError::NotImplemented(Machine::Crusher)
            )))
        ));

        cleanup(&dir);
    }

    #[test]
    fn chain_needs_exactly_one_input() {
        let dir = make_test_dir("chain_inputs");
        let path = dir.join("two.json");
        fs::write(
            &path,
            r#"{"kind": "chain", "inputs": [{"kind": "ore", "name": "Tin"}, {"kind": "ore", "name": "Tin"}], "machines": []}"#,
        )
        .unwrap();

        assert!(matches!(
            load_plan(&path, Registry::standard()),
            Err(DataLoadError::InvalidPlan { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = make_test_dir("malformed");
        let path = dir.join("bad.ron");
        fs::write(&path, "(kind: chain, inputs: [").unwrap();

        assert!(matches!(
            load_plan(&path, Registry::standard()),
            Err(DataLoadError::Parse { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("craftsim_no_such_plan.json");
        assert!(matches!(
            load_plan(&path, Registry::standard()),
            Err(DataLoadError::Io(_))
        ));
    }
}
