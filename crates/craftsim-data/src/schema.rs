//! Serde data file structs for crafting plans.
//!
//! These structs define the on-disk format of a plan. They are deserialized
//! from RON, JSON, or TOML files and then resolved into core types by the
//! loader.

use serde::Deserialize;

/// A crafting plan as written in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanData {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: PlanKind,
    pub inputs: Vec<MaterialData>,
    pub machines: Vec<String>,
}

/// How a plan's machines are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// One starting material; machines run in the listed order. Multi-input
    /// machines combine the current item with itself.
    Chain,
    /// 1 to 4 starting materials fed through the fixed batch order. The
    /// machine list only says which stages are allowed.
    Batch,
}

/// A named starting material.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialData {
    pub kind: MaterialKind,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Ore,
    Gem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chain_ron() {
        let ron_str = r#"
            (
                name: Some("tin bar"),
                kind: chain,
                inputs: [(kind: ore, name: "Tin")],
                machines: ["Ore Cleaner", "ORE_SMELTER"],
            )
        "#;
        let plan: PlanData = ron::from_str(ron_str).unwrap();
        assert_eq!(plan.name.as_deref(), Some("tin bar"));
        assert_eq!(plan.kind, PlanKind::Chain);
        assert_eq!(plan.inputs.len(), 1);
        assert_eq!(plan.inputs[0].kind, MaterialKind::Ore);
        assert_eq!(plan.machines, vec!["Ore Cleaner", "ORE_SMELTER"]);
    }

    #[test]
    fn parse_batch_json() {
        let json_str = r#"{
            "kind": "batch",
            "inputs": [
                {"kind": "gem", "name": "Ruby"},
                {"kind": "gem", "name": "Ruby"}
            ],
            "machines": ["Prismatic Gem Crucible"]
        }"#;
        let plan: PlanData = serde_json::from_str(json_str).unwrap();
        assert!(plan.name.is_none());
        assert_eq!(plan.kind, PlanKind::Batch);
        assert!(plan.inputs.iter().all(|m| m.kind == MaterialKind::Gem));
    }

    #[test]
    fn parse_chain_toml() {
        let toml_str = r#"
            name = "painite"
            kind = "chain"
            machines = ["Polisher", "Gem Cutter"]

            [[inputs]]
            kind = "gem"
            name = "Painite"
        "#;
        let plan: PlanData = toml::from_str(toml_str).unwrap();
        assert_eq!(plan.kind, PlanKind::Chain);
        assert_eq!(plan.inputs[0].name, "Painite");
        assert_eq!(plan.machines.len(), 2);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json_str = r#"{"kind": "loop", "inputs": [], "machines": []}"#;
        assert!(serde_json::from_str::<PlanData>(json_str).is_err());
    }
}
