//! Craftsim Data -- crafting plans loaded from RON, TOML or JSON files.
//!
//! A plan names its starting ores or gems and the machines to run. The
//! loader resolves every name against the core vocabularies and registry,
//! then [`Plan::execute`] runs it as a chain or a batch.

pub mod loader;
pub mod plan;
pub mod schema;

pub use loader::{DataLoadError, find_plan_file, load_plan};
pub use plan::{Plan, Steps};
