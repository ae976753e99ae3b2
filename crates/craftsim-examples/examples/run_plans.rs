//! Plan example: load crafting plans from data files and run them.
//!
//! Looks up each named plan under `crates/craftsim-examples/plans/` by base
//! name, whichever of RON, TOML or JSON it is written in, resolves it against
//! the standard registry, and prints the result. A plan that is missing,
//! fails to load, or fails to run is reported and skipped.
//!
//! Run with: `cargo run -p craftsim-examples --example run_plans [name...]`

use craftsim_core::registry::Registry;
use craftsim_data::{find_plan_file, load_plan};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const BUNDLED: [&str; 4] = ["tin_alloy", "ruby_pair", "mixed_alloy", "crusher"];

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        names = BUNDLED.iter().map(|name| name.to_string()).collect();
    }

    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("plans");
    let registry = Registry::standard();
    for name in &names {
        let path = match find_plan_file(&dir, name) {
            Ok(Some(path)) => path,
            Ok(None) => {
                tracing::error!(plan = %name, dir = %dir.display(), "no plan file found");
                continue;
            }
            Err(err) => {
                tracing::error!(plan = %name, %err, "plan lookup failed");
                continue;
            }
        };
        let plan = match load_plan(&path, registry) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::error!(file = %path.display(), %err, "plan rejected");
                continue;
            }
        };
        let label = plan.name.clone().unwrap_or_else(|| name.clone());
        match plan.execute() {
            Ok(item) => println!("{label:24} {}", item.table_full()),
            Err(err) => tracing::error!(plan = %label, %err, "plan failed"),
        }
    }
}
