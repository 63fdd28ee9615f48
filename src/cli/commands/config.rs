//! Config Command
//!
//! Inspect rivalscope configuration.
//!
//! Usage:
//!   rivalscope config show [--json]
//!   rivalscope config path

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show effective configuration (merged from all sources)
pub fn show(as_json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", ConfigLoader::render(&config, as_json)?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    println!("Configuration paths:");
    println!();

    if let Some(global) = ConfigLoader::global_config_path() {
        let exists = if global.exists() { "✓" } else { "✗" };
        println!("  Global:  {} {}", exists, global.display());
    } else {
        println!("  Global:  (not available)");
    }

    let project = ConfigLoader::project_config_path();
    let exists = if project.exists() { "✓" } else { "✗" };
    println!("  Project: {} {}", exists, project.display());

    Ok(())
}
