//! Models Command
//!
//! Lists the selectable models per provider.
//!
//! Usage:
//!   rivalscope models [--provider openai]

use console::style;

use crate::ai::{ProviderKind, ProviderRegistry};
use crate::types::{IntelError, Result};

pub fn run(provider: Option<&str>) -> Result<()> {
    let kinds = match provider {
        Some(name) => vec![name.parse::<ProviderKind>().map_err(IntelError::Config)?],
        None => ProviderKind::ALL.to_vec(),
    };

    for kind in kinds {
        println!("{} {}", style(kind.as_str()).bold(), style(format!("({})", kind.api_key_env())).dim());
        for (i, label) in ProviderRegistry::labels(kind.as_str()).iter().enumerate() {
            let marker = if i == 0 { "*" } else { " " };
            println!("  {} {}", marker, label);
        }
        println!();
    }

    println!("{}", style("* default model").dim());
    Ok(())
}
