//! `ensemble policies` — list the built-in policy module catalog.

use anyhow::Result;

use ensemble_core::PolicyCatalog;

pub fn run() -> Result<()> {
    let catalog = PolicyCatalog::builtin();

    println!("Known policy modules ({}):", catalog.len());
    for entry in catalog.entries() {
        println!("  {}: {}", entry.name, entry.summary);
    }
    println!("Declare them under 'policies:' in a brief.");
    Ok(())
}
