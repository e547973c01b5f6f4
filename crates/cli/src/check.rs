use pkglink_core::PackageRegistry;
use std::path::Path;
use tracing::info;

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let registry = PackageRegistry::load(path)?;
    let order = registry.dependency_order()?;

    info!("Checked {} packages in {}", order.len(), registry.root().display());
    println!("{} packages, in dependency order:", order.len());
    for name in &order {
        if let Some(package) = registry.get(name) {
            println!("  {} {}", package.name(), package.version());
        }
    }
    Ok(())
}
