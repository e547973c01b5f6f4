use pkglink_core::{Assets, Collection};
use std::path::Path;

pub fn run(path: &Path, name: &str, signature: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut assets = Assets::with_signature(signature);
    let components = assets.components(name, path)?;

    for package in components.registry().names() {
        let Some(package_url) = components.package_url(package) else {
            continue;
        };
        match components.get_resource(package) {
            Some(main) => println!("{package}\t{package_url}\t{}", main.url()),
            None => println!("{package}\t{package_url}"),
        }
    }
    Ok(())
}
