pub mod manifest;
pub mod package;

pub use manifest::{INSTALLED_MANIFEST, LOCAL_MANIFEST, MainEntry, Manifest};
pub use package::Package;
