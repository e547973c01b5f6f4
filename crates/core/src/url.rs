//! Asset URL scheme.
//!
//! ```text
//! /<signature>/<collection>/<package>/<version>/<file-path>
//! ```
//!
//! The first four segments are single path segments; `file-path` is the
//! remainder and may contain `/`. Every URL names one version of one file,
//! so its content never changes.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetUrl {
    pub signature: String,
    pub collection: String,
    pub package: String,
    pub version: String,
    pub file_path: String,
}

impl AssetUrl {
    pub fn new(
        signature: &str,
        collection: &str,
        package: &str,
        version: &str,
        file_path: &str,
    ) -> Self {
        Self {
            signature: signature.to_string(),
            collection: collection.to_string(),
            package: package.to_string(),
            version: version.to_string(),
            file_path: file_path.to_string(),
        }
    }

    /// Split a request path into its five parts, left to right.
    ///
    /// Returns `None` unless the path has a leading `/`, four non-empty
    /// leading segments, and a (possibly empty) file path after the fourth `/`.
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let mut parts = rest.splitn(5, '/');
        let signature = parts.next()?;
        let collection = parts.next()?;
        let package = parts.next()?;
        let version = parts.next()?;
        let file_path = parts.next()?;

        if [signature, collection, package, version]
            .iter()
            .any(|segment| segment.is_empty())
        {
            return None;
        }

        Some(Self::new(signature, collection, package, version, file_path))
    }

    /// Whether `path` starts with the `/<signature>/` prefix.
    pub fn has_signature(path: &str, signature: &str) -> bool {
        path.strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(signature))
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// URL of a package directory: `/<signature>/<collection>/<package>/<version>/`.
    pub fn package_prefix(signature: &str, collection: &str, package: &str, version: &str) -> String {
        Self::new(signature, collection, package, version, "").to_string()
    }
}

impl fmt::Display for AssetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}/{}/{}/{}",
            self.signature, self.collection, self.package, self.version, self.file_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let url = AssetUrl::new("pkglink", "components", "jquery", "2.1.1", "dist/jquery.js");
        assert_eq!(
            url.to_string(),
            "/pkglink/components/jquery/2.1.1/dist/jquery.js"
        );
    }

    #[test]
    fn test_parse_keeps_nested_file_path() {
        let url = AssetUrl::parse("/pkglink/components/bootstrap/3.2.0/dist/css/bootstrap.css")
            .unwrap();
        assert_eq!(url.signature, "pkglink");
        assert_eq!(url.collection, "components");
        assert_eq!(url.package, "bootstrap");
        assert_eq!(url.version, "3.2.0");
        assert_eq!(url.file_path, "dist/css/bootstrap.css");
    }

    #[test]
    fn test_parse_round_trip() {
        let url = AssetUrl::new("s", "local", "app", "1.0.0-dev", "a/b/c.min.js");
        assert_eq!(AssetUrl::parse(&url.to_string()), Some(url));
    }

    #[test]
    fn test_parse_rejects_short_paths() {
        assert_eq!(AssetUrl::parse(""), None);
        assert_eq!(AssetUrl::parse("/"), None);
        assert_eq!(AssetUrl::parse("pkglink/c/p/1.0/x.js"), None);
        assert_eq!(AssetUrl::parse("/pkglink/c/p/1.0"), None);
        assert_eq!(AssetUrl::parse("/pkglink/c//1.0/x.js"), None);
    }

    #[test]
    fn test_package_prefix() {
        assert_eq!(
            AssetUrl::package_prefix("pkglink", "components", "jquery", "2.1.1"),
            "/pkglink/components/jquery/2.1.1/"
        );
        let parsed = AssetUrl::parse("/pkglink/components/jquery/2.1.1/").unwrap();
        assert_eq!(parsed.file_path, "");
    }

    #[test]
    fn test_has_signature() {
        assert!(AssetUrl::has_signature("/pkglink/c/p/1/x.js", "pkglink"));
        assert!(!AssetUrl::has_signature("/pkglinks/c/p/1/x.js", "pkglink"));
        assert!(!AssetUrl::has_signature("/pkglink", "pkglink"));
        assert!(!AssetUrl::has_signature("/index.html", "pkglink"));
    }
}
