//! HTML tags for included resources, chosen by file extension.

use crate::resource::Resource;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type RenderFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone)]
pub struct TagRenderer {
    /// Lowercased extension -> tag template
    renderers: HashMap<String, RenderFn>,
}

impl TagRenderer {
    /// A renderer that knows no extensions.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        extension: &str,
        render: impl Fn(&str) -> String + Send + Sync + 'static,
    ) {
        self.renderers
            .insert(extension.to_ascii_lowercase(), Arc::new(render));
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.renderers.contains_key(&extension.to_ascii_lowercase())
    }

    /// Tag for one resource; `None` for extensions without a renderer.
    pub fn render(&self, resource: &Resource) -> Option<String> {
        let extension = resource.extension()?;
        let render = self.renderers.get(&extension)?;
        Some(render(&escape_attr(resource.url())))
    }

    /// Concatenated tags, in the given order.
    pub fn render_all(&self, resources: &[Arc<Resource>]) -> String {
        resources
            .iter()
            .filter_map(|resource| self.render(resource))
            .collect()
    }
}

impl Default for TagRenderer {
    fn default() -> Self {
        let mut renderer = Self::empty();
        renderer.register("js", |url| {
            format!(r#"<script type="text/javascript" src="{url}"></script>"#)
        });
        renderer.register("css", |url| {
            format!(r#"<link rel="stylesheet" type="text/css" href="{url}">"#)
        });
        renderer
    }
}

impl fmt::Debug for TagRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extensions: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        f.debug_struct("TagRenderer")
            .field("extensions", &extensions)
            .finish()
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Collection, ComponentsDirectory};
    use crate::model::Package;
    use crate::registry::PackageRegistry;
    use std::path::PathBuf;

    fn components() -> ComponentsDirectory {
        let registry = PackageRegistry::from_packages(
            PathBuf::from("/c"),
            vec![Package::new(
                PathBuf::from("/c/bootstrap"),
                "bootstrap",
                "3.2.0",
                "dist/css/bootstrap.css",
                vec![],
            )],
        )
        .unwrap();
        ComponentsDirectory::with_registry(Arc::from("pkglink"), "components", registry).unwrap()
    }

    #[test]
    fn test_render_defaults() {
        let components = components();
        let renderer = TagRenderer::default();

        let css = components.resource("bootstrap").unwrap();
        assert_eq!(
            renderer.render(&css).unwrap(),
            r#"<link rel="stylesheet" type="text/css" href="/pkglink/components/bootstrap/3.2.0/dist/css/bootstrap.css">"#
        );

        let js = components.resource("bootstrap/dist/js/bootstrap.JS").unwrap();
        assert_eq!(
            renderer.render(&js).unwrap(),
            r#"<script type="text/javascript" src="/pkglink/components/bootstrap/3.2.0/dist/js/bootstrap.JS"></script>"#
        );
    }

    #[test]
    fn test_render_skips_unknown_extension() {
        let components = components();
        let renderer = TagRenderer::default();

        let font = components.resource("bootstrap/fonts/glyph.woff").unwrap();
        let readme = components.resource("bootstrap/README").unwrap();
        assert_eq!(renderer.render(&font), None);
        assert_eq!(renderer.render(&readme), None);
        assert_eq!(renderer.render_all(&[font, readme]), "");
    }

    #[test]
    fn test_register_custom_extension() {
        let components = components();
        let mut renderer = TagRenderer::default();
        renderer.register("ICO", |url| format!(r#"<link rel="icon" href="{url}">"#));

        assert!(renderer.supports("ico"));
        let icon = components.resource("bootstrap/favicon.ico").unwrap();
        assert_eq!(
            renderer.render(&icon).unwrap(),
            r#"<link rel="icon" href="/pkglink/components/bootstrap/3.2.0/favicon.ico">"#
        );
    }
}
