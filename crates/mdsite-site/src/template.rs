//! Page templates
//!
//! A template is an HTML string with `{{ Title }}` and `{{ Content }}`
//! markers. Rendering substitutes both, then rewrites root-relative links
//! onto the site's base path.

use crate::{HTML_EXTENSION, Result, SiteError};
use std::fs;
use std::path::Path;

/// Marker replaced by the page title
pub const TITLE_MARKER: &str = "{{ Title }}";

/// Marker replaced by the rendered page content
pub const CONTENT_MARKER: &str = "{{ Content }}";

/// An HTML page template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load a template from an existing `.html` file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SiteError::FileNotFound(path.to_path_buf()));
        }
        if !path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(HTML_EXTENSION))
        {
            return Err(SiteError::UnexpectedExtension {
                path: path.to_path_buf(),
                expected: HTML_EXTENSION,
            });
        }
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Fill in title and content, then rewrite links onto `base_path`
    pub fn render(&self, title: &str, content: &str, base_path: &str) -> String {
        // Neither substituted value is scanned for the other marker
        let page = self
            .source
            .split(TITLE_MARKER)
            .map(|piece| piece.replace(CONTENT_MARKER, content))
            .collect::<Vec<_>>()
            .join(title);
        rewrite_base_path(&page, base_path)
    }
}

/// Point root-relative `href="/` and `src="/` attributes at `base_path`
///
/// A base path without a trailing slash gets one; `/` leaves the page as is.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    let base = if base_path.ends_with('/') {
        base_path.to_string()
    } else {
        format!("{base_path}/")
    };
    if base == "/" {
        return html.to_string();
    }

    html.replace(r#"href="/"#, &format!(r#"href="{base}"#))
        .replace(r#"src="/"#, &format!(r#"src="{base}"#))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_substitutes_markers() {
        let template = Template::new("<title>{{ Title }}</title><main>{{ Content }}</main>");
        insta::assert_snapshot!(
            template.render("Hello", "<div><p>Hi</p></div>", "/"),
            @"<title>Hello</title><main><div><p>Hi</p></div></main>"
        );
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = Template::new("{{ Title }} | {{ Title }}");
        assert_eq!(template.render("Page", "", "/"), "Page | Page");
    }

    #[test]
    fn test_content_markers_are_not_substituted_twice() {
        let template = Template::new("<h1>{{ Title }}</h1>{{ Content }}");
        assert_eq!(
            template.render("T", "<p>literal {{ Title }}</p>", "/"),
            "<h1>T</h1><p>literal {{ Title }}</p>"
        );
    }

    #[test]
    fn test_title_markers_are_not_substituted_again() {
        let template = Template::new("<title>{{ Title }}</title><main>{{ Content }}</main>");
        assert_eq!(
            template.render("About {{ Content }}", "<p>body</p>", "/"),
            "<title>About {{ Content }}</title><main><p>body</p></main>"
        );
    }

    #[test]
    fn test_rewrite_base_path() {
        let html = r#"<a href="/about">About</a><img src="/cat.png"><a href="https://x.dev">x</a>"#;
        assert_eq!(
            rewrite_base_path(html, "/repo/"),
            r#"<a href="/repo/about">About</a><img src="/repo/cat.png"><a href="https://x.dev">x</a>"#
        );
    }

    #[test]
    fn test_rewrite_base_path_appends_slash() {
        assert_eq!(
            rewrite_base_path(r#"<a href="/">Home</a>"#, "/repo"),
            r#"<a href="/repo/">Home</a>"#
        );
    }

    #[test]
    fn test_rewrite_base_path_root_is_noop() {
        let html = r#"<a href="/about">About</a>"#;
        assert_eq!(rewrite_base_path(html, "/"), html);
    }

    #[test]
    fn test_load_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.html");
        fs::write(&path, "<body>{{ Content }}</body>").unwrap();

        let template = Template::load(&path).unwrap();
        assert_eq!(template, Template::new("<body>{{ Content }}</body>"));
    }

    #[test]
    fn test_load_template_wrong_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.txt");
        fs::write(&path, "{{ Content }}").unwrap();

        assert!(matches!(
            Template::load(&path),
            Err(SiteError::UnexpectedExtension { expected: "html", .. })
        ));
    }

    #[test]
    fn test_load_template_missing() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Template::load(&dir.path().join("template.html")),
            Err(SiteError::FileNotFound(_))
        ));
    }
}
