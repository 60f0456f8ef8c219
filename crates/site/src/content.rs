//! Markdown legal pages (privacy, terms, cookies, GDPR).
//!
//! Pages are loaded from `content/pages/*.md` at startup. Each file starts
//! with YAML frontmatter:
//!
//! ```markdown
//! ---
//! title: Privacy Policy
//! description: How Spaceway handles seller data
//! updated_at: 2025-01-15
//! ---
//!
//! ## Information we collect
//! ...
//! ```
//!
//! Second-level headings become the page's "On this page" index.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use regex::Regex;
use serde::Deserialize;

/// Slugs served under `/{slug}`.
pub const LEGAL_SLUGS: [&str; 4] = ["privacy", "terms", "cookies", "gdpr"];

/// Frontmatter of a page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// One entry of a page's heading index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub anchor: String,
    pub text: String,
}

/// A rendered page.
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
    pub headings: Vec<Heading>,
}

/// All loaded pages, held in memory.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
}

impl ContentStore {
    /// Load every page under `content_dir/pages`.
    ///
    /// A missing directory or an unreadable page is logged, not fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the pages directory exists but cannot be listed.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let dir = content_dir.join("pages");
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(Self::default());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match load_page(&path) {
                    Ok(page) => {
                        tracing::debug!("Loaded page: {}", page.slug);
                        pages.insert(page.slug.clone(), page);
                    }
                    Err(e) => tracing::error!("Failed to load page {:?}: {}", path, e),
                }
            }
        }

        for slug in LEGAL_SLUGS {
            if !pages.contains_key(slug) {
                tracing::warn!("Legal page missing: {slug}");
            }
        }

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    /// Build a store from markdown sources, keyed by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if any source has missing or invalid frontmatter.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ContentError> {
        let pages = sources
            .into_iter()
            .map(|(slug, source)| parse_page(slug, source).map(|p| (slug.to_string(), p)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    /// Get a page by slug.
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn load_page(path: &Path) -> Result<Page, ContentError> {
    let source = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;
    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?;
    parse_page(slug, &source)
}

fn parse_page(slug: &str, source: &str) -> Result<Page, ContentError> {
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<PageMeta> = matter
        .parse(source)
        .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
    let meta = parsed
        .data
        .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;

    let content_html = render_markdown(&parsed.content);
    let headings = extract_headings(&content_html);

    Ok(Page {
        slug: slug.to_string(),
        meta,
        content_html,
        headings,
    })
}

/// Render markdown to HTML (GitHub flavoured, raw HTML escaped).
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.header_ids = Some(String::new());

    markdown_to_html(content, &options)
}

/// Matches a rendered `<h2>` and its anchor id, whether the id sits on the
/// heading itself or on a leading `<a>`.
static H2_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h2(?:[^>]*\bid="([^"]+)")?[^>]*>(?:<a[^>]*\bid="([^"]+)"[^>]*></a>)?(.*?)</h2>"#)
        .expect("Invalid regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

fn extract_headings(html: &str) -> Vec<Heading> {
    H2_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let anchor = caps.get(1).or_else(|| caps.get(2))?.as_str().to_string();
            let text = TAG_RE
                .replace_all(caps.get(3).map_or("", |m| m.as_str()), "")
                .trim()
                .to_string();
            Some(Heading { anchor, text })
        })
        .collect()
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = "---\ntitle: Cookie Policy\nupdated_at: 2025-01-15\n---\n\n## What we store\n\nA session cookie.\n\n## Your choices\n\nClear it <script>x</script> any time.\n";

    #[test]
    fn test_parse_page() {
        let page = parse_page("cookies", SAMPLE).unwrap();

        assert_eq!(page.meta.title, "Cookie Policy");
        assert_eq!(
            page.meta.updated_at,
            Some(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        );
        assert!(page.content_html.contains("A session cookie."));
        assert!(!page.content_html.contains("<script>"));
        assert_eq!(page.headings.len(), 2);
        assert_eq!(page.headings[0].text, "What we store");
    }

    #[test]
    fn test_missing_frontmatter_is_an_error() {
        assert!(parse_page("terms", "## Just a heading\n").is_err());
    }

    #[test]
    fn test_extract_headings_attribute_order() {
        let html = concat!(
            r##"<h2><a inert href="#a" aria-hidden="true" class="anchor" id="a"></a>First</h2>"##,
            r#"<p>x</p><h2><a id="b" class="anchor"></a>Second <em>part</em></h2>"#,
            r#"<h3>Ignored</h3><h2 id="c">Third</h2>"#,
        );
        assert_eq!(
            extract_headings(html),
            vec![
                Heading {
                    anchor: "a".to_string(),
                    text: "First".to_string()
                },
                Heading {
                    anchor: "b".to_string(),
                    text: "Second part".to_string()
                },
                Heading {
                    anchor: "c".to_string(),
                    text: "Third".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_from_sources() {
        let store = ContentStore::from_sources([("cookies", SAMPLE)]).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get_page("cookies").is_some());
        assert!(store.get_page("privacy").is_none());
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let store = ContentStore::load(Path::new("/nonexistent/content")).unwrap();
        assert!(store.is_empty());
    }
}
