//! Content subcommands.

use std::path::Path;

use spaceway_site::content::{ContentStore, LEGAL_SLUGS};
use tracing::{error, info};

/// Load the content directory and confirm every legal page is present.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or any legal page is
/// missing or fails to parse.
pub fn check(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = ContentStore::load(dir)?;
    info!(pages = store.len(), dir = %dir.display(), "Loaded content");

    let missing: Vec<&str> = LEGAL_SLUGS
        .iter()
        .copied()
        .filter(|slug| store.get_page(slug).is_none())
        .collect();

    if !missing.is_empty() {
        for slug in &missing {
            error!("  - missing page: {slug}");
        }
        return Err(format!("{} legal pages missing", missing.len()).into());
    }

    for slug in LEGAL_SLUGS {
        if let Some(page) = store.get_page(slug) {
            info!(
                slug,
                title = %page.meta.title,
                headings = page.headings.len(),
                "Page ok"
            );
        }
    }
    Ok(())
}
