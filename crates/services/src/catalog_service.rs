use std::path::Path;

use smart_learn_core::model::Catalog;
use tracing::debug;

use crate::error::CatalogLoadError;

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// Parse and validate a catalog from JSON.
///
/// # Errors
///
/// Returns `CatalogLoadError::Json` for malformed JSON or an inconsistent catalog.
pub fn load_catalog(json: &str) -> Result<Catalog, CatalogLoadError> {
    let catalog: Catalog = serde_json::from_str(json)?;
    debug!(classes = catalog.classes().len(), "catalog loaded");
    Ok(catalog)
}

/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or parsed.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_catalog(&json)
}

/// The sample content shipped with the app.
///
/// # Errors
///
/// Returns `CatalogLoadError` only if the bundled file itself is broken.
pub fn bundled_catalog() -> Result<Catalog, CatalogLoadError> {
    load_catalog(BUNDLED_CATALOG)
}
