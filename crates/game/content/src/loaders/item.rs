//! Item catalog loader.

use std::path::Path;

use quest_core::{Item, ItemRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, extension, read_file};

/// Item catalog structure for RON and JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for item catalogs. The format follows the file extension:
/// `.ron` is read as RON, anything else as JSON.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the catalog's items in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = match extension(path).as_deref() {
            Some("ron") => ron::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?,
            _ => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse item catalog JSON: {}", e))?,
        };
        Ok(catalog.items)
    }

    /// Load the catalog as an [`ItemRegistry`]. Duplicate ids are rejected.
    pub fn load_registry(path: &Path) -> LoadResult<ItemRegistry> {
        let mut registry = ItemRegistry::new();
        for item in Self::load(path)? {
            let id = item.id.clone();
            if registry.insert(item).is_some() {
                anyhow::bail!("Duplicate item id '{}' in {}", id, path.display());
            }
        }
        Ok(registry)
    }
}
