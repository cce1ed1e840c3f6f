//! Preset catalog route.

use axum::response::Json;
use serde::Serialize;

use crate::catalog::{self, Category, Preset};

/// One category with its ordered presets, sentinel first.
#[derive(Serialize)]
pub struct CategoryPresets {
    pub category: Category,
    pub presets: &'static [Preset],
}

/// `GET /api/presets` — the full static preset vocabulary.
pub async fn list_presets() -> Json<Vec<CategoryPresets>> {
    Json(
        Category::ALL
            .iter()
            .map(|&category| CategoryPresets { category, presets: catalog::presets(category) })
            .collect(),
    )
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
