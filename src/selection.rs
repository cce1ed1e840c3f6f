//! Selection state — per-category preset choices and export settings.
//!
//! DESIGN
//! ======
//! Multi-select categories are a tagged state: an ordered list of chosen
//! non-sentinel presets where the empty list *is* the "none" state. The
//! literal `"none"` id only exists at the wire boundary — [`SelectionSet::ids`]
//! renders an empty set as `["none"]`, so the invariant "the set is never
//! empty" holds at the interface without a placeholder entry.
//!
//! The mockup category is single-select: choosing a new mockup replaces the
//! prior one outright, and re-choosing the active mockup resets to default.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Category, NONE_ID, Preset};

// =============================================================================
// MULTI-SELECT SET
// =============================================================================

/// Ordered multi-select state for one category. Empty means "none".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    chosen: Vec<&'static Preset>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self { chosen: Vec::new() }
    }

    /// Toggle one preset:
    /// - the sentinel collapses the set back to "none";
    /// - a chosen preset is removed (sole member → back to "none");
    /// - anything else is appended in selection order.
    pub fn toggle(&mut self, preset: &'static Preset) {
        if preset.is_sentinel() {
            self.chosen.clear();
        } else if let Some(pos) = self.chosen.iter().position(|p| p.id == preset.id) {
            self.chosen.remove(pos);
        } else {
            self.chosen.push(preset);
        }
    }

    /// Overwrite the whole selection (suggestion merge). Sentinels are dropped.
    pub fn replace(&mut self, presets: impl IntoIterator<Item = &'static Preset>) {
        self.chosen = presets.into_iter().filter(|p| !p.is_sentinel()).collect();
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Chosen presets in selection order. Empty when the set is "none".
    #[must_use]
    pub fn presets(&self) -> &[&'static Preset] {
        &self.chosen
    }

    /// `true` when no real preset is chosen (the sentinel state).
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Rendered id list: `["none"]` when empty, otherwise the chosen ids.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        if self.chosen.is_empty() {
            vec![NONE_ID]
        } else {
            self.chosen.iter().map(|p| p.id).collect()
        }
    }
}

// =============================================================================
// MOCKUP (SINGLE-SELECT)
// =============================================================================

/// Single-select mockup state. `None` renders as the `"none"` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockupSelection {
    active: Option<&'static Preset>,
}

impl MockupSelection {
    /// Replace the selection. Choosing the sentinel, or re-choosing the
    /// currently active mockup, resets to the category default.
    pub fn select(&mut self, preset: &'static Preset) {
        if preset.is_sentinel() || self.active.is_some_and(|p| p.id == preset.id) {
            self.active = None;
        } else {
            self.active = Some(preset);
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&'static Preset> {
        self.active
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.active.map_or(NONE_ID, |p| p.id)
    }
}

// =============================================================================
// DESIGN-KIT SELECTIONS
// =============================================================================

/// All per-category selection state for the Design Kit flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignSelections {
    pub camera: SelectionSet,
    pub lighting: SelectionSet,
    pub manipulation: SelectionSet,
    pub retouch: SelectionSet,
    pub people_retouch: SelectionSet,
    pub mockup: MockupSelection,
}

impl DesignSelections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Multi-select set for a category; `None` for the single-select mockup.
    #[must_use]
    pub fn set(&self, category: Category) -> Option<&SelectionSet> {
        match category {
            Category::Camera => Some(&self.camera),
            Category::Lighting => Some(&self.lighting),
            Category::Manipulation => Some(&self.manipulation),
            Category::Retouch => Some(&self.retouch),
            Category::PeopleRetouch => Some(&self.people_retouch),
            Category::Mockup => None,
        }
    }

    pub fn set_mut(&mut self, category: Category) -> Option<&mut SelectionSet> {
        match category {
            Category::Camera => Some(&mut self.camera),
            Category::Lighting => Some(&mut self.lighting),
            Category::Manipulation => Some(&mut self.manipulation),
            Category::Retouch => Some(&mut self.retouch),
            Category::PeopleRetouch => Some(&mut self.people_retouch),
            Category::Mockup => None,
        }
    }

    /// Apply one user click: toggle for multi-select categories, replace for
    /// the mockup. Pure state transition — no error conditions.
    pub fn apply(&mut self, category: Category, preset: &'static Preset) {
        match self.set_mut(category) {
            Some(set) => set.toggle(preset),
            None => self.mockup.select(preset),
        }
    }

    /// Reset every category to its default "none" state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Look up a preset and apply it. Returns `false` for unknown ids so the
/// route layer can report them instead of corrupting state.
pub fn apply_by_id(selections: &mut DesignSelections, category: Category, id: &str) -> bool {
    match catalog::find(category, id) {
        Some(preset) => {
            selections.apply(category, preset);
            true
        }
        None => false,
    }
}

// =============================================================================
// EXPORT SETTINGS
// =============================================================================

/// Closed set of output aspect ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait45,
    #[serde(rename = "9:16")]
    Vertical916,
    #[serde(rename = "16:9")]
    Wide169,
    #[serde(rename = "4:3")]
    Landscape43,
    #[serde(rename = "3:4")]
    Portrait34,
}

impl AspectRatio {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait45 => "4:5",
            AspectRatio::Vertical916 => "9:16",
            AspectRatio::Wide169 => "16:9",
            AspectRatio::Landscape43 => "4:3",
            AspectRatio::Portrait34 => "3:4",
        }
    }
}

/// User-editable export settings. Defaults fixed at session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub aspect_ratio: AspectRatio,
    pub transparent: bool,
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
