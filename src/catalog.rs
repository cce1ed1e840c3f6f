//! Preset catalogs — the static vocabulary of the Design Kit.
//!
//! DESIGN
//! ======
//! Each category carries an ordered list of presets, defined at compile time
//! and never mutated. The first entry of every category is the `"none"`
//! sentinel, which means "no selection" and never emits prompt text.
//! Camera and lighting presets additionally carry a technical hint that is
//! appended to their prompt instructions.

use serde::{Deserialize, Serialize};

/// Distinguished preset id meaning "no selection" for a category.
pub const NONE_ID: &str = "none";

// =============================================================================
// CATEGORY
// =============================================================================

/// Preset category. Wire names are camelCase to match the analyzer response
/// contract (`peopleRetouch`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Camera,
    Lighting,
    Mockup,
    Manipulation,
    Retouch,
    PeopleRetouch,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Camera,
        Category::Lighting,
        Category::Mockup,
        Category::Manipulation,
        Category::Retouch,
        Category::PeopleRetouch,
    ];

    /// Multi-select categories — everything except the single-select mockup.
    pub const MULTI: [Category; 5] = [
        Category::Camera,
        Category::Lighting,
        Category::Manipulation,
        Category::Retouch,
        Category::PeopleRetouch,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Camera => "camera",
            Category::Lighting => "lighting",
            Category::Mockup => "mockup",
            Category::Manipulation => "manipulation",
            Category::Retouch => "retouch",
            Category::PeopleRetouch => "peopleRetouch",
        }
    }
}

// =============================================================================
// PRESET
// =============================================================================

/// A named, described configuration option within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Technical hint appended to camera/lighting instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'static str>,
}

impl Preset {
    /// `true` for the `"none"` sentinel, which never emits prompt text.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.id == NONE_ID
    }
}

const fn preset(id: &'static str, name: &'static str, description: &'static str) -> Preset {
    Preset { id, name, description, metadata: None }
}

const fn preset_with_hint(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    metadata: &'static str,
) -> Preset {
    Preset { id, name, description, metadata: Some(metadata) }
}

// =============================================================================
// CATALOGS
// =============================================================================

pub static CAMERA_PRESETS: [Preset; 7] = [
    preset(NONE_ID, "None", "No specific camera direction."),
    preset_with_hint(
        "hero-45",
        "45° Hero",
        "Classic three-quarter hero angle showing the product's face and depth",
        "85mm lens, f/5.6, slight downward tilt",
    ),
    preset_with_hint(
        "eye-level",
        "Eye Level",
        "Straight-on framing at product height for an honest, catalog-ready look",
        "50mm lens, f/8, camera level with product center",
    ),
    preset_with_hint(
        "low-angle",
        "Low Angle",
        "Shot from below so the product feels monumental and aspirational",
        "35mm lens, f/4, camera 15 degrees below the product",
    ),
    preset_with_hint(
        "top-down",
        "Flat Lay",
        "Directly overhead composition, ideal for arrangements and packaging",
        "50mm lens, f/11, camera perpendicular to the surface",
    ),
    preset_with_hint(
        "macro-detail",
        "Macro Detail",
        "Extreme close-up emphasizing texture and craftsmanship",
        "100mm macro lens, f/2.8, shallow depth of field",
    ),
    preset_with_hint(
        "dutch-tilt",
        "Dutch Tilt",
        "Slightly rotated horizon adding energy and motion",
        "35mm lens, f/5.6, 10 degree roll",
    ),
];

pub static LIGHTING_PRESETS: [Preset; 7] = [
    preset(NONE_ID, "None", "No specific lighting direction."),
    preset_with_hint(
        "studio-softbox",
        "Studio Softbox",
        "Even, diffused key light with gentle falloff and soft shadows",
        "large octabox key at 45 degrees, white bounce fill",
    ),
    preset_with_hint(
        "day-02",
        "Golden Hour",
        "Warm, low-angled sunlight with long soft shadows",
        "3200K warm key, low angle, gentle haze",
    ),
    preset_with_hint(
        "overcast-soft",
        "Overcast Daylight",
        "Flat, near-shadowless natural light like a bright cloudy day",
        "5600K diffused skylight, minimal shadow density",
    ),
    preset_with_hint(
        "hard-noir",
        "Hard Noir",
        "Single hard source with deep, dramatic shadows",
        "bare bulb key, no fill, high contrast",
    ),
    preset_with_hint(
        "neon-glow",
        "Neon Glow",
        "Saturated color gels wrapping the product in a nightlife mood",
        "magenta and cyan gels, rim accents",
    ),
    preset_with_hint(
        "backlit-rim",
        "Backlit Rim",
        "Strong light from behind outlining the silhouette",
        "rim light two stops over key, controlled flare",
    ),
];

pub static MOCKUP_PRESETS: [Preset; 7] = [
    preset(NONE_ID, "None", "No environment; a clean studio backdrop."),
    preset("marble-counter", "Marble Counter", "A polished marble kitchen counter in soft morning light"),
    preset("concrete-podium", "Concrete Podium", "A minimalist concrete pedestal against a neutral wall"),
    preset("forest-floor", "Forest Floor", "Moss, stones and dappled light on a woodland floor"),
    preset("beach-sand", "Beach Sand", "Sunlit sand with gentle wave foam at the edge of frame"),
    preset("city-billboard", "City Billboard", "A large billboard mounted over a busy city street"),
    preset("silk-drape", "Silk Drape", "Flowing silk fabric folds in a premium editorial setup"),
];

pub static MANIPULATION_PRESETS: [Preset; 8] = [
    preset(NONE_ID, "None", "No additional manipulation or FX."),
    preset(
        "shadow-synthesis",
        "Shadow Synthesis",
        "Generate physically plausible contact shadows grounding the product in the scene",
    ),
    preset("atmospheric-fx", "Atmospheric FX", "Add haze, dust motes or mist to give the scene depth"),
    preset(
        "ibl-match",
        "Lighting Match",
        "Relight the product to match the environment's light direction and color",
    ),
    preset("water-splash", "Water Splash", "Dynamic splash elements frozen mid-motion around the product"),
    preset("levitation", "Levitation", "Float the product above the surface with a soft shadow beneath"),
    preset("motion-blur", "Motion Streaks", "Directional blur trails conveying speed around a tack-sharp product"),
    preset("cine-grade", "Cinematic Grade", "Filmic color grade with lifted blacks and a teal-orange balance"),
];

pub static RETOUCH_PRESETS: [Preset; 5] = [
    preset(NONE_ID, "None", "No product retouching."),
    preset("cleanup", "Surface Cleanup", "Remove dust, fingerprints and scratches from the product surface"),
    preset("specular-control", "Specular Control", "Tame harsh highlights and balance reflections on glossy areas"),
    preset("label-sharpen", "Label Sharpen", "Increase label and logo legibility without halos"),
    preset("color-true", "True Color", "Correct the product color to match its real-world appearance"),
];

pub static PEOPLE_RETOUCH_PRESETS: [Preset; 4] = [
    preset(NONE_ID, "None", "No people retouching."),
    preset("skin-smooth", "Skin Smoothing", "Even out skin tone while preserving natural texture"),
    preset("eye-brighten", "Eye Brighten", "Subtly brighten eyes and add catchlights"),
    preset("flyaway-tame", "Hair Tame", "Remove flyaway hairs and clean up the hairline"),
];

// =============================================================================
// LOOKUP
// =============================================================================

/// Ordered presets for a category. The sentinel is always first.
#[must_use]
pub fn presets(category: Category) -> &'static [Preset] {
    match category {
        Category::Camera => &CAMERA_PRESETS,
        Category::Lighting => &LIGHTING_PRESETS,
        Category::Mockup => &MOCKUP_PRESETS,
        Category::Manipulation => &MANIPULATION_PRESETS,
        Category::Retouch => &RETOUCH_PRESETS,
        Category::PeopleRetouch => &PEOPLE_RETOUCH_PRESETS,
    }
}

/// Look up a preset by id within a category. Unknown ids return `None`.
#[must_use]
pub fn find(category: Category, id: &str) -> Option<&'static Preset> {
    presets(category).iter().find(|p| p.id == id)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
