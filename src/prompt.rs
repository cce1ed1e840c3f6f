//! Prompt composition — deterministic instruction strings for the model.
//!
//! DESIGN
//! ======
//! Pure functions, no I/O. [`compose_design_kit`] renders the Design Kit
//! selections, export settings and free text into a fixed-order instruction
//! block; [`compose_creative`] forwards the Creative Studio instruction
//! verbatim. Sentinel presets never emit instruction text, so an all-default
//! session produces the neutral studio clause and nothing per category.

use std::fmt::Write;

use crate::catalog::Preset;
use crate::selection::{DesignSelections, ExportSettings};

/// Inputs to the Design Kit composer. Everything is borrowed — composition
/// never mutates session state.
#[derive(Debug, Clone, Copy)]
pub struct DesignKitInput<'a> {
    pub selections: &'a DesignSelections,
    pub export: ExportSettings,
    pub custom_prompt: &'a str,
    pub has_reference_image: bool,
    pub magic_composite: bool,
}

// =============================================================================
// DESIGN KIT
// =============================================================================

/// Render the full Design Kit generation prompt. Deterministic: identical
/// inputs always yield an identical string.
#[must_use]
pub fn compose_design_kit(input: &DesignKitInput<'_>) -> String {
    let mut prompt = String::from(
        "You are an expert product photographer and digital artist.\n\
         Your task is to create a dynamic, professional advertisement image for the provided \
         product (the FIRST image) from scratch, placing it within a newly generated, \
         photorealistic scene.\n\n\
         --- PRIMARY SCENE GOAL ---\n",
    );

    if input.has_reference_image {
        prompt.push_str(
            "The SECOND image provided is a reference for style and mood.\n\
             IMPORTANT: Do NOT composite the product into the reference image.\n\
             Instead, generate a NEW, unique background scene that is heavily INSPIRED by the \
             reference image. Capture its atmosphere, lighting, color palette, and overall \
             aesthetic. The final result should look like the product was photographed in a \
             location similar to the reference image, but it must be a completely new scene.\n\n",
        );
    } else if let Some(mockup) = input.selections.mockup.active() {
        let _ = writeln!(
            prompt,
            "Place the product in a photorealistic \"{}\" environment. Description for context: {}.\n",
            mockup.name, mockup.description
        );
    } else {
        prompt.push_str(
            "Place the product on a clean, elegant, professional studio backdrop that \
             complements its style and the instructions below.\n\n",
        );
    }

    prompt.push_str("--- CREATIVE & TECHNICAL INSTRUCTIONS ---\n");
    prompt.push_str(if input.magic_composite {
        "Magic Composite Mode is ON: You have creative freedom to interpret these instructions \
         to create the most stunning image possible.\n"
    } else {
        "Manual Design Kit Mode is ON: Strictly adhere to the following instructions.\n"
    });

    if !input.custom_prompt.is_empty() {
        let _ = writeln!(prompt, "\n- Creative Direction: \"{}\"", input.custom_prompt);
    }

    write_hinted_section(&mut prompt, "Camera Instructions", input.selections.camera.presets());
    write_hinted_section(&mut prompt, "Lighting Instructions", input.selections.lighting.presets());

    prompt.push_str("\n--- POST-PRODUCTION & RETOUCHING ---\n");
    write_section(&mut prompt, "Product Retouching", input.selections.retouch.presets());
    write_section(&mut prompt, "People Retouching", input.selections.people_retouch.presets());
    write_section(&mut prompt, "Creative Manipulations & FX", input.selections.manipulation.presets());

    prompt.push_str("\n--- FINAL EXPORT REQUIREMENTS ---\n");
    let _ = writeln!(
        prompt,
        "- Aspect Ratio: The final image MUST have an exact aspect ratio of {}.",
        input.export.aspect_ratio.as_str()
    );
    prompt.push_str(if input.export.transparent {
        "- Background: The final image MUST have a transparent background (PNG format). If \
         compositing, this means removing the original background but keeping all generated \
         shadows and reflections for placing on another backdrop.\n"
    } else {
        "- Background: The final image must have a fully rendered, opaque background.\n"
    });
    prompt.push_str(
        "- Output: The final output must be ONLY the generated image. Do not add any text, \
         watermarks, or annotations. The product is the hero.",
    );

    prompt
}

/// Emit a labeled section of `name: description` lines, one per non-sentinel
/// preset in selection order. Empty selections emit nothing.
fn write_section(prompt: &mut String, label: &str, presets: &[&'static Preset]) {
    let real: Vec<_> = presets.iter().filter(|p| !p.is_sentinel()).collect();
    if real.is_empty() {
        return;
    }
    let _ = writeln!(prompt, "- {label}:");
    for p in real {
        let _ = writeln!(prompt, "  - {}: {}.", p.name, p.description);
    }
}

/// Like [`write_section`] but appends the technical hint camera and lighting
/// presets carry.
fn write_hinted_section(prompt: &mut String, label: &str, presets: &[&'static Preset]) {
    let real: Vec<_> = presets.iter().filter(|p| !p.is_sentinel()).collect();
    if real.is_empty() {
        return;
    }
    let _ = writeln!(prompt, "- {label}:");
    for p in real {
        match p.metadata {
            Some(hint) => {
                let _ = writeln!(prompt, "  - {}: {}. Technical hint: {hint}", p.name, p.description);
            }
            None => {
                let _ = writeln!(prompt, "  - {}: {}.", p.name, p.description);
            }
        }
    }
}

// =============================================================================
// CREATIVE STUDIO
// =============================================================================

/// Creative Studio forwards the user's instruction verbatim — the base image
/// travels alongside it, and no preset assembly happens.
#[must_use]
pub fn compose_creative(instruction: &str) -> String {
    instruction.to_string()
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
