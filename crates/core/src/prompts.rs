//! Prompt templates for the generation model.
//!
//! Each job processor builds its prompt here so the wording lives in one
//! reviewable place and the construction logic stays unit-testable. The
//! templates are fixed; caller-supplied free text is merged into designated
//! slots only, never substituted into the instructions themselves.

/// Instruction block for the tagging model. The model must answer with a
/// single JSON object and nothing else; the schema mirrors
/// `TagAnalysis` on the jobs side.
const TAGGING_INSTRUCTIONS: &str = "\
You are a fashion cataloguing assistant. Analyze the garment in the photo \
and respond with a single JSON object, no prose and no Markdown fence, with \
this exact shape:\n\
{\n\
  \"attributes\": [{\"key\": \"<attribute key>\", \"values\": [{\"value\": \"<value>\", \"confidence\": <0.0-1.0>}]}],\n\
  \"recognized_category\": \"<category name or null>\",\n\
  \"recognized_subcategory\": \"<subcategory name or null>\",\n\
  \"primary_color\": \"<color name or null>\",\n\
  \"suggested_title\": \"<short item title or null>\",\n\
  \"suggested_description\": \"<one-sentence description or null>\"\n\
}\n\
Use attribute keys like color, material, pattern, fit, season, occasion. \
Report every plausible value with its confidence.";

/// Build the tagging prompt, constraining category recognition to the
/// canonical names and optionally narrowing with a caller-supplied context.
pub fn tagging_prompt(canonical_categories: &[&str], category_context: Option<&str>) -> String {
    let mut prompt = String::from(TAGGING_INSTRUCTIONS);
    prompt.push_str("\nRecognized categories must be one of: ");
    prompt.push_str(&canonical_categories.join(", "));
    prompt.push('.');
    if let Some(context) = category_context {
        let context = context.trim();
        if !context.is_empty() {
            prompt.push_str("\nThe owner filed this item under: ");
            prompt.push_str(context);
            prompt.push('.');
        }
    }
    prompt
}

/// Prompt for transforming a garment photo into a square studio product shot.
pub fn product_shot_prompt() -> &'static str {
    "Transform this photo into a professional e-commerce product shot: the \
     garment alone, neatly presented, centered on a seamless light-gray \
     studio background with soft even lighting and a subtle ground shadow. \
     Square 1:1 aspect ratio. Preserve the garment's true colors, fabric \
     texture, and proportions exactly. Remove all people, hangers, clutter, \
     and background objects."
}

/// Build the stylized headshot prompt, merging optional hair and makeup
/// modifiers into the fixed template.
pub fn headshot_prompt(hair_style: Option<&str>, makeup_style: Option<&str>) -> String {
    let mut prompt = String::from(
        "Create a polished studio portrait headshot of the person in this \
         photo, shoulders up, facing the camera, on a neutral soft-gradient \
         background with flattering professional lighting. Preserve the \
         person's identity, facial features, and skin tone faithfully.",
    );
    if let Some(hair) = non_empty(hair_style) {
        prompt.push_str(" Hair styled as: ");
        prompt.push_str(hair);
        prompt.push('.');
    }
    if let Some(makeup) = non_empty(makeup_style) {
        prompt.push_str(" Makeup: ");
        prompt.push_str(makeup);
        prompt.push('.');
    }
    prompt
}

/// Prompt for composing a studio body shot from a body photo (first image)
/// and a headshot (second image). The proportion constraint is part of the
/// fixed template text.
pub fn body_shot_prompt() -> &'static str {
    "Create a full-body studio photo of a single model. Use the FIRST image \
     for the body: pose, build, and proportions. Use the SECOND image for \
     the face and identity. Keep anatomical proportions realistic and \
     consistent with the first image: natural head-to-body ratio, limb \
     lengths, and posture; do not slim, elongate, or otherwise alter the \
     body. Neutral fitted base clothing, plain light studio background, \
     even lighting, full figure visible head to toe."
}

/// Prompt for synthesizing the intermediate mannequin image in the staged
/// pipeline: every image in the request is a garment or accessory.
pub fn mannequin_prompt() -> &'static str {
    "Dress a single featureless gray display mannequin in ALL of the \
     garments and accessories shown in these photos, layered together as \
     one coherent outfit. Plain white studio background, even lighting, \
     full mannequin visible head to toe. Preserve each garment's true \
     color, texture, and shape."
}

/// Prompt for the final outfit composite.
///
/// `staged` selects the wording for the two input layouts: staged renders
/// carry {body, mannequin outfit, headshot}, direct renders carry
/// {body, headshot, item images…}. `style_notes` is caller free text
/// (scene, mood) appended at the end.
pub fn outfit_render_prompt(staged: bool, style_notes: Option<&str>) -> String {
    let mut prompt = String::from(if staged {
        "Create a photorealistic full-body photo of one model wearing a \
         complete outfit. Use the FIRST image for the body, pose, and \
         proportions. The SECOND image shows the complete outfit on a \
         mannequin: transfer every garment and accessory from it onto the \
         model, fitted naturally. Use the THIRD image for the face and \
         identity."
    } else {
        "Create a photorealistic full-body photo of one model wearing a \
         complete outfit. Use the FIRST image for the body, pose, and \
         proportions. Use the SECOND image for the face and identity. \
         Dress the model in ALL of the garments and accessories shown in \
         the remaining images, layered together as one coherent outfit, \
         preserving each item's true color, texture, and shape."
    });
    prompt.push_str(
        " Keep anatomical proportions realistic and faithful to the body \
         image. Full figure visible head to toe.",
    );
    if let Some(notes) = non_empty(style_notes) {
        prompt.push_str(" Scene and styling: ");
        prompt.push_str(notes);
        prompt.push('.');
    }
    prompt
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagging_prompt_lists_canonical_categories() {
        let prompt = tagging_prompt(&["Tops", "Bottoms"], None);
        assert!(prompt.contains("Tops, Bottoms"));
        assert!(!prompt.contains("filed this item under"));
    }

    #[test]
    fn tagging_prompt_includes_context() {
        let prompt = tagging_prompt(&["Tops"], Some("Shirts"));
        assert!(prompt.contains("The owner filed this item under: Shirts."));
    }

    #[test]
    fn headshot_prompt_without_modifiers_is_fixed_template() {
        let prompt = headshot_prompt(None, None);
        assert!(!prompt.contains("Hair styled as"));
        assert!(!prompt.contains("Makeup:"));
    }

    #[test]
    fn headshot_prompt_merges_modifiers() {
        let prompt = headshot_prompt(Some("loose waves"), Some("natural glam"));
        assert!(prompt.contains("Hair styled as: loose waves."));
        assert!(prompt.contains("Makeup: natural glam."));
    }

    #[test]
    fn headshot_prompt_skips_blank_modifiers() {
        let prompt = headshot_prompt(Some("  "), None);
        assert!(!prompt.contains("Hair styled as"));
    }

    #[test]
    fn body_shot_prompt_carries_proportion_constraint() {
        assert!(body_shot_prompt().contains("anatomical proportions"));
    }

    #[test]
    fn outfit_prompt_staged_references_mannequin() {
        let prompt = outfit_render_prompt(true, None);
        assert!(prompt.contains("mannequin"));
    }

    #[test]
    fn outfit_prompt_direct_references_remaining_images() {
        let prompt = outfit_render_prompt(false, Some("rooftop at dusk"));
        assert!(prompt.contains("remaining images"));
        assert!(prompt.contains("Scene and styling: rooftop at dusk."));
    }
}
