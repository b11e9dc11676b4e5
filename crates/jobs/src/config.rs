//! Pipeline tunables.

/// Default model for image generation and composition calls.
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default model for structured-text calls (tagging).
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Hard cap the generation model enforces on input images per call,
/// counted over item images only. Above it, outfit renders go through the
/// staged mannequin pipeline.
const DEFAULT_MODEL_INPUT_CEILING: usize = 7;

/// Configuration shared by all processors.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub image_model: String,
    pub text_model: String,
    pub model_input_ceiling: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            model_input_ceiling: DEFAULT_MODEL_INPUT_CEILING,
        }
    }
}

impl PipelineConfig {
    /// Read overrides from the environment: `ATTIRE_IMAGE_MODEL`,
    /// `ATTIRE_TEXT_MODEL`, `ATTIRE_MODEL_INPUT_CEILING`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            image_model: std::env::var("ATTIRE_IMAGE_MODEL").unwrap_or(defaults.image_model),
            text_model: std::env::var("ATTIRE_TEXT_MODEL").unwrap_or(defaults.text_model),
            model_input_ceiling: std::env::var("ATTIRE_MODEL_INPUT_CEILING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.model_input_ceiling),
        }
    }
}
