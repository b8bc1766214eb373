use crate::errors::ConfigError;

/// Groq-hosted chat models offered to the user, default first.
pub const ALLOWED_MODELS: &[&str] = &[
    "llama-3.1-8b-instant",
    "llama-3.1-70b-versatile",
    "mixtral-8x7b-32768",
];

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

pub fn is_allowed(model: &str) -> bool {
    ALLOWED_MODELS.contains(&model)
}

pub fn ensure_allowed(model: &str) -> Result<(), ConfigError> {
    if is_allowed(model) {
        Ok(())
    } else {
        Err(ConfigError::UnknownModel {
            model: model.to_string(),
            allowed: ALLOWED_MODELS.to_vec(),
        })
    }
}
