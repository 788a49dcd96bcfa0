//! Runtime settings for the `relplace` binary.
//!
//! Values come from the environment (a `.env` file is loaded first) and are
//! overridden by command-line flags.

use crate::error::AppError;
use crate::placement::{EngineOptions, ValidationMode};

pub const VALIDATION_VAR: &str = "RELPLACE_VALIDATION";
pub const FORMAT_VAR: &str = "RELPLACE_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub validation: ValidationMode,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; missing keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut settings = Settings::default();
        if let Some(value) = lookup(VALIDATION_VAR) {
            settings.validation = parse_validation(&value)?;
        }
        if let Some(value) = lookup(FORMAT_VAR) {
            settings.format = parse_format(&value)?;
        }
        Ok(settings)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            validation: self.validation,
        }
    }
}

pub fn parse_validation(value: &str) -> Result<ValidationMode, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(ValidationMode::Strict),
        "permissive" => Ok(ValidationMode::Permissive),
        other => Err(AppError::Config(format!(
            "validation must be \"strict\" or \"permissive\", got \"{}\"",
            other
        ))),
    }
}

pub fn parse_format(value: &str) -> Result<OutputFormat, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        other => Err(AppError::Config(format!(
            "format must be \"table\" or \"json\", got \"{}\"",
            other
        ))),
    }
}
