use thiserror::Error;

#[derive(Debug, Error)]
pub enum WpMobileError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Preference store error: {0}")]
    PreferenceError(String),

    #[error("Analytics error: {0}")]
    AnalyticsError(String),

    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WpMobileError>;

impl WpMobileError {
    /// Returns a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigError(reason) => format!("Configuration error: {}", reason),
            Self::PreferenceError(reason) => format!("Could not access preferences: {}", reason),
            Self::AnalyticsError(reason) => format!("Could not record analytics: {}", reason),
            Self::UnknownVariant(value) => {
                format!("Unknown variant '{}', expected 'dashboard' or 'site_menu'", value)
            }
            _ => self.to_string(),
        }
    }
}
