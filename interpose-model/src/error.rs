use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Every failing field, in the order the model declares them.
    #[error("validation failures: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid check list: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid check list: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// The failing fields, if this is a validation error.
    pub fn failed_fields(&self) -> &[String] {
        match self {
            Self::Validation { fields } => fields,
            _ => &[],
        }
    }
}
