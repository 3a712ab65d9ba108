use user_settings_sdk::PageRequestError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("A new userSettings cannot already have an ID")]
    IdExists,

    #[error("User settings not found: {id}")]
    NotFound { id: i64 },

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("Search index error: {0}")]
    SearchIndex(anyhow::Error),
}

impl DomainError {
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<PageRequestError> for DomainError {
    fn from(e: PageRequestError) -> Self {
        let field = match &e {
            PageRequestError::UnknownSortProperty(_) => "sort",
            PageRequestError::InvalidNumber { param, .. } => *param,
        };
        Self::validation(field, e.to_string())
    }
}
