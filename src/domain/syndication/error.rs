use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SyndicationError {
    #[error("invalid value for parameter '{0}'")]
    InvalidRequest(&'static str),
    #[error("account not found")]
    AccountNotFound,
    #[error("video listing unavailable: {0}")]
    ListingUnavailable(String),
    #[error("feed rendering failed: {0}")]
    Render(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SyndicationError> for AppError {
    fn from(err: SyndicationError) -> Self {
        match err {
            SyndicationError::InvalidRequest(field) => {
                AppError::BadRequest(format!("invalid value for parameter '{}'", field))
            }
            SyndicationError::AccountNotFound => AppError::NotFound("Account not found".to_string()),
            SyndicationError::ListingUnavailable(msg) => AppError::ExternalService(msg),
            SyndicationError::Render(msg) => AppError::Internal(msg),
            SyndicationError::Dependency(msg) => AppError::Internal(msg),
            SyndicationError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
