use thiserror::Error;
use uuid::Uuid;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation failed for `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("cottage {cottage_id} is unavailable for the requested dates (conflicts with booking {booking_id})")]
    Conflict { cottage_id: Uuid, booking_id: Uuid },
    #[error("booking not found: {0}")]
    BookingNotFound(Uuid),
    #[error("cottage not found: {0}")]
    CottageNotFound(Uuid),
    #[error("tariff not found: {0}")]
    TariffNotFound(Uuid),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(String),
}

impl CoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }
}
