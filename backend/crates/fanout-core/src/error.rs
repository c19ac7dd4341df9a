use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FanoutError {
    #[error("Subscriber identity space exhausted: {active} active of {id_space} ids {location}")]
    IdentitySpaceExhausted {
        active: usize,
        id_space: u64,
        location: ErrorLocation,
    },

    #[error("Invalid queue capacity {capacity}, must be at least 1 {location}")]
    InvalidCapacity {
        capacity: usize,
        location: ErrorLocation,
    },
}

impl FanoutError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::IdentitySpaceExhausted { .. } => "IDENTITY_SPACE_EXHAUSTED",
            Self::InvalidCapacity { .. } => "INVALID_CAPACITY",
        }
    }
}

pub type Result<T> = std::result::Result<T, FanoutError>;
