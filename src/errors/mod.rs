mod categories;
mod error;
mod mapping;

pub use categories::{
    AuthenticationError, ConfigurationError, DecodeError, JobError, NetworkError,
    NotFoundError, ValidationError,
};
pub use error::{FoundryError, FoundryResult};
pub use mapping::{ErrorMapper, ServiceErrorDetail, ServiceErrorResponse};
