use crate::pipeline::ProcessingError;
use crate::registry::RegistryError;
use crate::transform::TransformError;
use crate::validation::ValidationError;
use crate::vocab::UnknownName;

/// Umbrella error for callers that mix layers: the builder, registry
/// application, and plan execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CraftError {
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error(transparent)]
    UnknownName(#[from] UnknownName),
}

impl From<ValidationError> for CraftError {
    fn from(err: ValidationError) -> Self {
        CraftError::Transform(TransformError::Validation(err))
    }
}
