use thiserror::Error;

/// Errors raised while composing a needy component.
///
/// Rendering itself never fails through this type; these are all caught
/// when the component is put together.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NeedsError {
    /// Metadata keys must not be empty.
    #[error("metadata key must not be empty")]
    EmptyMetadataKey,
    /// The key is used by the component itself and cannot carry metadata.
    #[error("metadata key `{0}` is reserved")]
    ReservedMetadataKey(String),
}
