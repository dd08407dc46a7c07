//! Fabric validation errors.

/// Errors raised while validating fabric parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FabricError {
    /// A parameter is out of its allowed range, or the inputs contradict
    /// each other independently of fabric size
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Parameters are individually valid but the fabric they describe does
    /// not fit in the available ports, AS numbers or address space
    #[error("Capacity error: {0}")]
    Capacity(String),
}

impl FabricError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, FabricError::Configuration(_))
    }

    pub fn is_capacity(&self) -> bool {
        matches!(self, FabricError::Capacity(_))
    }

    /// The bare message, without the error class prefix
    pub fn message(&self) -> &str {
        match self {
            FabricError::Configuration(msg) | FabricError::Capacity(msg) => msg,
        }
    }
}
