use std::fmt;

/// Result alias used across the drawing contract.
pub type RenderResult<T> = Result<T, RenderError>;

/// Coarse error category, for callers that only need to branch on the taxonomy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Construction,
    Decode,
    State,
    Unsupported,
}

/// Misuse of the save/restore protocol.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StateError {
    /// `restore` was called while only the default state remained.
    UnbalancedRestore,
    /// `save` would exceed the backend's nesting limit.
    DepthExceeded { limit: usize },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::UnbalancedRestore => f.write_str("restore called without a matching save"),
            StateError::DepthExceeded { limit } => {
                write!(f, "save nesting exceeds the limit of {limit}")
            }
        }
    }
}

/// Error reported by any operation of the drawing contract.
///
/// None of these are fatal: the renderer stays usable and its state stack is left
/// exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Invalid numeric argument to a geometry primitive or style.
    Construction { what: &'static str, message: String },
    /// Image payload the backend cannot interpret.
    Decode { message: String },
    /// Save/restore protocol violation.
    State(StateError),
    /// The backend declines a capability implied by the data model.
    Unsupported { feature: &'static str },
}

impl RenderError {
    pub fn construction(what: &'static str, message: impl Into<String>) -> Self {
        Self::Construction { what, message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    pub fn unsupported(feature: &'static str) -> Self {
        Self::Unsupported { feature }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::Construction { .. } => ErrorKind::Construction,
            RenderError::Decode { .. } => ErrorKind::Decode,
            RenderError::State(_) => ErrorKind::State,
            RenderError::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }
}

impl From<StateError> for RenderError {
    fn from(err: StateError) -> Self {
        RenderError::State(err)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Construction { what, message } => {
                write!(f, "invalid {what}: {message}")
            }
            RenderError::Decode { message } => write!(f, "image decode failed: {message}"),
            RenderError::State(err) => write!(f, "state error: {err}"),
            RenderError::Unsupported { feature } => {
                write!(f, "unsupported by this backend: {feature}")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Rejects non-finite values for a geometry primitive.
pub(crate) fn ensure_finite(what: &'static str, values: &[f32]) -> RenderResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RenderError::construction(what, format!("non-finite argument in {values:?}")))
    }
}

/// Rejects negative (or non-finite) extents such as width, height or radius.
pub(crate) fn ensure_non_negative(what: &'static str, name: &str, value: f32) -> RenderResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RenderError::construction(what, format!("{name} must be a non-negative number, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(RenderError::decode("x").kind(), ErrorKind::Decode);
        assert_eq!(RenderError::unsupported("x").kind(), ErrorKind::Unsupported);
        assert_eq!(RenderError::construction("rect", "x").kind(), ErrorKind::Construction);
        assert_eq!(RenderError::from(StateError::UnbalancedRestore).kind(), ErrorKind::State);
    }

    #[test]
    fn display_names_the_primitive() {
        let err = ensure_non_negative("rect", "width", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid rect: width must be a non-negative number, got -1");
    }

    #[test]
    fn finite_check_rejects_nan() {
        assert!(ensure_finite("move_to", &[0.0, 1.0]).is_ok());
        assert!(ensure_finite("move_to", &[f32::NAN, 1.0]).is_err());
        assert!(ensure_finite("move_to", &[0.0, f32::INFINITY]).is_err());
    }
}
