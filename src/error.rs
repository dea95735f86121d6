//! Crate-level error types.

use std::fmt;

/// Errors produced by the viewstate crate.
#[derive(Debug)]
pub enum ViewStateError {
    /// A controller was built with a default state it does not declare.
    MissingDefaultState {
        /// Name of the controller being built.
        controller: String,
        /// The undeclared default state.
        state: String,
    },
    /// A state name was used that the controller does not declare.
    UnknownState {
        /// Name of the controller that rejected the lookup.
        controller: String,
        /// The undeclared state.
        state: String,
    },
    /// A transition component could not be turned into a sub-animation.
    InvalidComponent {
        /// Property the component animates.
        property: String,
        /// Why the component was rejected.
        reason: String,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for ViewStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDefaultState { controller, state } => write!(
                f,
                "{controller} was created with a default state '{state}' \
                 that is not in its set of states"
            ),
            Self::UnknownState { controller, state } => {
                write!(f, "{controller} has no state named '{state}'")
            }
            Self::InvalidComponent { property, reason } => {
                write!(f, "invalid component for '{property}': {reason}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ViewStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewStateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_default_names_controller() {
        let err = ViewStateError::MissingDefaultState {
            controller: "TestController".to_owned(),
            state: "missing".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TestController"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_io_has_source() {
        let err: ViewStateError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
