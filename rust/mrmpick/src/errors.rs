use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum DataProcessingError {
    ExpectedSlicesSameLength {
        expected: usize,
        other: usize,
        context: String,
    },
    ExpectedNonEmptyData {
        context: Option<String>,
    },
    ExpectedFiniteNonNanData {
        context: String,
    },
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: String,
    },
}

impl DataProcessingError {
    pub fn append_to_context(mut self, context: &str) -> Self {
        match &mut self {
            DataProcessingError::ExpectedSlicesSameLength {
                context: owned_context,
                ..
            } => {
                owned_context.push_str(context);
            }
            DataProcessingError::ExpectedNonEmptyData {
                context: owned_context,
            } => match owned_context {
                Some(x) => x.push_str(context),
                None => *owned_context = Some(context.to_string()),
            },
            DataProcessingError::ExpectedFiniteNonNanData {
                context: owned_context,
            } => {
                owned_context.push_str(context);
            }
            DataProcessingError::IndexOutOfBounds {
                context: owned_context,
                ..
            } => {
                owned_context.push_str(context);
            }
        }
        self
    }
}

impl Display for DataProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataProcessingError::ExpectedSlicesSameLength {
                expected,
                other,
                context,
            } => write!(
                f,
                "Expected slices of the same length, got {} and {} ({})",
                expected, other, context
            ),
            DataProcessingError::ExpectedNonEmptyData { context } => match context {
                Some(context) => write!(f, "Expected non-empty data ({})", context),
                None => write!(f, "Expected non-empty data"),
            },
            DataProcessingError::ExpectedFiniteNonNanData { context } => {
                write!(f, "Expected finite, non-NaN data ({})", context)
            }
            DataProcessingError::IndexOutOfBounds {
                index,
                len,
                context,
            } => write!(
                f,
                "Index {} out of bounds for length {} ({})",
                index, len, context
            ),
        }
    }
}

/// Errors raised while validating a [`crate::PickerConfig`].
///
/// These are detected once, when the picker is built, never in the middle
/// of integrating a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotImplemented {
        option: &'static str,
        value: String,
    },
    InvalidValue {
        field: &'static str,
        msg: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotImplemented { option, value } => {
                write!(f, "Option {}={} is not implemented", option, value)
            }
            ConfigError::InvalidValue { field, msg } => {
                write!(f, "Invalid value for {}: {}", field, msg)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MrmPickError {
    DataProcessingError(DataProcessingError),
    ConfigError(ConfigError),
}

impl Display for MrmPickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MrmPickError::DataProcessingError(e) => write!(f, "Data processing error: {}", e),
            MrmPickError::ConfigError(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for DataProcessingError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for MrmPickError {}

pub type Result<T> = std::result::Result<T, MrmPickError>;

impl From<DataProcessingError> for MrmPickError {
    fn from(x: DataProcessingError) -> Self {
        Self::DataProcessingError(x)
    }
}

impl From<ConfigError> for MrmPickError {
    fn from(x: ConfigError) -> Self {
        Self::ConfigError(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_context() {
        let err = DataProcessingError::ExpectedNonEmptyData { context: None }
            .append_to_context("resampling");
        assert_eq!(
            err,
            DataProcessingError::ExpectedNonEmptyData {
                context: Some("resampling".to_string())
            }
        );
        let err = DataProcessingError::ExpectedSlicesSameLength {
            expected: 1,
            other: 2,
            context: "a".to_string(),
        }
        .append_to_context("b");
        assert_eq!(err.to_string(), "Expected slices of the same length, got 1 and 2 (ab)");
    }

    #[test]
    fn test_config_error_display() {
        let err: MrmPickError = ConfigError::NotImplemented {
            option: "background_subtraction",
            value: "smoothed".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Option background_subtraction=smoothed is not implemented"
        );
    }
}
