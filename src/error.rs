//! Error handling for psudohash

use thiserror::Error;

/// Every failure the generator can report, from flag parsing to output writes
#[derive(Error, Debug, Clone)]
pub enum PsudohashError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to write mutation output: {message}")]
    SinkWrite {
        message: String,
        path: Option<String>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl PsudohashError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a sink write error
    pub fn sink_write(message: impl Into<String>, path: Option<String>) -> Self {
        Self::SinkWrite {
            message: message.into(),
            path,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Message for the terminal, with a hint on how to fix the input
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your config file and padding/numbering options", message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::SinkWrite { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ Output write failed{}: {}\n💡 Check free disk space and permissions", path_info, message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 Config files must be valid JSON", message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
        }
    }
}

impl From<serde_json::Error> for PsudohashError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for PsudohashError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

pub type Result<T> = std::result::Result<T, PsudohashError>;

/// Shorthand for formatted config and validation errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::PsudohashError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PsudohashError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::PsudohashError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PsudohashError::validation(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_build_variants() {
        let err = config_error!("level {} is invalid", 0);
        assert!(matches!(err, PsudohashError::Config { .. }));
        assert!(err.to_string().contains("level 0 is invalid"));

        let err = validation_error!("bad keyword");
        assert!(matches!(err, PsudohashError::Validation { .. }));
    }

    #[test]
    fn test_sink_write_user_message() {
        let msg = PsudohashError::sink_write("disk full", Some("out.txt".into())).user_message();
        assert!(msg.contains("out.txt"));
    }
}
