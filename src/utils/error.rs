use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolboxError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Directory '{path}' not found")]
    DirectoryNotFound { path: String },

    #[error("'{path}' is not a directory")]
    NotADirectory { path: String },

    #[error("File '{path}' not found")]
    FileNotFound { path: String },

    #[error("Name conflict on '{target}': {reason}")]
    NameConflict { target: String, reason: String },

    #[error("Invalid PDF '{path}': {reason}")]
    InvalidPdf { path: String, reason: String },

    #[error("File '{path}' is not valid UTF-8 text")]
    Encoding { path: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    #[error("Nothing to do: {message}")]
    NothingToDo { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Input,
    Processing,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度對應的程序退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl ToolboxError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolboxError::ConfigError { .. }
            | ToolboxError::ConfigValidationError { .. }
            | ToolboxError::InvalidConfigValueError { .. }
            | ToolboxError::NothingToDo { .. } => ErrorCategory::Configuration,
            ToolboxError::IoError(_)
            | ToolboxError::DirectoryNotFound { .. }
            | ToolboxError::NotADirectory { .. }
            | ToolboxError::FileNotFound { .. }
            | ToolboxError::NameConflict { .. } => ErrorCategory::FileSystem,
            ToolboxError::InvalidPdf { .. }
            | ToolboxError::Encoding { .. }
            | ToolboxError::ValidationError { .. } => ErrorCategory::Input,
            ToolboxError::PdfError(_) | ToolboxError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            ToolboxError::CsvError(_) | ToolboxError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ToolboxError::NothingToDo { .. } => ErrorSeverity::Low,
            ToolboxError::NameConflict { .. } => ErrorSeverity::Medium,
            ToolboxError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ToolboxError::ConfigError { .. } | ToolboxError::ConfigValidationError { .. } => {
                "Check the TOML configuration file for syntax errors"
            }
            ToolboxError::InvalidConfigValueError { .. } => {
                "Fix the offending option on the command line or in the config file"
            }
            ToolboxError::DirectoryNotFound { .. } | ToolboxError::NotADirectory { .. } => {
                "Pass an existing directory path"
            }
            ToolboxError::FileNotFound { .. } => "Check that the input path exists and is readable",
            ToolboxError::NameConflict { .. } => {
                "Choose a different prefix/suffix or output name, or pass --overwrite where supported"
            }
            ToolboxError::InvalidPdf { .. } | ToolboxError::PdfError(_) => {
                "Make sure every input is a valid, unencrypted PDF document"
            }
            ToolboxError::Encoding { .. } => "Convert the file to UTF-8 before analyzing it",
            ToolboxError::ValidationError { .. } => "Review the command arguments with --help",
            ToolboxError::NothingToDo { .. } => "Pass --prefix, --suffix or --numbered",
            ToolboxError::IoError(_) => "Check file permissions and available disk space",
            ToolboxError::ProcessingError { .. } => "Re-run with --verbose for more detail",
            ToolboxError::CsvError(_) | ToolboxError::SerializationError(_) => {
                "Try another report format such as --format text"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::FileSystem => format!("File system problem: {}", self),
            ErrorCategory::Input => format!("Input problem: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
            ErrorCategory::Serialization => format!("Could not write report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_exit_codes() {
        let nothing = ToolboxError::NothingToDo {
            message: "no changes".to_string(),
        };
        assert_eq!(nothing.severity(), ErrorSeverity::Low);
        assert_eq!(nothing.severity().exit_code(), 0);

        let conflict = ToolboxError::NameConflict {
            target: "a.txt".to_string(),
            reason: "exists".to_string(),
        };
        assert_eq!(conflict.severity().exit_code(), 2);

        let missing = ToolboxError::DirectoryNotFound {
            path: "./nope".to_string(),
        };
        assert_eq!(missing.severity().exit_code(), 1);
        assert_eq!(missing.category(), ErrorCategory::FileSystem);

        let io = ToolboxError::from(std::io::Error::other("disk full"));
        assert_eq!(io.severity().exit_code(), 3);
    }

    #[test]
    fn test_user_friendly_message_mentions_path() {
        let err = ToolboxError::Encoding {
            path: "notes.bin".to_string(),
        };
        let message = err.user_friendly_message();
        assert!(message.starts_with("Input problem"));
        assert!(message.contains("notes.bin"));
    }
}
