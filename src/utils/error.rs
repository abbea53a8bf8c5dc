use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("PDF generation error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("An export is already in progress")]
    ExportBusy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Io,
    Configuration,
    Input,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PickerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PickerError::HttpError(_) => ErrorCategory::Network,
            PickerError::CsvError(_)
            | PickerError::SerializationError(_)
            | PickerError::ProcessingError { .. } => ErrorCategory::Data,
            PickerError::IoError(_) => ErrorCategory::Io,
            PickerError::ConfigError { .. }
            | PickerError::ConfigValidationError { .. }
            | PickerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PickerError::MissingFieldError { .. }
            | PickerError::ValidationError { .. }
            | PickerError::ExportBusy => ErrorCategory::Input,
            PickerError::PdfError(_) => ErrorCategory::Document,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PickerError::ExportBusy => ErrorSeverity::Low,
            PickerError::HttpError(_)
            | PickerError::MissingFieldError { .. }
            | PickerError::ValidationError { .. } => ErrorSeverity::Medium,
            PickerError::CsvError(_)
            | PickerError::SerializationError(_)
            | PickerError::ProcessingError { .. }
            | PickerError::PdfError(_) => ErrorSeverity::High,
            PickerError::IoError(_)
            | PickerError::ConfigError { .. }
            | PickerError::ConfigValidationError { .. }
            | PickerError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PickerError::HttpError(_) => "Could not reach the product catalog".to_string(),
            PickerError::MissingFieldError { field } => {
                format!("Please fill in the required field: {}", field)
            }
            PickerError::ValidationError { message } => message.clone(),
            PickerError::PdfError(_) => "The order document could not be generated".to_string(),
            PickerError::ExportBusy => {
                "Another export is still running, please wait for it to finish".to_string()
            }
            PickerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the configured csv_url",
            ErrorCategory::Data => "Check that the CSV source has the expected header row",
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Input => "Review the order details and try again",
            ErrorCategory::Document => "Try again; if it keeps failing export the cart as CSV",
        }
    }
}

pub type Result<T> = std::result::Result<T, PickerError>;
