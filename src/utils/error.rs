// Common error types for fadesort

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FadeSortError {
    /// A range bound lies past the end of the slice
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A range whose start comes after its end
    #[error("start({start}) > end({end})")]
    InvalidRange { start: usize, end: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Input that could not be turned into a sort key
    #[error("Parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, FadeSortError>;

/// An error rendered for the terminal, with an exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub message: String,
    pub suggestion: Option<String>,
    pub exit_code: i32,
}

impl UserError {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            exit_code,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Map a library error onto what the user should see
    pub fn from_fadesort_error(err: &FadeSortError) -> Self {
        match err {
            FadeSortError::IndexOutOfBounds { .. } | FadeSortError::InvalidRange { .. } => {
                Self::new(err.to_string(), 2)
            }
            FadeSortError::Io(io) => Self::new(format!("IO error: {io}"), 74)
                .with_suggestion("Check that the input exists and the output directory is writable."),
            FadeSortError::Config(_) => Self::new(err.to_string(), 78).with_suggestion(
                "Run 'fadesort config init --force' to regenerate a default fadesort.toml.",
            ),
            FadeSortError::Validation(_) => Self::new(err.to_string(), 64),
            FadeSortError::Parse { .. } => Self::new(err.to_string(), 65)
                .with_suggestion("Drop --numeric or narrow the key with --key <REGEX>."),
        }
    }

    /// Map any error, preferring a library error found in the chain
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<FadeSortError>() {
            Some(inner) => Self::from_fadesort_error(inner),
            None => Self::new(format!("{err:#}"), 1),
        }
    }

    pub fn print(&self) {
        eprintln!("Error: {}", self.message);
        if let Some(suggestion) = &self.suggestion {
            eprintln!("\n{suggestion}");
        }
    }
}

impl FadeSortError {
    pub fn config(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {err}", path.display()))
    }

    pub fn parse(source: Option<&Path>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string()),
            line,
            message: message.into(),
        }
    }
}
