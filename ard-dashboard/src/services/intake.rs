//! File intake validation
//!
//! Pure classification of a submitted file: accepted, too large, or of an
//! unsupported type. Callers surface the rejection and must not start an
//! upload for a rejected file.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::IntakeConfig;
use crate::models::UploadedFile;

/// Rejection reason
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("File too large: {size_bytes} bytes exceeds the {max_bytes} byte limit")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("Unsupported file type: {media_type:?}")]
    UnsupportedType { media_type: String },
}

impl IntakeError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            IntakeError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
        }
    }

    /// Notification title
    pub fn title(&self) -> &'static str {
        match self {
            IntakeError::FileTooLarge { .. } => "File too large",
            IntakeError::UnsupportedType { .. } => "Invalid file type",
        }
    }

    /// Notification description
    pub fn description(&self) -> String {
        match self {
            IntakeError::FileTooLarge { max_bytes, .. } => {
                format!("Maximum file size is {}", format_limit(*max_bytes))
            }
            IntakeError::UnsupportedType { .. } => {
                "Please upload a supported file format".to_string()
            }
        }
    }
}

/// One entry of the accepted-type list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedType {
    /// Full media type, e.g. `application/pdf`
    Exact(String),
    /// Type category, from `image/*` or a bare `image`
    Category(String),
}

/// Parsed accepted-type list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptList {
    entries: Vec<AcceptedType>,
}

impl AcceptList {
    /// Parse the HTML `accept` attribute form: `"image/*,application/pdf,text/plain"`
    pub fn parse(accept: &str) -> Self {
        let mut entries = Vec::new();
        for raw in accept.split(',') {
            let token = raw.trim().to_ascii_lowercase();
            if token.is_empty() {
                continue;
            }
            if token.starts_with('.') {
                warn!(entry = %token, "Extension entries are not supported in accepted types, ignoring");
                continue;
            }
            let entry = match token.split_once('/') {
                Some((category, "*")) => AcceptedType::Category(category.to_string()),
                Some(_) => AcceptedType::Exact(token),
                None => AcceptedType::Category(token),
            };
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[AcceptedType] {
        &self.entries
    }

    /// Normalized form for an `<input type="file" accept=...>` attribute
    pub fn to_accept_attribute(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry {
                AcceptedType::Exact(media_type) => media_type.clone(),
                AcceptedType::Category(name) => format!("{}/*", name),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Full type listed, or its category listed (exact tokens only)
    pub fn matches(&self, file: &UploadedFile) -> bool {
        let essence = file.essence();
        if essence.is_empty() {
            return false;
        }
        let category = file.category();
        self.entries.iter().any(|entry| match entry {
            AcceptedType::Exact(media_type) => *media_type == essence,
            AcceptedType::Category(name) => *name == category,
        })
    }
}

/// File intake validator
#[derive(Debug, Clone)]
pub struct FileIntake {
    max_file_size_bytes: u64,
    accepted: AcceptList,
}

impl FileIntake {
    pub fn new(max_file_size_bytes: u64, accepted: AcceptList) -> Self {
        Self {
            max_file_size_bytes,
            accepted,
        }
    }

    pub fn from_config(config: &IntakeConfig) -> Self {
        Self::new(
            config.max_file_size_bytes,
            AcceptList::parse(&config.accepted_types),
        )
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    pub fn accepted(&self) -> &AcceptList {
        &self.accepted
    }

    /// Size first, then type; the file is handed back unchanged when accepted
    pub fn validate(&self, file: UploadedFile) -> Result<UploadedFile, IntakeError> {
        if file.size_bytes > self.max_file_size_bytes {
            debug!(file = %file.name, size = file.size_bytes, "Intake rejected: too large");
            return Err(IntakeError::FileTooLarge {
                size_bytes: file.size_bytes,
                max_bytes: self.max_file_size_bytes,
            });
        }

        if !self.accepted.matches(&file) {
            debug!(file = %file.name, media_type = %file.media_type, "Intake rejected: unsupported type");
            return Err(IntakeError::UnsupportedType {
                media_type: file.media_type.clone(),
            });
        }

        Ok(file)
    }
}

impl Default for FileIntake {
    fn default() -> Self {
        Self::from_config(&IntakeConfig::default())
    }
}

/// Human-readable size limit: whole megabytes print as `10MB`
fn format_limit(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else if bytes >= 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{} bytes", bytes)
    }
}
