/// Error types for the core crate.
///
/// Per-file extraction failures ([`ExtractError`]) are never fatal: the
/// dispatcher records them as skipped files. The remaining errors abort
/// the operation that raised them.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Classification of a file that produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    /// Not a DICOM container, or its structure could not be parsed.
    Format,
    /// The file could not be read.
    Io,
    /// The process lacks permission to read the file.
    Permission,
    /// Anything else (e.g. a decoder panic).
    Other,
}

impl SkipKind {
    /// All kinds in display order.
    pub const ALL: [SkipKind; 4] = [Self::Format, Self::Io, Self::Permission, Self::Other];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Io => "I/O",
            Self::Permission => "permission",
            Self::Other => "other",
        }
    }
}

/// Why a single file could not be turned into a record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{}: not a readable DICOM file: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    #[error("{}: I/O error: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: permission denied", path.display())]
    Permission { path: PathBuf },

    #[error("{}: {message}", path.display())]
    Other { path: PathBuf, message: String },
}

impl ExtractError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &std::path::Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::Permission {
                path: path.to_path_buf(),
            },
            io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => Self::Format {
                path: path.to_path_buf(),
                reason: source.to_string(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub fn kind(&self) -> SkipKind {
        match self {
            Self::Format { .. } => SkipKind::Format,
            Self::Io { .. } => SkipKind::Io,
            Self::Permission { .. } => SkipKind::Permission,
            Self::Other { .. } => SkipKind::Other,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Format { path, .. }
            | Self::Io { path, .. }
            | Self::Permission { path }
            | Self::Other { path, .. } => path,
        }
    }
}

/// Errors raised while resolving a tag schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown DICOM field `{0}` (expected a keyword such as PatientID or a tag like 0010,0020)")]
    UnknownField(String),

    #[error("field `{0}` is listed more than once")]
    DuplicateField(String),

    #[error("the tag schema must contain at least one field")]
    Empty,
}

/// Errors raised by a dispatch strategy as a whole.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to spawn extraction worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },

    #[error("extraction worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("failed to build rayon thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors raised while loading a scan configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
