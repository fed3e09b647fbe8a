//! Error types for the NDB sector format.
//!
//! Encoding is strict: every size invariant is checked before any byte is
//! laid out, and violations surface as a [`SectorEncodingError`]. Decoding
//! never fails on its own; only chain traversal and the opt-in validation
//! helpers report [`Error::Corruption`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The result type used throughout NDB.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for NDB operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A record violated a size invariant of the sector layout.
    #[error(transparent)]
    SectorEncoding(#[from] SectorEncodingError),

    /// Data corruption was detected while walking or validating sectors.
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// A sector address could not be resolved by the sector source.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Creates a new corruption error.
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }

    /// Creates a new not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Returns the encoding error kind, if this is an encoding failure.
    pub fn encoding_kind(&self) -> Option<EncodingErrorKind> {
        match self {
            Error::SectorEncoding(e) => Some(e.kind),
            _ => None,
        }
    }
}

/// Kinds of encoding failures, each carrying its own message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingErrorKind {
    /// The title does not fit in a head sector.
    TitleByteOverflow,
    /// The content does not fit in the space left after the title (or in a tail sector).
    ContentByteOverflow,
    /// The descriptor comment exceeds its 64-byte slot.
    CommentByteOverflow,
    /// A sector size outside the supported set was supplied.
    InvalidSectorSize,
}

impl EncodingErrorKind {
    /// Returns the `(message, details)` templates for this kind.
    ///
    /// `%0`, `%1`, ... are replaced positionally by the error's template values.
    pub fn templates(self) -> (&'static str, &'static str) {
        match self {
            EncodingErrorKind::TitleByteOverflow => (
                "Title is %0 bytes long, the maximum is %1 bytes",
                "A %2-byte head sector reserves 64 bytes of metadata, leaving %1 bytes for the title.",
            ),
            EncodingErrorKind::ContentByteOverflow => (
                "Content is %0 bytes long, only %1 bytes are available",
                "The remaining space of a %2-byte sector after metadata and title is %1 bytes.",
            ),
            EncodingErrorKind::CommentByteOverflow => (
                "Descriptor comment is %0 bytes long, the maximum is %1 bytes",
                "The comment slot of the descriptor sector is a fixed %1-byte region.",
            ),
            EncodingErrorKind::InvalidSectorSize => (
                "Invalid sector size %0",
                "Sector sizes must be a power of two between 512 and 65536 bytes.",
            ),
        }
    }
}

/// Structured sector encoding failure.
///
/// `message` and `details` are stored already interpolated; the raw
/// template values are kept alongside for structured consumers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SectorEncodingError {
    /// What went wrong.
    pub kind: EncodingErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Optional longer explanation.
    pub details: Option<String>,
    /// Positional values substituted into the message and details.
    pub templates: Vec<String>,
}

impl SectorEncodingError {
    /// Builds an error from the kind's own templates.
    pub fn new(kind: EncodingErrorKind, templates: &[&dyn fmt::Display]) -> Self {
        let (message, details) = kind.templates();
        Self::with_message(kind, message, Some(details), templates)
    }

    /// Builds an error with a caller-supplied message and optional details.
    pub fn with_message(
        kind: EncodingErrorKind,
        message: &str,
        details: Option<&str>,
        templates: &[&dyn fmt::Display],
    ) -> Self {
        let templates: Vec<String> = templates.iter().map(|t| t.to_string()).collect();
        Self {
            kind,
            message: interpolate(message, &templates),
            details: details.map(|d| interpolate(d, &templates)),
            templates,
        }
    }

    /// Renders a full report through the given painter.
    pub fn render(&self, painter: &dyn Painter) -> String {
        let mut out = format!("{}: {}", painter.name("SectorEncodingError"), self.message);
        if let Some(details) = &self.details {
            out.push_str("\n\nDetails:\n");
            out.push_str(&painter.details(details));
        }
        out
    }
}

/// Replaces every `%i` in `text` with `templates[i]`, in index order.
pub fn interpolate(text: &str, templates: &[String]) -> String {
    let mut out = text.to_string();
    for (i, value) in templates.iter().enumerate() {
        out = out.replace(&format!("%{}", i), value);
    }
    out
}

/// Presentation hook for error reports.
pub trait Painter {
    /// Styles the error name.
    fn name(&self, text: &str) -> String;

    /// Styles the details block.
    fn details(&self, text: &str) -> String;
}

/// Leaves text untouched. Use for logs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn name(&self, text: &str) -> String {
        text.to_string()
    }

    fn details(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Colors the report with ANSI escapes for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPainter;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";

impl Painter for AnsiPainter {
    fn name(&self, text: &str) -> String {
        format!("{}{}{}", RED, text, RESET)
    }

    fn details(&self, text: &str) -> String {
        format!("{}{}{}", BLUE, text, RESET)
    }
}
