//! Configuration options for the NDB sector format.

use crate::error::{EncodingErrorKind, SectorEncodingError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported sector sizes.
///
/// Fixed for the lifetime of a database and recorded in the descriptor sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum SectorSize {
    /// 512 bytes
    S512 = 512,
    /// 1KB
    S1K = 1024,
    /// 2KB
    S2K = 2048,
    /// 4KB
    S4K = 4096,
    /// 8KB
    S8K = 8192,
    /// 16KB
    S16K = 16384,
    /// 32KB
    S32K = 32768,
    /// 64KB
    S64K = 65536,
}

impl SectorSize {
    /// Every supported size, smallest first.
    pub const ALL: [SectorSize; 8] = [
        SectorSize::S512,
        SectorSize::S1K,
        SectorSize::S2K,
        SectorSize::S4K,
        SectorSize::S8K,
        SectorSize::S16K,
        SectorSize::S32K,
        SectorSize::S64K,
    ];

    /// Size in bytes.
    pub fn bytes(self) -> u32 {
        self as u32
    }

    /// Size in bytes as `usize`.
    pub fn as_usize(self) -> usize {
        self as u32 as usize
    }

    /// Value stored in the 16-bit descriptor field.
    ///
    /// 65536 does not fit in 16 bits and is stored as `0`.
    pub fn to_raw(self) -> u16 {
        match self {
            SectorSize::S64K => 0,
            other => other as u32 as u16,
        }
    }

    /// Inverse of [`SectorSize::to_raw`], widened to `u32`.
    pub fn raw_to_bytes(raw: u16) -> u32 {
        match raw {
            0 => SectorSize::S64K.bytes(),
            n => n as u32,
        }
    }

    /// Parses a 16-bit descriptor field.
    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::try_from(Self::raw_to_bytes(raw)).ok()
    }
}

impl Default for SectorSize {
    fn default() -> Self {
        SectorSize::S4K
    }
}

impl TryFrom<u32> for SectorSize {
    type Error = SectorEncodingError;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        SectorSize::ALL
            .into_iter()
            .find(|size| size.bytes() == value)
            .ok_or_else(|| SectorEncodingError::new(EncodingErrorKind::InvalidSectorSize, &[&value]))
    }
}

impl fmt::Display for SectorSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// Configuration for the sector codec and chain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Sector size used for head and tail sectors.
    /// Default: 4KB
    pub sector_size: SectorSize,

    /// Strip multi-byte characters from titles before writing a chain.
    /// Default: true
    pub filter_titles: bool,

    /// Range-check length fields of every sector visited during traversal.
    /// Default: false
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { sector_size: SectorSize::default(), filter_titles: true, strict: false }
    }
}

impl Options {
    /// Creates a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sector size.
    pub fn sector_size(mut self, size: SectorSize) -> Self {
        self.sector_size = size;
        self
    }

    /// Sets whether titles are sanitized before encoding.
    pub fn filter_titles(mut self, value: bool) -> Self {
        self.filter_titles = value;
        self
    }

    /// Enables or disables strict traversal.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }
}
