//! Descriptor sector.
//!
//! The descriptor is always the first 512 bytes of a database file and is
//! laid out identically for every sector size, so the configured size can be
//! discovered before any head or tail sector is parsed.
//!
//! Format:
//! ```text
//! [sector_size: u16]   // 65536 is stored as 0
//! [timestamp: u32]     // database creation time (UNIX seconds)
//! [v_major: u8]
//! [v_minor: u8]
//! [v_patch: u8]
//! [comment: 64 bytes]  // UTF-8, zero padded
//! [zero padding to 512 bytes]
//! ```

use crate::config::SectorSize;
use crate::encoding::{self, read_string, read_uint16, read_uint32, read_uint8};
use crate::error::{EncodingErrorKind, Result, SectorEncodingError};
use crate::sector::{unix_now, COMMENT_SIZE, DESCRIPTOR_SIZE};
use bytes::{BufMut, Bytes, BytesMut};

const SECTOR_SIZE_OFFSET: usize = 0;
const TIMESTAMP_OFFSET: usize = 2;
const V_MAJOR_OFFSET: usize = 6;
const V_MINOR_OFFSET: usize = 7;
const V_PATCH_OFFSET: usize = 8;
const COMMENT_OFFSET: usize = 9;

/// File-format metadata stored in the first sector of a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSector {
    /// Sector size in bytes, as stored. Use [`DescriptorSector::sector_size`]
    /// for a validated value.
    pub sector_size: u32,
    /// Database creation time (UNIX seconds)
    pub timestamp: u32,
    /// Major format version
    pub v_major: u8,
    /// Minor format version
    pub v_minor: u8,
    /// Patch format version
    pub v_patch: u8,
    /// Free-text identifier that survives file renames
    pub comment: Option<String>,
}

impl DescriptorSector {
    /// Creates a descriptor stamped with the current time and crate version.
    pub fn new(sector_size: SectorSize, comment: Option<String>) -> Self {
        let version = |v: &str| v.parse::<u8>().unwrap_or(0);
        Self {
            sector_size: sector_size.bytes(),
            timestamp: unix_now(),
            v_major: version(env!("CARGO_PKG_VERSION_MAJOR")),
            v_minor: version(env!("CARGO_PKG_VERSION_MINOR")),
            v_patch: version(env!("CARGO_PKG_VERSION_PATCH")),
            comment,
        }
    }

    /// Returns the stored sector size if it is a supported one.
    pub fn sector_size(&self) -> Result<SectorSize> {
        Ok(SectorSize::try_from(self.sector_size)?)
    }

    /// Returns `(major, minor, patch)`.
    pub fn version(&self) -> (u8, u8, u8) {
        (self.v_major, self.v_minor, self.v_patch)
    }
}

/// Encodes a descriptor into exactly [`DESCRIPTOR_SIZE`] bytes.
pub fn encode_descriptor(data: &DescriptorSector) -> Result<Bytes> {
    let sector_size = data.sector_size()?;
    let comment = data.comment.as_deref().unwrap_or("");
    if comment.len() > COMMENT_SIZE {
        return Err(SectorEncodingError::new(
            EncodingErrorKind::CommentByteOverflow,
            &[&comment.len(), &COMMENT_SIZE],
        )
        .into());
    }

    let mut buf = BytesMut::with_capacity(DESCRIPTOR_SIZE);
    buf.put(encoding::uint16(sector_size.to_raw()));
    buf.put(encoding::uint32(data.timestamp));
    buf.put(encoding::uint8(data.v_major));
    buf.put(encoding::uint8(data.v_minor));
    buf.put(encoding::uint8(data.v_patch));
    buf.put(encoding::string(comment));
    encoding::pad_to(&mut buf, COMMENT_OFFSET + COMMENT_SIZE);
    encoding::fit_to(&mut buf, DESCRIPTOR_SIZE);

    log::debug!(
        "Encoded descriptor: sector_size={}, version={}.{}.{}",
        sector_size,
        data.v_major,
        data.v_minor,
        data.v_patch
    );
    Ok(buf.freeze())
}

/// Decodes a descriptor. Never fails; short buffers read as zero.
pub fn decode_descriptor(data: &[u8]) -> DescriptorSector {
    let comment = read_string(data, COMMENT_OFFSET, COMMENT_OFFSET + COMMENT_SIZE);
    DescriptorSector {
        sector_size: SectorSize::raw_to_bytes(read_uint16(data, SECTOR_SIZE_OFFSET)),
        timestamp: read_uint32(data, TIMESTAMP_OFFSET),
        v_major: read_uint8(data, V_MAJOR_OFFSET),
        v_minor: read_uint8(data, V_MINOR_OFFSET),
        v_patch: read_uint8(data, V_PATCH_OFFSET),
        comment: (!comment.is_empty()).then_some(comment),
    }
}
