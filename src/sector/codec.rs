//! Sector codec bound to a configured sector size.

use crate::config::SectorSize;
use crate::error::Result;
use crate::sector::{DescriptorSector, Sector, SectorKind, HEAD_META_SIZE, TAIL_META_SIZE};

/// Encodes and decodes head and tail sectors of one sector size.
///
/// The codec holds no state besides the sector size and performs no I/O, so
/// it is `Copy` and can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorCodec {
    sector_size: SectorSize,
}

impl SectorCodec {
    /// Creates a codec for the given sector size.
    pub fn new(sector_size: SectorSize) -> Self {
        Self { sector_size }
    }

    /// Creates a codec for the sector size recorded in a descriptor.
    pub fn from_descriptor(descriptor: &DescriptorSector) -> Result<Self> {
        Ok(Self::new(descriptor.sector_size()?))
    }

    /// The configured sector size.
    pub fn sector_size(&self) -> SectorSize {
        self.sector_size
    }

    /// Maximum title length of a head sector.
    pub fn max_title_size(&self) -> usize {
        self.sector_size.as_usize() - HEAD_META_SIZE
    }

    /// Maximum content length of a head sector.
    ///
    /// One byte less than [`SectorCodec::max_title_size`] so that title and
    /// content can never both claim the whole sector.
    pub fn max_content_size(&self) -> usize {
        self.max_title_size() - 1
    }

    /// Content bytes a head sector can carry next to a title of `title_len` bytes.
    pub fn head_content_capacity(&self, title_len: usize) -> usize {
        self.max_title_size().saturating_sub(title_len).min(self.max_content_size())
    }

    /// Content bytes a tail sector can carry.
    pub fn tail_content_capacity(&self) -> usize {
        self.sector_size.as_usize() - TAIL_META_SIZE
    }

    /// Decodes a head or tail sector, dispatching on the kind flag.
    pub fn decode(&self, data: &[u8]) -> Sector {
        match SectorKind::of(data) {
            SectorKind::Head => Sector::Head(self.decode_head(data)),
            SectorKind::Tail => Sector::Tail(self.decode_tail(data)),
        }
    }
}
