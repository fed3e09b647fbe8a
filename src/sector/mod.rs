//! Sector codec.
//!
//! A database file is a sequence of equal-size sectors preceded by a single
//! descriptor sector. Documents are stored as chains of one head sector and
//! zero or more tail sectors linked by `next_sector` pointers.
//!
//! ## File Format
//!
//! ```text
//! [Descriptor: 512B]   // always 512 bytes, records the sector size
//! [Sector 1]           // head or tail, `sector_size` bytes
//! [Sector 2]
//! ...
//! ```
//!
//! ## Head Sector
//!
//! ```text
//! [flag = 1: u8][created: u32][modified: u32][next_sector: u32]
//! [title_len: u16][content_len: u16][zero padding to 64 bytes]
//! [title: title_len bytes][content: content_len bytes][zero padding]
//! ```
//!
//! ## Tail Sector
//!
//! ```text
//! [flag = 0: u8][next_sector: u32][content_len: u16][zero padding to 16 bytes]
//! [content: content_len bytes][zero padding]
//! ```
//!
//! Descriptor encoding is size-independent and exposed as free functions;
//! head and tail encoding go through a [`SectorCodec`] bound to one
//! [`SectorSize`](crate::config::SectorSize).

pub mod codec;
pub mod descriptor;
pub mod head;
pub mod tail;

pub use codec::SectorCodec;
pub use descriptor::{decode_descriptor, encode_descriptor, DescriptorSector};
pub use head::HeadSector;
pub use tail::TailSector;

use std::time::{SystemTime, UNIX_EPOCH};

/// Size of the descriptor sector, independent of the configured sector size.
pub const DESCRIPTOR_SIZE: usize = 512;

/// Size of the descriptor comment slot.
pub const COMMENT_SIZE: usize = 64;

/// Size of the head sector meta region.
pub const HEAD_META_SIZE: usize = 64;

/// Size of the tail sector reserved region.
pub const TAIL_META_SIZE: usize = 16;

/// Pointer value terminating a chain.
pub const NULL_SECTOR: u32 = 0;

/// Kind flag stored in the first byte of head and tail sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SectorKind {
    /// Continuation sector
    Tail = 0,
    /// First sector of a chain
    Head = 1,
}

impl SectorKind {
    /// Reads the kind flag of an encoded sector. Any non-zero flag is a head.
    pub fn of(data: &[u8]) -> Self {
        if crate::encoding::read_boolean(data, 0) {
            SectorKind::Head
        } else {
            SectorKind::Tail
        }
    }
}

/// A decoded head or tail sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sector {
    /// First sector of a chain
    Head(HeadSector),
    /// Continuation sector
    Tail(TailSector),
}

impl Sector {
    /// Kind of this sector.
    pub fn kind(&self) -> SectorKind {
        match self {
            Sector::Head(_) => SectorKind::Head,
            Sector::Tail(_) => SectorKind::Tail,
        }
    }

    /// Address of the next sector in the chain.
    pub fn next_sector(&self) -> u32 {
        match self {
            Sector::Head(head) => head.next_sector,
            Sector::Tail(tail) => tail.next_sector,
        }
    }

    /// Whether this sector ends its chain.
    pub fn is_terminal(&self) -> bool {
        self.next_sector() == NULL_SECTOR
    }

    /// Content bytes carried by this sector.
    pub fn content(&self) -> &[u8] {
        match self {
            Sector::Head(head) => head.content.as_deref().unwrap_or_default(),
            Sector::Tail(tail) => &tail.content,
        }
    }
}

/// Current time as seconds since the UNIX epoch, saturated to 32 bits.
pub fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}
