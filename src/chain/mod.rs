//! Document chain model.
//!
//! A document is stored as one head sector followed by zero or more tail
//! sectors. Each sector points at the next through `next_sector`; a pointer
//! of `0` ends the chain. The document content is the concatenation of every
//! sector's content in chain order, and the title lives only in the head.
//!
//! Addresses are opaque here: the storage engine decides whether they are
//! sector indices or byte offsets, hands out new ones through a
//! [`SectorAllocator`] and resolves them through a [`SectorSource`].
//!
//! ## Usage
//!
//! ```rust
//! use ndb::chain::{ChainReader, ChainWriter, Document};
//! use ndb::config::{Options, SectorSize};
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), ndb::Error> {
//! let options = Options::default().sector_size(SectorSize::S512);
//! let mut next = 0u32;
//! let mut allocator = || -> ndb::Result<u32> {
//!     next += 1;
//!     Ok(next)
//! };
//!
//! let document = Document::new("notes", vec![b'x'; 2000]);
//! let chain = ChainWriter::new(&options).write(&document, &mut allocator)?;
//! let head = chain.head_address;
//!
//! let store: HashMap<u32, _> = chain.sectors.into_iter().collect();
//! let read = ChainReader::new(&store, &options).read(head)?;
//! assert_eq!(read.content, document.content);
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::ChainReader;
pub use writer::{ChainWriter, EncodedChain};

use crate::error::{EncodingErrorKind, Error, Result, SectorEncodingError};
use crate::sector::{unix_now, SectorCodec};
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Logical document: what a chain of sectors encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Title stored in the head sector
    pub title: String,
    /// Full content, split across the chain
    pub content: Bytes,
    /// Creation time (UNIX seconds)
    pub created: u32,
    /// Last modification time (UNIX seconds)
    pub modified: u32,
}

impl Document {
    /// Creates a document stamped with the current time.
    pub fn new(title: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let now = unix_now();
        Self { title: title.into(), content: content.into(), created: now, modified: now }
    }
}

/// Provides fresh sector addresses for new chains.
pub trait SectorAllocator {
    /// Returns an unused, non-zero sector address.
    fn allocate(&mut self) -> Result<u32>;
}

impl<F> SectorAllocator for F
where
    F: FnMut() -> Result<u32>,
{
    fn allocate(&mut self) -> Result<u32> {
        self()
    }
}

/// Resolves sector addresses to encoded sector buffers.
pub trait SectorSource {
    /// Returns the `sector_size` bytes stored at `address`.
    fn read_sector(&self, address: u32) -> Result<Bytes>;
}

impl SectorSource for HashMap<u32, Bytes> {
    fn read_sector(&self, address: u32) -> Result<Bytes> {
        self.get(&address).cloned().ok_or_else(|| Error::not_found(format!("sector {}", address)))
    }
}

impl SectorSource for BTreeMap<u32, Bytes> {
    fn read_sector(&self, address: u32) -> Result<Bytes> {
        self.get(&address).cloned().ok_or_else(|| Error::not_found(format!("sector {}", address)))
    }
}

/// Splitting policy for distributing content across a chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainLayout {
    codec: SectorCodec,
}

impl ChainLayout {
    /// Creates a layout for the codec's sector size.
    pub fn new(codec: SectorCodec) -> Self {
        Self { codec }
    }

    /// Returns the content range carried by each sector, head first.
    ///
    /// The head takes as much content as fits after the title, every tail
    /// takes up to `sector_size - 16` bytes. There is always at least one
    /// (possibly empty) range for the head.
    pub fn plan(&self, title_len: usize, content_len: usize) -> Result<Vec<Range<usize>>> {
        let max_title = self.codec.max_title_size();
        if title_len > max_title {
            return Err(SectorEncodingError::new(
                EncodingErrorKind::TitleByteOverflow,
                &[&title_len, &max_title, &self.codec.sector_size()],
            )
            .into());
        }

        let head_end = self.codec.head_content_capacity(title_len).min(content_len);
        let mut ranges = vec![0..head_end];

        let tail_capacity = self.codec.tail_content_capacity();
        let mut start = head_end;
        while start < content_len {
            let end = (start + tail_capacity).min(content_len);
            ranges.push(start..end);
            start = end;
        }
        Ok(ranges)
    }

    /// Number of sectors needed for a document.
    pub fn sector_count(&self, title_len: usize, content_len: usize) -> Result<usize> {
        Ok(self.plan(title_len, content_len)?.len())
    }
}
