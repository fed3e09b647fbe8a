//! Splits documents into linked, encoded sectors.

use crate::chain::{ChainLayout, Document, SectorAllocator};
use crate::config::Options;
use crate::encoding::filter_multibyte_chars;
use crate::error::{Error, Result};
use crate::sector::{HeadSector, SectorCodec, TailSector, NULL_SECTOR};
use bytes::Bytes;
use std::borrow::Cow;
use std::collections::HashSet;

/// A document encoded as a chain of sectors, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedChain {
    /// Address of the head sector; the document's identity
    pub head_address: u32,
    /// `(address, sector bytes)` in chain order, head first
    pub sectors: Vec<(u32, Bytes)>,
}

impl EncodedChain {
    /// Addresses in chain order.
    pub fn addresses(&self) -> Vec<u32> {
        self.sectors.iter().map(|(address, _)| *address).collect()
    }

    /// Number of sectors in the chain.
    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    /// Always false; a chain has at least its head sector.
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

/// Encodes documents into sector chains.
#[derive(Debug, Clone, Copy)]
pub struct ChainWriter {
    codec: SectorCodec,
    filter_titles: bool,
}

impl ChainWriter {
    /// Creates a writer from options.
    pub fn new(options: &Options) -> Self {
        Self { codec: SectorCodec::new(options.sector_size), filter_titles: options.filter_titles }
    }

    /// The codec used for every sector of the chain.
    pub fn codec(&self) -> SectorCodec {
        self.codec
    }

    /// Splits `document` across as many sectors as needed.
    ///
    /// Addresses are requested from `allocator` only after the document is
    /// known to fit, one per sector. Address `0` and repeated addresses are
    /// rejected since they would end or loop the chain.
    pub fn write<A>(&self, document: &Document, allocator: &mut A) -> Result<EncodedChain>
    where
        A: SectorAllocator + ?Sized,
    {
        let title = if self.filter_titles {
            filter_multibyte_chars(&document.title)
        } else {
            Cow::Borrowed(document.title.as_str())
        };

        let ranges = ChainLayout::new(self.codec).plan(title.len(), document.content.len())?;

        let mut addresses = Vec::with_capacity(ranges.len());
        let mut seen = HashSet::with_capacity(ranges.len());
        for _ in 0..ranges.len() {
            let address = allocator.allocate()?;
            if address == NULL_SECTOR {
                return Err(Error::invalid_argument("allocator returned the null sector address"));
            }
            if !seen.insert(address) {
                return Err(Error::invalid_argument(format!(
                    "allocator returned sector {} twice",
                    address
                )));
            }
            addresses.push(address);
        }
        let next_of = |i: usize| addresses.get(i + 1).copied().unwrap_or(NULL_SECTOR);

        let mut sectors = Vec::with_capacity(ranges.len());
        for (i, range) in ranges.into_iter().enumerate() {
            let content = document.content.slice(range);
            let encoded = if i == 0 {
                self.codec.encode_head(&HeadSector {
                    created: document.created,
                    modified: document.modified,
                    next_sector: next_of(i),
                    title: title.clone().into_owned(),
                    content: (!content.is_empty()).then_some(content),
                })?
            } else {
                self.codec.encode_tail(&TailSector { next_sector: next_of(i), content })?
            };
            sectors.push((addresses[i], encoded));
        }

        log::debug!(
            "Encoded document chain: {} sectors, head at {}, {} content bytes",
            sectors.len(),
            addresses[0],
            document.content.len()
        );
        Ok(EncodedChain { head_address: addresses[0], sectors })
    }
}
