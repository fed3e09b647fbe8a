//! Chain traversal.

use crate::chain::{Document, SectorSource};
use crate::config::Options;
use crate::error::{Error, Result};
use crate::sector::{Sector, SectorCodec, SectorKind, NULL_SECTOR};
use bytes::BytesMut;
use std::collections::HashSet;

/// Follows `next_sector` pointers from a head sector until a `0` pointer.
pub struct ChainReader<'a, S: SectorSource + ?Sized> {
    source: &'a S,
    codec: SectorCodec,
    strict: bool,
}

impl<'a, S: SectorSource + ?Sized> ChainReader<'a, S> {
    /// Creates a reader over `source` using the options' sector size.
    pub fn new(source: &'a S, options: &Options) -> Self {
        Self { source, codec: SectorCodec::new(options.sector_size), strict: options.strict }
    }

    /// Reads the document whose head sector is at `head_address`.
    pub fn read(&self, head_address: u32) -> Result<Document> {
        let mut document = None;
        let mut content = BytesMut::new();
        self.walk(head_address, |_, sector| {
            content.extend_from_slice(sector.content());
            if let Sector::Head(head) = sector {
                document = Some(Document {
                    title: head.title,
                    content: Default::default(),
                    created: head.created,
                    modified: head.modified,
                });
            }
        })?;

        let mut document = document.ok_or_else(|| Error::corruption("chain has no head sector"))?;
        document.content = content.freeze();
        Ok(document)
    }

    /// Lists every sector address of the chain, head first.
    pub fn addresses(&self, head_address: u32) -> Result<Vec<u32>> {
        let mut addresses = Vec::new();
        self.walk(head_address, |address, _| addresses.push(address))?;
        Ok(addresses)
    }

    fn walk<F>(&self, head_address: u32, mut visit: F) -> Result<()>
    where
        F: FnMut(u32, Sector),
    {
        let mut visited = HashSet::new();
        let mut address = head_address;
        let mut expected = SectorKind::Head;

        loop {
            if !visited.insert(address) {
                return Err(Error::corruption(format!(
                    "sector chain starting at {} loops back to {}",
                    head_address, address
                )));
            }

            let sector = self.decode_at(address, expected)?;
            let next = sector.next_sector();
            log::trace!("Visited {:?} sector {} -> {}", expected, address, next);
            visit(address, sector);

            if next == NULL_SECTOR {
                break;
            }
            address = next;
            expected = SectorKind::Tail;
        }

        log::debug!("Walked chain at {}: {} sectors", head_address, visited.len());
        Ok(())
    }

    fn decode_at(&self, address: u32, expected: SectorKind) -> Result<Sector> {
        let data = self.source.read_sector(address)?;
        let found = SectorKind::of(&data);
        if found != expected {
            return Err(Error::corruption(format!(
                "sector {} is a {:?} sector, expected {:?}",
                address, found, expected
            )));
        }

        if self.strict {
            match expected {
                SectorKind::Head => self.codec.validate_head(&data)?,
                SectorKind::Tail => self.codec.validate_tail(&data)?,
            }
        }

        Ok(match expected {
            SectorKind::Head => Sector::Head(self.codec.decode_head(&data)),
            SectorKind::Tail => Sector::Tail(self.codec.decode_tail(&data)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectorSize;
    use crate::sector::{HeadSector, TailSector};
    use bytes::Bytes;
    use std::collections::HashMap;

    fn options() -> Options {
        Options::default().sector_size(SectorSize::S512)
    }

    fn codec() -> SectorCodec {
        SectorCodec::new(SectorSize::S512)
    }

    fn head(next: u32, content: &'static [u8]) -> Bytes {
        let head = HeadSector {
            created: 10,
            modified: 20,
            next_sector: next,
            title: "doc".into(),
            content: Some(Bytes::from_static(content)),
        };
        codec().encode_head(&head).unwrap()
    }

    fn tail(next: u32, content: &'static [u8]) -> Bytes {
        codec().encode_tail(&TailSector { next_sector: next, content: Bytes::from_static(content) }).unwrap()
    }

    #[test]
    fn test_read_chain_in_pointer_order() {
        // chain order differs from address order
        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(5, head(9, b"one "));
        store.insert(9, tail(2, b"two "));
        store.insert(2, tail(0, b"three"));

        let reader = ChainReader::new(&store, &options());
        let document = reader.read(5).unwrap();
        assert_eq!(document.title, "doc");
        assert_eq!(document.created, 10);
        assert_eq!(document.modified, 20);
        assert_eq!(&document.content[..], b"one two three");
        assert_eq!(reader.addresses(5).unwrap(), vec![5, 9, 2]);
    }

    #[test]
    fn test_terminal_head_ignores_rest() {
        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(1, head(0, b"only"));
        // unrelated sector that must not be visited
        store.insert(2, tail(0, b"stray"));

        let document = ChainReader::new(&store, &options()).read(1).unwrap();
        assert_eq!(&document.content[..], b"only");
    }

    #[test]
    fn test_cycle_is_corruption() {
        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(1, head(2, b"a"));
        store.insert(2, tail(3, b"b"));
        store.insert(3, tail(2, b"c"));

        let err = ChainReader::new(&store, &options()).read(1).unwrap_err();
        assert!(matches!(err, Error::Corruption(_)));
        assert!(err.to_string().contains("loops back to 2"));
    }

    #[test]
    fn test_self_loop_on_head() {
        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(1, head(1, b"a"));
        assert!(ChainReader::new(&store, &options()).addresses(1).is_err());
    }

    #[test]
    fn test_link_into_another_head() {
        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(1, head(2, b"a"));
        store.insert(2, head(0, b"b"));
        assert!(matches!(ChainReader::new(&store, &options()).read(1), Err(Error::Corruption(_))));
    }

    #[test]
    fn test_read_from_tail_address() {
        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(4, tail(0, b"x"));
        assert!(ChainReader::new(&store, &options()).read(4).is_err());
    }

    #[test]
    fn test_missing_sector() {
        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(1, head(8, b"a"));
        let err = ChainReader::new(&store, &options()).read(1).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_strict_rejects_bad_lengths() {
        let mut bad = tail(0, b"x").to_vec();
        bad[5..7].copy_from_slice(&600u16.to_le_bytes());

        let mut store: HashMap<u32, Bytes> = HashMap::new();
        store.insert(1, head(2, b"a"));
        store.insert(2, Bytes::from(bad));

        // permissive traversal clamps the garbage length
        let document = ChainReader::new(&store, &options()).read(1).unwrap();
        assert_eq!(document.content.len(), 1 + 496);

        let strict = options().strict(true);
        assert!(matches!(ChainReader::new(&store, &strict).read(1), Err(Error::Corruption(_))));
    }
}
