//! Tail sector encoding.

use crate::encoding::{self, read_boolean, read_uint16, read_uint32};
use crate::error::{EncodingErrorKind, Error, Result, SectorEncodingError};
use crate::sector::{SectorCodec, TAIL_META_SIZE};
use bytes::{BufMut, Bytes, BytesMut};

const FLAG_OFFSET: usize = 0;
const NEXT_SECTOR_OFFSET: usize = 1;
const CONTENT_LEN_OFFSET: usize = 5;

/// Continuation sector of a document chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TailSector {
    /// Address of the next tail sector, `0` if this is the last sector
    pub next_sector: u32,
    /// Content carried by this sector
    pub content: Bytes,
}

impl SectorCodec {
    /// Encodes a tail sector into exactly `sector_size` bytes.
    pub fn encode_tail(&self, data: &TailSector) -> Result<Bytes> {
        let sector_size = self.sector_size().as_usize();
        let capacity = self.tail_content_capacity();
        if data.content.len() > capacity {
            return Err(SectorEncodingError::new(
                EncodingErrorKind::ContentByteOverflow,
                &[&data.content.len(), &capacity, &sector_size],
            )
            .into());
        }

        let mut buf = BytesMut::with_capacity(sector_size);
        buf.put(encoding::boolean(false));
        buf.put(encoding::uint32(data.next_sector));
        buf.put(encoding::uint16(data.content.len() as u16));
        encoding::pad_to(&mut buf, TAIL_META_SIZE);
        buf.put_slice(&data.content);
        encoding::fit_to(&mut buf, sector_size);

        log::debug!("Encoded tail sector: content={}B, next={}", data.content.len(), data.next_sector);
        Ok(buf.freeze())
    }

    /// Decodes a tail sector. Never fails; the content range is clamped to the buffer.
    pub fn decode_tail(&self, data: &[u8]) -> TailSector {
        let content_len = read_uint16(data, CONTENT_LEN_OFFSET) as usize;
        let start = TAIL_META_SIZE.min(data.len());
        let end = (TAIL_META_SIZE + content_len).min(data.len());

        TailSector {
            next_sector: read_uint32(data, NEXT_SECTOR_OFFSET),
            content: Bytes::copy_from_slice(&data[start..end]),
        }
    }

    /// Checks that an encoded tail sector is internally consistent.
    pub fn validate_tail(&self, data: &[u8]) -> Result<()> {
        let sector_size = self.sector_size().as_usize();
        if data.len() != sector_size {
            return Err(Error::corruption(format!(
                "Tail sector size mismatch: expected {}, got {}",
                sector_size,
                data.len()
            )));
        }
        if read_boolean(data, FLAG_OFFSET) {
            return Err(Error::corruption("Expected a tail sector, found a head sector"));
        }

        let content_len = read_uint16(data, CONTENT_LEN_OFFSET) as usize;
        if content_len > self.tail_content_capacity() {
            return Err(Error::corruption(format!(
                "Tail sector content length {} exceeds capacity {}",
                content_len,
                self.tail_content_capacity()
            )));
        }
        Ok(())
    }
}
