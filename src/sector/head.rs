//! Head sector encoding.

use crate::encoding::{self, read_boolean, read_string, read_uint16, read_uint32};
use crate::error::{EncodingErrorKind, Error, Result, SectorEncodingError};
use crate::sector::{SectorCodec, HEAD_META_SIZE};
use bytes::{BufMut, Bytes, BytesMut};

const FLAG_OFFSET: usize = 0;
const CREATED_OFFSET: usize = 1;
const MODIFIED_OFFSET: usize = 5;
const NEXT_SECTOR_OFFSET: usize = 9;
const TITLE_LEN_OFFSET: usize = 13;
const CONTENT_LEN_OFFSET: usize = 15;

/// First sector of a document chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadSector {
    /// Creation time (UNIX seconds)
    pub created: u32,
    /// Last modification time (UNIX seconds)
    pub modified: u32,
    /// Address of the first tail sector, `0` if this is the last sector
    pub next_sector: u32,
    /// Document title. Must be single-byte encodable.
    pub title: String,
    /// Start of the document content, if any
    pub content: Option<Bytes>,
}

impl SectorCodec {
    /// Encodes a head sector into exactly `sector_size` bytes.
    ///
    /// Titles are written as-is; callers sanitize them with
    /// [`filter_multibyte_chars`](crate::encoding::filter_multibyte_chars)
    /// beforehand. When the title fills the whole variable region the content
    /// is not written.
    pub fn encode_head(&self, data: &HeadSector) -> Result<Bytes> {
        let sector_size = self.sector_size().as_usize();
        let title_len = data.title.len();
        let max_title = self.max_title_size();
        if title_len > max_title {
            return Err(SectorEncodingError::new(
                EncodingErrorKind::TitleByteOverflow,
                &[&title_len, &max_title, &sector_size],
            )
            .into());
        }

        let mut content = data.content.as_deref().unwrap_or_default();
        if title_len == max_title {
            if !content.is_empty() {
                log::warn!(
                    "Title fills the {}-byte head sector, dropping {} content bytes",
                    sector_size,
                    content.len()
                );
            }
            content = &[];
        } else {
            let capacity = self.head_content_capacity(title_len);
            if content.len() > capacity {
                return Err(SectorEncodingError::new(
                    EncodingErrorKind::ContentByteOverflow,
                    &[&content.len(), &capacity, &sector_size],
                )
                .into());
            }
        }

        let mut buf = BytesMut::with_capacity(sector_size);
        buf.put(encoding::boolean(true));
        buf.put(encoding::uint32(data.created));
        buf.put(encoding::uint32(data.modified));
        buf.put(encoding::uint32(data.next_sector));
        buf.put(encoding::uint16(title_len as u16));
        buf.put(encoding::uint16(content.len() as u16));
        encoding::pad_to(&mut buf, HEAD_META_SIZE);
        buf.put(encoding::string(&data.title));
        buf.put_slice(content);
        encoding::fit_to(&mut buf, sector_size);

        log::debug!(
            "Encoded head sector: title={}B, content={}B, next={}",
            title_len,
            content.len(),
            data.next_sector
        );
        Ok(buf.freeze())
    }

    /// Decodes a head sector.
    ///
    /// Never fails. Length fields are trusted and only clamped to the buffer,
    /// so garbage input yields a garbage record; see
    /// [`SectorCodec::validate_head`] for a checked path.
    pub fn decode_head(&self, data: &[u8]) -> HeadSector {
        let title_len = read_uint16(data, TITLE_LEN_OFFSET) as usize;
        let content_len = read_uint16(data, CONTENT_LEN_OFFSET) as usize;

        let title_end = HEAD_META_SIZE + title_len;
        let start = title_end.min(data.len());
        let end = (title_end + content_len).min(data.len());
        let content = &data[start..end];

        HeadSector {
            created: read_uint32(data, CREATED_OFFSET),
            modified: read_uint32(data, MODIFIED_OFFSET),
            next_sector: read_uint32(data, NEXT_SECTOR_OFFSET),
            title: read_string(data, HEAD_META_SIZE, title_end),
            content: (!content.is_empty()).then(|| Bytes::copy_from_slice(content)),
        }
    }

    /// Checks that an encoded head sector is internally consistent.
    pub fn validate_head(&self, data: &[u8]) -> Result<()> {
        let sector_size = self.sector_size().as_usize();
        if data.len() != sector_size {
            return Err(Error::corruption(format!(
                "Head sector size mismatch: expected {}, got {}",
                sector_size,
                data.len()
            )));
        }
        if !read_boolean(data, FLAG_OFFSET) {
            return Err(Error::corruption("Expected a head sector, found a tail sector"));
        }

        let title_len = read_uint16(data, TITLE_LEN_OFFSET) as usize;
        let content_len = read_uint16(data, CONTENT_LEN_OFFSET) as usize;
        if title_len > self.max_title_size() || content_len > self.head_content_capacity(title_len) {
            return Err(Error::corruption(format!(
                "Head sector lengths out of range: title={}, content={}, sector={}",
                title_len, content_len, sector_size
            )));
        }
        Ok(())
    }
}
