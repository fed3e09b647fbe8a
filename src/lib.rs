//! # NDB - Sector Format for a Document Store
//!
//! NDB stores documents in a single file partitioned into equal-size
//! sectors. This crate implements the on-disk sector codec and the logical
//! chain model a storage engine builds on; file I/O, free-space tracking
//! and the document API belong to the engine.
//!
//! ## Architecture
//!
//! - **Encoding**: fixed-width little-endian primitives and title sanitization
//! - **Sector**: descriptor, head and tail sector codecs
//! - **Chain**: splitting documents across linked sectors and walking them back
//! - **Error**: structured encoding errors with a pluggable presentation hook
//!
//! ## Example Usage
//!
//! ```rust
//! use ndb::sector::{decode_descriptor, encode_descriptor, DescriptorSector, HeadSector};
//! use ndb::{SectorCodec, SectorSize};
//!
//! # fn main() -> Result<(), ndb::Error> {
//! // The descriptor is read first to learn the sector size
//! let descriptor = DescriptorSector::new(SectorSize::S512, Some("inventory".into()));
//! let bytes = encode_descriptor(&descriptor)?;
//! let codec = SectorCodec::from_descriptor(&decode_descriptor(&bytes))?;
//!
//! let head = HeadSector {
//!     created: 1000,
//!     modified: 1000,
//!     next_sector: 0,
//!     title: "hello".into(),
//!     content: Some(b"world".to_vec().into()),
//! };
//! let encoded = codec.encode_head(&head)?;
//! assert_eq!(encoded.len(), 512);
//! assert_eq!(codec.decode_head(&encoded), head);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod chain;
pub mod config;
pub mod encoding;
pub mod error;
pub mod sector;

// Re-exports
pub use chain::{ChainReader, ChainWriter, Document};
pub use config::{Options, SectorSize};
pub use error::{Error, Result, SectorEncodingError};
pub use sector::SectorCodec;
