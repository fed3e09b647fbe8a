//! Chain walk example for NDB
//!
//! This example lays out a small database image in memory:
//! - Writing the descriptor sector
//! - Splitting a document across head and tail sectors
//! - Reading the sector size back and walking the chain
//!
//! Run with `RUST_LOG=debug` to see the codec logs.

use bytes::Bytes;
use ndb::chain::{ChainReader, ChainWriter, Document};
use ndb::error::{AnsiPainter, Error};
use ndb::sector::{decode_descriptor, encode_descriptor, DescriptorSector};
use ndb::{Options, SectorCodec, SectorSize};
use std::collections::HashMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let options = Options::default().sector_size(SectorSize::S512);

    // The descriptor is always 512 bytes and tells readers the sector size
    let descriptor = DescriptorSector::new(options.sector_size, Some("demo database".to_string()));
    let descriptor_bytes = encode_descriptor(&descriptor)?;
    println!("Descriptor sector: {} bytes", descriptor_bytes.len());

    // Sector 0 is never a chain link, addresses start at 1
    let mut sectors: HashMap<u32, Bytes> = HashMap::new();
    let mut next_free = 0u32;
    let mut allocator = || -> ndb::Result<u32> {
        next_free += 1;
        Ok(next_free)
    };

    let document = Document::new("Release notes \u{1F680}", "All work and no play. ".repeat(80));
    let chain = ChainWriter::new(&options).write(&document, &mut allocator)?;
    println!("Document split into {} sectors: {:?}", chain.len(), chain.addresses());
    let head = chain.head_address;
    sectors.extend(chain.sectors);

    // Reopen: discover the sector size first, then walk the chain
    let codec = SectorCodec::from_descriptor(&decode_descriptor(&descriptor_bytes))?;
    let options = Options::default().sector_size(codec.sector_size()).strict(true);
    let read = ChainReader::new(&sectors, &options).read(head)?;
    println!("Title: {:?}", read.title);
    println!("Content: {} bytes, intact: {}", read.content.len(), read.content == document.content);

    // Encoding errors render plainly through Display and in color through a painter
    let oversized = Document::new("x".repeat(1000), Vec::new());
    if let Err(Error::SectorEncoding(err)) = ChainWriter::new(&options).write(&oversized, &mut allocator) {
        println!("{}", err);
        println!("{}", err.render(&AnsiPainter));
    }

    Ok(())
}
