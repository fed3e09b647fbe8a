// Sector Codec Integration Tests for NDB
// These tests exercise descriptor, head and tail sectors through the public API

use bytes::Bytes;
use ndb::error::EncodingErrorKind;
use ndb::sector::{
    decode_descriptor, encode_descriptor, DescriptorSector, HeadSector, Sector, SectorKind, TailSector,
    DESCRIPTOR_SIZE,
};
use ndb::{SectorCodec, SectorSize};
use std::sync::Arc;
use std::thread;

/// Test the reference 512-byte head sector byte for byte
#[test]
fn test_hello_world_head_sector() {
    let codec = SectorCodec::new(SectorSize::S512);
    let head = HeadSector {
        created: 1000,
        modified: 1000,
        next_sector: 0,
        title: "hello".to_string(),
        content: Some(Bytes::from_static(b"world")),
    };

    let encoded = codec.encode_head(&head).unwrap();
    assert_eq!(encoded.len(), 512);
    assert_eq!(&encoded[64..69], b"hello");
    assert_eq!(&encoded[69..74], b"world");
    assert_eq!(&encoded[13..15], &[5, 0]);
    assert_eq!(&encoded[15..17], &[5, 0]);
    assert!(encoded[74..512].iter().all(|b| *b == 0));
}

/// Test that the descriptor is read first and configures the codec
#[test]
fn test_descriptor_bootstraps_codec() {
    for size in SectorSize::ALL {
        let descriptor = DescriptorSector::new(size, Some(format!("db-{}", size)));
        let encoded = encode_descriptor(&descriptor).unwrap();
        assert_eq!(encoded.len(), DESCRIPTOR_SIZE);

        let decoded = decode_descriptor(&encoded);
        assert_eq!(decoded, descriptor);

        let codec = SectorCodec::from_descriptor(&decoded).unwrap();
        assert_eq!(codec.sector_size(), size);
    }
}

/// Test that head and tail sectors fill exactly one sector at every size
#[test]
fn test_fixed_sector_lengths() {
    for size in SectorSize::ALL {
        let codec = SectorCodec::new(size);
        let head = HeadSector { title: "t".into(), content: Some(Bytes::from_static(b"c")), ..Default::default() };
        assert_eq!(codec.encode_head(&head).unwrap().len(), size.as_usize());

        let full_title = HeadSector { title: "t".repeat(codec.max_title_size()), ..Default::default() };
        assert_eq!(codec.encode_head(&full_title).unwrap().len(), size.as_usize());

        let tail = TailSector { next_sector: 1, content: vec![9u8; codec.tail_content_capacity()].into() };
        assert_eq!(codec.encode_tail(&tail).unwrap().len(), size.as_usize());
    }
}

/// Test title overflow at every size
#[test]
fn test_title_overflow_every_size() {
    for size in SectorSize::ALL {
        let codec = SectorCodec::new(size);
        let limit = size.as_usize() - 64;

        let exact = HeadSector { title: "a".repeat(limit), ..Default::default() };
        assert!(codec.encode_head(&exact).is_ok());

        let over = HeadSector { title: "a".repeat(limit + 1), ..Default::default() };
        let err = codec.encode_head(&over).unwrap_err();
        assert_eq!(err.encoding_kind(), Some(EncodingErrorKind::TitleByteOverflow));
    }
}

/// Test the largest content a head sector accepts at 64KB
#[test]
fn test_largest_head_content() {
    let codec = SectorCodec::new(SectorSize::S64K);
    let head = HeadSector {
        title: "big".into(),
        content: Some(vec![0x5Au8; codec.head_content_capacity(3)].into()),
        ..Default::default()
    };
    let encoded = codec.encode_head(&head).unwrap();
    assert_eq!(codec.decode_head(&encoded), head);
}

/// Test that a terminal pointer is all that matters for chain end
#[test]
fn test_terminal_pointer_ignores_trailing_bytes() {
    let codec = SectorCodec::new(SectorSize::S512);
    let mut data = codec.encode_tail(&TailSector { next_sector: 0, content: Bytes::from_static(b"end") }).unwrap().to_vec();
    // garbage past the content region
    for byte in data.iter_mut().skip(100) {
        *byte = 0xFF;
    }

    let sector = codec.decode(&data);
    assert_eq!(sector.kind(), SectorKind::Tail);
    assert!(sector.is_terminal());
    assert_eq!(sector.content(), b"end");
}

/// Test decoding a head sector through the generic dispatcher
#[test]
fn test_dispatch_on_flag_byte() {
    let codec = SectorCodec::new(SectorSize::S1K);
    let head = HeadSector { created: 1, modified: 2, next_sector: 3, title: "x".into(), content: None };
    match codec.decode(&codec.encode_head(&head).unwrap()) {
        Sector::Head(decoded) => assert_eq!(decoded, head),
        Sector::Tail(_) => panic!("Expected head sector"),
    }
}

/// Test independent encodes from many threads sharing one codec
#[test]
fn test_concurrent_encoding() {
    let codec = Arc::new(SectorCodec::new(SectorSize::S4K));
    let mut handles = vec![];

    for thread_id in 0..8u32 {
        let codec = Arc::clone(&codec);
        handles.push(thread::spawn(move || {
            for i in 0..100u32 {
                let head = HeadSector {
                    created: thread_id,
                    modified: i,
                    next_sector: thread_id * 1000 + i,
                    title: format!("doc-{}-{}", thread_id, i),
                    content: Some(format!("payload {}", i).into_bytes().into()),
                };
                let encoded = codec.encode_head(&head).unwrap();
                assert_eq!(codec.decode_head(&encoded), head);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
