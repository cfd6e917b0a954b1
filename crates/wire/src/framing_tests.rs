// SPDX-License-Identifier: MIT

use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Sample {
    a: u32,
    b: String,
}

#[tokio::test]
async fn round_trips_a_single_frame() {
    let value = Sample {
        a: 7,
        b: "hello".to_string(),
    };
    let mut buf = Vec::new();
    write_frame(&mut buf, &value).await.unwrap();

    let mut cursor = std::io::Cursor::new(buf);
    let decoded: Sample = read_frame(&mut cursor).await.unwrap().unwrap();
    assert_eq!(decoded, value);
}

#[tokio::test]
async fn round_trips_several_frames_back_to_back() {
    let values = vec![
        Sample { a: 1, b: "one".into() },
        Sample { a: 2, b: "two".into() },
        Sample { a: 3, b: "three".into() },
    ];
    let mut buf = Vec::new();
    for value in &values {
        write_frame(&mut buf, value).await.unwrap();
    }

    let mut cursor = std::io::Cursor::new(buf);
    for expected in &values {
        let decoded: Sample = read_frame(&mut cursor).await.unwrap().unwrap();
        assert_eq!(&decoded, expected);
    }
}

#[tokio::test]
async fn clean_eof_at_a_frame_boundary_reads_as_none() {
    let mut cursor = std::io::Cursor::new(Vec::<u8>::new());
    let decoded: Option<Sample> = read_frame(&mut cursor).await.unwrap();
    assert!(decoded.is_none());
}

#[tokio::test]
async fn truncated_frame_is_an_io_error() {
    let value = Sample { a: 1, b: "x".into() };
    let mut buf = Vec::new();
    write_frame(&mut buf, &value).await.unwrap();
    buf.truncate(buf.len() - 1);

    let mut cursor = std::io::Cursor::new(buf);
    let err = read_frame::<_, Sample>(&mut cursor).await.unwrap_err();
    assert!(matches!(err, WireError::Io(_)));
}

#[test]
fn oversized_length_prefix_is_rejected_before_allocating() {
    let huge = Sample {
        a: 0,
        b: "x".repeat((MAX_FRAME_LEN as usize) + 1),
    };
    let err = encode_frame(&huge).unwrap_err();
    assert!(matches!(err, WireError::FrameTooLarge(_)));
}
