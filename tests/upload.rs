use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use multipart_upload::{parse_multipart, Error, ParsedUpload};

const CONTENT_TYPE: &str = "multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW";
const BOUNDARY: &str = "----WebKitFormBoundary7MA4YWxkTrZu0gW";

fn file_body(boundary: &str, disposition: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"title\"\r\n\r\nMy project\r\n");
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

fn round_trip(content: &[u8]) {
    let body = file_body(BOUNDARY, r#"form-data; name="image"; filename="blob.bin""#, content);
    let upload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();

    assert_eq!(&upload.content[..], content);
}

#[test]
fn test_binary_content_round_trip() {
    let all_bytes: Vec<u8> = (0..=255u8).collect();
    round_trip(&all_bytes);

    round_trip(b"");
    round_trip(b"\r\n");
    round_trip(b"\r\n\r\n\r\n");
    round_trip(b"\x00\x00\r\x00\n\x00");
    round_trip(b"trailing crlf\r\n");
    round_trip("ünïcödé and invalid \u{fffd}".as_bytes());
    round_trip(&[0xff, 0xfe, 0xc3, 0x28, 0xa0, 0xa1, 0xe2, 0x28, 0xa1]);
}

#[test]
fn test_content_resembling_boundary() {
    round_trip(b"----WebKitFormBoundary7MA4YWxkTrZu0g");
    round_trip(b"\r\n----WebKitFormBoundary7MA4YWxkTrZu0g");
    round_trip(b"\n----WebKitFormBoundary7MA4YWxkTrZu0gW");
    round_trip(b"\r----WebKitFormBoundary7MA4YWxkTrZu0gW");
    round_trip(b"\r\n--WebKitFormBoundary7MA4YWxkTrZu0gW\r\n");
    round_trip(b"----WebKitFormBoundary7MA4YWxkTrZu0gW at the start of a line without CRLF");
}

#[test]
fn test_filename_extraction() {
    let body = file_body(BOUNDARY, r#"form-data; name="image"; filename="my file.png""#, b"png");
    let upload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();
    assert_eq!(upload.filename, "my file.png");
    assert_eq!(upload.field_name.as_deref(), Some("image"));
    assert_eq!(upload.content_type.as_deref(), Some("application/octet-stream"));

    let body = file_body(BOUNDARY, "form-data; name=image; filename=photo.jpg", b"jpg");
    let upload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();
    assert_eq!(upload.filename, "photo.jpg");

    let body = file_body(BOUNDARY, "form-data; name=\"image\"; filename=\"照片.jpg\"", b"jpg");
    let upload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();
    assert_eq!(upload.filename, "照片.jpg");
}

#[test]
fn test_first_file_part_wins() {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"a\"; filename=\"first.txt\"\r\n\r\nfirst\r\n--{b}\r\nContent-Disposition: form-data; name=\"b\"; filename=\"second.txt\"\r\nContent-Type: text/plain\r\n\r\nsecond\r\n--{b}--\r\n",
        b = BOUNDARY
    );
    let upload = parse_multipart(Some(CONTENT_TYPE), body.as_bytes(), false).unwrap();

    assert_eq!(upload.filename, "first.txt");
    assert_eq!(&upload.content[..], b"first");
    assert_eq!(upload.content_type, None);
}

#[test]
fn test_missing_boundary() {
    let body = file_body(BOUNDARY, r#"form-data; name="image"; filename="a""#, b"x");

    assert_eq!(
        parse_multipart(Some("multipart/form-data"), &body, false),
        Err(Error::MissingBoundary("no boundary parameter in Content-Type"))
    );
    assert_eq!(
        parse_multipart(None, &body, false),
        Err(Error::MissingBoundary("Content-Type is not multipart/form-data"))
    );
    assert_eq!(
        parse_multipart(Some("application/json"), &body, false),
        Err(Error::MissingBoundary("Content-Type is not multipart/form-data"))
    );
    assert_eq!(
        parse_multipart(Some("multipart/form-data; boundary=other"), &body, false),
        Err(Error::MissingBoundary("no boundary delimiter found in body"))
    );
}

#[test]
fn test_no_file_part() {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nMy project\r\n--{b}\r\nContent-Disposition: form-data; name=\"link\"\r\n\r\nhttps://example.com\r\n--{b}--\r\n",
        b = BOUNDARY
    );

    assert_eq!(parse_multipart(Some(CONTENT_TYPE), body.as_bytes(), false), Err(Error::NoFilePart));
}

#[test]
fn test_bare_filename_token_is_not_a_file() {
    let body = b"--X\r\nContent-Disposition: form-data; name=\"title\"; filename\r\n\r\nhello\r\n--X--";
    assert_eq!(
        parse_multipart(Some("multipart/form-data; boundary=X"), body, false),
        Err(Error::NoFilePart)
    );

    let body = b"--X\r\nContent-Disposition: form-data; name=\"title\"; filename\r\n\r\nhello\r\n--X\r\nContent-Disposition: form-data; name=\"image\"; filename=\"\"\r\n\r\n\r\n--X--";
    let upload = parse_multipart(Some("multipart/form-data; boundary=X"), body, false).unwrap();
    assert_eq!(upload.filename, "");
    assert_eq!(upload.field_name.as_deref(), Some("image"));
    assert!(upload.is_empty());
}

#[test]
fn test_empty_file_is_valid() {
    let body = file_body(BOUNDARY, r#"form-data; name="image"; filename="empty.txt""#, b"");
    let upload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();

    assert_eq!(upload.filename, "empty.txt");
    assert!(upload.is_empty());
}

#[test]
fn test_empty_multipart_has_no_file() {
    let body = format!("--{}--\r\n", BOUNDARY);
    assert_eq!(parse_multipart(Some(CONTENT_TYPE), body.as_bytes(), false), Err(Error::NoFilePart));
}

#[test]
fn test_base64_matches_raw() {
    let all_bytes: Vec<u8> = (0..=255u8).rev().collect();
    let body = file_body(BOUNDARY, r#"form-data; name="image"; filename="my file.png""#, &all_bytes);
    let encoded = STANDARD.encode(&body);

    let raw: ParsedUpload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();
    let decoded: ParsedUpload = parse_multipart(Some(CONTENT_TYPE), encoded.as_bytes(), true).unwrap();

    assert_eq!(raw, decoded);
    assert_eq!(&decoded.content[..], &all_bytes[..]);
}

#[test]
fn test_invalid_base64() {
    let err = parse_multipart(Some(CONTENT_TYPE), b"@@not base64@@", true).unwrap_err();
    assert!(matches!(err, Error::InvalidEncoding(_)));
}

#[test]
fn test_quoted_boundary() {
    let boundary = "simple boundary";
    let body = file_body(boundary, r#"form-data; name="f"; filename="q.txt""#, b"quoted");
    let upload = parse_multipart(Some(r#"multipart/form-data; boundary="simple boundary""#), &body, false).unwrap();

    assert_eq!(&upload.content[..], b"quoted");
}

#[test]
fn test_malformed_multipart() {
    let body = format!("--{}\r\nContent-Disposition: form-data; name=\"a\"; filename=\"x\"\r\n\r\nx\r\n--{}XX", BOUNDARY, BOUNDARY);
    let err = parse_multipart(Some(CONTENT_TYPE), body.as_bytes(), false).unwrap_err();

    assert!(matches!(err, Error::MalformedMultipart { .. }));
}

#[test]
fn test_upload_outlives_input() {
    let body = file_body(BOUNDARY, r#"form-data; name="image"; filename="a.bin""#, b"kept");
    let upload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();
    drop(body);

    assert_eq!(&upload.content[..], b"kept");
}

#[test]
fn test_parse_concurrently() {
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            std::thread::spawn(move || {
                let content = vec![i; 1024];
                let body = file_body(BOUNDARY, r#"form-data; name="f"; filename="t.bin""#, &content);
                let upload = parse_multipart(Some(CONTENT_TYPE), &body, false).unwrap();
                upload.content == content
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
