//! A byte-exact `multipart/form-data` parser that pulls the uploaded file out
//! of a fully buffered request body.
//!
//! The body may arrive raw or as base64 text, as HTTP gateways often deliver
//! it. Parsing never interprets part bodies as text, so binary files survive
//! untouched.
//!
//! # Examples
//!
//! ```
//! use multipart_upload::parse_multipart;
//!
//! let body = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nholiday\r\n--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"image\"; filename=\"my file.png\"\r\nContent-Type: image/png\r\n\r\n\x00\x01\x02\r\n--X-BOUNDARY--\r\n";
//!
//! let upload = parse_multipart(Some("multipart/form-data; boundary=X-BOUNDARY"), body.as_bytes(), false).unwrap();
//!
//! assert_eq!(upload.filename, "my file.png");
//! assert_eq!(upload.content_type.as_deref(), Some("image/png"));
//! assert_eq!(&upload.content[..], b"\x00\x01\x02");
//! ```
//!
//! Every part, not only the file, is reachable through [`Multipart`]:
//!
//! ```
//! use multipart_upload::Multipart;
//!
//! let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"my_text_field\"\r\n\r\nabcd\r\n--X-BOUNDARY--\r\n";
//!
//! for part in Multipart::new(data, "X-BOUNDARY") {
//!     let part = part.unwrap();
//!     assert_eq!(part.name(), Some("my_text_field"));
//!     assert_eq!(part.text(), "abcd");
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use body::{decode_body, BodyEncoding};
pub use bytes;
pub use constraints::Constraints;
pub use error::Error;
pub use multipart::Multipart;
pub use part::Part;
pub use size_limit::SizeLimit;
pub use upload::{select_upload, ParsedUpload};

mod body;
mod buffer;
mod constants;
mod constraints;
mod content_disposition;
mod error;
mod helpers;
mod multipart;
mod part;
mod size_limit;
mod state;
mod upload;

/// A Result type often returned from methods that can have `multipart_upload` errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses the `Content-Type` header to extract the boundary value.
///
/// Surrounding quotes are stripped; anything else is kept verbatim, even
/// characters a boundary is not supposed to contain.
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> crate::Result<String> {
    let (essence, params) = helpers::split_header_params(content_type.as_ref());

    if !essence.eq_ignore_ascii_case(mime::MULTIPART_FORM_DATA.essence_str()) {
        return Err(Error::MissingBoundary("Content-Type is not multipart/form-data"));
    }

    let boundary = helpers::find_param(&params, mime::BOUNDARY.as_str())
        .filter(|boundary| !boundary.is_empty())
        .ok_or(Error::MissingBoundary("no boundary parameter in Content-Type"))?;

    if boundary.len() > constants::MAX_BOUNDARY_LEN || !boundary.bytes().all(constants::is_boundary_char) {
        log::warn!("Accepting non-standard multipart boundary {:?}", boundary);
    }

    Ok(boundary.to_owned())
}

/// Extracts the first uploaded file from a `multipart/form-data` body.
///
/// `content_type` is the request's `Content-Type` header, if any. Set
/// `is_base64` when the transport delivered the body as base64 text.
pub fn parse_multipart(content_type: Option<&str>, body: &[u8], is_base64: bool) -> crate::Result<ParsedUpload> {
    parse_multipart_with_constraints(content_type, body, is_base64, Constraints::default())
}

/// Like [`parse_multipart`], applying the given [`Constraints`] to the body and its parts.
pub fn parse_multipart_with_constraints(
    content_type: Option<&str>,
    body: &[u8],
    is_base64: bool,
    constraints: Constraints,
) -> crate::Result<ParsedUpload> {
    let boundary = parse_boundary(content_type.unwrap_or_default())?;
    let body = decode_body(body, BodyEncoding::from_base64_flag(is_base64))?;

    Multipart::with_constraints(body, boundary, constraints).into_upload()
}
