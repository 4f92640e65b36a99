use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

/// How the transport delivered the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// The bytes are the body itself.
    Raw,
    /// The body arrived as standard, padded base64 text.
    Base64,
}

impl BodyEncoding {
    /// Maps the `isBase64Encoded`-style flag that HTTP gateways attach to a
    /// request body.
    pub fn from_base64_flag(is_base64: bool) -> BodyEncoding {
        if is_base64 {
            BodyEncoding::Base64
        } else {
            BodyEncoding::Raw
        }
    }
}

impl Default for BodyEncoding {
    fn default() -> Self {
        BodyEncoding::Raw
    }
}

/// Converts the transport representation of a body into an owned byte buffer.
///
/// Raw bodies are copied byte-for-byte. Base64 bodies must use the standard
/// alphabet with canonical padding, otherwise this fails with
/// [`Error::InvalidEncoding`](crate::Error::InvalidEncoding).
///
/// # Examples
///
/// ```
/// use multipart_upload::{decode_body, BodyEncoding};
///
/// let raw = decode_body(b"\x00\xff", BodyEncoding::Raw).unwrap();
/// let decoded = decode_body(b"AP8=", BodyEncoding::Base64).unwrap();
/// assert_eq!(raw, decoded);
/// ```
pub fn decode_body(body: &[u8], encoding: BodyEncoding) -> crate::Result<Bytes> {
    match encoding {
        BodyEncoding::Raw => Ok(Bytes::copy_from_slice(body)),
        BodyEncoding::Base64 => {
            let decoded = STANDARD.decode(body)?;
            log::trace!("Decoded {} base64 bytes into {} body bytes", body.len(), decoded.len());
            Ok(Bytes::from(decoded))
        }
    }
}
