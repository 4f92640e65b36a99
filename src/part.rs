use crate::constants;
use crate::content_disposition::ContentDisposition;
use crate::helpers;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use http::header::{self, HeaderMap};
use memchr::memmem;
#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// A single decoded part of a `multipart/form-data` body.
///
/// The body holds exactly the bytes between the header/body separator and
/// the delimiter that closes the part. It shares the decoded body buffer, so
/// it stays valid after the caller's input is dropped.
#[derive(Debug, Clone)]
pub struct Part {
    headers: HeaderMap,
    body: Bytes,
    meta: PartMeta,
}

#[derive(Debug, Clone)]
struct PartMeta {
    name: Option<String>,
    file_name: Option<String>,
    content_type: Option<mime::Mime>,
    idx: usize,
}

impl Part {
    /// Splits a raw part into its header block and body.
    pub(crate) fn parse(raw: Bytes, idx: usize) -> crate::Result<Part> {
        // A part without headers starts directly with the empty line.
        let header_len = if raw.starts_with(constants::CRLF.as_bytes()) {
            constants::CRLF.len()
        } else {
            memmem::find(&raw, constants::CRLF_CRLF.as_bytes())
                .map(|idx| idx + constants::CRLF_CRLF.len())
                .ok_or_else(|| crate::Error::MalformedPart {
                    part_idx: idx,
                    cause: "missing header/body separator".into(),
                })?
        };

        let mut headers = [httparse::EMPTY_HEADER; constants::MAX_HEADERS];

        let headers = match httparse::parse_headers(&raw[..header_len], &mut headers) {
            Ok(httparse::Status::Complete((_, raw_headers))) => {
                helpers::convert_raw_headers_to_header_map(raw_headers, idx)?
            }
            Ok(httparse::Status::Partial) => {
                return Err(crate::Error::MalformedPart {
                    part_idx: idx,
                    cause: "incomplete headers".into(),
                });
            }
            Err(err) => {
                return Err(crate::Error::MalformedPart {
                    part_idx: idx,
                    cause: err.into(),
                });
            }
        };

        let body = raw.slice(header_len..);

        Ok(Part::new(headers, body, idx))
    }

    pub(crate) fn new(headers: HeaderMap, body: Bytes, idx: usize) -> Self {
        let content_disposition = ContentDisposition::parse(&headers);
        let content_type = Self::parse_content_type(&headers);

        Part {
            headers,
            body,
            meta: PartMeta {
                name: content_disposition.field_name,
                file_name: content_disposition.file_name,
                content_type,
                idx,
            },
        }
    }

    fn parse_content_type(headers: &HeaderMap) -> Option<mime::Mime> {
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<mime::Mime>().ok())
    }

    /// The field name found in the
    /// [`Content-Disposition`](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Disposition)
    /// header.
    pub fn name(&self) -> Option<&str> {
        self.meta.name.as_deref()
    }

    /// The file name found in the `Content-Disposition` header.
    pub fn file_name(&self) -> Option<&str> {
        self.meta.file_name.as_deref()
    }

    /// Returns `true` if the part declares a file name.
    pub fn is_file(&self) -> bool {
        self.meta.file_name.is_some()
    }

    /// Get the content type of the part, if it parses as a [`mime::Mime`].
    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.meta.content_type.as_ref()
    }

    /// Get a map of headers as [`HeaderMap`].
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The index of this part in order of its appearance in the body.
    pub fn index(&self) -> usize {
        self.meta.idx
    }

    /// The part body, shared with the decoded request body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the part, returning its body.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// The length of the part body in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` if the part body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Get the full part body as text, using the charset of its
    /// `Content-Type` and UTF-8 otherwise. Invalid sequences are replaced.
    pub fn text(&self) -> String {
        self.text_with_charset("utf-8")
    }

    /// Like [`text`](Part::text), falling back to `default_encoding` when the
    /// part names no charset.
    pub fn text_with_charset(&self, default_encoding: &str) -> String {
        let encoding_name = self
            .content_type()
            .and_then(|mime| mime.get_param(mime::CHARSET))
            .map(|charset| charset.as_str())
            .unwrap_or(default_encoding);

        let encoding = Encoding::for_label(encoding_name.as_bytes()).unwrap_or(UTF_8);

        let (text, _, _) = encoding.decode(&self.body);
        text.into_owned()
    }

    /// Deserialize the part body as JSON.
    ///
    /// # Optional
    ///
    /// This requires the optional `json` feature to be enabled.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        serde_json::from_slice(&self.body).map_err(crate::Error::DecodeJson)
    }
}
