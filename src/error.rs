use std::fmt::{self, Debug, Display, Formatter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A set of errors that can occur while extracting an upload from a
/// `multipart/form-data` body.
#[non_exhaustive]
pub enum Error {
    /// The `Content-Type` header is absent, is not `multipart/form-data`,
    /// carries no `boundary` parameter, or the body contains no delimiter.
    MissingBoundary(&'static str),

    /// A body declared as base64 could not be decoded.
    InvalidEncoding(base64::DecodeError),

    /// Unexpected bytes follow a boundary delimiter, or the body ends before
    /// the terminal delimiter.
    MalformedMultipart { offset: usize, reason: &'static str },

    /// A part lacks a header/body separator or its headers can't be decoded.
    MalformedPart { part_idx: usize, cause: BoxError },

    /// No part declares a `filename` in its `Content-Disposition` header.
    NoFilePart,

    /// A part name outside of [`Constraints::allowed_fields`](crate::Constraints::allowed_fields)
    /// was received.
    UnknownField { field_name: Option<String> },

    /// A part body exceeded its size limit.
    PartSizeExceeded { limit: u64, field_name: Option<String> },

    /// The decoded body exceeded the whole-body size limit.
    BodySizeExceeded { limit: u64 },

    /// Failed to decode a part body as `JSON` in
    /// [`part.json()`](crate::Part::json) method.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    DecodeJson(serde_json::Error),
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingBoundary(reason) => write!(f, "multipart boundary missing: {}", reason),
            Error::InvalidEncoding(err) => write!(f, "failed to decode base64 body: {}", err),
            Error::MalformedMultipart { offset, reason } => {
                write!(f, "malformed multipart body at byte {}: {}", offset, reason)
            }
            Error::MalformedPart { part_idx, cause } => write!(f, "malformed part #{}: {}", part_idx, cause),
            Error::NoFilePart => write!(f, "no part declares a filename"),
            Error::UnknownField { field_name } => {
                let name = field_name.as_deref().unwrap_or("<unknown>");
                write!(f, "unknown field received: {}", name)
            }
            Error::PartSizeExceeded { limit, field_name } => {
                let name = field_name.as_deref().unwrap_or("<unknown>");
                write!(f, "field '{}' exceeded the maximum size limit: {} bytes", name, limit)
            }
            Error::BodySizeExceeded { limit } => {
                write!(f, "body size exceeded the maximum limit: {} bytes", limit)
            }
            #[cfg(feature = "json")]
            Error::DecodeJson(err) => write!(f, "failed to decode part data as JSON: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidEncoding(err) => Some(err),
            Error::MalformedPart { cause, .. } => Some(&**cause),
            #[cfg(feature = "json")]
            Error::DecodeJson(err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string().eq(&other.to_string())
    }
}

impl Eq for Error {}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Error {
        Error::InvalidEncoding(err)
    }
}
