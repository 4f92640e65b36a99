use crate::Part;
use bytes::Bytes;
use http::header;

/// The file extracted from a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUpload {
    /// The `filename` parameter of the part's `Content-Disposition`, verbatim.
    pub filename: String,
    /// The part body, byte-for-byte.
    pub content: Bytes,
    /// The part's own `Content-Type` header value, if it sent one.
    pub content_type: Option<String>,
    /// The `name` parameter of the part's `Content-Disposition`.
    pub field_name: Option<String>,
}

impl ParsedUpload {
    /// The length of the uploaded content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// An empty file is still a valid upload; whether to accept it is up to
    /// the caller.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The declared content type parsed as a [`mime::Mime`].
    pub fn mime_type(&self) -> Option<mime::Mime> {
        self.content_type.as_deref().and_then(|val| val.parse().ok())
    }
}

impl std::convert::TryFrom<Part> for ParsedUpload {
    type Error = Part;

    /// Converts a part declaring a file name, handing the part back otherwise.
    fn try_from(part: Part) -> Result<Self, Self::Error> {
        let filename = match part.file_name() {
            Some(filename) => filename.to_owned(),
            None => return Err(part),
        };

        let content_type = part
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|val| String::from_utf8_lossy(val.as_bytes()).into_owned());
        let field_name = part.name().map(|name| name.to_owned());

        Ok(ParsedUpload {
            filename,
            content: part.into_bytes(),
            content_type,
            field_name,
        })
    }
}

/// Returns the first part that declares a file name, or
/// [`Error::NoFilePart`](crate::Error::NoFilePart) if none does.
pub fn select_upload<I>(parts: I) -> crate::Result<ParsedUpload>
where
    I: IntoIterator<Item = Part>,
{
    use std::convert::TryFrom;

    for part in parts {
        if let Ok(upload) = ParsedUpload::try_from(part) {
            return Ok(upload);
        }
    }

    Err(crate::Error::NoFilePart)
}
