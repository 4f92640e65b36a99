use lazy_static::lazy_static;
use regex::bytes::Regex;

pub(crate) const DEFAULT_WHOLE_BODY_SIZE_LIMIT: u64 = u64::MAX;
pub(crate) const DEFAULT_PER_PART_SIZE_LIMIT: u64 = u64::MAX;

pub(crate) const MAX_HEADERS: usize = 32;
pub(crate) const MAX_BOUNDARY_LEN: usize = 70;
pub(crate) const BOUNDARY_EXT: &str = "--";
pub(crate) const CRLF: &str = "\r\n";
pub(crate) const CRLF_CRLF: &str = "\r\n\r\n";

lazy_static! {
    // Group 1 holds a quoted value (escaped quotes kept verbatim), group 2 an unquoted one.
    pub(crate) static ref CONTENT_DISPOSITION_FIELD_NAME_RE: Regex =
        Regex::new(r#"(?i-u)(?:^|;)\s*name\s*=\s*(?:"((?:\\.|[^"\\])*)"?|([^;"]*))"#).unwrap();
    pub(crate) static ref CONTENT_DISPOSITION_FILE_NAME_RE: Regex =
        Regex::new(r#"(?i-u)(?:^|;)\s*filename\s*=\s*(?:"((?:\\.|[^"\\])*)"?|([^;"]*))"#).unwrap();
}

/// Characters RFC 2046 permits in a boundary, besides ASCII alphanumerics.
pub(crate) fn is_boundary_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"'()+_,-./:=? ".contains(&b)
}
