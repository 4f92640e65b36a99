use crate::constants;
use http::header::{self, HeaderMap};
use regex::bytes::Regex;

pub(crate) struct ContentDisposition {
    pub(crate) field_name: Option<String>,
    pub(crate) file_name: Option<String>,
}

impl ContentDisposition {
    pub fn parse(headers: &HeaderMap) -> ContentDisposition {
        let content_disposition = headers.get(header::CONTENT_DISPOSITION).map(|val| val.as_bytes());

        let field_name = content_disposition
            .and_then(|val| capture_param(&constants::CONTENT_DISPOSITION_FIELD_NAME_RE, val));

        let file_name = content_disposition
            .and_then(|val| capture_param(&constants::CONTENT_DISPOSITION_FILE_NAME_RE, val));

        ContentDisposition { field_name, file_name }
    }
}

fn capture_param(re: &Regex, val: &[u8]) -> Option<String> {
    let cap = re.captures(val)?;

    match cap.get(1) {
        Some(quoted) => Some(String::from_utf8_lossy(quoted.as_bytes()).into_owned()),
        None => cap
            .get(2)
            .map(|unquoted| String::from_utf8_lossy(unquoted.as_bytes()).trim().to_owned()),
    }
}
