use http::header::{HeaderMap, HeaderName, HeaderValue};
use httparse::Header;
use std::convert::TryFrom;

pub(crate) fn convert_raw_headers_to_header_map(raw_headers: &[Header], part_idx: usize) -> crate::Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(raw_headers.len());

    for raw_header in raw_headers {
        let name = HeaderName::try_from(raw_header.name).map_err(|err| crate::Error::MalformedPart {
            part_idx,
            cause: err.into(),
        })?;

        let value = HeaderValue::from_bytes(raw_header.value).map_err(|err| crate::Error::MalformedPart {
            part_idx,
            cause: err.into(),
        })?;

        // Duplicate names: the last occurrence wins.
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Splits a header value such as `multipart/form-data; boundary="a b"` into
/// its leading token and its `key=value` parameters.
///
/// Quoted values lose the surrounding quotes and are otherwise kept verbatim;
/// a backslash-escaped quote does not end the value. Unquoted values run up
/// to the next `;` and are trimmed.
pub(crate) fn split_header_params(value: &str) -> (&str, Vec<(&str, &str)>) {
    let (head, mut rest) = match value.find(';') {
        Some(idx) => (&value[..idx], &value[idx + 1..]),
        None => (value, ""),
    };

    let mut params = Vec::new();

    loop {
        rest = rest.trim_start_matches(|c: char| c == ';' || c == ' ' || c == '\t');
        if rest.is_empty() {
            break;
        }

        let name_end = rest.find(|c: char| c == '=' || c == ';').unwrap_or_else(|| rest.len());
        let name = rest[..name_end].trim();
        rest = &rest[name_end..];

        // A bare token carries no value and is not a parameter.
        if !rest.starts_with('=') {
            continue;
        }

        rest = rest[1..].trim_start();

        let param_value = if let Some(quoted) = rest.strip_prefix('"') {
            let end = closing_quote(quoted).unwrap_or_else(|| quoted.len());
            let param_value = &quoted[..end];
            let after = quoted.get(end + 1..).unwrap_or("");
            rest = after.find(';').map(|idx| &after[idx..]).unwrap_or("");
            param_value
        } else {
            let end = rest.find(';').unwrap_or_else(|| rest.len());
            let param_value = rest[..end].trim_end();
            rest = &rest[end..];
            param_value
        };

        params.push((name, param_value));
    }

    (head.trim(), params)
}

/// Returns the first parameter called `name`, compared case-insensitively.
pub(crate) fn find_param<'a>(params: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(param_name, _)| param_name.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}

fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;

    for (idx, b) in s.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }

        match b {
            b'\\' => escaped = true,
            b'"' => return Some(idx),
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_header_params() {
        let (head, params) = split_header_params(r#"multipart/form-data; boundary="with space""#);
        assert_eq!(head, "multipart/form-data");
        assert_eq!(params, vec![("boundary", "with space")]);

        let (head, params) = split_header_params("multipart/form-data;boundary=----X ;charset = utf-8");
        assert_eq!(head, "multipart/form-data");
        assert_eq!(params, vec![("boundary", "----X"), ("charset", "utf-8")]);

        let (head, params) = split_header_params("text/plain");
        assert_eq!(head, "text/plain");
        assert!(params.is_empty());
    }

    #[test]
    fn test_split_header_params_quoting() {
        let (_, params) = split_header_params(r#"multipart/form-data; boundary="a;b"; charset=x"#);
        assert_eq!(params, vec![("boundary", "a;b"), ("charset", "x")]);

        let (_, params) = split_header_params(r#"multipart/form-data; boundary="unterminated"#);
        assert_eq!(params, vec![("boundary", "unterminated")]);

        let (_, params) = split_header_params(r#"multipart/form-data; boundary="""#);
        assert_eq!(params, vec![("boundary", "")]);
    }

    #[test]
    fn test_split_header_params_skips_bare_tokens() {
        let (_, params) = split_header_params("multipart/form-data; boundary; charset=utf-8");
        assert_eq!(params, vec![("charset", "utf-8")]);
        assert_eq!(find_param(&params, "boundary"), None);
    }

    #[test]
    fn test_find_param() {
        let (_, params) = split_header_params("multipart/form-data; Charset=a; boundary*=x; BOUNDARY=b; boundary=c");
        assert_eq!(find_param(&params, "charset"), Some("a"));
        assert_eq!(find_param(&params, "boundary"), Some("b"));
        assert_eq!(find_param(&params, "name"), None);
    }
}
