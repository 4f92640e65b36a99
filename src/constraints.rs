use crate::size_limit::SizeLimit;

/// Represents some rules to be applied on the body to limit part sizes and
/// the accepted field names.
///
/// # Examples
///
/// ```
/// use multipart_upload::{parse_multipart_with_constraints, Constraints, SizeLimit};
///
/// let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"me.png\"\r\n\r\nPNG data\r\n--X-BOUNDARY--\r\n";
/// let constraints = Constraints::new()
///     .allowed_fields(vec!["avatar", "title"])
///     .size_limit(SizeLimit::new().whole_body(1024).for_field("avatar", 512));
///
/// let upload = parse_multipart_with_constraints(
///     Some("multipart/form-data; boundary=X-BOUNDARY"),
///     data.as_bytes(),
///     false,
///     constraints,
/// )
/// .unwrap();
/// assert_eq!(upload.filename, "me.png");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub(crate) size_limit: SizeLimit,
    pub(crate) allowed_fields: Option<Vec<String>>,
}

impl Constraints {
    /// Creates a set of rules with default behaviour.
    pub fn new() -> Constraints {
        Constraints::default()
    }

    /// Applies rules on the body size and on each part size.
    pub fn size_limit(self, size_limit: SizeLimit) -> Constraints {
        Constraints {
            size_limit,
            allowed_fields: self.allowed_fields,
        }
    }

    /// Specify which fields are allowed. A part with any other name, or with
    /// no name at all, fails with [`Error::UnknownField`](crate::Error::UnknownField).
    pub fn allowed_fields<N: Into<String>>(self, allowed_fields: Vec<N>) -> Constraints {
        let allowed_fields = allowed_fields.into_iter().map(|item| item.into()).collect();

        Constraints {
            size_limit: self.size_limit,
            allowed_fields: Some(allowed_fields),
        }
    }

    pub(crate) fn is_it_allowed(&self, field: Option<&str>) -> bool {
        match self.allowed_fields {
            Some(ref allowed_fields) => field
                .map(|field| allowed_fields.iter().any(|item| item == field))
                .unwrap_or(false),
            None => true,
        }
    }
}
