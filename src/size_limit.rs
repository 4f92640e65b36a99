use crate::constants;
use std::collections::HashMap;

/// Represents size limits applied while splitting a body, so a handler can
/// bound the memory a single upload may hold on to.
///
/// Please refer [`Constraints`](crate::Constraints) for more info.
#[derive(Debug, Clone)]
pub struct SizeLimit {
    pub(crate) whole_body: u64,
    pub(crate) per_part: u64,
    pub(crate) field_map: HashMap<String, u64>,
}

impl SizeLimit {
    /// Creates a default size limit which is [`u64::MAX`] for the whole body
    /// and for each part.
    pub fn new() -> SizeLimit {
        SizeLimit::default()
    }

    /// Sets size limit for the whole decoded body.
    pub fn whole_body(mut self, limit: u64) -> SizeLimit {
        self.whole_body = limit;
        self
    }

    /// Sets size limit for each part body.
    pub fn per_part(mut self, limit: u64) -> SizeLimit {
        self.per_part = limit;
        self
    }

    /// Sets size limit for a specific field, it overrides the `per_part` value for this field.
    ///
    /// Useful to keep small textual fields small while still accepting a large file part.
    pub fn for_field<N: Into<String>>(mut self, field_name: N, limit: u64) -> SizeLimit {
        self.field_map.insert(field_name.into(), limit);
        self
    }

    pub(crate) fn extract_size_limit_for(&self, field: Option<&str>) -> u64 {
        field
            .and_then(|field| self.field_map.get(field))
            .copied()
            .unwrap_or(self.per_part)
    }
}

impl Default for SizeLimit {
    fn default() -> Self {
        SizeLimit {
            whole_body: constants::DEFAULT_WHOLE_BODY_SIZE_LIMIT,
            per_part: constants::DEFAULT_PER_PART_SIZE_LIMIT,
            field_map: HashMap::default(),
        }
    }
}
