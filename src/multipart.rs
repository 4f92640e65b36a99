use crate::buffer::BodyBuffer;
use crate::constants;
use crate::constraints::Constraints;
use crate::state::{MultipartState, ParseStage};
use crate::upload::{self, ParsedUpload};
use crate::Part;
use bytes::Bytes;
use memchr::memmem::Finder;

/// Represents the implementation of `multipart/form-data` formatted data.
///
/// This will split a fully buffered body into [`Part`] instances, either one
/// at a time via [`next_part`](Multipart::next_part) and the [`Iterator`]
/// implementation, or all at once via [`parts`](Multipart::parts).
///
/// Bytes before the opening delimiter and after the terminal delimiter are
/// ignored. After the terminal delimiter or the first error the iterator
/// yields nothing more.
///
/// # Examples
///
/// ```
/// use multipart_upload::Multipart;
///
/// let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"my_text_field\"\r\n\r\nabcd\r\n--X-BOUNDARY--\r\n";
/// let mut multipart = Multipart::new(data, "X-BOUNDARY");
///
/// while let Some(part) = multipart.next_part().unwrap() {
///     println!("Part: {:?}", part.text())
/// }
/// ```
#[derive(Debug)]
pub struct Multipart {
    state: MultipartState,
    constraints: Constraints,
}

impl Multipart {
    /// Construct a new `Multipart` instance with the given decoded body and the boundary.
    pub fn new<B, S>(body: B, boundary: S) -> Multipart
    where
        B: Into<Bytes>,
        S: Into<String>,
    {
        Multipart::with_constraints(body, boundary, Constraints::default())
    }

    /// Construct a new `Multipart` instance with the given decoded body, the boundary and the constraints.
    pub fn with_constraints<B, S>(body: B, boundary: S, constraints: Constraints) -> Multipart
    where
        B: Into<Bytes>,
        S: Into<String>,
    {
        let boundary = boundary.into();
        let delimiter = format!("{}{}{}", constants::CRLF, constants::BOUNDARY_EXT, boundary);

        let state = MultipartState {
            buffer: BodyBuffer::new(body.into()),
            delimiter: Finder::new(delimiter.as_bytes()).into_owned(),
            boundary,
            stage: ParseStage::FindingFirstBoundary,
            next_part_idx: 0,
        };

        Multipart { state, constraints }
    }

    /// The boundary this body is split on.
    pub fn boundary(&self) -> &str {
        &self.state.boundary
    }

    /// Yields the next [`Part`] if available.
    pub fn next_part(&mut self) -> crate::Result<Option<Part>> {
        let res = self.read_next_part();

        if res.is_err() {
            self.state.stage = ParseStage::Eof;
        }

        res
    }

    /// Yields the next [`Part`] with its positioning index as a tuple `(usize, Part)`.
    pub fn next_part_with_idx(&mut self) -> crate::Result<Option<(usize, Part)>> {
        self.next_part().map(|p| p.map(|part| (part.index(), part)))
    }

    /// Splits and decodes every remaining part.
    pub fn parts(self) -> crate::Result<Vec<Part>> {
        self.collect()
    }

    /// Decodes the whole body, then returns its first file part as a
    /// [`ParsedUpload`].
    pub fn into_upload(self) -> crate::Result<ParsedUpload> {
        upload::select_upload(self.parts()?)
    }

    fn read_next_part(&mut self) -> crate::Result<Option<Part>> {
        let state = &mut self.state;

        if state.stage == ParseStage::Eof {
            return Ok(None);
        }

        if state.stage == ParseStage::FindingFirstBoundary {
            let limit = self.constraints.size_limit.whole_body;
            if state.buffer.len() as u64 > limit {
                return Err(crate::Error::BodySizeExceeded { limit });
            }

            if !state.buffer.skip_preamble(&state.delimiter) {
                return Err(crate::Error::MissingBoundary("no boundary delimiter found in body"));
            }

            log::debug!("Found opening delimiter for boundary {:?}", state.boundary);
            state.stage = ParseStage::DeterminingBoundaryType;
        }

        if state.stage == ParseStage::DeterminingBoundaryType {
            let offset = state.buffer.position();
            let marker = state.buffer.read_exact(2);

            match marker.as_deref() {
                Some(m) if m == constants::BOUNDARY_EXT.as_bytes() => {
                    log::debug!("Terminal delimiter reached after {} part(s)", state.next_part_idx);
                    state.stage = ParseStage::Eof;
                    return Ok(None);
                }
                Some(m) if m == constants::CRLF.as_bytes() => {
                    state.stage = ParseStage::ReadingPart;
                }
                Some(_) => {
                    return Err(crate::Error::MalformedMultipart {
                        offset,
                        reason: "expected CRLF or `--` after a boundary delimiter",
                    });
                }
                None => {
                    return Err(crate::Error::MalformedMultipart {
                        offset,
                        reason: "body ends right after a boundary delimiter",
                    });
                }
            }
        }

        let offset = state.buffer.position();
        let raw = state
            .buffer
            .read_part_data(&state.delimiter)
            .ok_or(crate::Error::MalformedMultipart {
                offset,
                reason: "part is not closed by a boundary delimiter",
            })?;

        state.stage = ParseStage::DeterminingBoundaryType;

        let part_idx = state.next_part_idx;
        state.next_part_idx += 1;

        let part = Part::parse(raw, part_idx)?;

        log::trace!(
            "Decoded part #{}: name={:?} file_name={:?} len={}",
            part_idx,
            part.name(),
            part.file_name(),
            part.len()
        );

        if !self.constraints.is_it_allowed(part.name()) {
            return Err(crate::Error::UnknownField {
                field_name: part.name().map(|name| name.to_owned()),
            });
        }

        let limit = self.constraints.size_limit.extract_size_limit_for(part.name());
        if part.len() as u64 > limit {
            return Err(crate::Error::PartSizeExceeded {
                limit,
                field_name: part.name().map(|name| name.to_owned()),
            });
        }

        Ok(Some(part))
    }
}

impl Iterator for Multipart {
    type Item = crate::Result<Part>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_part().transpose()
    }
}

impl std::iter::FusedIterator for Multipart {}
