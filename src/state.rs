use crate::buffer::BodyBuffer;
use memchr::memmem::Finder;

#[derive(Debug)]
pub(crate) struct MultipartState {
    pub(crate) buffer: BodyBuffer,
    pub(crate) boundary: String,
    /// Matches `CRLF--boundary`.
    pub(crate) delimiter: Finder<'static>,
    pub(crate) stage: ParseStage,
    pub(crate) next_part_idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseStage {
    FindingFirstBoundary,
    DeterminingBoundaryType,
    ReadingPart,
    Eof,
}
