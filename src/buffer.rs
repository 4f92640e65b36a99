use bytes::Bytes;
use memchr::memmem::Finder;

/// A read cursor over a fully buffered body.
#[derive(Debug)]
pub(crate) struct BodyBuffer {
    buf: Bytes,
    pos: usize,
}

impl BodyBuffer {
    pub fn new(buf: Bytes) -> Self {
        BodyBuffer { buf, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Moves the cursor just past the opening delimiter, discarding any
    /// preamble. `delimiter` searches for `CRLF--boundary`; the opening
    /// delimiter may also appear without the CRLF at the very start.
    pub fn skip_preamble(&mut self, delimiter: &Finder) -> bool {
        let needle = delimiter.needle();
        let opening = &needle[2..];

        if self.remaining().starts_with(opening) {
            self.pos += opening.len();
            return true;
        }

        match delimiter.find(self.remaining()) {
            Some(idx) => {
                self.pos += idx + needle.len();
                true
            }
            None => false,
        }
    }

    pub fn read_exact(&mut self, size: usize) -> Option<Bytes> {
        if size <= self.remaining().len() {
            let bytes = self.buf.slice(self.pos..self.pos + size);
            self.pos += size;
            Some(bytes)
        } else {
            None
        }
    }

    /// Returns the bytes up to the next delimiter and moves the cursor past
    /// that delimiter. The delimiter's leading CRLF belongs to the delimiter,
    /// not to the returned bytes.
    pub fn read_part_data(&mut self, delimiter: &Finder) -> Option<Bytes> {
        let idx = delimiter.find(self.remaining())?;
        let bytes = self.buf.slice(self.pos..self.pos + idx);
        self.pos += idx + delimiter.needle().len();
        Some(bytes)
    }
}
