use std::io::{self, BufRead};

/// Byte source with room for exactly one pushed-back byte.
///
/// Works on any buffered reader, seekable or not, so piped input behaves the
/// same as a regular file.
#[derive(Debug)]
pub struct PushbackReader<R> {
    inner: R,
    pending: Option<u8>,
    consumed: u64,
}

impl<R: BufRead> PushbackReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pending: None, consumed: 0 }
    }

    /// Next byte, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Propagates read errors from the underlying reader. Interrupted reads
    /// are retried.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        loop {
            let byte = match self.inner.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if byte.is_some() {
                self.inner.consume(1);
                self.consumed += 1;
            }
            return Ok(byte);
        }
    }

    /// Push `byte` back so the next call to [`next_byte`](Self::next_byte)
    /// returns it again.
    ///
    /// Only one byte of pushback exists; pushing twice without reading in
    /// between is a logic error.
    pub fn unread(&mut self, byte: u8) {
        debug_assert!(self.pending.is_none(), "pushback slot already occupied");
        self.pending = Some(byte);
    }

    /// Bytes pulled from the underlying reader so far. A pushed-back byte
    /// is counted once.
    pub const fn bytes_consumed(&self) -> u64 {
        self.consumed
    }
}
