use std::io::{self, BufRead, Write};

use newline_compact_shared_kernel::{ByteCount, CompactStats};

use super::classify::{Token, Tokenizer};
use super::run::NewlineRun;

const NEWLINES: [u8; 64] = [b'\n'; 64];

/// Counts what goes out so the caller can report it.
struct Emitter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Emitter<W> {
    fn newlines(&mut self, mut count: u64) -> io::Result<()> {
        while count > 0 {
            let chunk = usize::try_from(count).map_or(NEWLINES.len(), |c| c.min(NEWLINES.len()));
            self.inner.write_all(&NEWLINES[..chunk])?;
            self.written += chunk as u64;
            count -= chunk as u64;
        }
        Ok(())
    }

    fn byte(&mut self, byte: u8) -> io::Result<()> {
        self.inner.write_all(&[byte])?;
        self.written += 1;
        Ok(())
    }
}

/// Compacts every run of line breaks in `reader` into `writer`.
///
/// A run of one break (`\n` or `\r\n`) comes out as a single `\n`; a run of
/// `N >= 2` breaks comes out as `N - 1` `\n` bytes. A `\r` that is not
/// followed by `\n` is an ordinary byte. Everything else is copied verbatim.
///
/// The input is read once, left to right, with one byte of lookahead, so
/// `reader` may be a pipe. `writer` receives small writes and should be
/// buffered by the caller. It is not flushed here.
///
/// # Errors
///
/// Returns the first read or write error. Nothing is retried except
/// interrupted reads.
pub fn compact_stream<R: BufRead, W: Write>(reader: R, writer: W) -> io::Result<CompactStats> {
    let mut tokens = Tokenizer::new(reader);
    let mut out = Emitter { inner: writer, written: 0 };
    let mut run = NewlineRun::new();
    let mut stats = CompactStats::default();

    while let Some(token) = tokens.next_token()? {
        match token {
            Token::Break(_) => {
                run.push();
                stats.line_breaks = stats.line_breaks.saturating_add(1);
            }
            Token::Byte(byte) => {
                flush_run(&mut run, &mut out, &mut stats)?;
                if byte == b'\r' {
                    stats.lone_carriage_returns = stats.lone_carriage_returns.saturating_add(1);
                }
                out.byte(byte)?;
            }
        }
    }
    flush_run(&mut run, &mut out, &mut stats)?;

    stats.bytes_read = ByteCount::new(tokens.bytes_consumed());
    stats.bytes_written = ByteCount::new(out.written);
    Ok(stats)
}

fn flush_run<W: Write>(
    run: &mut NewlineRun,
    out: &mut Emitter<W>,
    stats: &mut CompactStats,
) -> io::Result<()> {
    if run.len() >= 2 {
        stats.runs_collapsed = stats.runs_collapsed.saturating_add(1);
    }
    out.newlines(run.take_flush_len())
}

/// In-memory form of [`compact_stream`].
pub fn compact_bytes(input: &[u8]) -> Vec<u8> {
    compact_bytes_with_stats(input).0
}

pub fn compact_bytes_with_stats(input: &[u8]) -> (Vec<u8>, CompactStats) {
    let mut out = Vec::with_capacity(input.len());
    match compact_stream(input, &mut out) {
        Ok(stats) => (out, stats),
        // Slices and vectors do not produce I/O errors.
        Err(err) => unreachable!("in-memory compaction failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use newline_compact_shared_kernel::BreakCount;

    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(compact_bytes(b"a\n\n\nb"), b"a\n\nb");
        assert_eq!(compact_bytes(b"a\r\n\r\nb"), b"a\nb");
        assert_eq!(compact_bytes(b"a\n\r\n\nb"), b"a\n\nb");
        assert_eq!(compact_bytes(b"a\rb"), b"a\rb");
    }

    #[test]
    fn single_breaks_are_normalised_to_lf() {
        assert_eq!(compact_bytes(b"a\nb"), b"a\nb");
        assert_eq!(compact_bytes(b"a\r\nb\r\nc"), b"a\nb\nc");
    }

    #[test]
    fn runs_at_the_edges_are_flushed() {
        assert_eq!(compact_bytes(b"\n\nabc"), b"\nabc");
        assert_eq!(compact_bytes(b"abc\r\n\r\n\r\n"), b"abc\n\n");
        assert_eq!(compact_bytes(b"abc\n"), b"abc\n");
        assert_eq!(compact_bytes(b"\n"), b"\n");
        assert_eq!(compact_bytes(b""), b"");
    }

    #[test]
    fn lone_cr_splits_runs() {
        // Two runs of two, not one run of four.
        assert_eq!(compact_bytes(b"a\n\n\r\r\n\nb"), b"a\n\r\nb");
        assert_eq!(compact_bytes(b"x\r"), b"x\r");
        assert_eq!(compact_bytes(b"\r\r\n\n"), b"\r\n");
    }

    #[test]
    fn long_runs_cross_the_emit_buffer() {
        let input = vec![b'\n'; 200];
        let out = compact_bytes(&input);
        assert_eq!(out.len(), 199);
        assert!(out.iter().all(|&b| b == b'\n'));
    }

    #[test]
    fn stats_describe_the_pass() {
        let (out, stats) = compact_bytes_with_stats(b"a\r\n\r\nb\rc\nd");
        assert_eq!(out, b"a\nb\rc\nd");
        assert_eq!(stats.bytes_read.value(), 10);
        assert_eq!(stats.bytes_written.value(), 7);
        assert_eq!(stats.line_breaks.value(), 3);
        assert_eq!(stats.runs_collapsed.value(), 1);
        assert_eq!(stats.lone_carriage_returns.value(), 1);
        assert!(!stats.is_unchanged());
    }

    #[test]
    fn plain_lf_text_without_runs_is_unchanged() {
        let (out, stats) = compact_bytes_with_stats(b"one\ntwo\n");
        assert_eq!(out, b"one\ntwo\n");
        assert!(stats.is_unchanged());
        assert_eq!(stats.runs_collapsed, BreakCount::ZERO);
    }

    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_propagates() {
        let err = compact_stream(&b"abcdef"[..], FailingWriter { budget: 3 }).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
    }
}
