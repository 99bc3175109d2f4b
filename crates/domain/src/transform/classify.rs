use std::io::{self, BufRead};

use super::pushback::PushbackReader;

/// What a single byte means before any lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    LineFeed,
    /// Needs one byte of lookahead to decide.
    CarriageReturn,
    Ordinary,
}

impl ByteClass {
    #[inline]
    pub const fn of(byte: u8) -> Self {
        match byte {
            b'\n' => Self::LineFeed,
            b'\r' => Self::CarriageReturn,
            _ => Self::Ordinary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Lf,
    CrLf,
}

/// One classified unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A line-break unit: `\n`, or `\r\n` taken as a pair.
    Break(BreakKind),
    /// Any byte that is not part of a line-break unit, lone `\r` included.
    Byte(u8),
}

/// Splits a byte stream into [`Token`]s.
#[derive(Debug)]
pub struct Tokenizer<R> {
    source: PushbackReader<R>,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self { source: PushbackReader::new(reader) }
    }

    /// # Errors
    ///
    /// Propagates read errors from the underlying reader.
    pub fn next_token(&mut self) -> io::Result<Option<Token>> {
        let Some(byte) = self.source.next_byte()? else {
            return Ok(None);
        };
        let token = match ByteClass::of(byte) {
            ByteClass::LineFeed => Token::Break(BreakKind::Lf),
            ByteClass::Ordinary => Token::Byte(byte),
            ByteClass::CarriageReturn => match self.source.next_byte()? {
                Some(b'\n') => Token::Break(BreakKind::CrLf),
                Some(next) => {
                    // `next` starts a fresh classification; it may itself be `\r`.
                    self.source.unread(next);
                    Token::Byte(b'\r')
                }
                None => Token::Byte(b'\r'),
            },
        };
        Ok(Some(token))
    }

    pub const fn bytes_consumed(&self) -> u64 {
        self.source.bytes_consumed()
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
