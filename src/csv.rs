//! Minimal line-oriented CSV dialect for the caption sidecar.
//!
//! Quoting follows the usual RFC4180 rules for a single physical line:
//! fields containing `"`, `,`, `\n` or `\r` are wrapped in quotes with
//! inner quotes doubled. Quoted fields spanning several lines are not
//! supported on read; such a line fails as an unterminated quote.

use std::io::{BufRead, BufWriter, Read, Write};

use thiserror::Error;

/// Longest physical line (without its terminator) the reader accepts.
pub const MAX_LINE_LEN: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("malformed record on line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    #[error("line {line} exceeds the maximum length of {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn encode_record<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();

    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            line.push(',');
        }

        line.push_str(&encode_field(field.as_ref()));
    }

    line.push('\n');
    line
}

fn encode_field(field: &str) -> String {
    let needs_quotes = field.contains(['"', ',', '\n', '\r']);
    if !needs_quotes {
        return field.to_string();
    }

    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Decodes one physical line. `line_no` only feeds the error message.
pub fn decode_line(line: &str, line_no: usize) -> Result<Vec<String>, CsvError> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                    continue;
                }

                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: line_no });
    }

    fields.push(field);
    Ok(fields)
}

pub struct CsvWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            out: BufWriter::new(inner),
        }
    }

    pub fn write_record<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), CsvError> {
        self.out.write_all(encode_record(fields).as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), CsvError> {
        self.out.flush()?;
        Ok(())
    }
}

pub struct CsvReader<R: BufRead> {
    input: R,
    line_no: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> CsvReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line_no: 0,
            buf: Vec::new(),
        }
    }

    /// Returns `Ok(None)` once the input is exhausted.
    pub fn read_record(&mut self) -> Result<Option<Vec<String>>, CsvError> {
        self.buf.clear();

        // Two extra bytes so a line of exactly MAX_LINE_LEN still fits its "\r\n".
        let read = (&mut self.input)
            .take(MAX_LINE_LEN as u64 + 2)
            .read_until(b'\n', &mut self.buf)?;

        if read == 0 {
            return Ok(None);
        }

        self.line_no += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }

        let content_len = self.buf.len() - usize::from(self.buf.last() == Some(&b'\r'));
        if content_len > MAX_LINE_LEN {
            return Err(CsvError::LineTooLong {
                line: self.line_no,
                limit: MAX_LINE_LEN,
            });
        }

        let line = std::str::from_utf8(&self.buf)
            .map_err(|_| CsvError::InvalidUtf8 { line: self.line_no })?;

        decode_line(line, self.line_no).map(Some)
    }
}
