//! Row decoding for uploaded CSV streams
//!
//! This module splits an upload into rows. Lines end at `\n`, `\r\n` or a
//! bare `\r`. Empty lines are kept as rows holding a single empty cell so
//! they are validated instead of skipped, which the `csv` reader on its own
//! would not do. Physical lines are grouped into one row while a quoted cell
//! is still open, and each row is split into cells by the `csv` crate.

use std::io::{self, BufRead};
use tracing::debug;

use crate::app::models::RawRow;
use crate::constants::{FIELD_DELIMITER, HEADER_LINE, QUOTE_CHAR};
use crate::error::DecodeError;

const DELIMITER: char = FIELD_DELIMITER as char;

/// One physical line and the terminator that ended it
struct PhysicalLine {
    text: String,
    terminator: &'static str,
}

/// Iterator over the rows of an upload, header included
///
/// Rows are numbered from [`HEADER_LINE`]. The decoder owns the reader, so
/// the underlying stream is released as soon as the decoder is dropped.
/// After an I/O failure the decoder yields no further rows.
pub struct RowDecoder<R> {
    reader: R,
    next_line: usize,
    failed: bool,
}

impl<R: BufRead> RowDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            next_line: HEADER_LINE,
            failed: false,
        }
    }

    /// Line number the next row will carry
    pub fn next_line(&self) -> usize {
        self.next_line
    }

    /// Read up to the next `\n`, `\r\n` or `\r`; `None` at end of input
    fn read_physical_line(&mut self) -> Option<io::Result<PhysicalLine>> {
        let mut bytes = Vec::new();
        let mut read_any = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            };

            if available.is_empty() {
                return read_any.then(|| decode_line(bytes, ""));
            }
            read_any = true;

            let Some(end) = available.iter().position(|&b| b == b'\n' || b == b'\r') else {
                let len = available.len();
                bytes.extend_from_slice(available);
                self.reader.consume(len);
                continue;
            };

            let ended_by_cr = available[end] == b'\r';
            bytes.extend_from_slice(&available[..end]);
            self.reader.consume(end + 1);

            let terminator = if ended_by_cr {
                let followed_by_lf = match self.reader.fill_buf() {
                    Ok(next) => next.first() == Some(&b'\n'),
                    Err(e) => return Some(Err(e)),
                };
                if followed_by_lf {
                    self.reader.consume(1);
                    "\r\n"
                } else {
                    "\r"
                }
            } else {
                "\n"
            };

            return Some(decode_line(bytes, terminator));
        }
    }

    /// Collect physical lines until no quoted cell is left open
    fn read_record_text(&mut self, line: usize) -> Option<Result<String, DecodeError>> {
        let first = match self.read_physical_line()? {
            Ok(first) => first,
            Err(source) => return Some(Err(DecodeError::Io { line, source })),
        };

        let mut text = first.text;
        let mut terminator = first.terminator;

        while has_open_quote(&text) {
            match self.read_physical_line() {
                Some(Ok(more)) => {
                    // Line breaks inside a quoted cell are kept as written
                    text.push_str(terminator);
                    text.push_str(&more.text);
                    terminator = more.terminator;
                }
                Some(Err(source)) => return Some(Err(DecodeError::Io { line, source })),
                // Unterminated quote at end of input, let the csv reader decide
                None => break,
            }
        }

        Some(Ok(text))
    }
}

fn decode_line(bytes: Vec<u8>, terminator: &'static str) -> io::Result<PhysicalLine> {
    String::from_utf8(bytes)
        .map(|text| PhysicalLine { text, terminator })
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

impl<R: BufRead> Iterator for RowDecoder<R> {
    type Item = Result<RawRow, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let line = self.next_line;
        let text = match self.read_record_text(line)? {
            Ok(text) => text,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        self.next_line += 1;

        let row = split_cells(&text, line).map(|cells| RawRow::new(line, cells));
        if let Ok(row) = &row {
            debug!("Decoded line {} into {} cells", line, row.len());
        }
        Some(row)
    }
}

/// Split one logical record into its cells
pub fn split_cells(text: &str, line: usize) -> Result<Vec<String>, DecodeError> {
    // An empty line is a row with one empty cell
    if text.is_empty() {
        return Ok(vec![String::new()]);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(FIELD_DELIMITER)
        .from_reader(text.as_bytes());

    let mut record = csv::StringRecord::new();
    let cells = match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        Ok(false) => vec![String::new()],
        Err(source) => return Err(DecodeError::Csv { line, source }),
    };

    // The text must hold exactly one record
    match reader.read_record(&mut record) {
        Ok(false) => Ok(cells),
        Ok(true) => Err(DecodeError::MultipleRecords { line }),
        Err(source) => Err(DecodeError::Csv { line, source }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    ClosingQuote,
}

/// Whether `text` ends inside a quoted cell
///
/// Quotes only open a quoted cell at the start of a field; a doubled quote
/// inside a quoted cell is an escaped quote.
pub fn has_open_quote(text: &str) -> bool {
    let mut state = QuoteState::FieldStart;

    for c in text.chars() {
        state = match (state, c) {
            (QuoteState::Quoted, QUOTE_CHAR) => QuoteState::ClosingQuote,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::FieldStart | QuoteState::ClosingQuote, QUOTE_CHAR) => QuoteState::Quoted,
            (_, DELIMITER) => QuoteState::FieldStart,
            _ => QuoteState::Unquoted,
        };
    }

    state == QuoteState::Quoted
}
