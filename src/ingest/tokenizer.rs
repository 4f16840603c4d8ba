//! Push-based CSV tokenizer
//!
//! The ingestion driver hands raw byte chunks to a [`Tokenizer`], which reports
//! each field and each record boundary through [`RecordEvents`] as soon as it is
//! recognised. Fields and records may straddle chunk boundaries; the tokenizer
//! keeps the partial field between calls.
//!
//! [`CsvTokenizer`] is backed by `csv_core`: comma delimited, CR, LF or CRLF
//! terminated, no quoting. Blank lines produce no events.

use csv_core::{ReadFieldResult, Reader, ReaderBuilder, Terminator};
use thiserror::Error;

use crate::config::IngestConfig;

const INITIAL_FIELD_BUFFER: usize = 64;

/// Receiver of tokenizer events
pub trait RecordEvents {
    /// A complete field, without delimiter
    fn field(&mut self, raw: &[u8]);

    /// The end of the record whose fields were just reported
    fn record_end(&mut self);
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TokenizerError {
    /// Line being scanned when the error occurred
    pub line: u64,
    pub message: String,
}

/// Streaming tokenizer interface consumed by the driver
pub trait Tokenizer {
    /// Scan one chunk, reporting every boundary found in it
    fn feed<E: RecordEvents>(
        &mut self,
        chunk: &[u8],
        events: &mut E,
    ) -> Result<(), TokenizerError>;

    /// Flush a trailing record that has no terminator
    fn finish<E: RecordEvents>(&mut self, events: &mut E) -> Result<(), TokenizerError>;
}

pub struct CsvTokenizer {
    reader: Reader,
    field: Vec<u8>,
    field_len: usize,
    fields_in_record: usize,
    max_field_len: usize,
    trim_whitespace: bool,
}

impl CsvTokenizer {
    pub fn new(config: &IngestConfig) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(b',')
            .terminator(Terminator::CRLF)
            .quoting(false)
            .build();

        Self {
            reader,
            field: vec![0; INITIAL_FIELD_BUFFER.min(config.max_field_len.saturating_add(1))],
            field_len: 0,
            fields_in_record: 0,
            max_field_len: config.max_field_len,
            trim_whitespace: config.trim_whitespace,
        }
    }

    /// Double the field buffer, refusing to pass the configured limit
    ///
    /// The buffer holds up to `max_field_len + 1` bytes: `csv_core` reports a
    /// full output before it looks at the delimiter, so a field of exactly the
    /// limit needs one spare byte to complete.
    fn grow_field_buffer(&mut self) -> Result<(), TokenizerError> {
        if self.field.len() > self.max_field_len {
            return Err(TokenizerError {
                line: self.reader.line(),
                message: format!("field exceeds the {} byte limit", self.max_field_len),
            });
        }
        let new_len = (self.field.len() * 2).min(self.max_field_len.saturating_add(1));
        self.field.resize(new_len, 0);
        Ok(())
    }

    fn emit<E: RecordEvents>(&mut self, record_end: bool, events: &mut E) {
        let raw = &self.field[..self.field_len];
        let text = if self.trim_whitespace {
            trim_blanks(raw)
        } else {
            raw
        };

        // A line of nothing but blanks is skipped like an empty line.
        let blank_line = record_end && self.fields_in_record == 0 && trim_blanks(raw).is_empty();
        if !blank_line {
            events.field(text);
            if record_end {
                events.record_end();
            }
        }

        self.field_len = 0;
        self.fields_in_record = if record_end {
            0
        } else {
            self.fields_in_record + 1
        };
    }
}

impl Tokenizer for CsvTokenizer {
    fn feed<E: RecordEvents>(
        &mut self,
        chunk: &[u8],
        events: &mut E,
    ) -> Result<(), TokenizerError> {
        let mut input = chunk;

        // An empty slice means end of input to csv_core, so never pass one here.
        while !input.is_empty() {
            let (result, consumed, written) = self
                .reader
                .read_field(input, &mut self.field[self.field_len..]);
            input = &input[consumed..];
            self.field_len += written;

            match result {
                ReadFieldResult::InputEmpty => {}
                ReadFieldResult::OutputFull => self.grow_field_buffer()?,
                ReadFieldResult::Field { record_end } => self.emit(record_end, events),
                ReadFieldResult::End => break,
            }
        }
        Ok(())
    }

    fn finish<E: RecordEvents>(&mut self, events: &mut E) -> Result<(), TokenizerError> {
        loop {
            let (result, _, written) = self
                .reader
                .read_field(&[], &mut self.field[self.field_len..]);
            self.field_len += written;

            match result {
                ReadFieldResult::OutputFull => self.grow_field_buffer()?,
                ReadFieldResult::Field { record_end } => self.emit(record_end, events),
                ReadFieldResult::InputEmpty | ReadFieldResult::End => return Ok(()),
            }
        }
    }
}

/// Strip spaces and tabs from both ends
fn trim_blanks(raw: &[u8]) -> &[u8] {
    let is_blank = |byte: &u8| matches!(byte, b' ' | b'\t');
    let start = raw.iter().position(|b| !is_blank(b)).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !is_blank(b)).map_or(start, |i| i + 1);
    &raw[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        records: Vec<Vec<String>>,
        current: Vec<String>,
    }

    impl RecordEvents for Recorder {
        fn field(&mut self, raw: &[u8]) {
            self.current.push(String::from_utf8_lossy(raw).into_owned());
        }

        fn record_end(&mut self) {
            self.records.push(std::mem::take(&mut self.current));
        }
    }

    fn tokenize(input: &[u8], chunk_size: usize, config: &IngestConfig) -> Vec<Vec<String>> {
        let mut tokenizer = CsvTokenizer::new(config);
        let mut recorder = Recorder::default();
        for chunk in input.chunks(chunk_size) {
            tokenizer.feed(chunk, &mut recorder).unwrap();
        }
        tokenizer.finish(&mut recorder).unwrap();
        recorder.records
    }

    #[test]
    fn test_fields_and_records() {
        let records = tokenize(b"a,b,c\n1,2,3\n", 1024, &IngestConfig::default());
        assert_eq!(records, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_fields_spanning_chunks_are_reassembled() {
        let input = b"idx,year,week,est\r\n0,2020,1,100\r\n0,2020,2,150";
        let expected = tokenize(input, 1024, &IngestConfig::default());
        for chunk_size in 1..8 {
            assert_eq!(tokenize(input, chunk_size, &IngestConfig::default()), expected);
        }
        assert_eq!(expected.len(), 3);
        assert_eq!(expected[2], vec!["0", "2020", "2", "150"]);
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let records = tokenize(b"h\n\n \t \n 1 ,\t2\n\r\n", 1024, &IngestConfig::default());
        assert_eq!(records, vec![vec!["h"], vec!["1", "2"]]);

        let untrimmed = tokenize(b" 1 ,2\n", 1024, &IngestConfig::default().without_trimming());
        assert_eq!(untrimmed, vec![vec![" 1 ", "2"]]);
    }

    #[test]
    fn test_quotes_are_literal() {
        let records = tokenize(b"\"1\",2\n", 1024, &IngestConfig::default());
        assert_eq!(records, vec![vec!["\"1\"", "2"]]);
    }

    #[test]
    fn test_empty_fields_are_reported() {
        let records = tokenize(b"0,,3,\n", 1024, &IngestConfig::default());
        assert_eq!(records, vec![vec!["0", "", "3", ""]]);
    }

    #[test]
    fn test_field_length_limit() {
        let config = IngestConfig::default().with_max_field_len(8);
        let mut tokenizer = CsvTokenizer::new(&config);
        let mut recorder = Recorder::default();

        let result = tokenizer.feed(b"ok,0123456789abcdef,x\n", &mut recorder);
        let err = result.unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("8 byte limit"));
    }

    #[test]
    fn test_field_of_exactly_the_limit_is_accepted() {
        let config = IngestConfig::default().with_max_field_len(8);
        for chunk_size in [1, 3, 1024] {
            let records = tokenize(b"12345678,x\n", chunk_size, &config);
            assert_eq!(records, vec![vec!["12345678", "x"]]);
        }

        let mut tokenizer = CsvTokenizer::new(&config);
        let err = tokenizer
            .feed(b"123456789,x\n", &mut Recorder::default())
            .unwrap_err();
        assert!(err.message.contains("8 byte limit"));
    }

    #[test]
    fn test_limit_at_initial_buffer_size() {
        let config = IngestConfig::default().with_max_field_len(INITIAL_FIELD_BUFFER);
        let exact = "7".repeat(INITIAL_FIELD_BUFFER);
        let records = tokenize(format!("{},x\n", exact).as_bytes(), 1024, &config);
        assert_eq!(records, vec![vec![exact.as_str(), "x"]]);

        let over = "7".repeat(INITIAL_FIELD_BUFFER + 1);
        let mut tokenizer = CsvTokenizer::new(&config);
        let err = tokenizer
            .feed(format!("{},x\n", over).as_bytes(), &mut Recorder::default())
            .unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_unterminated_field_of_exactly_the_limit() {
        let config = IngestConfig::default().with_max_field_len(4);
        let records = tokenize(b"h\n1234", 2, &config);
        assert_eq!(records, vec![vec!["h"], vec!["1234"]]);
    }
}
