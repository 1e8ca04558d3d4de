use std::io::{self, BufRead, BufReader};

use csv::StringRecord;
use csv_core::ReadRecordResult;

use crate::error::{ImportError, ImportResult, RecordError};

const QUOTE: u8 = b'"';
const DELIMITER: u8 = b',';

/// One decoded record of the customer file.
#[derive(Debug, Default, Clone)]
pub struct RawRecord {
    fields: StringRecord,
    row: u64,
}

impl RawRecord {
    /// Record number in the source, header included.
    pub fn row(&self) -> u64 {
        self.row
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter()
    }
}

/// Streams records out of comma separated text one at a time.
///
/// Decoding is done by `csv_core`, which accepts broken quoting. The raw
/// bytes of every record are kept alongside and checked, so a stray or
/// unbalanced quote fails the record instead of swallowing the rest of the
/// input. All buffers are reused across reads; memory is bounded by the
/// longest record.
pub struct RecordReader<R> {
    source: BufReader<R>,
    core: csv_core::Reader,
    raw: Vec<u8>,
    output: Vec<u8>,
    ends: Vec<usize>,
    record: RawRecord,
    row: u64,
}

impl<R: io::Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            source: BufReader::new(reader),
            core: csv_core::Reader::new(),
            raw: Vec::new(),
            output: vec![0; 1024],
            ends: vec![0; 16],
            record: RawRecord::default(),
            row: 0,
        }
    }

    /// Consumes the header row without looking at its contents.
    pub fn skip_header(&mut self) -> ImportResult<()> {
        match self.read_record() {
            Ok(true) => Ok(()),
            Ok(false) => Err(ImportError::EmptyOrUnreadableSource { source: None }),
            Err(e) => Err(ImportError::EmptyOrUnreadableSource { source: Some(e) }),
        }
    }

    /// Returns the next record, or `None` once the input is exhausted.
    pub fn next_record(&mut self) -> ImportResult<Option<&RawRecord>> {
        match self.read_record() {
            Ok(true) => Ok(Some(&self.record)),
            Ok(false) => Ok(None),
            Err(source) => Err(ImportError::MalformedRecord {
                row: self.row + 1,
                source,
            }),
        }
    }

    /// Data records returned so far, header excluded.
    pub fn rows_read(&self) -> u64 {
        self.row.saturating_sub(1)
    }

    fn read_record(&mut self) -> Result<bool, RecordError> {
        self.raw.clear();
        let mut out_len = 0;
        let mut ends_len = 0;

        loop {
            let input = self.source.fill_buf()?;
            let at_eof = input.is_empty();
            let (result, n_in, n_out, n_ends) = self.core.read_record(
                input,
                &mut self.output[out_len..],
                &mut self.ends[ends_len..],
            );
            self.raw.extend_from_slice(&input[..n_in]);
            self.source.consume(n_in);
            out_len += n_out;
            ends_len += n_ends;

            match result {
                ReadRecordResult::InputEmpty if at_eof => return Ok(false),
                ReadRecordResult::InputEmpty => {}
                ReadRecordResult::OutputFull => {
                    let len = self.output.len() * 2;
                    self.output.resize(len, 0);
                }
                ReadRecordResult::OutputEndsFull => {
                    let len = self.ends.len() * 2;
                    self.ends.resize(len, 0);
                }
                ReadRecordResult::Record => break,
                ReadRecordResult::End => return Ok(false),
            }
        }

        check_quotes(&self.raw)?;

        let text = std::str::from_utf8(&self.output[..out_len])?;
        self.record.fields.clear();
        let mut start = 0;
        for &end in &self.ends[..ends_len] {
            self.record.fields.push_field(&text[start..end]);
            start = end;
        }

        self.row += 1;
        self.record.row = self.row;
        Ok(true)
    }
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    // a quote inside a quoted field: either a closing quote or half of `""`
    QuoteInQuoted,
}

/// Rejects bare quotes, text after a closing quote and unclosed quotes.
fn check_quotes(raw: &[u8]) -> Result<(), RecordError> {
    let mut state = QuoteState::FieldStart;

    for &byte in raw {
        let line_end = byte == b'\n' || byte == b'\r';
        state = match state {
            QuoteState::FieldStart if byte == QUOTE => QuoteState::Quoted,
            QuoteState::FieldStart | QuoteState::Unquoted if byte == DELIMITER || line_end => {
                QuoteState::FieldStart
            }
            QuoteState::FieldStart | QuoteState::Unquoted if byte == QUOTE => {
                return Err(RecordError::BareQuote)
            }
            QuoteState::FieldStart | QuoteState::Unquoted => QuoteState::Unquoted,
            QuoteState::Quoted if byte == QUOTE => QuoteState::QuoteInQuoted,
            QuoteState::Quoted => QuoteState::Quoted,
            QuoteState::QuoteInQuoted if byte == QUOTE => QuoteState::Quoted,
            QuoteState::QuoteInQuoted if byte == DELIMITER || line_end => QuoteState::FieldStart,
            QuoteState::QuoteInQuoted => return Err(RecordError::TextAfterQuote),
        };
    }

    match state {
        QuoteState::Quoted => Err(RecordError::UnterminatedQuote),
        _ => Ok(()),
    }
}
