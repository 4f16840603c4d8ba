//! Row cursor: field classification and row validation
//!
//! [`ParseCursor`] receives tokenizer events for one ingestion. It skips the
//! header row, hands data fields to the [`RowSink`] by column, checks each
//! completed row has enough fields and commits it. The first failure freezes the
//! cursor: every later event is ignored until the driver stops feeding input.

use tracing::trace;

use crate::constants::HEADER_ROW;
use crate::error::{IngestError, ParseErrorKind};

use super::schema::RowSink;
use super::tokenizer::RecordEvents;

/// First failure recorded by the cursor
#[derive(Debug)]
pub enum Failure {
    /// A field did not convert, or a row was too short
    Field {
        kind: ParseErrorKind,
        row: usize,
        column: usize,
        /// Offending field text, empty for short rows
        text: String,
    },
    /// Column storage could not grow
    Storage(IngestError),
}

#[derive(Debug)]
enum CursorState {
    AwaitingHeader,
    Reading { column: usize },
    Failed(Failure),
}

#[derive(Debug)]
pub struct ParseCursor<S> {
    sink: S,
    /// 1-based row number, header included
    row: usize,
    records: usize,
    state: CursorState,
}

impl<S: RowSink> ParseCursor<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            row: HEADER_ROW,
            records: 0,
            state: CursorState::AwaitingHeader,
        }
    }

    /// Row currently being scanned (1-based, header included)
    #[cfg(test)]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Records seen so far, header included
    pub fn records(&self) -> usize {
        self.records
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.state {
            CursorState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure().is_some()
    }

    /// Split into the sink and the failure, if any
    pub fn into_parts(self) -> (S, Option<Failure>) {
        match self.state {
            CursorState::Failed(failure) => (self.sink, Some(failure)),
            _ => (self.sink, None),
        }
    }

    fn fail(&mut self, failure: Failure) {
        trace!("Cursor failed at row {}: {:?}", self.row, failure);
        self.state = CursorState::Failed(failure);
    }
}

impl<S: RowSink> RecordEvents for ParseCursor<S> {
    fn field(&mut self, raw: &[u8]) {
        let CursorState::Reading { column } = self.state else {
            return;
        };

        match self.sink.store(column, raw) {
            Ok(()) => self.state = CursorState::Reading { column: column + 1 },
            Err(kind) => self.fail(Failure::Field {
                kind,
                row: self.row,
                column,
                text: String::from_utf8_lossy(raw).into_owned(),
            }),
        }
    }

    fn record_end(&mut self) {
        let column = match self.state {
            CursorState::Failed(_) => return,
            CursorState::AwaitingHeader => {
                self.records += 1;
                self.row += 1;
                self.state = CursorState::Reading { column: 1 };
                return;
            }
            CursorState::Reading { column } => column,
        };
        self.records += 1;

        if column - 1 < S::WIDTH {
            self.fail(Failure::Field {
                kind: ParseErrorKind::InsufficientFields,
                row: self.row,
                column,
                text: String::new(),
            });
            return;
        }

        if let Err(err) = self.sink.commit_row() {
            self.fail(Failure::Storage(err));
            return;
        }
        self.row += 1;
        self.state = CursorState::Reading { column: 1 };
    }
}
