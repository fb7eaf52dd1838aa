use std::fs;
use std::path::PathBuf;

use crate::errors::{ParseError, ParseResult};
use crate::parsers::prelude::*;
use crate::types::Transaction;

#[derive(Debug)]
enum Source {
    Content(String),
    Path(PathBuf),
}

/// Entry point for turning a statement export into [`Transaction`]s.
///
/// Takes either in-memory content or a path to read; whichever was set last
/// is used.
#[derive(Debug, Default)]
pub struct ParserBuilder {
    source: Option<Source>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.source = Some(Source::Content(content.to_string()));
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(Source::Path(path.into()));
        self
    }

    /// Parses every row or none: the first bad row fails the whole call.
    pub fn parse(self) -> ParseResult<Vec<Transaction>> {
        let content = match self.source {
            Some(Source::Content(content)) => content,
            Some(Source::Path(path)) => fs::read_to_string(&path)
                .map_err(|source| ParseError::ReadContentFailed { path, source })?,
            None => return Err(ParseError::MissingContentAndFilepath),
        };

        CsvParser::parse(&content)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
