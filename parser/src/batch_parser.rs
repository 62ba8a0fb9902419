use crate::base_parser::parse_header;
use crate::diagnostics::{Diagnostic, DiagnosticCategory};
use crate::messages::Message;
use crate::protocol::Protocol;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of routing a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed(Message),
    Skipped(Diagnostic),
}

/// Messages grouped by topic plus one diagnostic per skipped line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutput {
    /// Topics in order of first appearance; messages in line order.
    pub messages: IndexMap<String, Vec<Message>>,
    /// In line order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    fn push(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Parsed(message) => self
                .messages
                .entry(message.header.topic.clone())
                .or_default()
                .push(message),
            LineOutcome::Skipped(diagnostic) => self.diagnostics.push(diagnostic),
        }
    }

    /// Append a later batch. Per-topic message order and diagnostic order
    /// follow input order when batches are merged in input order.
    pub fn merge(&mut self, other: ParseOutput) {
        for (topic, messages) in other.messages {
            self.messages.entry(topic).or_default().extend(messages);
        }
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn message_count(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Number of input lines visited.
    pub fn line_count(&self) -> usize {
        self.message_count() + self.diagnostics.len()
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> + '_ {
        self.messages.keys().map(String::as_str)
    }

    pub fn messages_for(&self, topic: &str) -> &[Message] {
        self.messages.get(topic).map_or(&[], Vec::as_slice)
    }

    pub fn diagnostic_counts(&self) -> BTreeMap<DiagnosticCategory, usize> {
        let mut counts = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.category()).or_insert(0) += 1;
        }
        counts
    }

    /// Body failures on routed topics, unknown labels included.
    pub fn body_error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::BodyMismatch { .. }))
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.body_error_count() > 0
    }
}

/// Route and parse one line. `line_number` is only used for diagnostics.
pub fn parse_line(line_number: usize, line: &str, protocol: &Protocol) -> LineOutcome {
    let header = match parse_header(line) {
        Ok(header) => header,
        Err(_) => {
            return LineOutcome::Skipped(Diagnostic::HeaderMismatch {
                line_number,
                line: line.to_string(),
            })
        }
    };

    let Some(entry) = protocol.get(&header.topic) else {
        return LineOutcome::Skipped(Diagnostic::UnroutedTopic {
            line_number,
            topic: header.topic,
        });
    };

    match entry.parser.parse(line) {
        Ok(body) => {
            debug_assert_eq!(body.kind(), entry.kind);
            LineOutcome::Parsed(Message::new(header, body))
        }
        Err(reason) => LineOutcome::Skipped(Diagnostic::BodyMismatch {
            line_number,
            topic: header.topic,
            kind: entry.kind,
            reason,
            line: line.to_string(),
        }),
    }
}

/// Parse a batch of lines against a protocol. Lines are numbered from 1.
///
/// Never fails: every line ends up either as a message under its topic or as
/// a diagnostic.
pub fn parse_lines<I, S>(lines: I, protocol: &Protocol) -> ParseOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_numbered_lines(
        lines.into_iter().enumerate().map(|(index, line)| (index + 1, line)),
        protocol,
    )
}

/// Like `parse_lines`, for lines that already carry their source line number
/// (see `line_source::prepare_lines`).
pub fn parse_numbered_lines<I, S>(lines: I, protocol: &Protocol) -> ParseOutput
where
    I: IntoIterator<Item = (usize, S)>,
    S: AsRef<str>,
{
    let mut output = ParseOutput::default();
    for (line_number, line) in lines {
        output.push(parse_line(line_number, line.as_ref(), protocol));
    }
    output
}

/// Same result as `parse_lines`, with the per-line work spread over the rayon
/// pool. Outcomes are merged back in line order.
pub fn parse_lines_parallel<S>(lines: &[S], protocol: &Protocol) -> ParseOutput
where
    S: AsRef<str> + Sync,
{
    let outcomes: Vec<LineOutcome> = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| parse_line(index + 1, line.as_ref(), protocol))
        .collect();
    fold_outcomes(outcomes)
}

/// Same result as `parse_numbered_lines`, on the rayon pool.
pub fn parse_numbered_lines_parallel<S>(lines: &[(usize, S)], protocol: &Protocol) -> ParseOutput
where
    S: AsRef<str> + Sync,
{
    let outcomes: Vec<LineOutcome> = lines
        .par_iter()
        .map(|(line_number, line)| parse_line(*line_number, line.as_ref(), protocol))
        .collect();
    fold_outcomes(outcomes)
}

fn fold_outcomes(outcomes: Vec<LineOutcome>) -> ParseOutput {
    let mut output = ParseOutput::default();
    for outcome in outcomes {
        output.push(outcome);
    }
    output
}
