use crate::types::{MessageKind, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a line of a batch did not produce a message.
///
/// Every skipped line yields exactly one diagnostic. Line numbers are 1-based
/// positions in the batch input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The line has no `<topic>: <timestamp>` prefix.
    HeaderMismatch { line_number: usize, line: String },
    /// The topic is not part of the protocol. Expected for sensors the
    /// protocol leaves out.
    UnroutedTopic { line_number: usize, topic: String },
    /// The topic is routed but the body grammar rejected the line.
    BodyMismatch {
        line_number: usize,
        topic: String,
        kind: MessageKind,
        reason: ParseError,
        line: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    HeaderMismatch,
    UnroutedTopic,
    UnknownTopicLabel,
    BodyMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Diagnostic {
    pub fn line_number(&self) -> usize {
        match self {
            Diagnostic::HeaderMismatch { line_number, .. }
            | Diagnostic::UnroutedTopic { line_number, .. }
            | Diagnostic::BodyMismatch { line_number, .. } => *line_number,
        }
    }

    pub fn topic(&self) -> Option<&str> {
        match self {
            Diagnostic::HeaderMismatch { .. } => None,
            Diagnostic::UnroutedTopic { topic, .. } | Diagnostic::BodyMismatch { topic, .. } => {
                Some(topic)
            }
        }
    }

    /// Unknown topic labels are body failures, reported under their own category.
    pub fn category(&self) -> DiagnosticCategory {
        match self {
            Diagnostic::HeaderMismatch { .. } => DiagnosticCategory::HeaderMismatch,
            Diagnostic::UnroutedTopic { .. } => DiagnosticCategory::UnroutedTopic,
            Diagnostic::BodyMismatch {
                reason: ParseError::UnknownTopicLabel { .. },
                ..
            } => DiagnosticCategory::UnknownTopicLabel,
            Diagnostic::BodyMismatch { .. } => DiagnosticCategory::BodyMismatch,
        }
    }

    pub fn severity(&self) -> Severity {
        self.category().severity()
    }
}

impl DiagnosticCategory {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCategory::UnroutedTopic => Severity::Info,
            DiagnosticCategory::HeaderMismatch => Severity::Warning,
            DiagnosticCategory::UnknownTopicLabel | DiagnosticCategory::BodyMismatch => {
                Severity::Error
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCategory::HeaderMismatch => "header_mismatch",
            DiagnosticCategory::UnroutedTopic => "unrouted_topic",
            DiagnosticCategory::UnknownTopicLabel => "unknown_topic_label",
            DiagnosticCategory::BodyMismatch => "body_mismatch",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::HeaderMismatch { line_number, line } => {
                write!(f, "line {}: no message header: {:?}", line_number, line)
            }
            Diagnostic::UnroutedTopic { line_number, topic } => {
                write!(f, "line {}: topic `{}` is not in the protocol", line_number, topic)
            }
            Diagnostic::BodyMismatch {
                line_number,
                topic,
                kind,
                reason,
                line,
            } => write!(
                f,
                "line {}: failed to parse `{}` as {}: {}: {:?}",
                line_number, topic, kind, reason, line
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_mismatch(reason: ParseError) -> Diagnostic {
        Diagnostic::BodyMismatch {
            line_number: 7,
            topic: "BATT3".to_string(),
            kind: MessageKind::Battery,
            reason,
            line: "BATT3: 1000.0 ...".to_string(),
        }
    }

    #[test]
    fn test_categories_and_severity() {
        let header = Diagnostic::HeaderMismatch {
            line_number: 1,
            line: "garbage".to_string(),
        };
        assert_eq!(header.category(), DiagnosticCategory::HeaderMismatch);
        assert_eq!(header.severity(), Severity::Warning);
        assert_eq!(header.topic(), None);

        let unrouted = Diagnostic::UnroutedTopic {
            line_number: 2,
            topic: "FOO".to_string(),
        };
        assert_eq!(unrouted.severity(), Severity::Info);
        assert_eq!(unrouted.topic(), Some("FOO"));

        let label = body_mismatch(ParseError::UnknownTopicLabel {
            kind: MessageKind::Battery,
            topic: "BATT3".to_string(),
        });
        assert_eq!(label.category(), DiagnosticCategory::UnknownTopicLabel);
        assert_eq!(label.severity(), Severity::Error);

        let garbled = body_mismatch(ParseError::GrammarMismatch {
            kind: MessageKind::Battery,
        });
        assert_eq!(garbled.category(), DiagnosticCategory::BodyMismatch);
        assert_eq!(garbled.line_number(), 7);
    }

    #[test]
    fn test_display_mentions_kind_and_reason() {
        let text = body_mismatch(ParseError::GrammarMismatch {
            kind: MessageKind::Battery,
        })
        .to_string();
        assert!(text.starts_with("line 7: failed to parse `BATT3` as BatteryMessage"));
        assert!(text.contains("does not match the BatteryMessage grammar"));
    }
}
