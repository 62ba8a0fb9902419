use crate::messages::MessageBody;
use crate::types::{MessageHeader, MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Base trait that all body grammars implement
///
/// A parser works on the whole line, header included, so each grammar can be
/// matched and tested on its own.
pub trait BodyParser: Send + Sync {
    /// The message kind this parser produces
    fn kind(&self) -> MessageKind;

    /// Parse a full telemetry line into a body of `self.kind()`
    fn parse(&self, line: &str) -> Result<MessageBody, ParseError>;
}

/// Signed decimal with at least one digit: `12`, `-0.5`, `+.25`, `7.`
pub(crate) const FLOAT: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)";

/// Signed integer
pub(crate) const INT: &str = r"[-+]?\d+";

/// Header prefix re-derived by every body grammar
const PREFIX: &str = r"^(?P<topic>[^:]+):\s+(?P<timestamp>\d+\.\d+)\s+";

static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<topic>[^:]+):\s+(?P<timestamp>\d+\.\d+)\s")
        .expect("header grammar is a valid regular expression")
});

/// Extract `(topic, timestamp)` from the line prefix.
pub fn parse_header(line: &str) -> Result<MessageHeader, ParseError> {
    let captures = HEADER_REGEX
        .captures(line)
        .ok_or(ParseError::HeaderMismatch)?;
    Fields { captures }.header()
}

/// Compile a body grammar. `body` is written in verbose mode and is anchored
/// between the shared header prefix and end of line.
pub(crate) fn grammar(body: &str) -> Regex {
    Regex::new(&format!("(?x){PREFIX}{body}\\s*$"))
        .expect("body grammar is a valid regular expression")
}

/// Named captures of a matched grammar with typed accessors.
pub(crate) struct Fields<'t> {
    captures: Captures<'t>,
}

impl<'t> Fields<'t> {
    pub(crate) fn matching(
        regex: &Regex,
        line: &'t str,
        kind: MessageKind,
    ) -> Result<Self, ParseError> {
        regex
            .captures(line)
            .map(|captures| Self { captures })
            .ok_or(ParseError::GrammarMismatch { kind })
    }

    pub(crate) fn header(&self) -> Result<MessageHeader, ParseError> {
        Ok(MessageHeader {
            topic: self.text("topic")?.to_string(),
            timestamp: self.float("timestamp")?,
        })
    }

    pub(crate) fn optional(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    pub(crate) fn text(&self, name: &str) -> Result<&'t str, ParseError> {
        self.optional(name).ok_or_else(|| invalid(name, ""))
    }

    pub(crate) fn float(&self, name: &str) -> Result<f64, ParseError> {
        let value = self.text(name)?;
        value.parse().map_err(|_| invalid(name, value))
    }

    pub(crate) fn int(&self, name: &str) -> Result<i64, ParseError> {
        let value = self.text(name)?;
        value.parse().map_err(|_| invalid(name, value))
    }
}

fn invalid(field: &str, value: &str) -> ParseError {
    ParseError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let header = parse_header("THR_PORT:  1244855390.607  RPM:0.00 A:0.0400").unwrap();
        assert_eq!(header.topic, "THR_PORT");
        assert_eq!(header.timestamp, 1244855390.607);
    }

    #[test]
    fn test_parse_header_tab_separated() {
        let header = parse_header("PAROSCI:\t1244853355.812\t28.5529").unwrap();
        assert_eq!(header.topic, "PAROSCI");
        assert_eq!(header.timestamp, 1244853355.812);
    }

    #[test]
    fn test_parse_header_rejects_malformed_prefix() {
        for line in [
            "",
            "no header here",
            "THR_PORT 1244855390.607 RPM:0.00",
            "THR_PORT: abc RPM:0.00",
            "THR_PORT: 1244855390 RPM:0.00",
            "THR_PORT: -1244855390.607 RPM:0.00",
            "THR_PORT: 1244855390.607",
        ] {
            assert_eq!(parse_header(line), Err(ParseError::HeaderMismatch), "{line:?}");
        }
    }

    #[test]
    fn test_numeric_fragments() {
        let float = Regex::new(&format!("^{FLOAT}$")).unwrap();
        for value in ["12", "-0.5", "+.25", "7.", "0.0400"] {
            assert!(float.is_match(value), "{value}");
            assert!(value.parse::<f64>().is_ok(), "{value}");
        }
        for value in [".", "-", "1e5", "abc", ""] {
            assert!(!float.is_match(value), "{value}");
        }

        let int = Regex::new(&format!("^{INT}$")).unwrap();
        assert!(int.is_match("+42"));
        assert!(!int.is_match("4.2"));
    }

    #[test]
    fn test_fields_report_bad_integer() {
        let regex = grammar(&format!(r"n:(?P<n>{INT})"));
        let line = "X: 1.0 n:99999999999999999999";
        let fields = Fields::matching(&regex, line, MessageKind::TeledyneDvl).unwrap();
        assert_eq!(
            fields.int("n"),
            Err(ParseError::InvalidField {
                field: "n".to_string(),
                value: "99999999999999999999".to_string(),
            })
        );
    }
}
