use crate::base_parser::{grammar, BodyParser, Fields, FLOAT};
use crate::messages::{MessageBody, ParosciPressureData};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

// The depth is a bare value with no key.
static PAROSCI_REGEX: Lazy<Regex> =
    Lazy::new(|| grammar(&format!(r"(?P<depth>{FLOAT})")));

/// Paroscientific depth sensor lines.
pub struct ParosciPressureParser;

impl ParosciPressureParser {
    pub fn parse_data(line: &str) -> Result<ParosciPressureData, ParseError> {
        let fields = Fields::matching(&PAROSCI_REGEX, line, MessageKind::ParosciPressure)?;
        Ok(ParosciPressureData {
            depth: fields.float("depth")?,
        })
    }
}

impl BodyParser for ParosciPressureParser {
    fn kind(&self) -> MessageKind {
        MessageKind::ParosciPressure
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::ParosciPressure)
    }
}
