use crate::base_parser::{grammar, BodyParser, Fields, FLOAT};
use crate::messages::{EcopuckData, MessageBody};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

static ECOPUCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        chlor:\s*(?P<chlorophyll>{FLOAT})\s+
        bcksct:\s*(?P<backscatter>{FLOAT})\s+
        cdom:\s*(?P<cdom>{FLOAT})\s+
        temp:\s*(?P<temperature>{FLOAT})
        "
    ))
});

/// Wetlabs ECO Puck water quality lines.
pub struct EcopuckParser;

impl EcopuckParser {
    pub fn parse_data(line: &str) -> Result<EcopuckData, ParseError> {
        let fields = Fields::matching(&ECOPUCK_REGEX, line, MessageKind::Ecopuck)?;
        Ok(EcopuckData {
            chlorophyll: fields.float("chlorophyll")?,
            backscatter: fields.float("backscatter")?,
            cdom: fields.float("cdom")?,
            temperature: fields.float("temperature")?,
        })
    }
}

impl BodyParser for EcopuckParser {
    fn kind(&self) -> MessageKind {
        MessageKind::Ecopuck
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::Ecopuck)
    }
}
