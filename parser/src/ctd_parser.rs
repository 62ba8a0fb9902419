use crate::base_parser::{grammar, BodyParser, Fields, FLOAT};
use crate::messages::{CtdData, MessageBody};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

// Seabird and Aanderaa CTDs are logged with the same token layout.
static CTD_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        cond:\s*(?P<conductivity>{FLOAT})\s+
        temp:\s*(?P<temperature>{FLOAT})\s+
        sal:\s*(?P<salinity>{FLOAT})\s+
        pres:\s*(?P<pressure>{FLOAT})\s+
        sos:\s*(?P<sound_velocity>{FLOAT})
        "
    ))
});

fn parse_ctd(line: &str, kind: MessageKind) -> Result<CtdData, ParseError> {
    let fields = Fields::matching(&CTD_REGEX, line, kind)?;
    Ok(CtdData {
        conductivity: fields.float("conductivity")?,
        temperature: fields.float("temperature")?,
        salinity: fields.float("salinity")?,
        pressure: fields.float("pressure")?,
        sound_velocity: fields.float("sound_velocity")?,
    })
}

pub struct SeabirdCtdParser;

impl SeabirdCtdParser {
    pub fn parse_data(line: &str) -> Result<CtdData, ParseError> {
        parse_ctd(line, MessageKind::SeabirdCtd)
    }
}

impl BodyParser for SeabirdCtdParser {
    fn kind(&self) -> MessageKind {
        MessageKind::SeabirdCtd
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::SeabirdCtd)
    }
}

pub struct AanderaaCtdParser;

impl AanderaaCtdParser {
    pub fn parse_data(line: &str) -> Result<CtdData, ParseError> {
        parse_ctd(line, MessageKind::AanderaaCtd)
    }
}

impl BodyParser for AanderaaCtdParser {
    fn kind(&self) -> MessageKind {
        MessageKind::AanderaaCtd
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::AanderaaCtd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str =
        "SEABIRD: 1244853361.041 cond:4.20311 temp:13.4561 sal:35.4012 pres:28.911 sos:1502.114";

    #[test]
    fn test_parse_seabird() {
        let data = SeabirdCtdParser::parse_data(LINE).unwrap();
        assert_eq!(data.conductivity, 4.20311);
        assert_eq!(data.temperature, 13.4561);
        assert_eq!(data.salinity, 35.4012);
        assert_eq!(data.pressure, 28.911);
        assert_eq!(data.sound_velocity, 1502.114);
    }

    #[test]
    fn test_same_line_different_kind() {
        let seabird = SeabirdCtdParser.parse(LINE).unwrap();
        let aanderaa = AanderaaCtdParser.parse(LINE).unwrap();
        assert_eq!(seabird.kind(), MessageKind::SeabirdCtd);
        assert_eq!(aanderaa.kind(), MessageKind::AanderaaCtd);
    }

    #[test]
    fn test_mismatch_names_the_kind() {
        let line = "OPTODE: 1244853361.041 cond:4.20311 temp:13.4561 sal:35.4012";
        assert_eq!(
            AanderaaCtdParser.parse(line),
            Err(ParseError::GrammarMismatch {
                kind: MessageKind::AanderaaCtd
            })
        );
    }

    #[test]
    fn test_signed_values() {
        let line = "CTD: 1.5 cond:-0.1 temp:+2 sal:0.0 pres:-.5 sos:1500.";
        let data = SeabirdCtdParser::parse_data(line).unwrap();
        assert_eq!(data.conductivity, -0.1);
        assert_eq!(data.temperature, 2.0);
        assert_eq!(data.pressure, -0.5);
        assert_eq!(data.sound_velocity, 1500.0);
    }
}
