use crate::base_parser::{grammar, BodyParser, Fields, FLOAT};
use crate::messages::{MessageBody, ThrusterData};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

static THRUSTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        RPM:\s*(?P<rpm>{FLOAT})\s+
        A:\s*(?P<current>{FLOAT})\s+
        V:\s*(?P<voltage>{FLOAT})\s+
        T:\s*(?P<temperature>{FLOAT})
        "
    ))
});

/// Label for a thruster topic. Thruster lines carry no name of their own.
pub fn thruster_label(topic: &str) -> Option<&'static str> {
    match topic {
        "THR_PORT" => Some("thruster_portside"),
        "THR_STBD" => Some("thruster_starboard"),
        "THR_VERT" => Some("thruster_vertical"),
        _ => None,
    }
}

pub struct ThrusterParser;

impl ThrusterParser {
    pub fn parse_data(line: &str) -> Result<ThrusterData, ParseError> {
        let fields = Fields::matching(&THRUSTER_REGEX, line, MessageKind::Thruster)?;

        let topic = fields.text("topic")?;
        let label = thruster_label(topic).ok_or_else(|| ParseError::UnknownTopicLabel {
            kind: MessageKind::Thruster,
            topic: topic.to_string(),
        })?;

        Ok(ThrusterData {
            label: label.to_string(),
            rpm: fields.float("rpm")?,
            current: fields.float("current")?,
            voltage: fields.float("voltage")?,
            temperature: fields.float("temperature")?,
        })
    }
}

impl BodyParser for ThrusterParser {
    fn kind(&self) -> MessageKind {
        MessageKind::Thruster
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::Thruster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thruster() {
        let line = "THR_PORT:  1244855390.607  RPM:0.00 A:0.0400 V:46.80 T:29.00";
        let data = ThrusterParser::parse_data(line).unwrap();
        assert_eq!(data.label, "thruster_portside");
        assert_eq!(data.rpm, 0.0);
        assert_eq!(data.current, 0.04);
        assert_eq!(data.voltage, 46.8);
        assert_eq!(data.temperature, 29.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(thruster_label("THR_STBD"), Some("thruster_starboard"));
        assert_eq!(thruster_label("THR_VERT"), Some("thruster_vertical"));
        assert_eq!(thruster_label("thr_port"), None);
    }

    #[test]
    fn test_unknown_topic_label() {
        let line = "THR_AFT: 1244855390.607 RPM:-120.5 A:1.2 V:46.80 T:29.00";
        assert_eq!(
            ThrusterParser.parse(line),
            Err(ParseError::UnknownTopicLabel {
                kind: MessageKind::Thruster,
                topic: "THR_AFT".to_string(),
            })
        );
    }

    #[test]
    fn test_reject_non_numeric_token() {
        let line = "THR_PORT: 1244855390.607 RPM:fast A:0.0400 V:46.80 T:29.00";
        assert!(ThrusterParser.parse(line).is_err());
    }
}
