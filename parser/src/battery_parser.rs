use crate::base_parser::{grammar, BodyParser, Fields, FLOAT, INT};
use crate::messages::{BatteryData, MessageBody};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

static BATTERY_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        TimeLeft:\s*(?P<time_left>{INT})\s+
        PercentCharge:\s*(?P<charge_percent>{INT})\s+
        Current:\s*(?P<current>{FLOAT})\s+
        Voltage:\s*(?P<voltage>{FLOAT})\s+
        Power:\s*(?P<power>{FLOAT})\s+
        Charging:\s*(?P<charging>[01])
        "
    ))
});

/// Label for a battery topic. Battery lines carry no name of their own.
pub fn battery_label(topic: &str) -> Option<&'static str> {
    match topic {
        "BATT" => Some("battery"),
        "BATT0" => Some("battery_00"),
        "BATT1" => Some("battery_01"),
        "BATT2" => Some("battery_02"),
        _ => None,
    }
}

pub struct BatteryParser;

impl BatteryParser {
    pub fn parse_data(line: &str) -> Result<BatteryData, ParseError> {
        let fields = Fields::matching(&BATTERY_REGEX, line, MessageKind::Battery)?;

        let topic = fields.text("topic")?;
        let label = battery_label(topic).ok_or_else(|| ParseError::UnknownTopicLabel {
            kind: MessageKind::Battery,
            topic: topic.to_string(),
        })?;

        Ok(BatteryData {
            label: label.to_string(),
            time_left: fields.int("time_left")?,
            current: fields.float("current")?,
            voltage: fields.float("voltage")?,
            power: fields.float("power")?,
            charge_percent: fields.int("charge_percent")?,
            charging: fields.int("charging")? != 0,
        })
    }
}

impl BodyParser for BatteryParser {
    fn kind(&self) -> MessageKind {
        MessageKind::Battery
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::Battery)
    }
}
