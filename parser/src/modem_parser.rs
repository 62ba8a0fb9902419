use crate::base_parser::{grammar, BodyParser, Fields, FLOAT};
use crate::messages::{EvologicsModemData, MessageBody, TrackLinkModemData};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

static TRACKLINK_MODEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        time:\s*(?P<time>{FLOAT})\s+
        Lat:\s*(?P<latitude>{FLOAT})\s+
        Lon:\s*(?P<longitude>{FLOAT})\s+
        hdg:\s*(?P<heading>{FLOAT})\s+
        roll:\s*(?P<roll>{FLOAT})\s+
        pitch:\s*(?P<pitch>{FLOAT})\s+
        bear:\s*(?P<bearing>{FLOAT})\s+
        rng:\s*(?P<range>{FLOAT})
        "
    ))
});

static EVOLOGICS_MODEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        target_lat:\s*(?P<target_latitude>{FLOAT})\s+
        target_lon:\s*(?P<target_longitude>{FLOAT})\s+
        target_depth:\s*(?P<target_depth>{FLOAT})\s+
        accuracy:\s*(?P<accuracy>{FLOAT})\s+
        ship_lat:\s*(?P<ship_latitude>{FLOAT})\s+
        ship_lon:\s*(?P<ship_longitude>{FLOAT})\s+
        ship_roll:\s*(?P<ship_roll>{FLOAT})\s+
        ship_pitch:\s*(?P<ship_pitch>{FLOAT})\s+
        ship_heading:\s*(?P<ship_heading>{FLOAT})\s+
        target_x:\s*(?P<target_x>{FLOAT})\s+
        target_y:\s*(?P<target_y>{FLOAT})\s+
        target_z:\s*(?P<target_z>{FLOAT})
        "
    ))
});

/// LinkQuest TrackLink USBL fixes.
pub struct TrackLinkModemParser;

impl TrackLinkModemParser {
    pub fn parse_data(line: &str) -> Result<TrackLinkModemData, ParseError> {
        let fields = Fields::matching(&TRACKLINK_MODEM_REGEX, line, MessageKind::TrackLinkModem)?;
        Ok(TrackLinkModemData {
            latitude: fields.float("latitude")?,
            longitude: fields.float("longitude")?,
            roll: fields.float("roll")?,
            pitch: fields.float("pitch")?,
            heading: fields.float("heading")?,
            time: fields.float("time")?,
            bearing: fields.float("bearing")?,
            range: fields.float("range")?,
        })
    }
}

impl BodyParser for TrackLinkModemParser {
    fn kind(&self) -> MessageKind {
        MessageKind::TrackLinkModem
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::TrackLinkModem)
    }
}

/// Evologics USBL fixes.
pub struct EvologicsModemParser;

impl EvologicsModemParser {
    pub fn parse_data(line: &str) -> Result<EvologicsModemData, ParseError> {
        let fields = Fields::matching(&EVOLOGICS_MODEM_REGEX, line, MessageKind::EvologicsModem)?;
        Ok(EvologicsModemData {
            target_latitude: fields.float("target_latitude")?,
            target_longitude: fields.float("target_longitude")?,
            target_depth: fields.float("target_depth")?,
            target_x: fields.float("target_x")?,
            target_y: fields.float("target_y")?,
            target_z: fields.float("target_z")?,
            accuracy: fields.float("accuracy")?,
            ship_latitude: fields.float("ship_latitude")?,
            ship_longitude: fields.float("ship_longitude")?,
            ship_roll: fields.float("ship_roll")?,
            ship_pitch: fields.float("ship_pitch")?,
            ship_heading: fields.float("ship_heading")?,
        })
    }
}

impl BodyParser for EvologicsModemParser {
    fn kind(&self) -> MessageKind {
        MessageKind::EvologicsModem
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::EvologicsModem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracklink() {
        let line = "LQMODEM: 1244853410.502 time:1244853409.9 Lat:-33.84212 Lon:151.25931 \
            hdg:127.3 roll:0.8 pitch:-1.6 bear:211.4 rng:84.7";
        let data = TrackLinkModemParser::parse_data(line).unwrap();
        assert_eq!(data.time, 1244853409.9);
        assert_eq!(data.latitude, -33.84212);
        assert_eq!(data.longitude, 151.25931);
        assert_eq!(data.heading, 127.3);
        assert_eq!(data.bearing, 211.4);
        assert_eq!(data.range, 84.7);
    }

    #[test]
    fn test_tracklink_keys_are_case_sensitive() {
        let line = "LQMODEM: 1244853410.502 time:1244853409.9 lat:-33.84212 lon:151.25931 \
            hdg:127.3 roll:0.8 pitch:-1.6 bear:211.4 rng:84.7";
        assert!(TrackLinkModemParser.parse(line).is_err());
    }

    #[test]
    fn test_parse_evologics() {
        let line = "EVOLOGICS_FIX: 1370910700.120 target_lat:-33.84401 target_lon:151.26012 \
            target_depth:31.2 accuracy:0.75 ship_lat:-33.84380 ship_lon:151.25977 \
            ship_roll:1.2 ship_pitch:-0.4 ship_heading:92.5 target_x:12.1 target_y:-40.3 \
            target_z:31.2";
        let data = EvologicsModemParser::parse_data(line).unwrap();
        assert_eq!(data.target_latitude, -33.84401);
        assert_eq!(data.target_depth, 31.2);
        assert_eq!(data.accuracy, 0.75);
        assert_eq!(data.ship_heading, 92.5);
        assert_eq!(data.target_y, -40.3);
        assert_eq!(data.target_z, 31.2);
    }
}
