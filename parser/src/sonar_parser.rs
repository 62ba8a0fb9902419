use crate::base_parser::{grammar, BodyParser, Fields, FLOAT};
use crate::messages::{MessageBody, MicronSonarData, OaSonarData};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

// Both sonars may log vendor-specific text after the last known token.
static MICRON_SONAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        ProfRng:\s*(?P<profile_range>{FLOAT})\s+
        PseudoAlt:\s*(?P<profile_altitude>{FLOAT})\s+
        PseudoFwdDistance:\s*(?P<pseudo_forward_distance>{FLOAT})\s+
        Angle:\s*(?P<angle>{FLOAT})
        (?:\s.*)?
        "
    ))
});

static OA_SONAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        ProfRng:\s*(?P<profile_range>{FLOAT})\s+
        PseudoAlt:\s*(?P<profile_altitude>{FLOAT})\s+
        PseudoFwdDistance:\s*(?P<pseudo_forward_distance>{FLOAT})
        (?:\s.*)?
        "
    ))
});

/// Tritech Micron profiling sonar lines.
pub struct MicronSonarParser;

impl MicronSonarParser {
    pub fn parse_data(line: &str) -> Result<MicronSonarData, ParseError> {
        let fields = Fields::matching(&MICRON_SONAR_REGEX, line, MessageKind::MicronSonar)?;
        Ok(MicronSonarData {
            profile_range: fields.float("profile_range")?,
            profile_altitude: fields.float("profile_altitude")?,
            pseudo_forward_distance: fields.float("pseudo_forward_distance")?,
            angle: fields.float("angle")?,
        })
    }
}

impl BodyParser for MicronSonarParser {
    fn kind(&self) -> MessageKind {
        MessageKind::MicronSonar
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::MicronSonar)
    }
}

/// Obstacle avoidance sonar lines.
pub struct OaSonarParser;

impl OaSonarParser {
    pub fn parse_data(line: &str) -> Result<OaSonarData, ParseError> {
        let fields = Fields::matching(&OA_SONAR_REGEX, line, MessageKind::OaSonar)?;
        Ok(OaSonarData {
            profile_range: fields.float("profile_range")?,
            profile_altitude: fields.float("profile_altitude")?,
            pseudo_forward_distance: fields.float("pseudo_forward_distance")?,
        })
    }
}

impl BodyParser for OaSonarParser {
    fn kind(&self) -> MessageKind {
        MessageKind::OaSonar
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::OaSonar)
    }
}
