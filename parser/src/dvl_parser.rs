use crate::base_parser::{grammar, BodyParser, Fields, FLOAT, INT};
use crate::messages::{MessageBody, TeledyneDvlData};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

static TELEDYNE_DVL_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        alt:\s*(?P<altitude>{FLOAT})\s+
        r1:\s*(?P<range_01>{FLOAT})\s+
        r2:\s*(?P<range_02>{FLOAT})\s+
        r3:\s*(?P<range_03>{FLOAT})\s+
        r4:\s*(?P<range_04>{FLOAT})\s+
        h:\s*(?P<heading>{FLOAT})\s+
        p:\s*(?P<pitch>{FLOAT})\s+
        r:\s*(?P<roll>{FLOAT})\s+
        vx:\s*(?P<velocity_x>{FLOAT})\s+
        vy:\s*(?P<velocity_y>{FLOAT})\s+
        vz:\s*(?P<velocity_z>{FLOAT})\s+
        nx:\s*(?P<dmg_x>{FLOAT})\s+
        ny:\s*(?P<dmg_y>{FLOAT})\s+
        nz:\s*(?P<dmg_z>{FLOAT})\s+
        COG:\s*(?P<course_over_ground>{FLOAT})\s+
        SOG:\s*(?P<speed_over_ground>{FLOAT})\s+
        bt_status:\s*(?P<bottom_track_status>{INT})\s+
        h_true:\s*(?P<true_heading>{FLOAT})\s+
        p_gimbal:\s*(?P<gimbal_pitch>{FLOAT})\s+
        sv:\s*(?P<sound_velocity>{FLOAT})
        "
    ))
});

/// Teledyne RDI doppler velocity log lines (topic `RDI` on most vehicles).
pub struct TeledyneDvlParser;

impl TeledyneDvlParser {
    pub fn parse_data(line: &str) -> Result<TeledyneDvlData, ParseError> {
        let fields = Fields::matching(&TELEDYNE_DVL_REGEX, line, MessageKind::TeledyneDvl)?;
        Ok(TeledyneDvlData {
            altitude: fields.float("altitude")?,
            range_01: fields.float("range_01")?,
            range_02: fields.float("range_02")?,
            range_03: fields.float("range_03")?,
            range_04: fields.float("range_04")?,
            heading: fields.float("heading")?,
            pitch: fields.float("pitch")?,
            roll: fields.float("roll")?,
            velocity_x: fields.float("velocity_x")?,
            velocity_y: fields.float("velocity_y")?,
            velocity_z: fields.float("velocity_z")?,
            dmg_x: fields.float("dmg_x")?,
            dmg_y: fields.float("dmg_y")?,
            dmg_z: fields.float("dmg_z")?,
            course_over_ground: fields.float("course_over_ground")?,
            speed_over_ground: fields.float("speed_over_ground")?,
            bottom_track_status: fields.int("bottom_track_status")?,
            true_heading: fields.float("true_heading")?,
            gimbal_pitch: fields.float("gimbal_pitch")?,
            sound_velocity: fields.float("sound_velocity")?,
        })
    }
}

impl BodyParser for TeledyneDvlParser {
    fn kind(&self) -> MessageKind {
        MessageKind::TeledyneDvl
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::TeledyneDvl)
    }
}
