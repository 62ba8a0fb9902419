use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every telemetry line: `<topic>: <timestamp>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub topic: String,
    /// Seconds since the UNIX epoch.
    pub timestamp: f64,
}

impl MessageHeader {
    pub fn new(topic: impl Into<String>, timestamp: f64) -> Self {
        Self {
            topic: topic.into(),
            timestamp,
        }
    }

    /// Timestamp as a UTC date-time rounded to the microsecond, or `None`
    /// if it is not representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        if !self.timestamp.is_finite() {
            return None;
        }
        let secs = self.timestamp.floor();
        let micros = ((self.timestamp - secs) * 1e6).round().min(999_999.0) as u32;
        Utc.timestamp_opt(secs as i64, micros * 1_000).single()
    }
}

/// The closed set of message kinds a protocol can route topics to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    ImageCapture,
    SeabirdCtd,
    AanderaaCtd,
    Ecopuck,
    ParosciPressure,
    TeledyneDvl,
    TrackLinkModem,
    EvologicsModem,
    MicronSonar,
    OaSonar,
    Battery,
    Thruster,
}

const CTD_FIELDS: &[&str] = &[
    "conductivity",
    "temperature",
    "salinity",
    "pressure",
    "sound_velocity",
];

impl MessageKind {
    pub const ALL: [MessageKind; 12] = [
        MessageKind::ImageCapture,
        MessageKind::SeabirdCtd,
        MessageKind::AanderaaCtd,
        MessageKind::Ecopuck,
        MessageKind::ParosciPressure,
        MessageKind::TeledyneDvl,
        MessageKind::TrackLinkModem,
        MessageKind::EvologicsModem,
        MessageKind::MicronSonar,
        MessageKind::OaSonar,
        MessageKind::Battery,
        MessageKind::Thruster,
    ];

    /// Kind name as written in protocol configuration files.
    pub fn name(self) -> &'static str {
        match self {
            MessageKind::ImageCapture => "ImageCaptureMessage",
            MessageKind::SeabirdCtd => "SeabirdCTDMessage",
            MessageKind::AanderaaCtd => "AanderaaCTDMessage",
            MessageKind::Ecopuck => "EcopuckMessage",
            MessageKind::ParosciPressure => "ParosciPressureMessage",
            MessageKind::TeledyneDvl => "TeledyneDVLMessage",
            MessageKind::TrackLinkModem => "TrackLinkModemMessage",
            MessageKind::EvologicsModem => "EvologicsModemMessage",
            MessageKind::MicronSonar => "MicronSonarMessage",
            MessageKind::OaSonar => "OASonarMessage",
            MessageKind::Battery => "BatteryMessage",
            MessageKind::Thruster => "ThrusterMessage",
        }
    }

    /// Resolve a configuration kind name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Body field names exported for this kind, in export order.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            MessageKind::ImageCapture => &[
                "label",
                "filename",
                "trigger_time",
                "exposure_logged",
                "exposure",
            ],
            MessageKind::SeabirdCtd | MessageKind::AanderaaCtd => CTD_FIELDS,
            MessageKind::Ecopuck => &["chlorophyll", "backscatter", "cdom", "temperature"],
            MessageKind::ParosciPressure => &["depth"],
            MessageKind::TeledyneDvl => &[
                "altitude",
                "range_01",
                "range_02",
                "range_03",
                "range_04",
                "heading",
                "pitch",
                "roll",
                "velocity_x",
                "velocity_y",
                "velocity_z",
                "dmg_x",
                "dmg_y",
                "dmg_z",
                "course_over_ground",
                "speed_over_ground",
                "bottom_track_status",
                "true_heading",
                "gimbal_pitch",
                "sound_velocity",
            ],
            MessageKind::TrackLinkModem => &[
                "latitude",
                "longitude",
                "roll",
                "pitch",
                "heading",
                "time",
                "bearing",
                "range",
            ],
            MessageKind::EvologicsModem => &[
                "target_latitude",
                "target_longitude",
                "target_depth",
                "target_x",
                "target_y",
                "target_z",
                "accuracy",
                "ship_latitude",
                "ship_longitude",
                "ship_roll",
                "ship_pitch",
                "ship_heading",
            ],
            MessageKind::MicronSonar => &[
                "profile_range",
                "profile_altitude",
                "pseudo_forward_distance",
                "angle",
            ],
            MessageKind::OaSonar => &[
                "profile_range",
                "profile_altitude",
                "pseudo_forward_distance",
            ],
            MessageKind::Battery => &[
                "label",
                "time_left",
                "current",
                "voltage",
                "power",
                "charge_percent",
                "charging",
            ],
            MessageKind::Thruster => &["label", "rpm", "current", "voltage", "temperature"],
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageKind {
    type Err = UnknownKindName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownKindName(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message kind name: {0}")]
pub struct UnknownKindName(pub String);

/// A single exported field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

/// Ordered field name to value map used for tabulation.
pub type FieldMap = IndexMap<&'static str, FieldValue>;

/// Why a single line could not be turned into a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ParseError {
    #[error("line does not match the message header grammar")]
    HeaderMismatch,
    #[error("line does not match the {kind} grammar")]
    GrammarMismatch { kind: MessageKind },
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidField { field: String, value: String },
    #[error("topic `{topic}` has no {kind} label")]
    UnknownTopicLabel { kind: MessageKind, topic: String },
}

/// Failures while reading raw message files.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid message file extension: {0}")]
    InvalidExtension(String),
    #[error("invalid message file type: {0}")]
    InvalidFileType(String),
}
