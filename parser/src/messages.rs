// Message bodies, one record per sensor kind, plus the header/body pairing.

use crate::types::{FieldMap, FieldValue, MessageHeader, MessageKind};
use serde::{Deserialize, Serialize};

/// Writes a record's fields into a field map, in export order.
pub trait ExportFields {
    fn export_fields(&self, out: &mut FieldMap);
}

/// Camera trigger record. `exposure` is 0 when the line carried no `exp:` token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCaptureData {
    pub label: String,
    pub filename: String,
    pub trigger_time: f64,
    pub exposure_logged: bool,
    pub exposure: i64,
}

/// Shared by the Seabird and Aanderaa CTD kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtdData {
    pub conductivity: f64,
    pub temperature: f64,
    pub salinity: f64,
    pub pressure: f64,
    pub sound_velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcopuckData {
    pub chlorophyll: f64,
    pub backscatter: f64,
    pub cdom: f64,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParosciPressureData {
    pub depth: f64,
}

/// Teledyne RDI Workhorse output as logged by the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeledyneDvlData {
    pub altitude: f64,

    pub range_01: f64,
    pub range_02: f64,
    pub range_03: f64,
    pub range_04: f64,

    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,

    pub velocity_x: f64,
    pub velocity_y: f64,
    pub velocity_z: f64,

    /// Relative displacement ("distance made good") since the last reset.
    pub dmg_x: f64,
    pub dmg_y: f64,
    pub dmg_z: f64,

    pub course_over_ground: f64,
    pub speed_over_ground: f64,
    pub bottom_track_status: i64,
    pub true_heading: f64,
    pub gimbal_pitch: f64,
    pub sound_velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackLinkModemData {
    pub latitude: f64,
    pub longitude: f64,
    pub roll: f64,
    pub pitch: f64,
    pub heading: f64,
    pub time: f64,
    pub bearing: f64,
    pub range: f64,
}

/// USBL fix: target position plus the ship attitude it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvologicsModemData {
    pub target_latitude: f64,
    pub target_longitude: f64,
    pub target_depth: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub target_z: f64,
    pub accuracy: f64,
    pub ship_latitude: f64,
    pub ship_longitude: f64,
    pub ship_roll: f64,
    pub ship_pitch: f64,
    pub ship_heading: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicronSonarData {
    pub profile_range: f64,
    pub profile_altitude: f64,
    pub pseudo_forward_distance: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OaSonarData {
    pub profile_range: f64,
    pub profile_altitude: f64,
    pub pseudo_forward_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryData {
    /// Derived from the topic, see `battery_label`.
    pub label: String,
    pub time_left: i64,
    pub current: f64,
    pub voltage: f64,
    pub power: f64,
    pub charge_percent: i64,
    pub charging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrusterData {
    /// Derived from the topic, see `thruster_label`.
    pub label: String,
    pub rpm: f64,
    pub current: f64,
    pub voltage: f64,
    pub temperature: f64,
}

/// Fans a list of `self.field` reads out into a field map.
macro_rules! export_fields {
    ($record:ty { $($field:ident),* $(,)? }) => {
        impl ExportFields for $record {
            fn export_fields(&self, out: &mut FieldMap) {
                $(out.insert(stringify!($field), FieldValue::from(self.$field.clone()));)*
            }
        }
    };
}

export_fields!(ImageCaptureData { label, filename, trigger_time, exposure_logged, exposure });
export_fields!(CtdData { conductivity, temperature, salinity, pressure, sound_velocity });
export_fields!(EcopuckData { chlorophyll, backscatter, cdom, temperature });
export_fields!(ParosciPressureData { depth });
export_fields!(TeledyneDvlData {
    altitude,
    range_01,
    range_02,
    range_03,
    range_04,
    heading,
    pitch,
    roll,
    velocity_x,
    velocity_y,
    velocity_z,
    dmg_x,
    dmg_y,
    dmg_z,
    course_over_ground,
    speed_over_ground,
    bottom_track_status,
    true_heading,
    gimbal_pitch,
    sound_velocity,
});
export_fields!(TrackLinkModemData { latitude, longitude, roll, pitch, heading, time, bearing, range });
export_fields!(EvologicsModemData {
    target_latitude,
    target_longitude,
    target_depth,
    target_x,
    target_y,
    target_z,
    accuracy,
    ship_latitude,
    ship_longitude,
    ship_roll,
    ship_pitch,
    ship_heading,
});
export_fields!(MicronSonarData { profile_range, profile_altitude, pseudo_forward_distance, angle });
export_fields!(OaSonarData { profile_range, profile_altitude, pseudo_forward_distance });
export_fields!(BatteryData { label, time_left, current, voltage, power, charge_percent, charging });
export_fields!(ThrusterData { label, rpm, current, voltage, temperature });

/// Body of a message, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageBody {
    ImageCapture(ImageCaptureData),
    SeabirdCtd(CtdData),
    AanderaaCtd(CtdData),
    Ecopuck(EcopuckData),
    ParosciPressure(ParosciPressureData),
    TeledyneDvl(TeledyneDvlData),
    TrackLinkModem(TrackLinkModemData),
    EvologicsModem(EvologicsModemData),
    MicronSonar(MicronSonarData),
    OaSonar(OaSonarData),
    Battery(BatteryData),
    Thruster(ThrusterData),
}

impl MessageBody {
    pub fn kind(&self) -> MessageKind {
        match self {
            MessageBody::ImageCapture(_) => MessageKind::ImageCapture,
            MessageBody::SeabirdCtd(_) => MessageKind::SeabirdCtd,
            MessageBody::AanderaaCtd(_) => MessageKind::AanderaaCtd,
            MessageBody::Ecopuck(_) => MessageKind::Ecopuck,
            MessageBody::ParosciPressure(_) => MessageKind::ParosciPressure,
            MessageBody::TeledyneDvl(_) => MessageKind::TeledyneDvl,
            MessageBody::TrackLinkModem(_) => MessageKind::TrackLinkModem,
            MessageBody::EvologicsModem(_) => MessageKind::EvologicsModem,
            MessageBody::MicronSonar(_) => MessageKind::MicronSonar,
            MessageBody::OaSonar(_) => MessageKind::OaSonar,
            MessageBody::Battery(_) => MessageKind::Battery,
            MessageBody::Thruster(_) => MessageKind::Thruster,
        }
    }
}

impl ExportFields for MessageBody {
    fn export_fields(&self, out: &mut FieldMap) {
        match self {
            MessageBody::ImageCapture(data) => data.export_fields(out),
            MessageBody::SeabirdCtd(data) | MessageBody::AanderaaCtd(data) => {
                data.export_fields(out)
            }
            MessageBody::Ecopuck(data) => data.export_fields(out),
            MessageBody::ParosciPressure(data) => data.export_fields(out),
            MessageBody::TeledyneDvl(data) => data.export_fields(out),
            MessageBody::TrackLinkModem(data) => data.export_fields(out),
            MessageBody::EvologicsModem(data) => data.export_fields(out),
            MessageBody::MicronSonar(data) => data.export_fields(out),
            MessageBody::OaSonar(data) => data.export_fields(out),
            MessageBody::Battery(data) => data.export_fields(out),
            MessageBody::Thruster(data) => data.export_fields(out),
        }
    }
}

/// A parsed telemetry record. The kind is always the body's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub header: MessageHeader,
    pub body: MessageBody,
}

impl Message {
    pub fn new(header: MessageHeader, body: MessageBody) -> Self {
        Self { header, body }
    }

    pub fn kind(&self) -> MessageKind {
        self.body.kind()
    }

    pub fn topic(&self) -> &str {
        &self.header.topic
    }

    pub fn timestamp(&self) -> f64 {
        self.header.timestamp
    }

    /// Header fields (`topic`, `timestamp`) followed by the body fields.
    pub fn to_field_map(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("topic", FieldValue::from(self.header.topic.clone()));
        fields.insert("timestamp", FieldValue::from(self.header.timestamp));
        self.body.export_fields(&mut fields);
        fields
    }
}
