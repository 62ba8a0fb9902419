//! Central body parser registration module
//!
//! Every `MessageKind` resolves to exactly one grammar here. `parser_for` is an
//! exhaustive match, so adding a kind without a grammar fails to compile.
//!
//! When adding a new message kind:
//! 1. Add the variant and its name to `MessageKind` (types.rs) and its record
//!    to `MessageBody` (messages.rs)
//! 2. Create the grammar file (e.g., `gps_parser.rs`) and export it in lib.rs
//! 3. Add the arm to `parser_for()` below

use crate::base_parser::BodyParser;
use crate::types::MessageKind;
use crate::{
    AanderaaCtdParser, BatteryParser, EcopuckParser, EvologicsModemParser, ImageCaptureParser,
    MicronSonarParser, OaSonarParser, ParosciPressureParser, SeabirdCtdParser,
    TeledyneDvlParser, ThrusterParser, TrackLinkModemParser,
};
use tracing::debug;

/// Returns the body parser registered for a message kind.
pub fn parser_for(kind: MessageKind) -> Box<dyn BodyParser> {
    match kind {
        MessageKind::ImageCapture => Box::new(ImageCaptureParser),
        MessageKind::SeabirdCtd => Box::new(SeabirdCtdParser),
        MessageKind::AanderaaCtd => Box::new(AanderaaCtdParser),
        MessageKind::Ecopuck => Box::new(EcopuckParser),
        MessageKind::ParosciPressure => Box::new(ParosciPressureParser),
        MessageKind::TeledyneDvl => Box::new(TeledyneDvlParser),
        MessageKind::TrackLinkModem => Box::new(TrackLinkModemParser),
        MessageKind::EvologicsModem => Box::new(EvologicsModemParser),
        MessageKind::MicronSonar => Box::new(MicronSonarParser),
        MessageKind::OaSonar => Box::new(OaSonarParser),
        MessageKind::Battery => Box::new(BatteryParser),
        MessageKind::Thruster => Box::new(ThrusterParser),
    }
}

/// Returns one parser per message kind, in `MessageKind::ALL` order.
pub fn all_parsers() -> Vec<Box<dyn BodyParser>> {
    debug!("Initializing body parser collection");
    MessageKind::ALL.iter().map(|kind| parser_for(*kind)).collect()
}

/// Macro to build a partial parser list, e.g. for a registry restricted to a
/// subset of kinds
///
/// Usage:
/// ```rust,ignore
/// let registry = ParserRegistry::with_parsers(register_parsers![
///     ThrusterParser,
///     BatteryParser,
/// ]);
/// ```
#[macro_export]
macro_rules! register_parsers {
    ($($parser:expr),* $(,)?) => {
        vec![
            $(Box::new($parser) as Box<dyn $crate::base_parser::BodyParser>),*
        ]
    };
}
