// Parser crate for AUV telemetry logs
// Header grammar, one body parser per message kind, and a protocol registry
// routing topics to parsers

pub mod types;
pub mod messages;
pub mod base_parser;
pub mod parsers;
pub mod registry_parser;
pub mod protocol;
pub mod diagnostics;
pub mod batch_parser;
pub mod line_source;

// Individual body parser implementations
pub mod image_parser;
pub mod ctd_parser;
pub mod ecopuck_parser;
pub mod parosci_parser;
pub mod dvl_parser;
pub mod modem_parser;
pub mod sonar_parser;
pub mod battery_parser;
pub mod thruster_parser;

// Re-export main types
pub use types::*;
pub use messages::*;
pub use base_parser::{parse_header, BodyParser};
pub use registry_parser::ParserRegistry;
pub use protocol::{Protocol, ProtocolBuildWarning, ProtocolEntry};
pub use diagnostics::{Diagnostic, DiagnosticCategory, Severity};
pub use batch_parser::{
    parse_line, parse_lines, parse_lines_parallel, parse_numbered_lines,
    parse_numbered_lines_parallel, LineOutcome, ParseOutput,
};
pub use line_source::{
    normalize_line, prepare_lines, read_lines, read_message_file, read_text_file, NumberedLine,
};

// Re-export parsers
pub use image_parser::ImageCaptureParser;
pub use ctd_parser::{AanderaaCtdParser, SeabirdCtdParser};
pub use ecopuck_parser::EcopuckParser;
pub use parosci_parser::ParosciPressureParser;
pub use dvl_parser::TeledyneDvlParser;
pub use modem_parser::{EvologicsModemParser, TrackLinkModemParser};
pub use sonar_parser::{MicronSonarParser, OaSonarParser};
pub use battery_parser::{battery_label, BatteryParser};
pub use thruster_parser::{thruster_label, ThrusterParser};
