use auv_parser::{Diagnostic, Message, ParseOutput, Protocol, Severity};
use chrono::SecondsFormat;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, warn};

#[derive(Debug, Serialize)]
pub struct TopicSummary {
    pub kind: String,
    pub count: usize,
    pub fields: Vec<&'static str>,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
}

/// Summary printed to stdout at the end of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total_lines: usize,
    pub message_count: usize,
    pub topics: IndexMap<String, TopicSummary>,
    pub diagnostics: BTreeMap<&'static str, usize>,
    pub dropped_topics: Vec<String>,
}

impl RunSummary {
    pub fn new(output: &ParseOutput, protocol: &Protocol) -> Self {
        let topics = output
            .messages
            .iter()
            .filter_map(|(topic, messages)| {
                let first = messages.first()?;
                let summary = TopicSummary {
                    kind: first.kind().name().to_string(),
                    count: messages.len(),
                    fields: first.to_field_map().keys().copied().collect(),
                    first_timestamp: iso_timestamp(first),
                    last_timestamp: messages.last().and_then(iso_timestamp),
                };
                Some((topic.clone(), summary))
            })
            .collect();

        let diagnostics = output
            .diagnostic_counts()
            .into_iter()
            .map(|(category, count)| (category.name(), count))
            .collect();

        Self {
            total_lines: output.line_count(),
            message_count: output.message_count(),
            topics,
            diagnostics,
            dropped_topics: protocol
                .warnings()
                .iter()
                .map(|warning| warning.topic().to_string())
                .collect(),
        }
    }
}

fn iso_timestamp(message: &Message) -> Option<String> {
    message
        .header
        .datetime()
        .map(|datetime| datetime.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Route each diagnostic of one input file to the log level of its severity.
pub fn log_diagnostics(source: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let category = diagnostic.category().name();
        let source = source.display();
        match diagnostic.severity() {
            Severity::Info => debug!(category, "{}: {}", source, diagnostic),
            Severity::Warning => warn!(category, "{}: {}", source, diagnostic),
            Severity::Error => error!(category, "{}: {}", source, diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auv_parser::parse_lines;

    fn protocol() -> Protocol {
        let config: IndexMap<String, String> = [
            ("THR_PORT", "ThrusterMessage"),
            ("PAROSCI", "ParosciPressureMessage"),
            ("GPS", "GpsMessage"),
        ]
        .iter()
        .map(|(topic, name)| (topic.to_string(), name.to_string()))
        .collect();
        Protocol::build(&config)
    }

    #[test]
    fn test_summary() {
        let protocol = protocol();
        let output = parse_lines(
            [
                "THR_PORT: 1244855390.607 RPM:0.00 A:0.0400 V:46.80 T:29.00",
                "PAROSCI: 1244855390.700 28.5529",
                "THR_PORT: 1244855391.607 RPM:12.00 A:0.0400 V:46.80 T:29.00",
                "FOO: 1244855392.000 bar:1",
                "THR_PORT: 1244855392.100 RPM:bad",
            ],
            &protocol,
        );
        let summary = RunSummary::new(&output, &protocol);

        assert_eq!(summary.total_lines, 5);
        assert_eq!(summary.message_count, 3);
        assert_eq!(summary.dropped_topics, vec!["GPS"]);

        let thrusters = &summary.topics["THR_PORT"];
        assert_eq!(thrusters.kind, "ThrusterMessage");
        assert_eq!(thrusters.count, 2);
        assert_eq!(
            thrusters.fields,
            vec!["topic", "timestamp", "label", "rpm", "current", "voltage", "temperature"]
        );
        assert_eq!(
            thrusters.first_timestamp.as_deref(),
            Some("2009-06-13T01:09:50.607000Z")
        );
        assert_eq!(
            thrusters.last_timestamp.as_deref(),
            Some("2009-06-13T01:09:51.607000Z")
        );

        assert_eq!(summary.diagnostics["unrouted_topic"], 1);
        assert_eq!(summary.diagnostics["body_mismatch"], 1);
        assert!(!summary.diagnostics.contains_key("header_mismatch"));
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let protocol = protocol();
        let output = parse_lines(["PAROSCI: 1244855390.700 28.5529"], &protocol);
        let json = serde_json::to_value(RunSummary::new(&output, &protocol)).unwrap();

        assert_eq!(json["message_count"], 1);
        assert_eq!(json["topics"]["PAROSCI"]["kind"], "ParosciPressureMessage");
        assert_eq!(json["topics"]["PAROSCI"]["fields"][2], "depth");
    }
}
