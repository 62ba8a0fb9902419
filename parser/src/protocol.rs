use crate::base_parser::BodyParser;
use crate::registry_parser::ParserRegistry;
use crate::types::MessageKind;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Routing for one topic.
#[derive(Clone)]
pub struct ProtocolEntry {
    pub topic: String,
    pub kind: MessageKind,
    pub parser: Arc<dyn BodyParser>,
}

impl fmt::Debug for ProtocolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolEntry")
            .field("topic", &self.topic)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A configured topic that was left out of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ProtocolBuildWarning {
    #[error("topic `{topic}`: unknown message kind name `{kind_name}`")]
    UnknownKindName { topic: String, kind_name: String },
    #[error("topic `{topic}`: no parser registered for {kind}")]
    UnregisteredParser { topic: String, kind: MessageKind },
}

impl ProtocolBuildWarning {
    pub fn topic(&self) -> &str {
        match self {
            ProtocolBuildWarning::UnknownKindName { topic, .. }
            | ProtocolBuildWarning::UnregisteredParser { topic, .. } => topic,
        }
    }
}

/// Topic routing table for one parsing session. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Protocol {
    entries: IndexMap<String, ProtocolEntry>,
    warnings: Vec<ProtocolBuildWarning>,
}

impl Protocol {
    /// Build from a `topic -> kind name` table using the full parser registry.
    ///
    /// Topics with an unknown kind name are dropped, never rejected; see
    /// `warnings()`.
    pub fn build<'a, I>(topic_to_kind_name: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        Self::build_with_registry(topic_to_kind_name, &ParserRegistry::new())
    }

    /// Build against a specific registry. Topics whose kind has no parser in
    /// `registry` are dropped as well.
    pub fn build_with_registry<'a, I>(topic_to_kind_name: I, registry: &ParserRegistry) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut protocol = Protocol::default();

        for (topic, kind_name) in topic_to_kind_name {
            let Some(kind) = MessageKind::from_name(kind_name) else {
                protocol.drop_topic(ProtocolBuildWarning::UnknownKindName {
                    topic: topic.clone(),
                    kind_name: kind_name.clone(),
                });
                continue;
            };

            let Some(parser) = registry.get_parser(kind) else {
                protocol.drop_topic(ProtocolBuildWarning::UnregisteredParser {
                    topic: topic.clone(),
                    kind,
                });
                continue;
            };

            protocol.entries.insert(
                topic.clone(),
                ProtocolEntry {
                    topic: topic.clone(),
                    kind,
                    parser,
                },
            );
        }

        info!(
            "Built protocol with {} topics ({} dropped)",
            protocol.entries.len(),
            protocol.warnings.len()
        );

        protocol
    }

    fn drop_topic(&mut self, warning: ProtocolBuildWarning) {
        warn!("Dropping topic from protocol: {}", warning);
        self.warnings.push(warning);
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.entries.contains_key(topic)
    }

    pub fn get(&self, topic: &str) -> Option<&ProtocolEntry> {
        self.entries.get(topic)
    }

    /// Topics in configuration order.
    pub fn topics(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ProtocolEntry> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Topics dropped while building, one warning per topic.
    pub fn warnings(&self) -> &[ProtocolBuildWarning] {
        &self.warnings
    }
}
