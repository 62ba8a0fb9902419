use crate::base_parser::BodyParser;
use crate::parsers::all_parsers;
use crate::types::MessageKind;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// ParserRegistry - maps each message kind to its body parser
///
/// The default registry covers every kind (see `parsers.rs`). A partial
/// registry can be built with `with_parsers`; protocols resolved against it
/// drop the topics whose kind is missing.
pub struct ParserRegistry {
    parsers: IndexMap<MessageKind, Arc<dyn BodyParser>>,
}

impl ParserRegistry {
    /// Create a new registry with all parsers from the central registry
    pub fn new() -> Self {
        info!("Initializing ParserRegistry");
        let registry = Self::with_parsers(all_parsers());

        debug!(
            "Registered {} parsers: {}",
            registry.parsers.len(),
            registry
                .parsers
                .keys()
                .map(|kind| kind.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        registry
    }

    /// Create a registry holding only the given parsers
    pub fn with_parsers(parsers: Vec<Box<dyn BodyParser>>) -> Self {
        let mut registry = Self {
            parsers: IndexMap::new(),
        };
        for parser in parsers {
            registry.register(parser);
        }
        registry
    }

    /// Register a parser, replacing any earlier parser for the same kind
    pub fn register(&mut self, parser: Box<dyn BodyParser>) {
        let kind = parser.kind();
        debug!("Registering body parser for {}", kind);
        if self.parsers.insert(kind, Arc::from(parser)).is_some() {
            warn!("Replaced existing body parser for {}", kind);
        }
    }

    /// Get parser by message kind
    pub fn get_parser(&self, kind: MessageKind) -> Option<Arc<dyn BodyParser>> {
        self.parsers.get(&kind).cloned()
    }

    /// Resolve a configuration kind name to a kind and its parser
    pub fn get_parser_by_name(&self, name: &str) -> Option<(MessageKind, Arc<dyn BodyParser>)> {
        let kind = MessageKind::from_name(name)?;
        self.get_parser(kind).map(|parser| (kind, parser))
    }

    pub fn kinds(&self) -> impl Iterator<Item = MessageKind> + '_ {
        self.parsers.keys().copied()
    }

    /// Known kinds without a registered parser
    pub fn missing_kinds(&self) -> Vec<MessageKind> {
        MessageKind::ALL
            .iter()
            .copied()
            .filter(|kind| !self.parsers.contains_key(kind))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_kinds().is_empty()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
