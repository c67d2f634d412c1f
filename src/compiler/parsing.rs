use crate::classifier::ParserType;
use ahash::AHashMap;

/// Maps the parser names used in graph definitions onto [`ParserType`]s.
///
/// Starts out with every canonical name (`classifySafety`, `extractLocation`,
/// ...). Hosts with their own naming register aliases on top.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    names: AHashMap<String, ParserType>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let names = ParserType::ALL
            .iter()
            .map(|parser| (parser.as_str().to_string(), *parser))
            .collect();
        Self { names }
    }
}

impl ParserRegistry {
    pub fn alias(&mut self, name: impl Into<String>, parser: ParserType) {
        self.names.insert(name.into(), parser);
    }

    pub fn resolve(&self, name: &str) -> Option<ParserType> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
