use std::collections::{HashMap, hash_map::Iter};

/// Mapping from the source placeholders used in projections and queries to the SQL sources
/// they stand for.
///
/// ```
/// use mymodule_persistence::sqlite::SourceAlias;
///
/// let aliases = SourceAlias::new(&[("{:record:}", "r"), ("{:container:}", "c")]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SourceAlias {
    aliases: HashMap<String, String>,
}

impl SourceAlias {
    /// Create a new alias from a `&[(placeholder, source)]` list
    pub fn new(aliases: &[(&str, &str)]) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(|(placeholder, source)| (placeholder.to_string(), source.to_string()))
                .collect(),
        }
    }

    /// Iterate over the `(placeholder, source)` pairs
    pub fn get_iterator(&self) -> Iter<'_, String, String> {
        self.aliases.iter()
    }

    /// Replace every placeholder of the given text by its source
    pub fn apply(&self, text: &str) -> String {
        self.get_iterator()
            .fold(text.to_string(), |text, (placeholder, source)| text.replace(placeholder, source))
    }
}
