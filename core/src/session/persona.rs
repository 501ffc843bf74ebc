//! Personas selectable by `@tag`

use std::collections::HashMap;

/// A named system instruction injected when its tag is used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub tag: String,
    pub content: String,
}

impl Persona {
    pub fn new(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            content: content.into(),
        }
    }
}

/// Read-only lookup from tag to persona
///
/// The session engine only ever asks for a single tag, so the backing
/// store can be a map, a database or anything remote.
pub trait PersonaRegistry: Send + Sync {
    fn lookup(&self, tag: &str) -> Option<Persona>;
}

/// Registry backed by an in-memory map, built once from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticPersonaRegistry {
    personas: HashMap<String, String>,
}

impl StaticPersonaRegistry {
    pub fn new(personas: HashMap<String, String>) -> Self {
        Self { personas }
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticPersonaRegistry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl PersonaRegistry for StaticPersonaRegistry {
    fn lookup(&self, tag: &str) -> Option<Persona> {
        self.personas
            .get(tag)
            .map(|content| Persona::new(tag, content.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        let registry: StaticPersonaRegistry = [("@Poet", "Speak only in rhyme")].into_iter().collect();

        assert_eq!(
            registry.lookup("@Poet"),
            Some(Persona::new("@Poet", "Speak only in rhyme"))
        );
        assert_eq!(registry.lookup("@poet"), None);
        assert_eq!(registry.lookup("@Po"), None);
        assert_eq!(registry.lookup("Poet"), None);
        assert_eq!(registry.len(), 1);
    }
}
