//! Leading `@tag` detection in user input

use super::persona::{Persona, PersonaRegistry};

/// Character that marks a persona tag
pub const TAG_MARKER: char = '@';

/// Outcome of resolving one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The text to send as the user message
    pub content: String,
    /// The persona selected by a leading tag, if any
    pub persona: Option<Persona>,
}

/// Split a registered leading tag off an input line
///
/// Only the first whitespace-delimited token is considered, and only when
/// the line starts with the marker. The token must match a registered tag
/// exactly. On a match the token and the whitespace run after it are
/// removed and the rest of the line is kept verbatim; otherwise the line
/// comes back untouched.
pub fn resolve(input: &str, registry: &dyn PersonaRegistry) -> Resolution {
    let unchanged = || Resolution {
        content: input.to_string(),
        persona: None,
    };

    if !input.starts_with(TAG_MARKER) {
        return unchanged();
    }

    let token_end = input.find(char::is_whitespace).unwrap_or(input.len());
    let (token, rest) = input.split_at(token_end);

    match registry.lookup(token) {
        Some(persona) => Resolution {
            content: rest.trim_start().to_string(),
            persona: Some(persona),
        },
        None => unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::persona::StaticPersonaRegistry;

    fn registry() -> StaticPersonaRegistry {
        [
            ("@Poet", "Speak only in rhyme"),
            ("@Pirate", "Talk like a pirate"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_registered_tag_is_stripped() {
        let resolution = resolve("@Poet write about the sea", &registry());
        assert_eq!(resolution.content, "write about the sea");
        assert_eq!(
            resolution.persona,
            Some(Persona::new("@Poet", "Speak only in rhyme"))
        );
    }

    #[test]
    fn test_only_one_whitespace_run_is_removed() {
        let resolution = resolve("@Pirate \t\n  hello   there  ", &registry());
        assert_eq!(resolution.content, "hello   there  ");
        assert!(resolution.persona.is_some());
    }

    #[test]
    fn test_tag_alone_gives_empty_content() {
        let resolution = resolve("@Poet", &registry());
        assert_eq!(resolution.content, "");
        assert!(resolution.persona.is_some());
    }

    #[test]
    fn test_input_without_marker_is_unchanged() {
        for input in [
            "write about the sea",
            " @Poet leading space",
            "",
            "email me at someone@Poet",
            "Poet write",
        ] {
            let resolution = resolve(input, &registry());
            assert_eq!(resolution.content, input);
            assert_eq!(resolution.persona, None);
        }
    }

    #[test]
    fn test_unregistered_or_partial_tags_are_unchanged() {
        for input in ["@poet lower case", "@Poe prefix", "@Poetry longer", "@ nothing", "@Unknown x"] {
            let resolution = resolve(input, &registry());
            assert_eq!(resolution.content, input);
            assert_eq!(resolution.persona, None);
        }
    }

    #[test]
    fn test_empty_registry_never_matches() {
        let empty = StaticPersonaRegistry::default();
        let resolution = resolve("@Poet write", &empty);
        assert_eq!(resolution.content, "@Poet write");
        assert_eq!(resolution.persona, None);
    }
}
