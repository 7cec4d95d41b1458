//! Style registry: the closed set of remix styles and their prompt templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale::Locale;

/// A remix target style
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StyleId {
    #[default]
    Tweet,
    Blog,
    Formal,
    Casual,
}

impl StyleId {
    /// All styles, in display order
    pub const ALL: [StyleId; 4] = [
        StyleId::Tweet,
        StyleId::Blog,
        StyleId::Formal,
        StyleId::Casual,
    ];

    /// Identifier as used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleId::Tweet => "tweet",
            StyleId::Blog => "blog",
            StyleId::Formal => "formal",
            StyleId::Casual => "casual",
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown style '{0}' (expected one of: tweet, blog, formal, casual)")]
pub struct ParseStyleError(String);

impl FromStr for StyleId {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StyleId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or(ParseStyleError(wanted))
    }
}

/// Everything the UI and the prompt builder need to know about one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDefinition {
    pub id: StyleId,
    pub label: &'static str,
    pub prompt_template: &'static str,
}

/// Human-readable label for a style
pub fn label_of(id: StyleId, locale: Locale) -> &'static str {
    locale.style_label(id)
}

/// Instruction placed before the user's text when building a prompt
pub fn prompt_template_of(id: StyleId) -> &'static str {
    match id {
        StyleId::Tweet => {
            "Rewrite the following text as a single tweet. Keep it under 280 characters, \
             keep the key message and make it engaging. You may add up to two relevant hashtags."
        }
        StyleId::Blog => {
            "Rewrite the following text as a short blog post with a catchy title, \
             an introduction, a body split into paragraphs and a brief conclusion."
        }
        StyleId::Formal => {
            "Rewrite the following text in a formal, professional tone. Use complete sentences \
             and precise vocabulary. Avoid slang and contractions."
        }
        StyleId::Casual => {
            "Rewrite the following text in a casual, friendly tone, as if talking to a friend. \
             Keep the original meaning intact."
        }
    }
}

/// Full definition of a style for the given UI locale
pub fn definition(id: StyleId, locale: Locale) -> StyleDefinition {
    StyleDefinition {
        id,
        label: label_of(id, locale),
        prompt_template: prompt_template_of(id),
    }
}

/// Every style definition, in display order
pub fn registry(locale: Locale) -> Vec<StyleDefinition> {
    StyleId::ALL
        .into_iter()
        .map(|id| definition(id, locale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_style_has_label_and_template() {
        for locale in [Locale::En, Locale::Es] {
            for id in StyleId::ALL {
                assert!(!label_of(id, locale).is_empty(), "{id} has no {locale} label");
                assert!(!prompt_template_of(id).is_empty(), "{id} has no template");
            }
        }
    }

    #[test]
    fn test_registry_has_one_definition_per_style() {
        let defs = registry(Locale::En);
        assert_eq!(defs.len(), StyleId::ALL.len());

        let ids: HashSet<StyleId> = defs.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), StyleId::ALL.len());

        for def in &defs {
            assert_eq!(def.prompt_template, prompt_template_of(def.id));
            assert_eq!(def.label, label_of(def.id, Locale::En));
        }
    }

    #[test]
    fn test_templates_are_distinct() {
        let templates: HashSet<&str> = StyleId::ALL.into_iter().map(prompt_template_of).collect();
        assert_eq!(templates.len(), StyleId::ALL.len());
    }

    #[test]
    fn test_default_style_is_tweet() {
        assert_eq!(StyleId::default(), StyleId::Tweet);
    }

    #[test]
    fn test_parse_style() {
        assert_eq!("formal".parse::<StyleId>(), Ok(StyleId::Formal));
        assert_eq!(" Casual ".parse::<StyleId>(), Ok(StyleId::Casual));
        assert_eq!(
            "poem".parse::<StyleId>(),
            Err(ParseStyleError("poem".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&StyleId::Blog).unwrap();
        assert_eq!(json, "\"blog\"");
        let parsed: StyleId = serde_json::from_str("\"casual\"").unwrap();
        assert_eq!(parsed, StyleId::Casual);
    }
}
