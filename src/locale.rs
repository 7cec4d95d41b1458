//! Fixed UI label sets.
//!
//! Every user-visible string the presentation layer shows comes from here,
//! including the single error message shown for any failed remix. Prompt
//! templates are not localized; see [`crate::style`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::StyleId;

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown locale '{0}' (expected 'en' or 'es')")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            other => Err(ParseLocaleError(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Es => f.write_str("es"),
        }
    }
}

impl Locale {
    pub fn app_title(&self) -> &'static str {
        "Remixer"
    }

    /// Label shown on the style selector button
    pub fn style_label(&self, id: StyleId) -> &'static str {
        match (self, id) {
            (Locale::En, StyleId::Tweet) => "Tweet",
            (Locale::En, StyleId::Blog) => "Blog Post",
            (Locale::En, StyleId::Formal) => "Formal Tone",
            (Locale::En, StyleId::Casual) => "Casual Tone",
            (Locale::Es, StyleId::Tweet) => "Convertir a Tweet",
            (Locale::Es, StyleId::Blog) => "Formato Blog",
            (Locale::Es, StyleId::Formal) => "Tono Formal",
            (Locale::Es, StyleId::Casual) => "Tono Casual",
        }
    }

    pub fn style_heading(&self) -> &'static str {
        match self {
            Locale::En => "Remix style",
            Locale::Es => "Tipo de Remix",
        }
    }

    pub fn input_placeholder(&self) -> &'static str {
        match self {
            Locale::En => "Paste the content you want to remix here...",
            Locale::Es => "Pega aquí el contenido que quieres remixear...",
        }
    }

    pub fn remix_button(&self) -> &'static str {
        match self {
            Locale::En => "Remix",
            Locale::Es => "Remixear",
        }
    }

    pub fn pending_button(&self) -> &'static str {
        match self {
            Locale::En => "Remixing...",
            Locale::Es => "Remixeando...",
        }
    }

    pub fn result_heading(&self) -> &'static str {
        match self {
            Locale::En => "Result:",
            Locale::Es => "Resultado:",
        }
    }

    pub fn copy_button(&self) -> &'static str {
        match self {
            Locale::En => "Copy",
            Locale::Es => "Copiar",
        }
    }

    /// Hint shown when the displayed result came from different input or style
    pub fn stale_hint(&self) -> &'static str {
        match self {
            Locale::En => "This result was generated from earlier input.",
            Locale::Es => "Este resultado se generó a partir de un texto anterior.",
        }
    }

    /// Trailer appended by the offline generator
    pub fn offline_note(&self) -> &'static str {
        match self {
            Locale::En => "(Test version - API not connected)",
            Locale::Es => "(Versión de prueba - API no conectada)",
        }
    }

    /// Banner shown when the configuration file or environment was rejected
    pub fn config_error_note(&self) -> &'static str {
        match self {
            Locale::En => "Configuration could not be loaded. Remixes are simulated until it is fixed.",
            Locale::Es => "No se pudo cargar la configuración. Los remixes se simulan hasta corregirla.",
        }
    }

    /// The one message shown for every kind of remix failure
    pub fn error_message(&self) -> &'static str {
        match self {
            Locale::En => "There was an error processing your request. Please try again.",
            Locale::Es => "Hubo un error al procesar tu solicitud. Por favor intenta de nuevo.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" ES ".parse::<Locale>(), Ok(Locale::Es));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for locale in [Locale::En, Locale::Es] {
            assert_eq!(locale.to_string().parse::<Locale>(), Ok(locale));
        }
    }

    #[test]
    fn test_error_message_is_fixed() {
        assert_eq!(
            Locale::En.error_message(),
            "There was an error processing your request. Please try again."
        );
        assert_eq!(
            Locale::Es.error_message(),
            "Hubo un error al procesar tu solicitud. Por favor intenta de nuevo."
        );
    }

    #[test]
    fn test_spanish_style_labels() {
        assert_eq!(Locale::Es.style_label(StyleId::Tweet), "Convertir a Tweet");
        assert_eq!(Locale::Es.style_label(StyleId::Blog), "Formato Blog");
        assert_eq!(Locale::Es.style_label(StyleId::Formal), "Tono Formal");
        assert_eq!(Locale::Es.style_label(StyleId::Casual), "Tono Casual");
    }
}
