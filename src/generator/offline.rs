//! Simulated generator for running without a configured service.

use std::time::Duration;

use async_trait::async_trait;

use super::{GenerationError, GenerationRequest, TextGenerator};
use crate::locale::Locale;
use crate::style::StyleId;

/// Number of subject characters echoed back
const PREVIEW_CHARS: usize = 100;

/// Produces a placeholder remix after a short delay
#[derive(Debug, Clone)]
pub struct OfflineGenerator {
    delay: Duration,
    locale: Locale,
}

impl OfflineGenerator {
    pub fn new(delay: Duration, locale: Locale) -> Self {
        Self { delay, locale }
    }

    /// Build the placeholder text for a subject
    pub fn simulate(&self, style: StyleId, subject: &str) -> String {
        let preview: String = subject.chars().take(PREVIEW_CHARS).collect();
        let ellipsis = if subject.chars().count() > PREVIEW_CHARS {
            "..."
        } else {
            ""
        };

        format!(
            "{} {}{}\n\n{}",
            style_marker(style),
            preview,
            ellipsis,
            self.locale.offline_note()
        )
    }
}

fn style_marker(style: StyleId) -> &'static str {
    match style {
        StyleId::Tweet => "🐦",
        StyleId::Blog => "📝",
        StyleId::Formal => "👔",
        StyleId::Casual => "😊",
    }
}

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        // Gives the UI a visible pending phase
        tokio::time::sleep(self.delay).await;
        Ok(self.simulate(request.style, &request.subject))
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_subject_is_echoed_whole() {
        let generator = OfflineGenerator::new(Duration::ZERO, Locale::En);
        assert_eq!(
            generator.simulate(StyleId::Formal, "hey whats up"),
            "👔 hey whats up\n\n(Test version - API not connected)"
        );
    }

    #[test]
    fn test_long_subject_is_truncated() {
        let generator = OfflineGenerator::new(Duration::ZERO, Locale::Es);
        let subject = "é".repeat(150);
        let text = generator.simulate(StyleId::Tweet, &subject);

        let expected = format!(
            "🐦 {}...\n\n(Versión de prueba - API no conectada)",
            "é".repeat(100)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_exactly_limit_has_no_ellipsis() {
        let generator = OfflineGenerator::new(Duration::ZERO, Locale::En);
        let subject = "a".repeat(PREVIEW_CHARS);
        assert!(!generator.simulate(StyleId::Blog, &subject).contains("..."));
    }

    #[tokio::test]
    async fn test_generate_uses_style_and_subject() {
        let generator = OfflineGenerator::new(Duration::from_millis(1), Locale::En);
        let request = GenerationRequest::new(
            "ignored prompt".to_string(),
            StyleId::Casual,
            "hello".to_string(),
        );
        let text = generator.generate(&request).await.unwrap();
        assert!(text.starts_with("😊 hello"));
    }
}
