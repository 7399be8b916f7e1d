use regex::Regex;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::generator::{Purpose, TextGenerator};
use crate::{GenAiError, Result};

/// Reason returned when generation fails.
pub const REASON_ON_ERROR: &str = "Onbekende overtreding.";
/// Reason returned when the service answers with nothing.
pub const REASON_ON_EMPTY: &str = "Gewoon omdat het kan.";

/// Infallible front for a [`TextGenerator`].
///
/// Every call resolves to a usable string: errors, timeouts and empty output
/// map to fixed fallbacks. Neither call touches roster state.
#[derive(Clone)]
pub struct StrikeWriter {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl StrikeWriter {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// A short, absurd, studio-themed reason for a strike against `name`.
    pub async fn strike_reason(&self, name: &str) -> String {
        match self.attempt(Purpose::StrikeReason, name).await {
            Ok(text) => text,
            Err(GenAiError::EmptyResponse) => REASON_ON_EMPTY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "strike reason generation failed");
                REASON_ON_ERROR.to_string()
            }
        }
    }

    /// Announcement that `name` reached the threshold and owes a treat. The
    /// fallbacks still name the employee.
    pub async fn treat_celebration(&self, name: &str) -> String {
        match self.attempt(Purpose::TreatCelebration, name).await {
            Ok(text) => text,
            Err(GenAiError::EmptyResponse) => format!("{name} moet trakteren!"),
            Err(e) => {
                tracing::warn!(error = %e, "celebration generation failed");
                format!("{name} moet nu echt gaan trakteren!")
            }
        }
    }

    async fn attempt(&self, purpose: Purpose, name: &str) -> Result<String> {
        let raw = tokio::time::timeout(self.timeout, self.generator.generate(purpose, name))
            .await
            .map_err(|_| GenAiError::Timeout(self.timeout))??;
        let text = normalize(&raw);
        if text.is_empty() {
            return Err(GenAiError::EmptyResponse);
        }
        Ok(text)
    }
}

impl std::fmt::Debug for StrikeWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrikeWriter")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

static WS_RE: OnceLock<Regex> = OnceLock::new();

fn ws_re() -> &'static Regex {
    WS_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Collapse whitespace runs and strip wrapping quotes or emphasis markers.
fn normalize(raw: &str) -> String {
    let collapsed = ws_re().replace_all(raw.trim(), " ");
    collapsed
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '*' | '`'))
        .trim()
        .to_string()
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Offline;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed outcome and records who was asked for what.
    struct Scripted {
        reply: Option<&'static str>,
        calls: Mutex<Vec<(Purpose, String)>>,
    }

    impl Scripted {
        fn ok(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, purpose: Purpose, name: &str) -> Result<String> {
            self.calls.lock().unwrap().push((purpose, name.to_string()));
            match self.reply {
                Some(r) => Ok(r.to_string()),
                None => Err(GenAiError::Status {
                    status: 500,
                    body: "boom".into(),
                }),
            }
        }
    }

    struct Hangs;

    #[async_trait]
    impl TextGenerator for Hangs {
        async fn generate(&self, _: Purpose, _: &str) -> Result<String> {
            std::future::pending().await
        }
    }

    fn writer(g: Arc<dyn TextGenerator>) -> StrikeWriter {
        StrikeWriter::new(g, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn reason_passes_through_normalized_text() {
        let g = Scripted::ok("  \"Te veel naar de\n muur gestaard.\"  ");
        let text = writer(g.clone()).strike_reason("Mick").await;
        assert_eq!(text, "Te veel naar de muur gestaard.");
        assert_eq!(
            *g.calls.lock().unwrap(),
            vec![(Purpose::StrikeReason, "Mick".to_string())]
        );
    }

    #[tokio::test]
    async fn reason_error_falls_back() {
        let text = writer(Scripted::failing()).strike_reason("Mick").await;
        assert_eq!(text, REASON_ON_ERROR);
    }

    #[tokio::test]
    async fn reason_empty_falls_back() {
        let text = writer(Scripted::ok("  \n ")).strike_reason("Mick").await;
        assert_eq!(text, REASON_ON_EMPTY);
    }

    #[tokio::test]
    async fn offline_generator_always_falls_back() {
        let w = writer(Arc::new(Offline));
        assert_eq!(w.strike_reason("Jari").await, REASON_ON_ERROR);
        assert_eq!(
            w.treat_celebration("Jari").await,
            "Jari moet nu echt gaan trakteren!"
        );
    }

    #[tokio::test]
    async fn celebration_fallbacks_name_the_employee() {
        let on_error = writer(Scripted::failing()).treat_celebration("Sherin").await;
        assert_eq!(on_error, "Sherin moet nu echt gaan trakteren!");
        let on_empty = writer(Scripted::ok("")).treat_celebration("Sherin").await;
        assert_eq!(on_empty, "Sherin moet trakteren!");
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_generator_times_out() {
        let w = StrikeWriter::new(Arc::new(Hangs), Duration::from_secs(2));
        assert_eq!(w.strike_reason("Pieter").await, REASON_ON_ERROR);
    }

    #[test]
    fn normalize_strips_markup() {
        assert_eq!(normalize("**Vlaai voor iedereen!**"), "Vlaai voor iedereen!");
        assert_eq!(normalize("“Donuts!”"), "Donuts!");
        assert_eq!(normalize("a \t\n b"), "a b");
    }
}
