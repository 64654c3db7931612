/*!
 * Heuristic extraction of a single translation from raw provider output.
 *
 * Providers are instructed to answer with the bare translation, but model
 * output is often decorated with quotes, labels, or explanatory notes.
 * This module isolates the intended translation line by consulting an
 * ordered list of pattern rules; the first rule that produces a usable
 * result wins and later rules are not consulted.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Translation quoted at the start of a line
static QUOTED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)(?:^|\n)"([^"]+)""#).unwrap());

/// Text following a "Runyakitara:" label
static RUNYAKITARA_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Runyakitara:\s*([^\n]+)").unwrap());

/// Text following a "Runyakitara translation:" label
static RUNYAKITARA_TRANSLATION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Runyakitara translation:\s*([^\n]+)").unwrap());

/// Text following a generic "Translation:" label
static TRANSLATION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Translation:\s*([^\n]+)").unwrap());

/// One extraction heuristic: a name for logging plus a matcher that
/// either isolates a candidate translation or declines
struct ExtractionRule {
    name: &'static str,
    apply: fn(&str) -> Option<String>,
}

/// Rules in priority order; first match wins
static RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    vec![
        ExtractionRule { name: "quoted-line", apply: match_quoted_line },
        ExtractionRule { name: "runyakitara-label", apply: match_runyakitara_label },
        ExtractionRule { name: "runyakitara-translation-label", apply: match_runyakitara_translation_label },
        ExtractionRule { name: "translation-label", apply: match_translation_label },
        ExtractionRule { name: "last-plain-line", apply: match_last_plain_line },
    ]
});

fn match_quoted_line(text: &str) -> Option<String> {
    QUOTED_LINE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn match_runyakitara_label(text: &str) -> Option<String> {
    RUNYAKITARA_LABEL
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn match_runyakitara_translation_label(text: &str) -> Option<String> {
    RUNYAKITARA_TRANSLATION_LABEL
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn match_translation_label(text: &str) -> Option<String> {
    TRANSLATION_LABEL
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// The last non-empty line that contains no colon. Explanatory notes
/// tend to be "label: detail" lines; the translation itself is not.
fn match_last_plain_line(text: &str) -> Option<String> {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.contains(':'))
        .map(|line| line.to_string())
}

/// Result of an extraction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The isolated translation
    pub text: String,

    /// Name of the rule that matched, or None when only the
    /// unconditional fallback applied
    pub rule: Option<&'static str>,
}

impl Extraction {
    /// True when no pattern matched cleanly and the result is the
    /// fallback slice of the raw response; callers should treat such
    /// output as lower-confidence.
    pub fn is_degraded(&self) -> bool {
        self.rule.is_none()
    }
}

/// Extractor over raw provider output
pub struct ResponseExtractor;

/// Extraction operations - some methods are API surface for library consumers
#[allow(dead_code)]
impl ResponseExtractor {
    /// Isolate the intended translation from raw provider output.
    ///
    /// Rules are consulted in fixed priority order and the first usable
    /// match is kept. If no rule matches, the first non-empty line is
    /// used; failing even that, the trimmed raw text itself. Leading and
    /// trailing quote characters are stripped from whatever is chosen.
    ///
    /// For non-empty input the result is non-empty, and re-applying the
    /// extractor to an already-clean single line returns it unchanged.
    pub fn extract(raw: &str) -> Extraction {
        for rule in RULES.iter() {
            if let Some(candidate) = (rule.apply)(raw) {
                let tidied = strip_quotes(&candidate);
                if !tidied.is_empty() {
                    return Extraction {
                        text: tidied,
                        rule: Some(rule.name),
                    };
                }
            }
        }

        // Unconditional fallback: first non-empty line, else the raw text
        let fallback = raw
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_else(|| raw.trim());

        // Keep the non-empty guarantee even when stripping eats everything
        let tidied = strip_quotes(fallback);
        let text = if tidied.is_empty() {
            raw.trim().to_string()
        } else {
            tidied
        };

        Extraction { text, rule: None }
    }

    /// Convenience wrapper returning only the extracted text
    pub fn extract_text(raw: &str) -> String {
        Self::extract(raw).text
    }
}

/// Strip decoration quotes from both ends and re-trim
fn strip_quotes(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}
