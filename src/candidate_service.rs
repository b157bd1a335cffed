//! Kana-to-word candidate providers.
//!
//! The session never talks to a service directly: it emits an
//! `AsyncCandidateRequest`, the host runs a [`CandidateService`] on the
//! worker thread, and the result comes back through `receive_candidates`.

use std::collections::HashMap;

use tracing::debug;
use vrkb_session::CandidateError;

const TRANSLITERATE_URL: &str = "https://www.google.com/transliterate";
const LANGPAIR: &str = "ja-Hira|ja";

/// Looks up word candidates for a hiragana reading.
pub trait CandidateService: Send + Sync {
    fn fetch(&self, reading: &str) -> Result<Vec<String>, CandidateError>;
}

/// Google Transliterate JSON endpoint.
///
/// The response is `[[segment_reading, [candidate, ...]], ...]`; a reading
/// the service splits into several segments yields one list per segment.
pub struct GoogleTransliterate {
    url: String,
}

impl GoogleTransliterate {
    pub fn new() -> Self {
        Self::with_url(TRANSLITERATE_URL)
    }

    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl Default for GoogleTransliterate {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateService for GoogleTransliterate {
    fn fetch(&self, reading: &str) -> Result<Vec<String>, CandidateError> {
        debug!(%reading, "fetching candidates");
        let body = ureq::get(self.url.as_str())
            .query("langpair", LANGPAIR)
            .query("text", reading)
            .call()
            .map_err(|e| CandidateError::Transport(format!("{}: {e}", self.url)))?
            .into_body()
            .read_to_string()
            .map_err(|e| CandidateError::Transport(format!("{}: {e}", self.url)))?;
        parse_transliterate_response(&body)
    }
}

/// Parse a transliterate response into whole-reading candidates.
///
/// Segments are joined rank by rank: candidate `i` is the concatenation of
/// every segment's `i`-th candidate, falling back to a segment's first
/// candidate when it has fewer. Duplicates are removed, order kept.
pub fn parse_transliterate_response(json: &str) -> Result<Vec<String>, CandidateError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| CandidateError::Parse(e.to_string()))?;
    let segments = value
        .as_array()
        .ok_or_else(|| CandidateError::Parse("expected a top-level array".into()))?;

    let mut lists: Vec<Vec<String>> = Vec::with_capacity(segments.len());
    for segment in segments {
        let reading = segment.get(0).and_then(|v| v.as_str()).unwrap_or("");
        let candidates: Vec<String> = segment
            .get(1)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|c| c.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if candidates.is_empty() {
            if reading.is_empty() {
                return Err(CandidateError::Parse("segment without candidates".into()));
            }
            lists.push(vec![reading.to_string()]);
        } else {
            lists.push(candidates);
        }
    }

    let ranks = lists.iter().map(Vec::len).max().unwrap_or(0);
    let mut out: Vec<String> = Vec::with_capacity(ranks);
    for rank in 0..ranks {
        let joined: String = lists
            .iter()
            .map(|l| l.get(rank).unwrap_or(&l[0]).as_str())
            .collect();
        if !out.contains(&joined) {
            out.push(joined);
        }
    }
    Ok(out)
}

/// Fixed reading → candidates table, for offline use and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticCandidates {
    entries: HashMap<String, Vec<String>>,
}

impl StaticCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reading: &str, candidates: &[&str]) -> Self {
        self.entries.insert(
            reading.to_string(),
            candidates.iter().map(|c| c.to_string()).collect(),
        );
        self
    }
}

impl CandidateService for StaticCandidates {
    fn fetch(&self, reading: &str) -> Result<Vec<String>, CandidateError> {
        Ok(self.entries.get(reading).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let json = r#"[["ねこ",["猫","ネコ","根子"]]]"#;
        assert_eq!(
            parse_transliterate_response(json).unwrap(),
            vec!["猫", "ネコ", "根子"]
        );
    }

    #[test]
    fn test_parse_multi_segment_joins_by_rank() {
        let json = r#"[["わたしは",["私は","渡しは"]],["ねこ",["猫","ネコ","根子"]]]"#;
        assert_eq!(
            parse_transliterate_response(json).unwrap(),
            vec!["私は猫", "渡しはネコ", "私は根子"]
        );
    }

    #[test]
    fn test_parse_dedups() {
        let json = r#"[["a",["x","x"]],["b",["y","y"]]]"#;
        assert_eq!(parse_transliterate_response(json).unwrap(), vec!["xy"]);
    }

    #[test]
    fn test_parse_empty_candidates_use_reading() {
        let json = r#"[["ねこ",[]]]"#;
        assert_eq!(parse_transliterate_response(json).unwrap(), vec!["ねこ"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_transliterate_response("not json"),
            Err(CandidateError::Parse(_))
        ));
        assert!(matches!(
            parse_transliterate_response(r#"{"a":1}"#),
            Err(CandidateError::Parse(_))
        ));
        assert!(matches!(
            parse_transliterate_response(r#"[[1,2]]"#),
            Err(CandidateError::Parse(_))
        ));
    }

    #[test]
    fn test_static_candidates() {
        let svc = StaticCandidates::new().with("ねこ", &["猫", "ネコ"]);
        assert_eq!(svc.fetch("ねこ").unwrap(), vec!["猫", "ネコ"]);
        assert!(svc.fetch("いぬ").unwrap().is_empty());
    }

    #[test]
    fn test_unreachable_service_is_transport_error() {
        let svc = GoogleTransliterate::with_url("http://127.0.0.1:9/transliterate");
        assert!(matches!(svc.fetch("ねこ"), Err(CandidateError::Transport(_))));
    }
}
