//! Additive substring ranking over the three corpora.
//!
//! Per scored text field:
//! - the whole query appearing in the field adds 10;
//! - each query token of three or more characters found in the field adds 2.
//!
//! Each of an entry's keyword tags contained in the query adds 3. Entries that
//! score 0 are dropped. The sort is stable, so ties keep corpus order
//! (manuals, runbooks, incidents) and file order within a corpus.

use std::collections::HashSet;

use ff_core::enums::KbSource;
use ff_core::responses::KbSearchResult;

use crate::corpus::KbCorpus;

const PHRASE_SCORE: u32 = 10;
const TOKEN_SCORE: u32 = 2;
const KEYWORD_SCORE: u32 = 3;
const MIN_TOKEN_CHARS: usize = 3;
const SNIPPET_CHARS: usize = 200;

/// A ranked result together with the full record it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct KbHit {
    pub result: KbSearchResult,
    pub raw: serde_json::Value,
}

/// Lowercased query plus its scoring tokens.
struct Query<'a> {
    phrase: String,
    tokens: Vec<&'a str>,
}

impl<'a> Query<'a> {
    fn new(lowered: &'a str) -> Self {
        Self {
            phrase: lowered.to_string(),
            tokens: lowered
                .split_whitespace()
                .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
                .collect(),
        }
    }

    fn score_text(&self, text: Option<&str>) -> u32 {
        let Some(text) = text else { return 0 };
        let text = text.to_lowercase();
        let mut score = 0;
        if text.contains(&self.phrase) {
            score += PHRASE_SCORE;
        }
        for token in &self.tokens {
            if text.contains(token) {
                score += TOKEN_SCORE;
            }
        }
        score
    }

    fn score_keywords(&self, keywords: &[String]) -> u32 {
        let matched = keywords
            .iter()
            .filter(|k| !k.is_empty() && self.phrase.contains(&k.to_lowercase()))
            .count();
        u32::try_from(matched).unwrap_or(u32::MAX).saturating_mul(KEYWORD_SCORE)
    }
}

fn snippet(text: Option<&str>) -> String {
    let head: String = text.unwrap_or_default().chars().take(SNIPPET_CHARS).collect();
    format!("{head}...")
}

fn hit(
    id: &str,
    title: Option<&str>,
    primary: Option<&str>,
    source: KbSource,
    score: u32,
    raw: serde_json::Value,
) -> KbHit {
    KbHit {
        result: KbSearchResult {
            id: id.to_string(),
            title: title.unwrap_or("Untitled").to_string(),
            snippet: snippet(primary),
            source,
            score,
        },
        raw,
    }
}

/// Rank `corpus` against `query`, keeping at most `max_results` hits.
///
/// A blank query matches nothing.
#[must_use]
pub fn search(corpus: &KbCorpus, query: &str, max_results: usize) -> Vec<KbHit> {
    let lowered = query.trim().to_lowercase();
    if lowered.is_empty() || max_results == 0 {
        return Vec::new();
    }
    let q = Query::new(&lowered);
    let mut hits = Vec::new();

    let mut seen = HashSet::new();
    for m in &corpus.manuals {
        if !seen.insert(m.id.as_str()) {
            continue;
        }
        let score = q.score_text(m.title.as_deref())
            + q.score_text(m.equipment.as_deref())
            + q.score_text(m.content.as_deref())
            + q.score_keywords(&m.keywords);
        if score > 0 {
            let raw = serde_json::to_value(m).unwrap_or_default();
            hits.push(hit(&m.id, m.title.as_deref(), m.content.as_deref(), KbSource::Manual, score, raw));
        }
    }

    let mut seen = HashSet::new();
    for r in &corpus.runbooks {
        if !seen.insert(r.id.as_str()) {
            continue;
        }
        let equipment = (!r.equipment.is_empty()).then(|| r.equipment.join(" "));
        let score = q.score_text(r.title.as_deref())
            + q.score_text(r.procedure.as_deref())
            + q.score_text(equipment.as_deref())
            + q.score_keywords(&r.keywords);
        if score > 0 {
            let raw = serde_json::to_value(r).unwrap_or_default();
            hits.push(hit(&r.id, r.title.as_deref(), r.procedure.as_deref(), KbSource::Runbook, score, raw));
        }
    }

    let mut seen = HashSet::new();
    for i in &corpus.incidents {
        if !seen.insert(i.id.as_str()) {
            continue;
        }
        let score = q.score_text(i.title.as_deref())
            + q.score_text(i.problem.as_deref())
            + q.score_text(i.resolution.as_deref())
            + q.score_text(i.equipment_type.as_deref())
            + q.score_keywords(&i.keywords);
        if score > 0 {
            let raw = serde_json::to_value(i).unwrap_or_default();
            hits.push(hit(&i.id, i.title.as_deref(), i.resolution.as_deref(), KbSource::Incident, score, raw));
        }
    }

    hits.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    hits.truncate(max_results);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Incident, Manual, Runbook};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn manual(id: &str, title: &str, content: &str, keywords: &[&str]) -> Manual {
        Manual {
            id: id.into(),
            title: Some(title.into()),
            equipment: None,
            content: Some(content.into()),
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }

    fn corpus() -> KbCorpus {
        KbCorpus {
            manuals: vec![
                manual("MAN-PUMP-001", "Pump seal replacement", "Replace the mechanical seal.", &["pump", "seal"]),
                manual("MAN-HVAC-001", "HVAC filter service", "Swap clogged air filters.", &["hvac", "filter"]),
            ],
            runbooks: vec![Runbook {
                id: "RB-ELEC-001".into(),
                title: Some("Lockout/Tagout".into()),
                procedure: Some("Isolate power before opening any panel.".into()),
                equipment: vec!["pump".into(), "generator".into()],
                keywords: vec!["power".into(), "wiring".into()],
            }],
            incidents: vec![Incident {
                id: "INC-2023-014".into(),
                title: Some("Pump leak near panel".into()),
                problem: Some("Water reached the electrical panel.".into()),
                resolution: Some("Relocated panel, replaced seal.".into()),
                equipment_type: Some("Industrial Water Pump".into()),
                keywords: vec!["leak".into()],
            }],
        }
    }

    fn ids(hits: &[KbHit]) -> Vec<&str> {
        hits.iter().map(|h| h.result.id.as_str()).collect()
    }

    #[test]
    fn phrase_tokens_and_keywords_add_up() {
        let corpus = KbCorpus {
            manuals: vec![manual("M", "Pump seal", "nothing here", &["seal"])],
            ..KbCorpus::default()
        };
        // title: phrase 10 + "pump" 2 + "seal" 2; keyword "seal" 3
        let hits = search(&corpus, "Pump Seal", 10);
        assert_eq!(hits[0].result.score, 17);
    }

    #[test]
    fn tokens_score_per_field() {
        let corpus = KbCorpus {
            manuals: vec![Manual {
                id: "M".into(),
                title: Some("pump".into()),
                equipment: Some("pump".into()),
                content: Some("pump".into()),
                keywords: vec![],
            }],
            ..KbCorpus::default()
        };
        // "pump" alone is also the full phrase: 12 per field
        assert_eq!(search(&corpus, "pump", 10)[0].result.score, 36);
        // phrase no longer matches; token scores 2 in each field
        assert_eq!(search(&corpus, "pump xyzzy", 10)[0].result.score, 6);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("qq zz")]
    #[case("nonexistent gizmo")]
    fn queries_without_matches_return_nothing(#[case] query: &str) {
        assert!(search(&corpus(), query, 10).is_empty());
    }

    #[test]
    fn zero_scores_are_never_returned() {
        for query in ["pump", "filter", "panel", "power wiring", "seal leak", "z"] {
            assert!(search(&corpus(), query, 10).iter().all(|h| h.result.score > 0));
        }
    }

    #[test]
    fn ranking_is_deterministic() {
        let corpus = corpus();
        let first = search(&corpus, "pump seal leak near power panel", 10);
        for _ in 0..5 {
            assert_eq!(search(&corpus, "pump seal leak near power panel", 10), first);
        }
    }

    #[test]
    fn ties_keep_corpus_order() {
        let corpus = KbCorpus {
            manuals: vec![manual("M", "", "valve", &[])],
            runbooks: vec![Runbook {
                id: "R".into(),
                procedure: Some("valve".into()),
                ..Runbook::default()
            }],
            incidents: vec![Incident {
                id: "I".into(),
                resolution: Some("valve".into()),
                ..Incident::default()
            }],
        };
        assert_eq!(ids(&search(&corpus, "valve", 10)), vec!["M", "R", "I"]);
    }

    #[test]
    fn results_are_truncated_after_sorting() {
        let hits = search(&corpus(), "pump seal", 1);
        assert_eq!(ids(&hits), vec!["MAN-PUMP-001"]);
    }

    #[test]
    fn duplicate_ids_within_a_corpus_rank_once() {
        let mut corpus = corpus();
        corpus.manuals.push(manual("MAN-PUMP-001", "Pump seal (copy)", "seal", &["seal"]));
        corpus.runbooks.push(Runbook {
            id: "MAN-PUMP-001".into(),
            procedure: Some("pump seal check".into()),
            ..Runbook::default()
        });

        let hits = search(&corpus, "pump seal", 10);
        let manual_hits: Vec<_> = hits
            .iter()
            .filter(|h| h.result.id == "MAN-PUMP-001" && h.result.source == KbSource::Manual)
            .collect();
        assert_eq!(manual_hits.len(), 1);
        assert_eq!(manual_hits[0].result.title, "Pump seal replacement");
        assert!(hits.iter().any(|h| h.result.source == KbSource::Runbook && h.result.id == "MAN-PUMP-001"));
    }

    #[test]
    fn snippet_and_title_defaults() {
        let corpus = KbCorpus {
            incidents: vec![Incident {
                id: "I".into(),
                problem: Some("overheating compressor".into()),
                ..Incident::default()
            }],
            ..KbCorpus::default()
        };
        let hit = &search(&corpus, "overheating", 10)[0];
        assert_eq!(hit.result.title, "Untitled");
        assert_eq!(hit.result.snippet, "...");
        assert_eq!(hit.raw["id"], "I");
    }

    #[test]
    fn snippet_takes_first_200_chars() {
        let long = "é".repeat(250);
        let corpus = KbCorpus {
            manuals: vec![manual("M", "Long", &long, &["long"])],
            ..KbCorpus::default()
        };
        let hit = &search(&corpus, "long", 10)[0];
        assert_eq!(hit.result.snippet.chars().count(), 203);
        assert!(hit.result.snippet.ends_with("..."));
    }
}
