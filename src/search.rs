use anyhow::Result;

use crate::config::Config;
use crate::data_models::{Answer, Mode, Query, RawResponse, RelatedItem, SearchResult};
use crate::fetcher::Fetcher;
use crate::normalizer::{related_items, select_answer};

pub const HINT_RELATED_ONLY: &str = "try broader search";
pub const HINT_DRY: &str = "nothing solid";

pub struct Searcher {
    fetcher: Fetcher,
    endpoint: String,
    client_id: String,
}

impl Searcher {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(config.retry)?;
        Ok(Self::with_fetcher(fetcher, config.endpoint, config.client_id))
    }

    pub fn with_fetcher(fetcher: Fetcher, endpoint: String, client_id: String) -> Self {
        Self {
            fetcher,
            endpoint,
            client_id,
        }
    }

    /// Runs one query. Never fails: an upstream failure is logged and treated
    /// as an empty document, which ends up in `dry` mode.
    pub async fn search(&self, query: &Query) -> SearchResult {
        log::info!("searching: {}", query.text());

        let params = [
            ("q", query.text()),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
            ("t", self.client_id.as_str()),
        ];
        let raw = match self.fetcher.fetch(&self.endpoint, &params).await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("upstream err: {:#}", e);
                RawResponse::empty()
            }
        };

        assemble(query, &raw)
    }
}

/// Builds the result record for a query from an already fetched document.
pub fn assemble(query: &Query, raw: &RawResponse) -> SearchResult {
    let related = related_items(raw);
    let answer = select_answer(raw);
    classify(query, answer, related)
}

fn classify(query: &Query, answer: Option<Answer>, mut related: Vec<RelatedItem>) -> SearchResult {
    // Mode is decided on the uncapped list; `want` only trims what is returned.
    let (mode, hint) = match (&answer, related.is_empty()) {
        (Some(_), _) => (Mode::Instant, None),
        (None, false) => (Mode::RelatedOnly, Some(HINT_RELATED_ONLY)),
        (None, true) => (Mode::Dry, Some(HINT_DRY)),
    };
    related.truncate(query.want());

    SearchResult {
        query: query.text().to_string(),
        mode,
        answer,
        related,
        hint: hint.map(str::to_string),
    }
}

#[test]
fn test_classify_want_zero_keeps_mode_but_drops_related() {
    let related = vec![RelatedItem::new("A", "https://x/1")];
    let result = classify(&Query::new("q", 0), None, related);
    assert_eq!(result.mode, Mode::RelatedOnly);
    assert!(result.related.is_empty());
    assert_eq!(result.hint.as_deref(), Some(HINT_RELATED_ONLY));
}

#[test]
fn test_classify_instant_has_no_hint() {
    let answer = Answer::new(crate::data_models::AnswerKind::Answer, "42");
    let result = classify(&Query::new("q", 6), Some(answer), vec![]);
    assert_eq!(result.mode, Mode::Instant);
    assert!(result.hint.is_none());
    assert!(result.related.is_empty());
}
