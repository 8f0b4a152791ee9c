use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single search request: the query text and how many related links to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    want: usize,
}

impl Query {
    pub fn new(text: impl Into<String>, want: usize) -> Query {
        Query {
            text: text.into(),
            want,
        }
    }

    /// Builds the query text by joining command-line words with single spaces.
    pub fn from_words<S: AsRef<str>>(words: &[S], want: usize) -> Query {
        let text = words
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        Query::new(text, want)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn want(&self) -> usize {
        self.want
    }
}

/// The upstream JSON object, kept untyped. Accessors return `None` on absent
/// keys and on type mismatches alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse(Map<String, Value>);

impl RawResponse {
    pub fn new(fields: Map<String, Value>) -> RawResponse {
        RawResponse(fields)
    }

    pub fn empty() -> RawResponse {
        RawResponse(Map::new())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        get_str(&self.0, key)
    }

    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        get_array(&self.0, key)
    }
}

pub fn get_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

pub fn get_array<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    object.get(key).and_then(Value::as_array)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RelatedItem {
    pub title: String,
    pub url: String,
}

impl RelatedItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> RelatedItem {
        RelatedItem {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Answer,
    Definition,
    Abstract,
}

impl AnswerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Answer => "answer",
            AnswerKind::Definition => "definition",
            AnswerKind::Abstract => "abstract",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub kind: AnswerKind,
    pub value: String,
}

impl Answer {
    pub fn new(kind: AnswerKind, value: impl Into<String>) -> Answer {
        Answer {
            kind,
            value: value.into(),
        }
    }
}

/// How much useful data a search produced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Instant,
    RelatedOnly,
    Dry,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub query: String,
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
    pub related: Vec<RelatedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
