use serde_json::Value;
use std::collections::HashSet;

use crate::data_models::{Answer, AnswerKind, RawResponse, RelatedItem, get_array, get_str};

/// Flattens a `RelatedTopics` array into title/url pairs.
///
/// Elements are either direct topics (`FirstURL` + `Text`) or groups holding a
/// `Topics` array of direct topics. Anything malformed is skipped. The output
/// keeps first-seen order and drops later items whose URL was already seen.
pub fn flatten(related_topics: &[Value]) -> Vec<RelatedItem> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for element in related_topics {
        let Some(object) = element.as_object() else {
            continue;
        };

        match get_array(object, "Topics") {
            Some(topics) => {
                for topic in topics {
                    push_unique(&mut out, &mut seen, topic);
                }
            }
            None => push_unique(&mut out, &mut seen, element),
        }
    }

    out
}

fn push_unique(out: &mut Vec<RelatedItem>, seen: &mut HashSet<String>, topic: &Value) {
    let Some(item) = direct_topic(topic) else {
        return;
    };
    if seen.insert(item.url.clone()) {
        out.push(item);
    }
}

fn direct_topic(topic: &Value) -> Option<RelatedItem> {
    let object = topic.as_object()?;
    let url = get_str(object, "FirstURL").filter(|s| !s.is_empty())?;
    let title = get_str(object, "Text").filter(|s| !s.is_empty())?;
    Some(RelatedItem::new(title, url))
}

/// Flattens the `RelatedTopics` field of a raw response, if it has one.
pub fn related_items(raw: &RawResponse) -> Vec<RelatedItem> {
    raw.get_array("RelatedTopics")
        .map(|topics| flatten(topics.as_slice()))
        .unwrap_or_default()
}

/// Picks the single best answer. `Answer`, `Definition` and `AbstractText` are
/// tried in that order, then `Abstract` when `Heading` is also set.
pub fn select_answer(raw: &RawResponse) -> Option<Answer> {
    let non_empty = |key: &str| raw.get_str(key).filter(|s| !s.is_empty());

    if let Some(value) = non_empty("Answer") {
        return Some(Answer::new(AnswerKind::Answer, value));
    }
    if let Some(value) = non_empty("Definition") {
        return Some(Answer::new(AnswerKind::Definition, value));
    }
    if let Some(value) = non_empty("AbstractText") {
        return Some(Answer::new(AnswerKind::Abstract, value));
    }
    // Heading only gates this rule; its value is never returned.
    match (non_empty("Heading"), non_empty("Abstract")) {
        (Some(_), Some(value)) => Some(Answer::new(AnswerKind::Abstract, value)),
        _ => None,
    }
}
