use crate::data_models::SearchResult;

/// Indented JSON with the record's field names as-is.
pub fn to_json(result: &SearchResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Human-readable rendering: answer line, related block, hint. Absent sections
/// are left out entirely.
pub fn to_text(result: &SearchResult) -> String {
    let mut lines = Vec::new();

    if let Some(answer) = &result.answer {
        lines.push(format!("{}: {}", answer.kind.as_str(), answer.value));
    }

    if !result.related.is_empty() {
        lines.push("related:".to_string());
        for item in &result.related {
            lines.push(format!("- {} -> {}", item.title, item.url));
        }
    }

    if let Some(hint) = result.hint.as_deref().filter(|h| !h.is_empty()) {
        lines.push(hint.to_string());
    }

    lines.join("\n")
}
