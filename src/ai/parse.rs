use once_cell::sync::Lazy;
use regex::Regex;

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```json|```").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s*").unwrap());

/// Turn the model's raw reply into task strings.
///
/// The reply is expected to be a JSON array of strings, possibly wrapped in a
/// markdown code fence. When it does not parse, every non-blank line outside
/// the fences is taken as one task with its bullet marker removed.
pub fn parse_action_items(raw: &str) -> Vec<String> {
    let cleaned = FENCE.replace_all(raw, "");
    let cleaned = cleaned.trim();

    match serde_json::from_str::<serde_json::Value>(cleaned) {
        Ok(serde_json::Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Ok(other) => {
            log::warn!("Model returned JSON that is not an array: {}", other);
            Vec::new()
        }
        Err(e) => {
            log::warn!("Failed to parse action items as JSON ({}), using line fallback", e);
            parse_lines(raw)
        }
    }
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty() && !line.contains("```"))
        .map(|line| BULLET.replace(line.trim(), "").trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
