/// Strip a single Markdown code fence wrapped around the whole text, if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string (```json) up to the first newline
    match body.split_once('\n') {
        Some((_lang, body)) => body.trim(),
        None => trimmed,
    }
}
