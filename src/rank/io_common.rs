use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Parses the content of a score cell.
///
/// Empty cells are missing scores. A decimal comma is accepted.
pub fn parse_score(content: &str) -> Result<Option<f64>, String> {
    let s = content.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| content.to_string())
}
