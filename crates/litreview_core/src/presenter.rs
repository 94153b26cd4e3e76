/// Splits a review into paragraphs, one per line, keeping empty lines.
pub fn segments(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Human readable size, e.g. `1.50 MB`.
pub fn format_megabytes(size: u64) -> String {
    format!("{:.2} MB", size as f64 / 1024.0 / 1024.0)
}
