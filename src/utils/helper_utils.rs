/// Strips control characters that break the editor surface, keeping the
/// whitespace that source code legitimately carries.
pub fn sanitize_code_content(code: &str) -> String {
    code.chars()
        .filter(|&c| c == '\n' || c == '\r' || c == '\t' || c >= ' ')
        .collect()
}

/// Canonical form for judge stdout comparison: empty stays empty, anything
/// else is trimmed and given exactly one trailing newline.
pub fn normalize_output(output: &str) -> String {
    if output.is_empty() {
        return String::new();
    }
    format!("{}\n", output.trim())
}
