//! Formatting of the free-text blocks for embedding in the HTML template.

use tera::escape_html;

/// Format the bank-details block: each line is split on the first colon, the
/// left-hand part becomes a bold label and the remainder follows unchanged;
/// lines without a colon pass through as-is. Lines are rejoined with `<br>`.
pub fn format_bank_details(details: &str) -> String {
    let formatted: Vec<String> = details
        .lines()
        .map(|line| match line.split_once(':') {
            Some((heading, content)) => {
                let heading = escape_html(heading.trim());
                let content = escape_html(content.trim());
                if content.is_empty() {
                    format!("<strong>{}:</strong>", heading)
                } else {
                    format!("<strong>{}:</strong> {}", heading, content)
                }
            }
            None => escape_html(line),
        })
        .collect();
    formatted.join("<br>")
}

/// Escape a multi-line block and join its lines with `<br>`.
pub fn multiline_html(text: &str) -> String {
    let lines: Vec<String> = text.lines().map(escape_html).collect();
    lines.join("<br>")
}
