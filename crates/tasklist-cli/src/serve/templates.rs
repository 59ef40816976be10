//! HTML template rendering for the browser client.
//!
//! Templates are stored as separate files for maintainability:
//! - `templates/index.html` - HTML structure
//! - `templates/styles.css` - CSS styles
//! - `templates/app.js` - JavaScript application code
//!
//! Files are embedded at compile time using `include_str!`.

use std::path::Path;

// Embed template files at compile time
const HTML_TEMPLATE: &str = include_str!("templates/index.html");
const STYLES: &str = include_str!("templates/styles.css");
const SCRIPT: &str = include_str!("templates/app.js");

/// Render the task list page.
///
/// Assembles the final HTML by substituting placeholders in the template:
/// - `{{DATA_FILE}}` - Name of the backing task file
/// - `{{STYLES}}` - CSS styles
/// - `{{SCRIPT}}` - JavaScript code
pub fn render_index(data_file: &Path) -> String {
    let file_name = data_file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("tasks.json");

    HTML_TEMPLATE
        .replace("{{DATA_FILE}}", &html_escape(file_name))
        .replace("{{STYLES}}", STYLES)
        .replace("{{SCRIPT}}", SCRIPT)
}

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
