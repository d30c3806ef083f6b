//! Server-side HTML rendering. Every dynamic string goes through
//! [`escape`].

mod entity;
mod home;
mod layout;

pub use entity::render_entity_page;
pub use home::render_home;
pub use layout::render_layout;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
