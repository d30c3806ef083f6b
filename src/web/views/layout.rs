use super::escape;
use crate::config::APP_VERSION;
use crate::web::flash::Notice;

const NAV: [(&str, &str); 8] = [
    ("/", "Home"),
    ("/clinics", "Clinics"),
    ("/patients", "Patients"),
    ("/appointments", "Appointments"),
    ("/statuses", "Statuses"),
    ("/tests", "Tests"),
    ("/results", "Results"),
    ("/scheduledtests", "Scheduled Tests"),
];

/// Wrap page content with navigation, notices and the reset dialog.
pub fn render_layout(title: &str, notices: &[Notice], content: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(href, label)| format!(r#"<li><a href="{href}">{label}</a></li>"#))
        .collect();

    let alerts: String = notices
        .iter()
        .map(|n| {
            format!(
                r#"<div class="alert alert-{}" role="alert">{}<button type="button" class="close">&times;</button></div>"#,
                escape(&n.category),
                escape(&n.message)
            )
        })
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Capital Family Clinic</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<nav>
  <ul>{nav}</ul>
  <div class="nav-actions">
    <a class="export" href="/export">Export</a>
    <button type="button" class="reset-trigger">Reset Database</button>
  </div>
</nav>
<div class="popup reset-popup">
  <p>Reload the sample data? Every change made since the last reset is lost.</p>
  <a class="confirm" href="/reset">Reset</a>
  <button type="button" class="cancel">Cancel</button>
</div>
<main>
{alerts}
{content}
</main>
<footer>clinicdb-admin v{APP_VERSION}</footer>
<script src="/static/app.js"></script>
</body>
</html>"##,
        title = escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_links_every_page_and_shows_notices() {
        let html = render_layout("Clinics", &[Notice::danger("Error <creating> clinic")], "<p>x</p>");
        for (href, _) in NAV {
            assert!(html.contains(&format!(r#"href="{href}""#)), "missing {href}");
        }
        assert!(html.contains(r#"href="/reset""#));
        assert!(html.contains(r#"href="/export""#));
        assert!(html.contains("Error &lt;creating&gt; clinic"));
        assert!(html.contains("<title>Clinics | Capital Family Clinic</title>"));
    }
}
