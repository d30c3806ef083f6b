use std::fmt::Write;

use super::{escape, render_layout};
use crate::db::{QueryResult, Value};
use crate::web::page::{EntityPage, FieldKind, FormAction, FormField};

/// Render a list + form page.
pub fn render_entity_page(page: &EntityPage) -> String {
    let meta = page.meta;
    let mut content = String::new();

    let _ = write!(content, "<h1>{}</h1>", escape(meta.title));
    if meta.can_create && page.action != FormAction::None {
        let _ = write!(
            content,
            r#"<button type="button" class="add">Add {}</button>"#,
            escape(meta.noun)
        );
    }
    if page.chart.is_some() {
        content.push_str(r#"<button type="button" class="view-chart">View Chart</button>"#);
    }

    if page.error {
        let _ = write!(
            content,
            r#"<p class="error-state">The {} list could not be loaded.</p>"#,
            escape(meta.noun)
        );
    }

    content.push_str(&render_filters(page));
    content.push_str(&render_table(page));

    if page.shows_form() {
        content.push_str(&render_form(page));
    }
    if meta.can_delete && !page.error {
        content.push_str(&render_delete_popup(page));
    }
    if let Some(chart) = &page.chart {
        // `</` must not close the script element early
        let json = serde_json::to_string(chart)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/");
        let _ = write!(
            content,
            r#"<div class="popup chart-popup"><button type="button" class="close">&times;</button>
<canvas id="chart" aria-label="Scheduled tests by name"></canvas>
<script id="chart-data" type="application/json">{json}</script></div>"#
        );
    }

    render_layout(meta.title, &page.notices, &content)
}

/// Class a report column's cells carry for client-side filtering.
fn cell_class(column: &str) -> Option<&'static str> {
    match column {
        "First Name" => Some("firstName"),
        "Last Name" => Some("lastName"),
        "Name" | "Patient Name" => Some("name"),
        "Test Name" => Some("test"),
        _ => None,
    }
}

fn render_filters(page: &EntityPage) -> String {
    let mut html = String::new();
    let searchable = page
        .listing
        .columns
        .iter()
        .any(|c| matches!(cell_class(c), Some("firstName" | "lastName" | "name")));
    if searchable {
        html.push_str(
            r#"<input type="search" id="searchInput" placeholder="Search by name" aria-label="Search by name">"#,
        );
    }
    if !page.filters.is_empty() {
        html.push_str(r#"<fieldset class="filter"><legend>Tests</legend>"#);
        for label in &page.filters {
            let label = escape(label);
            let _ = write!(
                html,
                r#"<label><input type="checkbox" name="{label}" checked>{label}</label>"#
            );
        }
        html.push_str("</fieldset>");
    }
    html
}

fn render_table(page: &EntityPage) -> String {
    let listing: &QueryResult = &page.listing;
    let mut html = String::from("<table><thead><tr>");
    for column in &listing.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    if !listing.columns.is_empty() {
        html.push_str("<th></th>");
    }
    html.push_str("</tr></thead><tbody>");

    let classes: Vec<Option<&str>> = listing.columns.iter().map(|c| cell_class(c)).collect();
    for row in &listing.rows {
        html.push_str("<tr>");
        for (idx, value) in row.values().enumerate() {
            let text = escape(&value.to_string());
            match classes.get(idx).copied().flatten() {
                Some(class) => {
                    let _ = write!(html, r#"<td class="{class}">{text}</td>"#);
                }
                None => {
                    let _ = write!(html, "<td>{text}</td>");
                }
            }
        }

        html.push_str(r#"<td class="actions">"#);
        if let Some(id) = row.first().and_then(Value::as_i64) {
            let _ = write!(html, r#"<a class="edit" href="{}?id={id}">Edit</a>"#, page.meta.path);
            if page.meta.can_delete {
                let _ = write!(
                    html,
                    r#"<button type="button" class="delete-trigger" data-id="{id}">Delete</button>"#
                );
            }
        }
        html.push_str("</td></tr>");
    }
    html.push_str("</tbody></table>");
    html
}

fn render_form(page: &EntityPage) -> String {
    let active = if page.action == FormAction::Update {
        " active"
    } else {
        ""
    };
    let mut html = format!(
        r#"<div class="popup add-form-popup{active}"><button type="button" class="close">&times;</button>
<h2>{} {}</h2><form method="post" action="{}">"#,
        page.action.label(),
        escape(page.meta.noun),
        page.form_path(),
    );
    for field in &page.fields {
        html.push_str(&render_field(field));
    }
    let _ = write!(
        html,
        r#"<button type="submit">{}</button></form></div>"#,
        page.action.label()
    );
    html
}

fn render_field(field: &FormField) -> String {
    let required = if field.required { " required" } else { "" };
    let input = |kind: &str| {
        format!(
            r#"<label>{label}<input type="{kind}" name="{name}" value="{value}"{required}></label>"#,
            label = escape(field.label),
            name = field.name,
            value = escape(&field.value),
        )
    };

    match &field.kind {
        FieldKind::Text => input("text"),
        FieldKind::Email => input("email"),
        FieldKind::Tel => input("tel"),
        FieldKind::Date => input("date"),
        FieldKind::DateTime => input("datetime-local"),
        FieldKind::Hidden => format!(
            r#"<input type="hidden" name="{}" value="{}">"#,
            field.name,
            escape(&field.value)
        ),
        FieldKind::Select {
            options,
            placeholder,
        } => {
            let mut html = format!(
                r#"<label>{}<select name="{}"{required}><option>{}</option>"#,
                escape(field.label),
                field.name,
                escape(placeholder)
            );
            for option in options {
                let value = option.value.to_string();
                let selected = if value == field.value { " selected" } else { "" };
                let _ = write!(
                    html,
                    r#"<option value="{value}"{selected}>{}</option>"#,
                    escape(&option.label)
                );
            }
            html.push_str("</select></label>");
            html
        }
    }
}

fn render_delete_popup(page: &EntityPage) -> String {
    format!(
        r#"<div class="popup delete-form-popup"><form method="post" action="{}">
<p>Delete this {}?</p>
<input type="hidden" id="deleteId" name="id_to_delete" value="">
<button type="submit">Delete</button>
<button type="button" id="cancel">Cancel</button></form></div>"#,
        page.meta.delete_path(),
        escape(page.meta.noun)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartData;
    use crate::models::SelectOption;
    use crate::web::page::PageMeta;

    static TESTS_PAGE: PageMeta = PageMeta {
        title: "Tests",
        path: "/tests",
        noun: "test",
        id_field: "testId",
        can_create: true,
        can_delete: true,
        load_error: "Error getting tests",
    };

    fn listing() -> QueryResult {
        let row = vec![
            ("Test ID".to_string(), Value::Integer(3)),
            ("Name".to_string(), Value::from("<CBC>")),
        ]
        .into_iter()
        .collect();
        QueryResult {
            columns: vec!["Test ID".into(), "Name".into()],
            rows: vec![row],
        }
    }

    #[test]
    fn table_escapes_cells_and_links_records() {
        let page = EntityPage::new(&TESTS_PAGE, listing(), None);
        let html = render_entity_page(&page);
        assert!(html.contains("<th>Test ID</th><th>Name</th>"));
        assert!(html.contains(r#"<td class="name">&lt;CBC&gt;</td>"#));
        assert!(html.contains("<td>3</td>"));
        assert!(html.contains(r#"href="/tests?id=3""#));
        assert!(html.contains(r#"data-id="3""#));
        assert!(html.contains(r#"action="/tests/delete""#));
    }

    #[test]
    fn update_form_is_open_and_prefilled() {
        let page = EntityPage::new(&TESTS_PAGE, listing(), Some(3)).with_fields(vec![
            FormField::hidden("testId", 3),
            FormField::text("name", "Name", "CBC").required(true),
        ]);
        let html = render_entity_page(&page);
        assert!(html.contains("add-form-popup active"));
        assert!(html.contains(r#"action="/tests/update""#));
        assert!(html.contains(r#"name="testId" value="3""#));
        assert!(html.contains(r#"name="name" value="CBC" required"#));
    }

    #[test]
    fn select_marks_current_value() {
        let field = FormField::select(
            "testResultId",
            "Result",
            vec![SelectOption::new(1, "Pending"), SelectOption::new(2, "Normal")],
            "Select a result",
            Some(2),
        );
        let html = render_field(&field);
        assert!(html.contains("<option>Select a result</option>"));
        assert!(html.contains(r#"<option value="2" selected>Normal</option>"#));
        assert!(html.contains(r#"<option value="1">Pending</option>"#));
    }

    #[test]
    fn error_page_has_indicator_and_no_form() {
        let html = render_entity_page(&EntityPage::failed(&TESTS_PAGE));
        assert!(html.contains(r#"class="error-state""#));
        assert!(!html.contains("<form method=\"post\" action=\"/tests/create\""));
        assert!(html.contains("Error getting tests"));
    }

    #[test]
    fn name_columns_get_search_box() {
        let html = render_entity_page(&EntityPage::new(&TESTS_PAGE, listing(), None));
        assert!(html.contains(r#"id="searchInput""#));
        assert!(!html.contains(r#"class="filter""#));

        let mut unnamed = listing();
        unnamed.columns[1] = "Result".into();
        let html = render_entity_page(&EntityPage::new(&TESTS_PAGE, unnamed, None));
        assert!(!html.contains(r#"id="searchInput""#));
    }

    #[test]
    fn test_filters_render_checked_boxes() {
        let page = EntityPage::new(&TESTS_PAGE, listing(), None)
            .with_filters(vec!["CBC".into(), "TSH".into()]);
        let html = render_entity_page(&page);
        assert!(html.contains(r#"<fieldset class="filter">"#));
        assert!(html.contains(r#"<input type="checkbox" name="CBC" checked>CBC</label>"#));
        assert!(html.contains(r#"<input type="checkbox" name="TSH" checked>TSH</label>"#));
    }

    #[test]
    fn cell_classes_follow_column_labels() {
        assert_eq!(cell_class("First Name"), Some("firstName"));
        assert_eq!(cell_class("Last Name"), Some("lastName"));
        assert_eq!(cell_class("Patient Name"), Some("name"));
        assert_eq!(cell_class("Test Name"), Some("test"));
        assert_eq!(cell_class("City"), None);
    }

    #[test]
    fn chart_json_is_embedded() {
        let chart = ChartData {
            labels: vec!["CBC".into(), "</script>".into()],
            data: vec![2, 0],
        };
        let page = EntityPage::new(&TESTS_PAGE, listing(), None).with_chart(chart);
        let html = render_entity_page(&page);
        assert!(html.contains(r#""labels":["CBC","<\/script>"],"data":[2,0]"#));
    }
}
