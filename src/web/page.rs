//! Page contexts: everything a view needs, shaped before rendering.

use crate::chart::ChartData;
use crate::db::QueryResult;
use crate::models::SelectOption;
use crate::web::flash::Notice;

/// Static description of one entity page.
#[derive(Debug)]
pub struct PageMeta {
    pub title: &'static str,
    pub path: &'static str,
    /// Singular noun used in headings, buttons and log lines.
    pub noun: &'static str,
    /// Form field carrying the record id on update.
    pub id_field: &'static str,
    pub can_create: bool,
    pub can_delete: bool,
    /// Message shown when the listing cannot be loaded.
    pub load_error: &'static str,
}

impl PageMeta {
    pub fn create_path(&self) -> String {
        format!("{}/create", self.path)
    }

    pub fn update_path(&self) -> String {
        format!("{}/update", self.path)
    }

    pub fn delete_path(&self) -> String {
        format!("{}/delete", self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Add,
    Update,
    /// Error state: no form is shown.
    None,
}

impl FormAction {
    pub fn label(self) -> &'static str {
        match self {
            FormAction::Add => "Add",
            FormAction::Update => "Update",
            FormAction::None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    DateTime,
    Hidden,
    Select {
        options: Vec<SelectOption>,
        /// First, non-numeric option; submitting it means "none".
        placeholder: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
}

impl FormField {
    pub fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            value: value.into(),
            required: false,
        }
    }

    pub fn hidden(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            label: "",
            kind: FieldKind::Hidden,
            value: value.to_string(),
            required: false,
        }
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: Vec<SelectOption>,
        placeholder: &'static str,
        selected: Option<i64>,
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select {
                options,
                placeholder,
            },
            value: selected.map(|id| id.to_string()).unwrap_or_default(),
            required: false,
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Context for a list + form page.
#[derive(Debug, Clone)]
pub struct EntityPage {
    pub meta: &'static PageMeta,
    pub listing: QueryResult,
    pub action: FormAction,
    pub fields: Vec<FormField>,
    pub chart: Option<ChartData>,
    /// Test names offered as row filters.
    pub filters: Vec<String>,
    pub notices: Vec<Notice>,
    pub error: bool,
}

impl EntityPage {
    pub fn new(meta: &'static PageMeta, listing: QueryResult, record_id: Option<i64>) -> Self {
        Self {
            meta,
            listing,
            action: if record_id.is_some() {
                FormAction::Update
            } else {
                FormAction::Add
            },
            fields: Vec::new(),
            chart: None,
            filters: Vec::new(),
            notices: Vec::new(),
            error: false,
        }
    }

    /// Empty page with the error flag set.
    pub fn failed(meta: &'static PageMeta) -> Self {
        Self {
            meta,
            listing: QueryResult::default(),
            action: FormAction::None,
            fields: Vec::new(),
            chart: None,
            filters: Vec::new(),
            notices: vec![Notice::danger(meta.load_error)],
            error: true,
        }
    }

    pub fn with_fields(mut self, fields: Vec<FormField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_chart(mut self, chart: ChartData) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn with_filters(mut self, filters: Vec<String>) -> Self {
        self.filters = filters;
        self
    }

    /// Whether a form is shown: creating needs the page to allow it.
    pub fn shows_form(&self) -> bool {
        match self.action {
            FormAction::Add => self.meta.can_create,
            FormAction::Update => true,
            FormAction::None => false,
        }
    }

    pub fn form_path(&self) -> String {
        match self.action {
            FormAction::Update => self.meta.update_path(),
            _ => self.meta.create_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SPEC: PageMeta = PageMeta {
        title: "Statuses",
        path: "/statuses",
        noun: "status",
        id_field: "statusId",
        can_create: false,
        can_delete: false,
        load_error: "Error getting statuses",
    };

    #[test]
    fn action_follows_record_id() {
        assert_eq!(EntityPage::new(&SPEC, QueryResult::default(), None).action, FormAction::Add);
        assert_eq!(
            EntityPage::new(&SPEC, QueryResult::default(), Some(2)).action,
            FormAction::Update
        );
    }

    #[test]
    fn add_form_hidden_when_page_cannot_create() {
        let add = EntityPage::new(&SPEC, QueryResult::default(), None);
        assert!(!add.shows_form());
        let update = EntityPage::new(&SPEC, QueryResult::default(), Some(1));
        assert!(update.shows_form());
        assert_eq!(update.form_path(), "/statuses/update");
    }

    #[test]
    fn failed_page_is_empty_and_flagged() {
        let page = EntityPage::failed(&SPEC);
        assert!(page.error);
        assert!(page.listing.is_empty());
        assert_eq!(page.action, FormAction::None);
        assert_eq!(page.notices[0].message, "Error getting statuses");
    }
}
