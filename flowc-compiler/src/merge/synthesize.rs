//! Default-page synthesis.
//!
//! Runs once after every document is merged. Models without a page of their
//! own get list, create, edit and view pages at conventional paths. A
//! proposal never replaces a page that already occupies its path.

use flowc_core::scalar_to_string;
use flowc_ir::{Mapping, ProjectIR, Value};

use super::visit::visit_components;

/// Components that bind a model through `data_source`.
const DATA_COMPONENTS: [&str; 3] = ["list", "form", "card"];

/// Non-id fields shown on a list page.
const LIST_FIELD_LIMIT: usize = 5;

/// What the synthesis pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synthesis {
    /// Paths of pages that were inserted.
    pub inserted: Vec<String>,
    /// Proposed paths left alone because a page already exists there.
    pub kept: Vec<String>,
}

impl Synthesis {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.kept.is_empty()
    }
}

/// Propose default pages for every unreferenced model in `ir`.
pub fn synthesize_default_pages(ir: &mut ProjectIR) -> Synthesis {
    let proposals: Vec<(String, Value)> = {
        let snapshot: &ProjectIR = ir;
        snapshot
            .models
            .iter()
            .filter(|(name, _)| !is_referenced(snapshot, name))
            .flat_map(|(name, model)| propose(name, model))
            .collect()
    };

    let mut synthesis = Synthesis::default();
    for (path, page) in proposals {
        if ir.pages.contains_key(&path) {
            tracing::debug!(%path, "page exists, keeping authored page");
            synthesis.kept.push(path);
        } else {
            tracing::debug!(%path, "synthesized default page");
            ir.pages.insert(path.clone(), page);
            synthesis.inserted.push(path);
        }
    }
    synthesis
}

fn is_referenced(ir: &ProjectIR, model: &str) -> bool {
    ir.pages.values().any(|page| {
        let by_model = page
            .as_mapping()
            .and_then(|p| p.get("model"))
            .and_then(Value::as_str)
            == Some(model);
        if by_model {
            return true;
        }

        let mut bound = false;
        visit_components(
            page,
            |c| {
                c.get("component")
                    .and_then(Value::as_str)
                    .is_some_and(|name| DATA_COMPONENTS.contains(&name))
                    && c.get("data_source").and_then(Value::as_str) == Some(model)
            },
            |_| bound = true,
        );
        bound
    })
}

/// Field names of a model, from a `fields` mapping or list.
fn field_names(model: &Value) -> Vec<String> {
    let fields = model.as_mapping().and_then(|m| m.get("fields"));
    match fields {
        Some(Value::Mapping(fields)) => fields.keys().filter_map(scalar_to_string).collect(),
        Some(Value::Sequence(fields)) => fields
            .iter()
            .filter_map(|field| match field {
                Value::Mapping(field) => field.get("name").and_then(scalar_to_string),
                other => scalar_to_string(other),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn propose(name: &str, model: &Value) -> Vec<(String, Value)> {
    let base = format!("/{}s", name.to_lowercase());
    let fields = field_names(model);

    let has_id = fields.iter().any(|f| f == "id");
    let others: Vec<&String> = fields.iter().filter(|f| *f != "id").collect();

    let mut list_fields: Vec<&String> = Vec::new();
    if has_id {
        list_fields.extend(fields.iter().find(|f| *f == "id"));
    }
    list_fields.extend(others.iter().take(LIST_FIELD_LIMIT).copied());

    let list = page(
        &base,
        format!("{name} List"),
        name,
        component(
            "list",
            name,
            &list_fields,
            [("actions", strings(&["create", "edit", "delete"]))],
        ),
    );
    let create = page(
        &format!("{base}/create"),
        format!("Create {name}"),
        name,
        component(
            "form",
            name,
            &others,
            [
                ("submit_text", Value::from(format!("Create {name}"))),
                ("cancel_action", Value::from("back")),
            ],
        ),
    );
    let edit = page(
        &format!("{base}/{{id}}/edit"),
        format!("Edit {name}"),
        name,
        component(
            "form",
            name,
            &others,
            [
                ("submit_text", Value::from(format!("Update {name}"))),
                ("cancel_action", Value::from("back")),
            ],
        ),
    );
    let all: Vec<&String> = fields.iter().collect();
    let view = page(
        &format!("{base}/{{id}}"),
        format!("{name} Details"),
        name,
        component(
            "card",
            name,
            &all,
            [("actions", strings(&["edit", "delete"]))],
        ),
    );

    vec![list, create, edit, view]
}

fn strings(items: &[&str]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::from(*s)).collect())
}

fn component<const N: usize>(
    kind: &str,
    model: &str,
    fields: &[&String],
    extra: [(&str, Value); N],
) -> Value {
    let mut component = Mapping::new();
    component.insert("component".into(), kind.into());
    component.insert("data_source".into(), model.into());
    component.insert(
        "fields".into(),
        Value::Sequence(fields.iter().map(|f| Value::from(f.as_str())).collect()),
    );
    for (key, value) in extra {
        component.insert(key.into(), value);
    }
    Value::Mapping(component)
}

fn page(path: &str, title: String, model: &str, body: Value) -> (String, Value) {
    let mut page = Mapping::new();
    page.insert("path".into(), path.into());
    page.insert("title".into(), title.into());
    page.insert("layout".into(), "main".into());
    page.insert("model".into(), model.into());
    page.insert("body".into(), Value::Sequence(vec![body]));
    (path.to_string(), Value::Mapping(page))
}
