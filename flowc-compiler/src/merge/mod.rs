//! IRMerger: folds tagged documents into the project IR.
//!
//! Merging is a pure fold, `merge(ir, document) -> ir'`, applied once per
//! document in discovery order. Keyed categories use upsert-by-key with
//! whole-value replacement (the last document wins and earlier fields are
//! not unioned in). Integration sections and `authentication`/`theme` are
//! replaced wholesale. Key collisions are recorded as [`MergeConflict`]s;
//! they are expected and never fatal.

mod forms;
pub mod sections;
mod synthesize;
mod visit;

use std::{fmt, path::PathBuf};

use flowc_core::scalar_to_string;
use flowc_dialect::{Dialect, Document};
use flowc_ir::{Entities, Mapping, ProjectIR, Value};

pub use forms::parse_smart_form;
pub use synthesize::{Synthesis, synthesize_default_pages};
pub use visit::{component_config, named, visit_components};

/// `connection` value that redirects a model into the vector databases.
pub const LOCAL_VECTOR_DB: &str = "local_vector_db";

/// A key defined more than once. The later definition replaced the earlier
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub category: &'static str,
    pub key: String,
    /// The file whose definition won.
    pub file: PathBuf,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' redefined by {}",
            self.category,
            self.key,
            self.file.display()
        )
    }
}

/// The result of merging one or more documents.
#[derive(Debug, Clone, Default)]
pub struct MergeStep {
    pub ir: ProjectIR,
    pub conflicts: Vec<MergeConflict>,
    /// Entries skipped because they could not be keyed or had the wrong shape.
    pub warnings: Vec<String>,
}

/// Merge one document into `ir`.
pub fn merge(ir: ProjectIR, document: &Document) -> MergeStep {
    let mut merger = Merger {
        ir,
        doc: document,
        conflicts: Vec::new(),
        warnings: Vec::new(),
    };

    match document.dialect {
        Dialect::Flow => merger.merge_flow(),
        Dialect::LiveFlow => merger.merge_liveflow(),
        Dialect::JobFlow => merger.merge_jobflow(),
        Dialect::TestFlow => merger.merge_testflow(),
    }

    MergeStep {
        ir: merger.ir,
        conflicts: merger.conflicts,
        warnings: merger.warnings,
    }
}

/// Fold `documents` in order into a fresh IR.
pub fn fold_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> MergeStep {
    documents
        .into_iter()
        .fold(MergeStep::default(), |mut acc, document| {
            let step = merge(acc.ir, document);
            acc.ir = step.ir;
            acc.conflicts.extend(step.conflicts);
            acc.warnings.extend(step.warnings);
            acc
        })
}

struct Merger<'a> {
    ir: ProjectIR,
    doc: &'a Document,
    conflicts: Vec<MergeConflict>,
    warnings: Vec<String>,
}

/// Upsert into one IR map, recording a conflict if the key was taken.
///
/// A macro rather than a method so the target map and the conflict log can
/// be borrowed from the merger at the same time.
macro_rules! upsert {
    ($self:ident, $field:ident, $key:expr, $value:expr) => {{
        let key: String = $key;
        if $self.ir.$field.insert(key.clone(), $value).is_some() {
            $self.conflict(stringify!($field), key);
        }
    }};
}

impl Merger<'_> {
    fn conflict(&mut self, category: &'static str, key: String) {
        tracing::debug!(category, %key, file = %self.doc.path.display(), "merge conflict, later definition wins");
        self.conflicts.push(MergeConflict {
            category,
            key,
            file: self.doc.path.clone(),
        });
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = format!("{}: {}", self.doc.path.display(), message.into());
        tracing::debug!(%message, "merge warning");
        self.warnings.push(message);
    }

    /// The section's mapping, or a warning if it has another shape.
    fn section_mapping<'v>(&mut self, key: &str, value: &'v Value) -> Option<&'v Mapping> {
        let mapping = value.as_mapping();
        if mapping.is_none() {
            self.warn(format!("'{}' must be a mapping, section ignored", key));
        }
        mapping
    }

    /// Keyed entries of a mapping section, skipping keys that are not scalars.
    fn entries(&mut self, key: &str, value: &Value) -> Vec<(String, Value)> {
        let Some(mapping) = self.section_mapping(key, value) else {
            return Vec::new();
        };
        let mut entries = Vec::with_capacity(mapping.len());
        for (name, entry) in mapping {
            match scalar_to_string(name) {
                Some(name) => entries.push((name, entry.clone())),
                None => self.warn(format!("'{}' has an entry without a usable name", key)),
            }
        }
        entries
    }

    fn merge_flow(&mut self) {
        let doc = self.doc;
        for (key, value) in &doc.body {
            let Some(key) = key.as_str() else {
                continue;
            };
            match key {
                "model" => self.model_section(value),
                "page" => self.page(value),
                "pages" => self.webrtc_streams(value),
                "endpoint" => self.endpoints(value),
                "authentication" => self.authentication(value),
                "theme" => {
                    if let Some(theme) = self.section_mapping(key, value) {
                        self.ir.theme = theme.clone();
                    }
                }
                "ai_models" => {
                    for (name, config) in self.entries(key, value) {
                        upsert!(self, ai_models, name, config);
                    }
                }
                "lazy_import" => self.lazy_imports(value),
                _ if key.starts_with("model ") => {
                    let name = key["model ".len()..].trim().to_string();
                    match value.as_mapping() {
                        Some(body) if !name.is_empty() => self.place_model(name, body.clone()),
                        _ => self.warn(format!("'{}' must be a mapping with a model name", key)),
                    }
                }
                _ => self.integration_section(key, value),
            }
        }
    }

    /// `model:` as a mapping carrying `name`, or as a scalar naming the
    /// model whose body is the rest of the document.
    fn model_section(&mut self, value: &Value) {
        match value {
            Value::Mapping(body) => match body.get("name").and_then(scalar_to_string) {
                Some(name) => self.place_model(name, body.clone()),
                None => self.warn("model has no name, skipped"),
            },
            scalar => match scalar_to_string(scalar) {
                Some(name) => {
                    let mut body = self.doc.body.clone();
                    body.remove("model");
                    self.place_model(name, body);
                }
                None => self.warn("model must be a mapping or a model name"),
            },
        }
    }

    /// Upsert a model into Models, or into VectorDatabases when its
    /// connection is the local vector database. The two are exclusive.
    fn place_model(&mut self, name: String, mut body: Mapping) {
        body.insert(Value::from("name"), Value::from(name.as_str()));
        let is_vector = body.get("connection").and_then(Value::as_str) == Some(LOCAL_VECTOR_DB);
        let body = Value::Mapping(body);

        if is_vector {
            self.ir.models.shift_remove(&name);
            upsert!(self, vector_databases, name, body);
        } else {
            self.ir.vector_databases.shift_remove(&name);
            upsert!(self, models, name, body);
        }
    }

    fn page(&mut self, value: &Value) {
        if let Some(page) = self.section_mapping("page", value) {
            let path = flowc_core::string_or(page, "path", "/");
            upsert!(self, pages, path, value.clone());
        }
    }

    /// A single endpoint mapping or a list of them, keyed by path.
    fn endpoints(&mut self, value: &Value) {
        let endpoints: Vec<&Value> = match value {
            Value::Sequence(items) => items.iter().collect(),
            single => vec![single],
        };
        for endpoint in endpoints {
            match endpoint.as_mapping() {
                Some(mapping) => {
                    let path = flowc_core::string_or(mapping, "path", "/api/unknown");
                    upsert!(self, endpoints, path, endpoint.clone());
                }
                None => self.warn("endpoint entries must be mappings"),
            }
        }
    }

    fn authentication(&mut self, value: &Value) {
        let Some(auth) = self.section_mapping("authentication", value) else {
            return;
        };
        self.ir.auth = auth.clone();

        match auth.get("social_login").and_then(Value::as_mapping) {
            Some(social_login) => {
                let (summary, providers) = sections::social_auth(social_login);
                self.ir.social_auth = Some(summary);
                self.ir.social_providers = providers;
            }
            None => {
                self.ir.social_auth = None;
                self.ir.social_providers = Entities::new();
            }
        }
    }

    fn integration_section(&mut self, key: &str, value: &Value) {
        const SECTIONS: [&str; 12] = [
            "payments",
            "sms",
            "push_notifications",
            "file_storage",
            "email",
            "search",
            "analytics",
            "admin_panel",
            "i18n",
            "serverless",
            "desktop",
            "icons",
        ];
        if !SECTIONS.contains(&key) {
            tracing::trace!(key, file = %self.doc.path.display(), "ignoring unknown section");
            return;
        }
        let Some(section) = self.section_mapping(key, value) else {
            return;
        };

        let ir = &mut self.ir;
        match key {
            "payments" => {
                let (config, custom) = sections::payments(section);
                ir.payments = Some(config);
                ir.custom_payment_providers.extend(custom);
            }
            "sms" => ir.sms = Some(sections::sms(section)),
            "push_notifications" => {
                ir.push_notifications = Some(sections::push_notifications(section))
            }
            "file_storage" => ir.file_storage = Some(sections::file_storage(section)),
            "email" => ir.email = Some(sections::email(section)),
            "search" => ir.search = Some(sections::search(section)),
            "analytics" => ir.analytics = Some(sections::analytics(section)),
            "admin_panel" => ir.admin_panel = Some(sections::admin_panel(section)),
            "i18n" => ir.i18n = Some(sections::i18n(section)),
            "serverless" => ir.serverless = Some(sections::serverless(section)),
            "desktop" => ir.desktop = Some(sections::desktop(section)),
            "icons" => ir.icons = Some(sections::icons(section)),
            _ => {}
        }
    }

    /// A mapping of alias to config, or a list of configs carrying `as`.
    fn lazy_imports(&mut self, value: &Value) {
        match value {
            Value::Sequence(items) => {
                for item in items {
                    let alias = item
                        .as_mapping()
                        .and_then(|m| m.get("as"))
                        .and_then(scalar_to_string);
                    match alias {
                        Some(alias) => upsert!(self, lazy_imports, alias, item.clone()),
                        None => self.warn("lazy_import entry without 'as' alias, skipped"),
                    }
                }
            }
            other => {
                for (alias, config) in self.entries("lazy_import", other) {
                    upsert!(self, lazy_imports, alias, config);
                }
            }
        }
    }

    /// Collect `webrtc_stream` components from every page's component tree.
    fn webrtc_streams(&mut self, pages: &Value) {
        let Some(pages) = self.section_mapping("pages", pages) else {
            return;
        };

        let mut found = Vec::new();
        for tree in pages.values() {
            visit_components(tree, named("webrtc_stream"), |component| {
                found.push(component_config(component, "webrtc_stream").clone());
            });
        }

        for stream in found {
            let id = stream
                .get("id")
                .and_then(scalar_to_string)
                .unwrap_or_else(|| format!("webrtc_stream_{}", self.ir.webrtc_streams.len()));
            upsert!(self, webrtc_streams, id, Value::Mapping(stream));
        }
    }

    fn merge_liveflow(&mut self) {
        let doc = self.doc;
        if let Some(websocket) = doc.section("websocket") {
            upsert!(self, websockets, doc.source_stem.clone(), websocket.clone());
        }
        if let Some(events) = doc.section("events") {
            for (name, config) in self.entries("events", events) {
                upsert!(self, realtime_events, name, config);
            }
        }
        if let Some(streams) = doc.section("streams") {
            for (name, config) in self.entries("streams", streams) {
                upsert!(self, data_streams, name, config);
            }
        }
    }

    fn merge_jobflow(&mut self) {
        let doc = self.doc;
        if let Some(jobs) = doc.section("jobs") {
            for (name, config) in self.entries("jobs", jobs) {
                upsert!(self, background_jobs, name, config);
            }
        }
        if let Some(queues) = doc.section("queues") {
            for (name, config) in self.entries("queues", queues) {
                upsert!(self, job_queues, name, config);
            }
        }
        if let Some(schedules) = doc.section("schedules") {
            for (name, config) in self.entries("schedules", schedules) {
                upsert!(self, scheduled_tasks, name, config);
            }
        }
    }

    fn merge_testflow(&mut self) {
        let doc = self.doc;
        if let Some(suites) = doc.section("suites") {
            for (name, config) in self.entries("suites", suites) {
                upsert!(self, test_suites, name, config);
            }
        }

        match doc.section("smart_forms") {
            Some(Value::Sequence(forms)) => {
                for form in forms {
                    match form.as_mapping() {
                        Some(config) => self.ir.smart_forms.push(parse_smart_form(config)),
                        None => self.warn("smart_forms entries must be mappings"),
                    }
                }
            }
            Some(Value::Mapping(config)) => self.ir.smart_forms.push(parse_smart_form(config)),
            Some(_) => self.warn("'smart_forms' must be a list"),
            None => {}
        }

        let mut trees = Vec::new();
        match doc.section("page") {
            Some(Value::Mapping(page)) => trees.extend(page.get("body")),
            Some(list @ Value::Sequence(_)) => trees.push(list),
            _ => {}
        }
        if let Some(Value::Mapping(pages)) = doc.section("pages") {
            for page in pages.values() {
                match page {
                    Value::Mapping(page) => trees.extend(page.get("body")),
                    tree => trees.push(tree),
                }
            }
        }

        let forms = &mut self.ir.smart_forms;
        for tree in trees {
            visit_components(
                tree,
                |c| c.get("component").and_then(Value::as_str) == Some("smart_form"),
                |component| forms.push(parse_smart_form(component)),
            );
        }
    }
}
