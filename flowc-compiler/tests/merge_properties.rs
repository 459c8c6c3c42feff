//! Merge semantics over real project directories.

use flowc_compiler::{Pipeline, testing::TestProject};
use flowc_ir::{ProjectIR, Value};

fn compile(project: &TestProject) -> ProjectIR {
    Pipeline::new()
        .run(project.project())
        .expect("pipeline failed")
        .finish()
        .expect("cycle failed")
        .ir
}

fn yaml(src: &str) -> Value {
    serde_yaml::from_str(src).expect("invalid yaml")
}

#[test]
fn unchanged_files_merge_identically() {
    let project = TestProject::new("shop")
        .flow(
            "catalog.flow",
            r#"
# products and their pages
model:
  name: Product
  fields:
    id: uuid
    title: string
page:
  path: /shop
  title: Shop
endpoint:
  - path: /api/products
    method: GET
payments:
  currency: EUR
  stripe:
    secret_key: sk
"#,
        )
        .flow("live.liveflow", "websocket:\n  path: /ws\n")
        .flow("jobs.jobflow", "jobs:\n  reindex: {}\n");

    assert_eq!(compile(&project), compile(&project));
}

#[test]
fn later_file_replaces_whole_model() {
    let project = TestProject::new("todo")
        .flow(
            "a.flow",
            "model Todo:\n  fields: [task_name]\n  table: todos\n",
        )
        .flow("b.flow", "model Todo:\n  fields: [task_name, priority]\n");

    let ir = compile(&project);
    let todo = ir.models["Todo"].as_mapping().expect("model body");
    assert_eq!(todo.get("fields"), Some(&yaml("[task_name, priority]")));
    assert_eq!(todo.get("table"), None);
}

#[test]
fn discovery_order_is_by_file_name() {
    let project = TestProject::new("todo")
        .flow("z.flow", "model:\n  name: Todo\n  from: z\n")
        .flow("m.flow", "model:\n  name: Todo\n  from: m\n");

    let ir = compile(&project);
    let todo = ir.models["Todo"].as_mapping().expect("model body");
    assert_eq!(todo.get("from"), Some(&Value::from("z")));
}

#[test]
fn vector_models_never_reach_models() {
    let project = TestProject::new("memory").flow(
        "memory.flow",
        "model:\n  name: Memory\n  connection: local_vector_db\n  fields: [embedding]\n",
    );

    let ir = compile(&project);
    assert!(!ir.models.contains_key("Memory"));
    assert!(ir.vector_databases.contains_key("Memory"));
    // Synthesis only looks at Models.
    assert!(!ir.pages.contains_key("/memorys"));
}

#[test]
fn endpoint_mapping_and_single_item_list_agree() {
    let single = TestProject::new("api").flow(
        "api.flow",
        "endpoint:\n  path: /api/todos\n  method: GET\n  auth: true\n",
    );
    let list = TestProject::new("api").flow(
        "api.flow",
        "endpoint:\n  - path: /api/todos\n    method: GET\n    auth: true\n",
    );

    assert_eq!(compile(&single).endpoints, compile(&list).endpoints);
}

#[test]
fn ai_models_accumulate_across_files() {
    let project = TestProject::new("ai")
        .flow("a.flow", "ai_models:\n  summarizer:\n    provider: openai\n")
        .flow("b.flow", "ai_models:\n  embedder:\n    provider: local\n");

    let ir = compile(&project);
    let names: Vec<_> = ir.ai_models.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["summarizer", "embedder"]);
}

#[test]
fn integration_sections_replace_wholesale() {
    let project = TestProject::new("notify")
        .flow("a.flow", "email:\n  default_provider: sendgrid\n  sendgrid:\n    key: x\n")
        .flow("b.flow", "email:\n  templates:\n    welcome: hi\n");

    let email = compile(&project).email.expect("email configured");
    assert_eq!(email.default_provider, "smtp");
    assert!(email.provider_configs.is_empty());
    assert_eq!(email.templates, yaml("welcome: hi"));
}

#[test]
fn explicit_pages_survive_synthesis() {
    let project = TestProject::new("todo").flow(
        "todo.flow",
        r#"
model:
  name: Todo
  fields: [title]
page:
  path: /todos/create
  title: My own create page
"#,
    );

    let ir = compile(&project);
    let create = ir.pages["/todos/create"].as_mapping().expect("page");
    assert_eq!(create.get("title"), Some(&Value::from("My own create page")));
    assert!(ir.pages.contains_key("/todos"));
    assert!(ir.pages.contains_key("/todos/{id}"));
}

#[test]
fn testflow_smart_forms_are_collected() {
    let project = TestProject::new("forms").flow(
        "signup.testflow",
        r#"
suites:
  signup:
    steps: 3
pages:
  /signup:
    body:
      - component: smart_form
        name: signup
        fields:
          email: email
          password:
            type: password
            validate: [required, strong]
"#,
    );

    let ir = compile(&project);
    assert!(ir.test_suites.contains_key("signup"));
    assert_eq!(ir.smart_forms.len(), 1);
    let form = &ir.smart_forms[0];
    assert_eq!(form.name, "signup");
    assert_eq!(form.fields.len(), 2);
    assert_eq!(form.fields[1].validations.len(), 2);
}
