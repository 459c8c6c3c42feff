//! Component tree traversal.
//!
//! Page bodies are trees of component mappings nested through `children`
//! or `body`, each of which may hold a list of components or a single one.

use serde_yaml::{Mapping, Value};

/// Keys through which components nest, by precedence. Only the first one
/// present on a component is followed.
const NESTING_KEYS: [&str; 2] = ["children", "body"];

/// Walk every component under `root`, calling `handle` on each mapping that
/// satisfies `is_match`. Matching components are still descended into.
pub fn visit_components<P, H>(root: &Value, is_match: P, mut handle: H)
where
    P: Fn(&Mapping) -> bool,
    H: FnMut(&Mapping),
{
    walk(root, &is_match, &mut handle);
}

fn walk<P, H>(node: &Value, is_match: &P, handle: &mut H)
where
    P: Fn(&Mapping) -> bool,
    H: FnMut(&Mapping),
{
    match node {
        Value::Sequence(items) => {
            for item in items {
                walk(item, is_match, handle);
            }
        }
        Value::Mapping(component) => {
            if is_match(component) {
                handle(component);
            }
            if let Some(child) = NESTING_KEYS.iter().find_map(|key| component.get(*key)) {
                walk(child, is_match, handle);
            }
        }
        Value::Tagged(tagged) => walk(&tagged.value, is_match, handle),
        _ => {}
    }
}

/// Predicate matching components named `name`, written either as
/// `component: <name>` or as a single `<name>:` key holding the config.
pub fn named(name: &str) -> impl Fn(&Mapping) -> bool + '_ {
    move |component: &Mapping| {
        component.get("component").and_then(Value::as_str) == Some(name)
            || component.contains_key(name)
    }
}

/// The configuration of a component matched by [`named`]: the value under
/// its `<name>:` key when that is a mapping, otherwise the component itself.
pub fn component_config<'a>(component: &'a Mapping, name: &str) -> &'a Mapping {
    match component.get(name) {
        Some(Value::Mapping(config)) => config,
        _ => component,
    }
}
