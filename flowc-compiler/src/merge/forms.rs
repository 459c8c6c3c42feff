//! Smart form sub-parser.

use flowc_core::{scalar_to_string, string_or};
use flowc_ir::{
    FieldSecurity, FieldUx, FormSecurityFeatures, FormSmartFeatures, FormUxFeatures, Mapping,
    SmartField, SmartForm, ValidationRule, Value,
};

/// Build a [`SmartForm`] from a `smart_forms` entry or a `smart_form`
/// component. Missing settings take their defaults; nothing is rejected.
pub fn parse_smart_form(config: &Mapping) -> SmartForm {
    SmartForm {
        name: string_or(config, "name", SmartForm::DEFAULT_NAME),
        method: string_or(config, "method", SmartForm::DEFAULT_METHOD),
        endpoint: string_or(config, "endpoint", SmartForm::DEFAULT_ENDPOINT),
        fields: config.get("fields").map(parse_fields).unwrap_or_default(),
        smart_features: smart_features(table(config, "smart_features")),
        ux_features: ux_features(table(config, "ux_features")),
        security_features: security_features(table(config, "security_features")),
    }
}

/// Fields are either a mapping of name to config (or bare type string), or a
/// list of configs each carrying a `name`.
fn parse_fields(fields: &Value) -> Vec<SmartField> {
    match fields {
        Value::Mapping(fields) => fields
            .iter()
            .filter_map(|(name, config)| {
                let name = scalar_to_string(name)?;
                match config {
                    Value::Mapping(config) => Some(parse_field(name, config)),
                    Value::String(field_type) => Some(SmartField::new(name, field_type.as_str())),
                    _ => None,
                }
            })
            .collect(),
        Value::Sequence(fields) => fields
            .iter()
            .filter_map(|config| {
                let config = config.as_mapping()?;
                let name = config.get("name").and_then(scalar_to_string)?;
                Some(parse_field(name, config))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_field(name: String, config: &Mapping) -> SmartField {
    let field_type = string_or(config, "type", SmartField::DEFAULT_TYPE);
    let mut field = SmartField::new(name, field_type);
    field.required = config
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    field.validations = parse_validations(config.get("validate"));
    field.ux = field_ux(table(config, "ux"));
    field.security = field_security(table(config, "security"));
    field
}

/// `validate` may be a single rule string, a single mapping, or a list of
/// either.
fn parse_validations(value: Option<&Value>) -> Vec<ValidationRule> {
    let rule = |value: &Value| match value {
        Value::String(rule) => Some(ValidationRule::resolve(rule)),
        Value::Mapping(rule) => Some(ValidationRule::Inline(rule.clone())),
        _ => None,
    };

    match value {
        Some(Value::Sequence(rules)) => rules.iter().filter_map(rule).collect(),
        Some(single) => rule(single).into_iter().collect(),
        None => Vec::new(),
    }
}

fn table<'a>(config: &'a Mapping, key: &str) -> Option<&'a Mapping> {
    config.get(key).and_then(Value::as_mapping)
}

/// Read a feature setting by its camelCase key, accepting snake_case too.
fn setting<'a>(features: Option<&'a Mapping>, camel: &str, snake: &str) -> Option<&'a Value> {
    let features = features?;
    features.get(camel).or_else(|| features.get(snake))
}

fn flag(features: Option<&Mapping>, camel: &str, snake: &str, default: bool) -> bool {
    setting(features, camel, snake)
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

fn text(features: Option<&Mapping>, camel: &str, snake: &str, default: &str) -> String {
    setting(features, camel, snake)
        .and_then(scalar_to_string)
        .unwrap_or_else(|| default.to_string())
}

fn raw(features: Option<&Mapping>, camel: &str, snake: &str, default: Value) -> Value {
    setting(features, camel, snake).cloned().unwrap_or(default)
}

fn field_ux(ux: Option<&Mapping>) -> FieldUx {
    let d = FieldUx::default();
    FieldUx {
        placeholder: text(ux, "placeholder", "placeholder", &d.placeholder),
        tooltip: text(ux, "tooltip", "tooltip", &d.tooltip),
        hint: text(ux, "hint", "hint", &d.hint),
        auto_focus: flag(ux, "autoFocus", "auto_focus", d.auto_focus),
        progressive_disclosure: flag(
            ux,
            "progressiveDisclosure",
            "progressive_disclosure",
            d.progressive_disclosure,
        ),
        conditional_display: raw(
            ux,
            "conditionalDisplay",
            "conditional_display",
            d.conditional_display,
        ),
        error_position: text(ux, "errorPosition", "error_position", &d.error_position),
        show_strength_meter: flag(
            ux,
            "showStrengthMeter",
            "show_strength_meter",
            d.show_strength_meter,
        ),
        auto_fill: flag(ux, "autofill", "auto_fill", d.auto_fill),
        save_draft: flag(ux, "saveDraft", "save_draft", d.save_draft),
    }
}

fn field_security(security: Option<&Mapping>) -> FieldSecurity {
    let d = FieldSecurity::default();
    FieldSecurity {
        block_disposable: flag(
            security,
            "blockDisposable",
            "block_disposable",
            d.block_disposable,
        ),
        fraud_detection: flag(
            security,
            "fraudDetection",
            "fraud_detection",
            d.fraud_detection,
        ),
        device_recognition: flag(
            security,
            "deviceRecognition",
            "device_recognition",
            d.device_recognition,
        ),
        rate_limiting: raw(security, "rateLimiting", "rate_limiting", d.rate_limiting),
        encryption: flag(security, "encryption", "encryption", d.encryption),
    }
}

fn smart_features(features: Option<&Mapping>) -> FormSmartFeatures {
    let d = FormSmartFeatures::default();
    FormSmartFeatures {
        auto_save_draft: flag(features, "autoSaveDraft", "auto_save_draft", d.auto_save_draft),
        smart_suggestions: flag(
            features,
            "smartSuggestions",
            "smart_suggestions",
            d.smart_suggestions,
        ),
        conditional_logic: flag(
            features,
            "conditionalLogic",
            "conditional_logic",
            d.conditional_logic,
        ),
        prefill_known_data: flag(
            features,
            "prefillKnownData",
            "prefill_known_data",
            d.prefill_known_data,
        ),
        duplicate_detection: flag(
            features,
            "duplicateDetection",
            "duplicate_detection",
            d.duplicate_detection,
        ),
        form_analytics: flag(features, "formAnalytics", "form_analytics", d.form_analytics),
    }
}

fn ux_features(features: Option<&Mapping>) -> FormUxFeatures {
    let d = FormUxFeatures::default();
    FormUxFeatures {
        progress_indicator: flag(
            features,
            "progressIndicator",
            "progress_indicator",
            d.progress_indicator,
        ),
        step_navigation: flag(features, "stepNavigation", "step_navigation", d.step_navigation),
        inline_validation: flag(
            features,
            "inlineValidation",
            "inline_validation",
            d.inline_validation,
        ),
        submit_states: flag(features, "submitStates", "submit_states", d.submit_states),
        keyboard_navigation: flag(
            features,
            "keyboardNavigation",
            "keyboard_navigation",
            d.keyboard_navigation,
        ),
        mobile_optimized: flag(
            features,
            "mobileOptimized",
            "mobile_optimized",
            d.mobile_optimized,
        ),
        accessibility: flag(features, "accessibility", "accessibility", d.accessibility),
        dark_mode: text(features, "darkMode", "dark_mode", &d.dark_mode),
    }
}

fn security_features(features: Option<&Mapping>) -> FormSecurityFeatures {
    let d = FormSecurityFeatures::default();
    FormSecurityFeatures {
        csrf_protection: flag(features, "csrfProtection", "csrf_protection", d.csrf_protection),
        rate_limiting: flag(features, "rateLimiting", "rate_limiting", d.rate_limiting),
        honeypot: flag(features, "honeypot", "honeypot", d.honeypot),
        captcha: flag(features, "captcha", "captcha", d.captcha),
        secure_transmission: flag(
            features,
            "secureTransmission",
            "secure_transmission",
            d.secure_transmission,
        ),
        field_encryption: raw(
            features,
            "fieldEncryption",
            "field_encryption",
            d.field_encryption,
        ),
        audit_logging: flag(features, "auditLogging", "audit_logging", d.audit_logging),
    }
}
