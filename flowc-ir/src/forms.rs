//! Smart form types.
//!
//! A smart form is produced from a `smart_forms` entry or a `smart_form`
//! component found in a page tree. The types here carry the resolved form:
//! every flag has its default filled in, field types are matched against the
//! built-in smart profiles and validation rule names are resolved against the
//! built-in rule table.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartForm {
    pub name: String,
    pub method: String,
    pub endpoint: String,
    pub fields: Vec<SmartField>,
    pub smart_features: FormSmartFeatures,
    pub ux_features: FormUxFeatures,
    pub security_features: FormSecurityFeatures,
}

impl SmartForm {
    pub const DEFAULT_NAME: &'static str = "smart_form";
    pub const DEFAULT_METHOD: &'static str = "POST";
    pub const DEFAULT_ENDPOINT: &'static str = "/api/form/submit";
}

impl Default for SmartForm {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.into(),
            method: Self::DEFAULT_METHOD.into(),
            endpoint: Self::DEFAULT_ENDPOINT.into(),
            fields: Vec::new(),
            smart_features: FormSmartFeatures::default(),
            ux_features: FormUxFeatures::default(),
            security_features: FormSecurityFeatures::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    /// Built-in behavior for well-known field types.
    pub profile: Option<SmartProfile>,
    pub validations: Vec<ValidationRule>,
    pub ux: FieldUx,
    pub security: FieldSecurity,
}

impl SmartField {
    pub const DEFAULT_TYPE: &'static str = "string";

    /// A field of the given type with every feature at its default.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let field_type = field_type.into();
        Self {
            name: name.into(),
            profile: SmartProfile::for_type(&field_type),
            field_type,
            required: false,
            validations: Vec::new(),
            ux: FieldUx::default(),
            security: FieldSecurity::default(),
        }
    }
}

/// Built-in behavior attached to a smart field by its type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmartProfile {
    pub validation: Vec<String>,
    pub features: Vec<String>,
    pub security: Vec<String>,
    pub auto_format: bool,
    pub auto_complete: bool,
    pub auto_fill: bool,
    pub geo_detect: bool,
}

impl SmartProfile {
    /// Field types that carry a built-in profile.
    pub const TYPES: &'static [&'static str] = &[
        "phone",
        "email",
        "password",
        "otp",
        "credit_card",
        "search",
        "address",
        "date",
        "number",
    ];

    /// Look up the built-in profile for a field type.
    pub fn for_type(field_type: &str) -> Option<Self> {
        let (validation, features): (&[&str], &[&str]) = match field_type {
            "phone" => (
                &["phone_format"],
                &["country_code_detection", "format_as_you_type"],
            ),
            "email" => (
                &["email_format", "disposable_check"],
                &["typo_correction", "domain_suggestions"],
            ),
            "password" => (
                &["strength_meter"],
                &[
                    "strength_indicator",
                    "requirements_display",
                    "show_hide_toggle",
                ],
            ),
            "otp" => (
                &["numeric", "length"],
                &["auto_detect_sms", "auto_focus_next", "resend_timer"],
            ),
            "credit_card" => (
                &["luhn_check", "cvv_format"],
                &["brand_detection", "format_as_you_type", "security_icons"],
            ),
            "search" => (
                &[],
                &[
                    "typo_tolerance",
                    "context_aware_suggestions",
                    "recent_searches",
                ],
            ),
            "address" => (
                &["address_format"],
                &[
                    "geo_location_fill",
                    "address_validation",
                    "postal_code_lookup",
                ],
            ),
            "date" => (
                &["date_format", "future_past_check"],
                &["smart_date_picker", "relative_dates", "timezone_aware"],
            ),
            "number" => (
                &["numeric_range"],
                &["smart_formatting", "currency_detection", "unit_conversion"],
            ),
            _ => return None,
        };

        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        let mut profile = Self {
            validation: owned(validation),
            features: owned(features),
            ..Self::default()
        };
        match field_type {
            "phone" => {
                profile.auto_format = true;
                profile.geo_detect = true;
            }
            "email" | "search" | "address" => profile.auto_complete = true,
            "password" => profile.security = owned(&["breach_check"]),
            "otp" => profile.auto_fill = true,
            "credit_card" => profile.auto_format = true,
            _ => {}
        }
        Some(profile)
    }
}

/// A resolved field validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidationRule {
    /// A rule from the built-in table.
    Builtin {
        #[serde(rename = "type")]
        kind: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_score: Option<u8>,
    },
    /// A rule name the built-in table does not know.
    Custom { rule: String },
    /// A rule written out as a mapping, kept as authored.
    Inline(Mapping),
}

impl ValidationRule {
    /// Names understood by [`ValidationRule::resolve`].
    pub const BUILTIN: &'static [&'static str] = &[
        "required",
        "email",
        "phone",
        "strong",
        "registered",
        "unique",
        "min_length",
        "max_length",
        "numeric",
        "positive",
        "future_date",
        "past_date",
        "credit_card",
        "cvv",
        "postal_code",
        "url",
        "ip_address",
    ];

    /// Resolve a rule string such as `required` or `min_length:8`.
    ///
    /// A `name:param` string overrides the built-in rule's `value` with the
    /// parameter text. Names outside the built-in table, including a
    /// parameterized unknown name, become [`ValidationRule::Custom`].
    pub fn resolve(rule: &str) -> Self {
        if let Some((name, param)) = rule.split_once(':')
            && let Some(Self::Builtin {
                kind,
                message,
                endpoint,
                min_score,
                ..
            }) = Self::builtin(name)
        {
            return Self::Builtin {
                kind,
                message,
                value: Some(Value::from(param)),
                endpoint,
                min_score,
            };
        }

        Self::builtin(rule).unwrap_or_else(|| Self::Custom { rule: rule.into() })
    }

    fn builtin(name: &str) -> Option<Self> {
        let (kind, message) = match name {
            "required" => ("required", "This field is required"),
            "email" => ("email", "Please enter a valid email address"),
            "phone" => ("phone", "Please enter a valid phone number"),
            "strong" => ("password_strength", "Password is not strong enough"),
            "registered" => ("exists_check", "This {field} is not registered"),
            "unique" => ("unique_check", "This {field} is already taken"),
            "min_length" => ("min_length", "Must be at least 6 characters"),
            "max_length" => ("max_length", "Must be less than 255 characters"),
            "numeric" => ("numeric", "Must be a valid number"),
            "positive" => ("positive", "Must be a positive number"),
            "future_date" => ("future_date", "Date must be in the future"),
            "past_date" => ("past_date", "Date must be in the past"),
            "credit_card" => ("credit_card", "Please enter a valid credit card number"),
            "cvv" => ("cvv", "Please enter a valid CVV"),
            "postal_code" => ("postal_code", "Please enter a valid postal code"),
            "url" => ("url", "Please enter a valid URL"),
            "ip_address" => ("ip_address", "Please enter a valid IP address"),
            _ => return None,
        };

        let value = match name {
            "min_length" => Some(Value::from(6)),
            "max_length" => Some(Value::from(255)),
            _ => None,
        };
        let endpoint = match name {
            "registered" => Some("/api/validate/registered".to_string()),
            "unique" => Some("/api/validate/unique".to_string()),
            _ => None,
        };

        Some(Self::Builtin {
            kind: kind.into(),
            message: message.into(),
            value,
            endpoint,
            min_score: (name == "strong").then_some(3),
        })
    }
}

/// Per-field UX settings, read from the field's `ux` mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldUx {
    pub placeholder: String,
    pub tooltip: String,
    pub hint: String,
    pub auto_focus: bool,
    pub progressive_disclosure: bool,
    pub conditional_display: Value,
    pub error_position: String,
    pub show_strength_meter: bool,
    pub auto_fill: bool,
    pub save_draft: bool,
}

impl Default for FieldUx {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            tooltip: String::new(),
            hint: String::new(),
            auto_focus: false,
            progressive_disclosure: false,
            conditional_display: Value::Mapping(Mapping::new()),
            error_position: "below".into(),
            show_strength_meter: false,
            auto_fill: false,
            save_draft: false,
        }
    }
}

/// Per-field security settings, read from the field's `security` mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSecurity {
    pub block_disposable: bool,
    pub fraud_detection: bool,
    pub device_recognition: bool,
    pub rate_limiting: Value,
    pub encryption: bool,
}

impl Default for FieldSecurity {
    fn default() -> Self {
        Self {
            block_disposable: false,
            fraud_detection: false,
            device_recognition: false,
            rate_limiting: Value::Mapping(Mapping::new()),
            encryption: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSmartFeatures {
    pub auto_save_draft: bool,
    pub smart_suggestions: bool,
    pub conditional_logic: bool,
    pub prefill_known_data: bool,
    pub duplicate_detection: bool,
    pub form_analytics: bool,
}

impl Default for FormSmartFeatures {
    fn default() -> Self {
        Self {
            auto_save_draft: true,
            smart_suggestions: true,
            conditional_logic: true,
            prefill_known_data: true,
            duplicate_detection: false,
            form_analytics: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormUxFeatures {
    pub progress_indicator: bool,
    pub step_navigation: bool,
    pub inline_validation: bool,
    pub submit_states: bool,
    pub keyboard_navigation: bool,
    pub mobile_optimized: bool,
    pub accessibility: bool,
    /// `auto`, `light` or `dark`; not validated.
    pub dark_mode: String,
}

impl Default for FormUxFeatures {
    fn default() -> Self {
        Self {
            progress_indicator: false,
            step_navigation: false,
            inline_validation: true,
            submit_states: true,
            keyboard_navigation: true,
            mobile_optimized: true,
            accessibility: true,
            dark_mode: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSecurityFeatures {
    pub csrf_protection: bool,
    pub rate_limiting: bool,
    pub honeypot: bool,
    pub captcha: bool,
    pub secure_transmission: bool,
    pub field_encryption: Value,
    pub audit_logging: bool,
}

impl Default for FormSecurityFeatures {
    fn default() -> Self {
        Self {
            csrf_protection: true,
            rate_limiting: true,
            honeypot: true,
            captcha: false,
            secure_transmission: true,
            field_encryption: Value::Sequence(Vec::new()),
            audit_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_cover_smart_types() {
        for ty in SmartProfile::TYPES {
            assert!(SmartProfile::for_type(ty).is_some(), "no profile for {ty}");
        }
        assert!(SmartProfile::for_type("string").is_none());

        let phone = SmartProfile::for_type("phone").unwrap();
        assert!(phone.auto_format && phone.geo_detect);
        assert_eq!(phone.validation, vec!["phone_format"]);

        let password = SmartProfile::for_type("password").unwrap();
        assert_eq!(password.security, vec!["breach_check"]);
    }

    #[test]
    fn test_resolve_builtin_rule() {
        match ValidationRule::resolve("strong") {
            ValidationRule::Builtin {
                kind, min_score, ..
            } => {
                assert_eq!(kind, "password_strength");
                assert_eq!(min_score, Some(3));
            }
            other => panic!("unexpected rule: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_parameterized_rule() {
        match ValidationRule::resolve("min_length:8") {
            ValidationRule::Builtin { kind, value, .. } => {
                assert_eq!(kind, "min_length");
                assert_eq!(value, Some(Value::from("8")));
            }
            other => panic!("unexpected rule: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_unknown_rule_is_custom() {
        assert_eq!(
            ValidationRule::resolve("no_profanity"),
            ValidationRule::Custom {
                rule: "no_profanity".into()
            }
        );
        assert_eq!(
            ValidationRule::resolve("between:1:5"),
            ValidationRule::Custom {
                rule: "between:1:5".into()
            }
        );
    }

    #[test]
    fn test_builtin_table_is_complete() {
        for name in ValidationRule::BUILTIN {
            assert!(
                matches!(
                    ValidationRule::resolve(name),
                    ValidationRule::Builtin { .. }
                ),
                "{name} did not resolve"
            );
        }
    }

    #[test]
    fn test_new_field_attaches_profile() {
        let field = SmartField::new("contact", "email");
        assert!(field.profile.is_some());
        assert!(!field.required);
        assert_eq!(field.ux.error_position, "below");

        assert!(SmartField::new("title", SmartField::DEFAULT_TYPE)
            .profile
            .is_none());
    }
}
