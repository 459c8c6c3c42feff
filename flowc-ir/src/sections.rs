//! Integration and authentication sections.
//!
//! Each section is replaced wholesale when a later document declares it. The
//! `Default` impls hold the documented default for every sub-field, and
//! `PROVIDERS` lists the keys that are additionally extracted into the
//! section's `provider_configs` map.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::Entities;

fn empty_map() -> Value {
    Value::Mapping(Mapping::new())
}

fn empty_list() -> Value {
    Value::Sequence(Vec::new())
}

fn string_list(items: &[&str]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::from(*s)).collect())
}

/// Summary of `authentication.social_login`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialAuth {
    pub providers: Value,
    pub redirect_after: String,
    pub create_account_if_missing: bool,
}

impl SocialAuth {
    /// Providers whose configuration is copied into `ProjectIR::social_providers`.
    pub const PROVIDERS: &'static [&'static str] = &["google", "facebook", "twitter", "github"];
}

impl Default for SocialAuth {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            redirect_after: "/dashboard".into(),
            create_account_if_missing: true,
        }
    }
}

/// A payment provider declared with `type: custom`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomPaymentProvider {
    pub name: String,
    pub config: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentsConfig {
    pub providers: Value,
    pub default_provider: String,
    pub currency: String,
    pub settings: Value,
    pub provider_configs: Entities,
}

impl PaymentsConfig {
    pub const PROVIDERS: &'static [&'static str] = &["stripe", "paypal", "square", "razorpay"];
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            default_provider: "stripe".into(),
            currency: "USD".into(),
            settings: empty_map(),
            provider_configs: Entities::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsConfig {
    pub providers: Value,
    pub default_provider: String,
    pub default_country_code: String,
    pub settings: Value,
    pub provider_configs: Entities,
}

impl SmsConfig {
    pub const PROVIDERS: &'static [&'static str] = &["twilio", "aws_sns", "nexmo", "messagebird"];
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            default_provider: "twilio".into(),
            default_country_code: "+1".into(),
            settings: empty_map(),
            provider_configs: Entities::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushNotificationsConfig {
    pub providers: Value,
    pub default_provider: String,
    pub settings: Value,
    pub channels: Value,
    pub provider_configs: Entities,
}

impl PushNotificationsConfig {
    pub const PROVIDERS: &'static [&'static str] = &["firebase", "onesignal", "expo"];
}

impl Default for PushNotificationsConfig {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            default_provider: "firebase".into(),
            settings: empty_map(),
            channels: empty_map(),
            provider_configs: Entities::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStorageConfig {
    pub providers: Value,
    pub default_provider: String,
    pub settings: Value,
    pub buckets: Value,
    pub provider_configs: Entities,
}

impl FileStorageConfig {
    pub const PROVIDERS: &'static [&'static str] = &["local", "aws_s3", "google_cloud", "azure"];
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            default_provider: "local".into(),
            settings: empty_map(),
            buckets: empty_map(),
            provider_configs: Entities::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailConfig {
    pub providers: Value,
    pub default_provider: String,
    pub settings: Value,
    pub templates: Value,
    pub provider_configs: Entities,
}

impl EmailConfig {
    pub const PROVIDERS: &'static [&'static str] = &["smtp", "sendgrid", "mailgun", "ses"];
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            default_provider: "smtp".into(),
            settings: empty_map(),
            templates: empty_map(),
            provider_configs: Entities::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchConfig {
    pub providers: Value,
    pub default_provider: String,
    pub settings: Value,
    pub indexes: Value,
    pub provider_configs: Entities,
}

impl SearchConfig {
    pub const PROVIDERS: &'static [&'static str] =
        &["database", "elasticsearch", "algolia", "meilisearch"];
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            default_provider: "database".into(),
            settings: empty_map(),
            indexes: empty_map(),
            provider_configs: Entities::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsConfig {
    pub providers: Value,
    pub default_provider: String,
    pub settings: Value,
    pub events: Value,
    pub provider_configs: Entities,
}

impl AnalyticsConfig {
    pub const PROVIDERS: &'static [&'static str] = &["google", "mixpanel", "amplitude", "segment"];
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            providers: empty_list(),
            default_provider: "google".into(),
            settings: empty_map(),
            events: empty_map(),
            provider_configs: Entities::new(),
        }
    }
}

/// Admin panel section. Every sub-field defaults to an empty mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminPanelConfig {
    pub theme: Value,
    pub authentication: Value,
    pub dashboard: Value,
    pub navigation: Value,
    pub permissions: Value,
    pub features: Value,
    pub customization: Value,
}

impl Default for AdminPanelConfig {
    fn default() -> Self {
        Self {
            theme: empty_map(),
            authentication: empty_map(),
            dashboard: empty_map(),
            navigation: empty_map(),
            permissions: empty_map(),
            features: empty_map(),
            customization: empty_map(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct I18nConfig {
    pub auto_translate: bool,
    pub providers: Value,
    pub fallback_language: String,
    pub languages: Value,
    pub processing: Value,
    pub security: Value,
    pub performance: Value,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            auto_translate: true,
            providers: string_list(&["google_translate"]),
            fallback_language: "en".into(),
            languages: empty_list(),
            processing: empty_map(),
            security: empty_map(),
            performance: empty_map(),
        }
    }
}

/// Serverless section. Every sub-field defaults to an empty mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerlessConfig {
    pub providers: Value,
    pub defaults: Value,
    pub functions: Value,
    pub groups: Value,
    pub api_gateway: Value,
    pub monitoring: Value,
    pub security: Value,
    pub deployment: Value,
    pub ci_cd: Value,
}

impl Default for ServerlessConfig {
    fn default() -> Self {
        Self {
            providers: empty_map(),
            defaults: empty_map(),
            functions: empty_map(),
            groups: empty_map(),
            api_gateway: empty_map(),
            monitoring: empty_map(),
            security: empty_map(),
            deployment: empty_map(),
            ci_cd: empty_map(),
        }
    }
}

/// Desktop shell section. Every sub-field defaults to an empty mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopConfig {
    pub window: Value,
    pub tray: Value,
    pub menu: Value,
    pub build: Value,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            window: empty_map(),
            tray: empty_map(),
            menu: empty_map(),
            build: empty_map(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconsConfig {
    pub default_pack: String,
    pub packs: Value,
    pub custom_icons: Value,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            default_pack: "material-icons".into(),
            packs: string_list(&["material-icons", "font-awesome", "bootstrap-icons"]),
            custom_icons: empty_map(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        assert_eq!(PaymentsConfig::default().default_provider, "stripe");
        assert_eq!(PaymentsConfig::default().currency, "USD");
        assert_eq!(SmsConfig::default().default_country_code, "+1");
        assert_eq!(PushNotificationsConfig::default().default_provider, "firebase");
        assert_eq!(FileStorageConfig::default().default_provider, "local");
        assert_eq!(EmailConfig::default().default_provider, "smtp");
        assert_eq!(SearchConfig::default().default_provider, "database");
        assert_eq!(AnalyticsConfig::default().default_provider, "google");
        assert_eq!(IconsConfig::default().default_pack, "material-icons");
        assert_eq!(SocialAuth::default().redirect_after, "/dashboard");
    }

    #[test]
    fn test_i18n_defaults() {
        let i18n = I18nConfig::default();
        assert!(i18n.auto_translate);
        assert_eq!(i18n.fallback_language, "en");
        assert_eq!(i18n.providers, string_list(&["google_translate"]));
    }
}
