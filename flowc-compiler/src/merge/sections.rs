//! Readers for whole-section replacements: authentication and the
//! integration sections.
//!
//! Each reader builds the complete replacement value from the section's
//! mapping, substituting the documented default for every absent sub-field.

use flowc_core::string_or;
use flowc_ir::{
    AdminPanelConfig, AnalyticsConfig, CustomPaymentProvider, DesktopConfig, EmailConfig,
    Entities, FileStorageConfig, I18nConfig, IconsConfig, Mapping, PaymentsConfig,
    PushNotificationsConfig, SearchConfig, ServerlessConfig, SmsConfig, SocialAuth, Value,
};

fn value_or(section: &Mapping, key: &str, default: Value) -> Value {
    section.get(key).cloned().unwrap_or(default)
}

fn bool_or(section: &Mapping, key: &str, default: bool) -> bool {
    section.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Copy the configuration of every allow-listed provider present in
/// `section`.
pub fn provider_configs(section: &Mapping, allow_list: &[&str]) -> Entities {
    allow_list
        .iter()
        .filter_map(|provider| {
            section
                .get(*provider)
                .map(|config| (provider.to_string(), config.clone()))
        })
        .collect()
}

/// Decompose `authentication.social_login` into its summary and the
/// per-provider configurations.
pub fn social_auth(social_login: &Mapping) -> (SocialAuth, Entities) {
    let d = SocialAuth::default();
    let summary = SocialAuth {
        providers: value_or(social_login, "providers", d.providers),
        redirect_after: string_or(social_login, "redirect_after", &d.redirect_after),
        create_account_if_missing: bool_or(
            social_login,
            "create_account_if_missing",
            d.create_account_if_missing,
        ),
    };
    (summary, provider_configs(social_login, SocialAuth::PROVIDERS))
}

/// Payments, plus every entry declared with `type: custom` in authored order.
pub fn payments(section: &Mapping) -> (PaymentsConfig, Vec<CustomPaymentProvider>) {
    let d = PaymentsConfig::default();
    let config = PaymentsConfig {
        providers: value_or(section, "providers", d.providers),
        default_provider: string_or(section, "default_provider", &d.default_provider),
        currency: string_or(section, "currency", &d.currency),
        settings: value_or(section, "settings", d.settings),
        provider_configs: provider_configs(section, PaymentsConfig::PROVIDERS),
    };

    let custom = section
        .iter()
        .filter_map(|(key, config)| {
            let is_custom = config
                .as_mapping()
                .and_then(|m| m.get("type"))
                .and_then(Value::as_str)
                == Some("custom");
            if !is_custom {
                return None;
            }
            Some(CustomPaymentProvider {
                name: flowc_core::scalar_to_string(key)?,
                config: config.clone(),
            })
        })
        .collect();

    (config, custom)
}

pub fn sms(section: &Mapping) -> SmsConfig {
    let d = SmsConfig::default();
    SmsConfig {
        providers: value_or(section, "providers", d.providers),
        default_provider: string_or(section, "default_provider", &d.default_provider),
        default_country_code: string_or(section, "default_country_code", &d.default_country_code),
        settings: value_or(section, "settings", d.settings),
        provider_configs: provider_configs(section, SmsConfig::PROVIDERS),
    }
}

pub fn push_notifications(section: &Mapping) -> PushNotificationsConfig {
    let d = PushNotificationsConfig::default();
    PushNotificationsConfig {
        providers: value_or(section, "providers", d.providers),
        default_provider: string_or(section, "default_provider", &d.default_provider),
        settings: value_or(section, "settings", d.settings),
        channels: value_or(section, "channels", d.channels),
        provider_configs: provider_configs(section, PushNotificationsConfig::PROVIDERS),
    }
}

pub fn file_storage(section: &Mapping) -> FileStorageConfig {
    let d = FileStorageConfig::default();
    FileStorageConfig {
        providers: value_or(section, "providers", d.providers),
        default_provider: string_or(section, "default_provider", &d.default_provider),
        settings: value_or(section, "settings", d.settings),
        buckets: value_or(section, "buckets", d.buckets),
        provider_configs: provider_configs(section, FileStorageConfig::PROVIDERS),
    }
}

pub fn email(section: &Mapping) -> EmailConfig {
    let d = EmailConfig::default();
    EmailConfig {
        providers: value_or(section, "providers", d.providers),
        default_provider: string_or(section, "default_provider", &d.default_provider),
        settings: value_or(section, "settings", d.settings),
        templates: value_or(section, "templates", d.templates),
        provider_configs: provider_configs(section, EmailConfig::PROVIDERS),
    }
}

pub fn search(section: &Mapping) -> SearchConfig {
    let d = SearchConfig::default();
    SearchConfig {
        providers: value_or(section, "providers", d.providers),
        default_provider: string_or(section, "default_provider", &d.default_provider),
        settings: value_or(section, "settings", d.settings),
        indexes: value_or(section, "indexes", d.indexes),
        provider_configs: provider_configs(section, SearchConfig::PROVIDERS),
    }
}

pub fn analytics(section: &Mapping) -> AnalyticsConfig {
    let d = AnalyticsConfig::default();
    AnalyticsConfig {
        providers: value_or(section, "providers", d.providers),
        default_provider: string_or(section, "default_provider", &d.default_provider),
        settings: value_or(section, "settings", d.settings),
        events: value_or(section, "events", d.events),
        provider_configs: provider_configs(section, AnalyticsConfig::PROVIDERS),
    }
}

pub fn admin_panel(section: &Mapping) -> AdminPanelConfig {
    let d = AdminPanelConfig::default();
    AdminPanelConfig {
        theme: value_or(section, "theme", d.theme),
        authentication: value_or(section, "authentication", d.authentication),
        dashboard: value_or(section, "dashboard", d.dashboard),
        navigation: value_or(section, "navigation", d.navigation),
        permissions: value_or(section, "permissions", d.permissions),
        features: value_or(section, "features", d.features),
        customization: value_or(section, "customization", d.customization),
    }
}

pub fn i18n(section: &Mapping) -> I18nConfig {
    let d = I18nConfig::default();
    I18nConfig {
        auto_translate: bool_or(section, "auto_translate", d.auto_translate),
        providers: value_or(section, "providers", d.providers),
        fallback_language: string_or(section, "fallback_language", &d.fallback_language),
        languages: value_or(section, "languages", d.languages),
        processing: value_or(section, "processing", d.processing),
        security: value_or(section, "security", d.security),
        performance: value_or(section, "performance", d.performance),
    }
}

pub fn serverless(section: &Mapping) -> ServerlessConfig {
    let d = ServerlessConfig::default();
    ServerlessConfig {
        providers: value_or(section, "providers", d.providers),
        defaults: value_or(section, "defaults", d.defaults),
        functions: value_or(section, "functions", d.functions),
        groups: value_or(section, "groups", d.groups),
        api_gateway: value_or(section, "api_gateway", d.api_gateway),
        monitoring: value_or(section, "monitoring", d.monitoring),
        security: value_or(section, "security", d.security),
        deployment: value_or(section, "deployment", d.deployment),
        ci_cd: value_or(section, "ci_cd", d.ci_cd),
    }
}

pub fn desktop(section: &Mapping) -> DesktopConfig {
    let d = DesktopConfig::default();
    DesktopConfig {
        window: value_or(section, "window", d.window),
        tray: value_or(section, "tray", d.tray),
        menu: value_or(section, "menu", d.menu),
        build: value_or(section, "build", d.build),
    }
}

pub fn icons(section: &Mapping) -> IconsConfig {
    let d = IconsConfig::default();
    IconsConfig {
        default_pack: string_or(section, "default_pack", &d.default_pack),
        packs: value_or(section, "packs", d.packs),
        custom_icons: value_or(section, "custom_icons", d.custom_icons),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(src: &str) -> Mapping {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn test_payments_defaults_and_providers() {
        let (config, custom) = payments(&mapping(
            r#"
currency: EUR
stripe:
  secret_key: sk_test
paypal:
  mode: sandbox
"#,
        ));
        assert_eq!(config.default_provider, "stripe");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.settings, Value::Mapping(Mapping::new()));
        let providers: Vec<_> = config.provider_configs.keys().cloned().collect();
        assert_eq!(providers, vec!["stripe", "paypal"]);
        assert!(custom.is_empty());
    }

    #[test]
    fn test_custom_payment_providers_in_order() {
        let (config, custom) = payments(&mapping(
            r#"
zeta_pay:
  type: custom
  url: https://zeta
stripe:
  key: x
alpha_pay:
  type: custom
"#,
        ));
        let names: Vec<_> = custom.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zeta_pay", "alpha_pay"]);
        assert_eq!(config.provider_configs.len(), 1);
    }

    #[test]
    fn test_unlisted_providers_not_extracted() {
        let config = sms(&mapping("plivo:\n  key: x\ntwilio:\n  sid: y\n"));
        assert_eq!(config.provider_configs.len(), 1);
        assert!(config.provider_configs.contains_key("twilio"));
        assert_eq!(config.default_country_code, "+1");
    }

    #[test]
    fn test_social_auth() {
        let (summary, providers) = social_auth(&mapping(
            r#"
providers: [google, github]
google:
  client_id: abc
github:
  client_id: def
"#,
        ));
        assert_eq!(summary.redirect_after, "/dashboard");
        assert!(summary.create_account_if_missing);
        assert_eq!(providers.len(), 2);
    }

    #[test]
    fn test_i18n_overrides() {
        let config = i18n(&mapping("auto_translate: false\nlanguages: [en, fr]\n"));
        assert!(!config.auto_translate);
        assert_eq!(config.fallback_language, "en");
        assert_eq!(
            config.languages,
            Value::Sequence(vec![Value::from("en"), Value::from("fr")])
        );
    }
}
