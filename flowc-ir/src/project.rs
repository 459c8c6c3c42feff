//! The canonical project IR.

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::{
    AdminPanelConfig, AnalyticsConfig, CustomPaymentProvider, DesktopConfig, EmailConfig,
    FileStorageConfig, I18nConfig, IconsConfig, PaymentsConfig, PushNotificationsConfig,
    SearchConfig, ServerlessConfig, SmartForm, SmsConfig, SocialAuth,
};

/// A keyed entity map. Keys are entity names or paths; iteration follows
/// first-insertion order, and a later upsert replaces the value in place.
pub type Entities = IndexMap<String, Value>;

/// Project IR - the merged result of every specification file in a build cycle.
///
/// Zero values: keyed maps and lists start empty, `auth` and `theme` start as
/// empty mappings, and every integration section starts as `None` (not
/// configured).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectIR {
    /// Data models keyed by name.
    pub models: Entities,
    /// Pages keyed by route path.
    pub pages: Entities,
    /// API endpoints keyed by route path (method is not part of the key).
    pub endpoints: Entities,
    /// Models stored in the local vector database, keyed by name.
    pub vector_databases: Entities,

    /// The `authentication` section, replaced wholesale.
    pub auth: Mapping,
    /// Summary of `authentication.social_login`.
    pub social_auth: Option<SocialAuth>,
    /// Per-provider social login configuration.
    pub social_providers: Entities,
    /// The `theme` section, replaced wholesale.
    pub theme: Mapping,

    pub payments: Option<PaymentsConfig>,
    /// Payment providers declared with `type: custom`, in encounter order.
    pub custom_payment_providers: Vec<CustomPaymentProvider>,
    pub sms: Option<SmsConfig>,
    pub push_notifications: Option<PushNotificationsConfig>,
    pub file_storage: Option<FileStorageConfig>,
    pub email: Option<EmailConfig>,
    pub search: Option<SearchConfig>,
    pub analytics: Option<AnalyticsConfig>,
    pub admin_panel: Option<AdminPanelConfig>,
    pub i18n: Option<I18nConfig>,
    pub serverless: Option<ServerlessConfig>,
    pub desktop: Option<DesktopConfig>,
    pub icons: Option<IconsConfig>,

    /// AI model definitions; entries accumulate across files.
    pub ai_models: Entities,
    /// Lazily imported modules keyed by alias; entries accumulate across files.
    pub lazy_imports: Entities,
    /// WebRTC stream components found in page trees, keyed by stream id.
    pub webrtc_streams: Entities,

    /// WebSocket connections keyed by source file stem.
    pub websockets: Entities,
    pub realtime_events: Entities,
    pub data_streams: Entities,

    pub background_jobs: Entities,
    pub job_queues: Entities,
    pub scheduled_tasks: Entities,

    pub test_suites: Entities,
    /// Smart forms, in encounter order.
    pub smart_forms: Vec<SmartForm>,
}

impl ProjectIR {
    /// Create an empty IR.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing has been merged into this IR.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Entity counts for each keyed or list category, in declaration order.
    pub fn category_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("models", self.models.len()),
            ("pages", self.pages.len()),
            ("endpoints", self.endpoints.len()),
            ("vector_databases", self.vector_databases.len()),
            ("social_providers", self.social_providers.len()),
            ("custom_payment_providers", self.custom_payment_providers.len()),
            ("ai_models", self.ai_models.len()),
            ("lazy_imports", self.lazy_imports.len()),
            ("webrtc_streams", self.webrtc_streams.len()),
            ("websockets", self.websockets.len()),
            ("realtime_events", self.realtime_events.len()),
            ("data_streams", self.data_streams.len()),
            ("background_jobs", self.background_jobs.len()),
            ("job_queues", self.job_queues.len()),
            ("scheduled_tasks", self.scheduled_tasks.len()),
            ("test_suites", self.test_suites.len()),
            ("smart_forms", self.smart_forms.len()),
        ]
    }

    /// Names of the integration sections that have been configured.
    pub fn configured_sections(&self) -> Vec<&'static str> {
        let sections = [
            ("payments", self.payments.is_some()),
            ("sms", self.sms.is_some()),
            ("push_notifications", self.push_notifications.is_some()),
            ("file_storage", self.file_storage.is_some()),
            ("email", self.email.is_some()),
            ("search", self.search.is_some()),
            ("analytics", self.analytics.is_some()),
            ("admin_panel", self.admin_panel.is_some()),
            ("i18n", self.i18n.is_some()),
            ("serverless", self.serverless.is_some()),
            ("desktop", self.desktop.is_some()),
            ("icons", self.icons.is_some()),
        ];
        sections
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let ir = ProjectIR::new();
        assert!(ir.is_empty());
        assert!(ir.configured_sections().is_empty());
        assert!(ir.category_counts().iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn test_upsert_keeps_first_position() {
        let mut ir = ProjectIR::new();
        ir.models.insert("Todo".into(), Value::from("a"));
        ir.models.insert("User".into(), Value::from("b"));
        ir.models.insert("Todo".into(), Value::from("c"));

        let keys: Vec<_> = ir.models.keys().cloned().collect();
        assert_eq!(keys, vec!["Todo", "User"]);
        assert_eq!(ir.models["Todo"], Value::from("c"));
        assert!(!ir.is_empty());
    }

    #[test]
    fn test_configured_sections() {
        let ir = ProjectIR {
            payments: Some(PaymentsConfig::default()),
            icons: Some(IconsConfig::default()),
            ..ProjectIR::default()
        };
        assert_eq!(ir.configured_sections(), vec!["payments", "icons"]);
    }

    #[test]
    fn test_serializes_for_generators() {
        let mut ir = ProjectIR::new();
        ir.pages.insert("/".into(), Value::from("home"));
        let json = serde_json::to_value(&ir).unwrap();
        assert_eq!(json["pages"]["/"], "home");
        assert!(json["payments"].is_null());
    }
}
