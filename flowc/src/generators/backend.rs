use eyre::Result;
use flowc_compiler::{Environment, GenerateResult, Generator, GeneratorKind};
use flowc_dialect::Project;
use flowc_ir::{
    AdminPanelConfig, AnalyticsConfig, CustomPaymentProvider, EmailConfig, Entities,
    FileStorageConfig, Mapping, PaymentsConfig, ProjectIR, PushNotificationsConfig, SearchConfig,
    ServerlessConfig, SmsConfig, SocialAuth,
};
use serde::Serialize;

use super::write_inventory;

/// Server-side slice: data, API, auth, jobs, realtime and integrations.
pub struct BackendGenerator;

#[derive(Serialize)]
struct BackendInventory<'a> {
    models: &'a Entities,
    endpoints: &'a Entities,
    vector_databases: &'a Entities,
    ai_models: &'a Entities,
    auth: Auth<'a>,
    jobs: &'a Entities,
    queues: &'a Entities,
    schedules: &'a Entities,
    websockets: &'a Entities,
    events: &'a Entities,
    streams: &'a Entities,
    integrations: Integrations<'a>,
}

#[derive(Serialize)]
struct Auth<'a> {
    config: &'a Mapping,
    #[serde(skip_serializing_if = "Option::is_none")]
    social: Option<&'a SocialAuth>,
    providers: &'a Entities,
}

#[derive(Serialize)]
struct Integrations<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    payments: Option<&'a PaymentsConfig>,
    custom_payment_providers: &'a [CustomPaymentProvider],
    #[serde(skip_serializing_if = "Option::is_none")]
    sms: Option<&'a SmsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    push_notifications: Option<&'a PushNotificationsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_storage: Option<&'a FileStorageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a EmailConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a SearchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analytics: Option<&'a AnalyticsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    admin_panel: Option<&'a AdminPanelConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    serverless: Option<&'a ServerlessConfig>,
}

impl<'a> BackendInventory<'a> {
    fn of(ir: &'a ProjectIR) -> Self {
        Self {
            models: &ir.models,
            endpoints: &ir.endpoints,
            vector_databases: &ir.vector_databases,
            ai_models: &ir.ai_models,
            auth: Auth {
                config: &ir.auth,
                social: ir.social_auth.as_ref(),
                providers: &ir.social_providers,
            },
            jobs: &ir.background_jobs,
            queues: &ir.job_queues,
            schedules: &ir.scheduled_tasks,
            websockets: &ir.websockets,
            events: &ir.realtime_events,
            streams: &ir.data_streams,
            integrations: Integrations {
                payments: ir.payments.as_ref(),
                custom_payment_providers: &ir.custom_payment_providers,
                sms: ir.sms.as_ref(),
                push_notifications: ir.push_notifications.as_ref(),
                file_storage: ir.file_storage.as_ref(),
                email: ir.email.as_ref(),
                search: ir.search.as_ref(),
                analytics: ir.analytics.as_ref(),
                admin_panel: ir.admin_panel.as_ref(),
                serverless: ir.serverless.as_ref(),
            },
        }
    }
}

impl Generator for BackendGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Backend
    }

    fn generate(&self, project: &Project, ir: &ProjectIR, env: Environment) -> Result<GenerateResult> {
        write_inventory(project, self.kind(), env, BackendInventory::of(ir))
    }
}
