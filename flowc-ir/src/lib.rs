//! Intermediate representation types for the flowc specification compiler.
//!
//! This crate provides the canonical model that every specification file is
//! merged into and that generators consume read-only.
//!
//! # Architecture
//!
//! ```text
//! *.flow / *.liveflow / *.jobflow / *.testflow
//!     → flowc-dialect (parsing) → flowc-compiler (merge) → ProjectIR → generators
//! ```
//!
//! Every category has exactly one concretely-typed field on [`ProjectIR`].
//! Keyed categories are insertion-ordered maps, list categories keep
//! encounter order, and integration sections are `None` until a document
//! declares them.

mod forms;
mod project;
mod sections;

pub use forms::{
    FieldSecurity, FieldUx, FormSecurityFeatures, FormSmartFeatures, FormUxFeatures, SmartField,
    SmartForm, SmartProfile, ValidationRule,
};
pub use project::{Entities, ProjectIR};
pub use sections::{
    AdminPanelConfig, AnalyticsConfig, CustomPaymentProvider, DesktopConfig, EmailConfig,
    FileStorageConfig, I18nConfig, IconsConfig, PaymentsConfig, PushNotificationsConfig,
    SearchConfig, ServerlessConfig, SmsConfig, SocialAuth,
};
pub use serde_yaml::{Mapping, Value};
