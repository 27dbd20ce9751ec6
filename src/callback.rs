use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, EnumVariantNames};

pub const CALLBACK_EVENT_SCAN_STATE: &str = "scan-state";
pub const CALLBACK_EVENT_SESSION_STATE: &str = "session-state";

/// Event types the service posts to the `callbackURL` of a scan
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumVariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CallbackEvent {
    ScanState,
    SessionState,
}
