pub mod args;
pub mod callback;
pub mod client;
pub mod errors;
pub mod models;

pub use crate::callback::{
    CallbackEvent, CALLBACK_EVENT_SCAN_STATE, CALLBACK_EVENT_SESSION_STATE,
};
pub use crate::client::MinionClient;
