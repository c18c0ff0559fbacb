pub mod service;
pub mod signature;

pub use service::{EmitOutcome, WebhookEmitter};
