//! DocVault notification and webhook dispatch pipeline.
//!
//! Pure composition lives in `compose` and `webhook::signature`; the
//! stateful pieces (dispatcher, emitter, scanner, upload notifier) are
//! written against the seams in `docvault-core::traits` and wired with
//! concrete repositories at setup time.

pub mod compose;
pub mod dispatch;
pub mod email;
pub mod scanner;
pub mod upload;
pub mod webhook;

#[cfg(test)]
pub(crate) mod test_support;

pub use compose::{compose, EmailMessage, NotificationContent};
pub use dispatch::NotificationDispatcher;
pub use email::{EmailService, LogOnlyEmailService};
pub use scanner::{ExpirationScanner, ScanOutcome};
pub use upload::{UploadNotifier, UploadOutcome};
pub use webhook::{EmitOutcome, WebhookEmitter};
