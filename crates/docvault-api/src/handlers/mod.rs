pub mod audit;
pub mod documents;
pub mod health;
pub mod notifications;
pub mod settings;
