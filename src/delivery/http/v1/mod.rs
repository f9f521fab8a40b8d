pub mod notifications;
pub mod preferences;
pub mod ws;
