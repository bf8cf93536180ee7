pub mod analytics;
pub mod dashboard;
pub mod history;
pub mod home;
pub mod profile;
pub mod templates;
