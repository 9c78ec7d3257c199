//! Pages composed from widgets

pub mod api_test;
pub mod dashboard;
pub mod settings;

pub use api_test::ApiTestPage;
pub use dashboard::DashboardPage;
pub use settings::SettingsPage;
