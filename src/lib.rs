pub mod advisor;
pub mod app;
pub mod errors;
pub mod handlers;
pub mod i18n;
pub mod metrics;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use advisor::Advisor;
pub use app::router;
pub use state::AppState;
pub use storage::{load_log, resolve_data_path};
