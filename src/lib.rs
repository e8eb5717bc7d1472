pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod labels;
pub mod models;
pub mod normalize;
pub mod source;
pub mod state;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use source::{load_activity, LoadError};
pub use state::AppState;
