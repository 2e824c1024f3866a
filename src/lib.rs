pub mod app;
pub mod calendar;
pub mod drops;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use service::{FileService, HabitService};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
pub use store::{HabitCollectionStore, ToggleOutcome};
