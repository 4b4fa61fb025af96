pub mod app;
pub mod assistant;
pub mod directory;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod summary;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
pub use store::{AppointmentStore, SymptomStore};
