use crate::models::HealthData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared handle to the stores. The mutex gives one writer at a time and
/// lets readers see a completed mutation only.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<HealthData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: HealthData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
