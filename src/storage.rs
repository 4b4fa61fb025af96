use crate::errors::AppError;
use crate::models::HealthData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/health.json")
}

pub async fn load_data(path: &Path) -> HealthData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<HealthData>(&bytes) {
            Ok(data) => {
                info!(
                    symptoms = data.symptoms.len(),
                    appointments = data.appointments.len(),
                    "loaded data file"
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                HealthData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => HealthData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            HealthData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &HealthData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await.map_err(|err| {
        error!("failed to write data file: {err}");
        AppError::internal(err)
    })?;
    Ok(())
}
