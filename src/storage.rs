use crate::errors::CoreError;
use crate::models::HabitFile;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("HABIT_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/habits.json"))
}

pub async fn load_data(path: &Path) -> HabitFile {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                HabitFile::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => HabitFile::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            HabitFile::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &HabitFile) -> Result<(), CoreError> {
    let payload =
        serde_json::to_vec_pretty(data).map_err(|err| CoreError::Remote(err.to_string()))?;
    fs::write(path, payload)
        .await
        .map_err(|err| CoreError::Remote(err.to_string()))?;
    Ok(())
}
