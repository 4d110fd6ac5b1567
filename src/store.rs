use std::path::Path;

use anyhow::{Context, Result};

use crate::schema::Workout;

/// Write all validated workouts as one JSON array with 2-space indentation,
/// fully overwriting any prior file. No merge, no append.
pub fn write_workouts(path: &Path, workouts: &[Workout]) -> Result<()> {
    let json = serde_json::to_string_pretty(workouts)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
