use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::debug;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// List workout-card images in `dir`, sorted by filename so runs are
/// deterministic. Only the extension is inspected, nothing else.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read image directory {}", dir.display()))?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    let ext = ext.to_ascii_lowercase();
                    IMAGE_EXTENSIONS.contains(&ext.as_str())
                })
                .unwrap_or(false)
        })
        .collect();
    images.sort();
    Ok(images)
}

/// Run the tesseract binary on one image and return its raw line-oriented
/// text. Best-effort English-only recognition; any process failure is an OCR
/// error for this single input.
pub async fn recognize(image: &Path, tesseract: &str) -> Result<String> {
    debug!(image = %image.display(), "running OCR");
    let output = Command::new(tesseract)
        .arg(image)
        .arg("stdout")
        .args(["-l", "eng"])
        .output()
        .await
        .with_context(|| format!("Failed to spawn {tesseract}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "tesseract failed on {} ({}): {}",
            image.display(),
            output.status,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
