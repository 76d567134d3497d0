use std::path::{Path, PathBuf};

use crate::consts::{BOUNDARIES_DIR, LABELS_DIR, MEASUREMENTS_FILE_NAME, OVERLAYS_DIR};
use crate::error::Result;

use super::config::OutputConfig;

/// Paths of every artifact under an output root.
///
/// Constructing a layout touches nothing on disk; [`OutputLayout::prepare`]
/// creates the directories.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub labels_dir: PathBuf,
    pub overlays_dir: PathBuf,
    pub boundaries_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            labels_dir: root.join(LABELS_DIR),
            overlays_dir: root.join(OVERLAYS_DIR),
            boundaries_dir: root.join(BOUNDARIES_DIR),
        }
    }

    /// Create the output root and the subdirectories for enabled artifacts.
    pub fn prepare(&self, outputs: &OutputConfig) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        if outputs.labels {
            std::fs::create_dir_all(&self.labels_dir)?;
        }
        if outputs.overlays {
            std::fs::create_dir_all(&self.overlays_dir)?;
        }
        if outputs.boundaries {
            std::fs::create_dir_all(&self.boundaries_dir)?;
        }
        Ok(())
    }

    pub fn label_path(&self, image_id: &str) -> PathBuf {
        self.labels_dir.join(format!("{image_id}_labels.tif"))
    }

    pub fn overlay_path(&self, image_id: &str) -> PathBuf {
        self.overlays_dir.join(format!("{image_id}_overlays.png"))
    }

    pub fn boundary_path(&self, image_id: &str) -> PathBuf {
        self.boundaries_dir.join(format!("{image_id}_boundaries.png"))
    }

    pub fn measurements_path(&self) -> PathBuf {
        self.root.join(MEASUREMENTS_FILE_NAME)
    }
}
