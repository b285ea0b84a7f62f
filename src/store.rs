//! Append-only chart/annotation store.
//!
//! Saved charts land in a flat directory keyed by a timestamp plus the
//! uploaded file name; an optional free-text annotation is written to a
//! `.txt` sidecar next to the image. Listing reads the directory back
//! in name order, which is chronological given the key format.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
const ANNOTATION_EXT: &str = "txt";

/// One stored chart with its optional annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub path: PathBuf,
    pub annotation: Option<String>,
}

/// Flat directory of saved chart images.
#[derive(Debug, Clone)]
pub struct ChartStore {
    root: PathBuf,
}

impl ChartStore {
    /// Open (and create if needed) the store directory.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append an image under a timestamped key, with an optional
    /// annotation sidecar. Returns the stored image path.
    pub fn save(
        &self,
        original_name: &str,
        image: &[u8],
        annotation: Option<&str>,
    ) -> io::Result<PathBuf> {
        let key = format!("{}_{original_name}", Utc::now().format("%Y%m%d_%H%M%S"));
        let path = self.root.join(key);
        fs::write(&path, image)?;
        if let Some(text) = annotation {
            fs::write(sidecar_path(&path), text)?;
        }
        tracing::debug!(path = %path.display(), "chart saved");
        Ok(path)
    }

    /// List every stored chart, oldest first.
    pub fn entries(&self) -> io::Result<Vec<ChartEntry>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_image(path))
            .collect();
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|path| {
                let annotation = fs::read_to_string(sidecar_path(&path)).ok();
                ChartEntry { path, annotation }
            })
            .collect())
    }
}

fn sidecar_path(image: &Path) -> PathBuf {
    let mut name = image.as_os_str().to_owned();
    name.push(".");
    name.push(ANNOTATION_EXT);
    PathBuf::from(name)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
