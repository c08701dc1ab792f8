//! Loaded-source cache.
//!
//! Every distinct source file is decoded and measured once per run, no
//! matter how many targets it feeds. Keys are normalized paths so
//! `./icon.svg` and `icon.svg` share an entry.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use super::RenderSettings;
use crate::debug;
use crate::image::{ContentBounds, RasterSource, RenderError, VectorSource, is_vector_path};
use crate::utils::path::normalize_path;

/// A decoded source together with its visible-content bounds.
#[derive(Debug)]
pub enum LoadedSource {
    Vector {
        source: VectorSource,
        bounds: ContentBounds,
    },
    Raster {
        source: RasterSource,
        bounds: ContentBounds,
    },
    /// Load failed; every target using this source fails the same way.
    Invalid(RenderError),
}

impl LoadedSource {
    fn load(path: &Path, settings: RenderSettings) -> Self {
        if is_vector_path(path) {
            match VectorSource::load(path) {
                Ok(source) => {
                    let bounds =
                        source.measure_bounds(settings.measure_size, settings.alpha_threshold);
                    Self::Vector { source, bounds }
                }
                Err(e) => Self::Invalid(e),
            }
        } else {
            match RasterSource::load(path) {
                Ok(source) => {
                    let bounds = source.measure_bounds(settings.alpha_threshold);
                    Self::Raster { source, bounds }
                }
                Err(e) => Self::Invalid(e),
            }
        }
    }

    /// Measured bounds, `None` for invalid sources.
    pub fn bounds(&self) -> Option<&ContentBounds> {
        match self {
            Self::Vector { bounds, .. } | Self::Raster { bounds, .. } => Some(bounds),
            Self::Invalid(_) => None,
        }
    }
}

pub struct SourceCache {
    settings: RenderSettings,
    entries: DashMap<PathBuf, Arc<LoadedSource>>,
    loads: AtomicUsize,
}

impl SourceCache {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            entries: DashMap::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Cached source for `path`, loading and measuring it on first use.
    pub fn get_or_load(&self, path: &Path) -> Arc<LoadedSource> {
        let key = normalize_path(path);
        if let Some(entry) = self.entries.get(&key) {
            return Arc::clone(&entry);
        }

        let entry = self.entries.entry(key).or_insert_with(|| {
            self.loads.fetch_add(1, Ordering::Relaxed);
            let loaded = LoadedSource::load(path, self.settings);
            match loaded.bounds() {
                Some(b) => debug!(
                    "cache";
                    "{}: content {}x{}+{}+{} of {}x{}",
                    path.display(), b.width, b.height, b.x, b.y, b.source_width, b.source_height
                ),
                None => debug!("cache"; "{}: invalid source", path.display()),
            }
            Arc::new(loaded)
        });
        Arc::clone(&entry)
    }

    /// Number of sources actually loaded so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
