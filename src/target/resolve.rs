//! Target list construction.
//!
//! Android targets come from the density tables under each configured
//! `res` root; `[[target]]` entries are taken as written. Overrides and
//! disabled entries from `[source]` are applied last.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::density::{AndroidLayer, DENSITIES, Density, safe_zone};
use super::{RenderTarget, SourceRef, TargetCategory};
use crate::config::{AndroidConfig, IconConfig, TargetConfig};
use crate::debug;
use crate::image::{ContentBounds, RasterSource};

const NOTIFICATION_ICON: &str = "ic_notification";

/// Build every target described by `config`, enabled or not.
///
/// Explicit `[[target]]` entries replace Android targets with the same path.
pub fn resolve_targets(config: &IconConfig) -> Vec<RenderTarget> {
    let threshold = config.render.alpha_threshold;
    let mut targets = android_targets(&config.android, threshold);

    let mut index: HashMap<PathBuf, usize> = targets
        .iter()
        .enumerate()
        .map(|(i, t)| (t.path.clone(), i))
        .collect();

    for entry in &config.targets {
        let Some(target) = explicit_target(entry, threshold) else {
            continue;
        };
        match index.get(&target.path) {
            Some(&i) => targets[i] = target,
            None => {
                index.insert(target.path.clone(), targets.len());
                targets.push(target);
            }
        }
    }

    for target in &mut targets {
        if !target.source.is_override()
            && let Some(source) = config.source.override_for(&target.path)
        {
            target.source = SourceRef::from_path(source);
        }
        if config.source.is_disabled(&target.path) {
            target.enabled = false;
        }
    }

    targets
}

fn android_targets(android: &AndroidConfig, threshold: u8) -> Vec<RenderTarget> {
    let mut layers: Vec<(&str, AndroidLayer, TargetCategory)> = Vec::new();
    for name in &android.icons {
        layers.push((name.as_str(), AndroidLayer::Legacy, TargetCategory::Android));
    }
    for name in &android.adaptive {
        layers.push((name.as_str(), AndroidLayer::adaptive(name), TargetCategory::Adaptive));
    }
    if android.notification {
        layers.push((
            NOTIFICATION_ICON,
            AndroidLayer::Notification,
            TargetCategory::Notification,
        ));
    }

    let mut targets = Vec::new();
    for res in &android.res {
        for density in &DENSITIES {
            for &(name, layer, category) in &layers {
                let path = res.join(density.dir).join(format!("{name}.png"));
                let exists = path.is_file();
                if !exists && !android.create_missing {
                    continue;
                }
                let target = android_target(android, density, name, layer, path, threshold, exists)
                    .with_category(category);
                targets.push(target);
            }
        }
    }
    targets
}

fn android_target(
    android: &AndroidConfig,
    density: &Density,
    name: &str,
    layer: AndroidLayer,
    path: PathBuf,
    threshold: u8,
    exists: bool,
) -> RenderTarget {
    let size = layer.size_at(density);
    let detected = if android.detect_bounds && exists {
        detect_existing_bounds(&path, size, size, threshold)
    } else {
        None
    };
    let bounds = detected.or_else(|| {
        (android.safe_zone && layer == AndroidLayer::Foreground).then(|| safe_zone(size))
    });

    let mut target = RenderTarget::square(format!("{}/{name}", density.dir), path, size);
    target.bounds = bounds;
    target
}

fn explicit_target(entry: &TargetConfig, threshold: u8) -> Option<RenderTarget> {
    let (width, height) = entry.dimensions()?;

    let bounds = match entry.bounds {
        Some(bounds) => Some(bounds.within(width, height)),
        None if entry.detect_bounds => detect_existing_bounds(&entry.path, width, height, threshold),
        None => None,
    };

    let mut target = RenderTarget::new(entry.display_name(), &entry.path, width, height)
        .with_category(entry.category);
    target.bounds = bounds;
    target.enabled = entry.enabled;
    if let Some(source) = &entry.source {
        target.source = SourceRef::from_path(source);
    }
    Some(target)
}

/// Visible-content bounds of the file currently at `path`.
///
/// Only used when the existing file already has the target size; full or
/// empty content yields `None` so the target renders edge to edge.
fn detect_existing_bounds(
    path: &Path,
    width: u32,
    height: u32,
    threshold: u8,
) -> Option<ContentBounds> {
    let existing = match RasterSource::load(path) {
        Ok(existing) => existing,
        Err(e) => {
            debug!("resolve"; "no bounds for {}: {}", path.display(), e);
            return None;
        }
    };

    let image = existing.image();
    if (image.width(), image.height()) != (width, height) {
        debug!(
            "resolve";
            "{} is {}x{}, expected {}x{}, not detecting bounds",
            path.display(), image.width(), image.height(), width, height
        );
        return None;
    }

    let bounds = existing.measure_bounds(threshold);
    (!bounds.is_full() && !bounds.is_empty()).then_some(bounds)
}
