//! `targets` command: list what `generate` would produce.

use anyhow::Result;
use owo_colors::{Stream, Style};

use crate::config::IconConfig;
use crate::log;
use crate::logger::paint;
use crate::target::{RenderTarget, SourceRef, resolve_targets};
use crate::utils::plural::plural_count;

pub fn list_targets(config: &IconConfig) -> Result<()> {
    let targets = resolve_targets(config);
    if targets.is_empty() {
        log!("targets"; "no targets, add [android] res roots or [[target]] entries");
        return Ok(());
    }

    let name_width = targets.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for target in &targets {
        let line = format!(
            "{:<name_width$}  {:>9}  {:<16}  {}",
            target.name,
            target.size_label(),
            bounds_label(target),
            source_label(target, config),
        );
        if target.enabled {
            println!("{line}");
        } else {
            let dim = Style::new().dimmed();
            println!(
                "{} {}",
                paint(Stream::Stdout, line, dim),
                paint(Stream::Stdout, "(disabled)", dim)
            );
        }
    }

    let enabled = targets.iter().filter(|t| t.enabled).count();
    log!(
        "targets";
        "{}, {} enabled",
        plural_count(targets.len(), "target"),
        enabled
    );
    Ok(())
}

fn bounds_label(target: &RenderTarget) -> String {
    match target.bounds {
        Some(b) if !b.is_full() => format!("{}x{}+{}+{}", b.width, b.height, b.x, b.y),
        _ => "full".to_string(),
    }
}

fn source_label(target: &RenderTarget, config: &IconConfig) -> String {
    match &target.source {
        SourceRef::Default => match &config.source.default {
            Some(path) => format!("default ({})", config.root_relative(path).display()),
            None => "default (unset)".to_string(),
        },
        SourceRef::Vector(path) | SourceRef::Raster(path) => {
            config.root_relative(path).display().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::density::safe_zone;
    use std::path::PathBuf;

    #[test]
    fn test_labels() {
        let config = IconConfig {
            root: PathBuf::from("/project"),
            ..Default::default()
        };

        let foreground = RenderTarget::square("fg", "/project/fg.png", 108).with_bounds(safe_zone(108));
        assert_eq!(bounds_label(&foreground), "72x72+18+18");
        assert_eq!(source_label(&foreground, &config), "default (unset)");

        let store = RenderTarget::square("store", "/project/store.png", 512)
            .with_source(SourceRef::from_path("/project/art/store.png"));
        assert_eq!(bounds_label(&store), "full");
        assert_eq!(source_label(&store, &config), "art/store.png");
    }
}
