//! `bounds` command: print the visible-content box of a file.

use std::path::Path;

use anyhow::{Result, bail};
use owo_colors::{Stream, Style};

use crate::config::IconConfig;
use crate::generate::{LoadedSource, RenderSettings, SourceCache};
use crate::image::ContentBounds;
use crate::logger::paint;

pub fn print_bounds(file: &Path, config: &IconConfig) -> Result<()> {
    let settings = RenderSettings::from(&config.render);
    let cache = SourceCache::new(settings);

    match &*cache.get_or_load(file) {
        LoadedSource::Vector { source, bounds } => {
            let (width, height) = source.size();
            println!("{} {}", paint(Stream::Stdout, "svg", Style::new().bold()), file.display());
            println!("  document  {width}x{height}");
            println!(
                "  measured  {} (at {}x{})",
                describe(bounds),
                settings.measure_size,
                settings.measure_size
            );
        }
        LoadedSource::Raster { source, bounds } => {
            let image = source.image();
            println!("{} {}", paint(Stream::Stdout, "image", Style::new().bold()), file.display());
            println!("  size      {}x{}", image.width(), image.height());
            println!("  content   {}", describe(bounds));
        }
        LoadedSource::Invalid(err) => bail!(err.detail()),
    }
    Ok(())
}

/// `48x32 at (8, 16), padding 8/16/8/16` (left/top/right/bottom).
fn describe(bounds: &ContentBounds) -> String {
    if bounds.is_empty() {
        return "empty".to_string();
    }
    if bounds.is_full() {
        return format!("{}x{}, no padding", bounds.width, bounds.height);
    }
    let right = bounds.source_width.saturating_sub(bounds.x + bounds.width);
    let bottom = bounds.source_height.saturating_sub(bounds.y + bounds.height);
    format!(
        "{}x{} at ({}, {}), padding {}/{}/{}/{}",
        bounds.width, bounds.height, bounds.x, bounds.y, bounds.x, bounds.y, right, bottom
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let bounds = ContentBounds {
            x: 8,
            y: 16,
            width: 48,
            height: 32,
            source_width: 64,
            source_height: 64,
        };
        assert_eq!(describe(&bounds), "48x32 at (8, 16), padding 8/16/8/16");
        assert_eq!(describe(&ContentBounds::full(64, 64)), "64x64, no padding");
        assert_eq!(describe(&ContentBounds::empty()), "empty");
    }
}
