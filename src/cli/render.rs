//! `render` command: one source, one PNG.

use anyhow::{Result, anyhow, bail};

use super::RenderArgs;
use crate::config::IconConfig;
use crate::generate::{Generator, Outcome, RenderSettings};
use crate::log;
use crate::target::{RenderTarget, SourceRef};

pub fn render_one(args: &RenderArgs, config: &IconConfig) -> Result<()> {
    let target = build_target(args)?;

    let generator = Generator::new(RenderSettings::from(&config.render), None);
    match generator.process(&target, false) {
        Outcome::Failed(message) => bail!(message),
        Outcome::Written | Outcome::Rendered => {
            log!(
                "render";
                "{} -> {} ({})",
                args.source.display(),
                target.path.display(),
                target.size_label()
            );
            Ok(())
        }
    }
}

fn build_target(args: &RenderArgs) -> Result<RenderTarget> {
    let Some((width, height)) = args.dimensions() else {
        bail!("missing output size, pass --size or both --width and --height");
    };

    let name = args
        .output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let mut target = RenderTarget::new(name, &args.output, width, height)
        .with_source(SourceRef::from_path(&args.source));
    if let Some(bounds) = args.bounds {
        target = target.with_bounds(bounds.within(width, height));
    }

    target.check().map_err(|e| anyhow!("--bounds: {e}"))?;
    Ok(target)
}
