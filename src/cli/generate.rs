//! `generate` command.

use anyhow::{Result, bail};

use super::GenerateArgs;
use crate::config::IconConfig;
use crate::core::{RunGuard, is_shutdown};
use crate::generate::{Generator, Outcome, RenderSettings, RunOptions};
use crate::logger::ProgressLine;
use crate::target::{RenderTarget, TargetCategory, resolve_targets};
use crate::utils::plural::plural_count;
use crate::{debug, log};

const CATEGORIES: [TargetCategory; 5] = [
    TargetCategory::Android,
    TargetCategory::Adaptive,
    TargetCategory::Notification,
    TargetCategory::Ios,
    TargetCategory::Custom,
];

/// Regenerate every enabled target matching the name filters.
pub fn generate(args: &GenerateArgs, config: &IconConfig) -> Result<()> {
    let targets = filter_targets(resolve_targets(config), &args.names);
    if targets.is_empty() {
        log!("generate"; "no targets matched");
        return Ok(());
    }

    let enabled = targets.iter().filter(|t| t.enabled).count();
    match &config.source.default {
        Some(default) => log!(
            "generate";
            "{} from {}",
            plural_count(enabled, "target"),
            config.root_relative(default).display()
        ),
        None => log!("generate"; "{}", plural_count(enabled, "target")),
    }

    let counts: Vec<(&'static str, usize)> = CATEGORIES
        .iter()
        .map(|c| {
            let n = targets.iter().filter(|t| t.enabled && t.category == *c).count();
            (c.as_str(), n)
        })
        .collect();

    let generator = Generator::new(
        RenderSettings::from(&config.render),
        config.source.default.clone(),
    );
    let options = RunOptions {
        dry_run: args.dry,
        parallel: config.render.parallel,
    };

    let report = {
        let _running = RunGuard::begin();
        let progress = ProgressLine::new("generate", &counts);
        let report = generator.run(&targets, options, is_shutdown, |target, outcome| {
            progress.inc(target.category.as_str());
            if let Outcome::Failed(message) = outcome {
                debug!("failed"; "{}: {}", config.root_relative(&target.path).display(), message);
            }
        });
        progress.finish();
        report
    };

    debug!(
        "cache";
        "{} loaded for {}",
        plural_count(generator.cache().loads(), "source"),
        plural_count(enabled, "target")
    );

    report.print_failures(&config.root);
    if report.has_failures() {
        log!("error"; "{}", report);
        bail!("{} failed", plural_count(report.failures.len(), "target"));
    }
    log!("done"; "{}", report);
    if report.is_cancelled() {
        bail!("interrupted");
    }
    Ok(())
}

/// Keep targets whose name or path contains any filter; all when empty.
fn filter_targets(targets: Vec<RenderTarget>, names: &[String]) -> Vec<RenderTarget> {
    if names.is_empty() {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| {
            let path = t.path.to_string_lossy();
            names
                .iter()
                .any(|n| t.name.contains(n.as_str()) || path.contains(n.as_str()))
        })
        .collect()
}
