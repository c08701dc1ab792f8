//! Batch icon generation.
//!
//! Walks the resolved targets, picks each one's source (override or the
//! configured default), renders it through the bounds-aware pipeline and
//! writes the PNG. One bad source never stops the batch: its targets are
//! recorded as failures and left untouched on disk.
//!
//! # Flow
//!
//! ```text
//! targets ──► source (override | default) ──► SourceCache ──► render ──► PNG
//!                                              (load + measure once)
//! ```
//!
//! Sequential by default. In parallel mode every distinct source is loaded
//! up front so the fan-out only reads the cache.

mod cache;
mod report;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;

pub use cache::{LoadedSource, SourceCache};
pub use report::GenerateReport;

use crate::config::RenderConfig;
use crate::image::{
    DEFAULT_ALPHA_THRESHOLD, DEFAULT_MEASURE_SIZE, RenderError, composite_with_bounds,
    empty_canvas, rasterize_to_bounds, write_png,
};
use crate::target::RenderTarget;

/// Measurement parameters shared by every source in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub measure_size: u32,
    pub alpha_threshold: u8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            measure_size: DEFAULT_MEASURE_SIZE,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl From<&RenderConfig> for RenderSettings {
    fn from(config: &RenderConfig) -> Self {
        Self {
            measure_size: config.measure_size,
            alpha_threshold: config.alpha_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Render without writing anything.
    pub dry_run: bool,
    /// Fan targets out on the rayon pool.
    pub parallel: bool,
}

/// Result of processing one enabled target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Rendered,
    Failed(String),
}

/// A target-sized canvas, plus the error if rendering failed.
///
/// On failure the canvas is fully transparent.
pub struct Rendered {
    pub image: RgbaImage,
    pub error: Option<String>,
}

impl Rendered {
    fn failed(target: &RenderTarget, message: String) -> Self {
        Self {
            image: empty_canvas(target.width, target.height),
            error: Some(message),
        }
    }
}

pub struct Generator {
    cache: SourceCache,
    default_source: Option<PathBuf>,
}

impl Generator {
    pub fn new(settings: RenderSettings, default_source: Option<PathBuf>) -> Self {
        Self {
            cache: SourceCache::new(settings),
            default_source,
        }
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Source feeding `target`: its override, else the default.
    pub fn source_path<'a>(&'a self, target: &'a RenderTarget) -> Option<&'a Path> {
        target.source.path().or(self.default_source.as_deref())
    }

    /// Render one target to a canvas of exactly its size.
    pub fn render(&self, target: &RenderTarget) -> Rendered {
        if let Err(message) = target.check() {
            return Rendered::failed(target, message);
        }

        let Some(path) = self.source_path(target) else {
            let err = RenderError::MissingSource(target.name.clone());
            return Rendered::failed(target, err.detail());
        };

        let image = match &*self.cache.get_or_load(path) {
            LoadedSource::Vector { source, bounds } => rasterize_to_bounds(source, target, bounds),
            LoadedSource::Raster { source, bounds } => {
                composite_with_bounds(source.image(), bounds, target)
            }
            LoadedSource::Invalid(err) => return Rendered::failed(target, err.detail()),
        };

        Rendered { image, error: None }
    }

    /// Render and, unless `dry_run`, write one target.
    ///
    /// A failed render is never written over the existing file.
    pub fn process(&self, target: &RenderTarget, dry_run: bool) -> Outcome {
        let rendered = self.render(target);
        if let Some(message) = rendered.error {
            return Outcome::Failed(message);
        }
        if dry_run {
            return Outcome::Rendered;
        }
        match write_png(&rendered.image, &target.path) {
            Ok(()) => Outcome::Written,
            Err(err) => Outcome::Failed(err.detail()),
        }
    }

    /// Load and measure every distinct source used by `targets`.
    pub fn preload(&self, targets: &[&RenderTarget]) {
        let sources: HashSet<&Path> = targets.iter().filter_map(|t| self.source_path(t)).collect();
        sources.par_iter().for_each(|path| {
            self.cache.get_or_load(path);
        });
    }

    /// Process every enabled target.
    ///
    /// `cancelled` is polled before each target; once it returns true the
    /// remaining targets are counted as cancelled. `progress` observes each
    /// finished target.
    pub fn run<C, P>(
        &self,
        targets: &[RenderTarget],
        options: RunOptions,
        cancelled: C,
        progress: P,
    ) -> GenerateReport
    where
        C: Fn() -> bool + Sync,
        P: Fn(&RenderTarget, &Outcome) + Sync,
    {
        let enabled: Vec<&RenderTarget> = targets.iter().filter(|t| t.enabled).collect();

        let step = |target: &RenderTarget| -> Option<Outcome> {
            if cancelled() {
                return None;
            }
            let outcome = self.process(target, options.dry_run);
            progress(target, &outcome);
            Some(outcome)
        };

        let outcomes: Vec<Option<Outcome>> = if options.parallel {
            if !cancelled() {
                self.preload(&enabled);
            }
            enabled.par_iter().map(|&t| step(t)).collect()
        } else {
            enabled.iter().map(|&t| step(t)).collect()
        };

        let mut report = GenerateReport {
            skipped: targets.len() - enabled.len(),
            ..Default::default()
        };
        for (target, outcome) in enabled.into_iter().zip(outcomes) {
            match outcome {
                Some(outcome) => report.record(target, outcome),
                None => report.cancelled += 1,
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::SourceRef;
    use image::{GenericImageView, Rgba};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const PADDED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <rect x="25" y="25" width="50" height="50" fill="#0a84ff"/></svg>"##;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("icon.svg"), PADDED_SQUARE).unwrap();
            fs::write(dir.path().join("broken.svg"), "<svg").unwrap();
            let mut bar = RgbaImage::new(40, 20);
            for pixel in bar.pixels_mut() {
                *pixel = Rgba([255, 0, 0, 255]);
            }
            bar.save(dir.path().join("bar.png")).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn generator(&self) -> Generator {
            Generator::new(RenderSettings::default(), Some(self.path("icon.svg")))
        }
    }

    fn never() -> bool {
        false
    }

    #[test]
    fn test_bad_override_fails_alone() {
        let fx = Fixture::new();
        let blocked = fx.path("out/blocked.png");
        fs::create_dir_all(blocked.parent().unwrap()).unwrap();
        fs::write(&blocked, b"previous").unwrap();

        let targets = vec![
            RenderTarget::square("a", fx.path("out/a.png"), 48),
            RenderTarget::square("blocked", &blocked, 48)
                .with_source(SourceRef::from_path(fx.path("broken.svg"))),
            RenderTarget::square("bar", fx.path("out/bar.png"), 100)
                .with_source(SourceRef::from_path(fx.path("bar.png"))),
        ];

        let report = fx.generator().run(&targets, RunOptions::default(), never, |_, _| {});

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[&blocked].contains("invalid SVG"));
        assert_eq!(fs::read(&blocked).unwrap(), b"previous");

        let a = image::open(fx.path("out/a.png")).unwrap();
        assert_eq!(a.dimensions(), (48, 48));

        // 40x20 bar scaled to 100x50, centered vertically
        let bar = image::open(fx.path("out/bar.png")).unwrap().to_rgba8();
        assert_eq!(bar.dimensions(), (100, 100));
        assert_eq!(bar.get_pixel(50, 10)[3], 0);
        assert_eq!(bar.get_pixel(50, 50)[3], 255);
    }

    #[test]
    fn test_cancelled_before_run_writes_nothing() {
        let fx = Fixture::new();
        let targets = vec![
            RenderTarget::square("a", fx.path("a.png"), 48),
            RenderTarget::square("b", fx.path("b.png"), 96),
        ];

        for parallel in [false, true] {
            let options = RunOptions { parallel, ..Default::default() };
            let report = fx.generator().run(&targets, options, || true, |_, _| {});
            assert_eq!(report.cancelled, 2);
            assert!(report.written.is_empty());
        }
        assert!(!fx.path("a.png").exists());
        assert!(!fx.path("b.png").exists());
    }

    #[test]
    fn test_each_source_measured_once() {
        let fx = Fixture::new();
        let targets: Vec<_> = [48, 72, 96, 144, 192]
            .into_iter()
            .map(|size| RenderTarget::square("icon", fx.path(&format!("{size}.png")), size))
            .chain(std::iter::once(
                RenderTarget::square("bar", fx.path("bar-out.png"), 64)
                    .with_source(SourceRef::from_path(fx.path("bar.png"))),
            ))
            .collect();

        for parallel in [false, true] {
            let generator = fx.generator();
            let options = RunOptions { parallel, dry_run: true };
            let report = generator.run(&targets, options, never, |_, _| {});
            assert_eq!(report.rendered.len(), 6);
            assert_eq!(generator.cache().loads(), 2);
        }
    }

    #[test]
    fn test_dry_run_and_disabled() {
        let fx = Fixture::new();
        let mut disabled = RenderTarget::square("off", fx.path("off.png"), 48);
        disabled.enabled = false;
        let targets = vec![RenderTarget::square("on", fx.path("on.png"), 48), disabled];

        let seen = AtomicUsize::new(0);
        let options = RunOptions { dry_run: true, ..Default::default() };
        let report = fx.generator().run(&targets, options, never, |_, outcome| {
            assert_eq!(outcome, &Outcome::Rendered);
            seen.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(seen.load(Ordering::Relaxed), 1);
        assert_eq!(report.rendered.len(), 1);
        assert_eq!(report.skipped, 1);
        assert!(!fx.path("on.png").exists());
    }

    #[test]
    fn test_missing_default_source() {
        let generator = Generator::new(RenderSettings::default(), None);
        let rendered = generator.render(&RenderTarget::square("icon", "icon.png", 32));
        assert!(rendered.error.unwrap().contains("no source"));
        assert_eq!(rendered.image.dimensions(), (32, 32));
        assert!(rendered.image.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_render_removes_padding() {
        let fx = Fixture::new();
        let rendered = fx.generator().render(&RenderTarget::square("icon", "x.png", 64));
        assert!(rendered.error.is_none());
        assert!(rendered.image.get_pixel(1, 1)[3] > 100);
        assert!(rendered.image.get_pixel(62, 62)[3] > 100);
    }
}
