//! Configuration section definitions.
//!
//! Each module corresponds to a section in `iconsmith.toml`:
//!
//! | Module    | TOML Section   | Purpose                                  |
//! |-----------|----------------|------------------------------------------|
//! | `android` | `[android]`    | Density-table launcher icon targets      |
//! | `render`  | `[render]`     | Measurement resolution, threshold        |
//! | `source`  | `[source]`     | Default source, overrides, disabled      |
//! | `target`  | `[[target]]`   | Explicit output files                    |

mod android;
mod render;
mod source;
mod target;

pub use android::AndroidConfig;
pub use render::RenderConfig;
pub use source::SourceConfig;
pub use target::{BoundsConfig, TargetConfig};
