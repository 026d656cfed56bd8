//! Loading and validation of the plain-text configuration file.
//!
//! The file holds exactly five fields, one per line:
//!
//! ```text
//! <image-path, optionally double-quoted>
//! <width> <height>
//! <window-x> <window-y>
//! <red-x1> <red-y1> <red-x2> <red-y2>
//! <green-x1> <green-y1> <green-x2> <green-y2>
//! ```
//!
//! The file is re-read on every refresh rather than cached, so edits to it
//! take effect together with the next image change.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Classified configuration failures. All of them are fatal: a broken config
/// will not fix itself without user intervention, so there is no retry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't find the config file at {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("can't open the config file at {}", .0.display())]
    FileUnreadable(PathBuf, #[source] io::Error),

    #[error("config file content is wrong: {0}")]
    MalformedContent(String),
}

/// Rectangle given as two corner points relative to the image's top-left.
///
/// The corners are taken verbatim: a second corner left of or above the
/// first yields a negative width/height and renders as a degenerate outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectSpec {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectSpec {
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// Validated view configuration, immutable per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Path of the watched image, absolute or relative to the working directory
    pub image_path: PathBuf,
    /// Fixed decode/scale target for every loaded image
    pub image_size: (u32, u32),
    /// Top-left placement of the preview window
    pub window_position: (i32, i32),
    pub red_rect: RectSpec,
    pub green_rect: RectSpec,
}

impl ViewConfig {
    /// Directory whose content changes drive the refresh pipeline: the
    /// parent of the configured image. Watching the directory instead of the
    /// file tolerates editors that replace the file via delete+recreate.
    pub fn watch_dir(&self) -> PathBuf {
        match self.image_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Read and validate the configuration file. Any failure discards the whole
/// parse attempt; there is no partial success.
pub fn load(path: &Path) -> Result<ViewConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)
        .map_err(|err| ConfigError::FileUnreadable(path.to_path_buf(), err))?;

    let mut lines = contents.lines();
    let mut next = || {
        lines
            .next()
            .ok_or_else(|| ConfigError::MalformedContent("fewer than 5 lines".to_string()))
    };

    // Double quotes are stripped so paths in the file may be quoted.
    let image_path = PathBuf::from(next()?.replace('"', ""));
    let size_line = next()?;
    let position_line = next()?;
    let red_line = next()?;
    let green_line = next()?;

    let [width, height] = parse_ints(size_line, "image size")?;
    if width <= 0 || height <= 0 {
        return Err(malformed("image size", size_line));
    }
    let [window_x, window_y] = parse_ints(position_line, "window position")?;
    let [r1, r2, r3, r4] = parse_ints(red_line, "red rectangle")?;
    let [g1, g2, g3, g4] = parse_ints(green_line, "green rectangle")?;

    debug!(image = %image_path.display(), "parsed configuration");

    Ok(ViewConfig {
        image_path,
        image_size: (width as u32, height as u32),
        window_position: (window_x, window_y),
        red_rect: RectSpec { x1: r1, y1: r2, x2: r3, y2: r4 },
        green_rect: RectSpec { x1: g1, y1: g2, x2: g3, y2: g4 },
    })
}

/// Parse a line of exactly `N` whitespace-separated base-10 integers.
fn parse_ints<const N: usize>(line: &str, what: &str) -> Result<[i32; N], ConfigError> {
    let fields: Vec<i32> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| malformed(what, line))?;
    fields.try_into().map_err(|_| malformed(what, line))
}

fn malformed(what: &str, line: &str) -> ConfigError {
    ConfigError::MalformedContent(format!("bad {what} line: \"{line}\""))
}
