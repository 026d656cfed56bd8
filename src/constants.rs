//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// File locations
pub mod files {
    /// Configuration file name, resolved against the working directory
    pub const CONFIG_FILE: &str = "config.txt";
}

/// Layout of the composited preview column
pub mod view {
    /// Number of historical frames kept and displayed
    pub const HISTORY_CAPACITY: usize = 3;

    /// Height of the heading band drawn above each frame
    pub const HEADING_HEIGHT: u32 = 24;

    /// Left padding of the heading label inside its band
    pub const HEADING_PADDING_LEFT: f32 = 10.0;

    /// Point size of the heading label font
    pub const HEADING_FONT_SIZE: f32 = 9.0;

    /// Stroke width of the overlay rectangle outlines
    pub const RECT_STROKE_WIDTH: f32 = 3.0;
}

/// Timing of the refresh pipeline
pub mod timing {
    use std::time::Duration;

    /// Delay before the first refresh, letting the window finish construction
    pub const STARTUP_DELAY: Duration = Duration::from_millis(200);

    /// Settle delay between a raw directory signal and the refresh attempt
    pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

    /// Minimum interval between two accepted refreshes
    pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(50);
}
