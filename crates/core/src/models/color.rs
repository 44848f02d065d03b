use serde::{Deserialize, Serialize};

/// A plain structural RGBA color, each channel in `0.0..=1.0`.
///
/// The persisted schema and the core logic never depend on a UI-toolkit
/// color type; converting to something renderable is the presentation
/// layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorComponents {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl ColorComponents {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    // Default palette used by seeded categories and new transactions.
    pub const RED: Self = Self::new(1.0, 0.23, 0.19, 1.0);
    pub const ORANGE: Self = Self::new(1.0, 0.58, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 0.8, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.2, 0.78, 0.35, 1.0);
    pub const MINT: Self = Self::new(0.0, 0.78, 0.75, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.48, 1.0, 1.0);
    pub const PURPLE: Self = Self::new(0.69, 0.32, 0.87, 1.0);
    pub const PINK: Self = Self::new(1.0, 0.18, 0.33, 1.0);
    pub const BROWN: Self = Self::new(0.64, 0.52, 0.37, 1.0);
    pub const GRAY: Self = Self::new(0.56, 0.56, 0.58, 1.0);
}

impl Default for ColorComponents {
    /// New transactions default to blue, matching the seeded palette.
    fn default() -> Self {
        Self::BLUE
    }
}
