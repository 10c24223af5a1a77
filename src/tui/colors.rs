//! Color constants for the terminal user interface.

use crossterm::style::Color;

// Board chrome

/// Box-drawing lines
pub const GREY: Color = Color::Rgb { r: 128, g: 128, b: 128 };
/// Project title and error messages
pub const RED: Color = Color::Rgb { r: 220, g: 50, b: 47 };

// One color per board column

/// Todo column
pub const BRIGHT_BLUE: Color = Color::Rgb { r: 92, g: 160, b: 255 };
/// Doing column, view headers
pub const ORANGE: Color = Color::Rgb { r: 255, g: 165, b: 0 };
/// Done column, unselected list entries
pub const GREEN: Color = Color::Rgb { r: 0, g: 170, b: 0 };

/// Highlighted list entry
pub const BRIGHT_GREEN: Color = Color::Rgb { r: 85, g: 255, b: 85 };
