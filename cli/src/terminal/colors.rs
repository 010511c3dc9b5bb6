//! Palette shared by every terminal renderer.

use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const MASS: Color = Color::BrightYellow;
pub const GOOD: Color = Color::Green;
pub const BAD: Color = Color::Red;
pub const NOTICE: Color = Color::Yellow;
