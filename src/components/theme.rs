// ABOUTME: Shared color palette for every screen and overlay

use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(100, 149, 237);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SELECTION: Color = Color::Rgb(100, 200, 100);
pub const DARK_BG: Color = Color::Rgb(25, 25, 35);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);
pub const TEXT: Color = Color::Rgb(220, 220, 230);
pub const MUTED: Color = Color::Rgb(120, 120, 140);
pub const BORDER: Color = Color::Rgb(60, 60, 80);
pub const ERROR: Color = Color::Rgb(220, 80, 80);
pub const WARNING: Color = Color::Rgb(220, 180, 80);
