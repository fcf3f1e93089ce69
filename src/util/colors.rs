use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x001ed760);
pub const NEUTRAL: Color = Color::from_u32(0x00a7a7a7);
pub const MUTED: Color = Color::from_u32(0x00404040);
pub const CARD: Color = Color::from_u32(0x00181818);
pub const BACKGROUND: Color = Color::from_u32(0x00121212);
pub const ACCENT: Color = Color::from_u32(0x00a855f7);
