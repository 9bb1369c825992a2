//! Terminal text decoration used by diagnostics
//!
//! ANSI foreground/background escapes over a fixed sixteen-color palette,
//! plus block indentation. Everything here is a pure text transform.

use std::fmt;

const FOREGROUND_OFFSET: u8 = 30;
const BACKGROUND_OFFSET: u8 = 40;
const RESET: &str = "\x1b[0m";

/// Named palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    LightGray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
}

impl Color {
    /// Palette code before the foreground/background offset is applied
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::LightGray => 7,
            Color::DarkGray => 60,
            Color::LightRed => 61,
            Color::LightGreen => 62,
            Color::LightYellow => 63,
            Color::LightBlue => 64,
            Color::LightMagenta => 65,
            Color::LightCyan => 66,
            Color::White => 67,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::LightGray => "light gray",
            Color::DarkGray => "dark gray",
            Color::LightRed => "light red",
            Color::LightGreen => "light green",
            Color::LightYellow => "light yellow",
            Color::LightBlue => "light blue",
            Color::LightMagenta => "light magenta",
            Color::LightCyan => "light cyan",
            Color::White => "white",
        }
    }

    /// Look up a palette entry by its display name ("light blue", "red", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [Color; 16] = [
            Color::Black,
            Color::Red,
            Color::Green,
            Color::Yellow,
            Color::Blue,
            Color::Magenta,
            Color::Cyan,
            Color::LightGray,
            Color::DarkGray,
            Color::LightRed,
            Color::LightGreen,
            Color::LightYellow,
            Color::LightBlue,
            Color::LightMagenta,
            Color::LightCyan,
            Color::White,
        ];
        let name = name.trim();
        ALL.into_iter().find(|color| color.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap `text` in a foreground color escape
pub fn color(color: Color, text: &str) -> String {
    format!("\x1b[{}m{}{}", color.code() + FOREGROUND_OFFSET, text, RESET)
}

/// Wrap `text` in a background color escape
pub fn background(color: Color, text: &str) -> String {
    format!("\x1b[{}m{}{}", color.code() + BACKGROUND_OFFSET, text, RESET)
}

/// Indent every line of `text` by four spaces
pub fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_codes() {
        assert_eq!(color(Color::Blue, "x"), "\x1b[34mx\x1b[0m");
        assert_eq!(color(Color::White, "x"), "\x1b[97mx\x1b[0m");
    }

    #[test]
    fn test_background_codes() {
        assert_eq!(background(Color::Red, "err"), "\x1b[41merr\x1b[0m");
        assert_eq!(background(Color::DarkGray, ""), "\x1b[100m\x1b[0m");
    }

    #[test]
    fn test_indent_every_line() {
        assert_eq!(indent("a\nb"), "    a\n    b");
        assert_eq!(indent(""), "    ");
    }

    #[test]
    fn test_color_names_round_trip() {
        assert_eq!(Color::from_name("light blue"), Some(Color::LightBlue));
        assert_eq!(Color::from_name("Magenta"), Some(Color::Magenta));
        assert_eq!(Color::from_name("purple"), None);
        assert_eq!(Color::LightCyan.to_string(), "light cyan");
    }
}
