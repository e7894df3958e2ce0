// ABOUTME: Stateless terminal styling for user-facing status messages
// ABOUTME: Builds styled strings on demand instead of sharing a global formatter

use crossterm::style::{Color, Stylize};
use std::fmt::Display;

pub const ACCENT_RGB: (u8, u8, u8) = (0x7d, 0x56, 0xf4);

const ACCENT: Color = Color::Rgb {
    r: ACCENT_RGB.0,
    g: ACCENT_RGB.1,
    b: ACCENT_RGB.2,
};
const FOREGROUND: Color = Color::Rgb {
    r: 0xfa,
    g: 0xfa,
    b: 0xfa,
};

/// Bold light-on-accent label.
pub fn banner(text: &str) -> String {
    format!(" {text} ")
        .with(FOREGROUND)
        .on(ACCENT)
        .bold()
        .to_string()
}

/// A banner followed by plain detail text, e.g. `Group not found: lab`.
pub fn with_detail(label: &str, detail: impl Display) -> String {
    format!("{} {}", banner(label), detail)
}

pub fn print(text: &str) {
    println!("{}", banner(text));
}

pub fn print_with_detail(label: &str, detail: impl Display) {
    println!("{}", with_detail(label, detail));
}
