//! User-visible status lines. Info/success/warning go to stdout, errors to
//! stderr. Colours are dropped when `NO_COLOR` is set.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn colours_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint(style: Style, icon: &str) -> String {
    if colours_enabled() {
        style.paint(icon).to_string()
    } else {
        icon.to_string()
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", paint(Colour::Blue.bold(), ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", paint(Colour::Green.bold(), ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", paint(Colour::Yellow.bold(), ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", paint(Colour::Red.bold(), ICON_ERR), msg);
}

/// Section header used by reports
pub fn header<T: fmt::Display>(msg: T) {
    let line = format!("=== {msg} ===");
    if colours_enabled() {
        println!("\n{}", Colour::Blue.bold().paint(line));
    } else {
        println!("\n{line}");
    }
}
