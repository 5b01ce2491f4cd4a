//! The style catalog.
//!
//! Chat components name their colors (`"red"`, `"dark_aqua"`, `"gold"`) while the
//! flattened output marks styled runs with two-character escapes: the
//! [`ESCAPE`] prefix followed by a single style code. This module holds the
//! fixed table mapping one to the other.
//!
//! | code | name            | aliases                 |
//! |------|-----------------|-------------------------|
//! | `0`  | `black`         |                         |
//! | `1`  | `dark_blue`     |                         |
//! | `2`  | `dark_green`    |                         |
//! | `3`  | `dark_aqua`     | `dark_cyan`             |
//! | `4`  | `dark_red`      |                         |
//! | `5`  | `dark_purple`   | `purple`                |
//! | `6`  | `gold`          | `orange`                |
//! | `7`  | `gray`          | `grey`                  |
//! | `8`  | `dark_gray`     | `dark_grey`             |
//! | `9`  | `blue`          |                         |
//! | `a`  | `green`         |                         |
//! | `b`  | `aqua`          | `cyan`                  |
//! | `c`  | `red`           |                         |
//! | `d`  | `light_purple`  | `pink`, `magenta`       |
//! | `e`  | `yellow`        |                         |
//! | `f`  | `white`         |                         |
//! | `k`  | `obfuscated`    | `magic`                 |
//! | `l`  | `bold`          |                         |
//! | `m`  | `strikethrough` |                         |
//! | `n`  | `underline`     | `underlined`            |
//! | `o`  | `italic`        |                         |
//! | `r`  | `reset`         |                         |
//!
//! # Example
//!
//! ```rust
//! use chatcomp::style;
//!
//! let red = style::resolve("RED").unwrap();
//! assert_eq!(red.code(), 'c');
//! assert_eq!(red.to_string(), "$c");
//!
//! assert!(style::resolve("bogus").is_none());
//! ```

use std::fmt;

use console::{Attribute, Color};

/// Prefix character of every style escape.
pub const ESCAPE: char = '$';

/// What a style code does to the text that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Starts a new run in the given foreground color.
    Color(Color),
    /// Adds a text attribute to the current run.
    Format(Attribute),
    /// Clears color and attributes.
    Reset,
}

/// One entry of the style catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct StyleCode {
    code: char,
    name: &'static str,
    aliases: &'static [&'static str],
    kind: StyleKind,
}

impl StyleCode {
    const fn new(
        code: char,
        name: &'static str,
        aliases: &'static [&'static str],
        kind: StyleKind,
    ) -> Self {
        Self {
            code,
            name,
            aliases,
            kind,
        }
    }

    /// The single style-code character.
    pub fn code(&self) -> char {
        self.code
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Alternative names accepted by [`resolve`], besides the canonical one.
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// The terminal effect this code stands for.
    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    /// Whether `name` is the canonical name or one of the aliases, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// The two-character escape sequence, e.g. `$c`.
    pub fn escape(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ESCAPE, self.code)
    }
}

static STYLES: [StyleCode; 22] = [
    StyleCode::new('0', "black", &[], StyleKind::Color(Color::Black)),
    StyleCode::new('1', "dark_blue", &[], StyleKind::Color(Color::Blue)),
    StyleCode::new('2', "dark_green", &[], StyleKind::Color(Color::Green)),
    StyleCode::new('3', "dark_aqua", &["dark_cyan"], StyleKind::Color(Color::Cyan)),
    StyleCode::new('4', "dark_red", &[], StyleKind::Color(Color::Red)),
    StyleCode::new('5', "dark_purple", &["purple"], StyleKind::Color(Color::Magenta)),
    StyleCode::new('6', "gold", &["orange"], StyleKind::Color(Color::Yellow)),
    StyleCode::new('7', "gray", &["grey"], StyleKind::Color(Color::White)),
    // console uses the 256-color palette (indices 8-15) for bright variants
    StyleCode::new('8', "dark_gray", &["dark_grey"], StyleKind::Color(Color::Color256(8))),
    StyleCode::new('9', "blue", &[], StyleKind::Color(Color::Color256(12))),
    StyleCode::new('a', "green", &[], StyleKind::Color(Color::Color256(10))),
    StyleCode::new('b', "aqua", &["cyan"], StyleKind::Color(Color::Color256(14))),
    StyleCode::new('c', "red", &[], StyleKind::Color(Color::Color256(9))),
    StyleCode::new(
        'd',
        "light_purple",
        &["pink", "magenta"],
        StyleKind::Color(Color::Color256(13)),
    ),
    StyleCode::new('e', "yellow", &[], StyleKind::Color(Color::Color256(11))),
    StyleCode::new('f', "white", &[], StyleKind::Color(Color::Color256(15))),
    StyleCode::new('k', "obfuscated", &["magic"], StyleKind::Format(Attribute::Blink)),
    StyleCode::new('l', "bold", &[], StyleKind::Format(Attribute::Bold)),
    StyleCode::new(
        'm',
        "strikethrough",
        &[],
        StyleKind::Format(Attribute::StrikeThrough),
    ),
    StyleCode::new(
        'n',
        "underline",
        &["underlined"],
        StyleKind::Format(Attribute::Underlined),
    ),
    StyleCode::new('o', "italic", &[], StyleKind::Format(Attribute::Italic)),
    StyleCode::new('r', "reset", &[], StyleKind::Reset),
];

/// The reset entry; its escape ends every `extra` segment.
pub fn reset() -> &'static StyleCode {
    &STYLES[STYLES.len() - 1]
}

/// Looks up a style by canonical name or alias, case-insensitively.
pub fn resolve(name: &str) -> Option<&'static StyleCode> {
    STYLES.iter().find(|style| style.matches(name))
}

/// Looks up a style by its code character. Codes are lowercase.
pub fn by_code(code: char) -> Option<&'static StyleCode> {
    STYLES.iter().find(|style| style.code == code)
}

/// Every catalog entry, in code order.
pub fn all() -> &'static [StyleCode] {
    &STYLES
}
