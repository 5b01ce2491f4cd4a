//! Terminal output for rendered components.
//!
//! A [`Rendered`] value carries `$<code>` escapes, which mean nothing to a
//! terminal. [`TermWriter`] turns them into something displayable according to
//! a [`StyleTransform`]:
//!
//! ```rust
//! use chatcomp::{render_json, StyleTransform, TermWriter};
//!
//! let rendered = render_json(r#"{"color": "red", "text": "alert"}"#, None).unwrap();
//!
//! let keep = TermWriter::new(StyleTransform::Keep);
//! assert_eq!(keep.write(&rendered), "$calert");
//!
//! let plain = TermWriter::new(StyleTransform::Remove);
//! assert_eq!(plain.write(&rendered), "alert");
//!
//! let ansi = TermWriter::new(StyleTransform::Apply).force_styling(true);
//! assert!(ansi.write(&rendered).contains("\x1b["));
//! ```

use console::Style;

use crate::render::Rendered;
use crate::style::{self, StyleKind, ESCAPE};

/// How style escapes are handled on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleTransform {
    /// Emit the escapes as-is. Useful for debugging styling.
    Keep,

    /// Drop the escapes, leaving plain text.
    Remove,

    /// Replace the escapes with ANSI styling.
    #[default]
    Apply,
}

/// Writes rendered components for display.
#[derive(Debug, Clone)]
pub struct TermWriter {
    transform: StyleTransform,
    force_styling: Option<bool>,
}

impl TermWriter {
    pub fn new(transform: StyleTransform) -> Self {
        Self {
            transform,
            force_styling: None,
        }
    }

    /// Forces ANSI output on or off regardless of terminal detection.
    pub fn force_styling(mut self, enabled: bool) -> Self {
        self.force_styling = Some(enabled);
        self
    }

    pub fn transform(&self) -> StyleTransform {
        self.transform
    }

    /// Produces the display string for `rendered`.
    pub fn write(&self, rendered: &Rendered) -> String {
        match self.transform {
            StyleTransform::Keep => rendered.styled.clone(),
            StyleTransform::Remove => rendered.plain.clone(),
            StyleTransform::Apply => self.apply(&rendered.styled),
        }
    }

    /// Converts `$<code>` escapes in `styled` to ANSI sequences.
    ///
    /// A color code starts a fresh run in that color, a format code adds its
    /// attribute to the current run, and reset clears everything. `$`
    /// followed by anything that is not a known code is plain text.
    pub fn apply(&self, styled: &str) -> String {
        let mut output = String::with_capacity(styled.len());
        let mut current = self.base_style();
        let mut run = String::new();
        let mut chars = styled.chars().peekable();

        while let Some(ch) = chars.next() {
            let code = match chars.peek() {
                Some(&next) if ch == ESCAPE => style::by_code(next),
                _ => None,
            };
            let Some(code) = code else {
                run.push(ch);
                continue;
            };
            chars.next();

            append_run(&mut output, &mut run, &current);
            current = match code.kind() {
                StyleKind::Color(color) => self.base_style().fg(color),
                StyleKind::Format(attr) => current.attr(attr),
                StyleKind::Reset => self.base_style(),
            };
        }
        append_run(&mut output, &mut run, &current);

        output
    }

    fn base_style(&self) -> Style {
        match self.force_styling {
            Some(enabled) => Style::new().force_styling(enabled),
            None => Style::new(),
        }
    }
}

/// Flushes the pending text run, styled with `style`.
fn append_run(output: &mut String, run: &mut String, style: &Style) {
    if run.is_empty() {
        return;
    }
    output.push_str(&style.apply_to(run.as_str()).to_string());
    run.clear();
}
