//! Flattening component trees into styled strings.
//!
//! The renderer walks a [`Component`] tree and produces a single string in
//! which styled runs are introduced by `$<code>` escapes (see
//! [`style`](crate::style)). A plain-text copy with those escapes removed is
//! derived alongside.
//!
//! # Style inheritance
//!
//! A node's *effective style* is its own `color` when present, otherwise the
//! style it inherited. An unknown `color` name yields no style at all rather
//! than the inherited one. Styles never stack: every `extra` child starts from
//! its parent's effective style and is followed by a reset escape.
//!
//! # Example
//!
//! ```rust
//! use chatcomp::{Component, Renderer};
//!
//! let component = Component::from_json_str(
//!     r#"{"color": "red", "text": "hi", "extra": [{"color": "gold", "text": "!"}]}"#,
//! ).unwrap();
//!
//! let rendered = Renderer::new().render(&component).unwrap();
//! assert_eq!(rendered.styled, "$chi$6!$r");
//! assert_eq!(rendered.plain, "hi!");
//! ```

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::component::{Component, ComponentObject};
use crate::error::{RenderError, Result};
use crate::style;
use crate::translate::{substitute, TranslationProvider};

/// Default nesting limit for [`Renderer`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

static STYLE_ESCAPES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[0-9a-fk-r]").expect("style escape pattern is valid"));

/// Output of a render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Text with embedded `$<code>` style escapes.
    pub styled: String,
    /// The same text with known style escapes removed.
    pub plain: String,
}

impl Rendered {
    fn new(styled: String) -> Self {
        let plain = strip_styles(&styled).into_owned();
        Self { styled, plain }
    }
}

/// Removes every `$` + style-code pair (`[0-9a-fk-r]`) from `input`.
///
/// Only those exact two-character sequences are removed; a `$` followed by
/// anything else is left alone.
///
/// ```rust
/// use chatcomp::strip_styles;
///
/// assert_eq!(strip_styles("$cred$r costs $5 or $z"), "red costs  or $z");
/// ```
pub fn strip_styles(input: &str) -> Cow<'_, str> {
    STYLE_ESCAPES.replace_all(input, "")
}

/// Renders component trees.
///
/// Holds the optional translation provider and the nesting limit; a renderer
/// is cheap to build and can be reused for any number of trees.
#[derive(Clone, Copy)]
pub struct Renderer<'a> {
    translations: Option<&'a dyn TranslationProvider>,
    max_depth: usize,
}

impl Default for Renderer<'_> {
    fn default() -> Self {
        Self {
            translations: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl std::fmt::Debug for Renderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("translations", &self.translations.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<'a> Renderer<'a> {
    /// Creates a renderer without translations and with the default depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the provider used to look up `translate` keys.
    pub fn translations(mut self, provider: &'a dyn TranslationProvider) -> Self {
        self.translations = Some(provider);
        self
    }

    /// Sets the provider, or clears it with `None`.
    pub fn maybe_translations(mut self, provider: Option<&'a dyn TranslationProvider>) -> Self {
        self.translations = provider;
        self
    }

    /// Sets how many levels of nesting a tree may have before rendering fails.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Renders a tree into its styled and plain forms.
    pub fn render(&self, component: &Component) -> Result<Rendered> {
        self.render_styled(component, "").map(Rendered::new)
    }

    /// Decodes `json` as a component and renders it.
    ///
    /// The renderer's depth limit also bounds decoding, so a document nested
    /// deeper than [`max_depth`](Self::max_depth) fails with
    /// [`RenderError::DepthExceeded`] before any tree is built.
    pub fn render_json(&self, json: &str) -> Result<Rendered> {
        self.render(&Component::from_json_str_with_depth(json, self.max_depth)?)
    }

    /// Renders a subtree under an inherited style escape, without deriving
    /// the plain form.
    pub fn render_styled(&self, component: &Component, inherited: &str) -> Result<String> {
        self.node(component, inherited, 1)
    }

    fn node(&self, component: &Component, inherited: &str, depth: usize) -> Result<String> {
        if depth > self.max_depth {
            return Err(RenderError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        match component {
            Component::Text(text) => Ok(text.clone()),
            Component::Integer(value) => Ok(value.to_string()),
            Component::Array(items) => {
                let mut out = String::new();
                for item in items {
                    out.push_str(&self.node(item, inherited, depth + 1)?);
                }
                Ok(out)
            }
            Component::Object(object) => self.object(object, inherited, depth),
        }
    }

    fn object(&self, object: &ComponentObject, inherited: &str, depth: usize) -> Result<String> {
        let child_depth = depth + 1;

        // Style names and translation keys are identifiers, not display
        // text, so they render without the surrounding style.
        let effective = match &object.color {
            Some(color) => {
                let name = self.node(color, "", child_depth)?;
                match style::resolve(&name) {
                    Some(style) => style.escape(),
                    None => {
                        warn!(style = %name, "unknown style name; rendering without style");
                        String::new()
                    }
                }
            }
            None => inherited.to_string(),
        };

        let mut extras = String::new();
        if let Some(extra) = &object.extra {
            let reset = style::reset().escape();
            for child in extra {
                extras.push_str(&self.node(child, &effective, child_depth)?);
                extras.push_str(&reset);
            }
        }

        if let Some(text) = &object.text {
            let body = self.node(text, &effective, child_depth)?;
            return Ok(effective + &body + &extras);
        }

        if let Some(key) = &object.translate {
            let key = self.node(key, "", child_depth)?;
            let args = object
                .arguments()
                .iter()
                .map(|arg| self.node(arg, &effective, child_depth))
                .collect::<Result<Vec<_>>>()?;

            let body = match self.translations {
                Some(provider) => substitute(&provider.rule(&key), &args),
                None => {
                    warn!(key = %key, "no translation provider; joining arguments");
                    args.join(" ")
                }
            };
            return Ok(effective + &body + &extras);
        }

        Ok(extras)
    }
}

/// Renders `component` with an optional translation provider and default options.
pub fn render(
    component: &Component,
    translations: Option<&dyn TranslationProvider>,
) -> Result<Rendered> {
    Renderer::new()
        .maybe_translations(translations)
        .render(component)
}

/// Decodes `json` and renders it with an optional translation provider.
pub fn render_json(json: &str, translations: Option<&dyn TranslationProvider>) -> Result<Rendered> {
    Renderer::new()
        .maybe_translations(translations)
        .render_json(json)
}
