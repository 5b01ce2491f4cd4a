//! # chatcomp - chat component rendering
//!
//! Game protocols send chat as *components*: JSON trees of text, colors,
//! translation keys and nested children. `chatcomp` flattens such a tree into
//! a single string with `$<code>` style escapes, plus a plain-text copy.
//!
//! ## Core Concepts
//!
//! - [`Component`]: a decoded component tree (string, integer, array or object)
//! - [`style`]: the fixed catalog of style codes (`red` -> `$c`, `bold` -> `$l`, ...)
//! - [`Renderer`]: walks a tree, resolving colors and translations
//! - [`translate`]: placeholder substitution and the [`TranslationProvider`] seam
//! - [`TermWriter`]: displays a rendering as escapes, plain text or ANSI
//!
//! ## Quick Start
//!
//! ```rust
//! use chatcomp::{render_json, Translations};
//!
//! let translations: Translations =
//!     [("chat.type.text", "<%s> %s")].into_iter().collect();
//!
//! let rendered = render_json(
//!     r#"{
//!         "translate": "chat.type.text",
//!         "with": [{"color": "gold", "text": "Steve"}, "hello"]
//!     }"#,
//!     Some(&translations),
//! ).unwrap();
//!
//! assert_eq!(rendered.styled, "<$6Steve> hello");
//! assert_eq!(rendered.plain, "<Steve> hello");
//! ```
//!
//! ## Failure model
//!
//! Only structural problems fail a render: a node shape components cannot take
//! (rejected while decoding) or a tree nested deeper than the renderer's
//! limit. Unknown color names and a missing translation provider are logged
//! through `tracing` and rendering carries on; placeholders without arguments
//! are left in the text.

pub mod component;
mod error;
pub mod render;
pub mod style;
pub mod term;
pub mod translate;

pub use component::{Component, ComponentObject};
pub use error::{RenderError, Result, TranslationError};
pub use render::{render, render_json, strip_styles, Rendered, Renderer, DEFAULT_MAX_DEPTH};
pub use style::{StyleCode, StyleKind, ESCAPE};
pub use term::{StyleTransform, TermWriter};
pub use translate::{substitute, TranslationProvider, Translations};
