//! Chat component trees.
//!
//! A component is one of four shapes: a string, an integer, an array of
//! components, or an object whose fields (`text`, `translate`, `with`,
//! `using`, `color`, `extra`) are themselves components. Trees usually arrive
//! as JSON from the network and are decoded with [`Component::from_value`]
//! or through serde:
//!
//! ```rust
//! use chatcomp::Component;
//!
//! let component: Component =
//!     serde_json::from_str(r#"{"color": "red", "text": "hi"}"#).unwrap();
//! assert!(matches!(component, Component::Object(_)));
//! ```
//!
//! Anything that does not fit those shapes (`null`, booleans, fractional
//! numbers, a non-array `extra`) is rejected while decoding, so a
//! [`Component`] in hand is always renderable.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{RenderError, Result};
use crate::render::DEFAULT_MAX_DEPTH;

/// A node of a chat component tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Component {
    Text(String),
    Integer(i64),
    Array(Vec<Component>),
    Object(ComponentObject),
}

/// The object form of a component.
///
/// Every field is optional. Fields other than the ones below are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentObject {
    pub color: Option<Box<Component>>,
    pub text: Option<Box<Component>>,
    pub translate: Option<Box<Component>>,
    /// Translation arguments.
    pub with: Option<Vec<Component>>,
    /// Legacy name for `with`; only read when `with` is absent.
    pub using: Option<Vec<Component>>,
    pub extra: Option<Vec<Component>>,
}

impl Component {
    /// A plain string component.
    pub fn text(text: impl Into<String>) -> Self {
        Component::Text(text.into())
    }

    /// Decodes a component from a JSON value, allowing up to
    /// [`DEFAULT_MAX_DEPTH`] levels.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_with_depth(value, DEFAULT_MAX_DEPTH)
    }

    /// Decodes a component from a JSON value, failing with
    /// [`RenderError::DepthExceeded`] past `limit` levels.
    pub fn from_value_with_depth(value: &Value, limit: usize) -> Result<Self> {
        Decoder::new(limit).value(value, 1)
    }

    /// Parses and decodes a component from JSON text, allowing up to
    /// [`DEFAULT_MAX_DEPTH`] levels.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_str_with_depth(json, DEFAULT_MAX_DEPTH)
    }

    /// Parses and decodes a component from JSON text with a nesting limit.
    ///
    /// The limit replaces `serde_json`'s fixed recursion limit of 128, so
    /// documents nested deeper than that still parse when `limit` allows.
    /// Nesting is checked on the raw text before parsing; arrays and objects
    /// under ignored keys count too.
    pub fn from_json_str_with_depth(json: &str, limit: usize) -> Result<Self> {
        if nests_deeper_than(json, limit) {
            return Err(RenderError::DepthExceeded { limit });
        }

        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de)?;
        de.end()?;
        Self::from_value_with_depth(&value, limit)
    }

    /// Number of nested levels, counting this node as one.
    pub fn depth(&self) -> usize {
        match self {
            Component::Text(_) | Component::Integer(_) => 1,
            Component::Array(items) => 1 + max_depth(items.iter()),
            Component::Object(object) => 1 + max_depth(object.children()),
        }
    }
}

fn max_depth<'a>(children: impl Iterator<Item = &'a Component>) -> usize {
    children.map(Component::depth).max().unwrap_or(0)
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Component::Text(text.to_string())
    }
}

impl From<String> for Component {
    fn from(text: String) -> Self {
        Component::Text(text)
    }
}

impl From<i64> for Component {
    fn from(value: i64) -> Self {
        Component::Integer(value)
    }
}

impl From<Vec<Component>> for Component {
    fn from(items: Vec<Component>) -> Self {
        Component::Array(items)
    }
}

impl From<ComponentObject> for Component {
    fn from(object: ComponentObject) -> Self {
        Component::Object(object)
    }
}

impl TryFrom<Value> for Component {
    type Error = RenderError;

    fn try_from(value: Value) -> Result<Self> {
        Component::from_value(&value)
    }
}

impl ComponentObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<Component>) -> Self {
        self.color = Some(Box::new(color.into()));
        self
    }

    pub fn text(mut self, text: impl Into<Component>) -> Self {
        self.text = Some(Box::new(text.into()));
        self
    }

    pub fn translate(mut self, key: impl Into<Component>) -> Self {
        self.translate = Some(Box::new(key.into()));
        self
    }

    pub fn with(mut self, args: Vec<Component>) -> Self {
        self.with = Some(args);
        self
    }

    pub fn using(mut self, args: Vec<Component>) -> Self {
        self.using = Some(args);
        self
    }

    pub fn extra(mut self, extra: Vec<Component>) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Translation arguments: `with`, falling back to `using`.
    pub fn arguments(&self) -> &[Component] {
        self.with
            .as_deref()
            .or(self.using.as_deref())
            .unwrap_or_default()
    }

    /// All directly nested components, in field order.
    fn children(&self) -> impl Iterator<Item = &Component> {
        let boxed = [&self.color, &self.text, &self.translate]
            .into_iter()
            .flatten()
            .map(|b| &**b);
        let lists = [&self.with, &self.using, &self.extra]
            .into_iter()
            .flatten()
            .flat_map(|v| v.iter());
        boxed.chain(lists)
    }
}

/// Names a JSON value's kind for error messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "fractional number",
        Value::Number(_) => "out-of-range integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decodes JSON values into components, tracking the JSON-pointer location
/// of the node being decoded and the nesting depth.
struct Decoder {
    path: String,
    limit: usize,
}

impl Decoder {
    fn new(limit: usize) -> Self {
        Self {
            path: String::new(),
            limit,
        }
    }

    fn unsupported(&self, found: impl Into<String>) -> RenderError {
        RenderError::Unsupported {
            path: if self.path.is_empty() {
                "/".to_string()
            } else {
                self.path.clone()
            },
            found: found.into(),
        }
    }

    fn value(&mut self, value: &Value, depth: usize) -> Result<Component> {
        if depth > self.limit {
            return Err(RenderError::DepthExceeded { limit: self.limit });
        }

        match value {
            Value::String(s) => Ok(Component::Text(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Component::Integer)
                .ok_or_else(|| self.unsupported(kind_name(value))),
            Value::Array(items) => self.list(items, depth + 1).map(Component::Array),
            Value::Object(map) => self.object(map, depth + 1).map(Component::Object),
            Value::Null | Value::Bool(_) => Err(self.unsupported(kind_name(value))),
        }
    }

    /// Decodes `items` as siblings at `depth`.
    fn list(&mut self, items: &[Value], depth: usize) -> Result<Vec<Component>> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let len = self.path.len();
            self.path.push('/');
            self.path.push_str(&i.to_string());
            out.push(self.value(item, depth)?);
            self.path.truncate(len);
        }
        Ok(out)
    }

    fn object(&mut self, map: &Map<String, Value>, depth: usize) -> Result<ComponentObject> {
        Ok(ComponentObject {
            color: self.field(map, "color", depth)?.map(Box::new),
            text: self.field(map, "text", depth)?.map(Box::new),
            translate: self.field(map, "translate", depth)?.map(Box::new),
            with: self.list_field(map, "with", depth)?,
            using: self.list_field(map, "using", depth)?,
            extra: self.list_field(map, "extra", depth)?,
        })
    }

    fn field(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        depth: usize,
    ) -> Result<Option<Component>> {
        let Some(value) = map.get(key) else {
            return Ok(None);
        };
        let len = self.path.len();
        self.path.push('/');
        self.path.push_str(key);
        let component = self.value(value, depth)?;
        self.path.truncate(len);
        Ok(Some(component))
    }

    fn list_field(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        depth: usize,
    ) -> Result<Option<Vec<Component>>> {
        let Some(value) = map.get(key) else {
            return Ok(None);
        };
        let len = self.path.len();
        self.path.push('/');
        self.path.push_str(key);
        let items = match value {
            Value::Array(items) => self.list(items, depth)?,
            other => {
                return Err(
                    self.unsupported(format!("{} where array expected", kind_name(other)))
                )
            }
        };
        self.path.truncate(len);
        Ok(Some(items))
    }
}

/// Whether `json` opens more than `limit` arrays or objects inside one
/// another. Brackets inside string literals are skipped.
fn nests_deeper_than(json: &str, limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in json.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}
