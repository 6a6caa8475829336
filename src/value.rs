use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

/// A generic, fully-owned JSON value tree.
///
/// Numbers carry the narrowest classification that fits the literal (see
/// `convert`): a value within 32-bit range is `Int`, not `Double`. Object
/// keys keep their insertion order from the source document.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

static NULL: JsonValue = JsonValue::Null;

impl JsonValue {
    /// Look up a key on an object. Returns `None` for non-objects and
    /// missing keys.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Index into an array. Returns `None` for non-arrays and out-of-range
    /// indices.
    pub fn get_index(&self, idx: usize) -> Option<&JsonValue> {
        match self {
            Self::Array(items) => items.get(idx),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view over both `Int` and `Long`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i64::from(*i)),
            Self::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Floating view over all four numeric classifications.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(f64::from(*i)),
            Self::Long(l) => Some(*l as f64),
            Self::Float(f) => Some(f64::from(*f)),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Pretty-print with two-space indentation.
    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        write_value(&mut out, self, 0);
        out
    }
}

/// Missing keys index to `Null` rather than panicking, so chained lookups
/// like `value["a"]["b"]` stay total.
impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, idx: usize) -> &JsonValue {
        self.get_index(idx).unwrap_or(&NULL)
    }
}

/// Compact JSON rendering.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}"),
            Self::Float(v) => write_float(f, f64::from(*v)),
            Self::Double(v) => write_float(f, *v),
            Self::String(s) => write!(f, "{}", escape_string(s)),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(map) => {
                f.write_str("{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{val}", escape_string(key))?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Whole-valued floats keep a trailing `.0` so re-parsing the rendered
/// text classifies them as floating again, never as an integer.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_finite() && v.fract() == 0.0 {
        write!(f, "{v:.1}")
    } else {
        write!(f, "{v}")
    }
}

fn escape_string(s: &str) -> String {
    // serde_json handles JSON string escaping rules already
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

fn write_value(out: &mut String, value: &JsonValue, indent: usize) {
    let pad = "  ".repeat(indent);
    let pad_inner = "  ".repeat(indent + 1);
    match value {
        JsonValue::Array(items) if !items.is_empty() => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&pad_inner);
                write_value(out, item, indent + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&pad);
            out.push(']');
        }
        JsonValue::Object(map) if !map.is_empty() => {
            out.push_str("{\n");
            for (i, (key, val)) in map.iter().enumerate() {
                out.push_str(&pad_inner);
                out.push_str(&escape_string(key));
                out.push_str(": ");
                write_value(out, val, indent + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&pad);
            out.push('}');
        }
        other => out.push_str(&other.to_string()),
    }
}
