//! Cell values, scalar type classification, and coercion

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Scalar kind inferred for a cell or a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Int,
    Float,
    Bool,
    Str,
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellType::Int => write!(f, "int"),
            CellType::Float => write!(f, "float"),
            CellType::Bool => write!(f, "bool"),
            CellType::Str => write!(f, "str"),
        }
    }
}

/// A dynamically typed cell value.
///
/// Untagged serialization keeps typed values typed across a JSON round
/// trip: an `Int(42)` is written as `42` and read back as `Int(42)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Str(a), CellValue::Str(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Render the value for display and width accounting.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("None"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::Str(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Decide which scalar kind this value represents.
    ///
    /// String values try an integer parse, then a float parse, and fall
    /// back to string; the literals `"True"` and `"False"` stay strings,
    /// so a boolean column is only ever reachable through explicit
    /// coercion. `Null` classifies as string, and `Bool` as int (the
    /// integer probe succeeds on a boolean).
    pub fn classify(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Str,
            CellValue::Bool(_) => CellType::Int,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::Str(s) => classify_str(s),
        }
    }

    /// Convert the value to the target kind.
    ///
    /// Numeric targets fail with [`TableError::TypeCoercion`] on
    /// non-numeric input. The bool target never fails: any non-empty
    /// string coerces to `true`, including `"False"` and `"0"`.
    pub fn coerce(&self, target: CellType) -> Result<CellValue> {
        match target {
            CellType::Int => self.coerce_int().map(CellValue::Int),
            CellType::Float => self.coerce_float().map(CellValue::Float),
            CellType::Bool => Ok(CellValue::Bool(self.coerce_bool())),
            CellType::Str => Ok(CellValue::Str(self.display().into_owned())),
        }
    }

    fn coerce_int(&self) -> Result<i64> {
        match self {
            CellValue::Int(i) => Ok(*i),
            CellValue::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            CellValue::Bool(b) => Ok(*b as i64),
            CellValue::Str(s) => s
                .parse::<i64>()
                .map_err(|_| self.coercion_error(CellType::Int)),
            _ => Err(self.coercion_error(CellType::Int)),
        }
    }

    fn coerce_float(&self) -> Result<f64> {
        match self {
            CellValue::Int(i) => Ok(*i as f64),
            CellValue::Float(f) => Ok(*f),
            CellValue::Bool(b) => Ok(*b as i64 as f64),
            CellValue::Str(s) => s
                .parse::<f64>()
                .map_err(|_| self.coercion_error(CellType::Float)),
            CellValue::Null => Err(self.coercion_error(CellType::Float)),
        }
    }

    fn coerce_bool(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0,
            CellValue::Str(s) => !s.is_empty(),
        }
    }

    fn coercion_error(&self, target: CellType) -> TableError {
        TableError::TypeCoercion {
            value: self.display().into_owned(),
            target,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Str(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Str(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Classify a raw text value: integer parse, float parse, else string.
pub fn classify_str(s: &str) -> CellType {
    if s == "True" || s == "False" {
        return CellType::Str;
    }
    if s.parse::<i64>().is_ok() {
        return CellType::Int;
    }
    if s.parse::<f64>().is_ok() {
        return CellType::Float;
    }
    CellType::Str
}

/// Infer the type of a whole column: unanimous classification wins,
/// any disagreement (or an empty column) yields string.
pub fn infer_column_type<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> CellType {
    let mut seen: Option<CellType> = None;
    for value in values {
        let kind = value.classify();
        match seen {
            None => seen = Some(kind),
            Some(k) if k == kind => {}
            Some(_) => return CellType::Str,
        }
    }
    seen.unwrap_or(CellType::Str)
}
