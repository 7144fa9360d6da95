// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell values and their types.

extern crate alloc;

use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};

/// The type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Categorical text label (country, continent, ...).
    Label,
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
}

impl DataType {
    /// Returns `true` for `Int` and `Float`.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Label => "label",
            Self::Int => "int",
            Self::Float => "float",
        })
    }
}

/// A single cell value.
///
/// Values are usable as group keys: floats hash and compare by their total order, with `-0.0`
/// folded into `0.0` and every NaN treated as the same value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Categorical label.
    Label(String),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
}

impl Value {
    /// Returns the type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Label(_) => DataType::Label,
            Self::Int(_) => DataType::Int,
            Self::Float(_) => DataType::Float,
        }
    }

    /// Returns the label, if this is a [`Value::Label`].
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `f64` for numeric values.
    ///
    /// Integers are widened; labels return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Label(_) => None,
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
        }
    }

}

fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Label(a), Self::Label(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => canonical(*a).to_bits() == canonical(*b).to_bits(),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Label(s) => s.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => canonical(*v).to_bits().hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => {
                if let Some(precision) = f.precision() {
                    write!(f, "{v:.precision$}")
                } else {
                    write!(f, "{v}")
                }
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Label(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::hash::BuildHasher;

    use super::*;

    #[test]
    fn float_keys_fold_signed_zero_and_nan() {
        let hasher = hashbrown::DefaultHashBuilder::default();
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(
            hasher.hash_one(Value::Float(0.0)),
            hasher.hash_one(Value::Float(-0.0))
        );
        assert_eq!(Value::Float(f64::NAN), Value::Float(-f64::NAN));
        assert_eq!(
            hasher.hash_one(Value::Float(f64::NAN)),
            hasher.hash_one(Value::Float(-f64::NAN))
        );
    }

    #[test]
    fn int_and_float_are_distinct_keys() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Int(1).as_f64(), Some(1.0));
        assert_eq!(Value::from("a").as_f64(), None);
    }

    #[test]
    fn float_display_honors_precision() {
        assert_eq!(std::format!("{:.2}", Value::Float(1.0 / 3.0)), "0.33");
        assert_eq!(std::format!("{:.2}", Value::Int(7)), "7");
    }
}
