//! The [`Value`] tree produced by the [`crate::Parser`] and consumed by the
//! [`crate::Builder`], plus the [`Datetime`] scalar and the insertion-ordered
//! [`Table`] container.

use std::fmt::{Debug, Formatter};

/// A ZCONF date-time value (TOML v0.4.0's date-time type): a calendar date,
/// optionally followed by a time-of-day and an optional UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datetime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub time: Option<Time>,
}

/// The time-of-day part of a [`Datetime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub micros: u32,
    /// Offset from UTC in minutes. `Some(0)` means the lexeme carried an
    /// explicit `Z`/`+00:00`; `None` means no offset was present at all.
    pub offset_minutes: Option<i32>,
}

impl Datetime {
    /// Render in the Builder's canonical Zulu form, `YYYY-MM-DDTHH:MM:SSZ`,
    /// per `spec.md` §4.6 (the Builder always normalizes to Zulu regardless
    /// of the offset the value was parsed with).
    pub fn to_zulu_string(&self) -> String {
        match self.time {
            Some(t) => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, t.hour, t.minute, t.second
            ),
            None => format!("{:04}-{:02}-{:02}", self.year, self.month, self.day),
        }
    }
}

/// An ordered, tagged configuration value.
#[derive(Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Datetime(Datetime),
    Array(Vec<Value>),
    Table(Table),
}

/// The tag used for array-homogeneity checks (invariant I5): nested arrays
/// and scalars of differing kinds never share a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTag {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Datetime,
    Array,
    Table,
}

impl Value {
    pub fn tag(&self) -> ValueTag {
        match self {
            Value::Null => ValueTag::Null,
            Value::Bool(_) => ValueTag::Bool,
            Value::Integer(_) => ValueTag::Integer,
            Value::Float(_) => ValueTag::Float,
            Value::String(_) => ValueTag::String,
            Value::Datetime(_) => ValueTag::Datetime,
            Value::Array(_) => ValueTag::Array,
            Value::Table(_) => ValueTag::Table,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Datetime(d) => write!(f, "{}", d.to_zulu_string()),
            Value::Array(a) => f.debug_list().entries(a).finish(),
            Value::Table(t) => f.debug_map().entries(t.iter().map(|(k, v)| (k, v))).finish(),
        }
    }
}

/// An insertion-ordered mapping from non-empty string keys to [`Value`]s.
///
/// Implemented as a flat `Vec` of entries plus a `HashMap` index rather than
/// reaching for an external ordered-map crate, matching `lang-pt`'s own
/// preference for small purpose-built containers (`FieldTree`,
/// `WrapperIndex`) over generic dependencies.
#[derive(Clone, Default)]
pub struct Table {
    entries: Vec<(String, Value)>,
    index: std::collections::HashMap<String, usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Insert or overwrite the value at `key`, preserving the position of an
    /// existing entry. Uniqueness of *new* keys across the whole document is
    /// the [`crate::KeyStore`]'s job, not this container's; this method is
    /// used both for first insertion and for re-entering an already-created
    /// implicit parent table.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Debug for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
