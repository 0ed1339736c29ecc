//! Global bookkeeping of declared keys, tables, array-of-tables, and
//! implicit-parent tables (`spec.md` §3, §4.3).
//!
//! Dotted names are carried as `Vec<String>` segments end to end rather than
//! joined-and-re-split strings, per `spec.md` §9's own design note: the
//! Parser already produces one token per key segment, so there is never a
//! need for the `%*%` escape-sentinel trick the original source used to
//! protect literal dots inside quoted segments.
//!
//! This also folds `spec.md`'s two scoping prefixes, `currentTable` and
//! `currentArrayOfTable`, into a single already-qualified `current_table`
//! path: `qualify` substitutes an array-of-tables' current index into a path
//! in one pass, so there is no need to track the array scope and the table
//! scope as separate strings to be concatenated at leaf-lookup time.

use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub(crate) struct KeyStore {
    /// Fully qualified (index-substituted) paths that have been bound to a
    /// value, including the existence of a table itself.
    keys: HashSet<Vec<String>>,
    /// Raw dotted names (as written in a header) declared via an explicit
    /// `[name]` header, anywhere in the document.
    tables_raw: HashSet<Vec<String>>,
    /// Raw dotted names declared via `[[name]]`, mapped to the 0-based index
    /// of the newest element.
    array_of_tables: HashMap<Vec<String>, usize>,
    /// Raw dotted names that are a proper prefix of some `[[name]]` header,
    /// and therefore cannot themselves later become an explicit array-of-
    /// tables or plain table (invariant I4).
    implicit_array_of_tables: HashSet<Vec<String>>,
    /// Already-qualified path of the table/array-element currently in
    /// scope for bare `k = v` assignments.
    current_table: Vec<String>,
    /// Saved `current_table` values, pushed on entering an inline table and
    /// popped on leaving one.
    inline_stack: Vec<Vec<String>>,
}

impl KeyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Substitute the current array-of-tables index into every prefix of
    /// `raw` that is a registered array-of-tables.
    fn qualify(&self, raw: &[String]) -> Vec<String> {
        let mut raw_prefix: Vec<String> = Vec::with_capacity(raw.len());
        let mut qualified: Vec<String> = Vec::with_capacity(raw.len());
        for seg in raw {
            raw_prefix.push(seg.clone());
            match self.array_of_tables.get(&raw_prefix) {
                Some(&idx) => qualified.push(format!("{}{}", seg, idx)),
                None => qualified.push(seg.clone()),
            }
        }
        qualified
    }

    fn leaf_path(&self, key: &str) -> Vec<String> {
        let mut path = self.current_table.clone();
        path.push(key.to_string());
        path
    }

    pub(crate) fn is_registered_as_table(&self, raw: &[String]) -> bool {
        self.tables_raw.contains(raw)
    }

    pub(crate) fn is_registered_as_array_table(&self, raw: &[String]) -> bool {
        self.array_of_tables.contains_key(raw)
    }

    pub(crate) fn is_table_implicit_from_array_table(&self, raw: &[String]) -> bool {
        self.implicit_array_of_tables.contains(raw)
    }

    pub(crate) fn is_valid_key(&self, key: &str) -> bool {
        !self.keys.contains(&self.leaf_path(key))
    }

    pub(crate) fn is_valid_inline_table(&self, key: &str) -> bool {
        self.is_valid_key(key)
    }

    pub(crate) fn is_valid_table_key(&self, raw: &[String]) -> bool {
        !self.is_registered_as_array_table(raw) && !self.keys.contains(&self.qualify(raw))
    }

    pub(crate) fn is_valid_array_table_key(&self, raw: &[String]) -> bool {
        self.is_registered_as_array_table(raw)
            || (!self.is_table_implicit_from_array_table(raw) && !self.is_registered_as_table(raw))
    }

    /// Register a bare `key = value` assignment in the current scope.
    /// Returns an error message naming the conflicting path on failure.
    pub(crate) fn add_key(&mut self, key: &str) -> Result<(), String> {
        if !self.is_valid_key(key) {
            return Err(format!("key '{}' is already defined", dotted(&self.leaf_path(key))));
        }
        self.keys.insert(self.leaf_path(key));
        Ok(())
    }

    /// Register a key that introduces an inline table, and descend the
    /// scope into it. The caller must call [`KeyStore::exit_inline`] once
    /// the inline table's closing `}` is reached.
    pub(crate) fn add_inline_table_key(&mut self, key: &str) -> Result<(), String> {
        if !self.is_valid_inline_table(key) {
            return Err(format!("key '{}' is already defined", dotted(&self.leaf_path(key))));
        }
        let full = self.leaf_path(key);
        self.keys.insert(full.clone());
        self.inline_stack.push(self.current_table.clone());
        self.current_table = full;
        Ok(())
    }

    pub(crate) fn exit_inline(&mut self) {
        self.current_table = self.inline_stack.pop().unwrap_or_default();
    }

    /// Register an explicit `[name]` table header and reposition the
    /// current scope to it. `raw` is the header's dotted segments exactly
    /// as parsed.
    pub(crate) fn add_table_key(&mut self, raw: Vec<String>) -> Result<(), String> {
        if !self.is_valid_table_key(&raw) {
            return Err(format!(
                "table '{}' conflicts with a previous declaration",
                dotted(&raw)
            ));
        }
        let qualified = self.qualify(&raw);
        self.keys.insert(qualified.clone());
        self.tables_raw.insert(raw);
        self.current_table = qualified;
        Ok(())
    }

    /// Register an `[[name]]` array-of-tables header, appending a new
    /// element and repositioning the current scope to it.
    pub(crate) fn add_array_table_key(&mut self, raw: Vec<String>) -> Result<(), String> {
        if !self.is_valid_array_table_key(&raw) {
            return Err(format!(
                "'{}' conflicts with a previous table/array-of-tables declaration",
                dotted(&raw)
            ));
        }
        let new_index = self.array_of_tables.get(&raw).map_or(0, |&v| v + 1);
        let (parent, last) = raw.split_at(raw.len() - 1);
        let mut qualified = self.qualify(parent);
        qualified.push(format!("{}{}", last[0], new_index));

        self.array_of_tables.insert(raw.clone(), new_index);
        for i in 1..raw.len() {
            self.implicit_array_of_tables.insert(raw[..i].to_vec());
        }
        self.keys.insert(qualified.clone());
        self.current_table = qualified;
        Ok(())
    }

    /// Whether `raw` (a proper prefix built while walking a header's
    /// segments) names a registered array-of-tables, used by the Parser to
    /// tell the [`crate::ValueTree`] when to descend into an array's last
    /// element rather than a plain sub-table.
    pub(crate) fn array_prefix_flags(&self, raw: &[String]) -> Vec<bool> {
        let mut prefix = Vec::with_capacity(raw.len());
        raw.iter()
            .map(|seg| {
                prefix.push(seg.clone());
                self.array_of_tables.contains_key(&prefix)
            })
            .collect()
    }
}

fn dotted(segments: &[String]) -> String {
    segments.join(".")
}
