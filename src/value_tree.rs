//! The in-memory value tree the [`crate::Parser`] builds as it consumes
//! table/array-of-table headers and key-value assignments (`spec.md` §3,
//! §4.4).
//!
//! The cursor is kept as a root-relative path of `(key, is_array_of_tables)`
//! steps rather than a direct pointer into the tree, per the design note in
//! `spec.md` §9: Rust's borrow checker will not let a struct hold a mutable
//! reference into its own `root` across repeated calls, so every mutation
//! re-walks the path from the top. The walk is O(depth), which is the same
//! cost the original paid for pointer bookkeeping.

use crate::value::{Table, Value};

#[derive(Default)]
pub(crate) struct ValueTree {
    root: Table,
    cursor: Vec<(String, bool)>,
    inline_stack: Vec<Vec<(String, bool)>>,
}

impl ValueTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_root(self) -> Table {
        self.root
    }

    /// Enter (creating as needed) the plain table named by `segments`,
    /// descending through any array-of-tables ancestor's last element.
    /// `is_array` flags, aligned to `segments`, mark which prefixes are
    /// registered array-of-tables.
    pub(crate) fn enter_table(&mut self, segments: &[String], is_array: &[bool]) {
        self.resolve_create(segments, is_array, false);
        self.cursor = segments
            .iter()
            .cloned()
            .zip(is_array.iter().copied())
            .collect();
    }

    /// Enter a *new* array-of-tables element named by `segments`, appending
    /// it to the array at that path (creating the array if this is its
    /// first element).
    pub(crate) fn enter_array_table(&mut self, segments: &[String], is_array: &[bool]) {
        self.resolve_create(segments, is_array, true);
        self.cursor = segments
            .iter()
            .cloned()
            .zip(is_array.iter().copied())
            .collect();
    }

    pub(crate) fn put(&mut self, key: &str, value: Value) {
        self.resolve_cursor_mut().insert(key, value);
    }

    pub(crate) fn begin_inline(&mut self, key: &str) {
        {
            let table = self.resolve_cursor_mut();
            if table.get(key).is_none() {
                table.insert(key, Value::Table(Table::new()));
            }
        }
        self.inline_stack.push(self.cursor.clone());
        self.cursor.push((key.to_string(), false));
    }

    pub(crate) fn end_inline(&mut self) {
        self.cursor = self.inline_stack.pop().unwrap_or_default();
    }

    fn resolve_cursor_mut(&mut self) -> &mut Table {
        let mut current = &mut self.root;
        for (seg, is_array) in &self.cursor {
            current = step_into(current, seg, *is_array);
        }
        current
    }

    fn resolve_create(&mut self, segments: &[String], is_array: &[bool], append_new_at_last: bool) {
        let mut current = &mut self.root;
        let last_index = segments.len().saturating_sub(1);
        for (i, seg) in segments.iter().enumerate() {
            if i == last_index && append_new_at_last {
                if current.get(seg).is_none() {
                    current.insert(seg.clone(), Value::Array(Vec::new()));
                }
                match current.get_mut(seg) {
                    Some(Value::Array(arr)) => arr.push(Value::Table(Table::new())),
                    _ => unreachable!("array-of-tables path must hold an array"),
                }
                current = step_into(current, seg, true);
            } else {
                if current.get(seg).is_none() {
                    let fresh = if is_array[i] {
                        Value::Array(vec![Value::Table(Table::new())])
                    } else {
                        Value::Table(Table::new())
                    };
                    current.insert(seg.clone(), fresh);
                }
                current = step_into(current, seg, is_array[i]);
            }
        }
    }
}

fn step_into<'a>(table: &'a mut Table, key: &str, is_array: bool) -> &'a mut Table {
    let entry = table.get_mut(key).expect("cursor/path segment must already exist");
    if is_array {
        match entry {
            Value::Array(arr) => arr
                .last_mut()
                .expect("array-of-tables never empty once created")
                .as_table_mut()
                .expect("array-of-tables element must be a table"),
            _ => unreachable!("array-of-tables path must hold an array"),
        }
    } else {
        entry.as_table_mut().expect("table path must hold a table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        path.split('.').map(|s| s.to_string()).collect()
    }

    #[test]
    fn put_at_root() {
        let mut tree = ValueTree::new();
        tree.put("a", Value::Integer(1));
        let root = tree.into_root();
        assert_eq!(root.get("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn nested_table_header() {
        let mut tree = ValueTree::new();
        tree.enter_table(&segs("a.b"), &[false, false]);
        tree.put("x", Value::Integer(1));
        let root = tree.into_root();
        let a = root.get("a").unwrap().as_table().unwrap();
        let b = a.get("b").unwrap().as_table().unwrap();
        assert_eq!(b.get("x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn array_of_tables_elements_are_distinct() {
        let mut tree = ValueTree::new();
        tree.enter_array_table(&segs("fruit"), &[true]);
        tree.put("name", Value::String("apple".into()));
        tree.enter_array_table(&segs("fruit"), &[true]);
        tree.put("name", Value::String("banana".into()));
        let root = tree.into_root();
        let fruit = root.get("fruit").unwrap().as_array().unwrap();
        assert_eq!(fruit.len(), 2);
        assert_eq!(
            fruit[0].as_table().unwrap().get("name"),
            Some(&Value::String("apple".into()))
        );
        assert_eq!(
            fruit[1].as_table().unwrap().get("name"),
            Some(&Value::String("banana".into()))
        );
    }

    #[test]
    fn inline_table_push_pop() {
        let mut tree = ValueTree::new();
        tree.begin_inline("point");
        tree.put("x", Value::Integer(1));
        tree.end_inline();
        tree.put("y", Value::Integer(2));
        let root = tree.into_root();
        assert_eq!(
            root.get("point").unwrap().as_table().unwrap().get("x"),
            Some(&Value::Integer(1))
        );
        assert_eq!(root.get("y"), Some(&Value::Integer(2)));
    }
}
