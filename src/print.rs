//! Debug tree-printing for a parsed [`Value`], mirroring `lang-pt`'s
//! `ASTNode::print` (`src/ast_node.rs`), which implements `ptree::TreeItem`
//! over its own AST node type.

use ptree::TreeItem;
use std::borrow::Cow;

use crate::Value;

impl TreeItem for Value {
    type Child = (String, Value);

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            Value::Table(_) => write!(f, "table"),
            Value::Array(_) => write!(f, "array"),
            other => write!(f, "{:?}", other),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            Value::Table(t) => Cow::from(
                t.iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect::<Vec<_>>(),
            ),
            Value::Array(a) => Cow::from(
                a.iter()
                    .enumerate()
                    .map(|(i, v)| (format!("[{}]", i), v.clone()))
                    .collect::<Vec<_>>(),
            ),
            _ => Cow::from(Vec::new()),
        }
    }
}

impl TreeItem for (String, Value) {
    type Child = (String, Value);

    fn write_self<W: std::io::Write>(&self, f: &mut W, style: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{} = ", self.0)?;
        self.1.write_self(f, style)
    }

    fn children(&self) -> Cow<[Self::Child]> {
        self.1.children()
    }
}

impl Value {
    /// Print the value tree to stdout, for ad hoc debugging. Not used by
    /// the Parser/Builder themselves; exposed for consumers the way
    /// `lang-pt` exposes `ASTNode::print`.
    pub fn print_tree(&self) -> std::io::Result<()> {
        ptree::print_tree(self)
    }
}
