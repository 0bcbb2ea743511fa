use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator tokens supported by the mutation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    /// All supported comparison tokens, in a fixed order.
    pub const ALL: [CmpOp; 10] = [
        CmpOp::Eq,
        CmpOp::NotEq,
        CmpOp::Lt,
        CmpOp::LtE,
        CmpOp::Gt,
        CmpOp::GtE,
        CmpOp::Is,
        CmpOp::IsNot,
        CmpOp::In,
        CmpOp::NotIn,
    ];

    /// Source-level spelling of the token.
    pub fn token(&self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::Is => "is",
            CmpOp::IsNot => "is not",
            CmpOp::In => "in",
            CmpOp::NotIn => "not in",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Boolean connective in a `BoolOp` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOpKind {
    And,
    Or,
}

/// Arithmetic operator in a `BinOp` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOpKind {
    Add,
    Sub,
}

/// A node in the syntax tree handed to the engine by an external parser.
///
/// The tree is a closed tagged variant: each kind carries only the fields the
/// operator catalog needs. Statement and expression kinds share one enum so a
/// single traversal can walk the whole tree uniformly.
///
/// Trees are immutable by convention: a mutation pass never updates a node in
/// place, it rebuilds the path from the root to the mutated node and shares
/// nothing mutable with the input. That is what makes running many passes over
/// the same input tree from independent threads safe without locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Root of a source unit.
    Module { body: Vec<Node> },

    // Statements
    While { test: Box<Node>, body: Vec<Node> },
    If { test: Box<Node>, body: Vec<Node>, orelse: Vec<Node> },
    Assign { target: String, value: Box<Node> },
    Expr { value: Box<Node> },
    Return { value: Option<Box<Node>> },
    Break,
    Continue,
    Pass,

    // Expressions
    Num { value: i64 },
    Bool { value: bool },
    Name { id: String },
    /// Chained comparison: `left ops[0] comparators[0] ops[1] comparators[1] …`
    ///
    /// A well-formed node has `ops.len() == comparators.len()` and at least
    /// one operator; traversal rejects anything else as a structural error.
    Compare {
        left: Box<Node>,
        ops: Vec<CmpOp>,
        comparators: Vec<Node>,
    },
    BoolOp { op: BoolOpKind, values: Vec<Node> },
    BinOp {
        left: Box<Node>,
        op: BinOpKind,
        right: Box<Node>,
    },
}

impl Node {
    /// Pre-order list of every node in the tree, root first.
    ///
    /// Used by the harness to diff an input tree against a mutant: two trees
    /// of equal shape linearize to lists of equal length, and a single-site
    /// mutation shows up as exactly one differing entry.
    pub fn linearize(&self) -> Vec<&Node> {
        let mut nodes = Vec::new();
        self.collect(&mut nodes);
        nodes
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        match self {
            Node::Module { body } => {
                for stmt in body {
                    stmt.collect(out);
                }
            }
            Node::While { test, body } => {
                test.collect(out);
                for stmt in body {
                    stmt.collect(out);
                }
            }
            Node::If { test, body, orelse } => {
                test.collect(out);
                for stmt in body {
                    stmt.collect(out);
                }
                for stmt in orelse {
                    stmt.collect(out);
                }
            }
            Node::Assign { value, .. } => value.collect(out),
            Node::Expr { value } => value.collect(out),
            Node::Return { value } => {
                if let Some(value) = value {
                    value.collect(out);
                }
            }
            Node::Compare {
                left, comparators, ..
            } => {
                left.collect(out);
                for comparator in comparators {
                    comparator.collect(out);
                }
            }
            Node::BoolOp { values, .. } => {
                for value in values {
                    value.collect(out);
                }
            }
            Node::BinOp { left, right, .. } => {
                left.collect(out);
                right.collect(out);
            }
            Node::Break
            | Node::Continue
            | Node::Pass
            | Node::Num { .. }
            | Node::Bool { .. }
            | Node::Name { .. } => {}
        }
    }

    /// Total number of nodes in the tree, this node included.
    pub fn node_count(&self) -> usize {
        self.linearize().len()
    }

    /// Shallow description of the node: its kind plus the scalar fields it
    /// owns, children excluded. Two trees that differ at a single mutated
    /// node differ in exactly one linearized summary, which is how the
    /// harness pinpoints the change.
    pub fn summary(&self) -> String {
        match self {
            Node::Module { .. } => "Module".to_string(),
            Node::While { .. } => "While".to_string(),
            Node::If { .. } => "If".to_string(),
            Node::Assign { target, .. } => format!("Assign({})", target),
            Node::Expr { .. } => "Expr".to_string(),
            Node::Return { .. } => "Return".to_string(),
            Node::Break => "Break".to_string(),
            Node::Continue => "Continue".to_string(),
            Node::Pass => "Pass".to_string(),
            Node::Num { value } => format!("Num({})", value),
            Node::Bool { value } => format!("Bool({})", value),
            Node::Name { id } => format!("Name({})", id),
            Node::Compare { ops, .. } => {
                let tokens: Vec<&str> = ops.iter().map(|op| op.token()).collect();
                format!("Compare({})", tokens.join(", "))
            }
            Node::BoolOp { op, .. } => format!("BoolOp({:?})", op),
            Node::BinOp { op, .. } => format!("BinOp({:?})", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linearize_preorder() {
        // while True: break
        let tree = Node::Module {
            body: vec![Node::While {
                test: Box::new(Node::Bool { value: true }),
                body: vec![Node::Break],
            }],
        };

        let nodes = tree.linearize();
        assert_eq!(nodes.len(), 4);
        assert!(matches!(nodes[0], Node::Module { .. }));
        assert!(matches!(nodes[1], Node::While { .. }));
        assert!(matches!(nodes[2], Node::Bool { value: true }));
        assert!(matches!(nodes[3], Node::Break));
    }

    #[test]
    fn test_node_count_compare_chain() {
        // x < y < 10
        let tree = Node::Compare {
            left: Box::new(Node::Name { id: "x".to_string() }),
            ops: vec![CmpOp::Lt, CmpOp::Lt],
            comparators: vec![
                Node::Name { id: "y".to_string() },
                Node::Num { value: 10 },
            ],
        };

        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_cmp_op_tokens_distinct() {
        for (i, a) in CmpOp::ALL.iter().enumerate() {
            for b in &CmpOp::ALL[i + 1..] {
                assert_ne!(a.token(), b.token());
            }
        }
    }
}
