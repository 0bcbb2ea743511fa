use crate::ast::{BinOpKind, BoolOpKind, CmpOp, Node};

/// Fixed delta applied by [`NumberReplacer`]. The exact perturbation is a
/// policy choice; what matters is that it is nonzero and deterministic.
pub const NUMBER_DELTA: i64 = 1;

/// Fixed substitution table for relational operators. Total over the
/// supported token set: every token maps to exactly one other token.
pub const RELATIONAL_TABLE: [(CmpOp, CmpOp); 10] = [
    (CmpOp::Eq, CmpOp::NotEq),
    (CmpOp::NotEq, CmpOp::Eq),
    (CmpOp::Lt, CmpOp::GtE),
    (CmpOp::LtE, CmpOp::Gt),
    (CmpOp::Gt, CmpOp::LtE),
    (CmpOp::GtE, CmpOp::Lt),
    (CmpOp::Is, CmpOp::IsNot),
    (CmpOp::IsNot, CmpOp::Is),
    (CmpOp::In, CmpOp::NotIn),
    (CmpOp::NotIn, CmpOp::In),
];

/// A mutation operator: a node-shape predicate plus a rewrite.
///
/// Operators are stateless with respect to tree content; all per-pass state
/// lives in the bound core. `sites` reports how many eligible mutation sites
/// a single node contains — zero for non-targets, and possibly more than one
/// for nodes carrying several mutable tokens (a chained comparison). The
/// traversal consults the core once per reported site, in order, and calls
/// `rewrite` with the authorized site index.
pub trait Operator {
    fn name(&self) -> String;

    /// Number of eligible sites in this node alone (children not included).
    fn sites(&self, node: &Node) -> usize;

    /// Rewrite the node at the given site. Must preserve arity: the result
    /// occupies the same structural position and keeps every child verbatim.
    fn rewrite(&self, node: &Node, site: usize) -> Node;

    /// Human-readable summary of the rewrite at the given site.
    fn describe(&self, node: &Node, site: usize) -> String;
}

/// Flips boolean literals: `True <-> False`.
#[derive(Debug, Default)]
pub struct BooleanReplacer;

impl Operator for BooleanReplacer {
    fn name(&self) -> String {
        "boolean-replacer".to_string()
    }

    fn sites(&self, node: &Node) -> usize {
        matches!(node, Node::Bool { .. }) as usize
    }

    fn rewrite(&self, node: &Node, _site: usize) -> Node {
        match node {
            Node::Bool { value } => Node::Bool { value: !value },
            other => other.clone(),
        }
    }

    fn describe(&self, node: &Node, _site: usize) -> String {
        match node {
            Node::Bool { value } => format!("{} -> {}", value, !value),
            _ => String::new(),
        }
    }
}

/// Perturbs numeric literals by a fixed nonzero delta.
#[derive(Debug, Default)]
pub struct NumberReplacer;

impl Operator for NumberReplacer {
    fn name(&self) -> String {
        "number-replacer".to_string()
    }

    fn sites(&self, node: &Node) -> usize {
        matches!(node, Node::Num { .. }) as usize
    }

    fn rewrite(&self, node: &Node, _site: usize) -> Node {
        match node {
            Node::Num { value } => Node::Num {
                value: value.wrapping_add(NUMBER_DELTA),
            },
            other => other.clone(),
        }
    }

    fn describe(&self, node: &Node, _site: usize) -> String {
        match node {
            Node::Num { value } => format!("{} -> {}", value, value.wrapping_add(NUMBER_DELTA)),
            _ => String::new(),
        }
    }
}

/// Replaces `break` statements with `continue`.
#[derive(Debug, Default)]
pub struct ReplaceBreakWithContinue;

impl Operator for ReplaceBreakWithContinue {
    fn name(&self) -> String {
        "replace-break-with-continue".to_string()
    }

    fn sites(&self, node: &Node) -> usize {
        matches!(node, Node::Break) as usize
    }

    fn rewrite(&self, _node: &Node, _site: usize) -> Node {
        Node::Continue
    }

    fn describe(&self, _node: &Node, _site: usize) -> String {
        "break -> continue".to_string()
    }
}

/// Replaces `continue` statements with `break`.
#[derive(Debug, Default)]
pub struct ReplaceContinueWithBreak;

impl Operator for ReplaceContinueWithBreak {
    fn name(&self) -> String {
        "replace-continue-with-break".to_string()
    }

    fn sites(&self, node: &Node) -> usize {
        matches!(node, Node::Continue) as usize
    }

    fn rewrite(&self, _node: &Node, _site: usize) -> Node {
        Node::Break
    }

    fn describe(&self, _node: &Node, _site: usize) -> String {
        "continue -> break".to_string()
    }
}

/// Substitutes one relational operator token for another, per
/// [`RELATIONAL_TABLE`]. Each matching token in a comparison chain is a
/// separate mutation site.
#[derive(Debug, Clone, Copy)]
pub struct RelationalReplacer {
    pub from: CmpOp,
    pub to: CmpOp,
}

impl RelationalReplacer {
    /// Replacer for the table entry keyed by `from`.
    pub fn new(from: CmpOp) -> Self {
        // The table is total, so the lookup always succeeds.
        let (_, to) = RELATIONAL_TABLE
            .iter()
            .find(|(key, _)| *key == from)
            .copied()
            .unwrap_or((from, from));
        RelationalReplacer { from, to }
    }

    /// One replacer per table entry.
    pub fn all() -> Vec<RelationalReplacer> {
        RELATIONAL_TABLE
            .iter()
            .map(|(from, to)| RelationalReplacer {
                from: *from,
                to: *to,
            })
            .collect()
    }

    fn rewrite_ops(&self, ops: &[CmpOp], site: usize) -> Vec<CmpOp> {
        let mut ops = ops.to_vec();
        let mut seen = 0;
        for op in ops.iter_mut() {
            if *op == self.from {
                if seen == site {
                    *op = self.to;
                    break;
                }
                seen += 1;
            }
        }
        ops
    }
}

impl Operator for RelationalReplacer {
    fn name(&self) -> String {
        format!("relational-replacer({} -> {})", self.from, self.to)
    }

    fn sites(&self, node: &Node) -> usize {
        match node {
            Node::Compare { ops, .. } => ops.iter().filter(|op| **op == self.from).count(),
            _ => 0,
        }
    }

    fn rewrite(&self, node: &Node, site: usize) -> Node {
        match node {
            Node::Compare {
                left,
                ops,
                comparators,
            } => Node::Compare {
                left: left.clone(),
                ops: self.rewrite_ops(ops, site),
                comparators: comparators.clone(),
            },
            other => other.clone(),
        }
    }

    fn describe(&self, _node: &Node, _site: usize) -> String {
        format!("{} -> {}", self.from, self.to)
    }
}

/// Swaps the connective of a boolean expression: `and <-> or`.
#[derive(Debug, Clone, Copy)]
pub struct BoolOpReplacer {
    pub from: BoolOpKind,
    pub to: BoolOpKind,
}

impl BoolOpReplacer {
    pub fn and_to_or() -> Self {
        BoolOpReplacer {
            from: BoolOpKind::And,
            to: BoolOpKind::Or,
        }
    }

    pub fn or_to_and() -> Self {
        BoolOpReplacer {
            from: BoolOpKind::Or,
            to: BoolOpKind::And,
        }
    }
}

impl Operator for BoolOpReplacer {
    fn name(&self) -> String {
        match self.from {
            BoolOpKind::And => "replace-and-with-or".to_string(),
            BoolOpKind::Or => "replace-or-with-and".to_string(),
        }
    }

    fn sites(&self, node: &Node) -> usize {
        matches!(node, Node::BoolOp { op, .. } if *op == self.from) as usize
    }

    fn rewrite(&self, node: &Node, _site: usize) -> Node {
        match node {
            Node::BoolOp { values, .. } => Node::BoolOp {
                op: self.to,
                values: values.clone(),
            },
            other => other.clone(),
        }
    }

    fn describe(&self, _node: &Node, _site: usize) -> String {
        match self.from {
            BoolOpKind::And => "and -> or".to_string(),
            BoolOpKind::Or => "or -> and".to_string(),
        }
    }
}

/// Swaps additive arithmetic operators: `+ <-> -`.
#[derive(Debug, Clone, Copy)]
pub struct BinOpReplacer {
    pub from: BinOpKind,
    pub to: BinOpKind,
}

impl BinOpReplacer {
    pub fn add_to_sub() -> Self {
        BinOpReplacer {
            from: BinOpKind::Add,
            to: BinOpKind::Sub,
        }
    }

    pub fn sub_to_add() -> Self {
        BinOpReplacer {
            from: BinOpKind::Sub,
            to: BinOpKind::Add,
        }
    }
}

impl Operator for BinOpReplacer {
    fn name(&self) -> String {
        match self.from {
            BinOpKind::Add => "replace-add-with-sub".to_string(),
            BinOpKind::Sub => "replace-sub-with-add".to_string(),
        }
    }

    fn sites(&self, node: &Node) -> usize {
        matches!(node, Node::BinOp { op, .. } if *op == self.from) as usize
    }

    fn rewrite(&self, node: &Node, _site: usize) -> Node {
        match node {
            Node::BinOp { left, right, .. } => Node::BinOp {
                left: left.clone(),
                op: self.to,
                right: right.clone(),
            },
            other => other.clone(),
        }
    }

    fn describe(&self, _node: &Node, _site: usize) -> String {
        match self.from {
            BinOpKind::Add => "+ -> -".to_string(),
            BinOpKind::Sub => "- -> +".to_string(),
        }
    }
}

/// The full operator catalog, one boxed instance per operator.
pub fn all_operators() -> Vec<Box<dyn Operator>> {
    let mut operators: Vec<Box<dyn Operator>> = vec![
        Box::new(BooleanReplacer),
        Box::new(NumberReplacer),
        Box::new(ReplaceBreakWithContinue),
        Box::new(ReplaceContinueWithBreak),
        Box::new(BoolOpReplacer::and_to_or()),
        Box::new(BoolOpReplacer::or_to_and()),
        Box::new(BinOpReplacer::add_to_sub()),
        Box::new(BinOpReplacer::sub_to_add()),
    ];
    for replacer in RelationalReplacer::all() {
        operators.push(Box::new(replacer));
    }
    operators
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relational_table_is_total() {
        for op in CmpOp::ALL {
            let entries: Vec<_> = RELATIONAL_TABLE
                .iter()
                .filter(|(from, _)| *from == op)
                .collect();
            assert_eq!(entries.len(), 1, "{} must map to exactly one token", op);
            assert_ne!(entries[0].1, op, "{} must not map to itself", op);
        }
    }

    #[test]
    fn test_boolean_replacer_flips_value() {
        let op = BooleanReplacer;
        let node = Node::Bool { value: true };

        assert_eq!(op.sites(&node), 1);
        assert_eq!(op.rewrite(&node, 0), Node::Bool { value: false });
        assert_eq!(op.describe(&node, 0), "true -> false");
    }

    #[test]
    fn test_number_replacer_is_deterministic() {
        let op = NumberReplacer;
        let node = Node::Num { value: 1 };

        let first = op.rewrite(&node, 0);
        let second = op.rewrite(&node, 0);
        assert_eq!(first, Node::Num { value: 2 });
        assert_eq!(first, second);
    }

    #[test]
    fn test_number_replacer_not_self_inverse() {
        let op = NumberReplacer;
        let node = Node::Num { value: 1 };

        let once = op.rewrite(&node, 0);
        let twice = op.rewrite(&once, 0);
        assert_ne!(twice, node);
    }

    #[test]
    fn test_break_continue_swap() {
        assert_eq!(
            ReplaceBreakWithContinue.rewrite(&Node::Break, 0),
            Node::Continue
        );
        assert_eq!(
            ReplaceContinueWithBreak.rewrite(&Node::Continue, 0),
            Node::Break
        );
        assert_eq!(ReplaceBreakWithContinue.sites(&Node::Continue), 0);
        assert_eq!(ReplaceContinueWithBreak.sites(&Node::Break), 0);
    }

    #[test]
    fn test_relational_replacer_chain_sites() {
        // x < y < 10: two sites for the Lt replacer
        let node = Node::Compare {
            left: Box::new(Node::Name { id: "x".to_string() }),
            ops: vec![CmpOp::Lt, CmpOp::Lt],
            comparators: vec![
                Node::Name { id: "y".to_string() },
                Node::Num { value: 10 },
            ],
        };

        let op = RelationalReplacer::new(CmpOp::Lt);
        assert_eq!(op.sites(&node), 2);

        // Rewriting site 1 leaves site 0 untouched.
        let mutant = op.rewrite(&node, 1);
        match &mutant {
            Node::Compare { ops, .. } => {
                assert_eq!(ops, &vec![CmpOp::Lt, CmpOp::GtE]);
            }
            other => panic!("expected Compare, got {:?}", other),
        }
    }

    #[test]
    fn test_relational_replacer_keeps_operands() {
        let node = Node::Compare {
            left: Box::new(Node::Name { id: "x".to_string() }),
            ops: vec![CmpOp::Eq],
            comparators: vec![Node::Num { value: 1 }],
        };

        let mutant = RelationalReplacer::new(CmpOp::Eq).rewrite(&node, 0);
        match &mutant {
            Node::Compare {
                left,
                ops,
                comparators,
            } => {
                assert_eq!(**left, Node::Name { id: "x".to_string() });
                assert_eq!(ops, &vec![CmpOp::NotEq]);
                assert_eq!(comparators, &vec![Node::Num { value: 1 }]);
            }
            other => panic!("expected Compare, got {:?}", other),
        }
    }

    #[test]
    fn test_bool_op_replacer() {
        let node = Node::BoolOp {
            op: BoolOpKind::And,
            values: vec![
                Node::Name { id: "a".to_string() },
                Node::Name { id: "b".to_string() },
            ],
        };

        let op = BoolOpReplacer::and_to_or();
        assert_eq!(op.sites(&node), 1);
        assert_eq!(BoolOpReplacer::or_to_and().sites(&node), 0);

        match op.rewrite(&node, 0) {
            Node::BoolOp { op, values } => {
                assert_eq!(op, BoolOpKind::Or);
                assert_eq!(values.len(), 2);
            }
            other => panic!("expected BoolOp, got {:?}", other),
        }
    }

    #[test]
    fn test_bin_op_replacer() {
        let node = Node::BinOp {
            left: Box::new(Node::Num { value: 1 }),
            op: BinOpKind::Add,
            right: Box::new(Node::Num { value: 2 }),
        };

        let op = BinOpReplacer::add_to_sub();
        assert_eq!(op.sites(&node), 1);
        match op.rewrite(&node, 0) {
            Node::BinOp { op, .. } => assert_eq!(op, BinOpKind::Sub),
            other => panic!("expected BinOp, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let operators = all_operators();
        assert_eq!(operators.len(), 18);

        let mut names: Vec<String> = operators.iter().map(|op| op.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 18);
    }
}
