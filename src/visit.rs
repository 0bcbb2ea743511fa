use crate::ast::Node;
use crate::core::{MutationCore, MutationSite};
use crate::error::{MutationError, Result};
use crate::operators::Operator;

/// Depth-first traversal binding one operator to one core for a single pass.
///
/// Visits every node exactly once in source order. At each node the bound
/// operator reports its eligible sites; the core is consulted once per site,
/// and the first authorization rewrites that node and stops the descent.
/// Everything else is rebuilt from recursively visited children, so a pass
/// with no activation returns a tree identical to the input.
pub struct MutationVisitor<'a, C: MutationCore> {
    operator: &'a dyn Operator,
    core: &'a mut C,
    path: Vec<usize>,
}

impl<'a, C: MutationCore> MutationVisitor<'a, C> {
    pub fn new(operator: &'a dyn Operator, core: &'a mut C) -> Self {
        MutationVisitor {
            operator,
            core,
            path: Vec::new(),
        }
    }

    /// Walk the tree, rewriting at most one node. The input is never modified;
    /// the result shares no mutable state with it.
    pub fn visit(&mut self, node: &Node) -> Result<Node> {
        self.check(node)?;

        for site in 0..self.operator.sites(node) {
            let record = MutationSite {
                operator: self.operator.name(),
                path: self.path.clone(),
                description: self.operator.describe(node, site),
            };
            if self.core.visit_mutation_site(record) {
                // Children are preserved verbatim; once activated, the core
                // refuses every later site, so there is nothing left to find
                // below this node.
                return Ok(self.operator.rewrite(node, site));
            }
        }

        self.walk(node)
    }

    fn child(&mut self, index: usize, node: &Node) -> Result<Node> {
        self.path.push(index);
        let result = self.visit(node);
        self.path.pop();
        result
    }

    fn children(&mut self, base: usize, nodes: &[Node]) -> Result<Vec<Node>> {
        nodes
            .iter()
            .enumerate()
            .map(|(i, node)| self.child(base + i, node))
            .collect()
    }

    /// Shape checks for the node's own fields. Child shapes are checked when
    /// the walk reaches them.
    fn check(&self, node: &Node) -> Result<()> {
        match node {
            Node::Compare {
                ops, comparators, ..
            } => {
                if ops.is_empty() {
                    return Err(MutationError::Structural(
                        "comparison without operators".to_string(),
                    ));
                }
                if ops.len() != comparators.len() {
                    return Err(MutationError::Structural(format!(
                        "comparison with {} operators but {} comparators",
                        ops.len(),
                        comparators.len()
                    )));
                }
            }
            Node::BoolOp { values, .. } => {
                if values.len() < 2 {
                    return Err(MutationError::Structural(format!(
                        "boolean expression with {} operands",
                        values.len()
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn walk(&mut self, node: &Node) -> Result<Node> {
        let rebuilt = match node {
            Node::Module { body } => Node::Module {
                body: self.children(0, body)?,
            },
            Node::While { test, body } => Node::While {
                test: Box::new(self.child(0, test)?),
                body: self.children(1, body)?,
            },
            Node::If { test, body, orelse } => Node::If {
                test: Box::new(self.child(0, test)?),
                body: self.children(1, body)?,
                orelse: self.children(1 + body.len(), orelse)?,
            },
            Node::Assign { target, value } => Node::Assign {
                target: target.clone(),
                value: Box::new(self.child(0, value)?),
            },
            Node::Expr { value } => Node::Expr {
                value: Box::new(self.child(0, value)?),
            },
            Node::Return { value } => Node::Return {
                value: match value {
                    Some(value) => Some(Box::new(self.child(0, value)?)),
                    None => None,
                },
            },
            Node::Compare {
                left,
                ops,
                comparators,
            } => Node::Compare {
                left: Box::new(self.child(0, left)?),
                ops: ops.clone(),
                comparators: self.children(1, comparators)?,
            },
            Node::BoolOp { op, values } => Node::BoolOp {
                op: *op,
                values: self.children(0, values)?,
            },
            Node::BinOp { left, op, right } => Node::BinOp {
                left: Box::new(self.child(0, left)?),
                op: *op,
                right: Box::new(self.child(1, right)?),
            },
            Node::Break => Node::Break,
            Node::Continue => Node::Continue,
            Node::Pass => Node::Pass,
            Node::Num { value } => Node::Num { value: *value },
            Node::Bool { value } => Node::Bool { value: *value },
            Node::Name { id } => Node::Name { id: id.clone() },
        };
        Ok(rebuilt)
    }
}
