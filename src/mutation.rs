use crate::ast::Node;
use crate::core::{ActivationCore, ActivationRecord, CountingCore};
use crate::error::Result;
use crate::operators::Operator;
use crate::visit::MutationVisitor;

/// Apply `operator` to the `occurrence`-th eligible site of `tree`.
///
/// Returns the resulting tree and the activation record. A `None` record
/// means the pass was a no-op: the tree had fewer than `occurrence + 1`
/// eligible sites and the result is identical to the input. A negative
/// `occurrence` is rejected with `InvalidIndex`.
pub fn apply_mutation(
    operator: &dyn Operator,
    occurrence: i64,
    tree: &Node,
) -> Result<(Node, Option<ActivationRecord>)> {
    let mut core = ActivationCore::new(occurrence)?;
    let mutant = MutationVisitor::new(operator, &mut core).visit(tree)?;

    let record = core.activation_record().cloned();
    tracing::debug!(
        operator = %operator.name(),
        occurrence,
        activated = record.is_some(),
        "Mutation pass finished"
    );
    Ok((mutant, record))
}

/// Count the eligible sites `operator` finds in `tree`, without mutating.
///
/// Runs the identical traversal as [`apply_mutation`] with a counting core,
/// so the count equals the number of occurrence indices that would yield a
/// mutant. The harness uses this to bound the indices it schedules.
pub fn count_mutation_sites(operator: &dyn Operator, tree: &Node) -> Result<usize> {
    let mut core = CountingCore::new();
    MutationVisitor::new(operator, &mut core).visit(tree)?;

    tracing::debug!(
        operator = %operator.name(),
        count = core.count,
        "Counting pass finished"
    );
    Ok(core.count)
}
