use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Block, BlockId, Containment};

/// A structural rule broken somewhere in a block tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("block id {0} appears more than once")]
    DuplicateId(BlockId),
    #[error("block {id} has order {found}, expected {expected}")]
    OrderMismatch {
        id: BlockId,
        expected: usize,
        found: usize,
    },
    #[error("block {id} has {found} slots, expected {expected}")]
    SlotCountMismatch {
        id: BlockId,
        expected: usize,
        found: usize,
    },
    #[error("leaf block {0} holds nested blocks")]
    LeafWithSlots(BlockId),
}

/// Every violation found in `blocks`, in depth-first order.
///
/// A tree produced by the codec or the mutator always checks clean.
pub fn check_invariants(blocks: &[Block]) -> Vec<InvariantViolation> {
    let mut seen = HashSet::new();
    let mut violations = Vec::new();
    check_list(blocks, &mut seen, &mut violations);
    violations
}

fn check_list<'a>(
    blocks: &'a [Block],
    seen: &mut HashSet<&'a BlockId>,
    violations: &mut Vec<InvariantViolation>,
) {
    for (position, block) in blocks.iter().enumerate() {
        if !seen.insert(&block.id) {
            violations.push(InvariantViolation::DuplicateId(block.id.clone()));
        }
        if block.order != position {
            violations.push(InvariantViolation::OrderMismatch {
                id: block.id.clone(),
                expected: position,
                found: block.order,
            });
        }

        let expected_slots = match block.containment() {
            Containment::None => 0,
            Containment::Children => 1,
            Containment::ColumnSlots => block.content.column_count().unwrap_or(1),
        };
        if block.slots.len() != expected_slots {
            if expected_slots == 0 {
                violations.push(InvariantViolation::LeafWithSlots(block.id.clone()));
            } else {
                violations.push(InvariantViolation::SlotCountMismatch {
                    id: block.id.clone(),
                    expected: expected_slots,
                    found: block.slots.len(),
                });
            }
        }

        for slot in &block.slots {
            check_list(slot, seen, violations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_tree() {
        let mut columns = Block::new(BlockKind::Columns);
        columns.slots[1].push(Block::new(BlockKind::Image));
        let mut second = Block::new(BlockKind::Heading);
        second.order = 1;
        assert_eq!(check_invariants(&[columns, second]), vec![]);
    }

    #[test]
    fn test_reports_each_kind_of_violation() {
        let mut columns = Block::new(BlockKind::Columns);
        columns.slots.pop();
        let mut leaf = Block::new(BlockKind::Heading);
        leaf.order = 1;
        leaf.slots.push(Vec::new());
        let mut dup = Block::new(BlockKind::Spacer);
        dup.id = leaf.id.clone();
        dup.order = 5;

        let violations = check_invariants(&[columns.clone(), leaf.clone(), dup]);
        assert_eq!(
            violations,
            vec![
                InvariantViolation::SlotCountMismatch {
                    id: columns.id.clone(),
                    expected: 2,
                    found: 1
                },
                InvariantViolation::LeafWithSlots(leaf.id.clone()),
                InvariantViolation::DuplicateId(leaf.id.clone()),
                InvariantViolation::OrderMismatch {
                    id: leaf.id.clone(),
                    expected: 2,
                    found: 5
                },
            ]
        );
    }
}
