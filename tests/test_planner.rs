//! Planner partitioning properties.

use proptest::prelude::*;
use rowpdf::{plan_batches, plan_row_groups, Batch, RowGroup};

#[test]
fn test_group_count_formula() {
    assert_eq!(plan_row_groups(1, 1).len(), 1);
    assert_eq!(plan_row_groups(120, 1).len(), 120);
    assert_eq!(plan_row_groups(121, 50).len(), 3);
    assert_eq!(plan_row_groups(7, 3).len(), 3);
}

#[test]
fn test_batch_count_formula() {
    assert_eq!(plan_batches(0, 50).len(), 0);
    assert_eq!(plan_batches(50, 50).len(), 1);
    assert_eq!(plan_batches(51, 50).len(), 2);
}

#[test]
fn test_planner_is_deterministic() {
    assert_eq!(plan_row_groups(997, 13), plan_row_groups(997, 13));
    assert_eq!(plan_batches(997, 13), plan_batches(997, 13));
}

fn assert_groups_partition(groups: &[RowGroup], total: usize, size: usize) {
    assert_eq!(groups.len(), total.div_ceil(size));
    assert_eq!(groups[0].start_row, 1);
    assert_eq!(groups.last().unwrap().end_row, total);
    for pair in groups.windows(2) {
        assert_eq!(pair[1].start_row, pair[0].end_row + 1);
    }
    for group in &groups[..groups.len() - 1] {
        assert_eq!(group.len(), size);
    }
    assert!(groups.last().unwrap().len() <= size);
}

fn assert_batches_partition(batches: &[Batch], total: usize, size: usize) {
    assert_eq!(batches.len(), total.div_ceil(size));
    if total == 0 {
        return;
    }
    assert_eq!(batches[0].start_doc, 0);
    assert_eq!(batches.last().unwrap().end_doc, total - 1);
    for pair in batches.windows(2) {
        assert_eq!(pair[1].start_doc, pair[0].end_doc + 1);
    }
    for batch in &batches[..batches.len() - 1] {
        assert_eq!(batch.len(), size);
    }
}

proptest! {
    #[test]
    fn prop_row_groups_partition_rows(total in 1usize..3000, size in 1usize..80) {
        let groups = plan_row_groups(total, size);
        assert_groups_partition(&groups, total, size);
    }

    #[test]
    fn prop_batches_partition_documents(total in 0usize..3000, size in 1usize..80) {
        let batches = plan_batches(total, size);
        assert_batches_partition(&batches, total, size);
    }

    #[test]
    fn prop_every_row_in_exactly_one_group(total in 1usize..500, size in 1usize..40) {
        let groups = plan_row_groups(total, size);
        let mut seen = vec![0u32; total + 1];
        for group in &groups {
            for row in group.rows() {
                seen[row] += 1;
            }
        }
        for row in 1..=total {
            prop_assert_eq!(seen[row], 1);
        }
    }
}
