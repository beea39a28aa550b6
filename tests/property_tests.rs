//! Property-based tests (Toyota Way: Jidoka)

use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;

use registro::compare::ComparisonTable;
use registro::eval::{accuracy, weighted_recall};
use registro::model::Label;
use registro::registry::{allocate_next_id, MetricsRecord};

fn label_pairs() -> impl Strategy<Value = Vec<(Label, Label)>> {
    let label = prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string);
    prop::collection::vec((label.clone(), label), 1..64)
}

proptest! {
    /// Property: accuracy is the exact-match rate and stays within [0, 1]
    #[test]
    fn prop_accuracy_is_bounded_exact_match_rate(pairs in label_pairs()) {
        let (labels, predictions): (Vec<Label>, Vec<Label>) = pairs.into_iter().unzip();
        let value = accuracy(&labels, &predictions);

        prop_assert!((0.0..=1.0).contains(&value));

        let matches = labels.iter().zip(&predictions).filter(|(l, p)| l == p).count();
        #[allow(clippy::cast_precision_loss)]
        let expected = matches as f64 / labels.len() as f64;
        prop_assert!((value - expected).abs() < f64::EPSILON);
    }

    /// Property: support-weighted recall collapses to overall accuracy
    #[test]
    fn prop_weighted_recall_equals_accuracy(pairs in label_pairs()) {
        let (labels, predictions): (Vec<Label>, Vec<Label>) = pairs.into_iter().unzip();
        let recall = weighted_recall(&labels, &predictions).unwrap();
        let acc = accuracy(&labels, &predictions);
        prop_assert!((recall - acc).abs() < 1e-9);
    }

    /// Property: the allocator always returns max(existing ids) + 1
    #[test]
    fn prop_allocator_is_monotonic(ids in prop::collection::btree_set(1_u32..500, 0..12)) {
        let tmp = TempDir::new().unwrap();
        for id in &ids {
            fs::create_dir(tmp.path().join(format!("exp{id}"))).unwrap();
        }

        let next = allocate_next_id(tmp.path()).unwrap();
        let expected = ids.iter().max().map_or(1, |max| max + 1);
        prop_assert_eq!(next, expected);
        prop_assert!(!ids.contains(&next));
    }

    /// Property: the comparison table is rectangular — every experiment
    /// answers for every column (numeric or null), and the column set is
    /// exactly the union of metric names
    #[test]
    fn prop_table_is_rectangular(
        rows in prop::collection::vec(
            (
                "[a-z]{1,8}",
                prop::collection::btree_map("[a-z]{1,6}", 0.0_f64..1.0, 0..5),
            ),
            0..8,
        )
    ) {
        let records: Vec<(String, MetricsRecord)> = rows
            .iter()
            .enumerate()
            .map(|(i, (name, metrics))| {
                let mut record = MetricsRecord::new();
                for (key, value) in metrics {
                    record.set_number(key, *value);
                }
                (format!("{name}{i}"), record)
            })
            .collect();

        let table = ComparisonTable::from_records(records.clone());

        // Column union
        for (_, record) in &records {
            for (key, _) in record.iter() {
                prop_assert!(table.columns().iter().any(|c| c == key));
            }
        }

        // Rectangularity: every cell resolves, absent combinations to null
        for (name, record) in &records {
            for column in table.columns() {
                let cell = table.cell(name, column);
                if record.contains(column) {
                    prop_assert!(cell.is_f64());
                } else {
                    prop_assert!(cell.is_null());
                }
            }
        }
    }
}
