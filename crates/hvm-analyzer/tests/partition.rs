//! Property tests for the classification invariants.
//!
//! Every downstream classification point must land in exactly one of
//! unsupported / commented / redundant / optimized, and the optimized tree
//! must never keep a path recorded elsewhere.

use hvm_analyzer::{Analyzer, AnalyzerConfig};
use hvm_test_utils::{arb_key, arb_mapping, classification_points};
use hvm_values::{tree, Mapping, Value};
use proptest::prelude::*;

fn placements(result: &hvm_analyzer::ClassificationResult, point: &hvm_values::KeyPath) -> usize {
    [
        &result.unsupported,
        &result.commented,
        &result.redundant,
        &result.optimized,
    ]
    .iter()
    .filter(|tree_root| tree::exists(tree_root, point))
    .count()
}

/// Upstream text disabling some of the generated key names
fn comment_source(disabled: &[String]) -> String {
    disabled.iter().map(|key| format!("# {key}: 0\n")).collect()
}

proptest! {
    #[test]
    fn prop_every_point_is_classified_once(upstream in arb_mapping(), downstream in arb_mapping()) {
        let result = Analyzer::default()
            .analyze_mappings(&upstream, &downstream, None)
            .unwrap();

        for point in classification_points(&upstream, &downstream) {
            prop_assert_eq!(placements(&result, &point), 1, "point {}", point);
        }
    }

    #[test]
    fn prop_partition_holds_with_comment_detection(
        upstream in arb_mapping(),
        downstream in arb_mapping(),
        disabled in prop::collection::vec(arb_key(), 0..3),
    ) {
        let source = comment_source(&disabled);
        let result = Analyzer::default()
            .analyze_mappings(&upstream, &downstream, Some(&source))
            .unwrap();

        for point in classification_points(&upstream, &downstream) {
            prop_assert_eq!(placements(&result, &point), 1, "point {}", point);
        }
    }

    #[test]
    fn prop_optimized_is_minimal(upstream in arb_mapping(), downstream in arb_mapping()) {
        let result = Analyzer::default()
            .analyze_mappings(&upstream, &downstream, None)
            .unwrap();

        for point in classification_points(&upstream, &downstream) {
            let recorded = tree::exists(&result.unsupported, &point)
                || tree::exists(&result.commented, &point)
                || tree::exists(&result.redundant, &point);
            if recorded {
                prop_assert!(!tree::exists(&result.optimized, &point), "point {}", point);
            }
        }
    }

    #[test]
    fn prop_inputs_are_untouched(upstream in arb_mapping(), downstream in arb_mapping()) {
        let up_before = upstream.clone();
        let down_before = downstream.clone();
        let _ = Analyzer::default().analyze_mappings(&upstream, &downstream, None).unwrap();
        prop_assert_eq!(upstream, up_before);
        prop_assert_eq!(downstream, down_before);
    }

    #[test]
    fn prop_shallow_pass_does_not_change_outcome(upstream in arb_mapping(), downstream in arb_mapping()) {
        let sections = AnalyzerConfig::new().with_shallow_sections(["a", "b.c"]);
        let with_pass = Analyzer::new(sections)
            .analyze_mappings(&upstream, &downstream, None)
            .unwrap();
        let without_pass = Analyzer::new(AnalyzerConfig::new().without_shallow_pass())
            .analyze_mappings(&upstream, &downstream, None)
            .unwrap();
        prop_assert_eq!(with_pass, without_pass);
    }

    #[test]
    fn prop_self_comparison_is_fully_redundant(downstream in arb_mapping()) {
        let result = Analyzer::default()
            .analyze_mappings(&downstream, &downstream, None)
            .unwrap();
        prop_assert!(result.unsupported.is_empty());
        prop_assert!(result.commented.is_empty());
        prop_assert!(only_empty_mappings(&result.optimized));
    }
}

/// Whether every leaf of `map` is an empty mapping
fn only_empty_mappings(map: &Mapping) -> bool {
    map.values().all(|value| match value {
        Value::Mapping(nested) => only_empty_mappings(nested),
        _ => false,
    })
}
