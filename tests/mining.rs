//! End-to-end mining behavior over the public API.

use approx::assert_abs_diff_eq;
use patmine::{
    find_frequent_itemsets, find_frequent_itemsets_par, MineError, MinerParams, Pattern,
};

fn worked_example() -> Vec<Vec<&'static str>> {
    vec![
        vec!["t1", "A", "B", "T"],
        vec!["t2", "A", "B", "T"],
        vec!["t3", "A", "C", "F"],
    ]
}

fn is_positive(label: &&str) -> bool {
    *label == "T"
}

fn collect_lazy(
    records: Vec<Vec<&'static str>>,
    params: &MinerParams,
) -> Vec<Pattern<&'static str>> {
    find_frequent_itemsets(records, params, is_positive)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn worked_example_emits_expected_patterns() {
    let params = MinerParams {
        minimum_support: 1,
        minimum_confidence: 0.5,
        include_statistics: true,
    };
    let patterns = collect_lazy(worked_example(), &params);

    let summary: Vec<(Vec<&str>, usize, usize)> = patterns
        .iter()
        .map(|p| {
            let stats = p.stats.unwrap();
            (p.items.clone(), stats.support, stats.pos_count)
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (vec!["B"], 2, 2),
            (vec!["A", "B"], 2, 2),
            (vec!["A"], 3, 2),
        ]
    );

    let confidences: Vec<f64> = patterns.iter().map(|p| p.stats.unwrap().confidence).collect();
    assert_abs_diff_eq!(confidences[0], 1.0);
    assert_abs_diff_eq!(confidences[1], 1.0);
    assert_abs_diff_eq!(confidences[2], 2.0 / 3.0);

    // Chi-square against the raw totals (2 positive, 1 negative), unscaled.
    let chi: Vec<f64> = patterns.iter().map(|p| p.stats.unwrap().chi_square).collect();
    assert_abs_diff_eq!(chi[0], 1.0);
    assert_abs_diff_eq!(chi[1], 1.0);
    assert_abs_diff_eq!(chi[2], 0.0);

    // {A, C} has confidence 0 and is withheld.
    assert!(!patterns.iter().any(|p| p.items.contains(&"C")));
}

#[test]
fn pruned_items_never_reappear() {
    let params = MinerParams {
        minimum_support: 3,
        minimum_confidence: 0.5,
        include_statistics: true,
    };
    let patterns = collect_lazy(worked_example(), &params);

    // B and C fall below support 3 before mining starts.
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].items, vec!["A"]);
    assert_eq!(patterns[0].stats.unwrap().support, 3);
    for pattern in &patterns {
        assert!(!pattern.items.contains(&"B"));
        assert!(!pattern.items.contains(&"C"));
    }
}

#[test]
fn lazy_and_parallel_agree() {
    let records = vec![
        vec!["t1", "A", "B", "C", "T"],
        vec!["t2", "A", "B", "T"],
        vec!["t3", "A", "C", "D", "F"],
        vec!["t4", "B", "C", "T"],
        vec!["t5", "A", "B", "C", "D", "F"],
        vec!["t6", "D", "A", "T"],
        vec!["t7", "C", "B", "A", "T"],
        vec!["t8", "B", "D", "F"],
    ];
    let params = MinerParams {
        minimum_support: 2,
        minimum_confidence: 0.4,
        include_statistics: true,
    };

    let lazy = collect_lazy(records.clone(), &params);
    let parallel = find_frequent_itemsets_par(records, &params, is_positive).unwrap();

    assert!(!lazy.is_empty());
    assert_eq!(lazy, parallel);
}

#[test]
fn emitted_itemsets_never_repeat_an_item() {
    let records = vec![
        vec!["t1", "A", "B", "C", "T"],
        vec!["t2", "B", "C", "D", "T"],
        vec!["t3", "A", "C", "D", "F"],
        vec!["t4", "A", "B", "D", "T"],
        vec!["t5", "A", "B", "C", "D", "T"],
    ];
    let params = MinerParams {
        minimum_support: 1,
        minimum_confidence: 0.0,
        include_statistics: true,
    };

    for pattern in collect_lazy(records, &params) {
        let mut seen = pattern.items.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), pattern.items.len(), "duplicate item in {:?}", pattern.items);

        let stats = pattern.stats.unwrap();
        assert!(stats.pos_count <= stats.support);
        assert!((0.0..=1.0).contains(&stats.confidence));
        assert_abs_diff_eq!(
            stats.confidence,
            stats.pos_count as f64 / stats.support as f64
        );
    }
}

#[test]
fn bare_itemsets_without_statistics() {
    let params = MinerParams {
        minimum_support: 1,
        minimum_confidence: 0.5,
        include_statistics: false,
    };
    let patterns = collect_lazy(worked_example(), &params);

    assert_eq!(patterns.len(), 3);
    assert!(patterns.iter().all(|p| p.stats.is_none()));
}

#[test]
fn short_record_aborts_the_build() {
    let records = vec![vec!["t1", "A", "B", "T"], vec!["t2", "T"]];
    let params = MinerParams::default();

    let result = find_frequent_itemsets(records, &params, is_positive);
    assert!(matches!(
        result.err(),
        Some(MineError::InvalidTransaction { index: 1, len: 2 })
    ));
}

#[test]
fn patterns_serialize_to_json() {
    let params = MinerParams {
        minimum_support: 1,
        minimum_confidence: 0.5,
        include_statistics: true,
    };
    let patterns = collect_lazy(worked_example(), &params);

    let value = serde_json::to_value(&patterns[0]).unwrap();
    assert_eq!(value["items"], serde_json::json!(["B"]));
    assert_eq!(value["stats"]["support"], serde_json::json!(2));
    assert_eq!(value["stats"]["pos_count"], serde_json::json!(2));
}
