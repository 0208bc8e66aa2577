// [tests/mirror/apps/verdict/accuracy_certification.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE LA MATRIZ DE CONFUSIÓN (V6.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-VERDICT
 * RESPONSABILIDAD: VALIDACIÓN DEL CONTRATO POSITIVO Y SUS DERIVADAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CANONICAL WITNESS: whitelist={L1,L2,L3}, umbral 0.6, similitudes
 *    L1=0.9, L2=0.4, L4=0.7, L5=0.2 ⟹ TP=1, FN=2, FP=1,
 *    TN=|libs|−4, precision=1/2, recall=1/3.
 * 2. VERBOSE LOGGING: Bitácora técnica detallada de la tabulación.
 * =================================================================
 */

use librarius_verdict_lib::bench::driver::{TestResult, TestStatus};
use librarius_verdict_lib::bench::{roc_sweep, tabulate};
use std::collections::BTreeSet;
use std::time::Duration;

fn ok_result(library: &str, similarity: f64) -> TestResult {
    TestResult {
        library: library.to_string(),
        status: TestStatus::Ok,
        similarity,
        wall_time: Duration::from_millis(3),
    }
}

fn canonical_whitelist() -> BTreeSet<String> {
    ["L1", "L2", "L3"].into_iter().map(str::to_string).collect()
}

fn canonical_results() -> Vec<TestResult> {
    vec![
        ok_result("L1", 0.9),
        ok_result("L2", 0.4),
        ok_result("L4", 0.7),
        ok_result("L5", 0.2),
    ]
}

#[test]
fn canonical_witness_tabulates_the_normative_matrix() {
    println!("🧪 [ACCURACY_GAUNTLET]: Auditing the canonical witness...");

    const LIBRARY_UNIVERSE: usize = 10;
    let report = tabulate(&canonical_results(), &canonical_whitelist(), 0.6, LIBRARY_UNIVERSE);

    println!(
        "      📊 [MATRIX]: TP={} FP={} TN={} FN={}",
        report.matrix.true_positives,
        report.matrix.false_positives,
        report.matrix.true_negatives,
        report.matrix.false_negatives
    );

    assert_eq!(report.matrix.true_positives, 1, "L1 = 0.9 ≥ 0.6");
    assert_eq!(report.matrix.false_negatives, 2, "L2 bajo umbral + L3 jamás reportada");
    assert_eq!(report.matrix.false_positives, 1, "L4 = 0.7 fuera de whitelist");
    assert_eq!(
        report.matrix.true_negatives,
        (LIBRARY_UNIVERSE as u64) - 4,
        "TN cierra contra el universo"
    );

    assert!((report.precision - 0.5).abs() < 1e-9, "precision = 1/2");
    assert!((report.recall - 1.0 / 3.0).abs() < 1e-9, "recall = 1/3");

    println!("✅ [VERDICT]: Canonical matrix sealed.");
}

#[test]
fn derived_metrics_honor_their_definitions() {
    const LIBRARY_UNIVERSE: usize = 10;
    let report = tabulate(&canonical_results(), &canonical_whitelist(), 0.6, LIBRARY_UNIVERSE);

    // FPR = FP / (FP + TN) = 1/7; especificidad = 6/7.
    assert!((report.false_positive_rate - 1.0 / 7.0).abs() < 1e-9);
    assert!((report.specificity - 6.0 / 7.0).abs() < 1e-9);
    // NPV = TN / (TN + FN) = 6/8; FDR = 1/2; FOR = 2/8.
    assert!((report.negative_predictive_value - 6.0 / 8.0).abs() < 1e-9);
    assert!((report.false_discovery_rate - 0.5).abs() < 1e-9);
    assert!((report.false_omission_rate - 0.25).abs() < 1e-9);
    // F1 = 2·(1/2)·(1/3) / (1/2 + 1/3) = 2/5.
    assert!((report.f1 - 0.4).abs() < 1e-9);
}

#[test]
fn roc_sweep_monotonically_trades_tp_for_fn() {
    let sweep = roc_sweep(
        &canonical_results(),
        &canonical_whitelist(),
        &[0.1, 0.5, 0.8, 0.95],
        10,
    );
    let true_positive_curve: Vec<u64> =
        sweep.iter().map(|report| report.matrix.true_positives).collect();
    assert_eq!(true_positive_curve, vec![2, 1, 1, 0], "TP decrece con el umbral");

    for window in true_positive_curve.windows(2) {
        assert!(window[0] >= window[1], "la curva TP jamás crece con el umbral");
    }
}

#[test]
fn cancelled_and_failed_pairs_never_pollute_the_matrix() {
    let mut results = canonical_results();
    results.push(TestResult {
        library: "L3".to_string(),
        status: TestStatus::Cancelled,
        similarity: 0.99,
        wall_time: Duration::ZERO,
    });
    results.push(TestResult {
        library: "L6".to_string(),
        status: TestStatus::Timeout,
        similarity: 0.99,
        wall_time: Duration::ZERO,
    });

    let report = tabulate(&results, &canonical_whitelist(), 0.6, 10);
    assert_eq!(report.matrix.true_positives, 1, "L3 cancelada jamás cuenta como TP");
    assert_eq!(report.matrix.false_positives, 1, "L6 en timeout jamás cuenta como FP");
}
