// [apps/verdict/src/bench/accuracy.rs]
/*!
 * =================================================================
 * APARATO: ACCURACY ENGINE (V6.1 - CONFUSION STRATA)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: MATRIZ DE CONFUSIÓN, MÉTRICAS DERIVADAS Y ROC
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. POSITIVE CONTRACT: Positivo = miembro de la whitelist reportado
 *    con similitud ≥ umbral. Los miembros jamás reportados son FN; los
 *    no-miembros sobre el umbral son FP; TN cierra contra el universo.
 * 2. EXCLUSION DISCIPLINE: Fallos, cancelaciones y timeouts se
 *    excluyen íntegramente de la tabulación.
 * 3. ZERO-DIVISION CONVENTION: Toda métrica 0/0 colapsa a 0.0.
 *
 * # Mathematical Proof (Matrix Closure):
 * TP + FP + FN + TN = |universo| cuando cada librería del universo cae
 * en exactamente una celda; TN se deriva por diferencia y se satura en
 * 0 ante universos sub-declarados.
 * =================================================================
 */

use crate::bench::driver::TestResult;
use std::collections::BTreeSet;

/// Matriz de confusión de una corrida a un umbral fijo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Verdaderos positivos.
    pub true_positives: u64,
    /// Falsos positivos.
    pub false_positives: u64,
    /// Verdaderos negativos.
    pub true_negatives: u64,
    /// Falsos negativos.
    pub false_negatives: u64,
}

/// Métricas derivadas de una matriz de confusión.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyReport {
    /// Umbral de decisión auditado.
    pub threshold: f64,
    /// Matriz de confusión tabulada.
    pub matrix: ConfusionMatrix,
    /// Precisión: TP / (TP + FP).
    pub precision: f64,
    /// Exhaustividad: TP / (TP + FN).
    pub recall: f64,
    /// Media armónica F1.
    pub f1: f64,
    /// Tasa de falsos positivos: FP / (FP + TN).
    pub false_positive_rate: f64,
    /// Especificidad: TN / (FP + TN).
    pub specificity: f64,
    /// Valor predictivo negativo: TN / (TN + FN).
    pub negative_predictive_value: f64,
    /// Tasa de descubrimiento falso: FP / (TP + FP).
    pub false_discovery_rate: f64,
    /// Tasa de omisión falsa: FN / (FN + TN).
    pub false_omission_rate: f64,
}

/// Razón con convención 0/0 → 0.0.
fn safe_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/**
 * Tabula la matriz de confusión de una corrida a un umbral.
 *
 * # Arguments:
 * * `results` - Resultados por librería (solo Ok contribuye).
 * * `whitelist` - Verdad de terreno de la aplicación.
 * * `threshold` - Umbral de decisión en [0,1].
 * * `library_universe` - Cardinalidad total del roster de librerías.
 */
#[must_use]
pub fn tabulate(
    results: &[TestResult],
    whitelist: &BTreeSet<String>,
    threshold: f64,
    library_universe: usize,
) -> AccuracyReport {
    let mut matrix = ConfusionMatrix::default();

    for result in results {
        if !result.status.counts_for_accuracy() {
            continue;
        }
        let predicted_present = result.similarity >= threshold;
        let is_whitelisted = whitelist.contains(&result.library);
        if predicted_present && is_whitelisted {
            matrix.true_positives += 1;
        } else if predicted_present {
            matrix.false_positives += 1;
        }
    }

    // Miembros jamás alcanzados por un TP: falsos negativos.
    matrix.false_negatives = (whitelist.len() as u64).saturating_sub(matrix.true_positives);

    // Cierre contra el universo, saturado ante sub-declaración.
    matrix.true_negatives = (library_universe as u64)
        .saturating_sub(matrix.true_positives)
        .saturating_sub(matrix.false_positives)
        .saturating_sub(matrix.false_negatives);

    let precision = safe_ratio(matrix.true_positives, matrix.true_positives + matrix.false_positives);
    let recall = safe_ratio(matrix.true_positives, matrix.true_positives + matrix.false_negatives);
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    AccuracyReport {
        threshold,
        matrix,
        precision,
        recall,
        f1,
        false_positive_rate: safe_ratio(
            matrix.false_positives,
            matrix.false_positives + matrix.true_negatives,
        ),
        specificity: safe_ratio(
            matrix.true_negatives,
            matrix.false_positives + matrix.true_negatives,
        ),
        negative_predictive_value: safe_ratio(
            matrix.true_negatives,
            matrix.true_negatives + matrix.false_negatives,
        ),
        false_discovery_rate: safe_ratio(
            matrix.false_positives,
            matrix.true_positives + matrix.false_positives,
        ),
        false_omission_rate: safe_ratio(
            matrix.false_negatives,
            matrix.false_negatives + matrix.true_negatives,
        ),
    }
}

/// Barrido ROC: una tabulación por umbral, en el orden recibido.
#[must_use]
pub fn roc_sweep(
    results: &[TestResult],
    whitelist: &BTreeSet<String>,
    thresholds: &[f64],
    library_universe: usize,
) -> Vec<AccuracyReport> {
    thresholds
        .iter()
        .map(|threshold| tabulate(results, whitelist, *threshold, library_universe))
        .collect()
}
