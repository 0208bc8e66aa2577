// [apps/verdict/src/bench/mod.rs]
/*!
 * =================================================================
 * APARATO: BENCH MODULE HUB (V6.0 - EVALUATION STRATA)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: EXPOSICIÓN DEL MOTOR DE EVALUACIÓN PARALELA
 * =================================================================
 */

/// Driver paralelo de pares (app, librería) con caché y cancelación.
pub mod driver;

/// Matriz de confusión, métricas derivadas y barrido ROC.
pub mod accuracy;

/// Reporte JSON normativo y exportación CSV del barrido.
pub mod report;

pub use accuracy::{roc_sweep, tabulate, AccuracyReport, ConfusionMatrix};
pub use driver::{BenchmarkDriver, TestResult, TestStatus, VariantRun};
pub use report::{forge_report, write_json_report, write_roc_csv};
