// [apps/verdict/src/bench/report.rs]
/*!
 * =================================================================
 * APARATO: BENCHMARK REPORT (V6.2 - JSON NORMATIVE)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: REPORTE JSON POR UMBRAL ROC + EXPORTACIÓN CSV
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NORMATIVE SHAPE: Arreglo de objetos, uno por umbral ROC; cada
 *    objeto porta por variante {matrix:{FN,FP,TN,TP}, milliTime,
 *    nanoTime, tests?} y un mapa 'config' con el eco de umbrales.
 * 2. CSV SUPPLEMENT: Tabla plana del barrido para hojas de cálculo
 *    (umbral, variante, matriz, métricas).
 * =================================================================
 */

use crate::bench::accuracy::{tabulate, AccuracyReport};
use crate::bench::driver::VariantRun;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

/// Matriz de confusión en la forma JSON normativa.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatrixJson {
    /// Falsos negativos.
    #[serde(rename = "FN")]
    pub false_negatives: u64,
    /// Falsos positivos.
    #[serde(rename = "FP")]
    pub false_positives: u64,
    /// Verdaderos negativos.
    #[serde(rename = "TN")]
    pub true_negatives: u64,
    /// Verdaderos positivos.
    #[serde(rename = "TP")]
    pub true_positives: u64,
}

/// Resultado individual en la forma JSON normativa.
#[derive(Debug, Clone, Serialize)]
pub struct TestJson {
    /// Identificador de la librería comparada.
    pub name: String,
    /// Etiqueta nominal del estado (ok/failure/cancelled/timeout).
    pub status: String,
    /// Similitud reportada.
    pub similarity: f64,
    /// Duración de la comparación en milisegundos.
    pub time: u128,
}

/// Bloque por variante de aplicación.
#[derive(Debug, Clone, Serialize)]
pub struct VariantJson {
    /// Matriz de confusión al umbral del bloque.
    pub matrix: MatrixJson,
    /// Duración de la variante en milisegundos.
    #[serde(rename = "milliTime")]
    pub milli_time: u128,
    /// Duración de la variante en nanosegundos.
    #[serde(rename = "nanoTime")]
    pub nano_time: u128,
    /// Resultados individuales (opcional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<TestJson>>,
}

/// Entrada del reporte: un objeto por umbral ROC.
#[derive(Debug, Clone, Serialize)]
pub struct RocEntryJson {
    /// Eco de la configuración de umbrales.
    pub config: BTreeMap<String, f64>,
    /// Bloques por variante (app type).
    #[serde(flatten)]
    pub variants: BTreeMap<String, VariantJson>,
}

/**
 * Forja el reporte completo: una entrada por umbral ROC.
 *
 * # Arguments:
 * * `runs` - Corridas por variante del benchmark.
 * * `whitelist` - Verdad de terreno de la aplicación.
 * * `roc_thresholds` - Umbrales del barrido (al menos uno).
 * * `library_universe` - Cardinalidad del roster de librerías.
 * * `threshold_echo` - Eco de la configuración de umbrales activa.
 * * `include_tests` - Adjunta los resultados individuales.
 */
#[must_use]
pub fn forge_report(
    runs: &BTreeMap<String, VariantRun>,
    whitelist: &BTreeSet<String>,
    roc_thresholds: &[f64],
    library_universe: usize,
    threshold_echo: &BTreeMap<String, f64>,
    include_tests: bool,
) -> Vec<RocEntryJson> {
    roc_thresholds
        .iter()
        .map(|roc_threshold| {
            let mut config_echo = threshold_echo.clone();
            config_echo.insert("roc-threshold".to_string(), *roc_threshold);

            let variants = runs
                .iter()
                .map(|(variant_label, run)| {
                    let accuracy: AccuracyReport =
                        tabulate(&run.results, whitelist, *roc_threshold, library_universe);

                    let tests = include_tests.then(|| {
                        run.results
                            .iter()
                            .map(|result| TestJson {
                                name: result.library.clone(),
                                status: result.status.label().to_string(),
                                similarity: result.similarity,
                                time: result.wall_time.as_millis(),
                            })
                            .collect()
                    });

                    (
                        variant_label.clone(),
                        VariantJson {
                            matrix: MatrixJson {
                                false_negatives: accuracy.matrix.false_negatives,
                                false_positives: accuracy.matrix.false_positives,
                                true_negatives: accuracy.matrix.true_negatives,
                                true_positives: accuracy.matrix.true_positives,
                            },
                            milli_time: run.wall_time.as_millis(),
                            nano_time: run.wall_time.as_nanos(),
                            tests,
                        },
                    )
                })
                .collect();

            RocEntryJson { config: config_echo, variants }
        })
        .collect()
}

/// Cristaliza el reporte JSON en disco.
pub fn write_json_report<P: AsRef<Path>>(
    output_path: P,
    entries: &[RocEntryJson],
) -> Result<()> {
    let rendered = serde_json::to_string_pretty(entries).context("serialización del reporte")?;
    std::fs::write(&output_path, rendered).context("escritura del reporte JSON")?;
    info!(
        "📄 [REPORT_SEALED]: {} ROC entries crystallized at {:?}.",
        entries.len(),
        output_path.as_ref()
    );
    Ok(())
}

/// Exporta la tabla plana del barrido ROC en CSV.
pub fn write_roc_csv<P: AsRef<Path>>(
    output_path: P,
    runs: &BTreeMap<String, VariantRun>,
    whitelist: &BTreeSet<String>,
    roc_thresholds: &[f64],
    library_universe: usize,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_path(&output_path).context("apertura del CSV")?;
    csv_writer
        .write_record([
            "threshold", "variant", "TP", "FP", "TN", "FN", "precision", "recall", "f1",
        ])
        .context("cabecera del CSV")?;

    for roc_threshold in roc_thresholds {
        for (variant_label, run) in runs {
            let accuracy = tabulate(&run.results, whitelist, *roc_threshold, library_universe);
            csv_writer
                .write_record([
                    format!("{roc_threshold}"),
                    variant_label.clone(),
                    accuracy.matrix.true_positives.to_string(),
                    accuracy.matrix.false_positives.to_string(),
                    accuracy.matrix.true_negatives.to_string(),
                    accuracy.matrix.false_negatives.to_string(),
                    format!("{:.6}", accuracy.precision),
                    format!("{:.6}", accuracy.recall),
                    format!("{:.6}", accuracy.f1),
                ])
                .context("fila del CSV")?;
        }
    }
    csv_writer.flush().context("sellado del CSV")?;
    Ok(())
}
