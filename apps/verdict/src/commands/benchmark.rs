// [apps/verdict/src/commands/benchmark.rs]
/*!
 * =================================================================
 * APARATO: BENCHMARK COMMAND (V6.3 - EVALUATION SHELL)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: ORQUESTACIÓN DEL DRIVER Y EMISIÓN DE REPORTES
 * =================================================================
 */

use crate::bench::driver::BenchmarkDriver;
use crate::bench::report::{forge_report, write_json_report, write_roc_csv};
use crate::bench::tabulate;
use crate::integration::IntegrationTable;
use anyhow::{Context, Result};
use librarius_domain_profiles::ProfileKind;
use librarius_infra_store::{DatasetConfig, DatasetLayout, GroundTruthStore, ProfileDefinition};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, instrument};

/// Argumentos resueltos del subcomando benchmark.
pub struct BenchmarkInvocation {
    /// Ruta de la configuración del dataset.
    pub dataset_path: PathBuf,
    /// Ruta de la definición de perfil.
    pub definition_path: PathBuf,
    /// Nombre corto de la aplicación bajo auditoría.
    pub app_short_name: String,
    /// Ruta del reporte JSON (opcional).
    pub output_path: Option<PathBuf>,
    /// Ruta de la exportación CSV del barrido (opcional).
    pub csv_path: Option<PathBuf>,
    /// Umbrales del barrido ROC (vacío = umbral de perfil vigente).
    pub roc_thresholds: Vec<f64>,
    /// Casos de librería a evaluar ("-*" o vacío = roster completo).
    pub cases: Vec<String>,
    /// Mantiene los perfiles de librería en memoria toda la corrida.
    pub cache_profiles: bool,
}

/**
 * Ejecuta el subcomando benchmark.
 *
 * # Flow:
 * definición + dataset → driver paralelo → corridas por variante →
 * matriz de confusión al umbral vigente → reporte JSON / CSV.
 */
#[instrument(skip_all, fields(app = %invocation.app_short_name))]
pub fn execute(invocation: &BenchmarkInvocation, cancel_token: Arc<AtomicBool>) -> Result<()> {
    let definition =
        ProfileDefinition::load(&invocation.definition_path).context("definición de perfil")?;
    let dataset =
        DatasetConfig::load(&invocation.dataset_path).context("configuración del dataset")?;
    let layout = DatasetLayout::new(&dataset, &definition.target_dir, &definition.extension);
    let thresholds = definition.threshold_config()?;

    let ground_truth = GroundTruthStore::load(layout.ground_truth_path())?;
    let whitelist = ground_truth
        .get_libraries(&invocation.app_short_name)?
        .clone();

    let registry =
        (IntegrationTable::global().integration(&definition.integration)?.forge_registry)();

    let shared_definition = Arc::new(definition);
    let composer_definition = shared_definition.clone();
    let composer = Arc::new(move |is_app_profile: bool| {
        IntegrationTable::compose_manager(&composer_definition, is_app_profile)
    });

    let mut driver = BenchmarkDriver::new(
        layout,
        registry,
        thresholds.clone(),
        composer,
        invocation.cache_profiles,
    )
    .with_cancel_token(cancel_token);

    let library_universe = driver.load_libraries()?.len();

    let library_filter: Option<Vec<String>> = {
        let effective_cases: Vec<String> = invocation
            .cases
            .iter()
            .filter(|case| case.as_str() != "-*")
            .cloned()
            .collect();
        if effective_cases.is_empty() || invocation.cases.iter().any(|case| case == "-*") {
            None
        } else {
            Some(effective_cases)
        }
    };

    info!("🕰️ [RUN_STAMP]: {}", chrono::Utc::now().to_rfc3339());
    let runs = driver.benchmark(&invocation.app_short_name, library_filter.as_deref())?;

    // Umbral vigente del barrido: el del perfil completo por defecto.
    let roc_thresholds = if invocation.roc_thresholds.is_empty() {
        vec![thresholds.threshold_for(ProfileKind::Cha)]
    } else {
        invocation.roc_thresholds.clone()
    };

    // Resumen operativo por variante al primer umbral.
    let leading_threshold = roc_thresholds[0];
    for (variant_label, run) in &runs {
        let accuracy = tabulate(&run.results, &whitelist, leading_threshold, library_universe);
        info!(
            "⚖️ [VARIANT '{}']: TP={} FP={} TN={} FN={} precision={:.3} recall={:.3} ({:?})",
            variant_label,
            accuracy.matrix.true_positives,
            accuracy.matrix.false_positives,
            accuracy.matrix.true_negatives,
            accuracy.matrix.false_negatives,
            accuracy.precision,
            accuracy.recall,
            run.wall_time
        );
    }
    if driver.error_tally() > 0 {
        info!("🧯 [ERROR_TALLY]: {} contained pair failures.", driver.error_tally());
    }

    let entries = forge_report(
        &runs,
        &whitelist,
        &roc_thresholds,
        library_universe,
        &thresholds.to_named_map(),
        true,
    );

    if let Some(output_path) = &invocation.output_path {
        write_json_report(output_path, &entries)?;
    }
    if let Some(csv_path) = &invocation.csv_path {
        write_roc_csv(csv_path, &runs, &whitelist, &roc_thresholds, library_universe)?;
    }
    Ok(())
}

/// Conveniencia del shell: construye la invocación desde rutas crudas.
#[allow(clippy::too_many_arguments)]
pub fn invocation_from_cli(
    dataset_path: &Path,
    definition_path: &Path,
    app_short_name: &str,
    output_path: Option<PathBuf>,
    csv_path: Option<PathBuf>,
    roc_thresholds: Vec<f64>,
    cases: Vec<String>,
    cache_profiles: bool,
) -> BenchmarkInvocation {
    BenchmarkInvocation {
        dataset_path: dataset_path.to_path_buf(),
        definition_path: definition_path.to_path_buf(),
        app_short_name: app_short_name.to_string(),
        output_path,
        csv_path,
        roc_thresholds,
        cases,
        cache_profiles,
    }
}
