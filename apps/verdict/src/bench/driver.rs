// [apps/verdict/src/bench/driver.rs]
/*!
 * =================================================================
 * APARATO: BENCHMARK DRIVER (V6.3 - PARALLEL EVALUATION)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: EVALUACIÓN PARALELA DE PARES (APP, LIBRERÍA)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PAIR GRANULARITY: Una tarea por par (app, librería) sobre un pool
 *    acotado (CPU count por defecto); los resultados se acumulan por
 *    hilo y se fusionan al final (rayon collect).
 * 2. IMMUTABLE LIBRARIES: Los perfiles de librería se memorizan una
 *    vez con 'cache_profiles' y son lógicamente inmutables; sin caché
 *    se recargan por aplicación.
 * 3. FAULT CONTAINMENT: Todo fallo por par se envuelve en
 *    TestResult::Failure, se excluye de la exactitud y se cuenta en el
 *    tally de errores; jamás aborta la corrida.
 * 4. COOPERATIVE CANCEL: El token se consulta entre librerías; las
 *    tareas en vuelo corren hasta completarse. El timeout por tarea es
 *    cooperativo (medición post-cómputo).
 * 5. ADVISORY PRESSURE HOOK: Gancho de presión de memoria invocado
 *    entre tareas; consultivo, jamás altera la semántica.
 * =================================================================
 */

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use librarius_domain_profiles::{ProfileManager, ThresholdConfig};
use librarius_domain_strategy::{ProfileRef, StrategyRegistry};
use librarius_infra_store::{load_profile, DatasetLayout, ProfileComposer};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Estado final de la comparación de un par (app, librería).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestStatus {
    /// Comparación completada con similitud válida.
    Ok,
    /// Fallo contenido del par (excluido de la exactitud).
    Failure {
        /// Clase del fallo (io, format-mismatch, algorithm…).
        kind: String,
        /// Rastro técnico del fallo.
        message: String,
    },
    /// La tarea observó el token de cancelación antes de computar.
    Cancelled,
    /// La tarea excedió el timeout cooperativo (excluida de exactitud).
    Timeout,
}

impl TestStatus {
    /// Etiqueta nominal del estado para el reporte JSON.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Failure { .. } => "failure",
            Self::Cancelled => "cancelled",
            Self::Timeout => "timeout",
        }
    }

    /// Verdadero si el resultado contribuye a la exactitud.
    #[must_use]
    pub fn counts_for_accuracy(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Resultado de la comparación de un par (app, librería).
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Identificador de la librería comparada.
    pub library: String,
    /// Estado final de la tarea.
    pub status: TestStatus,
    /// Similitud reportada (0.0 ante fallo/cancelación).
    pub similarity: f64,
    /// Duración física de la comparación.
    pub wall_time: Duration,
}

/// Corrida completa de una variante de aplicación.
#[derive(Debug, Clone)]
pub struct VariantRun {
    /// Resultados por librería (orden estable del roster).
    pub results: Vec<TestResult>,
    /// Duración física de la variante completa.
    pub wall_time: Duration,
}

/// Driver de evaluación paralela del dataset.
pub struct BenchmarkDriver {
    layout: DatasetLayout,
    registry: StrategyRegistry,
    thresholds: ThresholdConfig,
    composer: Arc<dyn ProfileComposer>,
    cache_profiles: bool,
    memoized_libraries: Option<Arc<Vec<(String, ProfileManager)>>>,
    cancel_token: Arc<AtomicBool>,
    task_timeout: Option<Duration>,
    memory_pressure_hook: Arc<dyn Fn() + Send + Sync>,
    worker_count: usize,
    error_tally: u64,
}

impl BenchmarkDriver {
    /// Construye el driver con el pool por defecto (CPU count).
    #[must_use]
    pub fn new(
        layout: DatasetLayout,
        registry: StrategyRegistry,
        thresholds: ThresholdConfig,
        composer: Arc<dyn ProfileComposer>,
        cache_profiles: bool,
    ) -> Self {
        Self {
            layout,
            registry,
            thresholds,
            composer,
            cache_profiles,
            memoized_libraries: None,
            cancel_token: Arc::new(AtomicBool::new(false)),
            task_timeout: None,
            memory_pressure_hook: Arc::new(|| {}),
            worker_count: num_cpus::get(),
            error_tally: 0,
        }
    }

    /// Inyecta el token de cancelación cooperativa.
    pub fn with_cancel_token(mut self, cancel_token: Arc<AtomicBool>) -> Self {
        self.cancel_token = cancel_token;
        self
    }

    /// Fija el timeout cooperativo por tarea.
    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Fija la cardinalidad del pool de workers.
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count.max(1);
        self
    }

    /// Inyecta el gancho consultivo de presión de memoria.
    pub fn with_memory_pressure_hook(mut self, hook: Arc<dyn Fn() + Send + Sync>) -> Self {
        self.memory_pressure_hook = hook;
        self
    }

    /// Tally acumulado de fallos por par de la corrida.
    #[must_use]
    pub fn error_tally(&self) -> u64 {
        self.error_tally
    }

    /**
     * Memoriza (o recarga) el roster completo de perfiles de librería.
     *
     * # Errors:
     * Propaga fallos de I/O y de formato de los artefactos.
     */
    #[instrument(skip(self))]
    pub fn load_libraries(&mut self) -> Result<Arc<Vec<(String, ProfileManager)>>> {
        if self.cache_profiles {
            if let Some(memoized) = &self.memoized_libraries {
                return Ok(memoized.clone());
            }
        }

        let load_timer = Instant::now();
        let mut roster = Vec::new();
        for profile_path in self
            .layout
            .list_library_profiles()
            .context("enumeración de perfiles de librería")?
        {
            let library_identifier = profile_path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string();
            let manager = load_profile(&profile_path, self.composer.as_ref())
                .with_context(|| format!("hidratación de '{library_identifier}'"))?;
            roster.push((library_identifier, manager));
        }

        info!(
            "📚 [LIBRARIES_HYDRATED]: {} profiles in {:?} (cache={}).",
            roster.len(),
            load_timer.elapsed(),
            self.cache_profiles
        );

        let shared_roster = Arc::new(roster);
        if self.cache_profiles {
            self.memoized_libraries = Some(shared_roster.clone());
        }
        Ok(shared_roster)
    }

    /**
     * Evalúa todas las variantes de una aplicación contra el roster.
     *
     * # Returns:
     * Mapa variante → corrida, con los resultados en el orden estable
     * del roster de librerías.
     */
    #[instrument(skip(self), fields(app = %app_short_name))]
    pub fn benchmark(
        &mut self,
        app_short_name: &str,
        library_filter: Option<&[String]>,
    ) -> Result<BTreeMap<String, VariantRun>> {
        let libraries = self.load_libraries()?;
        let variant_roster = self
            .layout
            .list_app_profile_variants(app_short_name)
            .context("enumeración de variantes de la aplicación")?;

        let worker_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .build()
            .context("construcción del pool de workers")?;

        let mut runs: BTreeMap<String, VariantRun> = BTreeMap::new();
        for (variant_label, profile_path) in variant_roster {
            let variant_timer = Instant::now();
            let app_manager = load_profile(&profile_path, self.composer.as_ref())
                .with_context(|| format!("hidratación de la variante '{variant_label}'"))?;

            let comparable: Vec<&(String, ProfileManager)> = libraries
                .iter()
                .filter(|(library_identifier, _)| match library_filter {
                    Some(filter) => filter.iter().any(|case| case == library_identifier),
                    None => true,
                })
                .collect();

            let progress = ProgressBar::new(comparable.len() as u64);
            progress.set_style(
                ProgressStyle::with_template(
                    "⚖️  {prefix} [{bar:32}] {pos}/{len} ({elapsed})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            progress.set_prefix(variant_label.clone());

            // Vista compartida del driver para las tareas del pool.
            let driver_view: &Self = &*self;
            let results: Vec<TestResult> = worker_pool.install(|| {
                comparable
                    .par_iter()
                    .map(|(library_identifier, library_manager)| {
                        let result = driver_view.evaluate_pair(
                            &app_manager,
                            library_identifier,
                            library_manager,
                        );
                        progress.inc(1);
                        result
                    })
                    .collect()
            });
            progress.finish_and_clear();

            let failed_pairs = results
                .iter()
                .filter(|result| matches!(result.status, TestStatus::Failure { .. }))
                .count() as u64;
            self.error_tally += failed_pairs;
            if failed_pairs > 0 {
                warn!(
                    "🧯 [PAIR_FAULTS]: {} contained failures in variant '{}'.",
                    failed_pairs, variant_label
                );
            }

            runs.insert(
                variant_label,
                VariantRun { results, wall_time: variant_timer.elapsed() },
            );
        }
        Ok(runs)
    }

    /// Evalúa un único par (app, librería) con contención de fallos.
    fn evaluate_pair(
        &self,
        app_manager: &ProfileManager,
        library_identifier: &str,
        library_manager: &ProfileManager,
    ) -> TestResult {
        // Gancho consultivo de presión de memoria (jamás semántico).
        (self.memory_pressure_hook)();

        // Cancelación cooperativa entre librerías.
        if self.cancel_token.load(Ordering::SeqCst) {
            return TestResult {
                library: library_identifier.to_string(),
                status: TestStatus::Cancelled,
                similarity: 0.0,
                wall_time: Duration::ZERO,
            };
        }

        let pair_timer = Instant::now();
        let verdict = self.registry.similarity_of(
            &self.thresholds,
            ProfileRef::Cha(app_manager),
            ProfileRef::Cha(library_manager),
        );
        let wall_time = pair_timer.elapsed();

        match verdict {
            Ok(similarity) => {
                if let Some(timeout) = self.task_timeout {
                    if wall_time > timeout {
                        return TestResult {
                            library: library_identifier.to_string(),
                            status: TestStatus::Timeout,
                            similarity: 0.0,
                            wall_time,
                        };
                    }
                }
                TestResult {
                    library: library_identifier.to_string(),
                    status: TestStatus::Ok,
                    similarity,
                    wall_time,
                }
            }
            Err(pair_fault) => TestResult {
                library: library_identifier.to_string(),
                status: TestStatus::Failure {
                    kind: match &pair_fault {
                        librarius_domain_strategy::StrategyError::UnsupportedKind { .. } => {
                            "unsupported-kind".to_string()
                        }
                        librarius_domain_strategy::StrategyError::KindMismatch { .. } => {
                            "kind-mismatch".to_string()
                        }
                        librarius_domain_strategy::StrategyError::AlgorithmFailure { .. } => {
                            "algorithm-failure".to_string()
                        }
                        librarius_domain_strategy::StrategyError::Profile(_) => {
                            "profile-fault".to_string()
                        }
                    },
                    message: pair_fault.to_string(),
                },
                similarity: 0.0,
                wall_time,
            },
        }
    }
}
