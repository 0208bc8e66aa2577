// [libs/domain/strategy/src/matching.rs]
/*!
 * =================================================================
 * APARATO: BIPARTITE MATCHER (V12.2 - KUHN-MUNKRES SOBERANO)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: EMPAREJAMIENTO PONDERADO DE SUB-PERFILES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STANDARD MATCHER: Kuhn-Munkres de la crate 'pathfinding'; salida
 *    determinista ante pesos empatados.
 * 2. FIXED-POINT WEIGHTS: Similitudes f64 ∈ [0,1] escaladas a i64
 *    (×10^6) para satisfacer el orden total que exige el algoritmo.
 * 3. DUAL ALGORITHM: MaxWeight maximiza el peso; HungarianMinCost
 *    minimiza el costo 1−w. Seleccionable por capa.
 * 4. EDGE DISCIPLINE: El grafo se restringe ANTES del emparejamiento:
 *    por cada v_lib, solo los v_app con similitud ≥ umbral del tipo
 *    par (y estrictamente positiva) materializan una correspondencia.
 *    Las no-aristas entran al algoritmo como centinela prohibitivo y
 *    jamás compiten con una arista real ni emiten pares.
 *
 * # Mathematical Proof (Transpose & Sentinel Safety):
 * Kuhn-Munkres exige filas ≤ columnas; transponer la matriz preserva
 * el emparejamiento óptimo (el grafo bipartito es simétrico respecto
 * de sus particiones) y la orientación se des-transpone al emitir.
 * El centinela |S| = (filas + 1)·ESCALA domina la ganancia agregada
 * máxima de aristas reales (≤ filas·ESCALA): toda asignación con menos
 * centinelas vence a cualquiera con más, de modo que el óptimo
 * maximiza primero la cardinalidad de aristas reales y después su peso.
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::registry::{ProfileRef, SimilarityContext, SimilarityStrategy};
use librarius_domain_profiles::ProfileKind;
use pathfinding::matrix::Matrix;
use pathfinding::prelude::{kuhn_munkres, kuhn_munkres_min};
use std::collections::HashSet;
use tracing::trace;

/// Escala de punto fijo de los pesos (10^6 preserva 6 decimales).
const WEIGHT_SCALE: f64 = 1_000_000.0;

/// Algoritmo de emparejamiento seleccionable por capa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingAlgorithm {
    /// Emparejamiento bipartito de peso máximo.
    MaxWeight,
    /// Emparejamiento húngaro de costo mínimo (costo = 1 − peso).
    HungarianMinCost,
}

/// Par emparejado con su peso de arista.
#[derive(Clone, Copy)]
pub struct MatchedPair<'a> {
    /// Vértice de la partición de aplicación.
    pub app: ProfileRef<'a>,
    /// Vértice de la partición de librería.
    pub lib: ProfileRef<'a>,
    /// Similitud par a par de la arista.
    pub weight: f64,
}

/// Resultado del emparejamiento de una capa.
pub struct MatchOutcome<'a> {
    /// Aristas emparejadas que superaron el umbral del tipo par.
    pub pairs: Vec<MatchedPair<'a>>,
    /// Cardinalidad de la partición de aplicación.
    pub app_vertex_count: usize,
    /// Cardinalidad de la partición de librería.
    pub lib_vertex_count: usize,
}

impl MatchOutcome<'_> {
    /// Razón de aristas emparejadas sobre |V_lib|.
    #[must_use]
    pub fn matched_ratio(&self) -> f64 {
        if self.lib_vertex_count == 0 {
            return 0.0;
        }
        self.pairs.len() as f64 / self.lib_vertex_count as f64
    }

    /// Verdadero cuando todo vértice de librería quedó emparejado.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.lib_vertex_count > 0 && self.pairs.len() == self.lib_vertex_count
    }
}

/// Agregador del resultado de una capa emparejada.
pub trait MatchResultHandler: Send + Sync {
    /// Colapsa el resultado del emparejamiento a una similitud [0,1].
    fn aggregate(
        &self,
        ctx: &SimilarityContext<'_>,
        outcome: &MatchOutcome<'_>,
    ) -> Result<f64, StrategyError>;
}

/// Agregación normativa: perfecto ⇒ 1.0; si no, |emparejadas| / |V_lib|.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRatioHandler;

impl MatchResultHandler for DefaultRatioHandler {
    fn aggregate(
        &self,
        _ctx: &SimilarityContext<'_>,
        outcome: &MatchOutcome<'_>,
    ) -> Result<f64, StrategyError> {
        if outcome.app_vertex_count == 0 || outcome.lib_vertex_count == 0 {
            return Ok(0.0);
        }
        if outcome.is_perfect() {
            return Ok(1.0);
        }
        Ok(outcome.matched_ratio())
    }
}

/// Emparejador bipartito de una capa de sub-perfiles.
#[derive(Debug, Clone, Copy)]
pub struct BipartiteMatcher {
    algorithm: MatchingAlgorithm,
}

impl BipartiteMatcher {
    /// Construye el emparejador con el algoritmo indicado.
    #[must_use]
    pub fn new(algorithm: MatchingAlgorithm) -> Self {
        Self { algorithm }
    }

    /**
     * Empareja dos particiones de sub-perfiles comparables.
     *
     * # Logic:
     * 1. Correspondencias: σ sobre el producto de particiones; SOLO una
     *    similitud ≥ umbral del tipo par y estrictamente positiva
     *    materializa una arista del grafo bipartito.
     * 2. Kuhn-Munkres (máximo peso o costo mínimo 1−w) sobre el grafo
     *    YA restringido; las no-aristas viajan como centinela
     *    prohibitivo y jamás influyen en el óptimo real.
     * 3. Las asignaciones que caen sobre una arista real emiten los
     *    pares emparejados; las que caen sobre el centinela son relleno
     *    de la asignación completa, no aristas.
     *
     * # Errors:
     * `AlgorithmFailure` ante similitud no finita, matriz inconstruible
     * o asignación internamente inconsistente.
     */
    pub fn match_layer<'a>(
        &self,
        ctx: &SimilarityContext<'_>,
        pairwise_kind: ProfileKind,
        pairwise: &dyn SimilarityStrategy,
        app_vertices: &[ProfileRef<'a>],
        lib_vertices: &[ProfileRef<'a>],
    ) -> Result<MatchOutcome<'a>, StrategyError> {
        let app_vertex_count = app_vertices.len();
        let lib_vertex_count = lib_vertices.len();

        // Particiones degeneradas: resultado vacío, score 0 aguas arriba.
        if app_vertex_count == 0 || lib_vertex_count == 0 {
            return Ok(MatchOutcome { pairs: Vec::new(), app_vertex_count, lib_vertex_count });
        }

        // 1. CORRESPONDENCIAS (σ sobre el producto + restricción del grafo)
        // El grafo se restringe ANTES del emparejamiento: por cada
        // v_lib, solo los v_app con similitud ≥ umbral del tipo par
        // (y > 0) aportan una arista.
        let pair_threshold = ctx.thresholds.threshold_for(pairwise_kind);
        let mut similarity_matrix = vec![vec![0.0f64; lib_vertex_count]; app_vertex_count];
        let mut edge_matrix = vec![vec![false; lib_vertex_count]; app_vertex_count];
        for (app_ordinal, app_vertex) in app_vertices.iter().enumerate() {
            for (lib_ordinal, lib_vertex) in lib_vertices.iter().enumerate() {
                let raw = pairwise.similarity(ctx, *app_vertex, *lib_vertex)?;
                if !raw.is_finite() {
                    return Err(StrategyError::algorithm(format!(
                        "similitud par a par no finita en ({app_ordinal}, {lib_ordinal})"
                    )));
                }
                let similarity = raw.clamp(0.0, 1.0);
                similarity_matrix[app_ordinal][lib_ordinal] = similarity;
                edge_matrix[app_ordinal][lib_ordinal] =
                    similarity > 0.0 && similarity >= pair_threshold;
            }
        }

        // 2. ASIGNACIÓN KUHN-MUNKRES SOBRE EL GRAFO RESTRINGIDO
        // (filas ≤ columnas por transposición). El algoritmo exige una
        // matriz completa; las no-aristas reciben un centinela
        // prohibitivo cuyo módulo excede cualquier ganancia agregada de
        // aristas reales, de modo que el óptimo jamás sacrifica una
        // arista real por una sustitución sub-umbral.
        let transposed = app_vertex_count > lib_vertex_count;
        let (row_count, column_count) = if transposed {
            (lib_vertex_count, app_vertex_count)
        } else {
            (app_vertex_count, lib_vertex_count)
        };
        let forbidden_sentinel = (WEIGHT_SCALE as i64) * (row_count as i64 + 1);

        let fixed_point_rows: Vec<Vec<i64>> = (0..row_count)
            .map(|row| {
                (0..column_count)
                    .map(|column| {
                        let (app_ordinal, lib_ordinal) =
                            if transposed { (column, row) } else { (row, column) };
                        let similarity = similarity_matrix[app_ordinal][lib_ordinal];
                        let edge_exists = edge_matrix[app_ordinal][lib_ordinal];
                        match self.algorithm {
                            MatchingAlgorithm::MaxWeight => {
                                if edge_exists {
                                    (similarity * WEIGHT_SCALE).round() as i64
                                } else {
                                    -forbidden_sentinel
                                }
                            }
                            MatchingAlgorithm::HungarianMinCost => {
                                if edge_exists {
                                    ((1.0 - similarity) * WEIGHT_SCALE).round() as i64
                                } else {
                                    forbidden_sentinel
                                }
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        let weight_matrix = Matrix::from_rows(fixed_point_rows).map_err(|matrix_fault| {
            StrategyError::algorithm(format!("matriz de pesos inconstruible: {matrix_fault:?}"))
        })?;

        let (_, assignment) = match self.algorithm {
            MatchingAlgorithm::MaxWeight => kuhn_munkres(&weight_matrix),
            MatchingAlgorithm::HungarianMinCost => kuhn_munkres_min(&weight_matrix),
        };

        // 3. AUDITORÍA DE CONSISTENCIA DE LA ASIGNACIÓN
        if assignment.len() != row_count {
            return Err(StrategyError::algorithm(format!(
                "asignación de cardinalidad {} para {} filas",
                assignment.len(),
                row_count
            )));
        }
        let mut observed_columns: HashSet<usize> = HashSet::with_capacity(assignment.len());
        for assigned_column in &assignment {
            if *assigned_column >= column_count || !observed_columns.insert(*assigned_column) {
                return Err(StrategyError::algorithm(format!(
                    "columna asignada inconsistente: {assigned_column}"
                )));
            }
        }

        // 4. EMISIÓN DE PARES: solo las asignaciones que caen sobre una
        // arista real del grafo restringido son emparejamientos; el
        // resto es relleno del centinela y se descarta.
        let mut pairs = Vec::with_capacity(assignment.len());
        for (row, assigned_column) in assignment.iter().enumerate() {
            let (app_ordinal, lib_ordinal) = if transposed {
                (*assigned_column, row)
            } else {
                (row, *assigned_column)
            };
            if edge_matrix[app_ordinal][lib_ordinal] {
                pairs.push(MatchedPair {
                    app: app_vertices[app_ordinal],
                    lib: lib_vertices[lib_ordinal],
                    weight: similarity_matrix[app_ordinal][lib_ordinal],
                });
            }
        }

        trace!(
            "🕸️ [MATCH_LAYER]: kind={:?} app={} lib={} matched={}",
            pairwise_kind,
            app_vertex_count,
            lib_vertex_count,
            pairs.len()
        );

        Ok(MatchOutcome { pairs, app_vertex_count, lib_vertex_count })
    }
}
