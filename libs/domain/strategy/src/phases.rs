// [libs/domain/strategy/src/phases.rs]
/*!
 * =================================================================
 * APARATO: MULTI-PHASE HANDLER (V12.1 - LAYER REFINEMENT)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: REFINAMIENTO DE PARES EMPAREJADOS POR CAPA SIGUIENTE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RATIO GATE: Si la razón emparejada de la capa primaria cae bajo
 *    el umbral configurado de la capa, el score colapsa a 0 sin
 *    invocar la capa siguiente (filtro barato primero).
 * 2. WEIGHTED MEAN: Cada par refinado pondera por el payload 'wgt' del
 *    vértice de librería (1 por defecto); la media ponderada se
 *    satura en 1.
 * 3. ZERO-WEIGHT FALLBACK: Con Σw = 0 la agregación degrada a
 *    Σr / |V_lib|.
 *
 * # Mathematical Proof (Saturation):
 * min(1, Σ r_i·w_i / Σ w_i) ∈ [0,1] siempre que r_i ∈ [0,1] y w_i ≥ 0;
 * la saturación solo actúa ante redondeos de coma flotante.
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::matching::{MatchOutcome, MatchResultHandler};
use crate::registry::{SimilarityContext, SimilarityStrategy};
use librarius_domain_profiles::{FeaturePayload, ProfileKind, WEIGHT_PAYLOAD_KEY};
use std::sync::Arc;
use tracing::trace;

/// Agregador multi-fase: refina cada par con la estrategia σ′ de la
/// capa siguiente.
pub struct MultiPhaseHandler {
    /// Tipo de la capa primaria (lee su umbral de razón emparejada).
    layer_kind: ProfileKind,
    /// Estrategia σ′ de refinamiento por par.
    next_strategy: Arc<dyn SimilarityStrategy>,
}

impl MultiPhaseHandler {
    /// Construye el agregador para una capa y su refinador σ′.
    #[must_use]
    pub fn new(layer_kind: ProfileKind, next_strategy: Arc<dyn SimilarityStrategy>) -> Self {
        Self { layer_kind, next_strategy }
    }
}

impl MatchResultHandler for MultiPhaseHandler {
    fn aggregate(
        &self,
        ctx: &SimilarityContext<'_>,
        outcome: &MatchOutcome<'_>,
    ) -> Result<f64, StrategyError> {
        if outcome.lib_vertex_count == 0 || outcome.app_vertex_count == 0 {
            return Ok(0.0);
        }

        // 1. FILTRO DE RAZÓN DE CAPA
        let layer_threshold = ctx.thresholds.threshold_for(self.layer_kind);
        let matched_ratio = outcome.matched_ratio();
        if matched_ratio < layer_threshold {
            trace!(
                "🚧 [PHASE_FILTER]: ratio {:.3} < threshold {:.3} for {:?}; score 0",
                matched_ratio,
                layer_threshold,
                self.layer_kind
            );
            return Ok(0.0);
        }

        // 2. REFINAMIENTO σ′ PONDERADO
        let mut weighted_accumulator = 0.0f64;
        let mut weight_accumulator = 0.0f64;
        let mut plain_accumulator = 0.0f64;

        for pair in &outcome.pairs {
            let refined = self
                .next_strategy
                .similarity(ctx, pair.app, pair.lib)?
                .clamp(0.0, 1.0);

            let vertex_weight = match pair.lib.payload()? {
                Some(store) => match store.get(WEIGHT_PAYLOAD_KEY) {
                    Some(FeaturePayload::Weight(weight)) => *weight as f64,
                    _ => 1.0,
                },
                None => 1.0,
            };

            weighted_accumulator += refined * vertex_weight;
            weight_accumulator += vertex_weight;
            plain_accumulator += refined;
        }

        // 3. AGREGACIÓN CON SATURACIÓN
        if weight_accumulator > 0.0 {
            Ok((weighted_accumulator / weight_accumulator).min(1.0))
        } else {
            Ok(plain_accumulator / outcome.lib_vertex_count as f64)
        }
    }
}
