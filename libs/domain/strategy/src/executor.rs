// [libs/domain/strategy/src/executor.rs]
/*!
 * =================================================================
 * APARATO: PIPELINE EXECUTOR (V12.0 - TOPOLOGICAL DISPATCH)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: DESPACHO ORDENADO DE PASOS DE EXTRACCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TOPOLOGICAL ORDER: perfil → paquete → clase → método/campo; cada
 *    fase puebla la arena que la siguiente referencia por índice.
 * 2. SINGLE WRITER: La fase de construcción es de escritor único; un
 *    hilo recorre la jerarquía y muta el gestor objetivo. El
 *    paralelismo vive exclusivamente en la fase de similitud.
 * 3. ASSIGNABILITY CHECK: El ejecutor verifica 'applies_to' antes de
 *    invocar cada paso; un paso jamás observa un tipo ajeno.
 * 4. DETERMINISM SEAL: Mismo (vista, estrategia) ⟹ mismo gestor,
 *    byte-idéntico tras la cristalización.
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::registry::{ExtractionContext, StrategyRegistry};
use librarius_domain_profiles::{ProfileKind, ProfileManager};
use tracing::{debug, instrument};

/// Ejecutor del pipeline de extracción de características.
pub struct PipelineExecutor;

impl PipelineExecutor {
    /**
     * Ejecuta todos los pasos registrados sobre el gestor objetivo.
     *
     * # Logic:
     * Para cada tipo K en orden topológico, despacha los pasos de K
     * por prioridad ascendente (desempate por inserción). Los efectos
     * de cada paso se confinan al gestor objetivo.
     *
     * # Errors:
     * Propaga el primer fallo de paso; el gestor queda en estado
     * parcial y debe descartarse.
     */
    #[instrument(skip_all, fields(is_app = target.is_app_profile()))]
    pub fn run(
        registry: &StrategyRegistry,
        ctx: &ExtractionContext<'_>,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        for kind in ProfileKind::build_order() {
            let steps = registry.feature_extractors(kind);
            if steps.is_empty() {
                continue;
            }
            debug!("⚙️ [PIPELINE_PHASE]: kind={:?} steps={}", kind, steps.len());

            for step in steps {
                // Verificación de asignabilidad previa al despacho.
                if !step.applies_to(kind) {
                    continue;
                }
                step.execute(ctx, registry, target)?;
            }
        }
        Ok(())
    }
}
