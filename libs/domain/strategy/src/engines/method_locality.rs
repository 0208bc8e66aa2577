// [libs/domain/strategy/src/engines/method_locality.rs]
/*!
 * =================================================================
 * APARATO: METHOD LOCALITY ENGINE (V12.2 - LEAF LAYER)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD DE MÉTODOS POR FIRMA + LOCALIDAD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. IDENTITY FAST-PATH: Descriptores iguales (por cadena internada) y
 *    payloads iguales componente a componente ⟹ 1.0 exacto.
 * 2. DISTANCE MAPPING: La distancia TLSH d se proyecta a similitud
 *    max(0, (U − d)/U) con U de la configuración (150 por defecto).
 * 3. BLEND DISCIPLINE: Mezcla fija 0.3·firma + 0.4·localidad +
 *    0.3·rodante; cada componente vive en [0,1] ⟹ la mezcla también.
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::registry::{ProfileRef, SimilarityContext, SimilarityStrategy};
use crate::steps::{LOCALITY_PAYLOAD_KEY, ROLLING_PAYLOAD_KEY};
use librarius_domain_profiles::FeaturePayload;

/// Motor de similitud de métodos (capa hoja).
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodLocalityStrategy;

impl SimilarityStrategy for MethodLocalityStrategy {
    fn similarity(
        &self,
        ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        let descriptor_match = app.descriptor_text()? == lib.descriptor_text()?;
        let descriptor_component = if descriptor_match { 1.0 } else { 0.0 };

        let app_store = app.payload()?;
        let lib_store = lib.payload()?;

        let (Some(app_store), Some(lib_store)) = (app_store, lib_store) else {
            return Ok(descriptor_component);
        };

        // Identidad exacta: firma igual + payloads iguales ⟹ 1.0.
        if descriptor_match && app_store == lib_store {
            return Ok(1.0);
        }

        // Componente de localidad.
        let locality_component = match (
            app_store.get(LOCALITY_PAYLOAD_KEY),
            lib_store.get(LOCALITY_PAYLOAD_KEY),
        ) {
            (
                Some(FeaturePayload::Locality(Some(app_digest))),
                Some(FeaturePayload::Locality(Some(lib_digest))),
            ) => {
                let distance_bound = ctx.thresholds.locality_distance_bound();
                let distance = f64::from(app_digest.diff(lib_digest));
                ((distance_bound - distance) / distance_bound).max(0.0)
            }
            (
                Some(FeaturePayload::Locality(None)),
                Some(FeaturePayload::Locality(None)),
            ) => descriptor_component,
            (Some(FeaturePayload::Locality(_)), Some(FeaturePayload::Locality(_))) => 0.0,
            _ => descriptor_component,
        };

        // Componente rodante.
        let rolling_component = match (
            app_store.get(ROLLING_PAYLOAD_KEY),
            lib_store.get(ROLLING_PAYLOAD_KEY),
        ) {
            (Some(FeaturePayload::Rolling(app_set)), Some(FeaturePayload::Rolling(lib_set))) => {
                if app_set == lib_set {
                    1.0
                } else {
                    app_set.jaccard(lib_set)
                }
            }
            _ => descriptor_component,
        };

        Ok(0.3 * descriptor_component + 0.4 * locality_component + 0.3 * rolling_component)
    }
}
