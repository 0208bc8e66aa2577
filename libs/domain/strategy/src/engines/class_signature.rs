// [libs/domain/strategy/src/engines/class_signature.rs]
/*!
 * =================================================================
 * APARATO: CLASS SIGNATURE ENGINE (V12.2 - PAYLOAD BLEND)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD PAR A PAR DE CLASES SIN RECURSIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DOCUMENT SHORTCUT: Hash djb2 de documento igual + descriptor
 *    igual ⟹ 1.0 (testigo textual idéntico).
 * 2. PAYLOAD BLEND: 0.2·firma + 0.4·solapamiento Bloom + 0.2·localidad
 *    + 0.2·hash de documento; cada componente vive en [0,1].
 * 3. NO RECURSION: Este motor es la σ par a par barata de la capa de
 *    perfil; la descomposición en métodos vive en el motor bipartito.
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::registry::{ProfileRef, SimilarityContext, SimilarityStrategy};
use crate::steps::{BLOOM_PAYLOAD_KEY, DOC_HASH_PAYLOAD_KEY, LOCALITY_PAYLOAD_KEY};
use librarius_domain_profiles::FeaturePayload;

/// Motor de similitud de clases por firma y payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassSignatureStrategy;

impl SimilarityStrategy for ClassSignatureStrategy {
    fn similarity(
        &self,
        ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        let descriptor_match = app.descriptor_text()? == lib.descriptor_text()?;
        let descriptor_component = if descriptor_match { 1.0 } else { 0.0 };

        let (Some(app_store), Some(lib_store)) = (app.payload()?, lib.payload()?) else {
            return Ok(descriptor_component);
        };

        // Identidad exacta: firma igual + payloads iguales ⟹ 1.0.
        if descriptor_match && app_store == lib_store {
            return Ok(1.0);
        }

        // Atajo de documento: testigos textuales idénticos.
        let document_hash_component = match (
            app_store.get(DOC_HASH_PAYLOAD_KEY),
            lib_store.get(DOC_HASH_PAYLOAD_KEY),
        ) {
            (Some(FeaturePayload::Hash32(app_hash)), Some(FeaturePayload::Hash32(lib_hash))) => {
                if app_hash == lib_hash {
                    if descriptor_match {
                        return Ok(1.0);
                    }
                    1.0
                } else {
                    0.0
                }
            }
            _ => descriptor_component,
        };

        // Componente de solapamiento Bloom.
        let bloom_component = match (
            app_store.get(BLOOM_PAYLOAD_KEY),
            lib_store.get(BLOOM_PAYLOAD_KEY),
        ) {
            (Some(FeaturePayload::Bloom(app_bloom)), Some(FeaturePayload::Bloom(lib_bloom))) => {
                app_bloom.overlap_ratio(lib_bloom)
            }
            _ => descriptor_component,
        };

        // Componente de localidad del documento.
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

        Ok(0.2 * descriptor_component
            + 0.4 * bloom_component
            + 0.2 * locality_component
            + 0.2 * document_hash_component)
    }
}
