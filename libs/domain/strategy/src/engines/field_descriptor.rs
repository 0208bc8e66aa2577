// [libs/domain/strategy/src/engines/field_descriptor.rs]
/*!
 * =================================================================
 * APARATO: FIELD DESCRIPTOR ENGINE (V12.0 - EXACT MATCH)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD BINARIA DE CAMPOS POR DESCRIPTOR
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::registry::{ProfileRef, SimilarityContext, SimilarityStrategy};

/// Motor de similitud de campos: igualdad de descriptor (1.0 / 0.0).
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldDescriptorStrategy;

impl SimilarityStrategy for FieldDescriptorStrategy {
    fn similarity(
        &self,
        _ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        Ok(if app.descriptor_text()? == lib.descriptor_text()? { 1.0 } else { 0.0 })
    }
}
