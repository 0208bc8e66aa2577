// [libs/domain/strategy/src/engines/class_bipartite.rs]
/*!
 * =================================================================
 * APARATO: CLASS BIPARTITE ENGINE (V12.1 - METHOD LAYER)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD DE CLASES POR EMPAREJAMIENTO DE MÉTODOS
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::matching::{BipartiteMatcher, MatchResultHandler, MatchingAlgorithm};
use crate::registry::{ProfileRef, SimilarityContext, SimilarityStrategy};
use librarius_domain_profiles::{ProfileKind, ProfileManager};
use std::sync::Arc;

/// Motor de similitud de clase por descomposición en métodos.
pub struct ClassBipartiteStrategy {
    matcher: BipartiteMatcher,
    method_strategy: Arc<dyn SimilarityStrategy>,
    handler: Arc<dyn MatchResultHandler>,
}

impl ClassBipartiteStrategy {
    /// Construye el motor con su estrategia de método y agregador.
    #[must_use]
    pub fn new(
        algorithm: MatchingAlgorithm,
        method_strategy: Arc<dyn SimilarityStrategy>,
        handler: Arc<dyn MatchResultHandler>,
    ) -> Self {
        Self {
            matcher: BipartiteMatcher::new(algorithm),
            method_strategy,
            handler,
        }
    }

    /// Vértices de método de una clase (vacío si el roster no existe).
    fn method_vertices<'a>(
        manager: &'a ProfileManager,
        class_index: u32,
    ) -> Result<Vec<ProfileRef<'a>>, StrategyError> {
        let class_item = manager
            .classes()?
            .get(class_index as usize)
            .ok_or_else(|| {
                StrategyError::algorithm(format!("índice de clase colgante: {class_index}"))
            })?;
        Ok(class_item
            .method_indices
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|method_index| ProfileRef::Method(manager, method_index))
            .collect())
    }
}

impl SimilarityStrategy for ClassBipartiteStrategy {
    fn similarity(
        &self,
        ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        let (app_vertices, lib_vertices) = match (app, lib) {
            (ProfileRef::Class(app_manager, app_index), ProfileRef::Class(lib_manager, lib_index)) => (
                Self::method_vertices(app_manager, app_index)?,
                Self::method_vertices(lib_manager, lib_index)?,
            ),
            _ => {
                return Err(StrategyError::KindMismatch {
                    app_kind: app.kind(),
                    lib_kind: lib.kind(),
                })
            }
        };

        let outcome = self.matcher.match_layer(
            ctx,
            ProfileKind::Method,
            self.method_strategy.as_ref(),
            &app_vertices,
            &lib_vertices,
        )?;
        self.handler.aggregate(ctx, &outcome)
    }
}
