// [libs/domain/strategy/src/engines/profile_bipartite.rs]
/*!
 * =================================================================
 * APARATO: PROFILE BIPARTITE ENGINE (V12.2 - TOP LAYER)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD DE PERFIL COMPLETO POR EMPAREJAMIENTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CANONICAL ORDERING: Ante estrategias asimétricas, la bandera
 *    'is_app_profile' de los gestores fija el ordenamiento (app, lib)
 *    antes de construir las particiones.
 * 2. LAYER COMPOSITION: La capa de perfil delega el peso de arista en
 *    la estrategia de clase inyectada; la agregación es conectable
 *    (razón normativa o multi-fase).
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::matching::{BipartiteMatcher, MatchResultHandler, MatchingAlgorithm};
use crate::registry::{ProfileRef, SimilarityContext, SimilarityStrategy};
use librarius_domain_profiles::ProfileKind;
use std::sync::Arc;
use tracing::trace;

/// Motor de similitud de perfil completo (capa superior).
pub struct ProfileBipartiteStrategy {
    matcher: BipartiteMatcher,
    class_strategy: Arc<dyn SimilarityStrategy>,
    handler: Arc<dyn MatchResultHandler>,
}

impl ProfileBipartiteStrategy {
    /// Construye el motor con su estrategia de clase y agregador.
    #[must_use]
    pub fn new(
        algorithm: MatchingAlgorithm,
        class_strategy: Arc<dyn SimilarityStrategy>,
        handler: Arc<dyn MatchResultHandler>,
    ) -> Self {
        Self {
            matcher: BipartiteMatcher::new(algorithm),
            class_strategy,
            handler,
        }
    }
}

impl SimilarityStrategy for ProfileBipartiteStrategy {
    fn similarity(
        &self,
        ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        // Ordenamiento canónico (app, lib) por bandera de gestor.
        let (app, lib) = if !app.manager().is_app_profile() && lib.manager().is_app_profile() {
            (lib, app)
        } else {
            (app, lib)
        };

        let (app_manager, lib_manager) = match (app, lib) {
            (ProfileRef::Cha(app_manager), ProfileRef::Cha(lib_manager)) => {
                (app_manager, lib_manager)
            }
            _ => {
                return Err(StrategyError::KindMismatch {
                    app_kind: app.kind(),
                    lib_kind: lib.kind(),
                })
            }
        };

        let app_vertices: Vec<ProfileRef<'_>> = (0..app_manager.classes()?.len())
            .map(|index| ProfileRef::Class(app_manager, index as u32))
            .collect();
        let lib_vertices: Vec<ProfileRef<'_>> = (0..lib_manager.classes()?.len())
            .map(|index| ProfileRef::Class(lib_manager, index as u32))
            .collect();

        let outcome = self.matcher.match_layer(
            ctx,
            ProfileKind::Class,
            self.class_strategy.as_ref(),
            &app_vertices,
            &lib_vertices,
        )?;

        let aggregated = self.handler.aggregate(ctx, &outcome)?;
        trace!(
            "🏛️ [PROFILE_LAYER]: app={} lib={} matched={} score={:.4}",
            outcome.app_vertex_count,
            outcome.lib_vertex_count,
            outcome.pairs.len(),
            aggregated
        );
        Ok(aggregated)
    }
}
