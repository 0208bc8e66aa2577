// [libs/domain/strategy/src/engines/package_roster.rs]
/*!
 * =================================================================
 * APARATO: PACKAGE ROSTER ENGINE (V12.1 - CONTAINMENT LAYER)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD DE PAQUETES POR SUS CLASES CONTENIDAS
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::matching::{BipartiteMatcher, DefaultRatioHandler, MatchResultHandler, MatchingAlgorithm};
use crate::registry::{ProfileRef, SimilarityContext, SimilarityStrategy};
use librarius_domain_profiles::{ProfileKind, ProfileManager};
use std::sync::Arc;

/// Motor de similitud de paquetes por emparejamiento de su roster.
pub struct PackageRosterStrategy {
    matcher: BipartiteMatcher,
    class_strategy: Arc<dyn SimilarityStrategy>,
}

impl PackageRosterStrategy {
    /// Construye el motor con la estrategia de clase inyectada.
    #[must_use]
    pub fn new(algorithm: MatchingAlgorithm, class_strategy: Arc<dyn SimilarityStrategy>) -> Self {
        Self { matcher: BipartiteMatcher::new(algorithm), class_strategy }
    }

    /// Vértices de clase contenidos en un paquete.
    fn class_vertices<'a>(
        manager: &'a ProfileManager,
        package_index: u32,
    ) -> Result<Vec<ProfileRef<'a>>, StrategyError> {
        let package = manager
            .packages()?
            .get(package_index as usize)
            .ok_or_else(|| {
                StrategyError::algorithm(format!("índice de paquete colgante: {package_index}"))
            })?;
        Ok(package
            .classes
            .iter()
            .map(|class_index| ProfileRef::Class(manager, *class_index))
            .collect())
    }
}

impl SimilarityStrategy for PackageRosterStrategy {
    fn similarity(
        &self,
        ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        let (app_vertices, lib_vertices) = match (app, lib) {
            (
                ProfileRef::Package(app_manager, app_index),
                ProfileRef::Package(lib_manager, lib_index),
            ) => (
                Self::class_vertices(app_manager, app_index)?,
                Self::class_vertices(lib_manager, lib_index)?,
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
            ProfileKind::Class,
            self.class_strategy.as_ref(),
            &app_vertices,
            &lib_vertices,
        )?;
        DefaultRatioHandler.aggregate(ctx, &outcome)
    }
}
