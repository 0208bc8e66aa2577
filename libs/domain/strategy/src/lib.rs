// [libs/domain/strategy/src/lib.rs]
/*!
 * =================================================================
 * APARATO: STRATEGY MODULE HUB (V12.0 - POLYMORPHIC TABLE)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DEL NÚCLEO ESTRATÉGICO DE SIMILITUD
 * =================================================================
 */

/// Catálogo de fallos del núcleo estratégico.
pub mod errors;

/// Registro tipado de estrategias, pasos y políticas.
pub mod registry;

/// Ejecutor del pipeline de extracción (orden topológico).
pub mod executor;

/// Pasos de extracción integrados (rosters, huellas, constantes).
pub mod steps;

/// Emparejamiento bipartito ponderado (MaxWeight / Húngaro).
pub mod matching;

/// Refinamiento multi-fase de pares emparejados.
pub mod phases;

/// Motores de similitud especializados.
pub mod engines;

pub use errors::StrategyError;
pub use executor::PipelineExecutor;
pub use matching::{
    BipartiteMatcher, DefaultRatioHandler, MatchOutcome, MatchResultHandler, MatchingAlgorithm,
};
pub use phases::MultiPhaseHandler;
pub use registry::{
    ExtractionContext, ExtractionPolicy, ExtractionStep, ProfileRef, SimilarityContext,
    SimilarityStrategy, StrategyRegistry,
};
pub use steps::{
    AppScopePolicy, ClassFeatureStep, ClassRosterStep, FieldRosterStep, InfoConstantsStep,
    MethodFeatureStep, MethodRosterStep, PackageTreeStep, StringConstantsStep, BLOOM_PAYLOAD_KEY,
    DOC_HASH_PAYLOAD_KEY, LOCALITY_PAYLOAD_KEY, ROLLING_PAYLOAD_KEY,
};
