// [libs/infra/store/src/lib.rs]
/*!
 * =================================================================
 * APARATO: STORE MODULE HUB (V9.0 - PERSISTENCE STRATA)
 * CLASIFICACIÓN: INFRASTRUCTURE (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN DE LA INFRAESTRUCTURA DE PERSISTENCIA
 * =================================================================
 */

/// Catálogo de fallos de la infraestructura de persistencia.
pub mod errors;

/// Lector/escritor del formato binario de perfil LFP1.
pub mod profile_io;

/// Almacén de verdad de terreno (whitelists por aplicación).
pub mod ground_truth;

/// Convenciones de directorio y nombres del dataset.
pub mod dataset;

/// Configuración del dataset (key=value) y definición de perfil (JSON).
pub mod config;

pub use config::{DatasetConfig, ExtensionDecl, ProfileDefinition};
pub use dataset::{DatasetLayout, VARIANT_PREFIXES};
pub use errors::StoreError;
pub use ground_truth::{AppGroundTruth, GroundTruthStore};
pub use profile_io::{
    decode_profile, encode_profile, load_profile, save_profile, ProfileComposer, PROFILE_MAGIC,
};
