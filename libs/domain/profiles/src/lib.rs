// [libs/domain/profiles/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PROFILE MODEL HUB (V14.0 - ARENA SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DEL MODELO DE PERFILES FORENSES
 * =================================================================
 */

/// Catálogo de fallos del modelo de perfiles.
pub mod errors;

/// Pool de descriptores internados con conteo de referencias.
pub mod descriptor_pool;

/// Payloads de característica etiquetados y blueprint de escritura.
pub mod payload;

/// Sub-perfiles del conjunto cerrado {Class, Method, Field, Package}.
pub mod model;

/// Contenedores de extensión con política de retención.
pub mod extension;

/// Cabecera de metadatos del perfil (versión, banderas, constantes).
pub mod info;

/// Gestor-arena propietario del pool y las extensiones.
pub mod manager;

/// Mapa de umbrales de similitud por tipo de perfil.
pub mod thresholds;

pub use descriptor_pool::{Descriptor, DescriptorPool};
pub use errors::ProfileError;
pub use extension::{
    ClassListExtension, ConstantsExtension, FieldListExtension, MethodListExtension,
    PackageListExtension, ProfileExtension, ProfileInfoExtension, RetentionPolicy,
    CLASS_EXTENSION_NAME, CONSTANTS_EXTENSION_NAME, FIELD_EXTENSION_NAME,
    INFO_EXTENSION_NAME, METHOD_EXTENSION_NAME, PACKAGE_EXTENSION_NAME,
};
pub use info::{ProfileInfo, FLAG_APP_PROFILE, PROFILE_FORMAT_VERSION};
pub use manager::ProfileManager;
pub use model::{ClassProfile, FieldProfile, MethodProfile, PackageProfile, ProfileKind};
pub use payload::{FeaturePayload, PayloadBlueprint, PayloadKind, PayloadStore, WEIGHT_PAYLOAD_KEY};
pub use thresholds::ThresholdConfig;
