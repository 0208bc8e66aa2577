// [libs/domain/strategy/src/engines.rs]
/*!
 * =================================================================
 * APARATO: ENGINES MODULE HUB (V12.0 - SIMILARITY STRATA)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DE MOTORES DE SIMILITUD ESPECIALIZADOS
 * =================================================================
 */

/// Motor de perfil completo: emparejamiento bipartito de clases.
pub mod profile_bipartite;

/// Motor de clase: emparejamiento bipartito de métodos.
pub mod class_bipartite;

/// Motor de clase par a par: mezcla de firmas y payloads.
pub mod class_signature;

/// Motor de método: distancia de localidad + firma difusa.
pub mod method_locality;

/// Motor de campo: igualdad de descriptor.
pub mod field_descriptor;

/// Motor de paquete: emparejamiento del roster de clases contenidas.
pub mod package_roster;

pub use class_bipartite::ClassBipartiteStrategy;
pub use class_signature::ClassSignatureStrategy;
pub use field_descriptor::FieldDescriptorStrategy;
pub use method_locality::MethodLocalityStrategy;
pub use package_roster::PackageRosterStrategy;
pub use profile_bipartite::ProfileBipartiteStrategy;
