// [libs/core/probabilistic/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PROBABILISTIC MODULE HUB (V11.0 - FORENSIC ALIGNED)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: EXPOSICIÓN DE PRIMITIVAS DE HUELLA DIGITAL
 * =================================================================
 */

/// Catálogo de fallos de las estructuras probabilísticas.
pub mod errors;

/// Matriz de Bloom normativa (m bits, k derivaciones djb2).
pub mod bloom;

/// Conjunto de hash rodante base 256 módulo 1.000.007.
pub mod rolling;

/// Hash djb2 de 32 bits con contrato de igualdad explícito.
pub mod djb2;

/// Digesto de localidad TLSH-style autocontenido.
pub mod tlsh;

pub use bloom::BloomFilter;
pub use djb2::{djb2_32, Djb2Hash};
pub use errors::ProbabilisticError;
pub use rolling::RollingHashSet;
pub use tlsh::TlshDigest;
