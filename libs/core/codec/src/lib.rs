// [libs/core/codec/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CODEC MODULE HUB (V8.0 - BINARY PARITY)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: EXPOSICIÓN DE PRIMITIVAS DE CODIFICACIÓN LFP
 * =================================================================
 */

/// Catálogo de fallos de codificación y decodificación binaria.
pub mod errors;

/// Motor de enteros de longitud variable (ULEB128, 7 bits por octeto).
pub mod varint;

/// Extensiones de lectura/escritura sobre std::io para el formato LFP1.
pub mod wire;

pub use errors::CodecError;
pub use varint::{read_varint, write_varint, varint_length};
pub use wire::{WireRead, WireWrite};
