// libs/core/codec/src/errors.rs
// =================================================================
// APARATO: CODEC ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE CODIFICACIÓN BINARIA
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la codificación binaria LFP.
///
/// Este enum centraliza los fallos que pueden ocurrir al manipular el
/// flujo de octetos del formato de perfil, cubriendo desde problemas del
/// sistema de archivos (I/O) hasta corrupción estructural del artefacto.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Error de Entrada/Salida del sistema operativo.
    ///
    /// Ocurre si:
    /// - El flujo subyacente colapsa (`BrokenPipe`).
    /// - El artefacto está truncado (`UnexpectedEof`).
    #[error("Error de I/O: {0}")]
    Io(#[from] std::io::Error),

    /// El varint excede los 10 octetos o desborda los 64 bits.
    ///
    /// Un flujo legal jamás produce este fallo: señala un artefacto
    /// corrupto o un desalineamiento del cursor de lectura.
    #[error("Varint ilegal: continuación más allá de 10 octetos o desborde de 64 bits")]
    VarintOverflow,

    /// Los octetos decodificados no forman una secuencia UTF-8 válida.
    #[error("Secuencia UTF-8 inválida en cadena con prefijo de longitud")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// El flujo viola una restricción estructural del formato.
    #[error("Flujo binario malformado: {detail}")]
    Malformed {
        /// Descripción técnica del desalineamiento detectado.
        detail: String,
    },
}

impl CodecError {
    /// Construye un fallo estructural con el rastro técnico indicado.
    #[must_use]
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed { detail: detail.into() }
    }
}
