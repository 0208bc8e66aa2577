// libs/domain/bytecode/src/errors.rs
// =================================================================
// APARATO: BYTECODE BOUNDARY ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE LA FRONTERA DE INGESTA
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la ingesta de volcados de
/// jerarquía de clases.
#[derive(Error, Debug)]
pub enum BytecodeError {
    /// Error de Entrada/Salida al acceder al volcado.
    #[error("Error de I/O sobre el volcado de jerarquía: {0}")]
    Io(#[from] std::io::Error),

    /// El volcado JSON es sintácticamente inválido.
    #[error("Volcado de jerarquía malformado: {0}")]
    MalformedDump(#[from] serde_json::Error),

    /// Una etiqueta de loader fuera del alfabeto {app, platform}.
    #[error("Loader desconocido en el volcado: '{label}'")]
    UnknownLoader {
        /// Etiqueta rechazada.
        label: String,
    },
}
