// libs/infra/store/src/errors.rs
// =================================================================
// APARATO: STORE ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE PERSISTENCIA Y CONFIGURACIÓN
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la persistencia de perfiles,
/// el parseo de configuración y la resolución del dataset.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error de Entrada/Salida del sistema operativo.
    ///
    /// Ocurre si:
    /// - El artefacto `.lfp` no existe (`NotFound`).
    /// - No hay permisos de lectura/escritura (`PermissionDenied`).
    /// - El disco está lleno durante la cristalización.
    #[error("Error de I/O: {0}")]
    Io(#[from] std::io::Error),

    /// El artefacto viola el contrato del formato LFP1.
    ///
    /// Magia corrupta, versión futura, extensión desconocida o fuera
    /// de orden. El lector JAMÁS omite secciones silenciosamente.
    #[error("Desajuste de formato: {detail}")]
    FormatMismatch {
        /// Rastro técnico del desajuste.
        detail: String,
    },

    /// Fallo del modelo de perfiles durante la (de)serialización.
    #[error("Fallo del modelo de perfiles: {0}")]
    Profile(#[from] librarius_domain_profiles::ProfileError),

    /// Fallo del códec binario subyacente.
    #[error("Fallo del códec binario: {0}")]
    Codec(#[from] librarius_core_codec::CodecError),

    /// Una llave o valor ilegal en la configuración.
    #[error("Error de configuración: {detail}")]
    ConfigError {
        /// Rastro técnico de la llave/valor rechazado.
        detail: String,
    },

    /// La verdad de terreno no registra la aplicación solicitada.
    #[error("Aplicación desconocida en la verdad de terreno: '{app}'")]
    UnknownApp {
        /// Nombre corto de la aplicación.
        app: String,
    },

    /// La definición de perfil JSON es sintácticamente inválida.
    #[error("Definición de perfil malformada: {0}")]
    MalformedDefinition(#[from] serde_json::Error),
}

impl StoreError {
    /// Construye un desajuste de formato con el rastro indicado.
    #[must_use]
    pub fn format_mismatch(detail: impl Into<String>) -> Self {
        Self::FormatMismatch { detail: detail.into() }
    }

    /// Construye un error de configuración con el rastro indicado.
    #[must_use]
    pub fn config(detail: impl Into<String>) -> Self {
        Self::ConfigError { detail: detail.into() }
    }

    /// Verdadero si el fallo es un desajuste de formato (directo o anidado).
    #[must_use]
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::FormatMismatch { .. })
            || matches!(
                self,
                Self::Profile(librarius_domain_profiles::ProfileError::FormatMismatch { .. })
            )
    }
}
