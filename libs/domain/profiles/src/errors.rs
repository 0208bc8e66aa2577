// libs/domain/profiles/src/errors.rs
// =================================================================
// APARATO: PROFILE MODEL ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL MODELO DE PERFILES
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la construcción, mutación y
/// cristalización del modelo de perfiles.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Error crítico del códec binario subyacente.
    #[error("Error de códec binario: {0}")]
    Codec(#[from] librarius_core_codec::CodecError),

    /// Fallo de una primitiva probabilística (Bloom, rodante, localidad).
    #[error("Error probabilístico: {0}")]
    Probabilistic(#[from] librarius_core_probabilistic::ProbabilisticError),

    /// El artefacto viola el contrato estructural del formato.
    ///
    /// El lector JAMÁS omite silenciosamente una sección desconocida:
    /// cualquier desalineamiento aborta la hidratación completa.
    #[error("Desajuste de formato: {detail}")]
    FormatMismatch {
        /// Descripción técnica del desajuste detectado.
        detail: String,
    },

    /// Se intentó registrar dos extensiones con el mismo nombre corto.
    #[error("Extensión duplicada en el gestor: '{name}'")]
    DuplicateExtension {
        /// Nombre corto de la extensión en conflicto.
        name: String,
    },

    /// El gestor no posee la extensión solicitada.
    #[error("Extensión desconocida en el gestor: '{name}'")]
    UnknownExtension {
        /// Nombre corto solicitado.
        name: String,
    },

    /// Un payload declarado por el blueprint no fue poblado.
    ///
    /// El invariante de cristalización exige que el conjunto de llaves
    /// escritas sea exactamente el conjunto declarado activo.
    #[error("Payload declarado ausente en el almacén: '{key}'")]
    MissingPayload {
        /// Llave corta declarada por el blueprint.
        key: String,
    },

    /// Un umbral de similitud fuera del intervalo [0, 1].
    #[error("Umbral ilegal para '{name}': {value} fuera de [0,1]")]
    IllegalThreshold {
        /// Nombre simbólico del tipo de perfil.
        name: String,
        /// Valor rechazado.
        value: f64,
    },

    /// Un nombre simbólico de tipo de perfil no reconocido.
    #[error("Tipo de perfil desconocido: '{name}'")]
    UnknownProfileKind {
        /// Nombre simbólico rechazado.
        name: String,
    },

    /// Un índice de descriptor fuera del rango del pool.
    #[error("Índice de descriptor fuera de rango: {index} (pool: {pool_size})")]
    DescriptorOutOfRange {
        /// Índice solicitado.
        index: u32,
        /// Tamaño actual del pool.
        pool_size: usize,
    },
}

impl ProfileError {
    /// Construye un desajuste de formato con el rastro técnico indicado.
    #[must_use]
    pub fn format_mismatch(detail: impl Into<String>) -> Self {
        Self::FormatMismatch { detail: detail.into() }
    }
}
