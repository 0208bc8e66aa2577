// libs/domain/strategy/src/errors.rs
// =================================================================
// APARATO: STRATEGY ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL NÚCLEO ESTRATÉGICO
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use librarius_domain_profiles::ProfileKind;
use thiserror::Error;

/// Define los errores posibles durante el despacho de estrategias,
/// la extracción de características y el emparejamiento bipartito.
#[derive(Error, Debug)]
pub enum StrategyError {
    /// Ningún registro de estrategia cubre el tipo despachado.
    #[error("Tipo de perfil sin estrategia registrada: {kind:?}")]
    UnsupportedKind {
        /// Tipo sin cobertura.
        kind: ProfileKind,
    },

    /// Los operandos del despacho pertenecen a tipos distintos.
    #[error("Despacho heterogéneo: app={app_kind:?}, lib={lib_kind:?}")]
    KindMismatch {
        /// Tipo del operando de aplicación.
        app_kind: ProfileKind,
        /// Tipo del operando de librería.
        lib_kind: ProfileKind,
    },

    /// El emparejador retornó un estado internamente inconsistente.
    ///
    /// Fatal para el par (app, librería) en curso, jamás para la corrida.
    #[error("Fallo del algoritmo de emparejamiento: {detail}")]
    AlgorithmFailure {
        /// Rastro técnico de la inconsistencia.
        detail: String,
    },

    /// Fallo del modelo de perfiles subyacente.
    #[error("Fallo del modelo de perfiles: {0}")]
    Profile(#[from] librarius_domain_profiles::ProfileError),
}

impl StrategyError {
    /// Construye un fallo de algoritmo con el rastro indicado.
    #[must_use]
    pub fn algorithm(detail: impl Into<String>) -> Self {
        Self::AlgorithmFailure { detail: detail.into() }
    }
}
