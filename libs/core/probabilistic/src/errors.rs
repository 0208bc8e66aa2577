// libs/core/probabilistic/src/errors.rs
// =================================================================
// APARATO: PROBABILISTIC ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE LAS HUELLAS DIGITALES
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la operación de las primitivas
/// probabilísticas.
///
/// Este enum centraliza los fallos que pueden ocurrir al manipular la
/// matriz de Bloom, el conjunto rodante y el digesto de localidad,
/// cubriendo desde corrupción binaria hasta saturación estructural.
#[derive(Error, Debug)]
pub enum ProbabilisticError {
    /// Error crítico durante la codificación o decodificación binaria.
    ///
    /// Generalmente ocurre si:
    /// - El artefacto `.lfp` está corrupto o truncado.
    /// - El cursor de lectura quedó desalineado por una extensión previa.
    #[error("Error de códec binario: {0}")]
    Codec(#[from] librarius_core_codec::CodecError),

    /// La estructura excede la capacidad representable en el formato.
    ///
    /// El formato serializa conteos como u16; un conjunto rodante con
    /// más de 65.535 entradas no puede cristalizarse sin pérdida.
    #[error("Capacidad del formato excedida: {detail}")]
    CapacityExceeded {
        /// Descripción técnica de la saturación detectada.
        detail: String,
    },

    /// Los parámetros de la matriz de Bloom son inconstruibles.
    ///
    /// Ocurre si `m` es cero o si `k` es cero.
    #[error("Parámetros de Bloom ilegales: m={bit_capacity}, k={derivation_count}")]
    IllegalBloomGeometry {
        /// Cantidad de bits solicitada.
        bit_capacity: u16,
        /// Cantidad de derivaciones solicitada.
        derivation_count: u8,
    },

    /// El digesto de localidad decodificado viola su longitud canónica.
    #[error("Digesto de localidad malformado: {actual} octetos (canónico: {expected})")]
    MalformedDigest {
        /// Longitud observada en el flujo.
        actual: usize,
        /// Longitud canónica del digesto.
        expected: usize,
    },
}
