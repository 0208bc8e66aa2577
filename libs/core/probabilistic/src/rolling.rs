// [libs/core/probabilistic/src/rolling.rs]
/*!
 * =================================================================
 * APARATO: ROLLING HASH SET (V9.0 - CANONICAL ORDER)
 * CLASIFICACIÓN: CORE INFRAESTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: HUELLA DE SECUENCIAS DE OPCODES NORMALIZADOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DETERMINISM SOVEREIGNTY: Horner base 256 módulo 1.000.007 sobre
 *    octetos UTF-8; el cero se descarta como centinela de colapso.
 * 2. CANONICAL ITERATION: Respaldo BTreeSet para que la iteración y la
 *    serialización sean de orden total estable entre ejecuciones.
 * 3. FORMAT DISCIPLINE: Conteo u16 + entradas u32 Big-Endian; la
 *    saturación del conteo es un fallo explícito, jamás un truncado.
 * =================================================================
 */

use crate::errors::ProbabilisticError;
use librarius_core_codec::{WireRead, WireWrite};
use std::collections::BTreeSet;
use std::io::{Read, Write};

/// Base multiplicativa canónica del hash rodante.
pub const ROLLING_BASE: u64 = 256;

/// Módulo primo canónico del hash rodante.
pub const ROLLING_MODULUS: u64 = 1_000_007;

/// Conjunto de huellas rodantes de orden canónico.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingHashSet {
    /// Huellas registradas en orden total estable.
    entries: BTreeSet<u32>,
}

impl RollingHashSet {
    /// Construye un conjunto vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calcula la huella rodante de una cadena (esquema de Horner).
    #[must_use]
    pub fn hash_of(text: &str) -> u32 {
        let mut accumulated: u64 = 0;
        for byte in text.as_bytes() {
            accumulated = (accumulated * ROLLING_BASE + u64::from(*byte)) % ROLLING_MODULUS;
        }
        accumulated as u32
    }

    /**
     * Registra la huella de una cadena.
     *
     * # Returns:
     * `Some(huella)` si la huella es no-nula y fue considerada;
     * `None` cuando el módulo colapsa a cero (centinela descartado).
     */
    pub fn add(&mut self, text: &str) -> Option<u32> {
        let fingerprint = Self::hash_of(text);
        if fingerprint == 0 {
            return None;
        }
        self.entries.insert(fingerprint);
        Some(fingerprint)
    }

    /// Consulta la pertenencia exacta de una huella.
    #[must_use]
    pub fn contains(&self, fingerprint: u32) -> bool {
        self.entries.contains(&fingerprint)
    }

    /// Cantidad de huellas registradas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Verdadero cuando el conjunto no registra huella alguna.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterador de orden canónico sobre las huellas.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().copied()
    }

    /**
     * Índice de Jaccard contra otro conjunto: |A ∩ B| / |A ∪ B|.
     *
     * # Returns:
     * 0.0 cuando ambos conjuntos están vacíos (convención nominal).
     */
    #[must_use]
    pub fn jaccard(&self, other: &Self) -> f64 {
        let intersection_size = self.entries.intersection(&other.entries).count();
        let union_size = self.entries.union(&other.entries).count();
        if union_size == 0 {
            return 0.0;
        }
        intersection_size as f64 / union_size as f64
    }

    /**
     * Cristaliza el conjunto: conteo u16 + huellas u32 Big-Endian.
     *
     * # Errors:
     * `CapacityExceeded` si el conjunto supera las 65.535 huellas.
     */
    pub fn encode_into<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), ProbabilisticError> {
        let entry_count = u16::try_from(self.entries.len()).map_err(|_| {
            ProbabilisticError::CapacityExceeded {
                detail: format!("conjunto rodante con {} huellas excede u16", self.entries.len()),
            }
        })?;
        sink.write_wire_u16(entry_count)?;
        for fingerprint in &self.entries {
            sink.write_wire_u32(*fingerprint)?;
        }
        Ok(())
    }

    /// Hidrata un conjunto desde el flujo normativo.
    pub fn decode_from<R: Read + ?Sized>(source: &mut R) -> Result<Self, ProbabilisticError> {
        let entry_count = source.read_wire_u16()?;
        let mut entries = BTreeSet::new();
        for _ in 0..entry_count {
            entries.insert(source.read_wire_u32()?);
        }
        Ok(Self { entries })
    }
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_witness_is_deterministic() {
        // ((97·256 + 98)·256 + 99) mod 1.000.007 = 6.382.179 mod 1.000.007.
        assert_eq!(RollingHashSet::hash_of("abc"), 382_137);
    }

    #[test]
    fn zero_fingerprint_is_discarded() {
        let mut set = RollingHashSet::new();
        // La cadena vacía produce el centinela 0 y no debe registrarse.
        assert_eq!(set.add(""), None);
        assert!(set.is_empty());
    }

    #[test]
    fn wire_roundtrip_preserves_canonical_order() {
        let mut set = RollingHashSet::new();
        set.add("invoke-virtual");
        set.add("const-string");
        set.add("return-void");

        let mut wire_buffer = Vec::new();
        set.encode_into(&mut wire_buffer).expect("encode");

        let mut cursor = std::io::Cursor::new(wire_buffer);
        let rehydrated = RollingHashSet::decode_from(&mut cursor).expect("decode");
        assert_eq!(rehydrated, set);
    }

    #[test]
    fn jaccard_handles_degenerate_sets() {
        let empty_a = RollingHashSet::new();
        let empty_b = RollingHashSet::new();
        assert_eq!(empty_a.jaccard(&empty_b), 0.0);

        let mut populated = RollingHashSet::new();
        populated.add("abc");
        assert_eq!(populated.jaccard(&populated), 1.0);
    }
}
