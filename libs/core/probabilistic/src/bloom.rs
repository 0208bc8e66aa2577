// [libs/core/probabilistic/src/bloom.rs]
/*!
 * =================================================================
 * APARATO: BLOOM MATRIX (V11.2 - ZENITH NORMATIVE)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: HUELLA PROBABILÍSTICA DE DESCRIPTORES POR CLASE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BIT SOVEREIGNTY: La derivación de posiciones es normativa:
 *    semilla djb2 de 32 bits, p_i = ((seed & 0xFF) + i·(seed >> 8)) mod m.
 * 2. BINARY PARITY: Palabras de 64 bits en orden de red (Big-Endian)
 *    para que el artefacto sea idéntico entre x86_64 y ARM64.
 * 3. SET ALGEBRA: Operadores de superconjunto (AND bit a bit) y de
 *    solapamiento por cardinalidad para las estrategias de similitud.
 * 4. ZERO REMOVAL: La matriz es monótona; no existe operación de borrado.
 *
 * # Mathematical Proof (Superset Transitivity):
 * Si A ⊇ B y B ⊇ C como conjuntos de bits, entonces A AND C = C por
 * asociatividad del AND; el operador es reflexivo y transitivo sobre
 * matrices de geometría idéntica (m, k).
 * =================================================================
 */

use crate::djb2::djb2_32;
use crate::errors::ProbabilisticError;
use librarius_core_codec::{CodecError, WireRead, WireWrite};
use std::io::{Read, Write};

/// Cantidad de bits por defecto de la matriz (múltiplo de 64).
pub const DEFAULT_BIT_CAPACITY: u16 = 256;

/// Cantidad de derivaciones de posición por defecto.
pub const DEFAULT_DERIVATION_COUNT: u8 = 4;

/// Matriz de Bloom de geometría fija para huellas de descriptores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// Cantidad total de bits (m). Las posiciones derivadas viven en [0, m).
    bit_capacity: u16,
    /// Cantidad de posiciones derivadas por entrada (k).
    derivation_count: u8,
    /// Palabras de 64 bits que materializan la matriz.
    words: Vec<u64>,
    /// Conteo saturante de entradas registradas.
    entry_count: u16,
}

impl BloomFilter {
    /**
     * Construye una matriz vacía con la geometría indicada.
     *
     * Las palabras de respaldo se dimensionan a ceil(m/64); los bits
     * por encima de m quedan permanentemente en cero.
     *
     * # Errors:
     * `IllegalBloomGeometry` si `m` o `k` son cero.
     */
    pub fn with_geometry(bit_capacity: u16, derivation_count: u8) -> Result<Self, ProbabilisticError> {
        if bit_capacity == 0 || derivation_count == 0 {
            return Err(ProbabilisticError::IllegalBloomGeometry { bit_capacity, derivation_count });
        }
        Ok(Self {
            bit_capacity,
            derivation_count,
            words: vec![0u64; usize::from(bit_capacity).div_ceil(64)],
            entry_count: 0,
        })
    }

    /// Construye la matriz canónica de 256 bits y 4 derivaciones.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_geometry(DEFAULT_BIT_CAPACITY, DEFAULT_DERIVATION_COUNT)
            .expect("la geometría canónica es construible por definición")
    }

    /// Deriva las k posiciones normativas de una cadena.
    fn derive_positions(&self, text: &str) -> impl Iterator<Item = usize> + '_ {
        let seed = djb2_32(text);
        let low_component = u64::from(seed & 0xFF);
        let high_component = u64::from(seed >> 8);
        let modulus = u64::from(self.bit_capacity);

        (0..u64::from(self.derivation_count))
            .map(move |derivation_ordinal| {
                ((low_component + derivation_ordinal * high_component) % modulus) as usize
            })
    }

    /// Registra una cadena poblando sus k posiciones derivadas.
    pub fn add(&mut self, text: &str) {
        let positions: Vec<usize> = self.derive_positions(text).collect();
        for bit_position in positions {
            self.words[bit_position / 64] |= 1u64 << (bit_position % 64);
        }
        self.entry_count = self.entry_count.saturating_add(1);
    }

    /// Consulta un bit individual de la matriz.
    #[must_use]
    pub fn at(&self, bit_position: usize) -> bool {
        if bit_position >= usize::from(self.bit_capacity) {
            return false;
        }
        self.words[bit_position / 64] & (1u64 << (bit_position % 64)) != 0
    }

    /// Consulta probabilística de pertenencia (sin falsos negativos).
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.derive_positions(text).all(|bit_position| self.at(bit_position))
    }

    /// Cantidad de bits poblados (cardinalidad de la matriz).
    #[must_use]
    pub fn cardinality(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    /// Conteo saturante de entradas registradas.
    #[must_use]
    pub fn entry_count(&self) -> u16 {
        self.entry_count
    }

    /// Geometría (m, k) de la matriz.
    #[must_use]
    pub fn geometry(&self) -> (u16, u8) {
        (self.bit_capacity, self.derivation_count)
    }

    /**
     * Verifica si esta matriz es superconjunto bit a bit de `other`.
     *
     * # Logic:
     * `self AND other == other`. Definido únicamente sobre geometrías
     * idénticas; geometrías dispares retornan `false` de forma nominal.
     */
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        if self.geometry() != other.geometry() {
            return false;
        }
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(own_word, other_word)| own_word & other_word == *other_word)
    }

    /**
     * Razón de solapamiento por cardinalidad: |A ∩ B| / min(|A|, |B|).
     *
     * # Returns:
     * 0.0 ante geometrías dispares o cuando alguna matriz está vacía.
     */
    #[must_use]
    pub fn overlap_ratio(&self, other: &Self) -> f64 {
        if self.geometry() != other.geometry() {
            return 0.0;
        }
        let minimum_cardinality = self.cardinality().min(other.cardinality());
        if minimum_cardinality == 0 {
            return 0.0;
        }
        let intersection_cardinality: u32 = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(own_word, other_word)| (own_word & other_word).count_ones())
            .sum();
        f64::from(intersection_cardinality) / f64::from(minimum_cardinality)
    }

    /**
     * Cristaliza la matriz en el flujo con el layout normativo.
     *
     * # Wire:
     * `u16 entries | bool empty | if !empty: varint words | words × u64 BE`.
     */
    pub fn encode_into<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), ProbabilisticError> {
        sink.write_wire_u16(self.entry_count)?;
        let is_empty = self.cardinality() == 0;
        sink.write_wire_bool(is_empty)?;
        if !is_empty {
            sink.write_varint_value(self.words.len() as u64)?;
            for word in &self.words {
                sink.write_wire_u64(*word)?;
            }
        }
        Ok(())
    }

    /**
     * Hidrata una matriz desde el flujo, imponiendo la geometría dada.
     *
     * # Errors:
     * `Codec(Malformed)` si el conteo de palabras del flujo no coincide
     * con la geometría impuesta por el blueprint.
     */
    pub fn decode_from<R: Read + ?Sized>(
        source: &mut R,
        bit_capacity: u16,
        derivation_count: u8,
    ) -> Result<Self, ProbabilisticError> {
        let mut filter = Self::with_geometry(bit_capacity, derivation_count)?;
        filter.entry_count = source.read_wire_u16()?;
        let is_empty = source.read_wire_bool()?;
        if !is_empty {
            let word_count = source.read_wire_count()?;
            if word_count != filter.words.len() {
                return Err(CodecError::malformed(format!(
                    "matriz de Bloom con {} palabras; la geometría m={} exige {}",
                    word_count,
                    bit_capacity,
                    filter.words.len()
                ))
                .into());
            }
            for word_slot in filter.words.iter_mut() {
                *word_slot = source.read_wire_u64()?;
            }
        }
        Ok(filter)
    }
}
