// [libs/core/probabilistic/src/tlsh.rs]
/*!
 * =================================================================
 * APARATO: LOCALITY DIGEST TLSH-STYLE (V7.3 - PORTABLE STRATA)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: HUELLA DE LOCALIDAD PARA CUERPOS DE MÉTODO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SELF-CONTAINED ENGINE: Implementación autocontenida del esquema
 *    TLSH (ventana deslizante de 5, tripletas Pearson, cuartiles y
 *    cuerpo de 2 bits por cubeta) sin dependencias externas.
 * 2. PORTABLE PERMUTATION: La tabla Pearson se deriva de una llave
 *    fija mediante un key-schedule estilo RC4; el digesto es idéntico
 *    entre plataformas y ejecuciones.
 * 3. INTEGER PURITY: Longitud logarítmica capturada con aritmética
 *    entera (razón 3/2) para esquivar divergencias de coma flotante.
 * 4. NO-HASH SENTINEL: Entradas bajo el mínimo o sin dispersión
 *    retornan None; el formato lo cristaliza como longitud cero.
 *
 * # Mathematical Proof (Distance Semantics):
 * La distancia es la suma de la distancia de cabecera (longitud,
 * cuartiles, checksum) y la distancia de cuerpo (delta por cubeta de
 * 2 bits, con el salto máximo 3 penalizado como 6). Distancia 0 ⟺
 * digestos bit-idénticos.
 * =================================================================
 */

use crate::errors::ProbabilisticError;
use librarius_core_codec::{WireRead, WireWrite};
use once_cell::sync::Lazy;
use std::fmt;
use std::io::{Read, Write};
use tracing::debug;

/// Longitud mínima de entrada para un digesto con señal suficiente.
pub const MINIMUM_INPUT_LENGTH: usize = 50;

/// Cantidad de cubetas del cuerpo del digesto.
const BUCKET_COUNT: usize = 128;

/// Octetos del cuerpo (2 bits por cubeta).
const BODY_BYTES: usize = BUCKET_COUNT / 4;

/// Octetos de cabecera: checksum, longitud logarítmica, razones de cuartil.
const HEADER_BYTES: usize = 3;

/// Longitud canónica total del digesto.
pub const DIGEST_BYTES: usize = HEADER_BYTES + BODY_BYTES;

/// Sales de tripleta (ventana de 5 octetos, 6 combinaciones).
const TRIPLET_SALTS: [u8; 6] = [2, 3, 5, 7, 11, 13];

/// Llave fija del key-schedule de la permutación Pearson.
const PERMUTATION_KEY: &[u8] = b"LIBRARIUS_LOCALITY_V1";

/// Tabla de permutación Pearson derivada determinísticamente de la llave.
static PEARSON_PERMUTATION: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut table = [0u8; 256];
    for (slot_index, slot) in table.iter_mut().enumerate() {
        *slot = slot_index as u8;
    }
    let mut swap_cursor: u8 = 0;
    for slot_index in 0..256 {
        swap_cursor = swap_cursor
            .wrapping_add(table[slot_index])
            .wrapping_add(PERMUTATION_KEY[slot_index % PERMUTATION_KEY.len()]);
        table.swap(slot_index, usize::from(swap_cursor));
    }
    table
});

/// Mezcla Pearson de una tripleta con sal.
#[inline(always)]
fn pearson_mix(salt: u8, first: u8, second: u8, third: u8) -> u8 {
    let table = &*PEARSON_PERMUTATION;
    let mut state = table[usize::from(salt)];
    state = table[usize::from(state ^ first)];
    state = table[usize::from(state ^ second)];
    state = table[usize::from(state ^ third)];
    state
}

/// Captura logarítmica de longitud con razón entera 3/2 (sin flotantes).
fn capped_log_length(input_length: usize) -> u8 {
    let mut threshold: u64 = 1;
    let mut level: u8 = 0;
    while (input_length as u64) > threshold && level < u8::MAX {
        threshold = threshold + threshold / 2 + 1;
        level = level.saturating_add(1);
    }
    level
}

/// Digesto de localidad de longitud canónica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlshDigest {
    bytes: [u8; DIGEST_BYTES],
}

impl TlshDigest {
    /**
     * Calcula el digesto de un cuerpo de octetos.
     *
     * # Returns:
     * `None` ("no hash") cuando la entrada es menor al mínimo de 50
     * octetos, cuando menos de 3 cubetas quedan pobladas o cuando el
     * tercer cuartil colapsa a cero (entropía insuficiente).
     */
    #[must_use]
    pub fn compute(input: &[u8]) -> Option<Self> {
        if input.len() < MINIMUM_INPUT_LENGTH {
            return None;
        }

        // 1. POBLACIÓN DE CUBETAS (ventana deslizante de 5 octetos)
        let mut bucket_counters = [0u32; BUCKET_COUNT];
        let mut rolling_checksum: u8 = 0;

        for cursor in 4..input.len() {
            let window = [
                input[cursor],
                input[cursor - 1],
                input[cursor - 2],
                input[cursor - 3],
                input[cursor - 4],
            ];

            rolling_checksum = pearson_mix(0, window[0], window[1], rolling_checksum);

            let triplets = [
                (window[0], window[1], window[2]),
                (window[0], window[1], window[3]),
                (window[0], window[2], window[3]),
                (window[0], window[1], window[4]),
                (window[0], window[2], window[4]),
                (window[0], window[3], window[4]),
            ];

            for (salt, (first, second, third)) in TRIPLET_SALTS.iter().zip(triplets) {
                let bucket = usize::from(pearson_mix(*salt, first, second, third)) % BUCKET_COUNT;
                bucket_counters[bucket] += 1;
            }
        }

        // 2. AUDITORÍA DE DISPERSIÓN
        let populated_buckets = bucket_counters.iter().filter(|count| **count > 0).count();
        if populated_buckets < 3 {
            debug!("🫥 [NO_HASH]: {} cubetas pobladas; dispersión insuficiente.", populated_buckets);
            return None;
        }

        // 3. CUARTILES SOBRE COPIA ORDENADA
        let mut sorted_counters = bucket_counters;
        sorted_counters.sort_unstable();
        let quartile_one = sorted_counters[BUCKET_COUNT / 4 - 1];
        let quartile_two = sorted_counters[BUCKET_COUNT / 2 - 1];
        let quartile_three = sorted_counters[3 * BUCKET_COUNT / 4 - 1];
        if quartile_three == 0 {
            return None;
        }

        // 4. CRISTALIZACIÓN DE CUERPO (2 bits por cubeta)
        let mut digest_bytes = [0u8; DIGEST_BYTES];
        for (bucket_index, counter) in bucket_counters.iter().enumerate() {
            let code: u8 = if *counter <= quartile_one {
                0
            } else if *counter <= quartile_two {
                1
            } else if *counter <= quartile_three {
                2
            } else {
                3
            };
            digest_bytes[HEADER_BYTES + bucket_index / 4] |= code << ((bucket_index % 4) * 2);
        }

        // 5. CABECERA (checksum, longitud logarítmica, razones de cuartil)
        let quartile_one_ratio = ((u64::from(quartile_one) * 100 / u64::from(quartile_three)) % 16) as u8;
        let quartile_two_ratio = ((u64::from(quartile_two) * 100 / u64::from(quartile_three)) % 16) as u8;
        digest_bytes[0] = rolling_checksum;
        digest_bytes[1] = capped_log_length(input.len());
        digest_bytes[2] = (quartile_one_ratio << 4) | quartile_two_ratio;

        Some(Self { bytes: digest_bytes })
    }

    /// Reconstruye un digesto desde sus octetos crudos.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ProbabilisticError> {
        let bytes: [u8; DIGEST_BYTES] = raw.try_into().map_err(|_| {
            ProbabilisticError::MalformedDigest { actual: raw.len(), expected: DIGEST_BYTES }
        })?;
        Ok(Self { bytes })
    }

    /// Octetos crudos del digesto.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_BYTES] {
        &self.bytes
    }

    /// Distancia circular módulo 16 entre nibbles de cuartil.
    fn nibble_distance(own: u8, other: u8) -> u32 {
        let raw_delta = u32::from(own.abs_diff(other));
        let circular_delta = raw_delta.min(16 - raw_delta);
        if circular_delta <= 1 { circular_delta } else { (circular_delta - 1) * 12 }
    }

    /**
     * Distancia entre dos digestos (cabecera + cuerpo).
     *
     * # Mathematical Proof (Identity):
     * d(a, a) = 0 para todo digesto: todos los deltas son nulos.
     */
    #[must_use]
    pub fn diff(&self, other: &Self) -> u32 {
        let mut accumulated_distance: u32 = 0;

        // Cabecera: checksum (binario), longitud (penalizada), cuartiles (circular).
        if self.bytes[0] != other.bytes[0] {
            accumulated_distance += 1;
        }
        let length_delta = u32::from(self.bytes[1].abs_diff(other.bytes[1]));
        accumulated_distance += if length_delta > 1 { length_delta * 12 } else { length_delta };
        accumulated_distance += Self::nibble_distance(self.bytes[2] >> 4, other.bytes[2] >> 4);
        accumulated_distance += Self::nibble_distance(self.bytes[2] & 0x0F, other.bytes[2] & 0x0F);

        // Cuerpo: delta de 2 bits por cubeta; el salto máximo 3 cuesta 6.
        for (own_byte, other_byte) in self.bytes[HEADER_BYTES..].iter().zip(&other.bytes[HEADER_BYTES..]) {
            for shift in [0u8, 2, 4, 6] {
                let own_code = (own_byte >> shift) & 0b11;
                let other_code = (other_byte >> shift) & 0b11;
                let code_delta = u32::from(own_code.abs_diff(other_code));
                accumulated_distance += if code_delta == 3 { 6 } else { code_delta };
            }
        }

        accumulated_distance
    }

    /**
     * Cristaliza un digesto opcional: `u16 len | len octetos`.
     * La longitud cero codifica el centinela "no hash".
     */
    pub fn encode_option_into<W: Write + ?Sized>(
        digest: Option<&Self>,
        sink: &mut W,
    ) -> Result<(), ProbabilisticError> {
        match digest {
            Some(present) => {
                sink.write_wire_u16(DIGEST_BYTES as u16)?;
                sink.write_all(present.as_bytes()).map_err(librarius_core_codec::CodecError::from)?;
            }
            None => sink.write_wire_u16(0)?,
        }
        Ok(())
    }

    /// Hidrata un digesto opcional desde el flujo normativo.
    pub fn decode_option_from<R: Read + ?Sized>(source: &mut R) -> Result<Option<Self>, ProbabilisticError> {
        let encoded_length = usize::from(source.read_wire_u16()?);
        if encoded_length == 0 {
            return Ok(None);
        }
        let mut raw_bytes = vec![0u8; encoded_length];
        source
            .read_exact(&mut raw_bytes)
            .map_err(librarius_core_codec::CodecError::from)?;
        Ok(Some(Self::from_bytes(&raw_bytes)?))
    }
}

impl fmt::Display for TlshDigest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", hex::encode_upper(self.bytes))
    }
}
