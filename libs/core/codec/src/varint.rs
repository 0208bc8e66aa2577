// [libs/core/codec/src/varint.rs]
/*!
 * =================================================================
 * APARATO: VARINT ENGINE (V8.0 - ULEB128 SOBERANO)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: ENTEROS DE LONGITUD VARIABLE PARA EL FORMATO LFP
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BINARY PARITY: Codificación ULEB128 canónica (7 bits de payload
 *    por octeto, bit 0x80 de continuación) idéntica entre x86_64 y ARM64.
 * 2. OVERFLOW SHIELD: Rechazo determinista de secuencias que excedan
 *    10 octetos o desborden el espacio de 64 bits.
 * 3. ZERO ALLOCATION: Escritura directa sobre un buffer de pila de
 *    10 octetos sin alocaciones intermedias.
 *
 * # Mathematical Proof (Length Bound):
 * Un u64 posee 64 bits significativos como máximo; con 7 bits de
 * payload por octeto la longitud codificada es ceil(64/7) = 10.
 * Todo valor v < 2^63 cabe en ceil(63/7) = 9 octetos.
 * =================================================================
 */

use crate::errors::CodecError;
use std::io::{Read, Write};

/// Longitud máxima legal de un varint de 64 bits en octetos.
pub const MAX_VARINT_OCTETS: usize = 10;

/**
 * Serializa un entero sin signo como varint ULEB128.
 *
 * # Returns:
 * La cantidad de octetos emitidos en el flujo (1..=10).
 *
 * # Errors:
 * Propaga cualquier fallo de I/O del flujo subyacente.
 */
pub fn write_varint<W: Write + ?Sized>(sink: &mut W, mut value: u64) -> Result<usize, CodecError> {
    let mut stack_octet_buffer = [0u8; MAX_VARINT_OCTETS];
    let mut emitted_octet_count = 0usize;

    loop {
        let payload_bits = (value & 0x7F) as u8;
        value >>= 7;

        if value == 0 {
            stack_octet_buffer[emitted_octet_count] = payload_bits;
            emitted_octet_count += 1;
            break;
        }

        stack_octet_buffer[emitted_octet_count] = payload_bits | 0x80;
        emitted_octet_count += 1;
    }

    sink.write_all(&stack_octet_buffer[..emitted_octet_count])?;
    Ok(emitted_octet_count)
}

/**
 * Decodifica un varint ULEB128 desde el flujo.
 *
 * # Errors:
 * - `CodecError::VarintOverflow` si la continuación excede 10 octetos
 *   o si el décimo octeto aporta bits fuera del espacio de 64 bits.
 * - `CodecError::Io` (UnexpectedEof) ante un artefacto truncado.
 */
pub fn read_varint<R: Read + ?Sized>(source: &mut R) -> Result<u64, CodecError> {
    let mut accumulated_value: u64 = 0;
    let mut shift_position: u32 = 0;

    for octet_ordinal in 0..MAX_VARINT_OCTETS {
        let mut single_octet = [0u8; 1];
        source.read_exact(&mut single_octet)?;
        let current_octet = single_octet[0];
        let payload_bits = u64::from(current_octet & 0x7F);

        // El décimo octeto solo puede aportar el bit 63 (payload <= 1).
        if octet_ordinal == MAX_VARINT_OCTETS - 1 && payload_bits > 1 {
            return Err(CodecError::VarintOverflow);
        }

        accumulated_value |= payload_bits << shift_position;

        if current_octet & 0x80 == 0 {
            return Ok(accumulated_value);
        }

        shift_position += 7;
    }

    Err(CodecError::VarintOverflow)
}

/// Calcula la longitud codificada de un valor sin emitirlo.
#[must_use]
pub fn varint_length(value: u64) -> usize {
    let significant_bits = 64 - u64::leading_zeros(value).min(63) as usize;
    significant_bits.div_ceil(7).max(1)
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(value: u64) -> (u64, usize) {
        let mut wire_buffer = Vec::new();
        let emitted = write_varint(&mut wire_buffer, value).expect("write");
        let mut cursor = std::io::Cursor::new(wire_buffer);
        (read_varint(&mut cursor).expect("read"), emitted)
    }

    #[test]
    fn zero_occupies_single_octet() {
        assert_eq!(roundtrip(0), (0, 1));
    }

    #[test]
    fn ten_octet_ceiling_is_enforced() {
        let (value, emitted) = roundtrip(u64::MAX);
        assert_eq!(value, u64::MAX);
        assert_eq!(emitted, MAX_VARINT_OCTETS);
    }

    #[test]
    fn overlong_continuation_is_rejected() {
        // Once octetos de continuación: ilegal bajo cualquier decodificación.
        let poisoned_stream = [0xFFu8; 11];
        let mut cursor = std::io::Cursor::new(poisoned_stream);
        assert!(matches!(read_varint(&mut cursor), Err(CodecError::VarintOverflow)));
    }

    #[test]
    fn tenth_octet_payload_beyond_bit_63_is_rejected() {
        // Nueve continuaciones y un décimo octeto con payload 0x02 (bit 64).
        let mut poisoned_stream = vec![0x80u8; 9];
        poisoned_stream.push(0x02);
        let mut cursor = std::io::Cursor::new(poisoned_stream);
        assert!(matches!(read_varint(&mut cursor), Err(CodecError::VarintOverflow)));
    }

    #[test]
    fn truncated_stream_surfaces_as_io_fault() {
        let truncated_stream = [0x80u8, 0x80];
        let mut cursor = std::io::Cursor::new(truncated_stream);
        assert!(matches!(read_varint(&mut cursor), Err(CodecError::Io(_))));
    }

    proptest! {
        #[test]
        fn roundtrip_preserves_every_u64(value in any::<u64>()) {
            let (decoded, emitted) = roundtrip(value);
            prop_assert_eq!(decoded, value);
            prop_assert!(emitted <= MAX_VARINT_OCTETS);
            prop_assert_eq!(emitted, varint_length(value));
        }
    }
}
