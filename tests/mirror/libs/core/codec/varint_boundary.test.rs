// [tests/mirror/libs/core/codec/varint_boundary.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE FRONTERAS VARINT (V8.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CODEC
 * RESPONSABILIDAD: VALIDACIÓN DE LONGITUDES CANÓNICAS ULEB128
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BOUNDARY GAUNTLET: Audita los ocho valores frontera del espacio
 *    de 64 bits más el techo absoluto u64::MAX.
 * 2. NOMINAL PURITY: Erradicación de abreviaciones en el rastro.
 * 3. VERBOSE LOGGING: Bitácora técnica detallada por vector auditado.
 *
 * # Mathematical Proof (ULEB128):
 * Con 7 bits de payload por octeto, un valor de b bits significativos
 * ocupa ceil(b/7) octetos. El techo de 10 octetos se alcanza únicamente
 * cuando el bit 63 está poblado (b = 64).
 * =================================================================
 */

use librarius_core_codec::varint::{read_varint, write_varint, varint_length, MAX_VARINT_OCTETS};
use std::io::Cursor;

/// Matriz de vectores frontera: (valor, longitud canónica esperada).
const BOUNDARY_VECTORS: &[(u64, usize)] = &[
    (0, 1),
    (1, 1),
    (127, 1),
    (128, 2),
    (16_383, 2),
    (16_384, 3),
    ((1u64 << 31) - 1, 5),
    ((1u64 << 63) - 1, 9),
    (u64::MAX, 10),
];

#[test]
fn boundary_vectors_encode_with_canonical_lengths() {
    println!("🧪 [VARINT_GAUNTLET]: Auditing {} boundary vectors...", BOUNDARY_VECTORS.len());
    let mut accumulated_integrity_faults = 0u32;

    for (vector_value, expected_octet_length) in BOUNDARY_VECTORS {
        let mut wire_buffer = Vec::new();
        let emitted_octet_count = write_varint(&mut wire_buffer, *vector_value)
            .expect("la escritura sobre un Vec jamás colapsa");

        let mut replay_cursor = Cursor::new(&wire_buffer);
        let rehydrated_value = read_varint(&mut replay_cursor)
            .expect("el flujo recién emitido debe ser decodificable");

        println!(
            "      📐 [VECTOR]: value={} emitted={} expected={} rehydrated={}",
            vector_value, emitted_octet_count, expected_octet_length, rehydrated_value
        );

        if rehydrated_value != *vector_value || emitted_octet_count != *expected_octet_length {
            accumulated_integrity_faults += 1;
        }

        assert_eq!(rehydrated_value, *vector_value, "round-trip debe ser bit-perfecto");
        assert_eq!(emitted_octet_count, *expected_octet_length, "longitud canónica violada");
        assert_eq!(varint_length(*vector_value), *expected_octet_length, "predicción de longitud desalineada");
        assert!(emitted_octet_count <= MAX_VARINT_OCTETS, "techo de 10 octetos violado");
    }

    println!("✅ [VERDICT]: Boundary gauntlet sealed. Faults: {}", accumulated_integrity_faults);
    assert_eq!(accumulated_integrity_faults, 0);
}

#[test]
fn sequential_stream_decodes_in_emission_order() {
    // Un flujo con varios varints concatenados debe decodificar en orden FIFO.
    let emission_sequence: [u64; 5] = [0, 300, 16_384, 1, (1u64 << 31) - 1];

    let mut wire_buffer = Vec::new();
    for vector_value in emission_sequence {
        write_varint(&mut wire_buffer, vector_value).expect("write");
    }

    let mut replay_cursor = Cursor::new(wire_buffer);
    for vector_value in emission_sequence {
        assert_eq!(read_varint(&mut replay_cursor).expect("read"), vector_value);
    }
}
