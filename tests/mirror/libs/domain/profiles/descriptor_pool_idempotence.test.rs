// [tests/mirror/libs/domain/profiles/descriptor_pool_idempotence.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE IDEMPOTENCIA DEL POOL (V14.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-PROFILES
 * RESPONSABILIDAD: VALIDACIÓN DEL INTERNADO DE DESCRIPTORES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. INTERNING SEAL: add(s); add(s) retorna el mismo manejador y el
 *    pool crece exactamente una vez.
 * 2. INDEX STABILITY: Los índices sobreviven al ciclo de
 *    cristalización/hidratación bit a bit.
 * =================================================================
 */

use librarius_domain_profiles::{Descriptor, DescriptorPool};

#[test]
fn double_add_yields_one_record_and_one_handle() {
    println!("🧪 [POOL_GAUNTLET]: Auditing interning idempotence...");

    let mut pool = DescriptorPool::new();
    let baseline_size = pool.len();

    let first_handle = pool.add("(Ljava/lang/String;I)V");
    let second_handle = pool.add("(Ljava/lang/String;I)V");

    println!(
        "      🧬 [HANDLES]: first={} second={} pool_size={}",
        first_handle.index(),
        second_handle.index(),
        pool.len()
    );

    assert_eq!(first_handle, second_handle, "mismo manejador por índice");
    assert_eq!(pool.len(), baseline_size + 1, "el pool crece exactamente una vez");
    assert_eq!(pool.reference_count(first_handle), 2, "el conteo audita ambos usos");

    println!("✅ [VERDICT]: Interning idempotence sealed.");
}

#[test]
fn handles_survive_the_wire_cycle() {
    let mut pool = DescriptorPool::new();
    let alpha = pool.add("LX;");
    let beta = pool.add("(I)V");
    let gamma = pool.add("<static>()V");

    let mut wire_buffer = Vec::new();
    pool.encode_into(&mut wire_buffer).expect("encode");

    let mut cursor = std::io::Cursor::new(wire_buffer);
    let rehydrated = DescriptorPool::decode_from(&mut cursor).expect("decode");

    for (handle, expected_text) in [(alpha, "LX;"), (beta, "(I)V"), (gamma, "<static>()V")] {
        assert_eq!(rehydrated.get(handle), Some(expected_text), "índices estables tras el ciclo");
    }
    assert_eq!(rehydrated.lookup("(I)V"), Some(Descriptor::from_index(1)));
}
