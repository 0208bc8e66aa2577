// [tests/mirror/libs/core/probabilistic/rolling_stability.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE ESTABILIDAD RODANTE (V9.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-PROBABILISTIC
 * RESPONSABILIDAD: VALIDACIÓN DEL TESTIGO DETERMINISTA DE HORNER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WITNESS SEAL: Certifica el testigo canónico de "abc" bajo la
 *    reducción módulo 1.000.007 entre ejecuciones independientes.
 * 2. SENTINEL DISCIPLINE: Audita que el colapso a cero sea descartado
 *    sin contaminar el conjunto.
 *
 * # Mathematical Proof (Horner Witness):
 * h("abc") = ((97·256 + 98)·256 + 99) = 6.382.179;
 * 6.382.179 mod 1.000.007 = 382.137.
 * =================================================================
 */

use librarius_core_probabilistic::rolling::{RollingHashSet, ROLLING_BASE, ROLLING_MODULUS};

#[test]
fn canonical_witness_is_stable_across_runs() {
    println!("🧪 [ROLLING_GAUNTLET]: Auditing Horner witness (base {}, mod {})...", ROLLING_BASE, ROLLING_MODULUS);

    let mut accumulated_witnesses = Vec::new();
    for run_ordinal in 0..5 {
        let mut fingerprint_set = RollingHashSet::new();
        let registered = fingerprint_set.add("abc");
        println!("      🔁 [RUN {}]: add(\"abc\") -> {:?}", run_ordinal, registered);
        accumulated_witnesses.push(registered.expect("el testigo canónico es no-nulo"));
    }

    for witness in &accumulated_witnesses {
        assert_eq!(*witness, 382_137, "el testigo de Horner debe ser invariante");
    }

    println!("✅ [VERDICT]: Rolling witness sealed at 382137.");
}

#[test]
fn membership_follows_registered_fingerprints() {
    let mut fingerprint_set = RollingHashSet::new();
    let witness = fingerprint_set.add("abc").expect("testigo no-nulo");

    assert!(fingerprint_set.contains(witness));
    assert!(!fingerprint_set.contains(witness.wrapping_add(1)));
    assert_eq!(fingerprint_set.len(), 1);
}

#[test]
fn duplicate_registration_is_idempotent() {
    let mut fingerprint_set = RollingHashSet::new();
    fingerprint_set.add("invoke-virtual Ljava/lang/String;");
    fingerprint_set.add("invoke-virtual Ljava/lang/String;");
    assert_eq!(fingerprint_set.len(), 1, "el conjunto no registra duplicados");
}
