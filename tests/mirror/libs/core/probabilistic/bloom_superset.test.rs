// [tests/mirror/libs/core/probabilistic/bloom_superset.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE SUPERCONJUNTOS BLOOM (V11.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-PROBABILISTIC
 * RESPONSABILIDAD: VALIDACIÓN DEL ÁLGEBRA DE CONJUNTOS DE LA MATRIZ
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. GEOMETRY GAUNTLET: Audita la geometría reducida (m=16, k=2) donde
 *    las posiciones derivadas son verificables a mano.
 * 2. ALGEBRAIC SEAL: Certifica reflexividad y transitividad del
 *    operador de superconjunto sobre geometrías idénticas.
 * 3. VERBOSE LOGGING: Bitácora técnica detallada por matriz auditada.
 *
 * # Mathematical Proof (Derived Positions):
 * djb2("a") = 177.670 → low=6, high=694 → posiciones {6, 12} (mod 16).
 * djb2("b") = 177.671 → low=7, high=694 → posiciones {7, 13} (mod 16).
 * =================================================================
 */

use librarius_core_probabilistic::bloom::BloomFilter;

/// Geometría reducida del gauntlet: m=16, k=2 (posiciones verificables a mano).
fn reduced_matrix() -> BloomFilter {
    BloomFilter::with_geometry(16, 2).expect("geometría reducida construible")
}

#[test]
fn superset_relation_follows_bitwise_and() {
    println!("🧪 [BLOOM_GAUNTLET]: Auditing superset algebra on reduced geometry...");

    let mut matrix_alpha = reduced_matrix();
    matrix_alpha.add("a");

    let mut matrix_beta = reduced_matrix();
    matrix_beta.add("a");
    matrix_beta.add("b");

    println!(
        "      📐 [CARDINALITY]: alpha={} beta={}",
        matrix_alpha.cardinality(),
        matrix_beta.cardinality()
    );

    assert!(matrix_beta.is_superset_of(&matrix_alpha), "beta debe contener a alpha");
    assert!(!matrix_alpha.is_superset_of(&matrix_beta), "alpha no puede contener a beta");

    let overlap = matrix_beta.overlap_ratio(&matrix_alpha);
    println!("      🎯 [OVERLAP]: beta ∩ alpha / min = {:.3}", overlap);
    assert!((overlap - 1.0).abs() < f64::EPSILON, "el solapamiento debe ser 1.0");

    println!("✅ [VERDICT]: Superset algebra sealed.");
}

#[test]
fn superset_is_reflexive_and_transitive() {
    let mut matrix_alpha = reduced_matrix();
    let mut matrix_beta = reduced_matrix();
    let mut matrix_gamma = reduced_matrix();

    matrix_alpha.add("a");

    matrix_beta.add("a");
    matrix_beta.add("b");

    matrix_gamma.add("a");
    matrix_gamma.add("b");
    matrix_gamma.add("c");

    // Reflexividad: toda matriz se contiene a sí misma.
    for matrix in [&matrix_alpha, &matrix_beta, &matrix_gamma] {
        assert!(matrix.is_superset_of(matrix));
    }

    // Transitividad: gamma ⊇ beta ∧ beta ⊇ alpha ⟹ gamma ⊇ alpha.
    assert!(matrix_gamma.is_superset_of(&matrix_beta));
    assert!(matrix_beta.is_superset_of(&matrix_alpha));
    assert!(matrix_gamma.is_superset_of(&matrix_alpha));
}

#[test]
fn membership_is_monotone_after_add() {
    let mut matrix = BloomFilter::standard();
    let witness_descriptors = [
        "Ljava/lang/String;",
        "(Ljava/lang/String;I)V",
        "<static>()V",
        "[X",
    ];

    for descriptor in witness_descriptors {
        matrix.add(descriptor);
        assert!(matrix.contains(descriptor), "sin falsos negativos tras add");
    }

    // Ningún add posterior borra señal previa.
    for descriptor in witness_descriptors {
        assert!(matrix.contains(descriptor));
    }
}
