// [tests/mirror/libs/domain/strategy/multiphase_filter.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DEL FILTRO MULTI-FASE (V12.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-STRATEGY
 * RESPONSABILIDAD: VALIDACIÓN DE LA COMPUERTA DE RAZÓN DE CAPA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RATIO GATE: Con umbral de clase 0.5 y razón emparejada 0.4 (2 de
 *    5), el score combinado colapsa a 0 sin importar la similitud de
 *    la capa de métodos.
 * 2. CONTROL CASE: Con umbral 0.3 la compuerta abre y la media
 *    ponderada de los refinamientos σ′ gobierna el score.
 * =================================================================
 */

use librarius_domain_profiles::{
    ClassListExtension, ClassProfile, MethodListExtension, MethodProfile, PayloadBlueprint,
    ProfileInfo, ProfileInfoExtension, ProfileKind, ProfileManager, RetentionPolicy,
    ThresholdConfig, CLASS_EXTENSION_NAME, METHOD_EXTENSION_NAME,
};
use librarius_domain_strategy::engines::{
    ClassBipartiteStrategy, ClassSignatureStrategy, MethodLocalityStrategy,
    ProfileBipartiteStrategy,
};
use librarius_domain_strategy::{
    DefaultRatioHandler, MatchingAlgorithm, MultiPhaseHandler, ProfileRef, StrategyRegistry,
};
use std::sync::Arc;

/// Forja un gestor sintético con un método idéntico por clase.
fn forge_manager(class_descriptors: &[&str], is_app_profile: bool) -> ProfileManager {
    let mut manager = ProfileManager::new(is_app_profile);
    manager
        .register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(is_app_profile))))
        .expect("nfo");
    manager
        .register_extension(Box::new(ClassListExtension::new(
            CLASS_EXTENSION_NAME,
            RetentionPolicy::Runtime,
            PayloadBlueprint::new(),
        )))
        .expect("cls");
    manager
        .register_extension(Box::new(MethodListExtension::new(
            METHOD_EXTENSION_NAME,
            RetentionPolicy::Runtime,
            PayloadBlueprint::new(),
        )))
        .expect("mtd");

    for class_descriptor in class_descriptors {
        let class_handle = manager.pool_mut().add(class_descriptor);
        let method_handle = manager.pool_mut().add("(I)V");
        let method_index = manager
            .method_extension_mut()
            .expect("mtd")
            .push(MethodProfile::new(method_handle));

        let mut class_item = ClassProfile::new(class_handle);
        class_item.method_indices = Some(vec![method_index]);
        manager.class_extension_mut().expect("cls").push(class_item);
    }
    manager
}

/// Perfil bipartito con agregación multi-fase (clase → método).
fn multiphase_strategy() -> ProfileBipartiteStrategy {
    let refinement = Arc::new(ClassBipartiteStrategy::new(
        MatchingAlgorithm::MaxWeight,
        Arc::new(MethodLocalityStrategy),
        Arc::new(DefaultRatioHandler),
    ));
    ProfileBipartiteStrategy::new(
        MatchingAlgorithm::MaxWeight,
        Arc::new(ClassSignatureStrategy),
        Arc::new(MultiPhaseHandler::new(ProfileKind::Class, refinement)),
    )
}

fn dispatch_with_class_threshold(threshold: f64) -> f64 {
    // Partición app: 2 clases; partición lib: 5 clases; coinciden 2.
    let app_manager = forge_manager(&["C0", "C1"], true);
    let lib_manager = forge_manager(&["C0", "C1", "L2", "L3", "L4"], false);

    let mut registry = StrategyRegistry::new();
    registry.register_strategy(ProfileKind::Cha, Arc::new(multiphase_strategy()));

    let mut thresholds = ThresholdConfig::new();
    thresholds.set(ProfileKind::Class, threshold).expect("umbral");

    registry
        .similarity_of(
            &thresholds,
            ProfileRef::Cha(&app_manager),
            ProfileRef::Cha(&lib_manager),
        )
        .expect("despacho")
}

#[test]
fn ratio_below_layer_threshold_collapses_to_zero() {
    println!("🧪 [MULTIPHASE_GAUNTLET]: Auditing the 0.4 < 0.5 gate...");

    let similarity = dispatch_with_class_threshold(0.5);
    println!("      🚧 [GATE]: score = {:.6}", similarity);
    assert_eq!(similarity, 0.0, "razón 2/5 bajo umbral 0.5 ⟹ 0");

    println!("✅ [VERDICT]: Layer gate sealed.");
}

#[test]
fn open_gate_follows_the_weighted_refinement() {
    let similarity = dispatch_with_class_threshold(0.3);
    // σ′ refina cada par emparejado a 1.0 (métodos idénticos); la media
    // ponderada con pesos por defecto 1 sella 1.0.
    assert!((similarity - 1.0).abs() < 1e-9);
}
