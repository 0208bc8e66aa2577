// [tests/mirror/libs/domain/strategy/bipartite_certification.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE EMPAREJAMIENTO BIPARTITO (V12.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-STRATEGY
 * RESPONSABILIDAD: VALIDACIÓN DE LA COMPOSICIÓN PERFIL → CLASE → MÉTODO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PERFECT CASE: Dos rosters de 3 clases con descriptores idénticos
 *    y payloads de método iguales ⟹ similitud de perfil 1.0.
 * 2. PARTIAL CASE: Remover una clase de la aplicación ⟹ 2/3.
 * 3. VERBOSE LOGGING: Bitácora técnica detallada del veredicto.
 *
 * # Mathematical Proof (Composition):
 * La capa de perfil empareja clases con σ = bipartito de métodos; con
 * descriptores y payloads idénticos cada arista pesa 1.0, el
 * emparejamiento es perfecto y la agregación normativa sella 1.0.
 * =================================================================
 */

use librarius_domain_profiles::{
    ClassListExtension, ClassProfile, MethodListExtension, MethodProfile, PayloadBlueprint,
    ProfileInfo, ProfileInfoExtension, ProfileManager, RetentionPolicy, ThresholdConfig,
    CLASS_EXTENSION_NAME, METHOD_EXTENSION_NAME,
};
use librarius_domain_strategy::engines::{ClassBipartiteStrategy, MethodLocalityStrategy};
use librarius_domain_strategy::engines::ProfileBipartiteStrategy;
use librarius_domain_profiles::ProfileKind;
use librarius_domain_strategy::{
    BipartiteMatcher, DefaultRatioHandler, MatchResultHandler, MatchingAlgorithm, ProfileRef,
    SimilarityContext, SimilarityStrategy, StrategyError, StrategyRegistry,
};
use reqwest::blocking::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

// --- MOTOR DE REPORTE SOBERANO ---

/**
 * Transmite el veredicto de la certificación al Orquestador de QA.
 * El envío es best-effort: sin orquestador local, el rastro se descarta.
 */
fn dispatch_bipartite_certification_report(final_verdict_label: &str, measured_similarity: f64) {
    let orchestrator_base_url =
        std::env::var("QA_ORCHESTRATOR_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let observer_access_token =
        std::env::var("QA_OBSERVER_TOKEN").unwrap_or_else(|_| "observer".into());

    let report_payload = json!({
        "testIdentifier": "BIPARTITE_COMPOSITION_CERTIFICATION_V12",
        "targetStratum": "L2_STRATEGY",
        "verdict": final_verdict_label,
        "metrics": {
            "similarity": measured_similarity,
            "latency_ms": 0
        },
        "environmentMetadata": {
            "matcher": "kuhn_munkres",
            "composition": "profile->class->method"
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    let network_client = Client::builder().timeout(Duration::from_secs(5)).build().unwrap();
    let _ = network_client
        .post(format!("{}/api/v1/qa/report", orchestrator_base_url))
        .header("Authorization", format!("Bearer {}", observer_access_token))
        .json(&report_payload)
        .send();
}

/// Forja un gestor sintético: clases con sus descriptores de método.
fn forge_manager(class_rosters: &[(&str, &[&str])], is_app_profile: bool) -> ProfileManager {
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

    for (class_descriptor, method_descriptors) in class_rosters {
        let class_handle = manager.pool_mut().add(class_descriptor);
        let mut method_arena_indices = Vec::new();
        for method_descriptor in *method_descriptors {
            let method_handle = manager.pool_mut().add(method_descriptor);
            let arena_index = manager
                .method_extension_mut()
                .expect("mtd")
                .push(MethodProfile::new(method_handle));
            method_arena_indices.push(arena_index);
        }
        let mut class_item = ClassProfile::new(class_handle);
        class_item.method_indices = Some(method_arena_indices);
        manager.class_extension_mut().expect("cls").push(class_item);
    }
    manager
}

/// Composición normativa: perfil bipartito sobre clase bipartita.
fn profile_strategy() -> ProfileBipartiteStrategy {
    let method_strategy = Arc::new(MethodLocalityStrategy);
    let class_strategy = Arc::new(ClassBipartiteStrategy::new(
        MatchingAlgorithm::MaxWeight,
        method_strategy,
        Arc::new(DefaultRatioHandler),
    ));
    ProfileBipartiteStrategy::new(
        MatchingAlgorithm::MaxWeight,
        class_strategy,
        Arc::new(DefaultRatioHandler),
    )
}

const LIBRARY_ROSTER: [(&str, &[&str]); 3] = [
    ("X", &["(I)V", "()V"]),
    ("X", &["(Ljava/lang/String;)V"]),
    ("X", &["<static>()V", "(J)J"]),
];

fn dispatch(app_manager: &ProfileManager, lib_manager: &ProfileManager) -> f64 {
    let mut registry = StrategyRegistry::new();
    registry.register_strategy(
        librarius_domain_profiles::ProfileKind::Cha,
        Arc::new(profile_strategy()),
    );
    let thresholds = ThresholdConfig::new();
    registry
        .similarity_of(&thresholds, ProfileRef::Cha(app_manager), ProfileRef::Cha(lib_manager))
        .expect("despacho")
}

#[test]
fn identical_rosters_certify_perfect_similarity() {
    println!("🧪 [BIPARTITE_GAUNTLET]: Auditing perfect composition...");

    let app_manager = forge_manager(&LIBRARY_ROSTER, true);
    let lib_manager = forge_manager(&LIBRARY_ROSTER, false);

    let similarity = dispatch(&app_manager, &lib_manager);
    println!("      🎯 [SCORE]: perfect case = {:.6}", similarity);
    assert!((similarity - 1.0).abs() < 1e-9, "rosters idénticos ⟹ 1.0");

    dispatch_bipartite_certification_report("PERFECT_CASE_SEALED", similarity);
    println!("✅ [VERDICT]: Perfect composition sealed.");
}

#[test]
fn removing_one_class_degrades_to_two_thirds() {
    println!("🧪 [BIPARTITE_GAUNTLET]: Auditing partial composition...");

    let reduced_roster = [LIBRARY_ROSTER[0], LIBRARY_ROSTER[1]];
    let app_manager = forge_manager(&reduced_roster, true);
    let lib_manager = forge_manager(&LIBRARY_ROSTER, false);

    let similarity = dispatch(&app_manager, &lib_manager);
    println!("      🎯 [SCORE]: partial case = {:.6}", similarity);
    assert!((similarity - 2.0 / 3.0).abs() < 1e-9, "2 de 3 clases ⟹ 2/3");

    println!("✅ [VERDICT]: Partial composition sealed.");
}

// --- ESPÍA DE PESOS ASIMÉTRICOS ---

/**
 * σ sintética del contraejemplo de robo de peso sub-umbral.
 * La celda A2-L1 (0.48) queda bajo el umbral 0.5: esa arista NO existe
 * en el grafo restringido y jamás debe competir en el óptimo.
 */
struct AsymmetricWeightSpy;

impl SimilarityStrategy for AsymmetricWeightSpy {
    fn similarity(
        &self,
        _ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        Ok(match (app.arena_index(), lib.arena_index()) {
            (Some(0), Some(0)) => 0.51,
            (Some(0), Some(1)) => 0.99,
            (Some(1), Some(0)) => 0.48,
            (Some(1), Some(1)) => 0.51,
            _ => 0.0,
        })
    }
}

#[test]
fn restricted_graph_beats_dense_weight_stealing() {
    println!("🧪 [BIPARTITE_GAUNTLET]: Auditing sub-threshold weight stealing...");

    // Óptimo denso ilegal: {A1-L2, A2-L1} = 1.47 con una arista
    // inexistente. Óptimo legal sobre el grafo restringido:
    // {A1-L1, A2-L2} = 1.02, perfecto sobre la partición de librería.
    let mut thresholds = ThresholdConfig::new();
    thresholds.set(ProfileKind::Class, 0.5).expect("umbral");

    for algorithm in [MatchingAlgorithm::MaxWeight, MatchingAlgorithm::HungarianMinCost] {
        let registry = StrategyRegistry::new();
        let ctx = SimilarityContext { registry: &registry, thresholds: &thresholds };

        let app_manager = ProfileManager::new(true);
        let lib_manager = ProfileManager::new(false);
        let app_vertices: Vec<ProfileRef<'_>> =
            (0..2).map(|index| ProfileRef::Class(&app_manager, index)).collect();
        let lib_vertices: Vec<ProfileRef<'_>> =
            (0..2).map(|index| ProfileRef::Class(&lib_manager, index)).collect();

        let outcome = BipartiteMatcher::new(algorithm)
            .match_layer(
                &ctx,
                ProfileKind::Class,
                &AsymmetricWeightSpy,
                &app_vertices,
                &lib_vertices,
            )
            .expect("emparejamiento");

        println!(
            "      🕸️ [{algorithm:?}]: matched={} perfect={}",
            outcome.pairs.len(),
            outcome.is_perfect()
        );
        assert!(outcome.is_perfect(), "{algorithm:?}: ambas librerías emparejadas");

        let score = DefaultRatioHandler.aggregate(&ctx, &outcome).expect("agregación");
        assert!(
            (score - 1.0).abs() < 1e-9,
            "{algorithm:?}: emparejamiento perfecto ⟹ 1.0 (jamás 1/2)"
        );
    }

    println!("✅ [VERDICT]: Restricted-graph discipline sealed.");
}

#[test]
fn asymmetric_dispatch_normalizes_the_ordering() {
    // El ordenamiento canónico (app, lib) debe hacer el despacho
    // insensible al orden de los operandos.
    let app_manager = forge_manager(&LIBRARY_ROSTER[..2], true);
    let lib_manager = forge_manager(&LIBRARY_ROSTER, false);

    let forward = dispatch(&app_manager, &lib_manager);

    let mut registry = StrategyRegistry::new();
    registry.register_strategy(
        librarius_domain_profiles::ProfileKind::Cha,
        Arc::new(profile_strategy()),
    );
    let thresholds = ThresholdConfig::new();
    let reversed = registry
        .similarity_of(&thresholds, ProfileRef::Cha(&lib_manager), ProfileRef::Cha(&app_manager))
        .expect("despacho invertido");

    assert!((forward - reversed).abs() < 1e-9);
}
