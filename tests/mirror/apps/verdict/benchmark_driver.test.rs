// [tests/mirror/apps/verdict/benchmark_driver.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DEL DRIVER DE BENCHMARK (V6.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-VERDICT
 * RESPONSABILIDAD: CADENA COMPLETA BUILD → CRISTALIZACIÓN → BENCHMARK
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. END-TO-END: Jerarquías sintéticas → pipeline de extracción →
 *    artefactos .lfp en el árbol del dataset → driver paralelo →
 *    veredictos por librería.
 * 2. SIGNAL DISCIPLINE: La librería embebida en la app debe sellar
 *    1.0; la librería ajena debe colapsar bajo los umbrales.
 * 3. CANCEL AUDIT: Un token pre-poblado drena la corrida con estados
 *    Cancelled sin computar similitudes.
 * =================================================================
 */

use librarius_domain_bytecode::{
    InMemoryHierarchy, MemoryClassBuilder, MemoryMethodBuilder, OpToken, TypeRef,
};
use librarius_domain_bytecode::view::LoaderKind;
use librarius_domain_strategy::{ExtractionContext, PipelineExecutor};
use librarius_infra_store::{save_profile, DatasetConfig, DatasetLayout, ProfileDefinition};
use librarius_verdict_lib::bench::driver::{BenchmarkDriver, TestStatus};
use librarius_verdict_lib::IntegrationTable;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const WITNESS_DEFINITION: &str = r#"{
    "name": "witness-fuzzy",
    "extension": "lfp",
    "target_dir": "fuzzy",
    "profile_kind": "cha-profile",
    "il_factory": "basic-fuzzy",
    "normalizer": "register-machine",
    "integration": "standard-bipartite",
    "extensions": [
        { "name": "pkg" },
        { "name": "cls" },
        { "name": "mtd" },
        { "name": "fld" },
        { "name": "cst" }
    ],
    "thresholds": { "class-profile": 0.5, "method-profile": 0.5 }
}"#;

/// Clases compartidas entre la app testigo y la librería embebida.
fn embedded_library_classes(hierarchy: &mut InMemoryHierarchy) {
    let platform_string = TypeRef::object("java/lang/String", LoaderKind::Platform);
    hierarchy.register(
        MemoryClassBuilder::application("com/liba/Transport")
            .method(
                MemoryMethodBuilder::new("send")
                    .parameter(platform_string.clone())
                    .op(OpToken::typed("invoke-virtual", platform_string.clone()))
                    .op(OpToken::literal("const-string", "payload"))
                    .op(OpToken::bare("return-void"))
                    .build(),
            )
            .build(),
    );
    hierarchy.register(
        MemoryClassBuilder::application("com/liba/Codec")
            .method(
                MemoryMethodBuilder::new("encode")
                    .parameter(TypeRef::primitive("I"))
                    .returns(platform_string)
                    .op(OpToken::bare("if-eqz"))
                    .op(OpToken::bare("return-object"))
                    .build(),
            )
            .build(),
    );
}

fn app_hierarchy() -> InMemoryHierarchy {
    let mut hierarchy = InMemoryHierarchy::new();
    embedded_library_classes(&mut hierarchy);
    hierarchy.register(
        MemoryClassBuilder::application("com/app/Main")
            .method(
                MemoryMethodBuilder::new("main")
                    .static_method()
                    .op(OpToken::bare("invoke-static"))
                    .op(OpToken::bare("return-void"))
                    .build(),
            )
            .build(),
    );
    hierarchy
}

fn lib_a_hierarchy() -> InMemoryHierarchy {
    let mut hierarchy = InMemoryHierarchy::new();
    embedded_library_classes(&mut hierarchy);
    hierarchy
}

fn lib_b_hierarchy() -> InMemoryHierarchy {
    let mut hierarchy = InMemoryHierarchy::new();
    hierarchy.register(
        MemoryClassBuilder::application("com/libb/Widget")
            .method(
                MemoryMethodBuilder::new("render")
                    .parameter(TypeRef::primitive("J"))
                    .parameter(TypeRef::primitive("J"))
                    .op(OpToken::bare("add-long"))
                    .op(OpToken::bare("throw"))
                    .build(),
            )
            .build(),
    );
    hierarchy
}

/// Construye y cristaliza un perfil en el árbol del dataset.
fn forge_artifact(
    definition: &ProfileDefinition,
    hierarchy: &InMemoryHierarchy,
    is_app_profile: bool,
    artifact_path: &std::path::Path,
) {
    let table = IntegrationTable::global();
    let il_factory = table.il_factory(&definition.il_factory).expect("fábrica IL");
    let normalizer = table
        .normalizer(definition.normalizer.as_deref().expect("normalizador declarado"))
        .expect("normalizador");
    let registry =
        (table.integration(&definition.integration).expect("integración").forge_registry)();

    let mut manager =
        IntegrationTable::compose_manager(definition, is_app_profile).expect("composición");
    let ctx = ExtractionContext {
        view: hierarchy,
        il_factory: il_factory.as_ref(),
        normalizer: Some(normalizer.as_ref()),
    };
    PipelineExecutor::run(&registry, &ctx, &mut manager).expect("pipeline");
    manager.discard_source_extensions();
    save_profile(&manager, artifact_path).expect("cristalización");
}

struct WitnessDataset {
    _workdir: tempfile::TempDir,
    layout: DatasetLayout,
    definition: ProfileDefinition,
}

/// Forja el dataset testigo completo en un directorio temporal.
fn forge_witness_dataset() -> WitnessDataset {
    let workdir = tempfile::tempdir().expect("tempdir");
    let base_dir = workdir.path().to_string_lossy().to_string();

    let truth_path = workdir.path().join("truth.txt");
    std::fs::write(&truth_path, "chat-app ; lib-a\n").expect("verdad de terreno");

    let dataset = DatasetConfig {
        base_dir,
        target_dir: "fuzzy".to_string(),
        android_path: None,
        extension: "lfp".to_string(),
        ground_truth: truth_path.to_string_lossy().to_string(),
    };
    let definition = ProfileDefinition::parse(WITNESS_DEFINITION).expect("definición");
    let layout = DatasetLayout::new(&dataset, &definition.target_dir, &definition.extension);

    forge_artifact(&definition, &lib_a_hierarchy(), false, &layout.lib_profile_path("lib-a"));
    forge_artifact(&definition, &lib_b_hierarchy(), false, &layout.lib_profile_path("lib-b"));
    forge_artifact(
        &definition,
        &app_hierarchy(),
        true,
        &layout.app_profile_path("chat-app", "chat-app"),
    );
    forge_artifact(
        &definition,
        &app_hierarchy(),
        true,
        &layout.app_profile_path("chat-app", "proguard-chat-app"),
    );

    WitnessDataset { _workdir: workdir, layout, definition }
}

fn forge_driver(dataset: &WitnessDataset, cache_profiles: bool) -> BenchmarkDriver {
    let registry = (IntegrationTable::global()
        .integration(&dataset.definition.integration)
        .expect("integración")
        .forge_registry)();
    let thresholds = dataset.definition.threshold_config().expect("umbrales");

    let composer_definition = Arc::new(dataset.definition.clone());
    let composer = Arc::new(move |is_app: bool| {
        IntegrationTable::compose_manager(&composer_definition, is_app)
    });

    BenchmarkDriver::new(
        dataset.layout.clone(),
        registry,
        thresholds,
        composer,
        cache_profiles,
    )
    .with_worker_count(2)
}

#[test]
fn embedded_library_seals_and_foreign_library_collapses() {
    println!("🧪 [DRIVER_GAUNTLET]: Auditing the end-to-end chain...");

    let dataset = forge_witness_dataset();
    let mut driver = forge_driver(&dataset, true);

    let runs = driver.benchmark("chat-app", None).expect("benchmark");
    assert_eq!(runs.len(), 2, "variantes default + proguard");

    for (variant_label, run) in &runs {
        assert_eq!(run.results.len(), 2, "dos librerías evaluadas");
        for result in &run.results {
            assert_eq!(result.status, TestStatus::Ok);
            println!(
                "      ⚖️ [{variant_label}] {} → {:.4}",
                result.library, result.similarity
            );
            match result.library.as_str() {
                "lib-a" => assert!(
                    (result.similarity - 1.0).abs() < 1e-9,
                    "la librería embebida sella 1.0"
                ),
                "lib-b" => assert!(
                    result.similarity < 0.5,
                    "la librería ajena colapsa bajo el umbral"
                ),
                unexpected => panic!("librería inesperada: {unexpected}"),
            }
        }
    }
    assert_eq!(driver.error_tally(), 0);

    println!("✅ [VERDICT]: End-to-end chain sealed.");
}

#[test]
fn library_filter_restricts_the_roster() {
    let dataset = forge_witness_dataset();
    let mut driver = forge_driver(&dataset, true);

    let filter = vec!["lib-b".to_string()];
    let runs = driver.benchmark("chat-app", Some(&filter)).expect("benchmark");
    for run in runs.values() {
        assert_eq!(run.results.len(), 1);
        assert_eq!(run.results[0].library, "lib-b");
    }
}

#[test]
fn prepopulated_cancel_token_drains_with_cancelled_status() {
    let dataset = forge_witness_dataset();
    let cancel_token = Arc::new(AtomicBool::new(false));
    cancel_token.store(true, Ordering::SeqCst);

    let mut driver = forge_driver(&dataset, false).with_cancel_token(cancel_token);
    let runs = driver.benchmark("chat-app", None).expect("benchmark");

    for run in runs.values() {
        for result in &run.results {
            assert_eq!(result.status, TestStatus::Cancelled);
            assert_eq!(result.similarity, 0.0);
        }
    }
}
