// [tests/mirror/libs/infra/store/profile_roundtrip.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE BIYECCIÓN DE PERFIL (V9.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-STORE
 * RESPONSABILIDAD: load(save(P)) ≡ P Y DETERMINISMO DEL PIPELINE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FULL CYCLE: jerarquía → pipeline de extracción → cristalización
 *    → hidratación → igualdad componente a componente.
 * 2. DETERMINISM SEAL: Mismo (vista, estrategia) ⟹ artefactos
 *    byte-idénticos entre construcciones independientes.
 * 3. RETENTION AUDIT: Las extensiones Source jamás sobreviven al
 *    ciclo de cristalización.
 * =================================================================
 */

use librarius_domain_bytecode::{
    BasicFuzzyFactory, InMemoryHierarchy, MemoryClassBuilder, MemoryMethodBuilder, OpToken,
    RegisterMachineNormalizer, TypeRef,
};
use librarius_domain_bytecode::view::LoaderKind;
use librarius_domain_profiles::{
    ClassListExtension, ConstantsExtension, FieldListExtension, MethodListExtension,
    PackageListExtension, PayloadBlueprint, PayloadKind, ProfileInfo, ProfileInfoExtension,
    ProfileManager, RetentionPolicy, CLASS_EXTENSION_NAME, FIELD_EXTENSION_NAME,
    METHOD_EXTENSION_NAME, PACKAGE_EXTENSION_NAME,
};
use librarius_domain_strategy::{
    AppScopePolicy, ClassFeatureStep, ClassRosterStep, ExtractionContext, FieldRosterStep,
    InfoConstantsStep, MethodFeatureStep, MethodRosterStep, PackageTreeStep, PipelineExecutor,
    StrategyRegistry, StringConstantsStep, BLOOM_PAYLOAD_KEY, DOC_HASH_PAYLOAD_KEY,
    LOCALITY_PAYLOAD_KEY, ROLLING_PAYLOAD_KEY,
};
use librarius_domain_profiles::WEIGHT_PAYLOAD_KEY;
use librarius_infra_store::{encode_profile, load_profile, save_profile, StoreError};
use std::sync::Arc;

/// Proveedor de la forma canónica del gestor (mismo orden que el build).
fn compose_manager(is_app_profile: bool) -> Result<ProfileManager, StoreError> {
    let mut manager = ProfileManager::new(is_app_profile);
    manager.register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(
        is_app_profile,
    ))))?;
    manager.register_extension(Box::new(PackageListExtension::new(
        PACKAGE_EXTENSION_NAME,
        RetentionPolicy::Runtime,
        PayloadBlueprint::new(),
    )))?;
    manager.register_extension(Box::new(ClassListExtension::new(
        CLASS_EXTENSION_NAME,
        RetentionPolicy::Runtime,
        PayloadBlueprint::new()
            .declare(BLOOM_PAYLOAD_KEY, PayloadKind::standard_bloom())
            .declare(LOCALITY_PAYLOAD_KEY, PayloadKind::Locality)
            .declare(DOC_HASH_PAYLOAD_KEY, PayloadKind::Hash32)
            .declare(WEIGHT_PAYLOAD_KEY, PayloadKind::Weight),
    )))?;
    manager.register_extension(Box::new(MethodListExtension::new(
        METHOD_EXTENSION_NAME,
        RetentionPolicy::Runtime,
        PayloadBlueprint::new()
            .declare(ROLLING_PAYLOAD_KEY, PayloadKind::Rolling)
            .declare(LOCALITY_PAYLOAD_KEY, PayloadKind::Locality),
    )))?;
    manager.register_extension(Box::new(FieldListExtension::new(
        FIELD_EXTENSION_NAME,
        RetentionPolicy::Runtime,
        PayloadBlueprint::new(),
    )))?;
    manager.register_extension(Box::new(ConstantsExtension::new(RetentionPolicy::Runtime)))?;
    Ok(manager)
}

/// Jerarquía testigo con paquetes, campos, cuerpos y literales.
fn witness_hierarchy() -> InMemoryHierarchy {
    let platform_string = TypeRef::object("java/lang/String", LoaderKind::Platform);
    let mut hierarchy = InMemoryHierarchy::new();

    hierarchy.register(
        MemoryClassBuilder::application("com/example/net/HttpClient")
            .field("timeout", TypeRef::primitive("I"), false)
            .method(
                MemoryMethodBuilder::new("request")
                    .parameter(platform_string.clone())
                    .returns(platform_string.clone())
                    .op(OpToken::typed("invoke-virtual", platform_string.clone()))
                    .op(OpToken::literal("const-string", "user-agent"))
                    .op(OpToken::bare("return-object"))
                    .build(),
            )
            .build(),
    );
    hierarchy.register(
        MemoryClassBuilder::application("com/example/net/Router")
            .method(
                MemoryMethodBuilder::new("route")
                    .parameter(TypeRef::primitive("I"))
                    .op(OpToken::bare("if-eqz"))
                    .op(OpToken::bare("return-void"))
                    .build(),
            )
            .build(),
    );
    hierarchy.register(
        MemoryClassBuilder::application("com/example/util/Pool")
            .method(
                MemoryMethodBuilder::new("acquire")
                    .op(OpToken::typed("new-instance", platform_string))
                    .op(OpToken::bare("return-object"))
                    .build(),
            )
            .build(),
    );
    // Clase de plataforma: fuera del alcance aplicativo, jamás perfilada.
    hierarchy.register(MemoryClassBuilder::platform("java/lang/String").build());
    hierarchy
}

/// Registro de pasos canónico del pipeline.
fn forge_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    registry.register_policy(Arc::new(AppScopePolicy));
    registry.register_step(Arc::new(InfoConstantsStep));
    registry.register_step(Arc::new(PackageTreeStep));
    registry.register_step(Arc::new(ClassRosterStep));
    registry.register_step(Arc::new(ClassFeatureStep));
    registry.register_step(Arc::new(StringConstantsStep));
    registry.register_step(Arc::new(MethodRosterStep));
    registry.register_step(Arc::new(MethodFeatureStep));
    registry.register_step(Arc::new(FieldRosterStep));
    registry
}

/// Construye un gestor completo desde la jerarquía testigo.
fn build_manager() -> ProfileManager {
    let hierarchy = witness_hierarchy();
    let registry = forge_registry();
    let factory = BasicFuzzyFactory;
    let normalizer = RegisterMachineNormalizer;
    let ctx = ExtractionContext {
        view: &hierarchy,
        il_factory: &factory,
        normalizer: Some(&normalizer),
    };

    let mut manager = compose_manager(false).expect("composición");
    PipelineExecutor::run(&registry, &ctx, &mut manager).expect("pipeline");
    manager
}

#[test]
fn load_save_cycle_is_a_componentwise_bijection() {
    println!("🧪 [ROUNDTRIP_GAUNTLET]: Auditing load(save(P)) ≡ P...");

    let built_manager = build_manager();
    let workdir = tempfile::tempdir().expect("tempdir");
    let artifact_path = workdir.path().join("witness.lfp");

    let integrity_token = save_profile(&built_manager, &artifact_path).expect("save");
    println!("      🛡️ [TOKEN]: {}", &integrity_token[..16]);

    let rehydrated = load_profile(&artifact_path, &compose_manager).expect("load");

    assert_eq!(rehydrated.pool(), built_manager.pool(), "pool bit-perfecto");
    assert_eq!(
        rehydrated.classes().expect("cls"),
        built_manager.classes().expect("cls"),
        "arena de clases"
    );
    assert_eq!(
        rehydrated.methods().expect("mtd"),
        built_manager.methods().expect("mtd"),
        "arena de métodos"
    );
    assert_eq!(
        rehydrated.fields().expect("fld"),
        built_manager.fields().expect("fld"),
        "arena de campos"
    );
    assert_eq!(
        rehydrated.packages().expect("pkg"),
        built_manager.packages().expect("pkg"),
        "árbol de paquetes"
    );
    assert_eq!(
        rehydrated.constants().expect("cst").entries(),
        built_manager.constants().expect("cst").entries(),
        "corpus de constantes"
    );
    assert_eq!(
        rehydrated.info().expect("nfo").constants,
        built_manager.info().expect("nfo").constants,
        "constantes de cabecera"
    );
    assert!(!rehydrated.is_app_profile());

    println!("✅ [VERDICT]: Bijection sealed.");
}

#[test]
fn independent_builds_crystallize_byte_identical_artifacts() {
    println!("🧪 [DETERMINISM_GAUNTLET]: Auditing byte parity across builds...");

    let first_artifact = encode_profile(&build_manager()).expect("primer build");
    let second_artifact = encode_profile(&build_manager()).expect("segundo build");

    println!(
        "      📐 [SIZES]: first={} second={}",
        first_artifact.len(),
        second_artifact.len()
    );
    assert_eq!(first_artifact, second_artifact, "determinismo byte a byte");

    println!("✅ [VERDICT]: Determinism sealed.");
}

#[test]
fn source_extensions_never_survive_the_cycle() {
    // Un gestor cuyo corpus "cst" es Source no debe cristalizarlo.
    let mut manager = ProfileManager::new(false);
    manager
        .register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(false))))
        .expect("nfo");
    manager
        .register_extension(Box::new(ConstantsExtension::new(RetentionPolicy::Source)))
        .expect("cst");

    let artifact = encode_profile(&manager).expect("encode");

    // El artefacto declara únicamente la extensión RUNTIME "nfo".
    let reduced_composer = |is_app: bool| -> Result<ProfileManager, StoreError> {
        let mut shape = ProfileManager::new(is_app);
        shape.register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(is_app))))?;
        Ok(shape)
    };
    let rehydrated =
        librarius_infra_store::decode_profile(&artifact, &reduced_composer).expect("decode");
    assert!(rehydrated.constants().is_err(), "Source jamás sobrevive");
}
