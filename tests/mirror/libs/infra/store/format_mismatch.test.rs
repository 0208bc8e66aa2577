// [tests/mirror/libs/infra/store/format_mismatch.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE DESAJUSTES DE FORMATO (V9.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-STORE
 * RESPONSABILIDAD: RECHAZO INAPELABLE DE ARTEFACTOS DESALINEADOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MAGIC SEAL: Magia corrupta aborta antes de tocar el pool.
 * 2. NAME DISCIPLINE: Una extensión desconocida o fuera de orden es
 *    FormatMismatch; el lector JAMÁS la omite silenciosamente.
 * 3. FUTURE SHIELD: Versiones de formato futuras se rechazan.
 * =================================================================
 */

use librarius_domain_profiles::{
    ClassListExtension, MethodListExtension, PayloadBlueprint, ProfileInfo, ProfileInfoExtension,
    ProfileManager, RetentionPolicy, CLASS_EXTENSION_NAME, METHOD_EXTENSION_NAME,
};
use librarius_infra_store::{decode_profile, encode_profile, StoreError};

/// Forma canónica reducida: nfo + cls.
fn canonical_composer(is_app: bool) -> Result<ProfileManager, StoreError> {
    let mut shape = ProfileManager::new(is_app);
    shape.register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(is_app))))?;
    shape.register_extension(Box::new(ClassListExtension::new(
        CLASS_EXTENSION_NAME,
        RetentionPolicy::Runtime,
        PayloadBlueprint::new(),
    )))?;
    Ok(shape)
}

/// Forma divergente: registra "mtd" donde el artefacto declara "cls".
fn divergent_composer(is_app: bool) -> Result<ProfileManager, StoreError> {
    let mut shape = ProfileManager::new(is_app);
    shape.register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(is_app))))?;
    shape.register_extension(Box::new(MethodListExtension::new(
        METHOD_EXTENSION_NAME,
        RetentionPolicy::Runtime,
        PayloadBlueprint::new(),
    )))?;
    Ok(shape)
}

fn witness_artifact() -> Vec<u8> {
    let manager = canonical_composer(false).expect("composición");
    encode_profile(&manager).expect("encode")
}

#[test]
fn corrupted_magic_is_rejected_before_the_pool() {
    println!("🧪 [MISMATCH_GAUNTLET]: Auditing magic seal...");

    let mut poisoned_artifact = witness_artifact();
    poisoned_artifact[0] = b'Z';

    let verdict = decode_profile(&poisoned_artifact, &canonical_composer);
    assert!(matches!(verdict, Err(StoreError::FormatMismatch { .. })));

    println!("✅ [VERDICT]: Magic seal holds.");
}

#[test]
fn unknown_extension_name_is_never_skipped() {
    let artifact = witness_artifact();
    let verdict = decode_profile(&artifact, &divergent_composer);
    assert!(
        matches!(verdict, Err(StoreError::FormatMismatch { .. })),
        "el lector jamás omite una extensión desconocida"
    );
}

#[test]
fn future_format_version_is_rejected() {
    let mut artifact = witness_artifact();
    // La versión vive en el quinto octeto (tras la magia); 0x7F > versión vigente.
    artifact[4] = 0x7F;
    let verdict = decode_profile(&artifact, &canonical_composer);
    assert!(matches!(verdict, Err(StoreError::FormatMismatch { .. })));
}

#[test]
fn truncated_artifact_surfaces_as_io_fault() {
    let artifact = witness_artifact();
    let truncated = &artifact[..artifact.len() / 2];
    assert!(decode_profile(truncated, &canonical_composer).is_err());
}

#[test]
fn extension_count_mismatch_is_a_format_fault() {
    // Artefacto con solo "nfo" leído por un proveedor que exige "nfo"+"cls".
    let mut reduced_manager = ProfileManager::new(false);
    reduced_manager
        .register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(false))))
        .expect("nfo");
    let reduced_artifact = encode_profile(&reduced_manager).expect("encode");

    let verdict = decode_profile(&reduced_artifact, &canonical_composer);
    assert!(matches!(verdict, Err(StoreError::FormatMismatch { .. })));
}
