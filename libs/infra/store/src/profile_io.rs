// [libs/infra/store/src/profile_io.rs]
/*!
 * =================================================================
 * APARATO: PROFILE IO (V9.3 - LFP1 NORMATIVE)
 * CLASIFICACIÓN: INFRASTRUCTURE (ESTRATO L3)
 * RESPONSABILIDAD: CRISTALIZACIÓN E HIDRATACIÓN DEL ARTEFACTO .lfp
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NORMATIVE LAYOUT: magia "LFP1" | versión varint | banderas varint
 *    | pool de descriptores | conteo de extensiones | por extensión
 *    RUNTIME: nombre | conteo de ítems | cuerpos en orden de índice.
 * 2. RETENTION FILTER: Las extensiones Source/None jamás cristalizan;
 *    el lector exige el mismo conjunto RUNTIME en el mismo orden y un
 *    nombre desconocido aborta con FormatMismatch.
 * 3. INTEGRITY SEAL: Sello SHA-256 del artefacto completo, registrado
 *    en la cristalización y recomputable en la inspección.
 * 4. MMAP FAST-PATH: Hidratación Zero-Copy vía mapeo de memoria con
 *    fallback a lectura buffered ante el rechazo del kernel.
 * =================================================================
 */

use crate::errors::StoreError;
use librarius_core_codec::{WireRead, WireWrite};
use librarius_domain_profiles::{
    DescriptorPool, ProfileExtension, ProfileManager, FLAG_APP_PROFILE, PROFILE_FORMAT_VERSION,
};
use memmap2::MmapOptions;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Magia del formato de perfil.
pub const PROFILE_MAGIC: [u8; 4] = *b"LFP1";

/// Proveedor de la forma del gestor para la hidratación.
///
/// El proveedor DEBE registrar el mismo conjunto de extensiones RUNTIME
/// en el mismo orden con el que el artefacto fue cristalizado.
pub trait ProfileComposer: Send + Sync {
    /// Recrea un gestor vacío con la forma canónica.
    fn compose(&self, is_app_profile: bool) -> Result<ProfileManager, StoreError>;
}

impl<F> ProfileComposer for F
where
    F: Fn(bool) -> Result<ProfileManager, StoreError> + Send + Sync,
{
    fn compose(&self, is_app_profile: bool) -> Result<ProfileManager, StoreError> {
        self(is_app_profile)
    }
}

/**
 * Cristaliza un gestor al layout binario normativo.
 *
 * # Errors:
 * Propaga fallos del modelo (payload ausente, clase desalineada) y del
 * códec subyacente.
 */
pub fn encode_profile(manager: &ProfileManager) -> Result<Vec<u8>, StoreError> {
    let mut artifact = Vec::new();
    artifact.write_all(&PROFILE_MAGIC).map_err(StoreError::Io)?;

    let flags = match manager.info() {
        Ok(info) => info.flags,
        Err(_) => u64::from(manager.is_app_profile()) * FLAG_APP_PROFILE,
    };
    artifact.write_varint_value(PROFILE_FORMAT_VERSION)?;
    artifact.write_varint_value(flags)?;

    manager.pool().encode_into(&mut artifact)?;

    let runtime_extensions: Vec<_> = manager.runtime_extensions().collect();
    artifact.write_varint_value(runtime_extensions.len() as u64)?;
    for extension in runtime_extensions {
        artifact.write_wire_string(extension.name())?;
        artifact.write_varint_value(extension.item_count() as u64)?;
        extension.write_items(&mut artifact)?;
    }
    Ok(artifact)
}

/**
 * Hidrata un gestor desde el layout binario normativo.
 *
 * # Errors:
 * `FormatMismatch` ante magia corrupta, versión futura, conteo de
 * extensiones desalineado o nombre de extensión desconocido/fuera de
 * orden. El lector jamás omite secciones silenciosamente.
 */
pub fn decode_profile(
    artifact: &[u8],
    composer: &dyn ProfileComposer,
) -> Result<ProfileManager, StoreError> {
    let mut cursor = Cursor::new(artifact);

    // 1. MAGIA Y CABECERA
    let mut observed_magic = [0u8; 4];
    cursor.read_exact(&mut observed_magic).map_err(StoreError::Io)?;
    if observed_magic != PROFILE_MAGIC {
        return Err(StoreError::format_mismatch(format!(
            "magia desconocida: {:02X?}",
            observed_magic
        )));
    }

    let observed_version = cursor.read_varint_value()?;
    if observed_version > PROFILE_FORMAT_VERSION {
        return Err(StoreError::format_mismatch(format!(
            "versión futura del formato: {observed_version} (soportada: {PROFILE_FORMAT_VERSION})"
        )));
    }
    let observed_flags = cursor.read_varint_value()?;
    let is_app_profile = observed_flags & FLAG_APP_PROFILE != 0;

    // 2. COMPOSICIÓN DE LA FORMA Y POOL
    let mut manager = composer.compose(is_app_profile)?;
    let pool = DescriptorPool::decode_from(&mut cursor)?;
    manager.replace_pool(pool);

    // 3. EXTENSIONES RUNTIME EN ORDEN DE REGISTRO
    let expected_names: Vec<String> = manager
        .runtime_extensions()
        .map(|extension| extension.name().to_string())
        .collect();

    let observed_extension_count = cursor.read_wire_count()?;
    if observed_extension_count != expected_names.len() {
        return Err(StoreError::format_mismatch(format!(
            "el artefacto declara {} extensiones; el proveedor compone {}",
            observed_extension_count,
            expected_names.len()
        )));
    }

    for expected_name in &expected_names {
        let observed_name = cursor.read_wire_string()?;
        if &observed_name != expected_name {
            return Err(StoreError::format_mismatch(format!(
                "extensión desconocida o fuera de orden: '{observed_name}' (esperada: '{expected_name}')"
            )));
        }
        let item_count = cursor.read_wire_count()?;
        let extension = manager
            .extension_by_name_mut(&observed_name)
            .ok_or_else(|| {
                StoreError::format_mismatch(format!(
                    "el proveedor perdió la extensión '{observed_name}' durante la hidratación"
                ))
            })?;
        extension.read_items(&mut cursor, item_count)?;
    }

    // 4. SINCRONÍA DE CABECERA
    if let Ok(info) = manager.info_mut() {
        info.format_version = observed_version;
        info.flags = observed_flags;
    }
    Ok(manager)
}

/// Sello SHA-256 del artefacto (token de auditoría).
#[must_use]
pub fn audit_token(artifact: &[u8]) -> String {
    let mut integrity_hasher = Sha256::new();
    integrity_hasher.update(artifact);
    hex::encode(integrity_hasher.finalize())
}

/**
 * Cristaliza un gestor en disco y retorna su token de auditoría.
 *
 * # Errors:
 * Falla si el sistema de archivos deniega el acceso o si el modelo
 * viola su blueprint durante la codificación.
 */
#[instrument(skip(manager, storage_path))]
pub fn save_profile<P: AsRef<Path>>(
    manager: &ProfileManager,
    storage_path: P,
) -> Result<String, StoreError> {
    let performance_timer = Instant::now();
    let artifact = encode_profile(manager)?;
    let integrity_token = audit_token(&artifact);

    if let Some(parent_directory) = storage_path.as_ref().parent() {
        if !parent_directory.as_os_str().is_empty() && !parent_directory.exists() {
            std::fs::create_dir_all(parent_directory)?;
        }
    }
    std::fs::write(&storage_path, &artifact)?;

    info!(
        "💾 [PROFILE_SEALED]: {} bytes crystallized. Token: {}… Latency: {:?}",
        artifact.len(),
        &integrity_token[..16],
        performance_timer.elapsed()
    );
    Ok(integrity_token)
}

/**
 * Hidrata un gestor desde disco con fast-path de mapeo de memoria.
 *
 * # Safety:
 * El bloque unsafe invoca `MmapOptions::map` sobre un descriptor de
 * solo lectura; se asume inmutabilidad del artefacto durante la
 * ejecución. Ante el rechazo del kernel degrada a lectura buffered.
 */
#[instrument(skip(storage_path, composer))]
pub fn load_profile<P: AsRef<Path>>(
    storage_path: P,
    composer: &dyn ProfileComposer,
) -> Result<ProfileManager, StoreError> {
    let performance_timer = Instant::now();
    let file_handle = File::open(&storage_path)?;

    let file_metadata = file_handle.metadata()?;
    if file_metadata.len() == 0 {
        return Err(StoreError::format_mismatch("artefacto de perfil vacío"));
    }

    // SAFETY: mapeo de solo lectura sobre un descriptor verificado; el
    // artefacto no se modifica durante la vida del mapeo.
    let manager = match unsafe { MmapOptions::new().map(&file_handle) } {
        Ok(memory_mapped_segment) => decode_profile(&memory_mapped_segment, composer)?,
        Err(mmap_fault) => {
            warn!("🐢 [MMAP_FALLBACK]: Buffered hydration engaged: {mmap_fault}");
            let mut buffered_artifact = Vec::with_capacity(file_metadata.len() as usize);
            let mut reader = File::open(&storage_path)?;
            reader.read_to_end(&mut buffered_artifact)?;
            decode_profile(&buffered_artifact, composer)?
        }
    };

    info!(
        "🌊 [PROFILE_HYDRATED]: pool={} extensions={} Latency: {:?}",
        manager.pool().len(),
        manager.extensions().len(),
        performance_timer.elapsed()
    );
    Ok(manager)
}
