// [apps/verdict/src/commands/build.rs]
/*!
 * =================================================================
 * APARATO: BUILD COMMAND (V6.2 - PROFILE FORGE)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: CONSTRUCCIÓN Y CRISTALIZACIÓN DE PERFILES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUMP BOUNDARY: El lector de bytecode corre fuera de proceso y
 *    deposita volcados <stem>.chx.json junto a cada bundle; el build
 *    consume exclusivamente esos volcados.
 * 2. WILDCARD SENTINEL: El objetivo "-*" construye el roster completo
 *    de librerías; un nombre concreto construye las variantes de esa
 *    aplicación.
 * 3. SOURCE DISCARD: Las extensiones Source se descartan en la
 *    antesala de la cristalización, jamás después.
 * =================================================================
 */

use crate::integration::IntegrationTable;
use anyhow::{bail, Context, Result};
use librarius_domain_bytecode::hierarchy_from_json_file;
use librarius_domain_profiles::ProfileManager;
use librarius_domain_strategy::{ExtractionContext, PipelineExecutor};
use librarius_infra_store::{save_profile, DatasetConfig, DatasetLayout, ProfileDefinition};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Sufijo de los volcados de jerarquía del lector externo.
const HIERARCHY_DUMP_SUFFIX: &str = ".chx.json";

/// Centinela de construcción masiva de librerías.
const ALL_LIBRARIES_SENTINEL: &str = "-*";

/// Enumera los volcados de jerarquía de un directorio, en orden estable.
fn list_hierarchy_dumps(directory: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut roster = Vec::new();
    for entry in std::fs::read_dir(directory)
        .with_context(|| format!("enumeración de volcados en {directory:?}"))?
    {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(stem) = file_name.strip_suffix(HIERARCHY_DUMP_SUFFIX) {
            roster.push((stem.to_string(), path.clone()));
        }
    }
    roster.sort();
    Ok(roster)
}

/// Construye un gestor completo desde un volcado de jerarquía.
fn forge_profile(
    dump_path: &Path,
    artifact_stem: &str,
    is_app_profile: bool,
    definition: &ProfileDefinition,
) -> Result<ProfileManager> {
    let table = IntegrationTable::global();
    let il_factory = table.il_factory(&definition.il_factory)?;
    let normalizer = definition
        .normalizer
        .as_deref()
        .map(|symbolic_name| table.normalizer(symbolic_name))
        .transpose()?;
    let registry = (table.integration(&definition.integration)?.forge_registry)();

    let hierarchy = hierarchy_from_json_file(dump_path)
        .with_context(|| format!("hidratación del volcado {dump_path:?}"))?;

    let mut manager = IntegrationTable::compose_manager(definition, is_app_profile)?;
    if let Ok(info) = manager.info_mut() {
        info.set_constant("name", artifact_stem);
        info.set_constant("profile", &definition.name);
    }

    let ctx = ExtractionContext {
        view: &hierarchy,
        il_factory: il_factory.as_ref(),
        normalizer: normalizer.as_deref(),
    };
    PipelineExecutor::run(&registry, &ctx, &mut manager).context("pipeline de extracción")?;

    // Antesala de la cristalización: el andamiaje Source se descarta.
    manager.discard_source_extensions();
    Ok(manager)
}

/**
 * Ejecuta el subcomando build.
 *
 * # Arguments:
 * * `target` - Nombre corto de aplicación, o `-*` para el roster
 *   completo de librerías.
 */
#[instrument(skip_all, fields(target = %target))]
pub fn execute(definition_path: &Path, dataset_path: &Path, target: &str) -> Result<()> {
    let definition = ProfileDefinition::load(definition_path).context("definición de perfil")?;
    let dataset = DatasetConfig::load(dataset_path).context("configuración del dataset")?;
    let layout = DatasetLayout::new(&dataset, &definition.target_dir, &definition.extension);

    if target == ALL_LIBRARIES_SENTINEL {
        let dumps = list_hierarchy_dumps(&layout.libs_dir())?;
        if dumps.is_empty() {
            bail!("sin volcados de jerarquía en {:?}", layout.libs_dir());
        }
        info!("🏗️ [BUILD]: Forging {} library profiles...", dumps.len());

        for (library_stem, dump_path) in dumps {
            let manager = forge_profile(&dump_path, &library_stem, false, &definition)?;
            let artifact_path = layout.lib_profile_path(&library_stem);
            let token = save_profile(&manager, &artifact_path)?;
            info!("   📦 [LIB_SEALED]: {} → token {}…", library_stem, &token[..12]);
        }
        return Ok(());
    }

    // Variantes de la aplicación: los volcados viven junto a los APK.
    let dumps = list_hierarchy_dumps(&layout.apps_dir())?;
    let app_dumps: Vec<(String, PathBuf)> = dumps
        .into_iter()
        .filter(|(stem, _)| DatasetLayout::split_variant(stem).1 == target)
        .collect();
    if app_dumps.is_empty() {
        bail!(
            "sin volcados de jerarquía para la aplicación '{target}' en {:?}",
            layout.apps_dir()
        );
    }

    info!("🏗️ [BUILD]: Forging {} app variants for '{}'...", app_dumps.len(), target);
    for (variant_stem, dump_path) in app_dumps {
        let manager = forge_profile(&dump_path, &variant_stem, true, &definition)?;
        let artifact_path = layout.app_profile_path(target, &variant_stem);
        let token = save_profile(&manager, &artifact_path)?;
        info!("   📱 [APP_SEALED]: {} → token {}…", variant_stem, &token[..12]);
    }
    Ok(())
}
