// [apps/verdict/src/commands/inspect.rs]
/*!
 * =================================================================
 * APARATO: INSPECT COMMAND (V6.1 - RESOLUTION PROBE)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: IMPRESIÓN DE RUTAS RESUELTAS Y VERDAD DE TERRENO
 * =================================================================
 */

use anyhow::{Context, Result};
use librarius_infra_store::{DatasetConfig, DatasetLayout, GroundTruthStore};
use std::path::Path;
use tracing::instrument;

/**
 * Ejecuta el subcomando inspect: rutas resueltas + whitelist de la app.
 *
 * La salida viaja por stdout (es el contrato del operador, no un log).
 */
#[instrument(skip_all, fields(app = %app_short_name))]
pub fn execute(dataset_path: &Path, app_short_name: &str) -> Result<()> {
    let dataset = DatasetConfig::load(dataset_path).context("configuración del dataset")?;
    // Sin definición de perfil activa, el target y la extensión del
    // dataset gobiernan la resolución.
    let layout = DatasetLayout::new(&dataset, &dataset.target_dir, &dataset.extension);

    println!("🔎 [INSPECT] aplicación: {app_short_name}");
    println!("    libs:        {:?}", layout.libs_dir());
    println!("    apps:        {:?}", layout.apps_dir());
    println!("    libProfiles: {:?}", layout.lib_profiles_dir());
    println!("    appProfiles: {:?}", layout.app_profiles_dir(app_short_name));
    println!("    groundTruth: {:?}", layout.ground_truth_path());

    let ground_truth = GroundTruthStore::load(layout.ground_truth_path())?;
    let whitelist = ground_truth.get_libraries(app_short_name)?;
    println!("    whitelist ({} librerías):", whitelist.len());
    for library_identifier in whitelist {
        match ground_truth
            .get_version_whitelist(app_short_name)?
            .get(library_identifier)
        {
            Some(versions) => {
                let version_roster: Vec<&str> =
                    versions.iter().map(String::as_str).collect();
                println!("      - {library_identifier} @ {}", version_roster.join(", "));
            }
            None => println!("      - {library_identifier}"),
        }
    }

    match layout.list_app_profile_variants(app_short_name) {
        Ok(variants) => {
            println!("    variantes perfiladas: {}", variants.len());
            for (variant_label, profile_path) in variants {
                println!("      - [{variant_label}] {profile_path:?}");
            }
        }
        Err(_) => println!("    variantes perfiladas: (directorio ausente)"),
    }
    Ok(())
}
