// [libs/infra/store/src/dataset.rs]
/*!
 * =================================================================
 * APARATO: DATASET LAYOUT (V9.2 - DIRECTORY SOVEREIGN)
 * CLASIFICACIÓN: INFRASTRUCTURE (ESTRATO L3)
 * RESPONSABILIDAD: CONVENCIONES DE DIRECTORIO Y VARIANTES DE APP
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CANONICAL TREE: baseDir/{libs,apps,libProfiles/<target>,
 *    appProfiles/<target>/<appShort>}; target y extensión provienen de
 *    la definición de perfil activa.
 * 2. VARIANT PREFIXES: Los nombres de app arrastran el prefijo de
 *    variante (allatori-strong-repackage-, proguard-, obfuscapk-, o
 *    vacío); el benchmark agrupa resultados por variante.
 * 3. STABLE ENUMERATION: Todo listado de directorio se ordena para
 *    que el benchmark sea determinista entre sistemas de archivos.
 * =================================================================
 */

use crate::config::DatasetConfig;
use crate::errors::StoreError;
use std::path::{Path, PathBuf};

/// Prefijos de variante reconocidos (el vacío es la variante default).
pub const VARIANT_PREFIXES: [&str; 3] = [
    "allatori-strong-repackage-",
    "proguard-",
    "obfuscapk-",
];

/// Etiqueta nominal de la variante sin prefijo.
pub const DEFAULT_VARIANT: &str = "default";

/// Extensiones de bundle de librería reconocidas.
const LIBRARY_BUNDLE_EXTENSIONS: [&str; 4] = ["jar", "aar", "har", "dex"];

/// Resolución física del árbol del dataset.
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    base_directory: PathBuf,
    target_directory_name: String,
    profile_extension: String,
    ground_truth_path: PathBuf,
}

impl DatasetLayout {
    /**
     * Construye el layout desde la configuración del dataset y la
     * definición de perfil activa (target + extensión).
     */
    pub fn new(
        config: &DatasetConfig,
        target_directory_name: &str,
        profile_extension: &str,
    ) -> Self {
        Self {
            base_directory: PathBuf::from(&config.base_dir),
            target_directory_name: target_directory_name.to_string(),
            profile_extension: profile_extension.trim_start_matches('.').to_string(),
            ground_truth_path: PathBuf::from(&config.ground_truth),
        }
    }

    /// Directorio de bundles de librería.
    #[must_use]
    pub fn libs_dir(&self) -> PathBuf {
        self.base_directory.join("libs")
    }

    /// Directorio de paquetes de aplicación.
    #[must_use]
    pub fn apps_dir(&self) -> PathBuf {
        self.base_directory.join("apps")
    }

    /// Directorio de perfiles de librería del target activo.
    #[must_use]
    pub fn lib_profiles_dir(&self) -> PathBuf {
        self.base_directory
            .join("libProfiles")
            .join(&self.target_directory_name)
    }

    /// Directorio de perfiles de una aplicación del target activo.
    #[must_use]
    pub fn app_profiles_dir(&self, app_short_name: &str) -> PathBuf {
        self.base_directory
            .join("appProfiles")
            .join(&self.target_directory_name)
            .join(app_short_name)
    }

    /// Ruta del archivo de verdad de terreno.
    #[must_use]
    pub fn ground_truth_path(&self) -> &Path {
        &self.ground_truth_path
    }

    /// Ruta del perfil de una librería.
    #[must_use]
    pub fn lib_profile_path(&self, library_identifier: &str) -> PathBuf {
        self.lib_profiles_dir()
            .join(format!("{library_identifier}.{}", self.profile_extension))
    }

    /// Ruta del perfil de una variante de aplicación.
    #[must_use]
    pub fn app_profile_path(&self, app_short_name: &str, app_file_stem: &str) -> PathBuf {
        self.app_profiles_dir(app_short_name)
            .join(format!("{app_file_stem}.{}", self.profile_extension))
    }

    /**
     * Separa el prefijo de variante de un nombre de archivo de app.
     *
     * # Returns:
     * (etiqueta de variante, resto del nombre). Sin prefijo reconocido
     * la variante es `DEFAULT_VARIANT` y el nombre viaja intacto.
     */
    #[must_use]
    pub fn split_variant(file_stem: &str) -> (&'static str, &str) {
        for prefix in VARIANT_PREFIXES {
            if let Some(stripped) = file_stem.strip_prefix(prefix) {
                // La etiqueta nominal es el prefijo sin el guion final.
                let label = prefix.trim_end_matches('-');
                // Mapeo estable prefijo → etiqueta estática.
                let static_label = match label {
                    "allatori-strong-repackage" => "allatori-strong-repackage",
                    "proguard" => "proguard",
                    _ => "obfuscapk",
                };
                return (static_label, stripped);
            }
        }
        (DEFAULT_VARIANT, file_stem)
    }

    /// Perfiles de librería disponibles, en orden estable.
    pub fn list_library_profiles(&self) -> Result<Vec<PathBuf>, StoreError> {
        self.list_directory(&self.lib_profiles_dir(), &[self.profile_extension.as_str()])
    }

    /// Bundles de librería disponibles, en orden estable.
    pub fn list_library_bundles(&self) -> Result<Vec<PathBuf>, StoreError> {
        self.list_directory(&self.libs_dir(), &LIBRARY_BUNDLE_EXTENSIONS)
    }

    /**
     * Variantes de perfil de una aplicación, en orden estable.
     *
     * # Returns:
     * Pares (etiqueta de variante, ruta del perfil).
     */
    pub fn list_app_profile_variants(
        &self,
        app_short_name: &str,
    ) -> Result<Vec<(String, PathBuf)>, StoreError> {
        let roster = self.list_directory(
            &self.app_profiles_dir(app_short_name),
            &[self.profile_extension.as_str()],
        )?;
        Ok(roster
            .into_iter()
            .map(|path| {
                let file_stem = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default();
                let (variant_label, _) = Self::split_variant(file_stem);
                (variant_label.to_string(), path)
            })
            .collect())
    }

    /// Listado ordenado de un directorio filtrado por extensiones.
    fn list_directory(
        &self,
        directory: &Path,
        accepted_extensions: &[&str],
    ) -> Result<Vec<PathBuf>, StoreError> {
        let mut roster = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let path = entry?.path();
            let extension_matches = path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| accepted_extensions.contains(&extension));
            if path.is_file() && extension_matches {
                roster.push(path);
            }
        }
        roster.sort();
        Ok(roster)
    }
}
