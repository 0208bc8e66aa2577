// [libs/infra/store/src/ground_truth.rs]
/*!
 * =================================================================
 * APARATO: GROUND TRUTH STORE (V9.1 - WHITELIST SOVEREIGN)
 * CLASIFICACIÓN: INFRASTRUCTURE (ESTRATO L3)
 * RESPONSABILIDAD: VERDAD DE TERRENO APLICACIÓN → LIBRERÍAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LINE DISCIPLINE: `<app> ; <lib>[@<versión>[,…]]`, comentarios
 *    con '#', blancos ignorados alrededor de separadores.
 * 2. ACCUMULATION: Líneas duplicadas de una misma aplicación acumulan
 *    en su conjunto de librerías (jamás reemplazan).
 * 3. UNKNOWN IS A FAULT: Consultar una aplicación ausente es
 *    `UnknownApp`, nunca un conjunto vacío silencioso.
 * =================================================================
 */

use crate::errors::StoreError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

/// Verdad de terreno de una aplicación.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppGroundTruth {
    /// Identificadores de librería esperados en la aplicación.
    pub libraries: BTreeSet<String>,
    /// Whitelist de versiones por librería (vacía = cualquier versión).
    pub version_whitelist: BTreeMap<String, BTreeSet<String>>,
}

/// Almacén completo de verdad de terreno.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthStore {
    apps: BTreeMap<String, AppGroundTruth>,
}

impl GroundTruthStore {
    /**
     * Parsea el archivo de verdad de terreno desde texto.
     *
     * # Errors:
     * `ConfigError` ante líneas sin el separador ';' o con campos
     * vacíos tras el recorte de blancos.
     */
    pub fn parse(source_text: &str) -> Result<Self, StoreError> {
        let mut store = Self::default();

        for (line_ordinal, raw_line) in source_text.lines().enumerate() {
            // Comentarios y vacíos: '#' inicia comentario hasta fin de línea.
            let effective_line = raw_line.split('#').next().unwrap_or("").trim();
            if effective_line.is_empty() {
                continue;
            }

            let (app_field, library_field) =
                effective_line.split_once(';').ok_or_else(|| {
                    StoreError::config(format!(
                        "línea {} sin separador ';': '{effective_line}'",
                        line_ordinal + 1
                    ))
                })?;

            let app_short_name = app_field.trim();
            let library_spec = library_field.trim();
            if app_short_name.is_empty() || library_spec.is_empty() {
                return Err(StoreError::config(format!(
                    "línea {} con campos vacíos",
                    line_ordinal + 1
                )));
            }

            let (library_identifier, version_csv) = match library_spec.split_once('@') {
                Some((identifier, versions)) => (identifier.trim(), Some(versions)),
                None => (library_spec, None),
            };

            let app_entry = store.apps.entry(app_short_name.to_string()).or_default();
            app_entry.libraries.insert(library_identifier.to_string());

            if let Some(version_csv) = version_csv {
                let version_set = app_entry
                    .version_whitelist
                    .entry(library_identifier.to_string())
                    .or_default();
                for version_entry in version_csv.split(',') {
                    let trimmed_version = version_entry.trim();
                    if !trimmed_version.is_empty() {
                        version_set.insert(trimmed_version.to_string());
                    }
                }
            }
        }
        Ok(store)
    }

    /// Carga el archivo de verdad de terreno desde disco.
    pub fn load<P: AsRef<Path>>(source_path: P) -> Result<Self, StoreError> {
        let source_text = std::fs::read_to_string(&source_path)?;
        let store = Self::parse(&source_text)?;
        info!(
            "📜 [GROUND_TRUTH]: {} applications hydrated from whitelist.",
            store.apps.len()
        );
        Ok(store)
    }

    /// Conjunto de librerías esperadas de una aplicación.
    pub fn get_libraries(&self, app_short_name: &str) -> Result<&BTreeSet<String>, StoreError> {
        self.apps
            .get(app_short_name)
            .map(|entry| &entry.libraries)
            .ok_or_else(|| StoreError::UnknownApp { app: app_short_name.to_string() })
    }

    /// Whitelist de versiones por librería de una aplicación.
    pub fn get_version_whitelist(
        &self,
        app_short_name: &str,
    ) -> Result<&BTreeMap<String, BTreeSet<String>>, StoreError> {
        self.apps
            .get(app_short_name)
            .map(|entry| &entry.version_whitelist)
            .ok_or_else(|| StoreError::UnknownApp { app: app_short_name.to_string() })
    }

    /// Aplicaciones registradas en orden canónico.
    pub fn app_names(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const WITNESS_WHITELIST: &str = r"
        # Verdad de terreno del Proving Grounds
        chat-app ; okhttp @ 4.9.0, 4.9.1
        chat-app ; gson
        maps-app ; osmdroid@6.1.10   # librería de mapas
    ";

    #[test]
    fn duplicate_app_lines_accumulate() {
        let store = GroundTruthStore::parse(WITNESS_WHITELIST).expect("parseo");
        let libraries = store.get_libraries("chat-app").expect("chat-app");
        assert_eq!(libraries.len(), 2);
        assert!(libraries.contains("okhttp"));
        assert!(libraries.contains("gson"));
    }

    #[test]
    fn version_whitelist_splits_the_csv() {
        let store = GroundTruthStore::parse(WITNESS_WHITELIST).expect("parseo");
        let whitelist = store.get_version_whitelist("chat-app").expect("chat-app");
        let okhttp_versions = whitelist.get("okhttp").expect("okhttp");
        assert_eq!(okhttp_versions.len(), 2);
        assert!(okhttp_versions.contains("4.9.0"));
        assert!(okhttp_versions.contains("4.9.1"));
        assert!(!whitelist.contains_key("gson"), "sin '@' no hay whitelist de versión");
    }

    #[test]
    fn inline_comments_are_stripped() {
        let store = GroundTruthStore::parse(WITNESS_WHITELIST).expect("parseo");
        let whitelist = store.get_version_whitelist("maps-app").expect("maps-app");
        let versions = whitelist.get("osmdroid").expect("osmdroid");
        assert_eq!(versions.iter().next().map(String::as_str), Some("6.1.10"));
    }

    #[test]
    fn missing_app_is_unknown_app() {
        let store = GroundTruthStore::parse(WITNESS_WHITELIST).expect("parseo");
        assert!(matches!(
            store.get_libraries("ghost-app"),
            Err(StoreError::UnknownApp { .. })
        ));
    }

    #[test]
    fn malformed_lines_are_config_faults() {
        assert!(matches!(
            GroundTruthStore::parse("app-sin-separador"),
            Err(StoreError::ConfigError { .. })
        ));
        assert!(matches!(
            GroundTruthStore::parse(" ; okhttp"),
            Err(StoreError::ConfigError { .. })
        ));
    }
}
