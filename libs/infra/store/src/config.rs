// [libs/infra/store/src/config.rs]
/*!
 * =================================================================
 * APARATO: CONFIGURATION CONTRACTS (V9.3 - DUAL DIALECT)
 * CLASIFICACIÓN: INFRASTRUCTURE (ESTRATO L3)
 * RESPONSABILIDAD: CONFIG DE DATASET (key=value) Y DEFINICIÓN (JSON)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRICT KEYS: El dialecto key=value reconoce exactamente
 *    {base-dir, target-dir, android-path, extension, ground-truth};
 *    cualquier otra llave es ConfigError.
 * 2. QUOTE STRIPPING: Valores entre comillas pierden sus comillas
 *    envolventes (simples o dobles).
 * 3. SYMBOLIC KINDS: La definición de perfil refiere fábricas,
 *    normalizadores e integraciones por nombre simbólico estable;
 *    la tabla de integración los resuelve al cargar.
 * =================================================================
 */

use crate::errors::StoreError;
use librarius_domain_profiles::ThresholdConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Configuración del dataset (dialecto key=value).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Directorio raíz del dataset.
    pub base_dir: String,
    /// Subdirectorio target de los perfiles.
    pub target_dir: String,
    /// Ruta del SDK de Android (colaborador del lector de bytecode).
    pub android_path: Option<String>,
    /// Extensión de archivo de los perfiles.
    pub extension: String,
    /// Ruta del archivo de verdad de terreno.
    pub ground_truth: String,
}

/// Retira las comillas envolventes (simples o dobles) de un valor.
fn strip_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.len() >= 2 {
        let bytes = trimmed.as_bytes();
        if (bytes[0] == b'"' && bytes[trimmed.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[trimmed.len() - 1] == b'\'')
        {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

impl DatasetConfig {
    /**
     * Parsea la configuración desde texto key=value.
     *
     * # Errors:
     * `ConfigError` ante llaves desconocidas o líneas sin '='.
     */
    pub fn parse(source_text: &str) -> Result<Self, StoreError> {
        let mut config = Self::default();

        for (line_ordinal, raw_line) in source_text.lines().enumerate() {
            let effective_line = raw_line.split('#').next().unwrap_or("").trim();
            if effective_line.is_empty() {
                continue;
            }

            let (raw_key, raw_value) = effective_line.split_once('=').ok_or_else(|| {
                StoreError::config(format!(
                    "línea {} sin separador '=': '{effective_line}'",
                    line_ordinal + 1
                ))
            })?;

            let key = raw_key.trim();
            let value = strip_quotes(raw_value).to_string();
            match key {
                "base-dir" => config.base_dir = value,
                "target-dir" => config.target_dir = value,
                "android-path" => config.android_path = Some(value),
                "extension" => config.extension = value,
                "ground-truth" => config.ground_truth = value,
                unknown_key => {
                    return Err(StoreError::config(format!(
                        "llave desconocida en la línea {}: '{unknown_key}'",
                        line_ordinal + 1
                    )))
                }
            }
        }
        Ok(config)
    }

    /// Carga la configuración desde disco.
    pub fn load<P: AsRef<Path>>(source_path: P) -> Result<Self, StoreError> {
        let source_text = std::fs::read_to_string(source_path)?;
        Self::parse(&source_text)
    }
}

/// Declaración de una extensión en la definición de perfil.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtensionDecl {
    /// Nombre corto de la extensión ("cls", "mtd", "cst", …).
    pub name: String,
    /// Política de retención: "runtime" | "source" | "none".
    #[serde(default = "default_retention_label")]
    pub retention: String,
    /// Argumentos específicos de la extensión (geometrías, llaves…).
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

fn default_retention_label() -> String {
    "runtime".to_string()
}

/// Definición estructurada de un perfil (JSON).
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDefinition {
    /// Nombre nominal del perfil.
    pub name: String,
    /// Extensión de archivo de los artefactos.
    pub extension: String,
    /// Subdirectorio target de los perfiles.
    pub target_dir: String,
    /// Clase de implementación del perfil (nombre simbólico).
    pub profile_kind: String,
    /// Fábrica IL activa (nombre simbólico).
    pub il_factory: String,
    /// Normalizador de opcodes activo (nombre simbólico; opcional).
    #[serde(default)]
    pub normalizer: Option<String>,
    /// Integración activa: paquete de estrategias y pasos por defecto.
    pub integration: String,
    /// Extensiones declaradas con sus argumentos.
    #[serde(default)]
    pub extensions: Vec<ExtensionDecl>,
    /// Umbrales por tipo de perfil {nombre simbólico → decimal [0,1]}.
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
    /// Cota superior U del mapeo de distancia de localidad.
    #[serde(default)]
    pub locality_distance_bound: Option<f64>,
}

impl ProfileDefinition {
    /**
     * Parsea la definición desde JSON.
     *
     * # Errors:
     * `MalformedDefinition` ante JSON inválido; la validación de
     * umbrales ocurre en [`ProfileDefinition::threshold_config`].
     */
    pub fn parse(source_json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(source_json)?)
    }

    /// Carga la definición desde disco.
    pub fn load<P: AsRef<Path>>(source_path: P) -> Result<Self, StoreError> {
        let source_json = std::fs::read_to_string(source_path)?;
        Self::parse(&source_json)
    }

    /**
     * Materializa el mapa de umbrales validado.
     *
     * # Errors:
     * Propaga umbrales fuera de [0,1] y nombres simbólicos desconocidos.
     */
    pub fn threshold_config(&self) -> Result<ThresholdConfig, StoreError> {
        let mut config = ThresholdConfig::from_named_map(&self.thresholds)?;
        if let Some(bound) = self.locality_distance_bound {
            config.set_locality_distance_bound(bound)?;
        }
        Ok(config)
    }
}
