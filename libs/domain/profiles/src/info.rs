// [libs/domain/profiles/src/info.rs]
/*!
 * =================================================================
 * APARATO: PROFILE INFO HEADER (V14.0 - METADATA SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: VERSIÓN, BANDERAS Y CONSTANTES DEL PERFIL
 * =================================================================
 */

use std::collections::BTreeMap;

/// Versión vigente del formato de perfil LFP.
pub const PROFILE_FORMAT_VERSION: u64 = 1;

/// Bit de bandera: el artefacto describe una aplicación (no una librería).
pub const FLAG_APP_PROFILE: u64 = 1;

/// Cabecera de metadatos del perfil.
///
/// Las constantes libres (nombre de librería, versión, etc.) viven en un
/// mapa ordenado para que la cristalización sea de orden canónico.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    /// Versión del formato con la que se cristalizó el artefacto.
    pub format_version: u64,
    /// Banderas de bit (bit 0 = perfil de aplicación).
    pub flags: u64,
    /// Constantes libres llave → literal.
    pub constants: BTreeMap<String, String>,
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            format_version: PROFILE_FORMAT_VERSION,
            flags: 0,
            constants: BTreeMap::new(),
        }
    }
}

impl ProfileInfo {
    /// Construye una cabecera para aplicación o librería.
    #[must_use]
    pub fn new(is_app_profile: bool) -> Self {
        Self {
            flags: if is_app_profile { FLAG_APP_PROFILE } else { 0 },
            ..Self::default()
        }
    }

    /// Verdadero cuando el bit de aplicación está poblado.
    #[must_use]
    pub fn is_app_profile(&self) -> bool {
        self.flags & FLAG_APP_PROFILE != 0
    }

    /// Registra (o reemplaza) una constante de metadatos.
    pub fn set_constant(&mut self, key: impl Into<String>, literal: impl Into<String>) {
        self.constants.insert(key.into(), literal.into());
    }

    /// Consulta una constante de metadatos.
    #[must_use]
    pub fn constant(&self, key: &str) -> Option<&str> {
        self.constants.get(key).map(String::as_str)
    }
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_flag_follows_the_constructor() {
        assert!(ProfileInfo::new(true).is_app_profile());
        assert!(!ProfileInfo::new(false).is_app_profile());
    }

    #[test]
    fn constants_are_replaceable() {
        let mut info = ProfileInfo::new(false);
        info.set_constant("library", "okhttp");
        info.set_constant("version", "4.9.0");
        info.set_constant("version", "4.9.1");
        assert_eq!(info.constant("library"), Some("okhttp"));
        assert_eq!(info.constant("version"), Some("4.9.1"));
        assert_eq!(info.constant("ghost"), None);
    }
}
