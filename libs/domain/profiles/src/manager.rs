// [libs/domain/profiles/src/manager.rs]
/*!
 * =================================================================
 * APARATO: PROFILE MANAGER (V14.5 - ARENA SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: PROPIEDAD EXCLUSIVA DEL POOL Y LAS EXTENSIONES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. OWNERSHIP CHAIN: El gestor posee las extensiones; las extensiones
 *    poseen sus sub-perfiles; los sub-perfiles se refieren entre sí
 *    por índice entero. Cero ciclos, cero punteros de retorno.
 * 2. ORDERED REGISTRY: Las extensiones conservan su orden de registro;
 *    ese orden ES el orden de cristalización del formato.
 * 3. ASYMMETRY FLAG: 'is_app_profile' fija el ordenamiento canónico
 *    (app, lib) cuando una estrategia es asimétrica.
 * =================================================================
 */

use crate::descriptor_pool::DescriptorPool;
use crate::errors::ProfileError;
use crate::extension::{
    ClassListExtension, ConstantsExtension, FieldListExtension, MethodListExtension,
    PackageListExtension, ProfileExtension, ProfileInfoExtension, RetentionPolicy,
    CLASS_EXTENSION_NAME, CONSTANTS_EXTENSION_NAME, FIELD_EXTENSION_NAME, INFO_EXTENSION_NAME,
    METHOD_EXTENSION_NAME, PACKAGE_EXTENSION_NAME,
};
use crate::info::ProfileInfo;
use crate::model::{ClassProfile, FieldProfile, MethodProfile, PackageProfile};
use std::fmt;
use tracing::debug;

/// Gestor-arena de un perfil (aplicación o librería).
pub struct ProfileManager {
    /// Tabla de cadenas internadas del perfil.
    descriptor_pool: DescriptorPool,
    /// Extensiones en orden de registro (orden de cristalización).
    extensions: Vec<Box<dyn ProfileExtension>>,
    /// Verdadero cuando el perfil describe una aplicación.
    is_app_profile: bool,
}

impl ProfileManager {
    /// Construye un gestor vacío sin extensiones registradas.
    #[must_use]
    pub fn new(is_app_profile: bool) -> Self {
        Self {
            descriptor_pool: DescriptorPool::new(),
            extensions: Vec::new(),
            is_app_profile,
        }
    }

    /// Verdadero cuando el perfil describe una aplicación.
    #[must_use]
    pub fn is_app_profile(&self) -> bool {
        self.is_app_profile
    }

    /// Pool de descriptores (lectura).
    #[must_use]
    pub fn pool(&self) -> &DescriptorPool {
        &self.descriptor_pool
    }

    /// Pool de descriptores (fase de construcción).
    pub fn pool_mut(&mut self) -> &mut DescriptorPool {
        &mut self.descriptor_pool
    }

    /// Reemplaza el pool completo (hidratación desde disco).
    pub fn replace_pool(&mut self, pool: DescriptorPool) {
        self.descriptor_pool = pool;
    }

    /**
     * Registra una extensión al final del orden de cristalización.
     *
     * # Errors:
     * `DuplicateExtension` si ya existe una extensión homónima.
     */
    pub fn register_extension(
        &mut self,
        extension: Box<dyn ProfileExtension>,
    ) -> Result<(), ProfileError> {
        if self.extensions.iter().any(|existing| existing.name() == extension.name()) {
            return Err(ProfileError::DuplicateExtension { name: extension.name().to_string() });
        }
        debug!(
            "🧩 [EXTENSION_REGISTERED]: '{}' retention={:?} slot={}",
            extension.name(),
            extension.retention(),
            self.extensions.len()
        );
        self.extensions.push(extension);
        Ok(())
    }

    /// Extensiones en orden de registro.
    #[must_use]
    pub fn extensions(&self) -> &[Box<dyn ProfileExtension>] {
        &self.extensions
    }

    /// Extensiones con retención Runtime, en orden de registro.
    pub fn runtime_extensions(&self) -> impl Iterator<Item = &dyn ProfileExtension> {
        self.extensions
            .iter()
            .filter(|extension| extension.retention() == RetentionPolicy::Runtime)
            .map(Box::as_ref)
    }

    /// Descarta las extensiones Source (antesala de la cristalización).
    pub fn discard_source_extensions(&mut self) {
        self.extensions
            .retain(|extension| extension.retention() != RetentionPolicy::Source);
    }

    /// Localiza una extensión por nombre corto.
    #[must_use]
    pub fn extension_by_name(&self, name: &str) -> Option<&dyn ProfileExtension> {
        self.extensions
            .iter()
            .find(|extension| extension.name() == name)
            .map(Box::as_ref)
    }

    /// Localiza una extensión mutable por nombre corto.
    pub fn extension_by_name_mut(&mut self, name: &str) -> Option<&mut Box<dyn ProfileExtension>> {
        self.extensions.iter_mut().find(|extension| extension.name() == name)
    }

    fn typed_extension<T: 'static>(&self, name: &str) -> Result<&T, ProfileError> {
        self.extension_by_name(name)
            .ok_or_else(|| ProfileError::UnknownExtension { name: name.to_string() })?
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| ProfileError::format_mismatch(format!(
                "la extensión '{name}' no es del tipo esperado"
            )))
    }

    fn typed_extension_mut<T: 'static>(&mut self, name: &str) -> Result<&mut T, ProfileError> {
        self.extension_by_name_mut(name)
            .ok_or_else(|| ProfileError::UnknownExtension { name: name.to_string() })?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| ProfileError::format_mismatch(format!(
                "la extensión '{name}' no es del tipo esperado"
            )))
    }

    // --- ACCESSORS NOMINALES DEL CONJUNTO CANÓNICO ---

    /// Arena de clases (extensión "cls").
    pub fn classes(&self) -> Result<&[ClassProfile], ProfileError> {
        Ok(self.typed_extension::<ClassListExtension>(CLASS_EXTENSION_NAME)?.items())
    }

    /// Extensión de clases completa (blueprint incluido).
    pub fn class_extension(&self) -> Result<&ClassListExtension, ProfileError> {
        self.typed_extension::<ClassListExtension>(CLASS_EXTENSION_NAME)
    }

    /// Extensión de clases mutable (fase de construcción).
    pub fn class_extension_mut(&mut self) -> Result<&mut ClassListExtension, ProfileError> {
        self.typed_extension_mut::<ClassListExtension>(CLASS_EXTENSION_NAME)
    }

    /// Arena de métodos (extensión "mtd").
    pub fn methods(&self) -> Result<&[MethodProfile], ProfileError> {
        Ok(self.typed_extension::<MethodListExtension>(METHOD_EXTENSION_NAME)?.items())
    }

    /// Extensión de métodos completa (blueprint incluido).
    pub fn method_extension(&self) -> Result<&MethodListExtension, ProfileError> {
        self.typed_extension::<MethodListExtension>(METHOD_EXTENSION_NAME)
    }

    /// Extensión de métodos mutable (fase de construcción).
    pub fn method_extension_mut(&mut self) -> Result<&mut MethodListExtension, ProfileError> {
        self.typed_extension_mut::<MethodListExtension>(METHOD_EXTENSION_NAME)
    }

    /// Arena de campos (extensión "fld").
    pub fn fields(&self) -> Result<&[FieldProfile], ProfileError> {
        Ok(self.typed_extension::<FieldListExtension>(FIELD_EXTENSION_NAME)?.items())
    }

    /// Extensión de campos completa (blueprint incluido).
    pub fn field_extension(&self) -> Result<&FieldListExtension, ProfileError> {
        self.typed_extension::<FieldListExtension>(FIELD_EXTENSION_NAME)
    }

    /// Extensión de campos mutable (fase de construcción).
    pub fn field_extension_mut(&mut self) -> Result<&mut FieldListExtension, ProfileError> {
        self.typed_extension_mut::<FieldListExtension>(FIELD_EXTENSION_NAME)
    }

    /// Arena de paquetes (extensión "pkg").
    pub fn packages(&self) -> Result<&[PackageProfile], ProfileError> {
        Ok(self.typed_extension::<PackageListExtension>(PACKAGE_EXTENSION_NAME)?.items())
    }

    /// Extensión de paquetes completa (blueprint incluido).
    pub fn package_extension(&self) -> Result<&PackageListExtension, ProfileError> {
        self.typed_extension::<PackageListExtension>(PACKAGE_EXTENSION_NAME)
    }

    /// Extensión de paquetes mutable (fase de construcción).
    pub fn package_extension_mut(&mut self) -> Result<&mut PackageListExtension, ProfileError> {
        self.typed_extension_mut::<PackageListExtension>(PACKAGE_EXTENSION_NAME)
    }

    /// Cabecera de metadatos (extensión "nfo").
    pub fn info(&self) -> Result<&ProfileInfo, ProfileError> {
        Ok(self.typed_extension::<ProfileInfoExtension>(INFO_EXTENSION_NAME)?.info())
    }

    /// Cabecera de metadatos mutable (fase de construcción).
    pub fn info_mut(&mut self) -> Result<&mut ProfileInfo, ProfileError> {
        Ok(self
            .typed_extension_mut::<ProfileInfoExtension>(INFO_EXTENSION_NAME)?
            .info_mut())
    }

    /// Corpus de constantes de cadena (extensión "cst").
    pub fn constants(&self) -> Result<&ConstantsExtension, ProfileError> {
        self.typed_extension::<ConstantsExtension>(CONSTANTS_EXTENSION_NAME)
    }

    /// Corpus de constantes mutable (fase de construcción).
    pub fn constants_mut(&mut self) -> Result<&mut ConstantsExtension, ProfileError> {
        self.typed_extension_mut::<ConstantsExtension>(CONSTANTS_EXTENSION_NAME)
    }
}

impl fmt::Debug for ProfileManager {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ProfileManager")
            .field("is_app_profile", &self.is_app_profile)
            .field("pool_size", &self.descriptor_pool.len())
            .field(
                "extensions",
                &self
                    .extensions
                    .iter()
                    .map(|extension| (extension.name().to_string(), extension.item_count()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
