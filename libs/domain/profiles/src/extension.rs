// [libs/domain/profiles/src/extension.rs]
/*!
 * =================================================================
 * APARATO: EXTENSION REGISTRY (V14.4 - RETENTION SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTENEDORES DE SUB-PERFILES CON POLÍTICA DE RETENCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NAMED IDENTITY: La identidad de una extensión es su nombre corto
 *    ASCII; el lector exige el mismo conjunto RUNTIME en el mismo
 *    orden, y un nombre desconocido es FormatMismatch inapelable.
 * 2. RETENTION TRIAD: Runtime (siempre cristaliza), Source (andamiaje
 *    de construcción, descartado antes de serializar), None (jamás
 *    cristaliza ni se reconstruye).
 * 3. DOWNCAST DISCIPLINE: El gestor localiza extensiones por nombre y
 *    des-encajona vía Any; los consumidores tipados usan los
 *    accessors nominales del gestor.
 * =================================================================
 */

use crate::errors::ProfileError;
use crate::info::ProfileInfo;
use crate::model::{ClassProfile, FieldProfile, MethodProfile, PackageProfile};
use crate::payload::PayloadBlueprint;
use librarius_core_codec::{WireRead, WireWrite};
use std::any::Any;
use std::io::{Read, Write};

/// Nombre corto canónico de la lista de clases.
pub const CLASS_EXTENSION_NAME: &str = "cls";
/// Nombre corto canónico de la lista de métodos.
pub const METHOD_EXTENSION_NAME: &str = "mtd";
/// Nombre corto canónico de la lista de campos.
pub const FIELD_EXTENSION_NAME: &str = "fld";
/// Nombre corto canónico de la lista de paquetes.
pub const PACKAGE_EXTENSION_NAME: &str = "pkg";
/// Nombre corto canónico de la cabecera de metadatos.
pub const INFO_EXTENSION_NAME: &str = "nfo";
/// Nombre corto canónico del corpus de constantes de cadena.
pub const CONSTANTS_EXTENSION_NAME: &str = "cst";

/// Política de retención de una extensión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Siempre cristaliza y se reconstruye en la hidratación.
    Runtime,
    /// Poblada solo durante la construcción; descartada al serializar.
    Source,
    /// Jamás cristaliza y jamás se reconstruye.
    None,
}

/// Contenedor nominal de sub-perfiles u otros ítems del perfil.
pub trait ProfileExtension: Any + Send + Sync {
    /// Nombre corto ASCII (identidad de la extensión en el formato).
    fn name(&self) -> &str;

    /// Política de retención declarada al registrar.
    fn retention(&self) -> RetentionPolicy;

    /// Cantidad de ítems contenidos.
    fn item_count(&self) -> usize;

    /// Cristaliza los ítems en orden de índice.
    fn write_items(&self, sink: &mut dyn Write) -> Result<(), ProfileError>;

    /// Hidrata exactamente `item_count` ítems desde el flujo.
    fn read_items(&mut self, source: &mut dyn Read, item_count: usize) -> Result<(), ProfileError>;

    /// Vista Any para des-encajonado tipado.
    fn as_any(&self) -> &dyn Any;

    /// Vista Any mutable para des-encajonado tipado.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Contrato de ítem cristalizable bajo un blueprint de payloads.
pub trait ExtensionItem: Sized + Send + Sync + 'static {
    /// Cristaliza el ítem en el flujo de su extensión.
    fn encode_item<W: Write + ?Sized>(
        &self,
        blueprint: &PayloadBlueprint,
        sink: &mut W,
    ) -> Result<(), ProfileError>;

    /// Hidrata un ítem desde el flujo de su extensión.
    fn decode_item<R: Read + ?Sized>(
        blueprint: &PayloadBlueprint,
        source: &mut R,
    ) -> Result<Self, ProfileError>;
}

macro_rules! impl_extension_item {
    ($item_type:ty) => {
        impl ExtensionItem for $item_type {
            fn encode_item<W: Write + ?Sized>(
                &self,
                blueprint: &PayloadBlueprint,
                sink: &mut W,
            ) -> Result<(), ProfileError> {
                self.encode_into(blueprint, sink)
            }

            fn decode_item<R: Read + ?Sized>(
                blueprint: &PayloadBlueprint,
                source: &mut R,
            ) -> Result<Self, ProfileError> {
                Self::decode_from(blueprint, source)
            }
        }
    };
}

impl_extension_item!(ClassProfile);
impl_extension_item!(MethodProfile);
impl_extension_item!(FieldProfile);
impl_extension_item!(PackageProfile);

/// Lista genérica de sub-perfiles con blueprint propio.
#[derive(Debug, Clone)]
pub struct ItemListExtension<T: ExtensionItem> {
    extension_name: &'static str,
    retention: RetentionPolicy,
    blueprint: PayloadBlueprint,
    items: Vec<T>,
}

impl<T: ExtensionItem> ItemListExtension<T> {
    /// Construye una lista vacía con nombre, retención y blueprint.
    #[must_use]
    pub fn new(
        extension_name: &'static str,
        retention: RetentionPolicy,
        blueprint: PayloadBlueprint,
    ) -> Self {
        Self { extension_name, retention, blueprint, items: Vec::new() }
    }

    /// Ítems en orden de índice (las referencias cruzadas son posiciones).
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Vista mutable de los ítems (fase de construcción).
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// Registra un ítem y retorna su índice de arena.
    pub fn push(&mut self, item: T) -> u32 {
        self.items.push(item);
        (self.items.len() - 1) as u32
    }

    /// Blueprint de payloads de la lista.
    #[must_use]
    pub fn blueprint(&self) -> &PayloadBlueprint {
        &self.blueprint
    }
}

impl<T: ExtensionItem + std::fmt::Debug> ProfileExtension for ItemListExtension<T> {
    fn name(&self) -> &str {
        self.extension_name
    }

    fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn write_items(&self, sink: &mut dyn Write) -> Result<(), ProfileError> {
        for item in &self.items {
            item.encode_item(&self.blueprint, sink)?;
        }
        Ok(())
    }

    fn read_items(&mut self, source: &mut dyn Read, item_count: usize) -> Result<(), ProfileError> {
        self.items.clear();
        self.items.reserve(item_count.min(4096));
        for _ in 0..item_count {
            self.items.push(T::decode_item(&self.blueprint, source)?);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Lista de sub-perfiles de clase.
pub type ClassListExtension = ItemListExtension<ClassProfile>;
/// Lista de sub-perfiles de método.
pub type MethodListExtension = ItemListExtension<MethodProfile>;
/// Lista de sub-perfiles de campo.
pub type FieldListExtension = ItemListExtension<FieldProfile>;
/// Lista de sub-perfiles de paquete.
pub type PackageListExtension = ItemListExtension<PackageProfile>;

/// Extensión de cabecera: constantes de metadatos del perfil.
///
/// La versión y las banderas viajan en la cabecera del archivo; los
/// ítems de esta extensión son los pares llave → literal.
#[derive(Debug, Clone, Default)]
pub struct ProfileInfoExtension {
    retention: RetentionPolicy,
    info: ProfileInfo,
}

impl ProfileInfoExtension {
    /// Construye la extensión con retención Runtime (la canónica).
    #[must_use]
    pub fn new(info: ProfileInfo) -> Self {
        Self { retention: RetentionPolicy::Runtime, info }
    }

    /// Cabecera contenida.
    #[must_use]
    pub fn info(&self) -> &ProfileInfo {
        &self.info
    }

    /// Cabecera contenida (mutable, fase de construcción).
    pub fn info_mut(&mut self) -> &mut ProfileInfo {
        &mut self.info
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::Runtime
    }
}

impl ProfileExtension for ProfileInfoExtension {
    fn name(&self) -> &str {
        INFO_EXTENSION_NAME
    }

    fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    fn item_count(&self) -> usize {
        self.info.constants.len()
    }

    fn write_items(&self, sink: &mut dyn Write) -> Result<(), ProfileError> {
        for (constant_key, constant_literal) in &self.info.constants {
            sink.write_wire_string(constant_key)?;
            sink.write_wire_string(constant_literal)?;
        }
        Ok(())
    }

    fn read_items(&mut self, source: &mut dyn Read, item_count: usize) -> Result<(), ProfileError> {
        self.info.constants.clear();
        for _ in 0..item_count {
            let constant_key = source.read_wire_string()?;
            let constant_literal = source.read_wire_string()?;
            self.info.constants.insert(constant_key, constant_literal);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Entrada del corpus de constantes: literales de cadena por clase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantsEntry {
    /// Índice de la clase propietaria en la arena de clases.
    pub class_index: u32,
    /// Literales de cadena observados (orden de aparición).
    pub literals: Vec<String>,
}

/// Corpus de constantes de cadena del bundle.
#[derive(Debug, Clone, Default)]
pub struct ConstantsExtension {
    retention: RetentionPolicy,
    entries: Vec<ConstantsEntry>,
}

impl ConstantsExtension {
    /// Construye el corpus con la retención indicada.
    #[must_use]
    pub fn new(retention: RetentionPolicy) -> Self {
        Self { retention, entries: Vec::new() }
    }

    /// Entradas del corpus en orden de índice de clase.
    #[must_use]
    pub fn entries(&self) -> &[ConstantsEntry] {
        &self.entries
    }

    /// Registra los literales de una clase (omite clases sin literales).
    pub fn record(&mut self, class_index: u32, literals: Vec<String>) {
        if !literals.is_empty() {
            self.entries.push(ConstantsEntry { class_index, literals });
        }
    }
}

impl ProfileExtension for ConstantsExtension {
    fn name(&self) -> &str {
        CONSTANTS_EXTENSION_NAME
    }

    fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    fn item_count(&self) -> usize {
        self.entries.len()
    }

    fn write_items(&self, sink: &mut dyn Write) -> Result<(), ProfileError> {
        for entry in &self.entries {
            sink.write_varint_value(u64::from(entry.class_index))?;
            sink.write_varint_value(entry.literals.len() as u64)?;
            for literal in &entry.literals {
                sink.write_wire_string(literal)?;
            }
        }
        Ok(())
    }

    fn read_items(&mut self, source: &mut dyn Read, item_count: usize) -> Result<(), ProfileError> {
        self.entries.clear();
        for _ in 0..item_count {
            let class_index = source.read_varint_value()? as u32;
            let literal_count = source.read_wire_count()?;
            let mut literals = Vec::with_capacity(literal_count.min(1024));
            for _ in 0..literal_count {
                literals.push(source.read_wire_string()?);
            }
            self.entries.push(ConstantsEntry { class_index, literals });
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
