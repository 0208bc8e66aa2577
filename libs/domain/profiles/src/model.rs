// [libs/domain/profiles/src/model.rs]
/*!
 * =================================================================
 * APARATO: SUB-PROFILE MODELS (V14.3 - ARENA INDEXED)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONJUNTO CERRADO DE SUB-PERFILES FORENSES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TAGGED CLOSED SET: {Cha, Package, Class, Method, Field} como
 *    estructuras planas + discriminante ProfileKind; el despacho de
 *    estrategias es una tabla tipada, jamás herencia profunda.
 * 2. ARENA + INDEX: Toda referencia cruzada es un índice entero en las
 *    arenas del gestor; cero punteros de retorno, cero ciclos de
 *    propiedad.
 * 3. IMMUTABILITY SEAL: Tras la cristalización los sub-perfiles son
 *    lógicamente inmutables; la fase de similitud solo lee.
 * =================================================================
 */

use crate::errors::ProfileError;
use crate::descriptor_pool::Descriptor;
use crate::payload::{PayloadBlueprint, PayloadStore};
use librarius_core_codec::{WireRead, WireWrite};
use std::collections::BTreeSet;
use std::io::{Read, Write};

/// Centinela de paquete raíz (sin progenitor).
pub const ROOT_PACKAGE_PARENT: i32 = -1;

/// Discriminante del conjunto cerrado de perfiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileKind {
    /// Perfil de jerarquía de clases completo (nivel superior).
    Cha,
    /// Sub-perfil de paquete.
    Package,
    /// Sub-perfil de clase.
    Class,
    /// Sub-perfil de método.
    Method,
    /// Sub-perfil de campo.
    Field,
}

impl ProfileKind {
    /// Nombre simbólico estable (configuración y tabla de integración).
    #[must_use]
    pub const fn symbolic_name(self) -> &'static str {
        match self {
            Self::Cha => "cha-profile",
            Self::Package => "package-profile",
            Self::Class => "class-profile",
            Self::Method => "method-profile",
            Self::Field => "field-profile",
        }
    }

    /// Resuelve un nombre simbólico a su discriminante.
    pub fn from_symbolic_name(name: &str) -> Result<Self, ProfileError> {
        match name {
            "cha-profile" => Ok(Self::Cha),
            "package-profile" => Ok(Self::Package),
            "class-profile" => Ok(Self::Class),
            "method-profile" => Ok(Self::Method),
            "field-profile" => Ok(Self::Field),
            _ => Err(ProfileError::UnknownProfileKind { name: name.to_string() }),
        }
    }

    /// Orden topológico de construcción: perfil → paquete → clase → hoja.
    #[must_use]
    pub const fn build_order() -> [Self; 5] {
        [Self::Cha, Self::Package, Self::Class, Self::Method, Self::Field]
    }
}

/// Sub-perfil de clase: descriptor + listas de índices + payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassProfile {
    /// Manejador del descriptor IL de la clase.
    pub descriptor: Descriptor,
    /// Índices de métodos en la arena de métodos (opcional).
    pub method_indices: Option<Vec<u32>>,
    /// Índices de campos en la arena de campos (opcional).
    pub field_indices: Option<Vec<u32>>,
    /// Índice del paquete propietario (forma extendida).
    pub parent_package: Option<u32>,
    /// Payloads de característica adjuntos.
    pub payload: PayloadStore,
}

impl ClassProfile {
    /// Construye un sub-perfil mínimo desde su descriptor.
    #[must_use]
    pub fn new(descriptor: Descriptor) -> Self {
        Self { descriptor, ..Self::default() }
    }

    /// Cristaliza el ítem en el flujo de su extensión.
    pub fn encode_into<W: Write + ?Sized>(
        &self,
        blueprint: &PayloadBlueprint,
        sink: &mut W,
    ) -> Result<(), ProfileError> {
        sink.write_varint_value(u64::from(self.descriptor.index()))?;

        sink.write_wire_bool(self.method_indices.is_some())?;
        if let Some(method_indices) = &self.method_indices {
            sink.write_wire_u32_list(method_indices)?;
        }

        sink.write_wire_bool(self.field_indices.is_some())?;
        if let Some(field_indices) = &self.field_indices {
            sink.write_wire_u32_list(field_indices)?;
        }

        sink.write_wire_bool(self.parent_package.is_some())?;
        if let Some(parent_package) = self.parent_package {
            sink.write_varint_value(u64::from(parent_package))?;
        }

        self.payload.encode_into(blueprint, sink)
    }

    /// Hidrata un ítem desde el flujo de su extensión.
    pub fn decode_from<R: Read + ?Sized>(
        blueprint: &PayloadBlueprint,
        source: &mut R,
    ) -> Result<Self, ProfileError> {
        let descriptor = Descriptor::from_index(source.read_varint_value()? as u32);

        let method_indices = if source.read_wire_bool()? {
            Some(source.read_wire_u32_list()?)
        } else {
            None
        };
        let field_indices = if source.read_wire_bool()? {
            Some(source.read_wire_u32_list()?)
        } else {
            None
        };
        let parent_package = if source.read_wire_bool()? {
            Some(source.read_varint_value()? as u32)
        } else {
            None
        };

        let payload = PayloadStore::decode_from(blueprint, source)?;
        Ok(Self { descriptor, method_indices, field_indices, parent_package, payload })
    }
}

/// Sub-perfil de método: descriptor + payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodProfile {
    /// Manejador del descriptor IL del método.
    pub descriptor: Descriptor,
    /// Payloads de característica adjuntos.
    pub payload: PayloadStore,
}

impl MethodProfile {
    /// Construye un sub-perfil mínimo desde su descriptor.
    #[must_use]
    pub fn new(descriptor: Descriptor) -> Self {
        Self { descriptor, payload: PayloadStore::new() }
    }

    /// Cristaliza el ítem en el flujo de su extensión.
    pub fn encode_into<W: Write + ?Sized>(
        &self,
        blueprint: &PayloadBlueprint,
        sink: &mut W,
    ) -> Result<(), ProfileError> {
        sink.write_varint_value(u64::from(self.descriptor.index()))?;
        self.payload.encode_into(blueprint, sink)
    }

    /// Hidrata un ítem desde el flujo de su extensión.
    pub fn decode_from<R: Read + ?Sized>(
        blueprint: &PayloadBlueprint,
        source: &mut R,
    ) -> Result<Self, ProfileError> {
        let descriptor = Descriptor::from_index(source.read_varint_value()? as u32);
        let payload = PayloadStore::decode_from(blueprint, source)?;
        Ok(Self { descriptor, payload })
    }
}

/// Sub-perfil de campo: descriptor + payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldProfile {
    /// Manejador del descriptor IL del campo.
    pub descriptor: Descriptor,
    /// Payloads de característica adjuntos.
    pub payload: PayloadStore,
}

impl FieldProfile {
    /// Construye un sub-perfil mínimo desde su descriptor.
    #[must_use]
    pub fn new(descriptor: Descriptor) -> Self {
        Self { descriptor, payload: PayloadStore::new() }
    }

    /// Cristaliza el ítem en el flujo de su extensión.
    pub fn encode_into<W: Write + ?Sized>(
        &self,
        blueprint: &PayloadBlueprint,
        sink: &mut W,
    ) -> Result<(), ProfileError> {
        sink.write_varint_value(u64::from(self.descriptor.index()))?;
        self.payload.encode_into(blueprint, sink)
    }

    /// Hidrata un ítem desde el flujo de su extensión.
    pub fn decode_from<R: Read + ?Sized>(
        blueprint: &PayloadBlueprint,
        source: &mut R,
    ) -> Result<Self, ProfileError> {
        let descriptor = Descriptor::from_index(source.read_varint_value()? as u32);
        let payload = PayloadStore::decode_from(blueprint, source)?;
        Ok(Self { descriptor, payload })
    }
}

/// Sub-perfil de paquete: árbol por índices + conjunto de clases.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageProfile {
    /// Manejador del descriptor (nombre interno del paquete).
    pub descriptor: Descriptor,
    /// Índice del progenitor; `ROOT_PACKAGE_PARENT` para la raíz.
    pub parent: i32,
    /// Índices de paquetes hijos (orden total estable).
    pub children: BTreeSet<u32>,
    /// Índices de clases contenidas (orden total estable).
    pub classes: BTreeSet<u32>,
    /// Payloads de característica adjuntos.
    pub payload: PayloadStore,
}

impl Default for PackageProfile {
    fn default() -> Self {
        Self {
            descriptor: Descriptor::from_index(0),
            parent: ROOT_PACKAGE_PARENT,
            children: BTreeSet::new(),
            classes: BTreeSet::new(),
            payload: PayloadStore::new(),
        }
    }
}

impl PackageProfile {
    /// Construye un paquete raíz desde su descriptor.
    #[must_use]
    pub fn new(descriptor: Descriptor) -> Self {
        Self { descriptor, ..Self::default() }
    }

    /// Cristaliza el ítem: el progenitor viaja desplazado (+1) como varint.
    pub fn encode_into<W: Write + ?Sized>(
        &self,
        blueprint: &PayloadBlueprint,
        sink: &mut W,
    ) -> Result<(), ProfileError> {
        sink.write_varint_value(u64::from(self.descriptor.index()))?;
        sink.write_varint_value((self.parent + 1) as u64)?;

        let children_roster: Vec<u32> = self.children.iter().copied().collect();
        sink.write_wire_u32_list(&children_roster)?;
        let class_roster: Vec<u32> = self.classes.iter().copied().collect();
        sink.write_wire_u32_list(&class_roster)?;

        self.payload.encode_into(blueprint, sink)
    }

    /// Hidrata un ítem desde el flujo de su extensión.
    pub fn decode_from<R: Read + ?Sized>(
        blueprint: &PayloadBlueprint,
        source: &mut R,
    ) -> Result<Self, ProfileError> {
        let descriptor = Descriptor::from_index(source.read_varint_value()? as u32);
        let shifted_parent = source.read_varint_value()?;
        let parent = (shifted_parent as i64 - 1) as i32;

        let children: BTreeSet<u32> = source.read_wire_u32_list()?.into_iter().collect();
        let classes: BTreeSet<u32> = source.read_wire_u32_list()?.into_iter().collect();
        let payload = PayloadStore::decode_from(blueprint, source)?;

        Ok(Self { descriptor, parent, children, classes, payload })
    }
}
