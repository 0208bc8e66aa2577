// [libs/domain/bytecode/src/json_dump.rs]
/*!
 * =================================================================
 * APARATO: HIERARCHY DUMP ADAPTER (V10.2 - INGESTION BOUNDARY)
 * CLASIFICACIÓN: DOMAIN BOUNDARY (ESTRATO L2)
 * RESPONSABILIDAD: HIDRATACIÓN DE VOLCADOS .chx.json A LA VISTA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. OPAQUE READER: El lector de bytecode real (dex/jar) corre fuera
 *    de proceso y emite volcados JSON de la tabla de clases resuelta;
 *    este adaptador es la única frontera de ingesta del CLI.
 * 2. SCHEMA DISCIPLINE: Esquema serde plano; las etiquetas de loader
 *    viven en el alfabeto {app, platform} y cualquier otra es fallo.
 * 3. MEMORY BACKING: El volcado se materializa sobre la jerarquía en
 *    memoria; el núcleo consume únicamente los traits de la vista.
 * =================================================================
 */

use crate::errors::BytecodeError;
use crate::memory::{InMemoryHierarchy, MemoryClassBuilder, MemoryMethodBuilder};
use crate::view::{ClassAccess, LoaderKind, OpToken, TypeRef};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Volcado completo de la tabla de clases de un bundle.
#[derive(Debug, Deserialize)]
pub struct HierarchyDump {
    /// Clases resueltas en el orden estable del lector.
    pub classes: Vec<ClassDump>,
}

/// Clase resuelta dentro del volcado.
#[derive(Debug, Deserialize)]
pub struct ClassDump {
    /// Nombre interno ("com/example/Foo").
    pub name: String,
    /// Loader declarante: "app" o "platform".
    pub loader: String,
    /// Clase abstracta.
    #[serde(default)]
    pub is_abstract: bool,
    /// Interfaz.
    #[serde(default)]
    pub is_interface: bool,
    /// Enumeración.
    #[serde(default)]
    pub is_enum: bool,
    /// Nombre interno de la superclase.
    #[serde(default)]
    pub super_name: Option<String>,
    /// Interfaces implementadas.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Campos declarados.
    #[serde(default)]
    pub fields: Vec<FieldDump>,
    /// Métodos declarados.
    #[serde(default)]
    pub methods: Vec<MethodDump>,
}

/// Referencia de tipo dentro del volcado.
#[derive(Debug, Deserialize)]
pub struct TypeDump {
    /// Nombre interno o descriptor primitivo.
    pub name: String,
    /// Aridad de arreglo.
    #[serde(default)]
    pub dims: u8,
    /// Tipo primitivo (incluye void).
    #[serde(default)]
    pub primitive: bool,
    /// Loader resolutor: "app" o "platform".
    #[serde(default = "default_platform_label")]
    pub loader: String,
}

fn default_platform_label() -> String {
    "platform".to_string()
}

/// Campo declarado dentro del volcado.
#[derive(Debug, Deserialize)]
pub struct FieldDump {
    /// Nombre del campo.
    pub name: String,
    /// Tipo del campo.
    #[serde(rename = "type")]
    pub type_ref: TypeDump,
    /// Campo estático.
    #[serde(default)]
    pub is_static: bool,
}

/// Método declarado dentro del volcado.
#[derive(Debug, Deserialize)]
pub struct MethodDump {
    /// Nombre del método ("m", "<init>", "<clinit>").
    pub name: String,
    /// Tipos de parámetro en orden de declaración.
    #[serde(default)]
    pub parameters: Vec<TypeDump>,
    /// Tipo de retorno (void por defecto).
    #[serde(default)]
    pub returns: Option<TypeDump>,
    /// Método estático.
    #[serde(default)]
    pub is_static: bool,
    /// Método abstracto.
    #[serde(default)]
    pub is_abstract: bool,
    /// Cuerpo como tokens de instrucción.
    #[serde(default)]
    pub body: Vec<OpDump>,
}

/// Token de instrucción dentro del volcado.
#[derive(Debug, Deserialize)]
pub struct OpDump {
    /// Mnemónico crudo.
    pub op: String,
    /// Operando de tipo.
    #[serde(default)]
    pub type_operand: Option<TypeDump>,
    /// Operando literal de cadena.
    #[serde(default)]
    pub literal: Option<String>,
}

fn parse_loader(label: &str) -> Result<LoaderKind, BytecodeError> {
    match label {
        "app" => Ok(LoaderKind::Application),
        "platform" => Ok(LoaderKind::Platform),
        other => Err(BytecodeError::UnknownLoader { label: other.to_string() }),
    }
}

fn materialize_type(dump: &TypeDump) -> Result<TypeRef, BytecodeError> {
    Ok(TypeRef {
        name: dump.name.clone(),
        dims: dump.dims,
        primitive: dump.primitive,
        loader: parse_loader(&dump.loader)?,
    })
}

fn materialize_op(dump: &OpDump) -> Result<OpToken, BytecodeError> {
    Ok(OpToken {
        mnemonic: dump.op.clone(),
        type_operand: dump.type_operand.as_ref().map(materialize_type).transpose()?,
        literal: dump.literal.clone(),
    })
}

/**
 * Materializa un volcado JSON en la jerarquía en memoria.
 *
 * # Errors:
 * - `MalformedDump` ante JSON sintácticamente inválido.
 * - `UnknownLoader` ante etiquetas fuera de {app, platform}.
 */
pub fn hierarchy_from_json_str(dump_text: &str) -> Result<InMemoryHierarchy, BytecodeError> {
    let dump: HierarchyDump = serde_json::from_str(dump_text)?;
    let mut hierarchy = InMemoryHierarchy::new();

    for class_dump in &dump.classes {
        let loader = parse_loader(&class_dump.loader)?;
        let mut builder = match loader {
            LoaderKind::Application => MemoryClassBuilder::application(&class_dump.name),
            LoaderKind::Platform => MemoryClassBuilder::platform(&class_dump.name),
        }
        .access(ClassAccess {
            is_abstract: class_dump.is_abstract,
            is_interface: class_dump.is_interface,
            is_enum: class_dump.is_enum,
        })
        .super_class(class_dump.super_name.as_deref());

        for interface_name in &class_dump.interfaces {
            builder = builder.interface(interface_name);
        }
        for field_dump in &class_dump.fields {
            builder = builder.field(
                &field_dump.name,
                materialize_type(&field_dump.type_ref)?,
                field_dump.is_static,
            );
        }
        for method_dump in &class_dump.methods {
            let mut method_builder = MemoryMethodBuilder::new(&method_dump.name);
            for parameter in &method_dump.parameters {
                method_builder = method_builder.parameter(materialize_type(parameter)?);
            }
            if let Some(return_dump) = &method_dump.returns {
                method_builder = method_builder.returns(materialize_type(return_dump)?);
            }
            if method_dump.is_static {
                method_builder = method_builder.static_method();
            }
            if method_dump.is_abstract {
                method_builder = method_builder.abstract_method();
            }
            for op_dump in &method_dump.body {
                method_builder = method_builder.op(materialize_op(op_dump)?);
            }
            builder = builder.method(method_builder.build());
        }

        hierarchy.register(builder.build());
    }

    info!(
        "🗂️ [HIERARCHY_HYDRATED]: {} classes materialized from dump.",
        hierarchy.len()
    );
    Ok(hierarchy)
}

/// Materializa un volcado JSON desde disco.
pub fn hierarchy_from_json_file<P: AsRef<Path>>(
    dump_path: P,
) -> Result<InMemoryHierarchy, BytecodeError> {
    let dump_text = std::fs::read_to_string(dump_path)?;
    hierarchy_from_json_str(&dump_text)
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ClassNode, HierarchyView};

    const WITNESS_DUMP: &str = r#"{
        "classes": [
            {
                "name": "com/example/Alpha",
                "loader": "app",
                "super_name": "java/lang/Object",
                "fields": [
                    { "name": "counter", "type": { "name": "I", "primitive": true } }
                ],
                "methods": [
                    {
                        "name": "work",
                        "parameters": [
                            { "name": "java/lang/String", "loader": "platform" }
                        ],
                        "body": [
                            { "op": "const-string", "literal": "user-agent" },
                            { "op": "return-void" }
                        ]
                    }
                ]
            },
            { "name": "java/lang/String", "loader": "platform" }
        ]
    }"#;

    #[test]
    fn witness_dump_materializes_the_view() {
        let hierarchy = hierarchy_from_json_str(WITNESS_DUMP).expect("hidratación");
        assert_eq!(hierarchy.len(), 2);

        let alpha = hierarchy.resolve("com/example/Alpha").expect("Alpha");
        assert_eq!(alpha.loader(), LoaderKind::Application);
        assert_eq!(alpha.fields().len(), 1);

        let methods = alpha.methods();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].parameter_types()[0].name, "java/lang/String");
        assert_eq!(methods[0].instructions().count(), 2);
    }

    #[test]
    fn unknown_loader_label_is_a_fault() {
        let poisoned = r#"{ "classes": [ { "name": "A", "loader": "ghost" } ] }"#;
        assert!(matches!(
            hierarchy_from_json_str(poisoned),
            Err(BytecodeError::UnknownLoader { .. })
        ));
    }
}
