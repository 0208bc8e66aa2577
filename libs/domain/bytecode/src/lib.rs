// [libs/domain/bytecode/src/lib.rs]
/*!
 * =================================================================
 * APARATO: BYTECODE BOUNDARY HUB (V10.0 - OPAQUE PRODUCER)
 * CLASIFICACIÓN: DOMAIN BOUNDARY (ESTRATO L2)
 * RESPONSABILIDAD: VISTA DE JERARQUÍA, FÁBRICA IL Y NORMALIZADOR
 * =================================================================
 */

/// Catálogo de fallos de la frontera de bytecode.
pub mod errors;

/// Vista abstracta de la jerarquía de clases resuelta de un bundle.
pub mod view;

/// Jerarquía en memoria: doble de pruebas y respaldo del adaptador.
pub mod memory;

/// Adaptador de volcados de jerarquía en JSON (.chx.json).
pub mod json_dump;

/// Fábrica de descriptores IL difusos (básica, única, jerárquica).
pub mod il;

/// Normalizadores de opcodes a tokens canónicos.
pub mod normalize;

pub use errors::BytecodeError;
pub use il::{
    is_application_scope, BasicFuzzyFactory, HierarchyFuzzyFactory, IlFactory, UniqueFuzzyFactory,
};
pub use json_dump::{hierarchy_from_json_file, hierarchy_from_json_str};
pub use memory::{InMemoryHierarchy, MemoryClassBuilder, MemoryMethodBuilder};
pub use normalize::{OpcodeNormalizer, RegisterMachineNormalizer, StackMachineNormalizer};
pub use view::{ClassAccess, ClassNode, FieldDecl, HierarchyView, LoaderKind, MethodNode, OpToken, TypeRef};
