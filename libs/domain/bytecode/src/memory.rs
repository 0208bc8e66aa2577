// [libs/domain/bytecode/src/memory.rs]
/*!
 * =================================================================
 * APARATO: IN-MEMORY HIERARCHY (V10.2 - DETERMINISTIC BACKING)
 * CLASIFICACIÓN: DOMAIN BOUNDARY (ESTRATO L2)
 * RESPONSABILIDAD: RESPALDO CONCRETO DE LA VISTA DE JERARQUÍA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL PURPOSE: Doble de pruebas del Proving Grounds y respaldo
 *    del adaptador de volcados JSON del CLI.
 * 2. STABLE ORDER: Las clases conservan el orden de registro; la
 *    resolución por nombre usa un índice auxiliar O(1).
 * 3. FLUENT FORGE: Builders nominales para sintetizar jerarquías
 *    deterministas en los certificadores.
 * =================================================================
 */

use crate::view::{
    ClassAccess, ClassNode, FieldDecl, HierarchyView, LoaderKind, MethodNode, OpToken, TypeRef,
};
use std::collections::HashMap;

/// Método materializado en memoria.
#[derive(Debug, Clone)]
pub struct MemoryMethod {
    name: String,
    parameter_types: Vec<TypeRef>,
    return_type: TypeRef,
    is_static: bool,
    is_abstract: bool,
    body: Vec<OpToken>,
}

impl MethodNode for MemoryMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_types(&self) -> &[TypeRef] {
        &self.parameter_types
    }

    fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn instructions(&self) -> Box<dyn Iterator<Item = OpToken> + '_> {
        Box::new(self.body.iter().cloned())
    }
}

/// Clase materializada en memoria.
#[derive(Debug, Clone)]
pub struct MemoryClass {
    internal_name: String,
    loader: LoaderKind,
    access: ClassAccess,
    super_name: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<FieldDecl>,
    methods: Vec<MemoryMethod>,
}

impl ClassNode for MemoryClass {
    fn internal_name(&self) -> &str {
        &self.internal_name
    }

    fn loader(&self) -> LoaderKind {
        self.loader
    }

    fn access(&self) -> ClassAccess {
        self.access
    }

    fn super_name(&self) -> Option<&str> {
        self.super_name.as_deref()
    }

    fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    fn methods(&self) -> Vec<&dyn MethodNode> {
        self.methods
            .iter()
            .map(|method| method as &dyn MethodNode)
            .collect()
    }
}

/// Jerarquía de clases completa materializada en memoria.
#[derive(Debug, Default)]
pub struct InMemoryHierarchy {
    classes: Vec<MemoryClass>,
    index_by_name: HashMap<String, usize>,
}

impl InMemoryHierarchy {
    /// Jerarquía vacía.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una clase al final del orden estable.
    pub fn register(&mut self, class: MemoryClass) {
        self.index_by_name
            .insert(class.internal_name.clone(), self.classes.len());
        self.classes.push(class);
    }

    /// Cantidad de clases registradas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Verdadero cuando la jerarquía está vacía.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl HierarchyView for InMemoryHierarchy {
    fn classes(&self) -> Vec<&dyn ClassNode> {
        self.classes
            .iter()
            .map(|class| class as &dyn ClassNode)
            .collect()
    }

    fn resolve(&self, internal_name: &str) -> Option<&dyn ClassNode> {
        self.index_by_name
            .get(internal_name)
            .map(|position| &self.classes[*position] as &dyn ClassNode)
    }
}

/// Forja fluida de métodos en memoria.
#[derive(Debug)]
pub struct MemoryMethodBuilder {
    method: MemoryMethod,
}

impl MemoryMethodBuilder {
    /// Inicia un método de instancia que retorna void.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            method: MemoryMethod {
                name: name.to_string(),
                parameter_types: Vec::new(),
                return_type: TypeRef::primitive("V"),
                is_static: false,
                is_abstract: false,
                body: Vec::new(),
            },
        }
    }

    /// Agrega un parámetro al final de la firma.
    #[must_use]
    pub fn parameter(mut self, type_ref: TypeRef) -> Self {
        self.method.parameter_types.push(type_ref);
        self
    }

    /// Fija el tipo de retorno.
    #[must_use]
    pub fn returns(mut self, type_ref: TypeRef) -> Self {
        self.method.return_type = type_ref;
        self
    }

    /// Marca el método como estático.
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.method.is_static = true;
        self
    }

    /// Marca el método como abstracto.
    #[must_use]
    pub fn abstract_method(mut self) -> Self {
        self.method.is_abstract = true;
        self
    }

    /// Agrega un token de instrucción al cuerpo.
    #[must_use]
    pub fn op(mut self, token: OpToken) -> Self {
        self.method.body.push(token);
        self
    }

    /// Sella el método.
    #[must_use]
    pub fn build(self) -> MemoryMethod {
        self.method
    }
}

/// Forja fluida de clases en memoria.
#[derive(Debug)]
pub struct MemoryClassBuilder {
    class: MemoryClass,
}

impl MemoryClassBuilder {
    /// Inicia una clase del loader de aplicación.
    #[must_use]
    pub fn application(internal_name: &str) -> Self {
        Self::with_loader(internal_name, LoaderKind::Application)
    }

    /// Inicia una clase del loader de plataforma.
    #[must_use]
    pub fn platform(internal_name: &str) -> Self {
        Self::with_loader(internal_name, LoaderKind::Platform)
    }

    fn with_loader(internal_name: &str, loader: LoaderKind) -> Self {
        Self {
            class: MemoryClass {
                internal_name: internal_name.to_string(),
                loader,
                access: ClassAccess::default(),
                super_name: Some("java/lang/Object".to_string()),
                interfaces: Vec::new(),
                fields: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    /// Fija las banderas de acceso.
    #[must_use]
    pub fn access(mut self, access: ClassAccess) -> Self {
        self.class.access = access;
        self
    }

    /// Fija la superclase (None para java/lang/Object raíz).
    #[must_use]
    pub fn super_class(mut self, super_name: Option<&str>) -> Self {
        self.class.super_name = super_name.map(str::to_string);
        self
    }

    /// Agrega una interfaz implementada.
    #[must_use]
    pub fn interface(mut self, internal_name: &str) -> Self {
        self.class.interfaces.push(internal_name.to_string());
        self
    }

    /// Agrega un campo declarado.
    #[must_use]
    pub fn field(mut self, name: &str, type_ref: TypeRef, is_static: bool) -> Self {
        self.class.fields.push(FieldDecl {
            name: name.to_string(),
            type_ref,
            is_static,
        });
        self
    }

    /// Agrega un método declarado.
    #[must_use]
    pub fn method(mut self, method: MemoryMethod) -> Self {
        self.class.methods.push(method);
        self
    }

    /// Sella la clase.
    #[must_use]
    pub fn build(self) -> MemoryClass {
        self.class
    }
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_preserves_order_and_resolution() {
        let mut hierarchy = InMemoryHierarchy::new();
        hierarchy.register(MemoryClassBuilder::application("com/example/Alpha").build());
        hierarchy.register(MemoryClassBuilder::platform("java/lang/String").build());

        let roster = hierarchy.classes();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].internal_name(), "com/example/Alpha");
        assert_eq!(roster[0].simple_name(), "Alpha");
        assert_eq!(roster[0].package_name(), "com/example");

        let resolved = hierarchy.resolve("java/lang/String").expect("resolución");
        assert_eq!(resolved.loader(), LoaderKind::Platform);
        assert!(hierarchy.resolve("ghost/Clazz").is_none());
    }

    #[test]
    fn method_builder_fixes_the_signature() {
        let method = MemoryMethodBuilder::new("m")
            .parameter(TypeRef::object("java/lang/String", LoaderKind::Platform))
            .parameter(TypeRef::primitive("I"))
            .static_method()
            .op(OpToken::bare("return"))
            .build();

        assert_eq!(method.name(), "m");
        assert_eq!(method.parameter_types().len(), 2);
        assert!(method.is_static());
        assert_eq!(method.instructions().count(), 1);
    }
}
