// [libs/domain/bytecode/src/il.rs]
/*!
 * =================================================================
 * APARATO: IL FACTORY (V10.4 - FUZZY TRIAD)
 * CLASIFICACIÓN: DOMAIN BOUNDARY (ESTRATO L2)
 * RESPONSABILIDAD: DESCRIPTORES TEXTUALES DIFUSOS DE CLASE/MÉTODO/CAMPO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FUZZY PLACEHOLDER: Los tipos de alcance aplicativo colapsan al
 *    marcador 'X' (aridad de arreglo preservada con prefijos '[');
 *    los tipos de plataforma conservan su nombre interno calificado.
 * 2. SCOPE PREDICATE: El alcance aplicativo exige loader de aplicación,
 *    nombre simple fuera de {R, R$*, BuildConfig, module-info}, no
 *    anónima interna (sufijo $<dígitos>) y no clase vacía.
 * 3. TRIAD CONTRACT: Tres variantes normativas: básica, única (etiqueta
 *    de ocurrencia por clase declarante) y jerárquica (banderas AIEX +
 *    super en {…} + interfaces en […]).
 * 4. DETERMINISTIC WITNESS: getDocument produce cabecera + campos
 *    ordenados + métodos ordenados; testigo textual independiente del
 *    orden de declaración.
 * =================================================================
 */

use crate::view::{ClassNode, FieldDecl, HierarchyView, LoaderKind, MethodNode, TypeRef};
use std::collections::HashMap;

/// Marcador difuso de los tipos de alcance aplicativo.
pub const APPLICATION_PLACEHOLDER: &str = "X";

/// Nombres simples excluidos del alcance aplicativo (andamiaje de build).
const EXCLUDED_SIMPLE_NAMES: [&str; 3] = ["R", "BuildConfig", "module-info"];

/// Verdadero si el nombre simple denota una clase anónima interna.
///
/// Equivale al patrón `.+$\d+($\d+)?`: basta con que el último segmento
/// tras '$' sea enteramente numérico y el prefijo no sea vacío.
fn is_anonymous_inner(simple_name: &str) -> bool {
    match simple_name.rsplit_once('$') {
        Some((prefix, suffix)) => {
            !prefix.is_empty() && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Verdadero si la clase es "vacía": sin campos y sin métodos más allá
/// del inicializador de clase.
fn is_empty_class(class: &dyn ClassNode) -> bool {
    class.fields().is_empty()
        && class
            .methods()
            .iter()
            .all(|method| method.name() == "<clinit>")
}

/// Predicado de alcance aplicativo sobre una clase resuelta.
#[must_use]
pub fn is_application_scope(class: &dyn ClassNode) -> bool {
    if class.loader() != LoaderKind::Application {
        return false;
    }
    let simple_name = class.simple_name();
    if EXCLUDED_SIMPLE_NAMES.contains(&simple_name) || simple_name.starts_with("R$") {
        return false;
    }
    if is_anonymous_inner(simple_name) {
        return false;
    }
    !is_empty_class(class)
}

/// Predicado de alcance aplicativo sobre una referencia de tipo.
///
/// Cuando la vista resuelve el tipo se aplica el predicado completo;
/// para tipos no resolubles decide el loader más las reglas de nombre.
fn type_is_application_scope(view: &dyn HierarchyView, type_ref: &TypeRef) -> bool {
    if type_ref.primitive || type_ref.loader != LoaderKind::Application {
        return false;
    }
    match view.resolve(&type_ref.name) {
        Some(resolved_class) => is_application_scope(resolved_class),
        None => {
            let simple_name = type_ref.name.rsplit('/').next().unwrap_or(&type_ref.name);
            !EXCLUDED_SIMPLE_NAMES.contains(&simple_name)
                && !simple_name.starts_with("R$")
                && !is_anonymous_inner(simple_name)
        }
    }
}

/// Renderiza el descriptor difuso de una referencia de tipo.
fn render_type_descriptor(view: &dyn HierarchyView, type_ref: &TypeRef) -> String {
    let mut rendered = String::new();
    for _ in 0..type_ref.dims {
        rendered.push('[');
    }
    if type_ref.primitive {
        rendered.push_str(&type_ref.name);
    } else if type_is_application_scope(view, type_ref) {
        rendered.push_str(APPLICATION_PLACEHOLDER);
    } else {
        rendered.push('L');
        rendered.push_str(&type_ref.name);
        rendered.push(';');
    }
    rendered
}

/// Renderiza el descriptor básico de un método (sin contexto de clase).
fn render_method_descriptor(
    view: &dyn HierarchyView,
    method: &dyn MethodNode,
) -> String {
    let mut rendered = String::new();
    if method.is_static() {
        rendered.push_str("<static>");
    }
    let method_name = method.name();
    if method_name == "<init>" || method_name == "<clinit>" {
        rendered.push_str(method_name);
    }
    rendered.push('(');
    for parameter in method.parameter_types() {
        rendered.push_str(&render_type_descriptor(view, parameter));
    }
    rendered.push(')');
    rendered.push_str(&render_type_descriptor(view, method.return_type()));
    rendered
}

/// Renderiza el descriptor de un tipo de clase por nombre interno.
fn render_class_reference(view: &dyn HierarchyView, internal_name: &str) -> String {
    let loader = view
        .resolve(internal_name)
        .map_or(LoaderKind::Platform, |resolved| resolved.loader());
    render_type_descriptor(view, &TypeRef::object(internal_name, loader))
}

/// Contrato de la fábrica de descriptores IL.
pub trait IlFactory: Send + Sync {
    /// Descriptor difuso de una referencia de tipo.
    fn type_descriptor(&self, view: &dyn HierarchyView, type_ref: &TypeRef) -> String {
        render_type_descriptor(view, type_ref)
    }

    /// Descriptor difuso de una clase.
    fn class_descriptor(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> String;

    /// Descriptor difuso de un método (contexto de clase declarante).
    fn method_descriptor(
        &self,
        view: &dyn HierarchyView,
        class: &dyn ClassNode,
        method: &dyn MethodNode,
    ) -> String;

    /// Descriptor difuso de un campo (contexto de clase declarante).
    fn field_descriptor(
        &self,
        view: &dyn HierarchyView,
        class: &dyn ClassNode,
        field: &FieldDecl,
    ) -> String;

    /// Descriptores de todos los métodos en orden de declaración.
    fn method_descriptors(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> Vec<String> {
        class
            .methods()
            .iter()
            .map(|method| self.method_descriptor(view, class, *method))
            .collect()
    }

    /// Descriptores de todos los campos en orden de declaración.
    fn field_descriptors(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> Vec<String> {
        class
            .fields()
            .iter()
            .map(|field| self.field_descriptor(view, class, field))
            .collect()
    }

    /**
     * Testigo textual determinista de la clase.
     *
     * # Layout:
     * Cabecera (descriptor de clase) + descriptores de campo ordenados
     * + descriptores de método ordenados, uno por línea.
     */
    fn document(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> String {
        let mut field_lines = self.field_descriptors(view, class);
        field_lines.sort_unstable();
        let mut method_lines = self.method_descriptors(view, class);
        method_lines.sort_unstable();

        let mut document = self.class_descriptor(view, class);
        for line in field_lines.into_iter().chain(method_lines) {
            document.push('\n');
            document.push_str(&line);
        }
        document
    }
}

/// Fábrica difusa básica: marcador X + firmas planas.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicFuzzyFactory;

impl IlFactory for BasicFuzzyFactory {
    fn class_descriptor(&self, _view: &dyn HierarchyView, class: &dyn ClassNode) -> String {
        if is_application_scope(class) {
            APPLICATION_PLACEHOLDER.to_string()
        } else {
            format!("L{};", class.internal_name())
        }
    }

    fn method_descriptor(
        &self,
        view: &dyn HierarchyView,
        _class: &dyn ClassNode,
        method: &dyn MethodNode,
    ) -> String {
        render_method_descriptor(view, method)
    }

    fn field_descriptor(
        &self,
        view: &dyn HierarchyView,
        _class: &dyn ClassNode,
        field: &FieldDecl,
    ) -> String {
        render_type_descriptor(view, &field.type_ref)
    }
}

/// Fábrica difusa única: etiqueta de ocurrencia por clase declarante.
///
/// Los duplicados dentro de una misma clase reciben el sufijo `#k`
/// (k ≥ 1); la primera ocurrencia viaja sin etiqueta, de modo que una
/// clase sin duplicados coincide con la variante básica.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueFuzzyFactory;

fn tag_occurrences(descriptors: Vec<String>) -> Vec<String> {
    let mut occurrence_counters: HashMap<String, u32> = HashMap::new();
    descriptors
        .into_iter()
        .map(|descriptor| {
            let counter = occurrence_counters.entry(descriptor.clone()).or_insert(0);
            let tagged = if *counter == 0 {
                descriptor
            } else {
                format!("{descriptor}#{counter}")
            };
            *counter += 1;
            tagged
        })
        .collect()
}

impl IlFactory for UniqueFuzzyFactory {
    fn class_descriptor(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> String {
        BasicFuzzyFactory.class_descriptor(view, class)
    }

    fn method_descriptor(
        &self,
        view: &dyn HierarchyView,
        class: &dyn ClassNode,
        method: &dyn MethodNode,
    ) -> String {
        BasicFuzzyFactory.method_descriptor(view, class, method)
    }

    fn field_descriptor(
        &self,
        view: &dyn HierarchyView,
        class: &dyn ClassNode,
        field: &FieldDecl,
    ) -> String {
        BasicFuzzyFactory.field_descriptor(view, class, field)
    }

    fn method_descriptors(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> Vec<String> {
        tag_occurrences(BasicFuzzyFactory.method_descriptors(view, class))
    }

    fn field_descriptors(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> Vec<String> {
        tag_occurrences(BasicFuzzyFactory.field_descriptors(view, class))
    }
}

/// Fábrica difusa jerárquica: banderas AIEX + super + interfaces.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyFuzzyFactory {
    /// Anexa el descriptor de la superclase en `{…}`.
    pub include_super: bool,
    /// Anexa los descriptores de interfaz en `[…]`.
    pub include_interfaces: bool,
}

impl Default for HierarchyFuzzyFactory {
    fn default() -> Self {
        Self { include_super: true, include_interfaces: true }
    }
}

impl IlFactory for HierarchyFuzzyFactory {
    fn class_descriptor(&self, view: &dyn HierarchyView, class: &dyn ClassNode) -> String {
        let access = class.access();
        let application_scoped = is_application_scope(class);

        let mut rendered = String::new();
        if access.is_abstract {
            rendered.push('A');
        }
        if access.is_interface {
            rendered.push('I');
        }
        if access.is_enum {
            rendered.push('E');
        }
        if application_scoped {
            rendered.push('X');
        } else {
            rendered.push('L');
            rendered.push_str(class.internal_name());
            rendered.push(';');
        }

        if self.include_super {
            if let Some(super_name) = class.super_name() {
                rendered.push('{');
                rendered.push_str(&render_class_reference(view, super_name));
                rendered.push('}');
            }
        }
        if self.include_interfaces && !class.interfaces().is_empty() {
            rendered.push('[');
            for interface_name in class.interfaces() {
                rendered.push_str(&render_class_reference(view, interface_name));
            }
            rendered.push(']');
        }
        rendered
    }

    fn method_descriptor(
        &self,
        view: &dyn HierarchyView,
        _class: &dyn ClassNode,
        method: &dyn MethodNode,
    ) -> String {
        let base_descriptor = render_method_descriptor(view, method);
        if method.is_abstract() {
            format!("A{base_descriptor}")
        } else {
            base_descriptor
        }
    }

    fn field_descriptor(
        &self,
        view: &dyn HierarchyView,
        _class: &dyn ClassNode,
        field: &FieldDecl,
    ) -> String {
        render_type_descriptor(view, &field.type_ref)
    }
}
