// [libs/domain/bytecode/src/view.rs]
/*!
 * =================================================================
 * APARATO: CLASS HIERARCHY VIEW (V10.1 - BOUNDARY CONTRACT)
 * CLASIFICACIÓN: DOMAIN BOUNDARY (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO MÍNIMO QUE EL NÚCLEO CONSUME DEL LECTOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. OPAQUE PRODUCER: El lector de bytecode (dex/jar) es un
 *    colaborador externo; el núcleo solo consume estos traits.
 * 2. LAZY STREAMS: El cuerpo de un método se expone como iterador
 *    perezoso de tokens; el núcleo jamás materializa bytecode crudo.
 * 3. TRAIT-OBJECT SEAM: Todos los contratos son object-safe para que
 *    los pasos de extracción operen sobre `&dyn`.
 * =================================================================
 */

/// Loader que declaró una clase dentro del bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    /// Loader de la aplicación (código propio del bundle).
    Application,
    /// Loader de plataforma (SDK, runtime, librerías del sistema).
    Platform,
}

/// Referencia de tipo tal como la expone el lector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Nombre interno ("java/lang/String") o descriptor primitivo ("I").
    pub name: String,
    /// Aridad de arreglo (0 = escalar).
    pub dims: u8,
    /// Verdadero para tipos primitivos (incluye void).
    pub primitive: bool,
    /// Loader que resuelve el tipo.
    pub loader: LoaderKind,
}

impl TypeRef {
    /// Construye una referencia primitiva desde su descriptor JVM.
    #[must_use]
    pub fn primitive(descriptor: &str) -> Self {
        Self {
            name: descriptor.to_string(),
            dims: 0,
            primitive: true,
            loader: LoaderKind::Platform,
        }
    }

    /// Construye una referencia de objeto escalar.
    #[must_use]
    pub fn object(internal_name: &str, loader: LoaderKind) -> Self {
        Self {
            name: internal_name.to_string(),
            dims: 0,
            primitive: false,
            loader,
        }
    }

    /// Eleva la referencia a arreglo de la aridad indicada.
    #[must_use]
    pub fn with_dims(mut self, dims: u8) -> Self {
        self.dims = dims;
        self
    }
}

/// Banderas de acceso de clase que el núcleo consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassAccess {
    /// Clase abstracta.
    pub is_abstract: bool,
    /// Interfaz.
    pub is_interface: bool,
    /// Enumeración.
    pub is_enum: bool,
}

/// Declaración de campo tal como la expone el lector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Nombre del campo.
    pub name: String,
    /// Tipo del campo.
    pub type_ref: TypeRef,
    /// Campo estático.
    pub is_static: bool,
}

/// Token de instrucción del flujo perezoso de un método.
///
/// La posición de la instrucción se descarta en la frontera; solo
/// sobreviven el mnemónico y los operandos semánticos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpToken {
    /// Mnemónico crudo del conjunto de instrucciones de origen.
    pub mnemonic: String,
    /// Operando de tipo (invocaciones, accesos, alocaciones).
    pub type_operand: Option<TypeRef>,
    /// Operando literal de cadena (const-string / ldc).
    pub literal: Option<String>,
}

impl OpToken {
    /// Token sin operandos.
    #[must_use]
    pub fn bare(mnemonic: &str) -> Self {
        Self { mnemonic: mnemonic.to_string(), type_operand: None, literal: None }
    }

    /// Token con operando de tipo.
    #[must_use]
    pub fn typed(mnemonic: &str, type_operand: TypeRef) -> Self {
        Self { mnemonic: mnemonic.to_string(), type_operand: Some(type_operand), literal: None }
    }

    /// Token con operando literal de cadena.
    #[must_use]
    pub fn literal(mnemonic: &str, literal: &str) -> Self {
        Self { mnemonic: mnemonic.to_string(), type_operand: None, literal: Some(literal.to_string()) }
    }
}

/// Contrato mínimo de un método resuelto.
pub trait MethodNode: Send + Sync {
    /// Nombre del método ("m", "<init>", "<clinit>").
    fn name(&self) -> &str;

    /// Tipos de parámetro en orden de declaración (sin receptor).
    fn parameter_types(&self) -> &[TypeRef];

    /// Tipo de retorno.
    fn return_type(&self) -> &TypeRef;

    /// Método estático.
    fn is_static(&self) -> bool;

    /// Método abstracto (sin cuerpo).
    fn is_abstract(&self) -> bool;

    /// Flujo perezoso de tokens de instrucción del cuerpo.
    fn instructions(&self) -> Box<dyn Iterator<Item = OpToken> + '_>;
}

/// Contrato mínimo de una clase resuelta.
pub trait ClassNode: Send + Sync {
    /// Nombre interno de la clase ("com/example/Foo").
    fn internal_name(&self) -> &str;

    /// Loader que declaró la clase.
    fn loader(&self) -> LoaderKind;

    /// Banderas de acceso.
    fn access(&self) -> ClassAccess;

    /// Nombre interno de la superclase (None para java/lang/Object).
    fn super_name(&self) -> Option<&str>;

    /// Nombres internos de las interfaces implementadas.
    fn interfaces(&self) -> &[String];

    /// Campos declarados.
    fn fields(&self) -> &[FieldDecl];

    /// Métodos declarados.
    fn methods(&self) -> Vec<&dyn MethodNode>;

    /// Nombre simple (tras el último separador de paquete).
    fn simple_name(&self) -> &str {
        self.internal_name()
            .rsplit('/')
            .next()
            .unwrap_or_else(|| self.internal_name())
    }

    /// Nombre interno del paquete ("" para el paquete raíz).
    fn package_name(&self) -> &str {
        self.internal_name()
            .rsplit_once('/')
            .map_or("", |(package, _)| package)
    }
}

/// Contrato mínimo de la tabla de clases resuelta de un bundle.
pub trait HierarchyView: Send + Sync {
    /// Clases del bundle en orden estable del lector.
    fn classes(&self) -> Vec<&dyn ClassNode>;

    /// Resuelve una clase por nombre interno.
    fn resolve(&self, internal_name: &str) -> Option<&dyn ClassNode>;
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_constructors_fix_the_flags() {
        let scalar_int = TypeRef::primitive("I");
        assert!(scalar_int.primitive);
        assert_eq!(scalar_int.dims, 0);

        let app_array = TypeRef::object("com/example/Foo", LoaderKind::Application).with_dims(2);
        assert!(!app_array.primitive);
        assert_eq!(app_array.dims, 2);
        assert_eq!(app_array.loader, LoaderKind::Application);
    }
}
