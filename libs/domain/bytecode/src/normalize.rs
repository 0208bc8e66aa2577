// [libs/domain/bytecode/src/normalize.rs]
/*!
 * =================================================================
 * APARATO: OPCODE NORMALIZER (V10.3 - CANONICAL ALPHABET)
 * CLASIFICACIÓN: DOMAIN BOUNDARY (ESTRATO L2)
 * RESPONSABILIDAD: TOKENS CANÓNICOS DE CUERPOS DE MÉTODO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL ORIGIN, ONE ALPHABET: Los conjuntos de instrucciones de pila
 *    (Java) y de registros (Dalvik) colapsan al mismo alfabeto
 *    canónico; semántica equivalente ⟹ tokens idénticos.
 * 2. POSITION ERASURE: Índices de instrucción, registros y slots de
 *    pila se descartan; solo sobreviven la operación y sus operandos
 *    semánticos (tipo difuso, literal).
 * 3. FUZZY SUBSTITUTION: Los operandos de tipo se renderizan con la
 *    fábrica IL activa, heredando el marcador X aplicativo.
 * 4. PLUMBING FILTER: El acarreo de registros (move*), el barajado de
 *    pila (dup/pop/swap) y el tráfico de variables locales (xload/
 *    xstore) se filtran por carecer de contraparte mutua.
 * =================================================================
 */

use crate::il::IlFactory;
use crate::view::{HierarchyView, MethodNode, OpToken};

/// Contrato del normalizador de cuerpos de método.
pub trait OpcodeNormalizer: Send + Sync {
    /// Flujo perezoso de tokens canónicos del cuerpo de un método.
    fn normalize<'a>(
        &self,
        view: &'a dyn HierarchyView,
        factory: &'a dyn IlFactory,
        method: &'a dyn MethodNode,
    ) -> Box<dyn Iterator<Item = String> + 'a>;
}

/// Renderiza un token canónico con sus operandos semánticos.
fn render_canonical(
    view: &dyn HierarchyView,
    factory: &dyn IlFactory,
    canonical_mnemonic: &str,
    token: &OpToken,
) -> String {
    let mut rendered = canonical_mnemonic.to_string();
    if let Some(type_operand) = &token.type_operand {
        rendered.push(' ');
        rendered.push_str(&factory.type_descriptor(view, type_operand));
    }
    if let Some(literal) = &token.literal {
        rendered.push_str(" #");
        rendered.push_str(literal);
    }
    rendered
}

/// Normalizador del conjunto de instrucciones de máquina de pila (Java).
#[derive(Debug, Clone, Copy, Default)]
pub struct StackMachineNormalizer;

impl StackMachineNormalizer {
    /// Pliega un mnemónico de pila al alfabeto canónico (None = filtrado).
    fn canonical(raw_mnemonic: &str) -> Option<&'static str> {
        match raw_mnemonic {
            "nop" | "dup" | "dup2" | "dup_x1" | "dup_x2" | "dup2_x1" | "dup2_x2" | "pop"
            | "pop2" | "swap" => None,
            "invokestatic" => Some("invoke-static"),
            "invokevirtual" | "invokespecial" | "invokeinterface" | "invokedynamic" => {
                Some("invoke")
            }
            "getfield" | "getstatic" => Some("get"),
            "putfield" | "putstatic" => Some("put"),
            "new" | "newarray" | "anewarray" | "multianewarray" => Some("new"),
            "checkcast" | "instanceof" => Some("typecheck"),
            "athrow" => Some("throw"),
            "arraylength" => Some("arraylength"),
            "monitorenter" | "monitorexit" => Some("monitor"),
            "tableswitch" | "lookupswitch" | "goto" | "goto_w" => Some("branch"),
            "ldc" | "ldc_w" | "ldc2_w" | "bipush" | "sipush" | "aconst_null" => Some("const"),
            "return" | "ireturn" | "lreturn" | "freturn" | "dreturn" | "areturn" => Some("return"),
            other => {
                if other.starts_with("if") {
                    Some("branch")
                } else if other.ends_with("load")
                    || other.contains("load_")
                    || other.ends_with("store")
                    || other.contains("store_")
                {
                    // Tráfico de variables locales: plomería sin contraparte
                    // en la máquina de registros.
                    None
                } else if other.contains("const") {
                    Some("const")
                } else if matches!(
                    &other[1..],
                    "add" | "sub" | "mul" | "div" | "rem" | "neg" | "shl" | "shr" | "ushr"
                        | "and" | "or" | "xor" | "inc"
                ) {
                    Some("arith")
                } else {
                    // Mnemónico fuera de tabla: pasa crudo al alfabeto.
                    Some("opaque")
                }
            }
        }
    }
}

impl OpcodeNormalizer for StackMachineNormalizer {
    fn normalize<'a>(
        &self,
        view: &'a dyn HierarchyView,
        factory: &'a dyn IlFactory,
        method: &'a dyn MethodNode,
    ) -> Box<dyn Iterator<Item = String> + 'a> {
        Box::new(method.instructions().filter_map(move |token| {
            Self::canonical(&token.mnemonic)
                .map(|canonical| render_canonical(view, factory, canonical, &token))
        }))
    }
}

/// Normalizador del conjunto de instrucciones de registros (Dalvik).
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterMachineNormalizer;

impl RegisterMachineNormalizer {
    /// Pliega un mnemónico de registros al alfabeto canónico (None = filtrado).
    fn canonical(raw_mnemonic: &str) -> Option<&'static str> {
        if raw_mnemonic == "nop" || raw_mnemonic.starts_with("move") {
            return None;
        }
        if raw_mnemonic.starts_with("invoke-static") {
            return Some("invoke-static");
        }
        if raw_mnemonic.starts_with("invoke-") {
            return Some("invoke");
        }
        if raw_mnemonic.starts_with("iget") || raw_mnemonic.starts_with("sget") || raw_mnemonic.starts_with("aget") {
            return Some("get");
        }
        if raw_mnemonic.starts_with("iput") || raw_mnemonic.starts_with("sput") || raw_mnemonic.starts_with("aput") {
            return Some("put");
        }
        if raw_mnemonic == "new-instance"
            || raw_mnemonic == "new-array"
            || raw_mnemonic.starts_with("filled-new-array")
        {
            return Some("new");
        }
        if raw_mnemonic.starts_with("const") {
            return Some("const");
        }
        if raw_mnemonic.starts_with("return") {
            return Some("return");
        }
        if raw_mnemonic.starts_with("if-")
            || raw_mnemonic.starts_with("goto")
            || raw_mnemonic == "packed-switch"
            || raw_mnemonic == "sparse-switch"
        {
            return Some("branch");
        }
        if raw_mnemonic == "check-cast" || raw_mnemonic == "instance-of" {
            return Some("typecheck");
        }
        if raw_mnemonic == "throw" {
            return Some("throw");
        }
        if raw_mnemonic == "array-length" {
            return Some("arraylength");
        }
        if raw_mnemonic == "monitor-enter" || raw_mnemonic == "monitor-exit" {
            return Some("monitor");
        }
        let arithmetic_families = [
            "add-", "sub-", "mul-", "div-", "rem-", "neg-", "and-", "or-", "xor-", "shl-",
            "shr-", "ushr-", "not-", "rsub-",
        ];
        if arithmetic_families
            .iter()
            .any(|family| raw_mnemonic.starts_with(family))
        {
            return Some("arith");
        }
        // Mnemónico fuera de tabla: pasa crudo al alfabeto.
        Some("opaque")
    }
}

impl OpcodeNormalizer for RegisterMachineNormalizer {
    fn normalize<'a>(
        &self,
        view: &'a dyn HierarchyView,
        factory: &'a dyn IlFactory,
        method: &'a dyn MethodNode,
    ) -> Box<dyn Iterator<Item = String> + 'a> {
        Box::new(method.instructions().filter_map(move |token| {
            Self::canonical(&token.mnemonic)
                .map(|canonical| render_canonical(view, factory, canonical, &token))
        }))
    }
}

// =================================================================
// PROVING GROUNDS LOCAL (UNIDAD)
// =================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::il::BasicFuzzyFactory;
    use crate::memory::{InMemoryHierarchy, MemoryClassBuilder, MemoryMethodBuilder};
    use crate::view::{ClassNode, LoaderKind, TypeRef};

    /// Cuerpo semánticamente idéntico en ambos conjuntos de instrucciones:
    /// cargar, invocar sobre String, constante de cadena, retornar.
    fn dual_hierarchy() -> InMemoryHierarchy {
        let platform_string = TypeRef::object("java/lang/String", LoaderKind::Platform);

        let stack_method = MemoryMethodBuilder::new("work")
            .op(OpToken::bare("aload"))
            .op(OpToken::bare("dup"))
            .op(OpToken::typed("invokevirtual", platform_string.clone()))
            .op(OpToken::literal("ldc", "user-agent"))
            .op(OpToken::bare("pop"))
            .op(OpToken::bare("areturn"))
            .build();

        let register_method = MemoryMethodBuilder::new("work")
            .op(OpToken::bare("move-object"))
            .op(OpToken::typed("invoke-virtual", platform_string))
            .op(OpToken::literal("const-string", "user-agent"))
            .op(OpToken::bare("return-object"))
            .build();

        let mut hierarchy = InMemoryHierarchy::new();
        hierarchy.register(
            MemoryClassBuilder::application("com/example/StackForm")
                .method(stack_method)
                .build(),
        );
        hierarchy.register(
            MemoryClassBuilder::application("com/example/RegisterForm")
                .method(register_method)
                .build(),
        );
        hierarchy
    }

    #[test]
    fn equivalent_bodies_collapse_to_identical_tokens() {
        let hierarchy = dual_hierarchy();
        let factory = BasicFuzzyFactory;

        let stack_class = hierarchy.resolve("com/example/StackForm").unwrap();
        let register_class = hierarchy.resolve("com/example/RegisterForm").unwrap();
        let stack_method = stack_class.methods()[0];
        let register_method = register_class.methods()[0];

        let stack_tokens: Vec<String> =
            StackMachineNormalizer.normalize(&hierarchy, &factory, stack_method).collect();
        let register_tokens: Vec<String> =
            RegisterMachineNormalizer.normalize(&hierarchy, &factory, register_method).collect();

        assert_eq!(
            stack_tokens,
            vec!["invoke Ljava/lang/String;", "const #user-agent", "return"],
            "pila: plomería filtrada y operandos difusos"
        );
        assert_eq!(stack_tokens, register_tokens, "semántica equivalente ⟹ tokens idénticos");
    }

    #[test]
    fn positions_and_registers_never_leak() {
        let hierarchy = dual_hierarchy();
        let factory = BasicFuzzyFactory;
        let class = hierarchy.resolve("com/example/RegisterForm").unwrap();
        let method = class.methods()[0];

        for token in RegisterMachineNormalizer.normalize(&hierarchy, &factory, method) {
            assert!(
                !token.chars().any(|c| c.is_ascii_digit()),
                "sin índices de registro ni posiciones en el alfabeto canónico: {token}"
            );
        }
    }
}
