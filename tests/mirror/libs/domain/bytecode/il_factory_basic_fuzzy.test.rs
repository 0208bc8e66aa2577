// [tests/mirror/libs/domain/bytecode/il_factory_basic_fuzzy.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE LA FÁBRICA IL BÁSICA (V10.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-BYTECODE
 * RESPONSABILIDAD: VALIDACIÓN DE LOS TESTIGOS DIFUSOS NORMATIVOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WITNESS TRIAD: void m(String, int) → "(Ljava/lang/String;I)V";
 *    static void m() → "<static>()V"; arreglo aplicativo → "[X".
 * 2. RECEIVER ERASURE: El receptor de instancia jamás aparece en la
 *    firma difusa.
 * =================================================================
 */

use librarius_domain_bytecode::{
    BasicFuzzyFactory, HierarchyView, IlFactory, InMemoryHierarchy, LoaderKind,
    MemoryClassBuilder, MemoryMethodBuilder, OpToken, TypeRef,
};

fn witness_hierarchy() -> InMemoryHierarchy {
    let mut hierarchy = InMemoryHierarchy::new();
    hierarchy.register(
        MemoryClassBuilder::application("com/example/Helper")
            .method(MemoryMethodBuilder::new("touch").op(OpToken::bare("return")).build())
            .build(),
    );
    hierarchy.register(
        MemoryClassBuilder::application("com/example/Subject")
            .method(
                MemoryMethodBuilder::new("m")
                    .parameter(TypeRef::object("java/lang/String", LoaderKind::Platform))
                    .parameter(TypeRef::primitive("I"))
                    .op(OpToken::bare("return"))
                    .build(),
            )
            .method(
                MemoryMethodBuilder::new("m")
                    .static_method()
                    .op(OpToken::bare("return"))
                    .build(),
            )
            .method(
                MemoryMethodBuilder::new("sink")
                    .parameter(
                        TypeRef::object("com/example/Helper", LoaderKind::Application).with_dims(1),
                    )
                    .op(OpToken::bare("return"))
                    .build(),
            )
            .build(),
    );
    hierarchy
}

#[test]
fn normative_witnesses_render_exactly() {
    println!("🧪 [IL_GAUNTLET]: Auditing basic fuzzy witnesses...");

    let hierarchy = witness_hierarchy();
    let factory = BasicFuzzyFactory;
    let subject = hierarchy.resolve("com/example/Subject").expect("Subject");

    let descriptors = factory.method_descriptors(&hierarchy, subject);
    println!("      🧬 [DESCRIPTORS]: {:?}", descriptors);

    assert_eq!(descriptors[0], "(Ljava/lang/String;I)V", "firma de instancia sin receptor");
    assert_eq!(descriptors[1], "<static>()V", "prefijo estático con nombre difuminado");
    assert_eq!(descriptors[2], "([X)V", "arreglo de tipo aplicativo colapsa a [X");

    println!("✅ [VERDICT]: Basic fuzzy witnesses sealed.");
}

#[test]
fn application_array_parameter_renders_bracket_x() {
    let hierarchy = witness_hierarchy();
    let factory = BasicFuzzyFactory;

    let application_array =
        TypeRef::object("com/example/Helper", LoaderKind::Application).with_dims(1);
    assert_eq!(factory.type_descriptor(&hierarchy, &application_array), "[X");

    let platform_array = TypeRef::object("java/lang/String", LoaderKind::Platform).with_dims(2);
    assert_eq!(factory.type_descriptor(&hierarchy, &platform_array), "[[Ljava/lang/String;");
}

#[test]
fn constructor_and_clinit_names_are_preserved() {
    let mut hierarchy = InMemoryHierarchy::new();
    hierarchy.register(
        MemoryClassBuilder::application("com/example/Ctor")
            .method(
                MemoryMethodBuilder::new("<init>")
                    .parameter(TypeRef::primitive("I"))
                    .op(OpToken::bare("return"))
                    .build(),
            )
            .method(
                MemoryMethodBuilder::new("<clinit>")
                    .static_method()
                    .op(OpToken::bare("return"))
                    .build(),
            )
            .build(),
    );

    let factory = BasicFuzzyFactory;
    let class = hierarchy.resolve("com/example/Ctor").expect("Ctor");
    let descriptors = factory.method_descriptors(&hierarchy, class);

    assert_eq!(descriptors[0], "<init>(I)V");
    assert_eq!(descriptors[1], "<static><clinit>()V");
}
