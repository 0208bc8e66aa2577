// [apps/verdict/src/integration.rs]
/*!
 * =================================================================
 * APARATO: INTEGRATION TABLE (V6.2 - SYMBOLIC RESOLUTION)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: NOMBRES SIMBÓLICOS → CONSTRUCTORES DEL ENSAMBLAJE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NO REFLECTION: La reflexión por nombre de clase del mundo JVM se
 *    reemplaza por una tabla estática poblada al arranque; las
 *    definiciones de perfil refieren SOLO nombres simbólicos.
 * 2. BUNDLED INTEGRATIONS: Cada integración empaqueta su registro de
 *    estrategias/pasos/políticas y el proveedor de forma del gestor.
 * 3. UNKNOWN IS A FAULT: Un nombre fuera de tabla es ConfigError al
 *    cargar, jamás un fallback silencioso.
 * =================================================================
 */

use librarius_domain_bytecode::{
    BasicFuzzyFactory, HierarchyFuzzyFactory, IlFactory, OpcodeNormalizer,
    RegisterMachineNormalizer, StackMachineNormalizer, UniqueFuzzyFactory,
};
use librarius_domain_profiles::{
    ClassListExtension, ConstantsExtension, FieldListExtension, MethodListExtension,
    PackageListExtension, PayloadBlueprint, PayloadKind, ProfileInfo, ProfileInfoExtension,
    ProfileKind, ProfileManager, RetentionPolicy, CLASS_EXTENSION_NAME, FIELD_EXTENSION_NAME,
    METHOD_EXTENSION_NAME, PACKAGE_EXTENSION_NAME, WEIGHT_PAYLOAD_KEY,
};
use librarius_domain_strategy::engines::{
    ClassBipartiteStrategy, ClassSignatureStrategy, FieldDescriptorStrategy,
    MethodLocalityStrategy, PackageRosterStrategy, ProfileBipartiteStrategy,
};
use librarius_domain_strategy::{
    AppScopePolicy, ClassFeatureStep, ClassRosterStep, DefaultRatioHandler, FieldRosterStep,
    InfoConstantsStep, MatchingAlgorithm, MethodFeatureStep, MethodRosterStep, MultiPhaseHandler,
    PackageTreeStep, StrategyRegistry, StringConstantsStep, BLOOM_PAYLOAD_KEY,
    DOC_HASH_PAYLOAD_KEY, LOCALITY_PAYLOAD_KEY, ROLLING_PAYLOAD_KEY,
};
use librarius_infra_store::{ExtensionDecl, ProfileDefinition, StoreError};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Integración empaquetada: estrategias, pasos y forma del gestor.
pub struct Integration {
    /// Nombre simbólico estable de la integración.
    pub name: &'static str,
    /// Constructor del registro de estrategias/pasos/políticas.
    pub forge_registry: fn() -> StrategyRegistry,
}

/// Tabla de integración del proceso (poblada al arranque).
pub struct IntegrationTable {
    il_factories: BTreeMap<&'static str, fn() -> Box<dyn IlFactory>>,
    normalizers: BTreeMap<&'static str, fn() -> Box<dyn OpcodeNormalizer>>,
    integrations: BTreeMap<&'static str, Integration>,
}

static GLOBAL_TABLE: Lazy<IntegrationTable> = Lazy::new(IntegrationTable::forge);

impl IntegrationTable {
    /// Tabla global del proceso.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_TABLE
    }

    /// Puebla la tabla con el ensamblaje canónico.
    fn forge() -> Self {
        let mut il_factories: BTreeMap<&'static str, fn() -> Box<dyn IlFactory>> = BTreeMap::new();
        il_factories.insert("basic-fuzzy", || Box::new(BasicFuzzyFactory));
        il_factories.insert("unique-fuzzy", || Box::new(UniqueFuzzyFactory));
        il_factories.insert("hierarchy-fuzzy", || Box::new(HierarchyFuzzyFactory::default()));

        let mut normalizers: BTreeMap<&'static str, fn() -> Box<dyn OpcodeNormalizer>> =
            BTreeMap::new();
        normalizers.insert("stack-machine", || Box::new(StackMachineNormalizer));
        normalizers.insert("register-machine", || Box::new(RegisterMachineNormalizer));

        let mut integrations: BTreeMap<&'static str, Integration> = BTreeMap::new();
        integrations.insert(
            "standard-bipartite",
            Integration { name: "standard-bipartite", forge_registry: forge_standard_registry },
        );
        integrations.insert(
            "multiphase-signature",
            Integration {
                name: "multiphase-signature",
                forge_registry: forge_multiphase_registry,
            },
        );
        integrations.insert(
            "hungarian-bipartite",
            Integration {
                name: "hungarian-bipartite",
                forge_registry: forge_hungarian_registry,
            },
        );

        Self { il_factories, normalizers, integrations }
    }

    /// Resuelve una fábrica IL por nombre simbólico.
    pub fn il_factory(&self, symbolic_name: &str) -> Result<Box<dyn IlFactory>, StoreError> {
        self.il_factories
            .get(symbolic_name)
            .map(|constructor| constructor())
            .ok_or_else(|| {
                StoreError::config(format!("fábrica IL desconocida: '{symbolic_name}'"))
            })
    }

    /// Resuelve un normalizador por nombre simbólico.
    pub fn normalizer(
        &self,
        symbolic_name: &str,
    ) -> Result<Box<dyn OpcodeNormalizer>, StoreError> {
        self.normalizers
            .get(symbolic_name)
            .map(|constructor| constructor())
            .ok_or_else(|| {
                StoreError::config(format!("normalizador desconocido: '{symbolic_name}'"))
            })
    }

    /// Resuelve una integración por nombre simbólico.
    pub fn integration(&self, symbolic_name: &str) -> Result<&Integration, StoreError> {
        self.integrations.get(symbolic_name).ok_or_else(|| {
            StoreError::config(format!("integración desconocida: '{symbolic_name}'"))
        })
    }

    /**
     * Proveedor de forma del gestor derivado de la definición de perfil.
     *
     * Registra las extensiones declaradas en su orden textual; la
     * cabecera "nfo" se antepone si la definición la omite.
     */
    pub fn compose_manager(
        definition: &ProfileDefinition,
        is_app_profile: bool,
    ) -> Result<ProfileManager, StoreError> {
        let mut manager = ProfileManager::new(is_app_profile);

        let declares_info = definition.extensions.iter().any(|decl| decl.name == "nfo");
        if !declares_info {
            manager.register_extension(Box::new(ProfileInfoExtension::new(ProfileInfo::new(
                is_app_profile,
            ))))?;
        }

        for declaration in &definition.extensions {
            manager.register_extension(forge_extension(declaration, is_app_profile)?)?;
        }
        Ok(manager)
    }
}

/// Parsea la etiqueta de retención de una declaración.
fn parse_retention(label: &str) -> Result<RetentionPolicy, StoreError> {
    match label {
        "runtime" => Ok(RetentionPolicy::Runtime),
        "source" => Ok(RetentionPolicy::Source),
        "none" => Ok(RetentionPolicy::None),
        unknown => Err(StoreError::config(format!(
            "política de retención desconocida: '{unknown}'"
        ))),
    }
}

/// Lee un argumento numérico de la declaración con su default.
fn numeric_argument<T: std::str::FromStr>(
    declaration: &ExtensionDecl,
    key: &str,
    default_value: T,
) -> Result<T, StoreError> {
    match declaration.args.get(key) {
        Some(raw_value) => raw_value.parse::<T>().map_err(|_| {
            StoreError::config(format!(
                "argumento '{key}' ilegal en la extensión '{}': '{raw_value}'",
                declaration.name
            ))
        }),
        None => Ok(default_value),
    }
}

/// Materializa una extensión declarada por la definición.
fn forge_extension(
    declaration: &ExtensionDecl,
    is_app_profile: bool,
) -> Result<Box<dyn librarius_domain_profiles::ProfileExtension>, StoreError> {
    let retention = parse_retention(&declaration.retention)?;
    Ok(match declaration.name.as_str() {
        "nfo" => Box::new(ProfileInfoExtension::new(ProfileInfo::new(is_app_profile))),
        "pkg" => Box::new(PackageListExtension::new(
            PACKAGE_EXTENSION_NAME,
            retention,
            PayloadBlueprint::new(),
        )),
        "cls" => {
            let bloom_bits: u16 = numeric_argument(declaration, "bloom-bits", 256)?;
            let bloom_derivations: u8 = numeric_argument(declaration, "bloom-derivations", 4)?;
            Box::new(ClassListExtension::new(
                CLASS_EXTENSION_NAME,
                retention,
                PayloadBlueprint::new()
                    .declare(
                        BLOOM_PAYLOAD_KEY,
                        PayloadKind::Bloom {
                            bit_capacity: bloom_bits,
                            derivation_count: bloom_derivations,
                        },
                    )
                    .declare(LOCALITY_PAYLOAD_KEY, PayloadKind::Locality)
                    .declare(DOC_HASH_PAYLOAD_KEY, PayloadKind::Hash32)
                    .declare(WEIGHT_PAYLOAD_KEY, PayloadKind::Weight),
            ))
        }
        "mtd" => Box::new(MethodListExtension::new(
            METHOD_EXTENSION_NAME,
            retention,
            PayloadBlueprint::new()
                .declare(ROLLING_PAYLOAD_KEY, PayloadKind::Rolling)
                .declare(LOCALITY_PAYLOAD_KEY, PayloadKind::Locality),
        )),
        "fld" => Box::new(FieldListExtension::new(
            FIELD_EXTENSION_NAME,
            retention,
            PayloadBlueprint::new(),
        )),
        "cst" => Box::new(ConstantsExtension::new(retention)),
        unknown => {
            return Err(StoreError::config(format!(
                "extensión desconocida en la definición: '{unknown}'"
            )))
        }
    })
}

/// Pasos y política canónicos compartidos por todas las integraciones.
fn register_canonical_steps(registry: &mut StrategyRegistry) {
    registry.register_policy(Arc::new(AppScopePolicy));
    registry.register_step(Arc::new(InfoConstantsStep));
    registry.register_step(Arc::new(PackageTreeStep));
    registry.register_step(Arc::new(ClassRosterStep));
    registry.register_step(Arc::new(ClassFeatureStep));
    registry.register_step(Arc::new(StringConstantsStep));
    registry.register_step(Arc::new(MethodRosterStep));
    registry.register_step(Arc::new(MethodFeatureStep));
    registry.register_step(Arc::new(FieldRosterStep));
}

/// Integración estándar: bipartito de peso máximo por capas.
fn forge_standard_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    register_canonical_steps(&mut registry);

    let method_strategy = Arc::new(MethodLocalityStrategy);
    let class_strategy = Arc::new(ClassBipartiteStrategy::new(
        MatchingAlgorithm::MaxWeight,
        method_strategy.clone(),
        Arc::new(DefaultRatioHandler),
    ));

    registry.register_strategy(
        ProfileKind::Cha,
        Arc::new(ProfileBipartiteStrategy::new(
            MatchingAlgorithm::MaxWeight,
            class_strategy.clone(),
            Arc::new(DefaultRatioHandler),
        )),
    );
    registry.register_strategy(ProfileKind::Class, class_strategy.clone());
    registry.register_strategy(ProfileKind::Method, method_strategy);
    registry.register_strategy(ProfileKind::Field, Arc::new(FieldDescriptorStrategy));
    registry.register_strategy(
        ProfileKind::Package,
        Arc::new(PackageRosterStrategy::new(
            MatchingAlgorithm::MaxWeight,
            Arc::new(ClassSignatureStrategy),
        )),
    );
    registry
}

/// Integración multi-fase: σ barata de firma + refinamiento de métodos.
fn forge_multiphase_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    register_canonical_steps(&mut registry);

    let method_strategy = Arc::new(MethodLocalityStrategy);
    let refinement = Arc::new(ClassBipartiteStrategy::new(
        MatchingAlgorithm::MaxWeight,
        method_strategy.clone(),
        Arc::new(DefaultRatioHandler),
    ));

    registry.register_strategy(
        ProfileKind::Cha,
        Arc::new(ProfileBipartiteStrategy::new(
            MatchingAlgorithm::MaxWeight,
            Arc::new(ClassSignatureStrategy),
            Arc::new(MultiPhaseHandler::new(ProfileKind::Class, refinement)),
        )),
    );
    registry.register_strategy(ProfileKind::Class, Arc::new(ClassSignatureStrategy));
    registry.register_strategy(ProfileKind::Method, method_strategy);
    registry.register_strategy(ProfileKind::Field, Arc::new(FieldDescriptorStrategy));
    registry.register_strategy(
        ProfileKind::Package,
        Arc::new(PackageRosterStrategy::new(
            MatchingAlgorithm::MaxWeight,
            Arc::new(ClassSignatureStrategy),
        )),
    );
    registry
}

/// Integración húngara: costo mínimo 1−w en la capa de perfil.
fn forge_hungarian_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    register_canonical_steps(&mut registry);

    let method_strategy = Arc::new(MethodLocalityStrategy);
    let class_strategy = Arc::new(ClassBipartiteStrategy::new(
        MatchingAlgorithm::HungarianMinCost,
        method_strategy.clone(),
        Arc::new(DefaultRatioHandler),
    ));

    registry.register_strategy(
        ProfileKind::Cha,
        Arc::new(ProfileBipartiteStrategy::new(
            MatchingAlgorithm::HungarianMinCost,
            class_strategy.clone(),
            Arc::new(DefaultRatioHandler),
        )),
    );
    registry.register_strategy(ProfileKind::Class, class_strategy);
    registry.register_strategy(ProfileKind::Method, method_strategy);
    registry.register_strategy(ProfileKind::Field, Arc::new(FieldDescriptorStrategy));
    registry.register_strategy(
        ProfileKind::Package,
        Arc::new(PackageRosterStrategy::new(
            MatchingAlgorithm::HungarianMinCost,
            Arc::new(ClassSignatureStrategy),
        )),
    );
    registry
}
