// [libs/domain/strategy/src/steps.rs]
/*!
 * =================================================================
 * APARATO: EXTRACTION STEPS (V12.3 - FEATURE FORGE)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: PASOS INTEGRADOS DE POBLACIÓN DE SUB-PERFILES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ROSTER FIRST, FEATURES SECOND: Cada arena se puebla con un paso
 *    de roster (prioridad 0) y se enriquece con un paso de huellas
 *    (prioridad 10); las constantes cierran (prioridad 20).
 * 2. ARENA ALIGNMENT: El índice de arena de una clase ES su posición
 *    en la lista de clases elegibles; todos los pasos posteriores
 *    explotan ese invariante para re-derivar el mapeo vista⇄arena.
 * 3. BLUEPRINT OBEDIENCE: Un paso puebla EXACTAMENTE las llaves
 *    declaradas por el blueprint de su extensión; las llaves fuera de
 *    su conocimiento reciben el valor neutro de su clase.
 * 4. POLICY GATE: La elegibilidad de una clase es la conjunción de las
 *    políticas registradas (alcance aplicativo por defecto).
 * =================================================================
 */

use crate::errors::StrategyError;
use crate::registry::{ExtractionContext, ExtractionPolicy, ExtractionStep, StrategyRegistry};
use librarius_core_probabilistic::{Djb2Hash, RollingHashSet, TlshDigest};
use librarius_domain_bytecode::{
    is_application_scope, ClassNode, HierarchyView, IlFactory, MethodNode, OpcodeNormalizer,
};
use librarius_domain_profiles::{
    ClassProfile, FeaturePayload, FieldProfile, MethodProfile, PackageProfile, PayloadBlueprint,
    PayloadKind, PayloadStore, ProfileKind, ProfileManager, WEIGHT_PAYLOAD_KEY,
};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Llave canónica de la matriz de Bloom de descriptores.
pub const BLOOM_PAYLOAD_KEY: &str = "blm";
/// Llave canónica del conjunto rodante de tokens normalizados.
pub const ROLLING_PAYLOAD_KEY: &str = "rhs";
/// Llave canónica del digesto de localidad.
pub const LOCALITY_PAYLOAD_KEY: &str = "lsh";
/// Llave canónica del hash djb2 del documento.
pub const DOC_HASH_PAYLOAD_KEY: &str = "h32";

/// Política canónica: solo clases de alcance aplicativo se perfilan.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppScopePolicy;

impl ExtractionPolicy for AppScopePolicy {
    fn is_eligible(&self, _ctx: &ExtractionContext<'_>, class: &dyn ClassNode) -> bool {
        is_application_scope(class)
    }
}

/// Clases elegibles en el orden estable del lector.
///
/// El invariante de alineación de arena nace aquí: la posición en este
/// roster es el índice de arena de la clase.
fn eligible_classes<'a>(
    ctx: &ExtractionContext<'a>,
    registry: &StrategyRegistry,
) -> Vec<&'a dyn ClassNode> {
    ctx.view
        .classes()
        .into_iter()
        .filter(|class| registry.is_eligible(ctx, *class))
        .collect()
}

/// Puebla un almacén con las llaves declaradas, delegando en `populate`
/// y degradando a valor neutro las llaves fuera del conocimiento del paso.
fn populate_declared_keys(
    blueprint: &PayloadBlueprint,
    store: &mut PayloadStore,
    mut populate: impl FnMut(&str, PayloadKind) -> Result<Option<FeaturePayload>, StrategyError>,
) -> Result<(), StrategyError> {
    for (declared_key, declared_kind) in blueprint.entries() {
        let value = match populate(declared_key, declared_kind)? {
            Some(computed) => computed,
            None => declared_kind.empty_value().map_err(StrategyError::Profile)?,
        };
        store.put(declared_key, value);
    }
    Ok(())
}

// -----------------------------------------------------------------
// FASE CHA: CONSTANTES DE CABECERA
// -----------------------------------------------------------------

/// Siembra las constantes de cabecera derivadas de la vista.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoConstantsStep;

impl ExtractionStep for InfoConstantsStep {
    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Cha
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        let eligible_count = eligible_classes(ctx, registry).len();
        if let Ok(info) = target.info_mut() {
            info.set_constant("class-count", eligible_count.to_string());
        }
        Ok(())
    }
}

// -----------------------------------------------------------------
// FASE PACKAGE: ÁRBOL DE PAQUETES
// -----------------------------------------------------------------

/// Construye el árbol de paquetes de las clases elegibles.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageTreeStep;

impl ExtractionStep for PackageTreeStep {
    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Package
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        if target.package_extension().is_err() {
            // Perfil sin extensión de paquetes: el árbol es opcional.
            return Ok(());
        }

        // 1. CLAUSURA DE RUTAS: cada paquete arrastra a sus ancestros.
        let mut package_paths: BTreeSet<String> = BTreeSet::new();
        package_paths.insert(String::new());
        for class in eligible_classes(ctx, registry) {
            let mut path = class.package_name().to_string();
            loop {
                if path.is_empty() {
                    break;
                }
                let inserted = package_paths.insert(path.clone());
                if !inserted {
                    break;
                }
                path = path.rsplit_once('/').map_or(String::new(), |(parent, _)| parent.to_string());
            }
        }

        // 2. MATERIALIZACIÓN EN ORDEN CANÓNICO (BTreeSet ⇒ determinista)
        let mut index_by_path: HashMap<String, u32> = HashMap::new();
        for path in &package_paths {
            let descriptor = target.pool_mut().add(path);
            let mut package = PackageProfile::new(descriptor);
            package.parent = path
                .rsplit_once('/')
                .map(|(parent, _)| parent.to_string())
                .or_else(|| if path.is_empty() { None } else { Some(String::new()) })
                .and_then(|parent_path| index_by_path.get(&parent_path).copied())
                .map_or(librarius_domain_profiles::model::ROOT_PACKAGE_PARENT, |parent_index| {
                    parent_index as i32
                });

            let assigned_index = target.package_extension_mut()?.push(package);
            index_by_path.insert(path.clone(), assigned_index);
        }

        // 3. POBLACIÓN DE HIJOS
        let mut child_links: Vec<(u32, u32)> = Vec::new();
        for (path, index) in &index_by_path {
            if path.is_empty() {
                continue;
            }
            let parent_path = path.rsplit_once('/').map_or("", |(parent, _)| parent);
            if let Some(parent_index) = index_by_path.get(parent_path) {
                child_links.push((*parent_index, *index));
            }
        }
        let packages = target.package_extension_mut()?.items_mut();
        for (parent_index, child_index) in child_links {
            packages[parent_index as usize].children.insert(child_index);
        }

        debug!("📦 [PACKAGE_TREE]: {} packages materialized.", index_by_path.len());
        Ok(())
    }
}

// -----------------------------------------------------------------
// FASE CLASS: ROSTER + HUELLAS + CONSTANTES
// -----------------------------------------------------------------

/// Puebla la arena de clases con descriptores y enlaces de paquete.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassRosterStep;

impl ExtractionStep for ClassRosterStep {
    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Class
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        // Mapa paquete → índice (si el árbol existe).
        let package_index_by_path: HashMap<String, u32> = match target.packages() {
            Ok(packages) => packages
                .iter()
                .enumerate()
                .filter_map(|(index, package)| {
                    target
                        .pool()
                        .get(package.descriptor)
                        .map(|path| (path.to_string(), index as u32))
                })
                .collect(),
            Err(_) => HashMap::new(),
        };

        let mut package_links: Vec<(u32, u32)> = Vec::new();
        for class in eligible_classes(ctx, registry) {
            let descriptor_text = ctx.il_factory.class_descriptor(ctx.view, class);
            let descriptor = target.pool_mut().add(&descriptor_text);

            let mut class_item = ClassProfile::new(descriptor);
            class_item.parent_package =
                package_index_by_path.get(class.package_name()).copied();

            let class_index = target.class_extension_mut()?.push(class_item);
            if let Some(package_index) = package_index_by_path.get(class.package_name()) {
                package_links.push((*package_index, class_index));
            }
        }

        if !package_links.is_empty() {
            let packages = target.package_extension_mut()?.items_mut();
            for (package_index, class_index) in package_links {
                packages[package_index as usize].classes.insert(class_index);
            }
        }
        Ok(())
    }
}

/// Enriquece cada clase con su matriz de Bloom, digesto de localidad,
/// hash de documento y peso.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassFeatureStep;

impl ExtractionStep for ClassFeatureStep {
    fn priority(&self) -> i32 {
        10
    }

    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Class
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        let blueprint = target.class_extension()?.blueprint().clone();
        if blueprint.is_empty() {
            return Ok(());
        }

        for (class_position, class) in eligible_classes(ctx, registry).iter().enumerate() {
            let method_descriptors = ctx.il_factory.method_descriptors(ctx.view, *class);
            let field_descriptors = ctx.il_factory.field_descriptors(ctx.view, *class);
            let document = ctx.il_factory.document(ctx.view, *class);
            let method_count = method_descriptors.len() as u64;

            let store = &mut target.class_extension_mut()?.items_mut()[class_position].payload;
            populate_declared_keys(&blueprint, store, |declared_key, declared_kind| {
                Ok(match declared_key {
                    BLOOM_PAYLOAD_KEY => {
                        let mut bloom = match declared_kind
                            .empty_value()
                            .map_err(StrategyError::Profile)?
                        {
                            FeaturePayload::Bloom(filter) => filter,
                            _ => return Ok(None),
                        };
                        for descriptor in method_descriptors.iter().chain(&field_descriptors) {
                            bloom.add(descriptor);
                        }
                        Some(FeaturePayload::Bloom(bloom))
                    }
                    LOCALITY_PAYLOAD_KEY => Some(FeaturePayload::Locality(TlshDigest::compute(
                        document.as_bytes(),
                    ))),
                    DOC_HASH_PAYLOAD_KEY => Some(FeaturePayload::Hash32(Djb2Hash::of(&document))),
                    WEIGHT_PAYLOAD_KEY => Some(FeaturePayload::Weight(method_count.max(1))),
                    _ => None,
                })
            })?;
        }
        Ok(())
    }
}

/// Recolecta los literales de cadena de cada clase en el corpus "cst".
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConstantsStep;

impl ExtractionStep for StringConstantsStep {
    fn priority(&self) -> i32 {
        20
    }

    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Class
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        if target.constants().is_err() {
            // Corpus de constantes no registrado: paso opcional.
            return Ok(());
        }

        let mut recorded: Vec<(u32, Vec<String>)> = Vec::new();
        for (class_position, class) in eligible_classes(ctx, registry).iter().enumerate() {
            let mut literals: Vec<String> = Vec::new();
            for method in class.methods() {
                for token in method.instructions() {
                    if let Some(literal) = token.literal {
                        literals.push(literal);
                    }
                }
            }
            recorded.push((class_position as u32, literals));
        }

        let corpus = target.constants_mut()?;
        for (class_index, literals) in recorded {
            corpus.record(class_index, literals);
        }
        Ok(())
    }
}

// -----------------------------------------------------------------
// FASE METHOD: ROSTER + HUELLAS
// -----------------------------------------------------------------

/// Puebla la arena de métodos y enlaza los índices por clase.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodRosterStep;

impl ExtractionStep for MethodRosterStep {
    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Method
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        for (class_position, class) in eligible_classes(ctx, registry).iter().enumerate() {
            let descriptors = ctx.il_factory.method_descriptors(ctx.view, *class);
            let mut arena_indices = Vec::with_capacity(descriptors.len());
            for descriptor_text in &descriptors {
                let descriptor = target.pool_mut().add(descriptor_text);
                let arena_index = target.method_extension_mut()?.push(MethodProfile::new(descriptor));
                arena_indices.push(arena_index);
            }
            target.class_extension_mut()?.items_mut()[class_position].method_indices =
                Some(arena_indices);
        }
        Ok(())
    }
}

/// Enriquece cada método con su conjunto rodante y digesto de localidad
/// sobre el flujo de tokens normalizados.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodFeatureStep;

impl ExtractionStep for MethodFeatureStep {
    fn priority(&self) -> i32 {
        10
    }

    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Method
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        let Some(normalizer) = ctx.normalizer else {
            // Sin normalizador no hay huellas de cuerpo que poblar.
            return Ok(());
        };
        let blueprint = target.method_extension()?.blueprint().clone();
        if blueprint.is_empty() {
            return Ok(());
        }

        for (class_position, class) in eligible_classes(ctx, registry).iter().enumerate() {
            let arena_indices = target.classes()?[class_position]
                .method_indices
                .clone()
                .unwrap_or_default();

            for (method, arena_index) in class.methods().into_iter().zip(arena_indices) {
                let tokens: Vec<String> =
                    normalizer.normalize(ctx.view, ctx.il_factory, method).collect();
                let corpus = tokens.join("\n");

                let store =
                    &mut target.method_extension_mut()?.items_mut()[arena_index as usize].payload;
                populate_declared_keys(&blueprint, store, |declared_key, _| {
                    Ok(match declared_key {
                        ROLLING_PAYLOAD_KEY => {
                            let mut rolling = RollingHashSet::new();
                            for token in &tokens {
                                rolling.add(token);
                            }
                            Some(FeaturePayload::Rolling(rolling))
                        }
                        LOCALITY_PAYLOAD_KEY => Some(FeaturePayload::Locality(
                            TlshDigest::compute(corpus.as_bytes()),
                        )),
                        _ => None,
                    })
                })?;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------
// FASE FIELD: ROSTER
// -----------------------------------------------------------------

/// Puebla la arena de campos y enlaza los índices por clase.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRosterStep;

impl ExtractionStep for FieldRosterStep {
    fn target_kind(&self) -> ProfileKind {
        ProfileKind::Field
    }

    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError> {
        if target.field_extension().is_err() {
            // Perfil sin arena de campos: el roster es opcional.
            return Ok(());
        }
        let blueprint = target.field_extension()?.blueprint().clone();

        for (class_position, class) in eligible_classes(ctx, registry).iter().enumerate() {
            let descriptors = ctx.il_factory.field_descriptors(ctx.view, *class);
            let mut arena_indices = Vec::with_capacity(descriptors.len());
            for descriptor_text in &descriptors {
                let descriptor = target.pool_mut().add(descriptor_text);
                let mut field_item = FieldProfile::new(descriptor);
                populate_declared_keys(&blueprint, &mut field_item.payload, |_, _| Ok(None))?;
                let arena_index = target.field_extension_mut()?.push(field_item);
                arena_indices.push(arena_index);
            }
            target.class_extension_mut()?.items_mut()[class_position].field_indices =
                Some(arena_indices);
        }
        Ok(())
    }
}
