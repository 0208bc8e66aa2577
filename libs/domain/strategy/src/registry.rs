// [libs/domain/strategy/src/registry.rs]
/*!
 * =================================================================
 * APARATO: STRATEGY REGISTRY (V12.1 - TYPE-KEYED TABLE)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: TABLAS TIPADAS DE ESTRATEGIAS, PASOS Y POLÍTICAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TABLE OVER VTABLE: El despacho por tipo de perfil es una tabla
 *    explícita ProfileKind → estrategia; jamás herencia profunda.
 * 2. ORDERED STEPS: Los pasos se despachan por prioridad ascendente
 *    con desempate por orden de inserción (orden total estable).
 * 3. CLAMP SHIELD: Toda similitud despachada se audita en [0,1]; un
 *    valor no finito es AlgorithmFailure inapelable.
 * 4. MERGE SEMANTICS: 'with' fusiona registros; ante colisión de
 *    llave gana el registro posterior.
 * =================================================================
 */

use crate::errors::StrategyError;
use librarius_domain_bytecode::{ClassNode, HierarchyView, IlFactory, OpcodeNormalizer};
use librarius_domain_profiles::{ProfileKind, ProfileManager, ThresholdConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Referencia etiquetada al perfil despachable (gestor + índice de arena).
#[derive(Clone, Copy)]
pub enum ProfileRef<'a> {
    /// Perfil de jerarquía completo (nivel superior).
    Cha(&'a ProfileManager),
    /// Sub-perfil de paquete por índice de arena.
    Package(&'a ProfileManager, u32),
    /// Sub-perfil de clase por índice de arena.
    Class(&'a ProfileManager, u32),
    /// Sub-perfil de método por índice de arena.
    Method(&'a ProfileManager, u32),
    /// Sub-perfil de campo por índice de arena.
    Field(&'a ProfileManager, u32),
}

impl<'a> ProfileRef<'a> {
    /// Tipo del perfil referenciado.
    #[must_use]
    pub fn kind(&self) -> ProfileKind {
        match self {
            Self::Cha(_) => ProfileKind::Cha,
            Self::Package(_, _) => ProfileKind::Package,
            Self::Class(_, _) => ProfileKind::Class,
            Self::Method(_, _) => ProfileKind::Method,
            Self::Field(_, _) => ProfileKind::Field,
        }
    }

    /// Gestor propietario de la arena referenciada.
    #[must_use]
    pub fn manager(&self) -> &'a ProfileManager {
        match *self {
            Self::Cha(manager)
            | Self::Package(manager, _)
            | Self::Class(manager, _)
            | Self::Method(manager, _)
            | Self::Field(manager, _) => manager,
        }
    }

    /// Índice de arena del sub-perfil (None para el nivel superior).
    #[must_use]
    pub fn arena_index(&self) -> Option<u32> {
        match self {
            Self::Cha(_) => None,
            Self::Package(_, index)
            | Self::Class(_, index)
            | Self::Method(_, index)
            | Self::Field(_, index) => Some(*index),
        }
    }

    /**
     * Almacén de payloads del sub-perfil referenciado.
     *
     * # Errors:
     * Propaga la ausencia de la extensión o un índice fuera de arena
     * como `AlgorithmFailure` (referencia colgante = estado corrupto).
     */
    pub fn payload(&self) -> Result<Option<&'a librarius_domain_profiles::PayloadStore>, StrategyError> {
        let dangling = |index: u32| {
            StrategyError::algorithm(format!(
                "índice de arena colgante: {index} para {:?}",
                self.kind()
            ))
        };
        Ok(match *self {
            Self::Cha(_) => None,
            Self::Package(manager, index) => Some(
                &manager
                    .packages()?
                    .get(index as usize)
                    .ok_or_else(|| dangling(index))?
                    .payload,
            ),
            Self::Class(manager, index) => Some(
                &manager
                    .classes()?
                    .get(index as usize)
                    .ok_or_else(|| dangling(index))?
                    .payload,
            ),
            Self::Method(manager, index) => Some(
                &manager
                    .methods()?
                    .get(index as usize)
                    .ok_or_else(|| dangling(index))?
                    .payload,
            ),
            Self::Field(manager, index) => Some(
                &manager
                    .fields()?
                    .get(index as usize)
                    .ok_or_else(|| dangling(index))?
                    .payload,
            ),
        })
    }

    /**
     * Cadena del descriptor del sub-perfil, resuelta en su pool.
     *
     * La igualdad de descriptores ENTRE perfiles distintos es igualdad
     * de cadena internada; la igualdad por índice solo rige dentro de
     * un mismo pool.
     */
    pub fn descriptor_text(&self) -> Result<Option<&'a str>, StrategyError> {
        let manager = self.manager();
        let descriptor = match *self {
            Self::Cha(_) => return Ok(None),
            Self::Package(_, index) => {
                manager
                    .packages()?
                    .get(index as usize)
                    .map(|item| item.descriptor)
            }
            Self::Class(_, index) => {
                manager.classes()?.get(index as usize).map(|item| item.descriptor)
            }
            Self::Method(_, index) => {
                manager.methods()?.get(index as usize).map(|item| item.descriptor)
            }
            Self::Field(_, index) => {
                manager.fields()?.get(index as usize).map(|item| item.descriptor)
            }
        };
        match descriptor {
            Some(handle) => Ok(Some(manager.pool().resolve(handle)?)),
            None => Err(StrategyError::algorithm(format!(
                "índice de arena colgante para {:?}",
                self.kind()
            ))),
        }
    }
}

/// Contexto inmutable compartido por las estrategias durante el despacho.
pub struct SimilarityContext<'a> {
    /// Registro que originó el despacho (recursión por capas).
    pub registry: &'a StrategyRegistry,
    /// Umbrales de decisión vigentes.
    pub thresholds: &'a ThresholdConfig,
}

/// Estrategia de similitud par a par sobre un tipo de perfil.
pub trait SimilarityStrategy: Send + Sync {
    /// Similitud en [0,1] del par (app, lib) del mismo tipo.
    fn similarity(
        &self,
        ctx: &SimilarityContext<'_>,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError>;
}

/// Contexto inmutable de la fase de extracción.
pub struct ExtractionContext<'a> {
    /// Vista de la jerarquía de clases del bundle.
    pub view: &'a dyn HierarchyView,
    /// Fábrica IL activa.
    pub il_factory: &'a dyn IlFactory,
    /// Normalizador de opcodes activo (opcional).
    pub normalizer: Option<&'a dyn OpcodeNormalizer>,
}

/// Paso de extracción: función pura de (referencia, objetivo).
///
/// Los efectos se confinan al gestor objetivo; el paso declara el tipo
/// de perfil que puebla y el ejecutor verifica la asignabilidad antes
/// de invocarlo.
pub trait ExtractionStep: Send + Sync {
    /// Prioridad de despacho (ascendente; empate = orden de inserción).
    fn priority(&self) -> i32 {
        0
    }

    /// Tipo de perfil que este paso puebla.
    fn target_kind(&self) -> ProfileKind;

    /// Predicado de asignabilidad del paso sobre un tipo.
    fn applies_to(&self, kind: ProfileKind) -> bool {
        kind == self.target_kind()
    }

    /// Ejecuta el paso sobre el gestor objetivo.
    fn execute(
        &self,
        ctx: &ExtractionContext<'_>,
        registry: &StrategyRegistry,
        target: &mut ProfileManager,
    ) -> Result<(), StrategyError>;
}

/// Política de elegibilidad de una clase para el perfilado.
pub trait ExtractionPolicy: Send + Sync {
    /// Verdadero si la clase es elegible bajo esta política.
    fn is_eligible(&self, ctx: &ExtractionContext<'_>, class: &dyn ClassNode) -> bool;
}

/// Registro tipado: estrategias + pasos ordenados + políticas.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: HashMap<ProfileKind, Arc<dyn SimilarityStrategy>>,
    steps: HashMap<ProfileKind, Vec<Arc<dyn ExtractionStep>>>,
    policies: Vec<Arc<dyn ExtractionPolicy>>,
}

impl StrategyRegistry {
    /// Registro vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) la estrategia de un tipo.
    pub fn register_strategy(
        &mut self,
        kind: ProfileKind,
        strategy: Arc<dyn SimilarityStrategy>,
    ) {
        debug!("🧭 [STRATEGY_REGISTERED]: kind={:?}", kind);
        self.strategies.insert(kind, strategy);
    }

    /// Registra un paso en el bucket de su tipo objetivo.
    pub fn register_step(&mut self, step: Arc<dyn ExtractionStep>) {
        self.steps.entry(step.target_kind()).or_default().push(step);
    }

    /// Registra una política de elegibilidad.
    pub fn register_policy(&mut self, policy: Arc<dyn ExtractionPolicy>) {
        self.policies.push(policy);
    }

    /**
     * Despacho de similitud por tipo de los operandos.
     *
     * # Errors:
     * - `KindMismatch` si los operandos difieren de tipo.
     * - `UnsupportedKind` si el tipo carece de estrategia registrada.
     * - `AlgorithmFailure` si la estrategia retorna un valor no finito.
     */
    pub fn similarity_of(
        &self,
        thresholds: &ThresholdConfig,
        app: ProfileRef<'_>,
        lib: ProfileRef<'_>,
    ) -> Result<f64, StrategyError> {
        if app.kind() != lib.kind() {
            return Err(StrategyError::KindMismatch {
                app_kind: app.kind(),
                lib_kind: lib.kind(),
            });
        }
        let strategy = self
            .strategies
            .get(&app.kind())
            .ok_or(StrategyError::UnsupportedKind { kind: app.kind() })?;

        let ctx = SimilarityContext { registry: self, thresholds };
        let raw_similarity = strategy.similarity(&ctx, app, lib)?;
        if !raw_similarity.is_finite() {
            return Err(StrategyError::algorithm(format!(
                "similitud no finita para {:?}: {raw_similarity}",
                app.kind()
            )));
        }
        Ok(raw_similarity.clamp(0.0, 1.0))
    }

    /// Verdadero si el tipo posee estrategia registrada.
    #[must_use]
    pub fn supports(&self, kind: ProfileKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /**
     * Pasos aplicables a un tipo, por prioridad ascendente.
     *
     * El desempate conserva el orden de inserción (ordenamiento
     * estable), garantizando despacho determinista.
     */
    #[must_use]
    pub fn feature_extractors(&self, kind: ProfileKind) -> Vec<Arc<dyn ExtractionStep>> {
        let mut applicable: Vec<Arc<dyn ExtractionStep>> = self
            .steps
            .get(&kind)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|step| step.applies_to(kind))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        applicable.sort_by_key(|step| step.priority());
        applicable
    }

    /// Conjunción de políticas: elegible si TODAS aprueban.
    #[must_use]
    pub fn is_eligible(&self, ctx: &ExtractionContext<'_>, class: &dyn ClassNode) -> bool {
        self.policies
            .iter()
            .all(|policy| policy.is_eligible(ctx, class))
    }

    /**
     * Fusión de registros: las llaves del registro posterior ganan.
     *
     * Los buckets de pasos del posterior reemplazan a los homónimos;
     * las políticas se acumulan.
     */
    #[must_use]
    pub fn with(mut self, later: Self) -> Self {
        for (kind, strategy) in later.strategies {
            self.strategies.insert(kind, strategy);
        }
        for (kind, bucket) in later.steps {
            self.steps.insert(kind, bucket);
        }
        self.policies.extend(later.policies);
        self
    }
}
