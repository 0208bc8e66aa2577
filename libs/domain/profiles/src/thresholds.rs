// [libs/domain/profiles/src/thresholds.rs]
/*!
 * =================================================================
 * APARATO: THRESHOLD CONFIG (V14.0 - DECISION STRATA)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: UMBRALES DE SIMILITUD POR TIPO DE PERFIL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DEFAULT ZERO: Todo tipo sin umbral explícito decide con 0.0;
 *    la ausencia jamás es un fallo.
 * 2. RANGE SEAL: Todo umbral vive en [0,1]; valores fuera del
 *    intervalo se rechazan en el parseo, no en el hot-path.
 * 3. LOCALITY BOUND: Transporta la cota superior U del mapeo de
 *    distancia TLSH → similitud (por defecto 150).
 * =================================================================
 */

use crate::errors::ProfileError;
use crate::model::ProfileKind;
use std::collections::BTreeMap;

/// Cota superior por defecto del mapeo distancia → similitud.
pub const DEFAULT_LOCALITY_DISTANCE_BOUND: f64 = 150.0;

/// Mapa de umbrales de decisión por tipo de perfil.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    /// Umbrales explícitos por tipo (ausencia ⇒ 0.0).
    per_kind: BTreeMap<ProfileKind, f64>,
    /// Cota superior U del mapeo de distancia de localidad.
    locality_distance_bound: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            per_kind: BTreeMap::new(),
            locality_distance_bound: DEFAULT_LOCALITY_DISTANCE_BOUND,
        }
    }
}

impl ThresholdConfig {
    /// Configuración vacía: todo tipo decide con umbral 0.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /**
     * Fija el umbral de un tipo de perfil.
     *
     * # Errors:
     * `IllegalThreshold` si el valor es no-finito o sale de [0,1].
     */
    pub fn set(&mut self, kind: ProfileKind, threshold: f64) -> Result<(), ProfileError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ProfileError::IllegalThreshold {
                name: kind.symbolic_name().to_string(),
                value: threshold,
            });
        }
        self.per_kind.insert(kind, threshold);
        Ok(())
    }

    /// Umbral vigente de un tipo (0.0 por defecto).
    #[must_use]
    pub fn threshold_for(&self, kind: ProfileKind) -> f64 {
        self.per_kind.get(&kind).copied().unwrap_or(0.0)
    }

    /// Cota superior U del mapeo distancia → similitud.
    #[must_use]
    pub fn locality_distance_bound(&self) -> f64 {
        self.locality_distance_bound
    }

    /// Fija la cota superior U (debe ser positiva y finita).
    pub fn set_locality_distance_bound(&mut self, bound: f64) -> Result<(), ProfileError> {
        if !bound.is_finite() || bound <= 0.0 {
            return Err(ProfileError::IllegalThreshold {
                name: "locality-distance-bound".to_string(),
                value: bound,
            });
        }
        self.locality_distance_bound = bound;
        Ok(())
    }

    /**
     * Construye la configuración desde el mapa nominal de un archivo
     * de definición de perfil ({nombre simbólico → decimal}).
     *
     * # Errors:
     * `UnknownProfileKind` ante nombres no registrados;
     * `IllegalThreshold` ante valores fuera de [0,1].
     */
    pub fn from_named_map(named: &BTreeMap<String, f64>) -> Result<Self, ProfileError> {
        let mut config = Self::new();
        for (symbolic_name, threshold) in named {
            let kind = ProfileKind::from_symbolic_name(symbolic_name)?;
            config.set(kind, *threshold)?;
        }
        Ok(config)
    }

    /// Vista nominal del mapa (eco en el reporte JSON del benchmark).
    #[must_use]
    pub fn to_named_map(&self) -> BTreeMap<String, f64> {
        self.per_kind
            .iter()
            .map(|(kind, threshold)| (kind.symbolic_name().to_string(), *threshold))
            .collect()
    }
}
