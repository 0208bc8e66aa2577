// [libs/domain/profiles/src/payload.rs]
/*!
 * =================================================================
 * APARATO: FEATURE PAYLOAD STORE (V14.2 - BLUEPRINT SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: ALMACÉN ABIERTO DE PAYLOADS POR SUB-PERFIL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TAGGED VARIANTS: El conjunto de payloads es un enum cerrado
 *    (Bloom, Rodante, Localidad, Hash32, Peso); la extensibilidad vive
 *    en las llaves declaradas por el blueprint, no en jerarquías.
 * 2. BLUEPRINT DISCIPLINE: El orden de escritura es el orden del
 *    blueprint; el conjunto de llaves cristalizadas es EXACTAMENTE el
 *    conjunto declarado activo. Llave ausente = fallo; llave
 *    desconocida en lectura = FormatMismatch.
 * 3. GEOMETRY INJECTION: El blueprint transporta la geometría Bloom
 *    para que la hidratación reconstruya matrices bit-idénticas.
 * =================================================================
 */

use crate::errors::ProfileError;
use librarius_core_codec::{WireRead, WireWrite};
use librarius_core_probabilistic::bloom::{DEFAULT_BIT_CAPACITY, DEFAULT_DERIVATION_COUNT};
use librarius_core_probabilistic::{BloomFilter, Djb2Hash, RollingHashSet, TlshDigest};
use std::io::{Read, Write};

/// Llave canónica del payload de peso entero (emparejamiento multi-fase).
pub const WEIGHT_PAYLOAD_KEY: &str = "wgt";

/// Discriminantes de payload en el flujo binario.
const TAG_BLOOM: u8 = 1;
const TAG_ROLLING: u8 = 2;
const TAG_LOCALITY: u8 = 3;
const TAG_HASH32: u8 = 4;
const TAG_WEIGHT: u8 = 5;

/// Clase de payload declarable por un blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Matriz de Bloom con geometría fija (m, k).
    Bloom {
        /// Cantidad de bits m.
        bit_capacity: u16,
        /// Cantidad de derivaciones k.
        derivation_count: u8,
    },
    /// Conjunto de hash rodante.
    Rolling,
    /// Digesto de localidad opcional (centinela "no hash" legal).
    Locality,
    /// Digesto djb2 de 32 bits.
    Hash32,
    /// Peso entero sin signo.
    Weight,
}

impl PayloadKind {
    /// Matriz de Bloom con la geometría canónica (256, 4).
    #[must_use]
    pub const fn standard_bloom() -> Self {
        Self::Bloom {
            bit_capacity: DEFAULT_BIT_CAPACITY,
            derivation_count: DEFAULT_DERIVATION_COUNT,
        }
    }

    /// Discriminante de flujo del payload.
    #[must_use]
    fn wire_tag(self) -> u8 {
        match self {
            Self::Bloom { .. } => TAG_BLOOM,
            Self::Rolling => TAG_ROLLING,
            Self::Locality => TAG_LOCALITY,
            Self::Hash32 => TAG_HASH32,
            Self::Weight => TAG_WEIGHT,
        }
    }

    /// Construye el valor vacío/neutro de la clase (hidratación perezosa).
    pub fn empty_value(self) -> Result<FeaturePayload, ProfileError> {
        Ok(match self {
            Self::Bloom { bit_capacity, derivation_count } => {
                FeaturePayload::Bloom(BloomFilter::with_geometry(bit_capacity, derivation_count)?)
            }
            Self::Rolling => FeaturePayload::Rolling(RollingHashSet::new()),
            Self::Locality => FeaturePayload::Locality(None),
            Self::Hash32 => FeaturePayload::Hash32(Djb2Hash::from_raw(0)),
            Self::Weight => FeaturePayload::Weight(0),
        })
    }
}

/// Valor de característica adjunto a un sub-perfil.
#[derive(Debug, Clone, PartialEq)]
pub enum FeaturePayload {
    /// Huella probabilística de descriptores.
    Bloom(BloomFilter),
    /// Huellas rodantes de secuencias normalizadas.
    Rolling(RollingHashSet),
    /// Digesto de localidad del cuerpo (None = "no hash").
    Locality(Option<TlshDigest>),
    /// Digesto djb2 del documento textual.
    Hash32(Djb2Hash),
    /// Peso entero para agregación ponderada.
    Weight(u64),
}

impl FeaturePayload {
    /// Clase del payload (con la geometría real en el caso Bloom).
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Bloom(filter) => {
                let (bit_capacity, derivation_count) = filter.geometry();
                PayloadKind::Bloom { bit_capacity, derivation_count }
            }
            Self::Rolling(_) => PayloadKind::Rolling,
            Self::Locality(_) => PayloadKind::Locality,
            Self::Hash32(_) => PayloadKind::Hash32,
            Self::Weight(_) => PayloadKind::Weight,
        }
    }

    /// Cristaliza el valor (sin llave ni discriminante).
    fn encode_value_into<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), ProfileError> {
        match self {
            Self::Bloom(filter) => filter.encode_into(sink)?,
            Self::Rolling(set) => set.encode_into(sink)?,
            Self::Locality(digest) => TlshDigest::encode_option_into(digest.as_ref(), sink)?,
            Self::Hash32(digest) => sink.write_wire_u32(digest.value())?,
            Self::Weight(weight) => sink.write_varint_value(*weight)?,
        }
        Ok(())
    }

    /// Hidrata el valor de la clase indicada (sin llave ni discriminante).
    fn decode_value_from<R: Read + ?Sized>(kind: PayloadKind, source: &mut R) -> Result<Self, ProfileError> {
        Ok(match kind {
            PayloadKind::Bloom { bit_capacity, derivation_count } => {
                Self::Bloom(BloomFilter::decode_from(source, bit_capacity, derivation_count)?)
            }
            PayloadKind::Rolling => Self::Rolling(RollingHashSet::decode_from(source)?),
            PayloadKind::Locality => Self::Locality(TlshDigest::decode_option_from(source)?),
            PayloadKind::Hash32 => Self::Hash32(Djb2Hash::from_raw(source.read_wire_u32()?)),
            PayloadKind::Weight => Self::Weight(source.read_varint_value()?),
        })
    }
}

/// Declaración ordenada (llave → clase) del payload de un sub-perfil.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadBlueprint {
    entries: Vec<(String, PayloadKind)>,
}

impl PayloadBlueprint {
    /// Blueprint vacío (sub-perfiles sin payload).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declara una llave al final del orden de escritura.
    #[must_use]
    pub fn declare(mut self, key: &str, kind: PayloadKind) -> Self {
        debug_assert!(key.is_ascii(), "las llaves de payload son ASCII cortas");
        self.entries.push((key.to_string(), kind));
        self
    }

    /// Entradas declaradas en orden de escritura.
    pub fn entries(&self) -> impl Iterator<Item = (&str, PayloadKind)> + '_ {
        self.entries.iter().map(|(key, kind)| (key.as_str(), *kind))
    }

    /// Cantidad de llaves declaradas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Verdadero cuando no hay llaves declaradas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Almacén de payloads de un sub-perfil (orden de inserción).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadStore {
    slots: Vec<(String, FeaturePayload)>,
}

impl PayloadStore {
    /// Almacén vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra o reemplaza el payload de una llave.
    pub fn put(&mut self, key: &str, value: FeaturePayload) {
        if let Some(slot) = self.slots.iter_mut().find(|(slot_key, _)| slot_key == key) {
            slot.1 = value;
            return;
        }
        self.slots.push((key.to_string(), value));
    }

    /// Consulta el payload de una llave.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FeaturePayload> {
        self.slots
            .iter()
            .find(|(slot_key, _)| slot_key == key)
            .map(|(_, value)| value)
    }

    /// Consulta mutable del payload de una llave.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FeaturePayload> {
        self.slots
            .iter_mut()
            .find(|(slot_key, _)| slot_key == key)
            .map(|(_, value)| value)
    }

    /// Consulta estricta: la ausencia de una llave declarada es un fallo.
    pub fn get_required(&self, key: &str) -> Result<&FeaturePayload, ProfileError> {
        self.get(key).ok_or_else(|| ProfileError::MissingPayload { key: key.to_string() })
    }

    /// Cantidad de payloads registrados.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Verdadero cuando el almacén está vacío.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /**
     * Cristaliza el almacén bajo la disciplina del blueprint.
     *
     * # Wire (por llave declarada, en orden de blueprint):
     * `llave | u8 discriminante | valor`.
     *
     * # Errors:
     * `MissingPayload` si una llave declarada no fue poblada;
     * `FormatMismatch` si el valor poblado no es de la clase declarada.
     */
    pub fn encode_into<W: Write + ?Sized>(
        &self,
        blueprint: &PayloadBlueprint,
        sink: &mut W,
    ) -> Result<(), ProfileError> {
        for (declared_key, declared_kind) in blueprint.entries() {
            let payload = self.get_required(declared_key)?;
            if payload.kind() != declared_kind {
                return Err(ProfileError::format_mismatch(format!(
                    "payload '{declared_key}' poblado con clase {:?}, blueprint exige {:?}",
                    payload.kind(),
                    declared_kind
                )));
            }
            sink.write_wire_string(declared_key)?;
            sink.write_all(&[declared_kind.wire_tag()])
                .map_err(librarius_core_codec::CodecError::from)?;
            payload.encode_value_into(sink)?;
        }
        Ok(())
    }

    /**
     * Hidrata un almacén bajo la disciplina del blueprint.
     *
     * # Errors:
     * `FormatMismatch` ante llaves desconocidas, fuera de orden o con
     * discriminante desalineado. El lector jamás omite secciones.
     */
    pub fn decode_from<R: Read + ?Sized>(
        blueprint: &PayloadBlueprint,
        source: &mut R,
    ) -> Result<Self, ProfileError> {
        let mut store = Self::new();
        for (declared_key, declared_kind) in blueprint.entries() {
            let observed_key = source.read_wire_string()?;
            if observed_key != declared_key {
                return Err(ProfileError::format_mismatch(format!(
                    "llave de payload desconocida o fuera de orden: '{observed_key}' (esperada: '{declared_key}')"
                )));
            }

            let mut tag_octet = [0u8; 1];
            source
                .read_exact(&mut tag_octet)
                .map_err(librarius_core_codec::CodecError::from)?;
            if tag_octet[0] != declared_kind.wire_tag() {
                return Err(ProfileError::format_mismatch(format!(
                    "discriminante de payload desalineado para '{declared_key}': 0x{:02X}",
                    tag_octet[0]
                )));
            }

            let value = FeaturePayload::decode_value_from(declared_kind, source)?;
            store.put(declared_key, value);
        }
        Ok(store)
    }
}
