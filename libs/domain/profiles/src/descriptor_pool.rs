// [libs/domain/profiles/src/descriptor_pool.rs]
/*!
 * =================================================================
 * APARATO: DESCRIPTOR POOL (V14.1 - INTERNING SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: TABLA DE CADENAS DEDUPLICADA CON CONTEO DE USO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. INDEX STABILITY: Los índices son estables durante toda la vida
 *    del perfil; toda referencia cruzada entre sub-perfiles viaja como
 *    índice entero, jamás como puntero.
 * 2. HANDLE EQUALITY: La igualdad de descriptores es igualdad de
 *    índice dentro del mismo pool (manejadores internados); la
 *    comparación entre pools distintos resuelve vía cadena.
 * 3. O(1) LOOKUP: Mapa auxiliar cadena→índice para inserción
 *    idempotente de latencia constante.
 * 4. NO DELETION: El pool es append-only; el conteo de referencias
 *    audita el uso sin habilitar borrados.
 * =================================================================
 */

use crate::errors::ProfileError;
use librarius_core_codec::{WireRead, WireWrite};
use std::collections::HashMap;
use std::io::{Read, Write};

/// Manejador internado de un descriptor (igualdad por índice).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Descriptor(u32);

impl Descriptor {
    /// Índice del descriptor dentro de su pool.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Reconstruye un manejador desde un índice crudo (hidratación).
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }
}

/// Registro interno del pool: cadena internada + conteo de referencias.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PoolRecord {
    pooled_text: String,
    reference_count: u64,
}

/// Tabla de cadenas deduplicada en orden de inserción.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorPool {
    /// Registros en orden de inserción (índice = posición).
    records: Vec<PoolRecord>,
    /// Mapa auxiliar para inserción idempotente O(1).
    index_by_text: HashMap<String, u32>,
}

impl DescriptorPool {
    /// Construye un pool vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /**
     * Interna una cadena de forma idempotente.
     *
     * # Logic:
     * Una cadena ya internada retorna su manejador original y aumenta
     * su conteo de referencias; una cadena nueva se registra al final
     * con conteo inicial 1.
     */
    pub fn add(&mut self, text: &str) -> Descriptor {
        if let Some(existing_index) = self.index_by_text.get(text) {
            self.records[*existing_index as usize].reference_count += 1;
            return Descriptor(*existing_index);
        }

        let assigned_index = self.records.len() as u32;
        self.records.push(PoolRecord {
            pooled_text: text.to_string(),
            reference_count: 1,
        });
        self.index_by_text.insert(text.to_string(), assigned_index);
        Descriptor(assigned_index)
    }

    /// Resuelve un manejador a su cadena internada.
    #[must_use]
    pub fn get(&self, descriptor: Descriptor) -> Option<&str> {
        self.records
            .get(descriptor.index() as usize)
            .map(|record| record.pooled_text.as_str())
    }

    /// Resolución estricta: índice fuera de rango es un fallo de modelo.
    pub fn resolve(&self, descriptor: Descriptor) -> Result<&str, ProfileError> {
        self.get(descriptor).ok_or(ProfileError::DescriptorOutOfRange {
            index: descriptor.index(),
            pool_size: self.records.len(),
        })
    }

    /// Conteo de referencias de un manejador (0 si está fuera de rango).
    #[must_use]
    pub fn reference_count(&self, descriptor: Descriptor) -> u64 {
        self.records
            .get(descriptor.index() as usize)
            .map_or(0, |record| record.reference_count)
    }

    /// Busca el manejador de una cadena ya internada.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<Descriptor> {
        self.index_by_text.get(text).copied().map(Descriptor)
    }

    /// Cantidad de cadenas internadas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Verdadero cuando el pool no interna cadena alguna.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /**
     * Cristaliza el pool en el flujo.
     *
     * # Wire:
     * `varint n | n × (varint refCount | varint len | UTF-8 bytes)`.
     */
    pub fn encode_into<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), ProfileError> {
        sink.write_varint_value(self.records.len() as u64)?;
        for record in &self.records {
            sink.write_varint_value(record.reference_count)?;
            sink.write_wire_string(&record.pooled_text)?;
        }
        Ok(())
    }

    /// Hidrata un pool desde el flujo normativo.
    pub fn decode_from<R: Read + ?Sized>(source: &mut R) -> Result<Self, ProfileError> {
        let record_count = source.read_wire_count()?;
        let mut pool = Self::new();
        for _ in 0..record_count {
            let reference_count = source.read_varint_value()?;
            let pooled_text = source.read_wire_string()?;

            let assigned_index = pool.records.len() as u32;
            pool.index_by_text.insert(pooled_text.clone(), assigned_index);
            pool.records.push(PoolRecord { pooled_text, reference_count });
        }
        Ok(pool)
    }
}
