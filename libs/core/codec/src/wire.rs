// [libs/core/codec/src/wire.rs]
/*!
 * =================================================================
 * APARATO: WIRE EXTENSION TRAITS (V8.1 - LFP NORMATIVE)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: PRIMITIVAS DE FLUJO DEL FORMATO DE PERFIL LFP1
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BIG-ENDIAN SOVEREIGNTY: Todos los enteros de ancho fijo viajan en
 *    orden de red (Big-Endian) vía 'byteorder'.
 * 2. STRING DISCIPLINE: Cadenas UTF-8 sin BOM con prefijo varint de
 *    longitud; el booleano es un único octeto {0,1} y cualquier otro
 *    valor es un artefacto corrupto.
 * 3. ERGONOMIC SYNERGY: Traits de extensión sobre std::io para que los
 *    estratos superiores lean/escriban sin plomería repetida.
 * =================================================================
 */

use crate::errors::CodecError;
use crate::varint::{read_varint, write_varint};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Tope de seguridad para prefijos de longitud (prevención de alocación hostil).
const MAXIMUM_LENGTH_PREFIX: u64 = 64 * 1024 * 1024;

/// Extensión de escritura con las primitivas del formato LFP1.
pub trait WireWrite: Write {
    /// Emite un entero como varint ULEB128.
    fn write_varint_value(&mut self, value: u64) -> Result<(), CodecError> {
        write_varint(self, value)?;
        Ok(())
    }

    /// Emite una cadena UTF-8 con prefijo varint de longitud.
    fn write_wire_string(&mut self, text: &str) -> Result<(), CodecError> {
        write_varint(self, text.len() as u64)?;
        self.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Emite un booleano como octeto único {0,1}.
    fn write_wire_bool(&mut self, flag: bool) -> Result<(), CodecError> {
        self.write_u8(u8::from(flag))?;
        Ok(())
    }

    /// Emite un u16 en orden de red.
    fn write_wire_u16(&mut self, value: u16) -> Result<(), CodecError> {
        self.write_u16::<BigEndian>(value)?;
        Ok(())
    }

    /// Emite un u32 en orden de red.
    fn write_wire_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.write_u32::<BigEndian>(value)?;
        Ok(())
    }

    /// Emite un u64 en orden de red (palabras Bloom).
    fn write_wire_u64(&mut self, value: u64) -> Result<(), CodecError> {
        self.write_u64::<BigEndian>(value)?;
        Ok(())
    }

    /// Emite una lista de índices u32: conteo varint + entradas de ancho fijo.
    fn write_wire_u32_list(&mut self, entries: &[u32]) -> Result<(), CodecError> {
        write_varint(self, entries.len() as u64)?;
        for entry in entries {
            self.write_u32::<BigEndian>(*entry)?;
        }
        Ok(())
    }
}

/// Extensión de lectura con las primitivas del formato LFP1.
pub trait WireRead: Read {
    /// Decodifica un varint ULEB128.
    fn read_varint_value(&mut self) -> Result<u64, CodecError> {
        read_varint(self)
    }

    /// Decodifica un varint acotado a usize con tope anti-alocación-hostil.
    fn read_wire_count(&mut self) -> Result<usize, CodecError> {
        let raw_count = read_varint(self)?;
        if raw_count > MAXIMUM_LENGTH_PREFIX {
            return Err(CodecError::malformed(format!(
                "prefijo de longitud hostil: {raw_count} excede el tope de {MAXIMUM_LENGTH_PREFIX}"
            )));
        }
        Ok(raw_count as usize)
    }

    /// Decodifica una cadena UTF-8 con prefijo varint de longitud.
    fn read_wire_string(&mut self) -> Result<String, CodecError> {
        let byte_length = self.read_wire_count()?;
        let mut raw_bytes = vec![0u8; byte_length];
        self.read_exact(&mut raw_bytes)?;
        Ok(String::from_utf8(raw_bytes)?)
    }

    /// Decodifica un booleano estricto: cualquier octeto fuera de {0,1} es corrupción.
    fn read_wire_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            illegal_octet => Err(CodecError::malformed(format!(
                "octeto booleano ilegal: 0x{illegal_octet:02X}"
            ))),
        }
    }

    /// Decodifica un u16 en orden de red.
    fn read_wire_u16(&mut self) -> Result<u16, CodecError> {
        Ok(self.read_u16::<BigEndian>()?)
    }

    /// Decodifica un u32 en orden de red.
    fn read_wire_u32(&mut self) -> Result<u32, CodecError> {
        Ok(self.read_u32::<BigEndian>()?)
    }

    /// Decodifica un u64 en orden de red.
    fn read_wire_u64(&mut self) -> Result<u64, CodecError> {
        Ok(self.read_u64::<BigEndian>()?)
    }

    /// Decodifica una lista de índices u32 emitida por `write_wire_u32_list`.
    fn read_wire_u32_list(&mut self) -> Result<Vec<u32>, CodecError> {
        let entry_count = self.read_wire_count()?;
        let mut entries = Vec::with_capacity(entry_count.min(4096));
        for _ in 0..entry_count {
            entries.push(self.read_u32::<BigEndian>()?);
        }
        Ok(entries)
    }
}

impl<W: Write + ?Sized> WireWrite for W {}
impl<R: Read + ?Sized> WireRead for R {}
