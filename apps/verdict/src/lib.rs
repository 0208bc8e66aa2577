// [apps/verdict/src/lib.rs]
/*!
 * =================================================================
 * APARATO: VERDICT LIBRARY HUB (V6.0 - COMPOSITION ROOT)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: EXPOSICIÓN DEL NÚCLEO DEL CLI PARA EL PROVING GROUNDS
 * =================================================================
 */

/// Bootstrap de telemetría y entorno del proceso.
pub mod bootstrap;

/// Tabla de integración: nombres simbólicos → constructores.
pub mod integration;

/// Driver de benchmark paralelo, exactitud y reporte.
pub mod bench;

/// Subcomandos del CLI (build / benchmark / inspect).
pub mod commands;

pub use integration::IntegrationTable;
