// [apps/verdict/src/commands/mod.rs]
/*!
 * =================================================================
 * APARATO: COMMAND MODULE HUB (V6.0 - CLI SURFACE)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: EXPOSICIÓN DE LOS SUBCOMANDOS DEL VEREDICTO
 * =================================================================
 */

/// Construcción de perfiles de aplicación y librería.
pub mod build;

/// Benchmark paralelo con reporte JSON y barrido ROC.
pub mod benchmark;

/// Inspección de rutas resueltas y verdad de terreno.
pub mod inspect;
