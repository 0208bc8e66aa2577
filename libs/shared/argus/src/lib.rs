// [libs/shared/argus/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ARGUS PANOPTES OBSERVER (V9.2 - GOLD MASTER)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: GESTIÓN DE TELEMETRÍA, TRAZADO Y CAPTURA DE PÁNICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL MODE: Emisión JSON plana para pipelines de auditoría CI y
 *    visualización compacta para el Arquitecto en desarrollo.
 * 2. PHOENIX SHIELD: Hook de pánico con detección de estrato y volcado
 *    forense del payload antes de la defunción del proceso.
 * 3. ZERO ABBREVIATIONS: 'fmt' -> 'formatting_layer', 'loc' ->
 *    'panic_location'.
 * 4. FILTER SOVEREIGNTY: Silencia el ruido de infraestructura para
 *    preservar la legibilidad del rastro de emparejamiento bipartito.
 *
 * # Mathematical Proof (Observability Integrity):
 * El registro estructurado garantiza que el rastro de un benchmark
 * paralelo (N_apps × N_libs tareas Rayon) se preserve íntegro incluso
 * ante la terminación abrupta de un hilo del Proving Grounds.
 * =================================================================
 */

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};
use tracing::{info, error};
use std::panic;

/// Inicializa el sistema de trazas Argus con blindaje de pánicos soberano.
///
/// # Comportamiento:
/// - Desarrollo: Logs interactivos con resaltado de color y marcas de tiempo locales.
/// - Producción: Estructura JSON plana optimizada para la ingesta en pipelines de QA.
///
/// # Panics:
/// Aborta si otro suscriptor global ya ha sido inicializado en el runtime.
pub fn init_tracing(service_nominal_identifier: &str) {
    // 1. CONFIGURACIÓN DEL FILTRO DINÁMICO (Sovereign Filter)
    // Priorizamos los logs del dominio forense y silenciamos ruidos de terceros.
    let environmental_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!(
                "{}={level},librarius_domain_strategy={level},librarius_infra_store={level}",
                service_nominal_identifier,
                level = if cfg!(debug_assertions) { "debug" } else { "info" }
            ).into()
        });

    let is_production_strata = !cfg!(debug_assertions);

    // 2. CONSTRUCCIÓN DE LA ARQUITECTURA DE SUSCRIPCIÓN (Dual Mode)
    if is_production_strata {
        // MODO ÉLITE (Producción): Emisión de tramas JSON bit-perfectas.
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    } else {
        // MODO DESARROLLO: Visualización de alta legibilidad para el Arquitecto.
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    }

    // 3. PROTOCOLO PHOENIX SHIELD (Global Panic Hook)
    // Garantiza que cualquier colapso en hilos del pool Rayon sea capturado
    // y registrado en el Panóptico antes de la defunción del proceso.
    let service_id_snapshot = service_nominal_identifier.to_string();

    panic::set_hook(Box::new(move |panic_metadata| {
        let panic_location = panic_metadata.location()
            .map(|location| format!("{}:{}:{}", location.file(), location.line(), location.column()))
            .unwrap_or_else(|| "UNKNOWN_STRATA_COORDINATES".to_string());

        let panic_payload_message = panic_metadata.payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_metadata.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("UNDEFINED_KERNEL_COLLAPSE_PAYLOAD");

        error!(
            target: "panic_monitor",
            service = %service_id_snapshot,
            estrato = %panic_location,
            "🔥 [CRITICAL_PANIC]: Thread terminated abruptly. Analysis: {}",
            panic_payload_message
        );
    }));

    info!(
        "👁️  [ARGUS_ONLINE]: Observability strata levelized for [{}]. Phoenix Shield ACTIVE.",
        service_nominal_identifier
    );
}
