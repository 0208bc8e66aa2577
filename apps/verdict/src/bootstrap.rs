// [apps/verdict/src/bootstrap.rs]
/*!
 * =================================================================
 * APARATO: PROCESS BOOTSTRAP (V6.0 - IGNITION SEQUENCE)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: ENCENDIDO DE TELEMETRÍA Y ENTORNO DEL PROCESO
 * =================================================================
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Enciende el entorno (.env) y la telemetría Argus del proceso.
pub fn ignite(service_nominal_identifier: &str) {
    dotenvy::dotenv().ok();
    librarius_shared_argus::init_tracing(service_nominal_identifier);
}

/**
 * Instala el token de cancelación cooperativa enlazado a Ctrl-C.
 *
 * Las tareas pendientes del benchmark consultan el token entre
 * librerías y abortan con estado Cancelled; las tareas en vuelo
 * corren hasta completarse.
 */
pub fn install_cancel_token() -> Arc<AtomicBool> {
    let cancel_token = Arc::new(AtomicBool::new(false));
    let handler_token = cancel_token.clone();
    let handler_verdict = ctrlc::set_handler(move || {
        info!("🛑 [CANCEL_SIGNAL]: Operator interrupt received; draining in-flight tasks.");
        handler_token.store(true, Ordering::SeqCst);
    });
    if handler_verdict.is_err() {
        // Un segundo registro del handler (tests) no invalida el token.
        info!("⚠️ [CANCEL_SIGNAL]: Handler already installed; token remains operational.");
    }
    cancel_token
}
