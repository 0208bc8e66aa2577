// [apps/verdict/src/main.rs]
/**
 * =================================================================
 * APARATO: VERDICT SHELL (V6.0 - SOBERANO)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: ORQUESTACIÓN DE ARGUMENTOS Y CÓDIGOS DE SALIDA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. EXIT DISCIPLINE: 0 ok | 1 argumentos/configuración | 2 fallo de
 *    I/O | 3 desajuste de formato. El triaje desciende la cadena de
 *    causas de anyhow hasta el fallo raíz.
 * 2. LIBRARY SYNERGY: El binario es un orquestador puro; la lógica
 *    vive en 'librarius_verdict_lib' para su auditoría en el Proving
 *    Grounds.
 * 3. CANCEL WIRING: Ctrl-C puebla el token cooperativo del driver;
 *    las tareas en vuelo corren hasta completarse.
 * =================================================================
 */

use anyhow::Result;
use clap::{Parser, Subcommand};
use librarius_verdict_lib::bootstrap;
use librarius_verdict_lib::commands::{benchmark, build, inspect};
use std::path::PathBuf;
use tracing::{error, info};

/// Configuración de argumentos del auditor forense de librerías.
#[derive(Parser, Debug)]
#[command(
    name = "verdict",
    author = "Raz Podesta <metaShark Tech>",
    version = "0.6.0",
    about = "El Veredicto: identificación forense de librerías de terceros en bundles compilados."
)]
struct CommandArguments {
    #[command(subcommand)]
    command: VerdictCommand,
}

#[derive(Subcommand, Debug)]
enum VerdictCommand {
    /// Construye perfiles de aplicación o de librería (-* = todas).
    Build {
        /// Ruta de la definición de perfil (JSON).
        #[arg(long = "profile", value_name = "DEFINITION")]
        profile_definition: PathBuf,
        /// Ruta de la configuración del dataset (key=value).
        #[arg(long = "dataset", value_name = "CONF")]
        dataset_config: PathBuf,
        /// Aplicación objetivo, o "-*" para el roster de librerías.
        #[arg(value_name = "TARGET", allow_hyphen_values = true)]
        target: String,
    },
    /// Ejecuta el benchmark de una aplicación contra el roster.
    Benchmark {
        /// Ruta de la configuración del dataset (key=value).
        #[arg(long = "dataset", value_name = "CONF")]
        dataset_config: PathBuf,
        /// Ruta de la definición de perfil (JSON).
        #[arg(long = "profile", value_name = "DEFINITION")]
        profile_definition: PathBuf,
        /// Nombre corto de la aplicación bajo auditoría.
        #[arg(long = "app", value_name = "APP")]
        app_short_name: String,
        /// Ruta del reporte JSON de salida.
        #[arg(long = "output", value_name = "JSON")]
        output_path: Option<PathBuf>,
        /// Ruta de la exportación CSV del barrido ROC.
        #[arg(long = "csv", value_name = "CSV")]
        csv_path: Option<PathBuf>,
        /// Umbrales del barrido ROC.
        #[arg(short = 'r', long = "roc", value_name = "T", num_args = 1..)]
        roc_thresholds: Vec<f64>,
        /// Recarga los perfiles de librería por aplicación (sin caché).
        #[arg(long = "no-cache")]
        no_cache: bool,
        /// Casos de librería a evaluar ("-*" o vacío = roster completo).
        #[arg(value_name = "CASES", allow_hyphen_values = true)]
        cases: Vec<String>,
    },
    /// Imprime rutas resueltas y verdad de terreno de una aplicación.
    Inspect {
        /// Ruta de la configuración del dataset (key=value).
        #[arg(long = "dataset", value_name = "CONF")]
        dataset_config: PathBuf,
        /// Nombre corto de la aplicación.
        #[arg(value_name = "APP")]
        app_short_name: String,
    },
}

/// Triaje de la cadena de causas hacia el código de salida normativo.
fn classify_exit_code(fault: &anyhow::Error) -> i32 {
    use librarius_domain_profiles::ProfileError;
    use librarius_infra_store::StoreError;

    for cause in fault.chain() {
        if let Some(store_fault) = cause.downcast_ref::<StoreError>() {
            return match store_fault {
                StoreError::Io(_) => 2,
                StoreError::FormatMismatch { .. } => 3,
                StoreError::Profile(ProfileError::FormatMismatch { .. }) => 3,
                StoreError::Codec(_) => 3,
                StoreError::MalformedDefinition(_) => 1,
                StoreError::ConfigError { .. } => 1,
                StoreError::UnknownApp { .. } => 1,
                StoreError::Profile(_) => 3,
            };
        }
        if let Some(bytecode_fault) =
            cause.downcast_ref::<librarius_domain_bytecode::BytecodeError>()
        {
            return match bytecode_fault {
                librarius_domain_bytecode::BytecodeError::Io(_) => 2,
                _ => 3,
            };
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return 2;
        }
    }
    1
}

fn dispatch(arguments: CommandArguments) -> Result<()> {
    match arguments.command {
        VerdictCommand::Build { profile_definition, dataset_config, target } => {
            build::execute(&profile_definition, &dataset_config, &target)
        }
        VerdictCommand::Benchmark {
            dataset_config,
            profile_definition,
            app_short_name,
            output_path,
            csv_path,
            roc_thresholds,
            no_cache,
            cases,
        } => {
            let cancel_token = bootstrap::install_cancel_token();
            let invocation = benchmark::invocation_from_cli(
                &dataset_config,
                &profile_definition,
                &app_short_name,
                output_path,
                csv_path,
                roc_thresholds,
                cases,
                !no_cache,
            );
            benchmark::execute(&invocation, cancel_token)
        }
        VerdictCommand::Inspect { dataset_config, app_short_name } => {
            inspect::execute(&dataset_config, &app_short_name)
        }
    }
}

/**
 * Punto de ignición del binario ejecutable.
 */
fn main() {
    bootstrap::ignite("verdict");

    // 1. PARSEO DE DIRECTIVAS DE MANDO (argumentos ilegales ⟹ 1)
    let arguments = match CommandArguments::try_parse() {
        Ok(parsed) => parsed,
        Err(parse_fault) => {
            let _ = parse_fault.print();
            std::process::exit(1);
        }
    };

    info!("🚀 [IGNITION]: Verdict shell V6.0 engaged.");

    // 2. DESPACHO Y TRIAJE DE SALIDA
    match dispatch(arguments) {
        Ok(()) => std::process::exit(0),
        Err(fault) => {
            error!("❌ [RUN_FAULT]: {:#}", fault);
            std::process::exit(classify_exit_code(&fault));
        }
    }
}
