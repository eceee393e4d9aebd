//! `orq`: sesión interactiva sobre un orquestador de predicciones.
//!
//! Uso: `orq [--perfil <P>] [--debounce-ms <N>] [--url <URL>] [--sin-auto]`
//! Los argumentos prevalecen sobre las variables `ORQ_*`.
mod command;

use std::time::Duration;

use command::{parse_command, Command, HELP};
use orq_core::{PredictionOrchestrator, PredictionProfile};
use orquiflow_rust::bootstrap::orchestrator_builder;
use orquiflow_rust::logging::init_logging;
use orquiflow_rust::{AppConfig, CoreError};
use tokio::io::{AsyncBufReadExt, BufReader};

fn apply_args(cfg: &mut AppConfig, args: &[String]) -> Result<(), CoreError> {
    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--perfil", Some(v)) => {
                let profile = v.parse::<PredictionProfile>().map_err(|e| CoreError::Config(e.to_string()))?;
                let auto = cfg.orchestrator.auto_update;
                cfg.orchestrator = orq_core::OrchestratorConfig::for_profile(profile).with_auto_update(auto);
                i += 1;
            }
            ("--debounce-ms", Some(v)) => {
                let ms = v.parse::<u64>().map_err(|_| CoreError::Config(format!("--debounce-ms inválido: {v}")))?;
                cfg.orchestrator.debounce_delay = Duration::from_millis(ms);
                i += 1;
            }
            ("--url", Some(v)) => {
                cfg.predictor.url = Some(v.clone());
                i += 1;
            }
            ("--sin-auto", _) => cfg.orchestrator.auto_update = false,
            (other, _) => return Err(CoreError::Config(format!("argumento no reconocido: {other}"))),
        }
        i += 1;
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("[orq] no serializable: {e}"),
    }
}

async fn handle(orq: &PredictionOrchestrator, cmd: Command) -> bool {
    match cmd {
        Command::Field(field, value) => orq.update_field(field, value),
        Command::Climate(update) => orq.update_condiciones_climaticas(update),
        Command::Force => {
            let outcome = orq.force_update().outcome().await;
            println!("{outcome:?}");
        }
        Command::Clear => orq.clear_form(),
        Command::State => {
            print_json(&orq.snapshot());
            print_json(&orq.validation_state());
        }
        Command::Progress => {
            let p = orq.form_progress();
            println!("{}% ({}/{})", p.percentage, p.filled_fields, p.total_fields);
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return false,
    }
    true
}

async fn run(args: &[String]) -> Result<(), CoreError> {
    let mut cfg = AppConfig::from_env()?;
    apply_args(&mut cfg, args)?;
    let orq = orchestrator_builder(&cfg)?.on_prediccion_update(|r| {
                                             println!("<< {}: {} días, confianza {}%, fecha {}",
                                                      r.tipo_prediccion.as_str(),
                                                      r.dias_estimados,
                                                      r.confianza,
                                                      r.fecha_estimada)
                                         })
                                         .on_error(|m| println!("<< error: {m}"))
                                         .build()?;
    log::info!("orq:start perfil={} debounce_ms={} auto={}",
               cfg.orchestrator.profile,
               cfg.orchestrator.debounce_delay.as_millis(),
               cfg.orchestrator.auto_update);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(cmd) => {
                if !handle(&orq, cmd).await {
                    break;
                }
            }
            Err(e) => eprintln!("[orq] {e}"),
        }
    }
    orq.teardown();
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        eprintln!("[orq] {e}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> { list.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn cli_args_override_configuration() {
        let mut cfg = AppConfig::from_lookup(|_| None).unwrap();
        apply_args(&mut cfg, &args(&["--sin-auto", "--perfil", "germinacion", "--url", "http://x"])).unwrap();
        assert_eq!(cfg.orchestrator.profile, PredictionProfile::Germinacion);
        assert_eq!(cfg.orchestrator.debounce_delay, Duration::from_millis(800));
        assert!(!cfg.orchestrator.auto_update);
        assert_eq!(cfg.predictor.url.as_deref(), Some("http://x"));

        apply_args(&mut cfg, &args(&["--debounce-ms", "50"])).unwrap();
        assert_eq!(cfg.orchestrator.debounce_delay, Duration::from_millis(50));
    }

    #[test]
    fn bad_args_are_config_errors() {
        let mut cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert!(apply_args(&mut cfg, &args(&["--debounce-ms", "x"])).is_err());
        assert!(apply_args(&mut cfg, &args(&["--verbose"])).is_err());
    }
}
