//! Configuración central de la aplicación.
//! Carga `.env` una sola vez y construye `AppConfig` a partir de variables de
//! entorno. Las variables ausentes caen a los valores del perfil; las mal
//! formadas producen `CoreError::Config`.
//!
//! | Variable                   | Efecto                                   |
//! |----------------------------|------------------------------------------|
//! | `ORQ_PERFIL`               | polinizacion, germinacion o progresiva   |
//! | `ORQ_DEBOUNCE_MS`          | retraso de debounce en milisegundos      |
//! | `ORQ_AUTO_UPDATE`          | true/false, 1/0, si/no                   |
//! | `ORQ_PREDICTOR_URL`        | base del servicio HTTP; sin ella, mock   |
//! | `ORQ_PREDICTOR_TIMEOUT_MS` | timeout por petición HTTP                |
use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;
use orq_core::{OrchestratorConfig, PredictionProfile};

use crate::errors::CoreError;

pub const DEFAULT_PREDICTOR_TIMEOUT: Duration = Duration::from_millis(10_000);

static DOTENV: Lazy<()> = Lazy::new(|| {
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("config:dotenv path={}", path.display());
    }
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub orchestrator: OrchestratorConfig,
    pub predictor: PredictorConfig,
}

/// Parámetros del servicio remoto de predicción.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Sin URL se usa el proveedor simulado.
    pub url: Option<String>,
    pub timeout: Duration,
}

impl Default for PredictorConfig {
    fn default() -> Self { Self { url: None, timeout: DEFAULT_PREDICTOR_TIMEOUT } }
}

impl AppConfig {
    /// Lee el entorno del proceso (previa carga de `.env`).
    pub fn from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let profile = match var("ORQ_PERFIL") {
            Some(raw) => raw.parse::<PredictionProfile>()
                            .map_err(|_| CoreError::Config(format!("ORQ_PERFIL inválido: {raw}")))?,
            None => PredictionProfile::Polinizacion,
        };
        let mut orchestrator = OrchestratorConfig::for_profile(profile);
        if let Some(raw) = var("ORQ_DEBOUNCE_MS") {
            orchestrator.debounce_delay = parse_millis("ORQ_DEBOUNCE_MS", &raw)?;
        }
        if let Some(raw) = var("ORQ_AUTO_UPDATE") {
            orchestrator.auto_update = parse_bool("ORQ_AUTO_UPDATE", &raw)?;
        }

        let mut predictor = PredictorConfig { url: var("ORQ_PREDICTOR_URL"), ..Default::default() };
        if let Some(raw) = var("ORQ_PREDICTOR_TIMEOUT_MS") {
            predictor.timeout = parse_millis("ORQ_PREDICTOR_TIMEOUT_MS", &raw)?;
        }
        Ok(Self { orchestrator, predictor })
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, CoreError> {
    raw.parse::<u64>()
       .map(Duration::from_millis)
       .map_err(|_| CoreError::Config(format!("{key} debe ser un entero de milisegundos: {raw}")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, CoreError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "si" | "sí" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CoreError::Config(format!("{key} debe ser booleano: {raw}"))),
    }
}
