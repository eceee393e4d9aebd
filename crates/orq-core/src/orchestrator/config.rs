//! Configuración de una instancia del orquestador.
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DEBOUNCE_GERMINACION, DEFAULT_DEBOUNCE_POLINIZACION, DEFAULT_DEBOUNCE_PROGRESIVA,
                       TIPOS_GERMINACION, TIPOS_POLINIZACION};
use crate::errors::OrchestratorError;
use crate::validation::ValidationEngine;

/// Variante de formulario. Aporta el retraso de debounce por defecto y la
/// enumeración de tipos que acepta la validación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionProfile {
    /// Widget de predicción de maduración tras la polinización.
    Polinizacion,
    /// Widget de predicción de germinación.
    Germinacion,
    /// Formulario progresivo multi-campo.
    Progresiva,
}

impl PredictionProfile {
    pub fn default_debounce(&self) -> Duration {
        match self {
            PredictionProfile::Polinizacion => DEFAULT_DEBOUNCE_POLINIZACION,
            PredictionProfile::Germinacion => DEFAULT_DEBOUNCE_GERMINACION,
            PredictionProfile::Progresiva => DEFAULT_DEBOUNCE_PROGRESIVA,
        }
    }

    pub fn tipos(&self) -> &'static [&'static str] {
        match self {
            PredictionProfile::Polinizacion | PredictionProfile::Progresiva => &TIPOS_POLINIZACION,
            PredictionProfile::Germinacion => &TIPOS_GERMINACION,
        }
    }

    pub fn validation_engine(&self) -> ValidationEngine {
        ValidationEngine::new(self.tipos().iter().copied())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionProfile::Polinizacion => "polinizacion",
            PredictionProfile::Germinacion => "germinacion",
            PredictionProfile::Progresiva => "progresiva",
        }
    }
}

impl fmt::Display for PredictionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for PredictionProfile {
    type Err = OrchestratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polinizacion" | "polinización" => Ok(PredictionProfile::Polinizacion),
            "germinacion" | "germinación" => Ok(PredictionProfile::Germinacion),
            "progresiva" => Ok(PredictionProfile::Progresiva),
            other => Err(OrchestratorError::UnknownProfile(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub profile: PredictionProfile,
    pub debounce_delay: Duration,
    /// Si es `false`, las mutaciones nunca arman el temporizador y sólo
    /// `force_update` dispara llamadas.
    pub auto_update: bool,
}

impl OrchestratorConfig {
    pub fn for_profile(profile: PredictionProfile) -> Self {
        Self { profile, debounce_delay: profile.default_debounce(), auto_update: true }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    pub fn with_auto_update(mut self, auto_update: bool) -> Self {
        self.auto_update = auto_update;
        self
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self { Self::for_profile(PredictionProfile::Polinizacion) }
}
