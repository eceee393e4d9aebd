//! Inicialización de logs para los binarios.
//!
//! Las librerías del workspace registran con el facade `log`; el subscriber
//! de `tracing-subscriber` reenvía esos registros. El filtro se toma de
//! `RUST_LOG` y por defecto es `info`.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info";

/// Instala el subscriber global. Llamadas repetidas no tienen efecto.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::registry().with(filter)
                                                  .with(tracing_subscriber::fmt::layer().with_target(true))
                                                  .try_init()
                                                  .is_ok();
    if installed {
        log::debug!("logging:init filter_default={DEFAULT_FILTER}");
    }
}
