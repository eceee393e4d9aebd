//! Interpretación de las líneas de la sesión interactiva.
use orq_domain::{ClimateUpdate, FormField, Medida, Temperatura};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Field(FormField, String),
    Climate(ClimateUpdate),
    Force,
    Clear,
    State,
    Progress,
    Help,
    Quit,
}

pub const HELP: &str = "\
comandos:
  campo=valor                    especie, genero, clima, ubicacion, fechaPolinizacion, tipoPolinizacion
  clima.temperatura.<sub>=valor  sub: promedio, minima, maxima
  clima.<clave>=valor            clave: humedad, precipitacion, estacion
  !forzar  !limpiar  !estado  !progreso  !ayuda  !salir";

/// Texto numérico como `Numero`; cualquier otro texto llega tal cual a la
/// validación. Vacío equivale a quitar el valor.
fn medida(raw: &str) -> Option<Medida> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse::<f64>().map(Medida::Numero).unwrap_or_else(|_| Medida::Texto(raw.to_string())))
}

fn climate(key: &str, value: &str) -> Result<ClimateUpdate, String> {
    let mut parts = key.splitn(2, '.');
    match (parts.next(), parts.next()) {
        (Some("temperatura"), Some(sub)) => {
            let m = medida(value);
            let t = match sub {
                "promedio" => Temperatura { promedio: m, ..Default::default() },
                "minima" => Temperatura { minima: m, ..Default::default() },
                "maxima" => Temperatura { maxima: m, ..Default::default() },
                other => return Err(format!("sub-campo de temperatura desconocido: {other}")),
            };
            Ok(ClimateUpdate::Temperatura(t))
        }
        (Some("humedad"), None) => Ok(ClimateUpdate::Humedad(medida(value))),
        (Some("precipitacion"), None) => Ok(ClimateUpdate::Precipitacion(medida(value))),
        (Some("estacion"), None) => Ok(ClimateUpdate::Estacion((!value.is_empty()).then(|| value.to_string()))),
        _ => Err(format!("clave climática desconocida: {key}")),
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line {
        "!forzar" => return Ok(Command::Force),
        "!limpiar" => return Ok(Command::Clear),
        "!estado" => return Ok(Command::State),
        "!progreso" => return Ok(Command::Progress),
        "!ayuda" | "?" => return Ok(Command::Help),
        "!salir" => return Ok(Command::Quit),
        _ => {}
    }
    let (key, value) = line.split_once('=').ok_or_else(|| format!("comando no reconocido: {line}"))?;
    let (key, value) = (key.trim(), value.trim());
    match key.strip_prefix("clima.") {
        Some(rest) => climate(rest, value).map(Command::Climate),
        None => key.parse::<FormField>()
                   .map(|f| Command::Field(f, value.to_string()))
                   .map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_and_specials() {
        assert_eq!(parse_command("especie = cattleya"), Ok(Command::Field(FormField::Especie, "cattleya".into())));
        assert_eq!(parse_command("fecha_polinizacion=2024-02-15"),
                   Ok(Command::Field(FormField::FechaPolinizacion, "2024-02-15".into())));
        assert_eq!(parse_command("!forzar"), Ok(Command::Force));
        assert_eq!(parse_command("  !salir "), Ok(Command::Quit));
        assert!(parse_command("color=rojo").is_err());
        assert!(parse_command("cattleya").is_err());
    }

    #[test]
    fn climate_keys() {
        assert_eq!(parse_command("clima.temperatura.promedio=25"),
                   Ok(Command::Climate(ClimateUpdate::Temperatura(Temperatura { promedio: Some(Medida::Numero(25.0)),
                                                                                ..Default::default() }))));
        assert_eq!(parse_command("clima.humedad=mucha"),
                   Ok(Command::Climate(ClimateUpdate::Humedad(Some(Medida::Texto("mucha".into()))))));
        assert_eq!(parse_command("clima.estacion="), Ok(Command::Climate(ClimateUpdate::Estacion(None))));
        assert!(parse_command("clima.temperatura.media=20").is_err());
        assert!(parse_command("clima.viento=3").is_err());
    }
}
