use orq_domain::{ClimateDetail, FormField, FormSnapshot, Medida, PredictionRequest, PredictionResult, Temperatura,
                 TipoPrediccion};
use serde_json::json;

#[test]
fn test_snapshot_deserializes_from_wire_form() {
    // Un formulario tal como lo envía la capa de presentación
    let raw = json!({
        "especie": "Cattleya trianae",
        "clima": "templado",
        "fechaPolinizacion": "2024-02-15",
        "condicionesClimaticas": {"temperatura": {"promedio": 25, "minima": "frío"}, "estacion": "otoño"}
    });
    let form: FormSnapshot = serde_json::from_value(raw).unwrap();
    assert_eq!(form.ubicacion, "");
    assert_eq!(form.get(FormField::FechaPolinizacion), "2024-02-15");
    let t = form.condiciones_climaticas.as_ref().and_then(|c| c.temperatura.clone()).unwrap();
    assert_eq!(t.promedio.and_then(|m| m.as_number()), Some(25.0));
    assert_eq!(t.minima, Some(Medida::Texto("frío".into())));
    assert!(form.has_advanced_fields());
}

#[test]
fn test_request_kind_tracks_advanced_fields() {
    let mut form = FormSnapshot { especie: "cattleya".into(), genero: "Cattleya".into(), ..Default::default() };
    let req = PredictionRequest::from_form(&form).unwrap();
    assert_eq!(req.kind(), TipoPrediccion::Inicial);
    // genero no viaja en la petición inicial
    assert!(serde_json::to_value(&req).unwrap()["payload"].get("genero").is_none());

    form.condiciones_climaticas = Some(ClimateDetail { temperatura: Some(Temperatura::default()), ..Default::default() });
    assert_eq!(PredictionRequest::from_form(&form).unwrap().kind(), TipoPrediccion::Inicial);

    form.set(FormField::TipoPolinizacion, "manual".into());
    assert_eq!(PredictionRequest::from_form(&form).unwrap().kind(), TipoPrediccion::Refinada);
}

#[test]
fn test_prediction_result_keeps_detail_payload() {
    let raw = json!({
        "diasEstimados": 95,
        "confianza": 72.5,
        "fechaEstimada": "2025-09-01",
        "tipoPrediccion": "refinada",
        "detalle": {"modelo": "rf-v2", "factores": ["temperatura"]}
    });
    let r: PredictionResult = serde_json::from_value(raw).unwrap();
    assert_eq!(r.dias_estimados, 95.0);
    assert_eq!(r.detalle["modelo"], "rf-v2");
}

#[test]
fn test_prediction_result_accepts_any_json_number_for_days() {
    // Servicios que serializan los días como flotante
    for (raw, dias) in [(json!(120.0), 120.0), (json!(45.5), 45.5), (json!(30), 30.0)] {
        let r: PredictionResult = serde_json::from_value(json!({
            "diasEstimados": raw,
            "confianza": 80,
            "fechaEstimada": "2025-06-01",
            "tipoPrediccion": "inicial"
        })).unwrap();
        assert_eq!(r.dias_estimados, dias);
        assert_eq!(r.tipo_prediccion, TipoPrediccion::Inicial);
    }
}
