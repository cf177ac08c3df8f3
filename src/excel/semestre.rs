//! Búsqueda del semestre en la cabecera del reporte.
//!
//! El "Offered Course Report" no tiene una celda fija para el semestre; suele
//! aparecer como texto libre ("SPRING 2024-25", "Fall 2023") en las primeras
//! filas. Se recorre fila por fila, celda por celda, y se devuelve la primera
//! coincidencia.

use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::ConfigCatalogo;
use crate::error::Result;
use crate::excel::io::{cell_to_string, leer_primera_hoja, Fila};

/// Celda donde se encontró el semestre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HallazgoSemestre {
    pub fila: usize,
    pub columna: usize,
    /// Texto completo de la celda (recortado).
    pub texto: String,
    pub semestre: SemestreDetectado,
}

/// Término y año extraídos del texto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemestreDetectado {
    /// En mayúsculas: SPRING, FALL, SUMMER o WINTER.
    pub termino: String,
    pub anio: u16,
    /// Rango corto opcional, p. ej. "25" en "2024-25".
    pub hasta: Option<String>,
}

fn regex_semestre() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(SPRING|FALL|SUMMER|WINTER)\s+(\d{4})(?:\s*-\s*(\d{2,4}))?\b")
            .expect("regex de semestre válida")
    })
}

/// Interpreta un texto como semestre, si lo contiene.
pub fn parsear_semestre(texto: &str) -> Option<SemestreDetectado> {
    let caps = regex_semestre().captures(texto)?;
    let anio = caps.get(2)?.as_str().parse().ok()?;
    Some(SemestreDetectado {
        termino: caps.get(1)?.as_str().to_uppercase(),
        anio,
        hasta: caps.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Busca el semestre en las primeras `max_filas` filas.
pub fn buscar_semestre(filas: &[Fila], max_filas: usize) -> Option<HallazgoSemestre> {
    for (r, fila) in filas.iter().take(max_filas).enumerate() {
        for (c, celda) in fila.iter().enumerate() {
            let texto = cell_to_string(celda);
            if let Some(semestre) = parsear_semestre(&texto) {
                return Some(HallazgoSemestre {
                    fila: r,
                    columna: c,
                    texto,
                    semestre,
                });
            }
        }
    }
    None
}

/// Abre el reporte y busca el semestre según la configuración.
pub fn buscar_semestre_excel<P: AsRef<Path>>(
    path: P,
    config: &ConfigCatalogo,
) -> Result<Option<HallazgoSemestre>> {
    let filas = leer_primera_hoja(path)?;
    let hallazgo = buscar_semestre(&filas, config.semestre.filas_max);
    match &hallazgo {
        Some(h) => tracing::info!(fila = h.fila, columna = h.columna, texto = %h.texto, "semestre encontrado"),
        None => tracing::info!(filas = config.semestre.filas_max, "no se encontró semestre"),
    }
    Ok(hallazgo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;

    fn texto(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn parsea_variantes() {
        let s = parsear_semestre("Offered Course Report SPRING 2024-25").unwrap();
        assert_eq!(s.termino, "SPRING");
        assert_eq!(s.anio, 2024);
        assert_eq!(s.hasta.as_deref(), Some("25"));

        let s = parsear_semestre("fall 2023").unwrap();
        assert_eq!(s.termino, "FALL");
        assert_eq!(s.hasta, None);

        assert!(parsear_semestre("Summer 2025 - 2026").is_some());
        assert!(parsear_semestre("SPRING").is_none());
        assert!(parsear_semestre("SPRINGFIELD 2024").is_none());
        assert!(parsear_semestre("WINTER 24").is_none());
    }

    #[test]
    fn primera_coincidencia_en_orden_de_filas() {
        let filas = vec![
            vec![texto("American International University")],
            vec![Data::Empty, Data::Empty, texto("FALL 2023-24")],
            vec![texto("SPRING 2024-25")],
        ];
        let h = buscar_semestre(&filas, 50).unwrap();
        assert_eq!((h.fila, h.columna), (1, 2));
        assert_eq!(h.texto, "FALL 2023-24");
    }

    #[test]
    fn respeta_limite_de_filas() {
        let mut filas: Vec<Fila> = (0..5).map(|_| vec![Data::Empty]).collect();
        filas.push(vec![texto("SPRING 2024-25")]);
        assert!(buscar_semestre(&filas, 5).is_none());
        assert!(buscar_semestre(&filas, 6).is_some());
    }
}
