use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::NaiveTime;
use std::path::Path;

use crate::error::{CatalogoError, Result};

/// Fila cruda tal como viene de la hoja; el índice 0 es siempre la columna A.
pub type Fila = Vec<Data>;

/// Convierte un `Data` de calamine a String.
///
/// Los números enteros se escriben sin decimales ("40" y no "40.0") y las
/// celdas con formato de hora/fecha se escriben como `HH:MM:SS` o
/// `YYYY-MM-DD HH:MM:SS`.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => float_to_string(*f),
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => fecha_excel_to_string(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn float_to_string(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Fecha/hora de Excel a texto. Valores menores a un día son solo hora; el
/// resto se convierte con la época del libro (1900 o 1904).
fn fecha_excel_to_string(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();
    if !serial.is_finite() || serial < 0.0 {
        return float_to_string(serial);
    }
    if serial < 1.0 {
        return hora_del_dia(serial);
    }
    match dt.as_datetime() {
        Some(f) => f.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => float_to_string(serial),
    }
}

/// Fracción de día a `HH:MM:SS`. El redondeo nunca pasa de 23:59:59.
fn hora_del_dia(serial: f64) -> String {
    let segundos = ((serial * 86_400.0).round() as u32).min(86_399);
    NaiveTime::from_num_seconds_from_midnight_opt(segundos, 0)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| float_to_string(serial))
}

/// Texto que el reporte usa para celdas nulas ("nan"/"None" vienen de
/// exportaciones previas) o vacías.
pub fn es_nulo(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == "nan" || s == "None"
}

/// Lee la primera hoja del libro como filas posicionales.
///
/// calamine recorta la hoja al rango usado; aquí se rellenan filas y columnas
/// iniciales con `Data::Empty` para que el índice de columna siga siendo
/// absoluto.
pub fn leer_primera_hoja<P: AsRef<Path>>(path: P) -> Result<Vec<Fila>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CatalogoError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "archivo no encontrado"),
        ));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| CatalogoError::excel(path, e))?;
    let names = workbook.sheet_names().to_owned();
    let primera = names
        .first()
        .cloned()
        .ok_or_else(|| CatalogoError::SinHojas { path: path.to_path_buf() })?;

    let range = workbook
        .worksheet_range(&primera)
        .map_err(|e| CatalogoError::excel(path, e))?;

    let (fila0, col0) = range.start().unwrap_or((0, 0));
    let (fila0, col0) = (fila0 as usize, col0 as usize);
    let ancho = col0 + range.width();

    let mut filas: Vec<Fila> = Vec::with_capacity(fila0 + range.height());
    for _ in 0..fila0 {
        filas.push(vec![Data::Empty; ancho]);
    }
    for r in range.rows() {
        let mut fila = Vec::with_capacity(ancho);
        fila.resize(col0, Data::Empty);
        fila.extend(r.iter().cloned());
        filas.push(fila);
    }

    tracing::debug!(
        path = %path.display(),
        hoja = %primera,
        filas = filas.len(),
        "hoja leída"
    );
    Ok(filas)
}

/// Convierte una fila cruda a texto, celda por celda.
pub fn fila_a_texto(fila: &[Data]) -> Vec<String> {
    fila.iter().map(cell_to_string).collect()
}

/// Primeras `n` filas de la primera hoja, como texto. Útil para revisar a mano
/// el formato de un reporte nuevo.
pub fn vista_previa<P: AsRef<Path>>(path: P, n: usize) -> Result<Vec<Vec<String>>> {
    let filas = leer_primera_hoja(path)?;
    Ok(filas.iter().take(n).map(|f| fila_a_texto(f)).collect())
}
