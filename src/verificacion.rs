//! Revisión manual de un `courses.json` ya generado.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{CatalogoError, Result};
use crate::models::Curso;

/// Cursos mostrados por defecto en el resumen.
pub const LIMITE_RESUMEN: usize = 10;

/// Lee un catálogo JSON generado por `convertir_oferta_excel`.
pub fn leer_catalogo_json<P: AsRef<Path>>(path: P) -> Result<Vec<Curso>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CatalogoError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CatalogoError::json(path, e))
}

/// Líneas de resumen para los primeros `limite` cursos: título, código y
/// etiquetas de sección.
pub fn resumen_catalogo(cursos: &[Curso], limite: usize) -> Vec<String> {
    let mut lineas = Vec::new();
    for curso in cursos.iter().take(limite) {
        let secciones: Vec<&str> = curso.sections.iter().map(|s| s.section.as_str()).collect();
        lineas.push(format!("Course: {} ({})", curso.base_title, curso.code));
        lineas.push(format!("  Sections: [{}]", secciones.join(", ")));
        lineas.push("-".repeat(20));
    }
    lineas
}
