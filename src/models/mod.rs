// Estructuras de datos del catálogo (se serializan tal cual a courses.json)

use serde::{Deserialize, Serialize};

/// Asignatura ofertada, identificada por (título base, código).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curso {
    pub code: String,
    #[serde(rename = "baseTitle")]
    pub base_title: String,
    pub sections: Vec<Seccion>,
}

/// Sección de un curso. Los contadores se guardan como texto porque el
/// reporte a veces trae valores mal formados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seccion {
    pub id: String,
    pub section: String,
    pub status: String,
    pub capacity: String,
    pub count: String,
    pub schedules: Vec<Horario>,
}

/// Un bloque horario (una fila del reporte).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horario {
    pub day: String,
    pub start: String,
    pub end: String,
    pub room: String,
    #[serde(rename = "type")]
    pub tipo: String,
}
