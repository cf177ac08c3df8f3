//! Módulo `excel` dividido en submódulos para mantener el código organizado.
//!
//! Submódulos:
//! - `io`: lectura de la primera hoja y conversión de celdas a texto
//! - `mapeo`: mapa con orden de inserción usado para agrupar
//! - `oferta`: construcción del catálogo de cursos a partir del reporte
//! - `semestre`: búsqueda del semestre en la cabecera del reporte

/// Helpers de IO y utilidades para parsing de Excel
pub mod io;

/// Mapa ordenado por primera aparición
pub mod mapeo;

/// Reporte de oferta -> catálogo: `convertir_oferta_excel`
pub mod oferta;

/// Semestre del reporte: `buscar_semestre_excel`
pub mod semestre;

pub use io::{cell_to_string, leer_primera_hoja, vista_previa, Fila};
pub use mapeo::MapaOrdenado;
pub use oferta::{
    buscar_fila_encabezado, construir_catalogo, convertir_oferta_excel, escribir_catalogo_json,
    limpiar_titulo, rellenar_codigos, Catalogo, ConstructorCatalogo, FilaOmitida, MotivoOmision,
    ReporteConversion, ResultadoFila,
};
pub use semestre::{buscar_semestre, buscar_semestre_excel, HallazgoSemestre, SemestreDetectado};
