// Biblioteca raíz del crate `catalogo_oferta`.
// Convierte el "Offered Course Report" (Excel) en un catálogo JSON de cursos,
// secciones y horarios, más utilidades de revisión.
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod verificacion;

pub use config::ConfigCatalogo;
pub use error::{CatalogoError, Result};
pub use excel::convertir_oferta_excel;
pub use models::{Curso, Horario, Seccion};
