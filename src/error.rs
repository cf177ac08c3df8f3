//! Errores del crate.
//!
//! Solo los fallos que impiden leer el archivo completo llegan a ser
//! `CatalogoError`; los problemas de una fila individual se registran en el
//! reporte de conversión (ver `excel::oferta::ResultadoFila`).

use std::path::PathBuf;

/// Error de alto nivel para las operaciones del catálogo.
#[derive(Debug, thiserror::Error)]
pub enum CatalogoError {
    /// Error de E/S sobre un archivo concreto.
    #[error("error de E/S en {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// calamine no pudo abrir o leer el libro.
    #[error("no se pudo leer el Excel {path:?}: {message}")]
    Excel { path: PathBuf, message: String },

    /// El libro no contiene hojas.
    #[error("el archivo {path:?} no contiene hojas")]
    SinHojas { path: PathBuf },

    /// JSON inválido o no serializable.
    #[error("error JSON en {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Configuración inválida.
    #[error("error de configuración: {message}")]
    Config { message: String },
}

/// Alias usado en todo el crate.
pub type Result<T> = std::result::Result<T, CatalogoError>;

impl CatalogoError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn excel(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Excel {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
