//! Configuración del conversor.
//!
//! Los valores por defecto reproducen el formato del "Offered Course Report".
//! Opcionalmente se puede pasar un archivo TOML que sobreescribe solo las
//! claves presentes:
//!
//! ```toml
//! [columnas]
//! sala = 14
//!
//! [encabezado]
//! marcador = "Class ID"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogoError, Result};

/// Archivo de entrada usado cuando no se indica otro.
pub const ARCHIVO_OFERTA: &str = "Offered Course Report.xlsx";

/// Archivo de salida usado cuando no se indica otro.
pub const ARCHIVO_CATALOGO: &str = "courses.json";

/// Configuración completa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigCatalogo {
    #[serde(default)]
    pub columnas: ColumnasOferta,

    #[serde(default)]
    pub encabezado: ConfigEncabezado,

    #[serde(default)]
    pub semestre: ConfigSemestre,
}

/// Índices (base 0, columna A = 0) de cada campo del reporte.
///
/// El reporte tiene encabezados inconsistentes, por eso se accede por posición.
/// La columna 8 del formato por defecto no se usa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnasOferta {
    pub clase_id: usize,
    pub codigo: usize,
    pub estado: usize,
    pub capacidad: usize,
    pub inscritos: usize,
    pub titulo: usize,
    pub seccion: usize,
    pub tipo: usize,
    pub dia: usize,
    pub inicio: usize,
    pub fin: usize,
    pub sala: usize,
}

impl Default for ColumnasOferta {
    fn default() -> Self {
        Self {
            clase_id: 1,
            codigo: 2,
            estado: 3,
            capacidad: 4,
            inscritos: 5,
            titulo: 6,
            seccion: 7,
            tipo: 9,
            dia: 10,
            inicio: 11,
            fin: 12,
            sala: 13,
        }
    }
}

impl ColumnasOferta {
    /// Pares (nombre, índice) en el orden de extracción.
    pub fn campos(&self) -> [(&'static str, usize); 12] {
        [
            ("clase_id", self.clase_id),
            ("codigo", self.codigo),
            ("estado", self.estado),
            ("capacidad", self.capacidad),
            ("inscritos", self.inscritos),
            ("titulo", self.titulo),
            ("seccion", self.seccion),
            ("tipo", self.tipo),
            ("dia", self.dia),
            ("inicio", self.inicio),
            ("fin", self.fin),
            ("sala", self.sala),
        ]
    }

    /// Dos campos no pueden apuntar a la misma columna.
    pub fn validar(&self) -> Result<()> {
        let campos = self.campos();
        for (i, (nombre, idx)) in campos.iter().enumerate() {
            if let Some((otro, _)) = campos[i + 1..].iter().find(|(_, j)| j == idx) {
                return Err(CatalogoError::config(format!(
                    "las columnas '{}' y '{}' usan el mismo índice {}",
                    nombre, otro, idx
                )));
            }
        }
        Ok(())
    }
}

/// Detección de la fila de encabezado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEncabezado {
    /// Texto que identifica la fila de encabezados.
    #[serde(default = "default_marcador")]
    pub marcador: String,
}

impl Default for ConfigEncabezado {
    fn default() -> Self {
        Self {
            marcador: default_marcador(),
        }
    }
}

fn default_marcador() -> String {
    "Class ID".into()
}

/// Límites del buscador de semestre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSemestre {
    /// Cantidad de filas iniciales revisadas.
    #[serde(default = "default_filas_max")]
    pub filas_max: usize,
}

impl Default for ConfigSemestre {
    fn default() -> Self {
        Self {
            filas_max: default_filas_max(),
        }
    }
}

fn default_filas_max() -> usize {
    50
}

impl ConfigCatalogo {
    /// Parsea la configuración desde texto TOML y la valida.
    pub fn desde_toml(texto: &str) -> Result<Self> {
        let config: ConfigCatalogo = toml::from_str(texto)
            .map_err(|e| CatalogoError::config(format!("TOML inválido: {e}")))?;
        config.columnas.validar()?;
        if config.encabezado.marcador.trim().is_empty() {
            return Err(CatalogoError::config("el marcador de encabezado está vacío"));
        }
        Ok(config)
    }

    /// Carga la configuración desde `path`, o los valores por defecto si no
    /// se indica archivo.
    pub fn cargar(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let texto =
                    std::fs::read_to_string(p).map_err(|e| CatalogoError::io(p, e))?;
                tracing::debug!(path = %p.display(), "configuración cargada");
                Self::desde_toml(&texto)
            }
        }
    }
}
