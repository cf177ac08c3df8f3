use calamine::Data;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use crate::config::{ColumnasOferta, ConfigCatalogo};
use crate::error::{CatalogoError, Result};
use crate::excel::io::{cell_to_string, es_nulo, leer_primera_hoja, Fila};
use crate::excel::mapeo::MapaOrdenado;
use crate::models::{Curso, Horario, Seccion};

/// Motivo por el que una fila de datos no aportó nada al catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MotivoOmision {
    /// Fila en blanco o separadora: la columna de Class ID está vacía.
    SinClaseId,
    /// La fila es más corta que la columna pedida.
    ColumnaFaltante { campo: &'static str, indice: usize },
    /// Encabezado repetido (el reporte lo repite en cada página).
    EncabezadoRepetido,
}

impl fmt::Display for MotivoOmision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotivoOmision::SinClaseId => write!(f, "sin Class ID"),
            MotivoOmision::ColumnaFaltante { campo, indice } => {
                write!(f, "falta la columna {} ({})", indice, campo)
            }
            MotivoOmision::EncabezadoRepetido => write!(f, "encabezado repetido"),
        }
    }
}

/// Resultado de procesar una fila de datos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultadoFila {
    Agregada,
    Omitida(MotivoOmision),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilaOmitida {
    /// Índice de la fila en la hoja (base 0).
    pub fila: usize,
    pub motivo: MotivoOmision,
}

/// Resumen de una conversión. Permite distinguir "no había datos" de "todas
/// las filas fueron descartadas".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReporteConversion {
    /// Fila donde se encontró el encabezado; `None` si se usó toda la hoja.
    pub fila_encabezado: Option<usize>,
    pub filas_datos: usize,
    pub filas_agregadas: usize,
    pub omitidas: Vec<FilaOmitida>,
    pub cursos: usize,
    pub secciones: usize,
    pub horarios: usize,
}

/// Catálogo final junto con su reporte.
#[derive(Debug, Clone)]
pub struct Catalogo {
    pub cursos: Vec<Curso>,
    pub reporte: ReporteConversion,
}

/// Busca la primera fila que contenga `marcador` en alguna celda.
pub fn buscar_fila_encabezado(filas: &[Fila], marcador: &str) -> Option<usize> {
    filas.iter().position(|fila| es_fila_encabezado(fila, marcador))
}

/// Alguna celda de la fila contiene `marcador`.
pub fn es_fila_encabezado(fila: &[Data], marcador: &str) -> bool {
    fila.iter().any(|c| cell_to_string(c).contains(marcador))
}

fn regex_sufijo_titulo() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\s*\[.*\]$").expect("regex de título válida"))
}

/// Quita el calificador final entre corchetes:
/// "OBJECT ORIENTED PROGRAMMING [A]" -> "OBJECT ORIENTED PROGRAMMING".
pub fn limpiar_titulo(titulo: &str) -> String {
    regex_sufijo_titulo()
        .replace(titulo.trim(), "")
        .trim()
        .to_string()
}

/// "nan", "None" y vacío se tratan como código ausente.
pub fn normalizar_codigo(codigo: &str) -> String {
    if es_nulo(codigo) {
        String::new()
    } else {
        codigo.trim().to_string()
    }
}

/// Relleno hacia abajo de la columna de código (celdas combinadas en el
/// reporte). Cada código vacío toma el último no vacío anterior, en toda la
/// hoja.
pub fn rellenar_codigos<S: AsRef<str>>(codigos: &[S]) -> Vec<String> {
    let mut ultimo = String::new();
    codigos
        .iter()
        .map(|c| {
            let c = normalizar_codigo(c.as_ref());
            if !c.is_empty() {
                ultimo = c;
            }
            ultimo.clone()
        })
        .collect()
}

fn celda(fila: &[Data], campo: &'static str, indice: usize) -> std::result::Result<String, MotivoOmision> {
    fila.get(indice)
        .map(cell_to_string)
        .ok_or(MotivoOmision::ColumnaFaltante { campo, indice })
}

struct CursoEnConstruccion {
    code: String,
    base_title: String,
    secciones: MapaOrdenado<String, Seccion>,
}

/// Agrupa filas en cursos y secciones.
///
/// Se alimenta fila a fila con `procesar_fila` y se cierra con `finalizar`.
pub struct ConstructorCatalogo<'a> {
    columnas: &'a ColumnasOferta,
    marcador: &'a str,
    cursos: MapaOrdenado<(String, String), CursoEnConstruccion>,
}

impl<'a> ConstructorCatalogo<'a> {
    pub fn new(config: &'a ConfigCatalogo) -> Self {
        ConstructorCatalogo {
            columnas: &config.columnas,
            marcador: &config.encabezado.marcador,
            cursos: MapaOrdenado::new(),
        }
    }

    /// Procesa una fila de datos. `codigo` es el código ya rellenado hacia
    /// abajo para esta fila.
    pub fn procesar_fila(&mut self, fila: &[Data], codigo: &str) -> ResultadoFila {
        match self.agregar(fila, codigo) {
            Ok(()) => ResultadoFila::Agregada,
            Err(motivo) => ResultadoFila::Omitida(motivo),
        }
    }

    fn agregar(&mut self, fila: &[Data], codigo: &str) -> std::result::Result<(), MotivoOmision> {
        let col = self.columnas;

        if es_fila_encabezado(fila, self.marcador) {
            return Err(MotivoOmision::EncabezadoRepetido);
        }

        let clase_id = celda(fila, "clase_id", col.clase_id)?;
        if es_nulo(&clase_id) {
            return Err(MotivoOmision::SinClaseId);
        }

        // la columna de código debe existir aunque se use el valor rellenado
        celda(fila, "codigo", col.codigo)?;
        let estado = celda(fila, "estado", col.estado)?;
        let capacidad = celda(fila, "capacidad", col.capacidad)?;
        let inscritos = celda(fila, "inscritos", col.inscritos)?;
        let titulo = celda(fila, "titulo", col.titulo)?;
        let seccion = celda(fila, "seccion", col.seccion)?;
        let tipo = celda(fila, "tipo", col.tipo)?;
        let dia = celda(fila, "dia", col.dia)?;
        let inicio = celda(fila, "inicio", col.inicio)?;
        let fin = celda(fila, "fin", col.fin)?;
        let sala = celda(fila, "sala", col.sala)?;

        let base_title = limpiar_titulo(&titulo);
        let code = normalizar_codigo(codigo);

        let curso = self
            .cursos
            .obtener_o_insertar_con((base_title.clone(), code.clone()), || CursoEnConstruccion {
                code,
                base_title,
                secciones: MapaOrdenado::new(),
            });

        let sec = curso.secciones.obtener_o_insertar_con(seccion.clone(), || Seccion {
            id: clase_id,
            section: seccion,
            status: estado,
            capacity: capacidad,
            count: inscritos,
            schedules: Vec::new(),
        });

        sec.schedules.push(Horario {
            day: dia,
            start: inicio,
            end: fin,
            room: sala,
            tipo,
        });
        Ok(())
    }

    /// Cursos en orden de primera aparición, secciones ordenadas por etiqueta.
    pub fn finalizar(self) -> Vec<Curso> {
        self.cursos
            .into_values()
            .into_iter()
            .map(|c| {
                let mut sections = c.secciones.into_values();
                sections.sort_by(|a, b| a.section.cmp(&b.section));
                Curso {
                    code: c.code,
                    base_title: c.base_title,
                    sections,
                }
            })
            .collect()
    }
}

/// Construye el catálogo a partir de las filas crudas de la hoja.
pub fn construir_catalogo(filas: &[Fila], config: &ConfigCatalogo) -> Catalogo {
    let columnas = &config.columnas;
    let fila_encabezado = buscar_fila_encabezado(filas, &config.encabezado.marcador);
    let inicio = match fila_encabezado {
        Some(i) => {
            tracing::debug!(fila = i, "encabezado encontrado");
            i + 1
        }
        None => {
            tracing::warn!(
                marcador = %config.encabezado.marcador,
                "no se encontró la fila de encabezado; se procesa toda la hoja"
            );
            0
        }
    };
    let datos = filas.get(inicio..).unwrap_or(&[]);

    // los encabezados repetidos no aportan al relleno de códigos
    let codigos_crudos: Vec<String> = datos
        .iter()
        .map(|f| {
            if es_fila_encabezado(f, &config.encabezado.marcador) {
                return String::new();
            }
            f.get(columnas.codigo).map(cell_to_string).unwrap_or_default()
        })
        .collect();
    let codigos = rellenar_codigos(&codigos_crudos);

    let mut reporte = ReporteConversion {
        fila_encabezado,
        filas_datos: datos.len(),
        ..Default::default()
    };

    let mut constructor = ConstructorCatalogo::new(config);
    for (i, (fila, codigo)) in datos.iter().zip(codigos.iter()).enumerate() {
        match constructor.procesar_fila(fila, codigo) {
            ResultadoFila::Agregada => reporte.filas_agregadas += 1,
            ResultadoFila::Omitida(motivo) => {
                let fila = inicio + i;
                tracing::debug!(fila, %motivo, "fila omitida");
                reporte.omitidas.push(FilaOmitida { fila, motivo });
            }
        }
    }

    let cursos = constructor.finalizar();
    reporte.cursos = cursos.len();
    reporte.secciones = cursos.iter().map(|c| c.sections.len()).sum();
    reporte.horarios = cursos
        .iter()
        .flat_map(|c| c.sections.iter())
        .map(|s| s.schedules.len())
        .sum();

    tracing::info!(
        cursos = reporte.cursos,
        secciones = reporte.secciones,
        horarios = reporte.horarios,
        omitidas = reporte.omitidas.len(),
        "catálogo construido"
    );

    Catalogo { cursos, reporte }
}

/// Escribe el catálogo como JSON con indentación de 2 espacios.
pub fn escribir_catalogo_json<P: AsRef<Path>>(cursos: &[Curso], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CatalogoError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, cursos).map_err(|e| CatalogoError::json(path, e))?;
    writer.flush().map_err(|e| CatalogoError::io(path, e))?;
    Ok(())
}

/// Lee la oferta académica desde `entrada` y escribe el catálogo en `salida`.
pub fn convertir_oferta_excel<P: AsRef<Path>, Q: AsRef<Path>>(
    entrada: P,
    salida: Q,
    config: &ConfigCatalogo,
) -> Result<Catalogo> {
    let filas = leer_primera_hoja(entrada)?;
    let catalogo = construir_catalogo(&filas, config);
    escribir_catalogo_json(&catalogo.cursos, salida)?;
    Ok(catalogo)
}
