use std::path::Path;

use catalogo_oferta::excel::{buscar_semestre_excel, convertir_oferta_excel, vista_previa};
use catalogo_oferta::verificacion::{leer_catalogo_json, resumen_catalogo};
use catalogo_oferta::{CatalogoError, ConfigCatalogo};

/// Escribe un .xlsx con `filas` a partir de A1. Las celdas vacías no se escriben.
fn escribir_xlsx(path: &Path, filas: &[Vec<&str>]) {
    let mut book = umya_spreadsheet::new_file();
    let hoja = book.get_sheet_mut(&0).expect("hoja 0");
    for (r, fila) in filas.iter().enumerate() {
        for (c, valor) in fila.iter().enumerate() {
            if valor.is_empty() {
                continue;
            }
            hoja.get_cell_mut(((c + 1) as u32, (r + 1) as u32))
                .set_value(*valor);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("escribir xlsx");
}

/// Reporte parecido al real: la columna A queda vacía, así que calamine
/// entrega un rango que empieza en B.
fn reporte_de_prueba() -> Vec<Vec<&'static str>> {
    vec![
        vec!["", "Offered Course Report"],
        vec!["", "", "SPRING 2024-25"],
        vec![
            "", "Class ID", "Course Code", "Status", "Capacity", "Count", "Title", "Section", "",
            "Type", "Day", "Start", "End", "Room",
        ],
        vec![
            "", "1001", "CSE101", "Open", "40", "35", "INTRO TO CS [A]", "A", "", "Theory", "MON",
            "09:00", "10:30", "RM101",
        ],
        vec![
            "", "1001", "", "Open", "40", "35", "INTRO TO CS [A]", "A", "", "Theory", "WED", "09:00",
            "10:30", "RM101",
        ],
        vec![],
        vec![
            "", "1002", "", "Closed", "40", "40", "INTRO TO CS [B]", "B", "", "Lab", "TUE", "11:00",
            "14:00", "LAB1",
        ],
        vec![
            "", "1003", "MAT101", "Open", "30", "12", "CALCULUS I [A]", "A", "", "Theory", "SUN",
            "08:00", "09:30", "RM202",
        ],
    ]
}

#[test]
fn convierte_reporte_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let entrada = dir.path().join("Offered Course Report.xlsx");
    let salida = dir.path().join("courses.json");
    escribir_xlsx(&entrada, &reporte_de_prueba());

    let catalogo = convertir_oferta_excel(&entrada, &salida, &ConfigCatalogo::default()).unwrap();
    assert_eq!(catalogo.reporte.fila_encabezado, Some(2));
    assert_eq!(catalogo.reporte.filas_agregadas, 4);
    assert_eq!(catalogo.reporte.omitidas.len(), 1);
    assert_eq!(catalogo.reporte.omitidas[0].fila, 5);

    let cursos = leer_catalogo_json(&salida).unwrap();
    assert_eq!(cursos, catalogo.cursos);
    assert_eq!(cursos.len(), 2);

    let intro = &cursos[0];
    assert_eq!(intro.code, "CSE101");
    assert_eq!(intro.base_title, "INTRO TO CS");
    assert_eq!(intro.sections.len(), 2);
    let a = &intro.sections[0];
    assert_eq!(a.section, "A");
    assert_eq!(a.id, "1001");
    assert_eq!(a.capacity, "40");
    assert_eq!(a.schedules.len(), 2);
    assert_eq!(a.schedules[1].day, "WED");
    assert_eq!(a.schedules[0].start, "09:00");
    assert_eq!(a.schedules[0].room, "RM101");
    let b = &intro.sections[1];
    assert_eq!(b.status, "Closed");
    assert_eq!(b.schedules[0].tipo, "Lab");

    assert_eq!(cursos[1].code, "MAT101");
    assert_eq!(cursos[1].base_title, "CALCULUS I");

    let texto = std::fs::read_to_string(&salida).unwrap();
    assert!(texto.starts_with("[\n  {\n    \"code\": \"CSE101\""));
}

#[test]
fn resumen_de_courses_json() {
    let dir = tempfile::tempdir().unwrap();
    let entrada = dir.path().join("oferta.xlsx");
    let salida = dir.path().join("courses.json");
    escribir_xlsx(&entrada, &reporte_de_prueba());
    convertir_oferta_excel(&entrada, &salida, &ConfigCatalogo::default()).unwrap();

    let cursos = leer_catalogo_json(&salida).unwrap();
    let lineas = resumen_catalogo(&cursos, 10);
    assert_eq!(lineas[0], "Course: INTRO TO CS (CSE101)");
    assert_eq!(lineas[1], "  Sections: [A, B]");
    assert_eq!(lineas[3], "Course: CALCULUS I (MAT101)");
}

#[test]
fn semestre_desde_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let entrada = dir.path().join("oferta.xlsx");
    escribir_xlsx(&entrada, &reporte_de_prueba());

    let h = buscar_semestre_excel(&entrada, &ConfigCatalogo::default())
        .unwrap()
        .expect("semestre");
    assert_eq!((h.fila, h.columna), (1, 2));
    assert_eq!(h.texto, "SPRING 2024-25");
    assert_eq!(h.semestre.termino, "SPRING");
    assert_eq!(h.semestre.anio, 2024);

    let mut config = ConfigCatalogo::default();
    config.semestre.filas_max = 1;
    assert!(buscar_semestre_excel(&entrada, &config).unwrap().is_none());
}

#[test]
fn vista_previa_mantiene_columnas_absolutas() {
    let dir = tempfile::tempdir().unwrap();
    let entrada = dir.path().join("oferta.xlsx");
    escribir_xlsx(&entrada, &reporte_de_prueba());

    let filas = vista_previa(&entrada, 3).unwrap();
    assert_eq!(filas.len(), 3);
    assert_eq!(filas[0][0], "");
    assert_eq!(filas[0][1], "Offered Course Report");
    assert_eq!(filas[2][1], "Class ID");
    assert_eq!(filas[2][13], "Room");
}

#[test]
fn archivo_inexistente_es_error() {
    let dir = tempfile::tempdir().unwrap();
    let salida = dir.path().join("courses.json");
    let err = convertir_oferta_excel(dir.path().join("nada.xlsx"), &salida, &ConfigCatalogo::default())
        .unwrap_err();
    assert!(matches!(err, CatalogoError::Io { .. }));
    assert!(!salida.exists());
}

#[test]
fn archivo_no_excel_es_error() {
    let dir = tempfile::tempdir().unwrap();
    let entrada = dir.path().join("oferta.xlsx");
    std::fs::write(&entrada, b"esto no es un zip").unwrap();
    let err = convertir_oferta_excel(&entrada, dir.path().join("c.json"), &ConfigCatalogo::default())
        .unwrap_err();
    assert!(matches!(err, CatalogoError::Excel { .. }));
}
