// --- Catálogo de oferta académica - CLI ---

use std::path::PathBuf;

use catalogo_oferta::config::{ARCHIVO_CATALOGO, ARCHIVO_OFERTA};
use catalogo_oferta::excel::{buscar_semestre_excel, convertir_oferta_excel, vista_previa};
use catalogo_oferta::verificacion::{leer_catalogo_json, resumen_catalogo, LIMITE_RESUMEN};
use catalogo_oferta::ConfigCatalogo;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

/// Convierte el reporte de oferta académica a JSON.
#[derive(Parser)]
#[command(name = "catalogo", version, about, long_about = None)]
struct Cli {
    /// Archivo TOML con índices de columnas y marcador de encabezado.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Formato de log: text o json.
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormat,

    /// Verbosidad (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Excel -> courses.json
    Convert {
        #[arg(short, long, default_value = ARCHIVO_OFERTA)]
        input: PathBuf,

        #[arg(short, long, default_value = ARCHIVO_CATALOGO)]
        output: PathBuf,
    },

    /// Busca el semestre (p. ej. "SPRING 2024-25") en las primeras filas.
    Semester {
        #[arg(short, long, default_value = ARCHIVO_OFERTA)]
        input: PathBuf,
    },

    /// Resume los primeros cursos de un courses.json.
    Verify {
        #[arg(short, long, default_value = ARCHIVO_CATALOGO)]
        input: PathBuf,

        #[arg(short, long, default_value_t = LIMITE_RESUMEN)]
        limit: usize,
    },

    /// Muestra las primeras filas crudas del Excel como JSON.
    Peek {
        #[arg(short, long, default_value = ARCHIVO_OFERTA)]
        input: PathBuf,

        #[arg(short, long, default_value_t = 15)]
        rows: usize,
    },
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "catalogo_oferta=info",
        1 => "catalogo_oferta=debug",
        _ => "catalogo_oferta=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = ConfigCatalogo::cargar(cli.config.as_deref())?;

    match cli.command {
        Command::Convert { input, output } => {
            let catalogo = convertir_oferta_excel(&input, &output, &config)
                .wrap_err_with(|| format!("convirtiendo {}", input.display()))?;
            println!("Successfully converted {} courses.", catalogo.cursos.len());
            if cli.verbose > 0 {
                eprintln!("{}", serde_json::to_string_pretty(&catalogo.reporte)?);
            }
            if !catalogo.reporte.omitidas.is_empty() {
                println!(
                    "{} of {} data rows skipped (run with -v for details).",
                    catalogo.reporte.omitidas.len(),
                    catalogo.reporte.filas_datos
                );
            }
        }
        Command::Semester { input } => match buscar_semestre_excel(&input, &config)? {
            Some(h) => {
                println!("FOUND: Row {}, Col {}, Value: {}", h.fila, h.columna, h.texto);
                if cli.verbose > 0 {
                    eprintln!("{}", serde_json::to_string_pretty(&h)?);
                }
            }
            None => println!("No semester pattern found."),
        },
        Command::Verify { input, limit } => {
            let cursos = leer_catalogo_json(&input)?;
            for linea in resumen_catalogo(&cursos, limit) {
                println!("{}", linea);
            }
        }
        Command::Peek { input, rows } => {
            let filas = vista_previa(&input, rows)?;
            println!("{}", serde_json::to_string_pretty(&filas)?);
        }
    }
    Ok(())
}
