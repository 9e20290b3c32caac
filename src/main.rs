// Import from library crate
use movie_db::db::open_existing;
use movie_db::ingestion::{populate, IngestionStatus};
use movie_db::query::{run_report, MovieQueries, Prompter, ReportKind, ReportParams};
use movie_db::schema::{initialise, DdlSource, PreviousDatabase};
use movie_db::Config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movie-db")]
#[command(about = "Build, load and query a local movies database")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete and recreate the database schema
    Init {
        /// Database file to create
        db_file: PathBuf,

        /// DDL script to run instead of the bundled schema (or set MOVIE_DB_DDL)
        #[arg(long)]
        ddl: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Load every CSV file of the data directory into an initialised database
    Populate {
        /// Database file created by `init`
        db_file: PathBuf,

        /// Directory holding the CSV files (default: ./data, or MOVIE_DB_DATA_DIR)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run one of the six canned reports
    Query {
        /// Database file created by `init`
        db_file: PathBuf,

        /// Report number: 1 movies, 2 cast, 3 plots, 4 directors of an actor,
        /// 5 award-winning actors in a genre, 6 directors of rated award winners
        query_number: String,

        /// Genre for report 5 (default: Action, or MOVIE_DB_GENRE)
        #[arg(long)]
        genre: Option<String>,

        /// Rating threshold for report 6 (default: 7.0, or MOVIE_DB_MIN_RATING)
        #[arg(long)]
        min_rating: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    match args.command {
        Commands::Init {
            db_file,
            ddl,
            format,
        } => run_init(db_file, ddl.or(config.ddl_path), format),
        Commands::Populate {
            db_file,
            data_dir,
            format,
        } => run_populate(db_file, data_dir.unwrap_or(config.data_dir), format),
        Commands::Query {
            db_file,
            query_number,
            genre,
            min_rating,
            format,
        } => {
            let params = ReportParams {
                genre: genre.unwrap_or(config.genre),
                min_rating: min_rating.unwrap_or(config.min_rating),
            };
            run_query(db_file, &query_number, params, format)
        }
    }
}

fn run_init(db_file: PathBuf, ddl: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let outcome = initialise(&db_file, &DdlSource::from_path(ddl))?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome.previous {
        PreviousDatabase::Deleted => println!("Database deleted successfully"),
        PreviousDatabase::DeleteFailed => println!("Failed to delete database"),
        PreviousDatabase::Absent => {}
    }
    println!("Successfully created tables: {}", outcome.tables.join(", "));

    Ok(())
}

fn run_populate(db_file: PathBuf, data_dir: PathBuf, format: OutputFormat) -> Result<()> {
    let conn = open_existing(&db_file)?;
    info!("Populating {} from {}", db_file.display(), data_dir.display());

    let result = populate(&conn, &data_dir)?;
    if result.status != IngestionStatus::Success {
        info!("Run {} finished with status {:?}", result.run_id, result.status);
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for file in &result.files {
        if file.succeeded() {
            println!(
                "Records inserted successfully from {} ({} inserted, {} skipped)",
                file.file, file.inserted, file.skipped
            );
        } else {
            println!(
                "Records failed to be inserted into database from {} \
                 ({} inserted, {} skipped, {} failed)",
                file.file, file.inserted, file.skipped, file.failed
            );
        }
    }

    println!(
        "Directors assigned to {} of {} movies",
        result.directors.linked, result.directors.updated
    );
    if result.foreign_keys_succeeded() {
        println!("Foreign key values inserted successfully.");
    } else {
        println!("Foreign key values failed to be inserted.");
    }

    Ok(())
}

fn run_query(
    db_file: PathBuf,
    query_number: &str,
    params: ReportParams,
    format: OutputFormat,
) -> Result<()> {
    let kind = ReportKind::from_number(query_number)?;
    let conn = open_existing(&db_file)?;
    let queries = MovieQueries::new(&conn);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let report = run_report(&queries, kind, &params, &mut prompter)?;

    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
