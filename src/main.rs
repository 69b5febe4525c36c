use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use seqidx::index::build::build_index_file;
use seqidx::output::{print_error, print_identifiers, print_records};
use seqidx::store::{ErrorKind, RecordStore};
use seqidx::utils::{get_config_path, AppConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termcolor::ColorChoice;

#[derive(Parser)]
#[command(name = "seqidx")]
#[command(version, about = "Indexed and sequential access to FASTA record files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    color: ColorWhen,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    /// Print records by ordinal position
    Lines {
        /// Record file
        file: PathBuf,
        /// Header line to start at (odd, 1-based)
        line: usize,
        /// Number of records to print
        count: usize,
    },
    /// Print the record whose header contains an identifier
    Get {
        /// Record file
        file: PathBuf,
        /// Identifier (may be a prefix)
        id: String,
    },
    /// Look up every identifier listed in a query file and write the records to an output file
    Batch {
        /// Record file
        file: PathBuf,
        /// Query file, one identifier per line
        queries: PathBuf,
        /// Output file
        output: PathBuf,
        /// Sidecar offset index to accelerate lookups
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
    /// List identifiers of records whose body contains a pattern
    Composition {
        /// Record file
        file: PathBuf,
        /// Sequence of letters, `*` allowed with --wildcard
        pattern: String,
        /// Treat `*` as zero or more letters
        #[arg(short, long)]
        wildcard: bool,
    },
    /// List identifiers on lines containing a whole word (case-insensitive)
    Meta {
        /// Record file
        file: PathBuf,
        /// Word to search for
        text: String,
    },
    /// Build the sidecar offset index for a record file
    Index {
        /// Record file
        file: PathBuf,
        /// Output path (defaults to `<file>.<index_extension>`)
        output: Option<PathBuf>,
    },
    /// Show the configuration file location and effective values
    Config,
}

fn setup_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{:#}, using defaults", e);
            AppConfig::default()
        }
    };
    let choice = color_choice(cli.color, &config);

    match run(cli, &config, choice) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = print_error(&format!("{:#}", e), choice);
            ExitCode::FAILURE
        }
    }
}

fn color_choice(when: ColorWhen, config: &AppConfig) -> ColorChoice {
    match when {
        ColorWhen::Always => ColorChoice::Always,
        ColorWhen::Never => ColorChoice::Never,
        ColorWhen::Auto if config.color => ColorChoice::Auto,
        ColorWhen::Auto => ColorChoice::Never,
    }
}

fn run(cli: Cli, config: &AppConfig, choice: ColorChoice) -> Result<()> {
    match cli.command {
        Commands::Lines { file, line, count } => {
            if line == 0 || line % 2 == 0 {
                bail!("Line number must be an odd number greater than 0");
            }
            if count == 0 {
                bail!("Number of records must be greater than 0");
            }
            let mut store = RecordStore::open(&file)?;
            let records = store.get_by_line_range(line, count)?;
            print_records(&records, choice)?;
        }
        Commands::Get { file, id } => {
            let mut store = RecordStore::open(&file)?;
            let record = store.get_by_id(&id, false)?;
            print_records(&record, choice)?;
        }
        Commands::Batch {
            file,
            queries,
            output,
            index,
        } => {
            let mut store = RecordStore::open(&file)?;
            if let Some(index) = &index {
                store.set_index_file(index)?;
            }
            let found = fetch_many(&mut store, &queries, &output, index.is_some(), choice)?;
            info!("wrote {} records to {}", found, output.display());
        }
        Commands::Composition {
            file,
            pattern,
            wildcard,
        } => {
            let mut store = RecordStore::open(&file)?;
            let ids = store.get_ids_by_composition(&pattern, wildcard)?;
            print_identifiers(&ids, choice)?;
        }
        Commands::Meta { file, text } => {
            let mut store = RecordStore::open(&file)?;
            let ids = store.get_ids_by_metadata(&text)?;
            print_identifiers(&ids, choice)?;
        }
        Commands::Index { file, output } => {
            let output = output.unwrap_or_else(|| config.sidecar_path(&file));
            let silent = cli.quiet || !config.show_progress;
            build_index_file(&file, &output, silent)?;
        }
        Commands::Config => {
            println!("Config file:      {}", get_config_path()?.display());
            println!("Index extension:  {}", config.index_extension);
            println!("Color:            {}", config.color);
            println!("Show progress:    {}", config.show_progress);
        }
    }

    Ok(())
}

/// Resolve every identifier in `queries`, writing found records to `output`.
///
/// Identifiers that are not found are reported and skipped; any other failure aborts.
fn fetch_many(
    store: &mut RecordStore,
    queries: &Path,
    output: &Path,
    use_index: bool,
    choice: ColorChoice,
) -> Result<usize> {
    let ids = fs::read_to_string(queries)
        .with_context(|| format!("Failed to read query file {}", queries.display()))?;

    let mut records = String::new();
    let mut found = 0;
    for id in ids.lines().map(str::trim).filter(|id| !id.is_empty()) {
        match store.get_by_id(id, use_index) {
            Ok(record) => {
                records.push_str(&record);
                records.push('\n');
                found += 1;
            }
            Err(e) if e.kind() == ErrorKind::SequenceNotFound => {
                print_error(&e.to_string(), choice)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    fs::write(output, records)
        .with_context(|| format!("Failed to write output file {}", output.display()))?;
    Ok(found)
}
