use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use yarrow_core::*;

#[derive(Parser)]
#[command(name = "yarrow")]
#[command(about = "Daily hexagram oracle", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast or reveal today's hexagram (default)
    Cast,

    /// Show archived casts from the history log
    History {
        /// Maximum number of entries to show, newest last
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show today's record without consuming a reveal draw
    Today,
}

fn main() {
    yarrow_core::logging::init();

    let cli = Cli::parse();

    // Casting failures never disturb the host: diagnostics go to tracing
    // (stderr), stdout stays empty, and the exit is neutral.
    if let Err(e) = run(cli) {
        tracing::error!("invocation failed: {}", e);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        None | Some(Commands::Cast) => cmd_cast(&data_dir, &config),
        Some(Commands::History { limit }) => cmd_history(&data_dir, limit),
        Some(Commands::Today) => cmd_today(&data_dir),
    }
}

fn cmd_cast(data_dir: &Path, config: &Config) -> Result<()> {
    config.reveal.validate()?;

    let table_errors = verify_table();
    if !table_errors.is_empty() {
        for error in &table_errors {
            tracing::error!("sequence table: {}", error);
        }
        return Err(Error::Other("sequence table failed self-check".into()));
    }

    std::fs::create_dir_all(data_dir)?;
    let paths = StorePaths::in_dir(data_dir);
    let mut entropy = OsEntropy;
    let today = chrono::Local::now().date_naive();

    if let Some(line) = run_invocation(&paths, &config.reveal, &mut entropy, today)? {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_history(data_dir: &Path, limit: usize) -> Result<()> {
    let paths = StorePaths::in_dir(data_dir);
    let entries = store::read_history(&paths.history)?;

    let start = entries.len().saturating_sub(limit);
    for entry in &entries[start..] {
        let becoming = match entry.cast.becoming {
            Some(id) => format!(" -> {} {}", id, texts::name(id)),
            None => String::new(),
        };
        println!(
            "{}  {} {}{}",
            entry.date,
            entry.cast.primary,
            texts::name(entry.cast.primary),
            becoming
        );
    }
    Ok(())
}

fn cmd_today(data_dir: &Path) -> Result<()> {
    let paths = StorePaths::in_dir(data_dir);
    let Some(record) = store::load_current(&paths.current) else {
        println!("no cast recorded yet");
        return Ok(());
    };

    let cast = &record.cast;
    println!("date: {}", record.date);
    println!("primary: {} {}", cast.primary, texts::name(cast.primary));
    println!("nuclear: {} {}", cast.nuclear, texts::name(cast.nuclear));
    println!("shadow: {} {}", cast.shadow, texts::name(cast.shadow));
    println!("mirror: {} {}", cast.mirror, texts::name(cast.mirror));
    if let Some(id) = cast.becoming {
        let positions: Vec<String> = cast
            .changing_positions
            .iter()
            .map(|p| p.to_string())
            .collect();
        println!(
            "becoming: {} {} (changing lines {})",
            id,
            texts::name(id),
            positions.join(", ")
        );
    }
    if cast.self_mirroring {
        println!("note: self-mirroring");
    }
    if cast.locked_pair {
        println!("note: locked pair (mirror equals shadow)");
    }
    println!("revealed: {}", record.revealed);
    Ok(())
}
