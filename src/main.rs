use clap::Parser;
use log::{error, info};
use relative_placement::config::{self, OutputFormat, Settings};
use relative_placement::error::AppError;
use relative_placement::placement::calculate_results_with;
use relative_placement::sheet::parse_sheet;
use relative_placement::summary::{ResultSheet, ordinal_suffix, render_table};
use std::path::{Path, PathBuf};

const STARTER_SCORECARD: &str = "\
# relplace scorecard
# One `competitor:` line per competitor, in column order.
# One line per judge: a label, a colon, then that judge's rank for each
# competitor in the same order (1 = best).

title: Jack & Jill Finals

competitor: Parker & Elliot
competitor: Morgan & Jordan
competitor: Charlie & Casey
competitor: Ryan & Cameron

J1: 1 2 3 4
J2: 3 1 2 4
J3: 1 2 4 3
J4: 1 3 2 4
J5: 3 2 1 4
";

#[derive(Parser)]
#[command(name = "relplace", version, about = "Score judged competitions by relative placement")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Score a scorecard file (JSON or plain text)
    Score(ScoreArgs),
    /// Write a starter scorecard
    Init {
        /// Where to write it
        #[arg(default_value = "scorecard.txt")]
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct ScoreArgs {
    /// Scorecard to read
    file: PathBuf,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Row validation: "strict" or "permissive" (overrides RELPLACE_VALIDATION)
    #[arg(long)]
    validation: Option<String>,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Score(args) => score(&args),
        Commands::Init { path } => init(&path),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn score(args: &ScoreArgs) -> Result<(), AppError> {
    let mut settings = Settings::from_env()?;
    if let Some(ref value) = args.validation {
        settings.validation = config::parse_validation(value)?;
    }
    if args.json {
        settings.format = OutputFormat::Json;
    }

    let content = std::fs::read_to_string(&args.file).map_err(|source| AppError::Read {
        path: args.file.clone(),
        source,
    })?;
    let competition = parse_sheet(&content)?;
    let results = calculate_results_with(
        &competition.competitors,
        &competition.rank_matrix(),
        &settings.engine_options(),
    )?;

    if let Some(winner) = results.first() {
        info!(
            "{} placed {} in \"{}\"",
            winner.competitor,
            ordinal_suffix(winner.place),
            competition.title
        );
    }

    match settings.format {
        OutputFormat::Table => {
            if !competition.title.is_empty() {
                println!("{}\n", competition.title);
            }
            print!("{}", render_table(&results, &competition.judge_labels()));
        }
        OutputFormat::Json => {
            let sheet = ResultSheet::new(&competition, results);
            println!("{}", serde_json::to_string_pretty(&sheet)?);
        }
    }
    Ok(())
}

/// Writes the starter scorecard. Refuses to overwrite an existing file.
fn init(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        return Err(AppError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| AppError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, STARTER_SCORECARD).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote starter scorecard to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relative_placement::calculate_results;

    #[test]
    fn starter_scorecard_scores_cleanly() {
        let competition = parse_sheet(STARTER_SCORECARD).unwrap();
        let results =
            calculate_results(&competition.competitors, &competition.rank_matrix()).unwrap();

        let places: Vec<(&str, usize)> = results
            .iter()
            .map(|r| (r.competitor.as_str(), r.place))
            .collect();
        assert_eq!(
            places,
            vec![
                ("Parker & Elliot", 1),
                ("Morgan & Jordan", 2),
                ("Charlie & Casey", 3),
                ("Ryan & Cameron", 4),
            ]
        );
    }
}
