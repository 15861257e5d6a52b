use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use emojiscript_core::CompactEmoji;
use emojiscript_db::{
    CleanReport, DataInfo, EmojiConfig, EmojiDatabase, clean, format_file_size, generate_types,
    reduction_percent,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "EMOJI_LOG";

#[derive(Debug, Parser)]
#[command(name = "emoji")]
#[command(about = "Emoji data manager: clean, inspect and type the emoji dataset")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args)]
struct PathArgs {
    /// YAML config file with raw_path, output_path and types_path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Upstream dataset (overrides the config file).
    #[arg(long, global = true)]
    raw: Option<PathBuf>,
    /// Compact index file (overrides the config file).
    #[arg(long, global = true)]
    output: Option<PathBuf>,
    /// TypeScript declaration file (overrides the config file).
    #[arg(long, global = true)]
    types: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clean and optimize the raw emoji data into the compact index.
    Clean(CleanArgs),
    /// Display information about the emoji data files.
    Info(InfoArgs),
    /// Generate TypeScript type definitions from the compact index.
    Types,
    /// Find emoji whose names contain a term.
    Search(SearchArgs),
    /// Print a random emoji.
    Random,
    /// List categories with their emoji counts.
    Categories,
}

#[derive(Debug, Args)]
struct CleanArgs {
    /// Print the clean report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct InfoArgs {
    /// Print the statistics as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Case-insensitive name fragment.
    term: String,
    /// Print every match instead of only the first.
    #[arg(long)]
    all: bool,
    /// Also print skin tone renderings.
    #[arg(long)]
    tones: bool,
}

fn main() {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };
    init_tracing();

    let result = resolve_config(&cli.paths).and_then(|config| match command {
        Command::Clean(args) => run_clean(&config, args),
        Command::Info(args) => run_info(&config, args),
        Command::Types => run_types(&config),
        Command::Search(args) => run_search(&config, args),
        Command::Random => run_random(&config),
        Command::Categories => run_categories(&config),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Builds the effective paths: config file (relative to its own directory),
/// then command-line overrides.
fn resolve_config(paths: &PathArgs) -> Result<EmojiConfig, String> {
    let mut config = match &paths.config {
        Some(path) => {
            let base = path.parent().unwrap_or(Path::new(""));
            EmojiConfig::load(path)
                .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?
                .relative_to(base)
        }
        None => EmojiConfig::default(),
    };

    if let Some(raw) = &paths.raw {
        config.raw_path = raw.clone();
    }
    if let Some(output) = &paths.output {
        config.output_path = output.clone();
    }
    if let Some(types) = &paths.types {
        config.types_path = types.clone();
    }
    debug!(?config, "resolved emoji paths");
    Ok(config)
}

fn run_clean(config: &EmojiConfig, args: CleanArgs) -> Result<(), String> {
    let report = clean(&config.raw_path, &config.output_path).map_err(|err| {
        format!(
            "Failed to clean '{}': {err}",
            config.raw_path.display()
        )
    })?;

    if args.json {
        let raw = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("Failed to serialize clean report: {err}"))?;
        println!("{raw}");
    } else {
        print!("{}", format_clean_report(&report, &config.output_path));
    }
    Ok(())
}

fn format_clean_report(report: &CleanReport, output: &Path) -> String {
    let reduction = reduction_percent(report.original_bytes, report.compact_bytes);
    let mut out = format!(
        "Wrote {} emoji in {} categories to '{}'.\n",
        report.emoji_count,
        report.category_count,
        output.display()
    );
    out.push_str(&format!(
        "Size: {} -> {} ({reduction:.2}% reduction)\n",
        format_file_size(report.original_bytes),
        format_file_size(report.compact_bytes)
    ));
    if report.skipped_records > 0 {
        out.push_str(&format!(
            "Skipped {} of {} raw record(s).\n",
            report.skipped_records, report.raw_records
        ));
    }
    out.push_str(&format!("SHA-256: {}\n", report.checksum));
    out
}

fn run_info(config: &EmojiConfig, args: InfoArgs) -> Result<(), String> {
    let info = DataInfo::collect(&config.raw_path, &config.output_path)
        .map_err(|err| format!("Failed to read emoji data: {err}"))?;

    if args.json {
        let raw = serde_json::to_string_pretty(&info)
            .map_err(|err| format!("Failed to serialize info: {err}"))?;
        println!("{raw}");
    } else {
        print!("{}", format_info(&info, config));
    }
    Ok(())
}

fn format_info(info: &DataInfo, config: &EmojiConfig) -> String {
    let mut out = String::new();

    match &info.raw {
        Some(raw) => {
            out.push_str("Original Emoji Data:\n");
            out.push_str(&format!("   - Size: {}\n", format_file_size(raw.bytes)));
            out.push_str(&format!("   - Emoji Count: {}\n", raw.emoji_count));
        }
        None => out.push_str(&format!(
            "Original emoji data '{}' not found.\n",
            config.raw_path.display()
        )),
    }

    match &info.compact {
        Some(compact) => {
            out.push_str("\nOptimized Emoji Data:\n");
            match compact.reduction_percent {
                Some(reduction) => out.push_str(&format!(
                    "   - Size: {} ({reduction:.2}% reduction)\n",
                    format_file_size(compact.bytes)
                )),
                None => out.push_str(&format!(
                    "   - Size: {}\n",
                    format_file_size(compact.bytes)
                )),
            }
            out.push_str(&format!("   - Emoji Count: {}\n", compact.emoji_count));
            out.push_str(&format!("   - Categories: {}\n", compact.category_count));
            out.push_str(&format!("   - SHA-256: {}\n", compact.checksum));
            if !compact.issues.is_empty() {
                out.push_str(&format!("   - Issues: {}\n", compact.issues.len()));
                for issue in &compact.issues {
                    out.push_str(&format!("       {issue}\n"));
                }
            }
        }
        None => out.push_str(&format!(
            "\nOptimized emoji data '{}' not found! Run \"emoji clean\" first.\n",
            config.output_path.display()
        )),
    }

    out
}

fn run_types(config: &EmojiConfig) -> Result<(), String> {
    let declaration = generate_types(&config.output_path, &config.types_path).map_err(|err| {
        format!(
            "Failed to generate types from '{}': {err}",
            config.output_path.display()
        )
    })?;
    println!(
        "Wrote {} category type(s) to '{}'.",
        declaration.categories().len(),
        config.types_path.display()
    );
    Ok(())
}

fn run_search(config: &EmojiConfig, args: SearchArgs) -> Result<(), String> {
    let db = load_database(config)?;

    if args.all {
        let matches = db.find_all_by_name(&args.term);
        if matches.is_empty() {
            return Err(format!("No emoji matches '{}'", args.term));
        }
        for hit in matches {
            println!("{}\t{}", describe(&db, hit.emoji)?, hit.category);
            if args.tones {
                print_tones(&db, hit.emoji)?;
            }
        }
        return Ok(());
    }

    let emoji = db
        .find_first_by_name(&args.term)
        .ok_or_else(|| format!("No emoji matches '{}'", args.term))?;
    println!("{}", describe(&db, emoji)?);
    if args.tones {
        print_tones(&db, emoji)?;
    }
    Ok(())
}

fn run_random(config: &EmojiConfig) -> Result<(), String> {
    let db = load_database(config)?;
    let emoji = db
        .pick_random()
        .ok_or_else(|| "The emoji index is empty".to_string())?;
    println!("{}", describe(&db, emoji)?);
    Ok(())
}

fn run_categories(config: &EmojiConfig) -> Result<(), String> {
    let db = load_database(config)?;
    for category in db.list_categories() {
        println!("{category}\t{}", db.list_by_category(category).len());
    }
    Ok(())
}

/// Prefers the compact index and falls back to transforming the raw dataset.
fn load_database(config: &EmojiConfig) -> Result<EmojiDatabase, String> {
    EmojiDatabase::builder()
        .from_file(&config.output_path)
        .from_raw(&config.raw_path)
        .build()
        .map_err(|err| format!("Failed to load emoji data: {err}"))
}

fn describe(db: &EmojiDatabase, emoji: &CompactEmoji) -> Result<String, String> {
    let rendered = db
        .render(&emoji.unified)
        .map_err(|err| format!("Failed to render '{}': {err}", emoji.unified))?;
    Ok(format!("{rendered}\t{}", emoji.names.join(", ")))
}

fn print_tones(db: &EmojiDatabase, emoji: &CompactEmoji) -> Result<(), String> {
    let tones = db
        .render_all_skin_tones(emoji)
        .map_err(|err| format!("Failed to render skin tones of '{}': {err}", emoji.unified))?;
    for tone in tones.unwrap_or_default() {
        println!("  {}\t{}", tone.tone, tone.emoji);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use emojiscript_core::CategoryIndex;
    use emojiscript_db::{CompactDataInfo, RawDataInfo};

    use super::*;

    fn paths() -> PathArgs {
        PathArgs {
            config: None,
            raw: None,
            output: None,
            types: None,
        }
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["emoji"]).unwrap();
        assert!(cli.command.is_none());
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(&paths()).unwrap();
        assert_eq!(config, EmojiConfig::default());
    }

    #[test]
    fn test_resolve_config_flags_override() {
        let config = resolve_config(&PathArgs {
            output: Some("dist/emoji.json".into()),
            ..paths()
        })
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("dist/emoji.json"));
        assert_eq!(config.raw_path, EmojiConfig::default().raw_path);
    }

    #[test]
    fn test_resolve_config_missing_file_is_error() {
        let err = resolve_config(&PathArgs {
            config: Some("/nonexistent/emoji.yml".into()),
            ..paths()
        })
        .unwrap_err();
        assert!(err.contains("/nonexistent/emoji.yml"));
    }

    #[test]
    fn test_format_info_without_compact() {
        let info = DataInfo {
            raw: Some(RawDataInfo {
                bytes: 2048,
                emoji_count: 12,
            }),
            compact: None,
        };
        let text = format_info(&info, &EmojiConfig::default());
        assert!(text.contains("   - Size: 2.00KB\n"));
        assert!(text.contains("   - Emoji Count: 12\n"));
        assert!(text.contains("Run \"emoji clean\" first."));
    }

    #[test]
    fn test_format_info_with_compact() {
        let info = DataInfo {
            raw: None,
            compact: Some(CompactDataInfo {
                bytes: 512,
                reduction_percent: Some(75.0),
                emoji_count: 3,
                category_count: 2,
                checksum: "abc".into(),
                issues: Vec::new(),
            }),
        };
        let text = format_info(&info, &EmojiConfig::default());
        assert!(text.contains("'RawEmojiData.json' not found"));
        assert!(text.contains("   - Size: 0.50KB (75.00% reduction)\n"));
        assert!(text.contains("   - Categories: 2\n"));
        assert!(!text.contains("Issues"));
    }

    #[test]
    fn test_format_clean_report() {
        let report = CleanReport {
            raw_records: 10,
            skipped_records: 1,
            emoji_count: 9,
            category_count: 2,
            original_bytes: 4096,
            compact_bytes: 1024,
            checksum: "deadbeef".into(),
        };
        let text = format_clean_report(&report, Path::new("EmojiData.json"));
        assert!(text.starts_with("Wrote 9 emoji in 2 categories to 'EmojiData.json'.\n"));
        assert!(text.contains("4.00KB -> 1.00KB (75.00% reduction)"));
        assert!(text.contains("Skipped 1 of 10 raw record(s)."));
        assert!(text.ends_with("SHA-256: deadbeef\n"));
    }

    #[test]
    fn test_describe_joins_names() {
        let mut index = CategoryIndex::new();
        index.push_category(
            "People & Body",
            vec![CompactEmoji::new(vec!["thumbs up sign".into(), "+1".into()], "1F44D")],
        );
        let db = EmojiDatabase::new(index);
        let emoji = db.find_first_by_name("+1").unwrap();
        assert_eq!(describe(&db, emoji).unwrap(), "👍\tthumbs up sign, +1");
    }
}
