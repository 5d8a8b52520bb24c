//! CLI entry point for gettree

use std::fmt::Display;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use gettree::config::default_config_path;
use gettree::{
    IgnoreRule, Matcher, OutputConfig, RuleSources, StreamingFormatter, TreeConfig, TreeStyle,
    TreeError, TreeWalker, WalkSummary, WalkerConfig, detect_ignore_file, print_json,
};
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
///
/// The result is final: `Always` is not re-checked against the environment.
fn color_choice(mode: ColorMode) -> ColorChoice {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else if std::env::var_os("FORCE_COLOR").is_some() {
                true
            } else if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    if enabled {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}

#[derive(Parser, Debug)]
#[command(name = "gettree")]
#[command(about = "Print a directory tree filtered by .gitignore-style rules")]
#[command(version)]
struct Args {
    /// Directory to display (default: the saved base directory, then ".")
    path: Option<PathBuf>,

    /// Show all files (apply no ignore rules)
    #[arg(short, long)]
    all: bool,

    /// Extra ignore rule, applied after the ignore file (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Read ignore rules from FILE (default: the nearest .gitignore)
    #[arg(long = "ignore-file", value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// Do not look for a .gitignore automatically
    #[arg(long = "no-detect")]
    no_detect: bool,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// List directories only
    #[arg(short = 'd', long = "dirs-only")]
    dirs_only: bool,

    /// Draw the tree with ASCII characters only
    #[arg(long = "ascii")]
    ascii: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Output in JSON format
    #[arg(long = "json", conflicts_with = "output")]
    json: bool,

    /// Write the plain listing to FILE instead of the terminal
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Fail on malformed ignore rules instead of skipping them
    #[arg(long = "strict")]
    strict: bool,

    /// Print the effective ignore rules and exit
    #[arg(long = "show-exclusions")]
    show_exclusions: bool,

    /// Remember the directory, ignore file and -I rules for later runs
    #[arg(long = "save-config")]
    save_config: bool,

    /// Configuration file to use (default: platform config directory)
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ignore the saved configuration
    #[arg(long = "no-config", conflicts_with_all = ["config", "save_config"])]
    no_config: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = if args.no_config {
        None
    } else {
        match args.config.clone() {
            Some(path) => Some(path),
            None => default_config_path()
                .map_err(|e| tracing::warn!("{}", e))
                .ok(),
        }
    };

    let saved = match config_path {
        Some(ref path) => TreeConfig::load(path).unwrap_or_else(|e| fail(e)),
        None => TreeConfig::default(),
    };

    let root = resolve_root(args.path.as_deref().or(saved.base_dir.as_deref()));
    let sources = resolve_sources(&args, &saved, &root);

    if args.save_config {
        if let Some(ref path) = config_path {
            let updated = TreeConfig {
                base_dir: Some(root.clone()),
                ignore_file: args
                    .ignore_file
                    .as_deref()
                    .map(|path| resolve_root(Some(path)))
                    .or(saved.ignore_file.clone()),
                exclusions: if args.ignore.is_empty() {
                    saved.exclusions.clone()
                } else {
                    Some(args.ignore.join("\n"))
                },
            };
            updated.save(path).unwrap_or_else(|e| fail(e));
            eprintln!("gettree: saved configuration to {}", path.display());
        }
    }

    let lines = sources.resolve().unwrap_or_else(|e| fail(e));
    let matcher = if args.strict {
        Matcher::compile_strict(&lines).unwrap_or_else(|e| fail(e))
    } else {
        Matcher::compile(&lines)
    };

    if args.show_exclusions {
        print_exclusions(&matcher, &sources);
        return;
    }

    let walker_config = WalkerConfig {
        max_depth: args.level,
        dirs_only: args.dirs_only,
        ..Default::default()
    };
    let walker = TreeWalker::new(walker_config).with_matcher(matcher);
    let style = if args.ascii {
        TreeStyle::Ascii
    } else {
        TreeStyle::Unicode
    };

    let summary = if args.json {
        let (tree, summary) = walker.walk_tree(&root).unwrap_or_else(|e| fail(e));
        if let Err(e) = print_json(&tree) {
            exit_on_output_error(TreeError::Output(e));
        }
        summary
    } else if let Some(ref output) = args.output {
        let listing = walker.listing(&root, style).unwrap_or_else(|e| fail(e));
        fs::write(output, listing.to_text())
            .unwrap_or_else(|e| fail(format!("cannot write '{}': {}", output.display(), e)));
        tracing::info!("wrote {} lines to {}", listing.lines.len(), output.display());
        listing.summary
    } else {
        let output_config = OutputConfig {
            color: color_choice(args.color),
            style,
            ..Default::default()
        };
        let mut formatter = StreamingFormatter::new(output_config);
        walker
            .walk(&root, &mut formatter)
            .unwrap_or_else(|e| exit_on_output_error(e))
    };

    report_skipped(&summary);
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("GETTREE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn fail(message: impl Display) -> ! {
    eprintln!("gettree: {}", message);
    process::exit(1);
}

/// A closed stdout (`gettree | head`) ends the run quietly.
fn exit_on_output_error(err: TreeError) -> ! {
    if matches!(&err, TreeError::Output(e) if e.kind() == io::ErrorKind::BrokenPipe) {
        process::exit(0);
    }
    fail(err)
}

/// Make `path` (default ".") absolute against the working directory.
fn resolve_root(path: Option<&Path>) -> PathBuf {
    let path = path.unwrap_or(Path::new("."));
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

/// Pick the rule sources for this run. `--all` disables every source.
fn resolve_sources(args: &Args, saved: &TreeConfig, root: &Path) -> RuleSources {
    if args.all {
        return RuleSources::default();
    }

    let saved_file = saved.ignore_file.clone().filter(|path| {
        let exists = path.is_file();
        if !exists {
            tracing::warn!("saved ignore file {} no longer exists", path.display());
        }
        exists
    });

    let ignore_file = args.ignore_file.clone().or(saved_file).or_else(|| {
        if args.no_detect {
            None
        } else {
            detect_ignore_file(root)
        }
    });
    if let Some(ref path) = ignore_file {
        tracing::info!("using ignore file {}", path.display());
    }

    RuleSources {
        ignore_file,
        exclusions: saved.exclusions.clone(),
        extra: args.ignore.clone(),
    }
}

fn print_exclusions(matcher: &Matcher, sources: &RuleSources) {
    if let Some(ref path) = sources.ignore_file {
        println!("# {}", path.display());
    }
    if matcher.is_empty() {
        println!("No ignore rules");
        return;
    }
    for rule in matcher.rules() {
        println!("{:>4}  {}{}", rule.line_number(), rule.text(), rule_flags(rule));
    }
}

fn rule_flags(rule: &IgnoreRule) -> String {
    let mut flags = Vec::new();
    if rule.is_negated() {
        flags.push("negated");
    }
    if rule.is_dir_only() {
        flags.push("dir-only");
    }
    if rule.is_anchored() {
        flags.push("anchored");
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", flags.join(", "))
    }
}

fn report_skipped(summary: &WalkSummary) {
    for skipped in &summary.skipped {
        eprintln!(
            "gettree: skipped '{}': {}",
            skipped.path.display(),
            skipped.kind
        );
    }
}
