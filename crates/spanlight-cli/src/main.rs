use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spanlight_cli::{message_to_text, term_summary, Markers};
use spanlight_core::{decode_records, Segment};
use spanlight_engine::{classify, HighlightConfig, Highlighter};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spanlight")]
#[command(about = "Highlight evidence terms in conversation text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Highlight terms in a single text (json segments or marked text).
    Highlight(HighlightCmd),
    /// Report which renderer a text would use: json, markup, or plain.
    Classify(ClassifyCmd),
    /// Render message records (json array, object, or jsonl) with their evidence terms.
    Render(RenderCmd),
    /// Print version info.
    Version(VersionCmd),
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Inline text to process.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
    /// Read text from a file ("-" for stdin).
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct MatchArgs {
    /// Minimum word-set similarity for fuzzy matches, in [0, 1].
    #[arg(long, env = "SPANLIGHT_MIN_SIMILARITY")]
    min_similarity: Option<f64>,
    /// Fuzzy window length as a multiple of the term's word count (>= 1).
    #[arg(long, env = "SPANLIGHT_WINDOW_SCALE")]
    window_scale: Option<f64>,
    /// Only highlight literal (case-insensitive) occurrences.
    #[arg(long, default_value_t = false)]
    no_fuzzy: bool,
    /// Keep stopwords when scoring fuzzy windows.
    #[arg(long, default_value_t = false)]
    keep_stopwords: bool,
}

impl MatchArgs {
    fn highlighter(&self) -> Result<Highlighter> {
        let mut cfg = HighlightConfig::from_env();
        if let Some(v) = self.min_similarity {
            cfg = cfg.with_min_similarity(v);
        }
        if let Some(v) = self.window_scale {
            cfg = cfg.with_window_scale(v);
        }
        if self.no_fuzzy {
            cfg = cfg.with_fuzzy(false);
        }
        if self.keep_stopwords {
            cfg = cfg.with_ignore_stopwords(false);
        }
        Ok(Highlighter::new(cfg)?)
    }
}

#[derive(clap::Args, Debug)]
struct MarkerArgs {
    /// Opening marker for highlighted spans in text output.
    #[arg(long, default_value = "[[")]
    open: String,
    /// Closing marker for highlighted spans in text output.
    #[arg(long, default_value = "]]")]
    close: String,
}

impl MarkerArgs {
    fn markers(&self) -> Markers {
        Markers {
            open: self.open.clone(),
            close: self.close.clone(),
        }
    }
}

#[derive(clap::Args, Debug)]
struct HighlightCmd {
    #[command(flatten)]
    input: InputArgs,
    /// Evidence term (repeatable).
    #[arg(long)]
    term: Vec<String>,
    #[command(flatten)]
    matching: MatchArgs,
    #[command(flatten)]
    markers: MarkerArgs,
    /// Output format: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct ClassifyCmd {
    #[command(flatten)]
    input: InputArgs,
    /// Output format: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct RenderCmd {
    /// Records file ("-" for stdin).
    #[arg(long)]
    file: PathBuf,
    #[command(flatten)]
    matching: MatchArgs,
    #[command(flatten)]
    markers: MarkerArgs,
    /// Output format: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct VersionCmd {
    /// Output format: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

fn read_path(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read stdin")?;
        return Ok(s);
    }
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn read_input(args: &InputArgs) -> Result<String> {
    match (&args.text, &args.file) {
        (Some(t), _) => Ok(t.clone()),
        (None, Some(p)) => read_path(p),
        (None, None) => bail!("one of --text or --file is required"),
    }
}

fn init_tracing() {
    // stdout carries results; logs go to stderr.
    let filter = EnvFilter::try_from_env("SPANLIGHT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Highlight(args) => {
            let text = read_input(&args.input)?;
            let hl = args.matching.highlighter()?;
            let outcome = hl.highlight(&text, &args.term);
            tracing::debug!(
                terms = args.term.len(),
                matched = outcome.matched_terms(),
                ranges = outcome.ranges.len(),
                "highlight done"
            );
            match args.output.to_ascii_lowercase().as_str() {
                "text" => {
                    let markers = args.markers.markers();
                    let body = spanlight_engine::marked_text(
                        &outcome.segments,
                        &markers.open,
                        &markers.close,
                    );
                    println!("{body}");
                    if !outcome.terms.is_empty() {
                        eprintln!("terms:\n{}", term_summary(&outcome.terms));
                    }
                }
                _ => {
                    let keys: Vec<String> = outcome.segments.iter().map(Segment::key).collect();
                    let v = serde_json::json!({
                        "schema_version": 1,
                        "kind": "highlight",
                        "ok": true,
                        "config": hl.config(),
                        "segments": outcome.segments,
                        "keys": keys,
                        "ranges": outcome.ranges,
                        "terms": outcome.terms,
                    });
                    println!("{v}");
                }
            }
        }
        Commands::Classify(args) => {
            let text = read_input(&args.input)?;
            let kind = classify(&text);
            match args.output.to_ascii_lowercase().as_str() {
                "text" => println!("{}", kind.as_str()),
                _ => {
                    let v = serde_json::json!({
                        "schema_version": 1,
                        "kind": "classify",
                        "ok": true,
                        "content_kind": kind,
                    });
                    println!("{v}");
                }
            }
        }
        Commands::Render(args) => {
            let raw = read_path(&args.file)?;
            let records = decode_records(&raw).context("decode records")?;
            let hl = args.matching.highlighter()?;
            let rendered: Vec<_> = records.iter().map(|r| hl.render_message(r)).collect();
            tracing::debug!(messages = rendered.len(), "render done");
            match args.output.to_ascii_lowercase().as_str() {
                "text" => {
                    let markers = args.markers.markers();
                    for m in &rendered {
                        print!("{}", message_to_text(m, &markers));
                    }
                }
                _ => {
                    let v = serde_json::json!({
                        "schema_version": 1,
                        "kind": "render",
                        "ok": true,
                        "messages": rendered,
                    });
                    println!("{v}");
                }
            }
        }
        Commands::Version(args) => {
            let v = serde_json::json!({
                "schema_version": 1,
                "kind": "version",
                "ok": true,
                "name": "spanlight",
                "version": env!("CARGO_PKG_VERSION"),
            });
            match args.output.to_ascii_lowercase().as_str() {
                "text" => println!("spanlight {}", env!("CARGO_PKG_VERSION")),
                _ => println!("{}", v),
            }
        }
    }
    Ok(())
}
