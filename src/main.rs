use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use pdp_validator::history::HistoryEntry;
use pdp_validator::{
    render, Evaluator, History, HtmlPage, JsonFileStore, RenderHints, Session, ValidatorConfig,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pdp-validator", version, about = "Quality report for Samsung product pages")]
struct Cli {
    #[arg(long, global = true, help = "JSON config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "History file (overrides the config)")]
    history_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a saved page
    Validate {
        #[arg(help = "HTML file, or - for stdin")]
        html: PathBuf,
        #[arg(long, help = "Address the page was loaded from")]
        url: String,
        #[arg(long, help = "JSON render hints captured in a browser")]
        hints: Option<PathBuf>,
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
        #[arg(long, help = "Also export the report into this directory")]
        export: Option<PathBuf>,
        #[arg(long, help = "Do not store the report in history")]
        no_history: bool,
        #[arg(long, help = "Validate even if the URL is not a Samsung page")]
        force: bool,
    },
    /// List stored reports, or show one
    History {
        #[arg(long)]
        show: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Export a stored report
    Export {
        id: i64,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>, history_file: Option<PathBuf>) -> Result<ValidatorConfig> {
    let mut cfg = match path {
        Some(p) => ValidatorConfig::from_file(p)?,
        None => ValidatorConfig::default(),
    };
    if history_file.is_some() {
        cfg.history_path = history_file;
    }
    Ok(cfg)
}

fn read_html(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading page from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn open_history(cfg: &ValidatorConfig) -> Result<History<JsonFileStore>> {
    Ok(History::new(
        JsonFileStore::new(cfg.history_file()?),
        cfg.history_capacity,
    ))
}

#[allow(clippy::too_many_arguments)]
fn validate(
    cfg: ValidatorConfig,
    html: &Path,
    url: &str,
    hints: Option<&Path>,
    json: bool,
    export: Option<&Path>,
    no_history: bool,
    force: bool,
) -> Result<()> {
    let mut session = if force {
        Session::unchecked(url)
    } else {
        Session::open(url, &cfg.site_patterns)?
    };

    let hints = match hints {
        Some(p) => RenderHints::from_json(
            &std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        )?,
        None => RenderHints::default(),
    };
    let evaluator = Evaluator::new(cfg.clone())?;
    let page = HtmlPage::with_hints(url, &read_html(html)?, hints, evaluator.config().viewport)?;

    let report = if no_history {
        session.validate(&evaluator, &page)
    } else {
        let mut history = open_history(&cfg)?;
        session.validate_and_record(&evaluator, &page, &mut history)
    }
    .context("Error al validar")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
    } else {
        render::render_report(report, &mut out)?;
        writeln!(out)?;
        writeln!(out, "{}", render::summary_line(report))?;
    }

    if let Some(dir) = export {
        let path = session.export(dir, Utc::now())?;
        eprintln!("Reporte exportado: {}", path.display());
    }
    Ok(())
}

fn history(cfg: ValidatorConfig, show: Option<i64>, json: bool) -> Result<()> {
    let history = open_history(&cfg)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match show {
        Some(id) => {
            let session = Session::from_history(&history, id)?;
            let report = session
                .current()
                .context("stored report missing from session")?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
            } else {
                render::render_report(report, &mut out)?;
            }
        }
        None => {
            let entries: Vec<HistoryEntry> = history.entries();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
            } else {
                render::render_history(&entries, &mut out)?;
            }
        }
    }
    Ok(())
}

fn export(cfg: ValidatorConfig, id: i64, out: &Path) -> Result<()> {
    let history = open_history(&cfg)?;
    let session = Session::from_history(&history, id)?;
    let path = session.export(out, Utc::now())?;
    println!("{}", path.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(cli.config.as_deref(), cli.history_file)?;
    match cli.command {
        Commands::Validate {
            html,
            url,
            hints,
            json,
            export: export_dir,
            no_history,
            force,
        } => validate(
            cfg,
            &html,
            &url,
            hints.as_deref(),
            json,
            export_dir.as_deref(),
            no_history,
            force,
        ),
        Commands::History { show, json } => history(cfg, show, json),
        Commands::Export { id, out } => export(cfg, id, &out),
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
