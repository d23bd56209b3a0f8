// Engine main entry point: a terminal stand-in for the dashboard.
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::EngineSettings;
use engine::report::{self, Rendered};
use engine::services::AnalyzerSession;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "engine",
    version,
    about = "Individual performance report from a unified consultant base (.csv)"
)]
struct Cli {
    /// Unified base CSV
    csv: PathBuf,

    /// Consultant e-mail to report on
    #[arg(short, long)]
    email: Option<String>,

    /// Print the consultant e-mails found in the base
    #[arg(short, long)]
    list: bool,

    /// Emit the consultant history as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Engine settings (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so report output on stdout stays clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => EngineSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };

    info!("Starting consultant performance analyzer...");
    let mut session = AnalyzerSession::new(settings);
    let table = session
        .upload_path(&cli.csv)
        .with_context(|| format!("loading {}", cli.csv.display()))?;

    if cli.list {
        for email in session.emails() {
            println!("{}", email);
        }
        return Ok(());
    }

    let Some(email) = cli.email.as_deref() else {
        print!("{}", report::render_summary(&table)?);
        return Ok(());
    };

    match report::render_selection(&session, Some(email), cli.json)? {
        Rendered::Report(out) => print!("{}", out),
        // Nothing to show for this selection; not a failure.
        Rendered::Nothing(notice) => eprintln!("{}", notice),
    }
    Ok(())
}
