use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;
use sr_dashboard::config::DashboardConfig;
use sr_dashboard::logging::init_cli_logger;
use sr_dashboard::parser::DelimiterMode;
use sr_dashboard::query::FilterCriteria;
use sr_dashboard::session::DashboardSession;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "sr-dashboard", version, about = "Aggregate SR ticket CSV exports into dashboard JSON")]
struct Cli {
    /// CSV export to read (`-` for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// TOML config file; command-line flags override it
    #[arg(long = "config", short = 'c')]
    config: Option<String>,

    /// Delimiter mode: comma | auto
    #[arg(long = "delimiter")]
    delimiter: Option<String>,

    /// Year the monthly histogram counts
    #[arg(long = "year")]
    year: Option<i32>,

    /// Ranking length for contacts and services
    #[arg(long = "top")]
    top: Option<usize>,

    #[arg(long = "service")] service: Option<String>,
    #[arg(long = "status")] status: Option<String>,
    #[arg(long = "severity")] severity: Option<String>,

    /// Free-text search applied after the filters
    #[arg(long = "search", default_value = "")]
    search: String,

    /// Print only one section: dashboard | contacts | services | options
    #[arg(long = "only")]
    only: Option<String>,

    /// Rewrite service/status/severity values to Portuguese display names
    #[arg(long = "translate", default_value_t = false)]
    translate: bool,

    #[arg(long = "verbose", short = 'v', default_value_t = false)]
    verbose: bool,
}

fn read_input(input: &str) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if input == "-" {
        std::io::stdin().read_to_end(&mut buf).context("failed to read stdin")?;
    } else {
        let mut f = std::fs::File::open(input).with_context(|| format!("failed to open {input}"))?;
        f.read_to_end(&mut buf).with_context(|| format!("failed to read {input}"))?;
    }
    Ok(buf)
}

fn build_config(cli: &Cli) -> anyhow::Result<DashboardConfig> {
    let mut cfg = match &cli.config {
        Some(path) => DashboardConfig::from_file(path).with_context(|| format!("failed to load config {path}"))?,
        None => DashboardConfig::default(),
    };
    if let Some(d) = cli.delimiter.as_deref() {
        cfg.delimiter = match d.to_ascii_lowercase().as_str() {
            "comma" => DelimiterMode::Comma,
            "auto" => DelimiterMode::Auto,
            other => bail!("unknown delimiter mode '{other}' (expected comma or auto)"),
        };
    }
    if let Some(y) = cli.year {
        cfg.target_year = y;
    }
    if let Some(n) = cli.top {
        cfg.top_n = n;
    }
    if cli.translate {
        cfg.translate = true;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let config = build_config(&cli)?;
    let bytes = read_input(&cli.input)?;

    let mut session = DashboardSession::new(config);
    let loaded = session.load_bytes(&bytes).with_context(|| format!("failed to decode {}", cli.input))?;
    tracing::debug!(loaded, input = %cli.input, "input loaded");

    let criteria = FilterCriteria {
        service: cli.service.clone(),
        status: cli.status.clone(),
        severity: cli.severity.clone(),
    };

    let out = match cli.only.as_deref() {
        None => json!({
            "dashboard": session.view(&criteria, &cli.search),
            "options": session.filter_options(),
            "contacts": ranking_or_null(session.top_contacts()),
            "services": ranking_or_null(session.top_services()),
        }),
        Some("dashboard") => serde_json::to_value(session.view(&criteria, &cli.search))?,
        Some("options") => serde_json::to_value(session.filter_options())?,
        Some("contacts") => serde_json::to_value(session.top_contacts()?)?,
        Some("services") => serde_json::to_value(session.top_services()?)?,
        Some(other) => bail!("unknown section '{other}' (expected dashboard, contacts, services or options)"),
    };

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn ranking_or_null(r: sr_dashboard::Result<sr_dashboard::report::RankingReport>) -> serde_json::Value {
    match r {
        Ok(report) => serde_json::to_value(report).unwrap_or(serde_json::Value::Null),
        Err(e) => {
            tracing::warn!(error = %e, "ranking unavailable");
            serde_json::Value::Null
        }
    }
}
