//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `phishscore` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Wiring remote model endpoints into the predictor
//! - Printing one JSON result per URL
//!
//! All core functionality is implemented in the library crate.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use strum::VariantNames;
use structopt::StructOpt;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use phishscore::config::DEFAULT_PHISHING_THRESHOLD;
use phishscore::initialization::{init_client, init_logger_with, init_resolver};
use phishscore::intel::{
    risk_adjustment, DnsChecker, IntelChecker, SafeBrowsingClient, WhoisClient,
};
use phishscore::{
    EnsemblePredictor, LogFormat, LogLevel, ModelSource, PayloadMode, PredictorConfig,
    ReferenceData, RemoteModel,
};

/// Environment variable holding the Safe Browsing API key.
const SAFE_BROWSING_KEY_ENV: &str = "GOOGLE_SAFE_BROWSING_API_KEY";

#[derive(Debug, StructOpt)]
#[structopt(
    name = "phishscore",
    about = "Scores URLs for phishing risk and prints one JSON result per URL."
)]
struct Opt {
    /// URLs to score (read from --file or stdin when omitted)
    urls: Vec<String>,

    /// File with one URL per line; blank lines and lines starting with '#' are skipped
    #[structopt(short, long, parse(from_os_str))]
    file: Option<PathBuf>,

    /// Phishing decision threshold
    #[structopt(long)]
    threshold: Option<f64>,

    /// Weight of the transformer encoder model
    #[structopt(long)]
    electra_weight: Option<f64>,

    /// Weight of the character-level model
    #[structopt(long)]
    biformer_weight: Option<f64>,

    /// Weight of the tree model
    #[structopt(long)]
    lgbm_weight: Option<f64>,

    /// Do not dampen probabilities by domain trust
    #[structopt(long)]
    no_trust_adjustment: bool,

    /// Do not apply safe/phishing rule overrides
    #[structopt(long)]
    no_rule_overrides: bool,

    /// JSON file with reference tables overriding the built-in ones
    #[structopt(long, parse(from_os_str))]
    reference: Option<PathBuf>,

    /// Inference endpoint of the transformer encoder model
    #[structopt(long)]
    electra_endpoint: Option<Url>,

    /// Inference endpoint of the character-level model
    #[structopt(long)]
    biformer_endpoint: Option<Url>,

    /// Inference endpoint of the tree model (receives the numeric feature vector)
    #[structopt(long)]
    lgbm_endpoint: Option<Url>,

    /// Per-model timeout in seconds
    #[structopt(long, default_value = "10")]
    model_timeout_secs: u64,

    /// Also run Safe Browsing, DNS and registration checks (key from GOOGLE_SAFE_BROWSING_API_KEY)
    #[structopt(long)]
    intel: bool,

    /// Pretty-print JSON output
    #[structopt(long)]
    pretty: bool,

    /// Log level
    #[structopt(long, default_value = "info", possible_values = LogLevel::VARIANTS, case_insensitive = true)]
    log_level: LogLevel,

    /// Log format
    #[structopt(long, default_value = "plain", possible_values = LogFormat::VARIANTS, case_insensitive = true)]
    log_format: LogFormat,
}

impl Opt {
    fn predictor_config(&self) -> PredictorConfig {
        let defaults = PredictorConfig::default();
        PredictorConfig {
            electra_weight: self.electra_weight.unwrap_or(defaults.electra_weight),
            biformer_weight: self.biformer_weight.unwrap_or(defaults.biformer_weight),
            lgbm_weight: self.lgbm_weight.unwrap_or(defaults.lgbm_weight),
            threshold: self.threshold.unwrap_or(DEFAULT_PHISHING_THRESHOLD),
            enable_trust_adjustment: !self.no_trust_adjustment,
            enable_rule_overrides: !self.no_rule_overrides,
            model_timeout: Duration::from_secs(self.model_timeout_secs),
        }
    }
}

/// Keeps non-empty lines that are not comments.
fn parse_url_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

async fn read_lines<R: tokio::io::AsyncRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut out = Vec::new();
    while let Some(line) = lines.next_line().await? {
        out.push(line);
    }
    Ok(out)
}

async fn load_urls(opt: &Opt) -> Result<Vec<String>> {
    if !opt.urls.is_empty() {
        return Ok(opt.urls.clone());
    }
    let lines = match &opt.file {
        Some(path) if path != Path::new("-") => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_lines(file).await?
        }
        _ => read_lines(tokio::io::stdin())
            .await
            .context("Failed to read URLs from stdin")?,
    };
    Ok(parse_url_lines(lines))
}

fn build_predictor(opt: &Opt, client: &reqwest::Client) -> Result<EnsemblePredictor> {
    let reference = match &opt.reference {
        Some(path) => ReferenceData::from_json_file(path)?,
        None => ReferenceData::default(),
    };
    let mut predictor = EnsemblePredictor::new(opt.predictor_config(), reference)
        .context("Invalid predictor configuration")?;

    let endpoints = [
        (ModelSource::Electra, &opt.electra_endpoint, PayloadMode::Url),
        (ModelSource::Biformer, &opt.biformer_endpoint, PayloadMode::Url),
        (ModelSource::Lgbm, &opt.lgbm_endpoint, PayloadMode::Features),
    ];
    for (source, endpoint, payload) in endpoints {
        if let Some(endpoint) = endpoint {
            let model = RemoteModel::new(source, endpoint.clone(), client.clone())
                .with_payload(payload)
                .with_extractor(predictor.extractor().clone());
            predictor = predictor.with_model(Arc::new(model));
        }
    }

    for status in predictor.model_status() {
        log::info!(
            "Model {}: {}",
            status.source,
            if status.configured { "remote" } else { "not configured" }
        );
    }
    if !predictor.has_available_model() {
        log::warn!("No model endpoints configured, scoring from domain trust only");
    }
    Ok(predictor)
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::from_args();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let urls = load_urls(&opt).await?;
    if urls.is_empty() {
        bail!("No URLs to score");
    }

    let client = init_client(Duration::from_secs(opt.model_timeout_secs.max(1)))
        .context("Failed to initialize HTTP client")?;
    let predictor = build_predictor(&opt, &client)?;

    log::info!("Scoring {} URL(s)", urls.len());
    let predictions = predictor.predict_batch(&urls).await;

    let intel = if opt.intel {
        let api_key = std::env::var(SAFE_BROWSING_KEY_ENV).ok();
        let checker = IntelChecker::new()
            .with_safe_browsing(SafeBrowsingClient::new(client.clone(), api_key))
            .with_dns(DnsChecker::new(init_resolver()))
            .with_whois(WhoisClient::new(client.clone()));
        let reports = join_all(urls.iter().map(|url| checker.check(url, None))).await;
        Some(reports)
    } else {
        None
    };

    for (index, prediction) in predictions.iter().enumerate() {
        let value = match intel.as_ref().and_then(|reports| reports.get(index)) {
            Some(report) => serde_json::json!({
                "prediction": prediction,
                "intel": report,
                "intel_adjustment": risk_adjustment(report),
            }),
            None => serde_json::to_value(prediction)?,
        };
        let line = if opt.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        println!("{line}");
    }

    let flagged = predictions.iter().filter(|p| p.is_phishing).count();
    log::info!("{} of {} URL(s) flagged as phishing", flagged, predictions.len());
    Ok(())
}
