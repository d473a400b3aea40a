//! The published document set.
//!
//! Five JSON documents and one Markdown note, rebuilt from scratch on every
//! run. Field names are consumed by other services over static hosting and
//! must not be renamed.
//!
//! | file            | contents |
//! |-----------------|----------|
//! | `current.json`  | newest period, next period, prediction and its trace |
//! | `previous.json` | the newest 15 results classified BIG/SMALL |
//! | `all.json`      | current + previous bundled with formula documentation |
//! | `stats.json`    | placeholder statistics |
//! | `info.json`     | service description and endpoint list |
//! | `README.md`     | human-readable notes |

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use drawcast_core::predict::{Calculation, Prediction, WINDOW, predict};
use drawcast_core::{DrawResult, NumberSeries, Verdict, next_period};
use serde::Serialize;

use crate::BuildError;
use crate::metrics::{PlaceholderMetrics, SyntheticFigures};

/// Number of newest results listed in `previous.json`.
pub const RECENT_WINDOW: usize = 15;

pub const API_VERSION: &str = "2.0";

/// Series used for the worked example in the documentation fields.
pub const WORKED_EXAMPLE: [i32; WINDOW] = [5, 8, 4, 5, 4, 6, 4, 8, 5, 2];

const DATA_SOURCE: &str = "Live Lottery API";
const RULE: &str = "BIG if result ≥5, SMALL if <5";

/// One output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Current,
    Previous,
    All,
    Stats,
    Info,
    Readme,
}

impl DocumentKind {
    /// The JSON documents, in publication order. These are the paths that
    /// receive the error document when a run fails.
    pub const JSON: [DocumentKind; 5] = [
        DocumentKind::Current,
        DocumentKind::Previous,
        DocumentKind::All,
        DocumentKind::Stats,
        DocumentKind::Info,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Current => "current.json",
            DocumentKind::Previous => "previous.json",
            DocumentKind::All => "all.json",
            DocumentKind::Stats => "stats.json",
            DocumentKind::Info => "info.json",
            DocumentKind::Readme => "README.md",
        }
    }
}

/// Everything run-wide the documents need besides the draws themselves.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Single timestamp stamped on every document of the run.
    pub issued_at: DateTime<Utc>,
    /// Public URL the output directory itself is served under.
    pub public_base_url: String,
    /// Scheduler cadence, used only in descriptive fields.
    pub interval: Duration,
    pub service_name: String,
}

impl BuildContext {
    pub fn timestamp(&self) -> String {
        iso_timestamp(self.issued_at)
    }

    pub fn url_for(&self, kind: DocumentKind) -> String {
        format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            kind.file_name()
        )
    }

    fn next_update(&self) -> String {
        let step = chrono::Duration::from_std(self.interval).unwrap_or(chrono::Duration::zero());
        iso_timestamp(self.issued_at.checked_add_signed(step).unwrap_or(self.issued_at))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentDocument {
    pub period: String,
    pub next_period: String,
    pub prediction: Verdict,
    pub derived_number: i64,
    pub confidence: u8,
    pub status: &'static str,
    pub timestamp: String,
    pub calculation: Calculation,
    pub last_10_numbers: Vec<i32>,
    pub data_source: &'static str,
    pub api_version: &'static str,
    pub update_frequency: String,
    pub total_results: usize,
    pub live: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentResult {
    pub period: String,
    pub number: i32,
    pub big_small: Verdict,
    pub is_big: bool,
    pub draw_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentSummary {
    pub big_count: usize,
    pub small_count: usize,
    pub big_percentage: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviousDocument {
    pub results: Vec<RecentResult>,
    pub count: usize,
    pub summary: RecentSummary,
    pub last_updated: String,
    pub live_data: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BundleStatistics {
    pub total_predictions: usize,
    pub live_update: String,
    pub api_status: &'static str,
    pub data_freshness: &'static str,
    pub next_update_in: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculationInfo {
    pub formula: String,
    pub example: String,
    pub rule: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BundleDocument {
    pub current_prediction: CurrentDocument,
    pub previous_results: Vec<RecentResult>,
    pub statistics: BundleStatistics,
    pub calculation_info: CalculationInfo,
    pub api_endpoints: Vec<String>,
    pub timestamp: String,
    pub live: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsDocument {
    pub live_statistics: crate::metrics::LiveStatistics,
    pub performance: crate::metrics::Performance,
    pub last_updated: String,
    pub data_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: &'static str,
    pub status: &'static str,
    pub live_data: bool,
    pub update_frequency: String,
    pub last_update: String,
    pub next_update: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoints {
    pub current: String,
    pub all: String,
    pub previous: String,
    pub stats: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormulaInfo {
    pub formula: &'static str,
    pub logic: &'static str,
    pub example: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoDocument {
    pub api: ApiInfo,
    pub endpoints: Endpoints,
    pub calculation: FormulaInfo,
}

/// Written to every JSON path when a run fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDocument {
    pub error: bool,
    pub message: &'static str,
    pub details: String,
    pub timestamp: String,
    pub status: &'static str,
    pub retry_in: String,
}

impl ErrorDocument {
    pub fn new(details: impl Into<String>, issued_at: DateTime<Utc>, interval: Duration) -> Self {
        Self {
            error: true,
            message: "Failed to fetch live data",
            details: details.into(),
            timestamp: iso_timestamp(issued_at),
            status: "OFFLINE",
            retry_in: in_label(interval),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A document serialised and ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub contents: String,
}

/// All documents of one successful run.
#[derive(Debug, Clone)]
pub struct DocumentSet {
    pub current: CurrentDocument,
    pub previous: PreviousDocument,
    pub bundle: BundleDocument,
    pub stats: StatsDocument,
    pub info: InfoDocument,
    pub readme: String,
}

impl DocumentSet {
    /// Serialise every document, JSON pretty-printed with two-space indent.
    pub fn render(&self) -> Result<Vec<RenderedDocument>, BuildError> {
        let doc = |kind, contents| RenderedDocument { kind, contents };
        Ok(vec![
            doc(DocumentKind::Current, serde_json::to_string_pretty(&self.current)?),
            doc(DocumentKind::Previous, serde_json::to_string_pretty(&self.previous)?),
            doc(DocumentKind::All, serde_json::to_string_pretty(&self.bundle)?),
            doc(DocumentKind::Stats, serde_json::to_string_pretty(&self.stats)?),
            doc(DocumentKind::Info, serde_json::to_string_pretty(&self.info)?),
            doc(DocumentKind::Readme, self.readme.clone()),
        ])
    }
}

/// Assemble every document for one run.
///
/// `draws` is the full upstream page, newest first. An empty page is an
/// error because there is no period to report.
pub fn build_documents(
    ctx: &BuildContext,
    draws: &[DrawResult],
    prediction: &Prediction,
    metrics: &mut dyn PlaceholderMetrics,
) -> Result<DocumentSet, BuildError> {
    let newest = draws.first().ok_or(BuildError::NoResults)?;
    let timestamp = ctx.timestamp();
    let series = NumberSeries::from_draws(draws);

    let current = CurrentDocument {
        period: newest.period.clone(),
        next_period: next_period(&newest.period)?,
        prediction: prediction.verdict,
        derived_number: prediction.derived_number,
        confidence: prediction.confidence,
        status: "LIVE",
        timestamp: timestamp.clone(),
        calculation: prediction.calculation.clone(),
        last_10_numbers: series.newest(WINDOW).to_vec(),
        data_source: DATA_SOURCE,
        api_version: API_VERSION,
        update_frequency: every_label(ctx.interval),
        total_results: draws.len(),
        live: true,
    };

    let previous = build_previous(draws, &timestamp);
    let (formula_example, bundle_example) = worked_examples();

    let bundle = BundleDocument {
        current_prediction: current.clone(),
        previous_results: previous.results.clone(),
        statistics: BundleStatistics {
            total_predictions: draws.len(),
            live_update: timestamp.clone(),
            api_status: "ACTIVE",
            data_freshness: "LIVE",
            next_update_in: in_label(ctx.interval),
        },
        calculation_info: CalculationInfo {
            formula: "(first_number + fifth_number) - last_number = result".to_string(),
            example: bundle_example,
            rule: RULE,
        },
        api_endpoints: [DocumentKind::Current, DocumentKind::All, DocumentKind::Previous]
            .into_iter()
            .map(|kind| ctx.url_for(kind))
            .collect(),
        timestamp: timestamp.clone(),
        live: true,
    };

    let SyntheticFigures {
        live_statistics,
        performance,
    } = metrics.generate();
    let stats = StatsDocument {
        live_statistics,
        performance,
        last_updated: timestamp.clone(),
        data_type: "LIVE_CALCULATION",
    };

    let info = InfoDocument {
        api: ApiInfo {
            name: ctx.service_name.clone(),
            version: API_VERSION,
            status: "ACTIVE",
            live_data: true,
            update_frequency: seconds_label(ctx.interval),
            last_update: timestamp.clone(),
            next_update: ctx.next_update(),
        },
        endpoints: Endpoints {
            current: ctx.url_for(DocumentKind::Current),
            all: ctx.url_for(DocumentKind::All),
            previous: ctx.url_for(DocumentKind::Previous),
            stats: ctx.url_for(DocumentKind::Stats),
        },
        calculation: FormulaInfo {
            formula: "(numbers[0] + numbers[4]) - numbers[9]",
            logic: RULE,
            example: formula_example,
        },
    };

    Ok(DocumentSet {
        current,
        previous,
        bundle,
        stats,
        info,
        readme: build_readme(ctx),
    })
}

fn build_previous(draws: &[DrawResult], timestamp: &str) -> PreviousDocument {
    let results: Vec<RecentResult> = draws
        .iter()
        .take(RECENT_WINDOW)
        .map(|d| {
            let verdict = Verdict::classify(i64::from(d.number));
            RecentResult {
                period: d.period.clone(),
                number: d.number,
                big_small: verdict,
                is_big: verdict.is_big(),
                draw_time: d.draw_time.clone(),
            }
        })
        .collect();

    let big_count = results.iter().filter(|r| r.is_big).count();
    let count = results.len();
    let big_percentage = if count == 0 {
        0.0
    } else {
        big_count as f64 / count as f64 * 100.0
    };

    PreviousDocument {
        count,
        summary: RecentSummary {
            big_count,
            small_count: count - big_count,
            big_percentage: format!("{big_percentage:.1}%"),
        },
        results,
        last_updated: timestamp.to_string(),
        live_data: true,
    }
}

/// The worked example rendered by running the engine on [`WORKED_EXAMPLE`].
///
/// Returns the `info.json` form and the `all.json` form.
fn worked_examples() -> (String, String) {
    let p = predict(&NumberSeries::new(WORKED_EXAMPLE.to_vec()));
    let numbers = WORKED_EXAMPLE
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let arithmetic = match &p.calculation {
        Calculation::Derived(t) => format!(
            "({}+{})-{}={}",
            t.first_number, t.fifth_number, t.last_number, t.final_result
        ),
        Calculation::Insufficient { error } => error.clone(),
    };
    let example = format!("[{numbers}] → {arithmetic} → {}", p.verdict);
    (example.clone(), format!("Numbers: {example}"))
}

fn build_readme(ctx: &BuildContext) -> String {
    let current_url = ctx.url_for(DocumentKind::Current);
    let files = [
        (DocumentKind::Current, "Current prediction with live data"),
        (DocumentKind::All, "Complete data package"),
        (DocumentKind::Previous, "Previous 15 lottery results"),
        (DocumentKind::Stats, "Statistics and accuracy"),
        (DocumentKind::Info, "API information"),
    ]
    .iter()
    .map(|(kind, what)| format!("- `{}` - {what}", kind.file_name()))
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        "# {name} - JSON FILES\n\
         \n\
         These files are AUTO-GENERATED with LIVE data {cadence}.\n\
         \n\
         ## 📊 Files\n\
         {files}\n\
         \n\
         ## 🔄 Update Schedule\n\
         - Updates every **{secs} seconds**\n\
         - Uses **real lottery API** data\n\
         - **Never cached** - always fresh\n\
         \n\
         ## 🎯 Example Usage\n\
         ```javascript\n\
         // Get current prediction\n\
         fetch('{current_url}')\n\
         \x20 .then(res => res.json())\n\
         \x20 .then(data => console.log(data));\n\
         ```\n\
         \n\
         ## 📅 Last Update\n\
         {updated}\n",
        name = ctx.service_name,
        cadence = every_label(ctx.interval).to_lowercase(),
        secs = ctx.interval.as_secs(),
        updated = ctx.issued_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn iso_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── Cadence labels ──

/// "Every minute", "Every 5 minutes", "Every 90 seconds".
fn every_label(interval: Duration) -> String {
    match interval.as_secs() {
        60 => "Every minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("Every {} minutes", s / 60),
        s => format!("Every {s} seconds"),
    }
}

fn seconds_label(interval: Duration) -> String {
    format!("Every {} seconds", interval.as_secs())
}

/// "1 minute", "5 minutes", "90 seconds".
fn in_label(interval: Duration) -> String {
    match interval.as_secs() {
        60 => "1 minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{s} seconds"),
    }
}
