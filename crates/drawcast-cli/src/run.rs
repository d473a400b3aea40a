//! One run: fetch → compute → build → publish, or publish the error state.
//!
//! There is no partial success. Either every document reflects this run's
//! data, or every JSON path carries the same error document.

use std::path::PathBuf;

use drawcast_core::predict::WINDOW;
use drawcast_core::{NumberSeries, Prediction, predict};
use drawcast_publish::{
    BuildContext, BuildError, ErrorDocument, ErrorPublishReport, PlaceholderMetrics, Publisher,
    WriteError, build_documents,
};
use drawcast_sync::{DrawSource, FetchError};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Computing,
    Building,
    Publishing,
    Done,
    Failed,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("building documents failed: {0}")]
    Build(#[from] BuildError),

    #[error("publishing failed: {0}")]
    Write(#[from] WriteError),
}

impl RunError {
    /// The stage the run was in when this error occurred.
    pub fn stage(&self) -> Stage {
        match self {
            RunError::Fetch(_) => Stage::Fetching,
            RunError::Build(_) => Stage::Building,
            RunError::Write(_) => Stage::Publishing,
        }
    }
}

/// What a successful run reports on stdout.
#[derive(Debug)]
pub struct RunSummary {
    pub period: String,
    pub next_period: String,
    pub prediction: Prediction,
    pub total_results: usize,
    pub written: Vec<PathBuf>,
    pub current_url: String,
    pub issued_at: String,
}

#[derive(Debug)]
pub enum RunOutcome {
    Published(RunSummary),
    Failed {
        error: RunError,
        report: ErrorPublishReport,
    },
}

/// All state of a single invocation. Nothing outlives it.
pub struct RunContext {
    build: BuildContext,
    publisher: Publisher,
    metrics: Box<dyn PlaceholderMetrics + Send>,
    stage: Stage,
}

impl RunContext {
    pub fn new(
        build: BuildContext,
        publisher: Publisher,
        metrics: Box<dyn PlaceholderMetrics + Send>,
    ) -> Self {
        Self {
            build,
            publisher,
            metrics,
            stage: Stage::Fetching,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub async fn run(&mut self, source: &dyn DrawSource) -> RunOutcome {
        match self.try_run(source).await {
            Ok(summary) => {
                self.enter(Stage::Done);
                info!(
                    period = %summary.period,
                    prediction = %summary.prediction.verdict,
                    derived = summary.prediction.derived_number,
                    confidence = summary.prediction.confidence,
                    "all documents published"
                );
                RunOutcome::Published(summary)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Move to `Failed` and publish the error document to every JSON path.
    pub fn fail(&mut self, error: RunError) -> RunOutcome {
        error!(stage = ?error.stage(), error = %error, "run failed, publishing error documents");
        self.enter(Stage::Failed);

        let doc = ErrorDocument::new(error.to_string(), self.build.issued_at, self.build.interval);
        let report = self.publisher.publish_error(&doc);
        if !report.is_complete() {
            error!(
                written = report.written.len(),
                failed = report.failed.len(),
                "some error documents could not be written"
            );
        }
        RunOutcome::Failed { error, report }
    }

    async fn try_run(&mut self, source: &dyn DrawSource) -> Result<RunSummary, RunError> {
        self.enter(Stage::Fetching);
        let draws = source.fetch_recent().await?;

        self.enter(Stage::Computing);
        let series = NumberSeries::from_draws(&draws);
        info!(window = ?series.newest(WINDOW), total = series.len(), "computing prediction");
        let prediction = predict(&series);

        self.enter(Stage::Building);
        let docs = build_documents(&self.build, &draws, &prediction, self.metrics.as_mut())?;
        let rendered = docs.render()?;

        self.enter(Stage::Publishing);
        let written = self.publisher.publish(&rendered)?;

        Ok(RunSummary {
            period: docs.current.period,
            next_period: docs.current.next_period,
            prediction,
            total_results: draws.len(),
            written,
            current_url: self.build.url_for(drawcast_publish::DocumentKind::Current),
            issued_at: docs.current.timestamp,
        })
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = ?self.stage, to = ?stage, "stage transition");
        self.stage = stage;
    }
}
