use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::SessionCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session management.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Analyze an equipment photo into an observation.
    Analyze(AnalyzeArgs),
    /// Search manuals, runbooks and past incidents.
    KbSearch(KbSearchArgs),
    /// Generate a cited repair plan.
    Plan(PlanArgs),
    /// Run the safety rules over a plan.
    Safety(SafetyArgs),
    /// Check the latest plan's citations and quality.
    Qa(QaArgs),
    /// Create a work order from a plan.
    WorkOrder(WorkOrderArgs),
    /// Run every stage for a new session.
    Run(RunArgs),
    /// Write a session export file.
    Export(ExportArgs),
    /// Timing summary for a session.
    Metrics(SessionArg),
    /// Earlier sessions with the same scenario.
    Similar(SimilarArgs),
    /// Append a custom event to a session.
    Event(EventArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SessionArg {
    /// Session ID.
    pub session: String,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Session ID.
    pub session: String,
    /// Image path, relative to the media root.
    #[arg(long)]
    pub image: String,
}

#[derive(Clone, Debug, Args)]
pub struct KbSearchArgs {
    pub query: String,
    /// Store the hits as this session's KB snapshots.
    #[arg(long)]
    pub session: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    /// Session ID.
    pub session: String,
    /// Observation ID (defaults to the session's latest).
    #[arg(long)]
    pub observation: Option<String>,
    /// JSON file with KB results (defaults to the session's KB snapshots).
    #[arg(long)]
    pub kb_results: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SafetyArgs {
    /// Session ID.
    pub session: String,
    /// Plan ID.
    #[arg(long)]
    pub plan: String,
}

#[derive(Clone, Debug, Args)]
pub struct QaArgs {
    /// Session ID.
    pub session: String,
}

#[derive(Clone, Debug, Args)]
pub struct WorkOrderArgs {
    /// Session ID.
    pub session: String,
    /// Plan ID.
    #[arg(long)]
    pub plan: String,
    /// Proceed even though the safety check failed.
    #[arg(long)]
    pub acknowledge_safety: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    #[arg(long)]
    pub scenario: String,
    #[arg(long)]
    pub description: String,
    /// Image path, relative to the media root.
    #[arg(long)]
    pub image: String,
    /// Create the work order even if the safety check fails.
    #[arg(long)]
    pub acknowledge_safety: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Session ID.
    pub session: String,
    /// Output directory (defaults to `paths.export_dir`).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SimilarArgs {
    /// Session ID.
    pub session: String,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct EventArgs {
    /// Session ID.
    pub session: String,
    /// Event tag, e.g. TECH_NOTE.
    #[arg(long = "type")]
    pub event_type: String,
    /// JSON object stored as event metadata.
    #[arg(long)]
    pub metadata: Option<String>,
}
