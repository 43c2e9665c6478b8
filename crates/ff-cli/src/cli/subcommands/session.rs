use clap::Subcommand;

/// Session lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Open a new repair session.
    Create {
        /// Scenario tag, e.g. scenario1.
        #[arg(long)]
        scenario: String,
        /// What the technician or customer reported.
        #[arg(long)]
        description: String,
    },
    /// List sessions, newest first.
    List {
        /// Maximum number of sessions.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a session and everything it owns.
    Show {
        /// Session ID.
        id: String,
    },
    /// Move a session to the error state.
    Fail {
        /// Session ID.
        id: String,
    },
}
