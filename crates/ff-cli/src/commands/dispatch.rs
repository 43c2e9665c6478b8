use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Session { action } => commands::session::handle(&action, ctx, flags).await,
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags).await,
        Commands::KbSearch(args) => commands::kb_search::handle(&args, ctx, flags).await,
        Commands::Plan(args) => commands::plan::handle(&args, ctx, flags).await,
        Commands::Safety(args) => commands::safety::handle(&args, ctx, flags).await,
        Commands::Qa(args) => commands::qa::handle(&args, ctx, flags).await,
        Commands::WorkOrder(args) => commands::work_order::handle(&args, ctx, flags).await,
        Commands::Run(args) => commands::run::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Metrics(args) => commands::metrics::handle(&args, ctx, flags).await,
        Commands::Similar(args) => commands::similar::handle(&args, ctx, flags).await,
        Commands::Event(args) => commands::event::handle(&args, ctx, flags).await,
    }
}
