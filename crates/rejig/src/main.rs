use clap::{Parser, Subcommand};
use rejig::commands;

#[derive(Parser)]
#[command(name = "rejig", version, about = "Recipe-driven rewriter for Java sources")]
struct Cli {
    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite Java sources under a path
    Run(commands::run::RunArgs),
    /// List available recipes
    List(commands::list::ListArgs),
    /// Show one recipe in detail
    Describe(commands::describe::DescribeArgs),
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Run(args) => commands::run::cmd_run(&args, cli.json),
        Commands::List(args) => commands::list::cmd_list(&args, cli.json),
        Commands::Describe(args) => commands::describe::cmd_describe(&args, cli.json),
    };
    std::process::exit(code);
}
