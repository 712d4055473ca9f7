use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stepnote-cli", version, about = "Stepnote CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step feed: status, readings, simulation
    Steps {
        #[command(subcommand)]
        action: commands::steps::StepsAction,
    },
    /// Milestone prompts
    Milestone {
        #[command(subcommand)]
        action: commands::milestone::MilestoneAction,
    },
    /// Journal notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Writing prompts
    Prompt {
        #[command(subcommand)]
        action: commands::prompt::PromptAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Steps { action } => commands::steps::run(action),
        Commands::Milestone { action } => commands::milestone::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Prompt { action } => commands::prompt::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "stepnote-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
