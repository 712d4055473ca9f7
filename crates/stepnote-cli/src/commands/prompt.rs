use clap::Subcommand;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::Serialize;
use stepnote_core::storage::Config;
use stepnote_core::PromptBank;

#[derive(Subcommand)]
pub enum PromptAction {
    /// Writing prompt for a step-count crossing, if any
    ForSteps {
        /// Current cumulative step count
        steps: u32,
        /// Step count at the previous reading
        #[arg(long, default_value = "0")]
        previous: u32,
        /// Seed for deterministic prompt selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the prompt table
    List,
}

#[derive(Serialize)]
struct PromptOutput<'a> {
    steps: u32,
    previous: u32,
    prompt: Option<&'a str>,
}

pub fn run(action: PromptAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let bank = PromptBank::default();

    match action {
        PromptAction::ForSteps {
            steps,
            previous,
            seed,
        } => {
            let prompt = if config.prompts.enabled {
                let mut rng = match seed {
                    Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
                    None => Mcg128Xsl64::from_entropy(),
                };
                bank.prompt_for_steps(steps, previous, &mut rng)
            } else {
                None
            };
            let output = PromptOutput {
                steps,
                previous,
                prompt,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        PromptAction::List => {
            println!("{}", serde_json::to_string_pretty(bank.entries())?);
        }
    }
    Ok(())
}
