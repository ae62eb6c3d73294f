use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use montessori_mult::presentation::render_stage;
use montessori_mult::{
    EvaluatorId, LessonConfig, LessonDocument, ManipulativeKind, PresentationInterpreter, Result,
    ScenarioGenerator, WorkspaceSnapshot, compile, evaluate,
};

#[derive(Parser, Debug)]
#[command(name = "montessori-mult")]
#[command(about = "Multiplication lessons with golden beads and the stamp game")]
struct Args {
    /// Lesson configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct Target {
    /// Manipulative: golden-beads or stamp-game
    #[arg(short, long)]
    kind: ManipulativeKind,

    /// Scenario seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a generated scenario as JSON
    Scenario {
        #[command(flatten)]
        target: Target,
    },
    /// Print the compiled presentation script as JSON
    Script {
        #[command(flatten)]
        target: Target,
    },
    /// Replay the presentation and render the stage
    Present {
        #[command(flatten)]
        target: Target,

        /// Last action to replay (defaults to the end)
        #[arg(long)]
        until: Option<usize>,
    },
    /// Print a three-segment lesson document as JSON
    Lesson {
        #[command(flatten)]
        target: Target,
    },
    /// Run a guided-step evaluator against a workspace snapshot
    Check {
        #[arg(short, long)]
        kind: ManipulativeKind,

        #[arg(short, long)]
        seed: u32,

        /// Evaluator id, e.g. golden-beads-exchange-units
        #[arg(long)]
        evaluator: EvaluatorId,

        /// Workspace snapshot as JSON
        #[arg(long)]
        snapshot: String,
    },
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => LessonConfig::from_file(path)?,
        None => LessonConfig::default(),
    };
    let generator = ScenarioGenerator::new(config.generator.clone());

    match args.command {
        Command::Scenario { target } => {
            let scenario = generator.generate(target.kind, target.seed)?;
            println!("{}", serde_json::to_string_pretty(&scenario)?);
        }
        Command::Script { target } => {
            let scenario = generator.generate(target.kind, target.seed)?;
            println!("{}", serde_json::to_string_pretty(&compile(&scenario))?);
        }
        Command::Present { target, until } => {
            let scenario = generator.generate(target.kind, target.seed)?;
            let mut interpreter =
                PresentationInterpreter::with_config(compile(&scenario), &config.presentation);
            let Some(last) = interpreter.script().last_index() else {
                return Ok(());
            };

            println!(
                "{} × {} (seed {})\n",
                scenario.multiplicand(),
                scenario.multiplier(),
                scenario.seed()
            );
            for index in 0..=until.unwrap_or(last).min(last) {
                interpreter.seek(index);
                if let Some(text) = interpreter.current_action().and_then(|a| a.narration()) {
                    println!("[{index:>3}] {text}");
                }
            }
            println!("\n{}", render_stage(interpreter.stage()));
        }
        Command::Lesson { target } => {
            let seed = target.seed.unwrap_or_else(ScenarioGenerator::random_seed);
            let document = LessonDocument::standard(target.kind, seed, &config.generator)?;
            println!("{}", document.to_json_pretty()?);
        }
        Command::Check {
            kind,
            seed,
            evaluator,
            snapshot,
        } => {
            let scenario = generator.generate(kind, Some(seed))?;
            let snapshot: WorkspaceSnapshot = serde_json::from_str(&snapshot)?;
            let passed = evaluate(evaluator, &snapshot, Some(&scenario));
            println!("{evaluator}: {}", if passed { "pass" } else { "fail" });
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "montessori_mult=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
