//! nursebot CLI: nursing chat assistant, PDF quiz and fluid calculator.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "nursebot",
    version,
    about = "KKH nursing assistant: chat, PDF quizzes and fluid calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that talks to the LLM endpoint.
#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Provider name from the config (default: the configured default)
    #[arg(long)]
    pub provider: Option<String>,

    /// Chat model (default: from config)
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistant a single question
    Ask {
        /// The question
        question: String,

        /// Prefix the question with the most relevant chunk of the PDF
        #[arg(long)]
        with_context: bool,

        /// PDF to draw context from (default: from config)
        #[arg(long)]
        pdf: Option<PathBuf>,

        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Interactive chat; one line per message, `exit` or EOF to quit
    Chat {
        /// Prefix each message with the most relevant chunk of the PDF
        #[arg(long)]
        with_context: bool,

        /// PDF to draw context from (default: from config)
        #[arg(long)]
        pdf: Option<PathBuf>,

        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Generate a quiz from the PDF and grade it
    Quiz {
        /// PDF to generate the quiz from (default: from config)
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Answers, comma-separated (e.g. "A,C,B"); prompted when omitted
        #[arg(long)]
        answers: Option<String>,

        /// Save the parsed quiz as JSON for `nursebot grade`
        #[arg(long)]
        save: Option<PathBuf>,

        /// Write the quiz as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,

        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Grade answers against a saved quiz
    Grade {
        /// Quiz JSON written by `nursebot quiz --save`
        #[arg(long)]
        quiz: PathBuf,

        /// Answers, comma-separated (e.g. "A,C,B")
        #[arg(long)]
        answers: String,
    },

    /// Parse a saved model reply into quiz questions
    Parse {
        /// File containing the raw model reply
        file: PathBuf,

        /// Print the parsed quiz as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the text extracted from the PDF
    Extract {
        /// PDF to extract (default: from config)
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Pediatric maintenance fluid calculator
    Fluid {
        /// Age in years
        #[arg(long, allow_hyphen_values = true)]
        age: Option<String>,

        /// Weight in kg
        #[arg(long, allow_hyphen_values = true)]
        weight: Option<String>,
    },

    /// Create a starter nursebot.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nursebot=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ask {
            question,
            with_context,
            pdf,
            endpoint,
        } => commands::ask::execute(question, with_context, pdf, endpoint).await,
        Commands::Chat {
            with_context,
            pdf,
            endpoint,
        } => commands::chat::execute(with_context, pdf, endpoint).await,
        Commands::Quiz {
            pdf,
            answers,
            save,
            html,
            endpoint,
        } => commands::quiz::execute(pdf, answers, save, html, endpoint).await,
        Commands::Grade { quiz, answers } => commands::grade::execute(quiz, answers),
        Commands::Parse { file, json } => commands::parse::execute(file, json),
        Commands::Extract { pdf, config } => commands::extract::execute(pdf, config),
        Commands::Fluid { age, weight } => commands::fluid::execute(age, weight),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
