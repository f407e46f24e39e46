use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use common::{
    config::Config,
    db::CustomerStore,
    form::CustomerForm,
    models::{CustomerRecord, RecordId},
    submission::{Intake, SubmissionError},
    utils::ContactMethod,
};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod prompt;

#[derive(Parser)]
#[clap(author, version, about = "Customer information intake", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the customers table if it does not exist
    Init,

    /// Enter customer records interactively (default)
    Form,

    /// Submit one record and print the outcome as JSON
    Submit(SubmitArgs),
}

#[derive(Args)]
struct SubmitArgs {
    #[clap(long, default_value = "")]
    name: String,
    #[clap(long, default_value = "")]
    birthday: String,
    #[clap(long, default_value = "")]
    email: String,
    #[clap(long, default_value = "")]
    phone: String,
    #[clap(long, default_value = "")]
    address: String,
    #[clap(long, default_value_t = ContactMethod::Email)]
    contact_method: ContactMethod,
}

impl From<SubmitArgs> for CustomerRecord {
    fn from(args: SubmitArgs) -> Self {
        CustomerRecord {
            name: args.name,
            birthday: args.birthday,
            email: args.email,
            phone: args.phone,
            address: args.address,
            contact_method: args.contact_method,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Nothing works without the table, so a storage failure here ends the process.
    let store = CustomerStore::open(&config.database_url)?;
    store.init().await?;
    let intake = Intake::new(store, config.rules());

    match cli.command.unwrap_or(Commands::Form) {
        Commands::Init => {
            let customers = intake.store().count().await?;
            info!(
                "Storage ready at {} ({} customers on file)",
                config.database_url, customers
            );
        }
        Commands::Form => {
            run_form(&intake).await?;
        }
        Commands::Submit(args) => {
            let outcome = intake.submit(args.into()).await;
            println!("{}", outcome_json(&outcome));
            if outcome.is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run_form(intake: &Intake) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let mut form = CustomerForm::default();

    writeln!(output, "{}", "Customer Information Management".bold())?;
    writeln!(output, "Press enter to keep a shown value, '-' to clear it.")?;

    while prompt::fill(&mut form, &mut input, &mut output)? {
        let outcome = intake.submit(form.to_record()).await;
        let feedback = form.apply(&outcome);
        writeln!(output, "{}", prompt::render(&feedback))?;

        let question = if feedback.is_success() {
            "Enter another customer?"
        } else {
            "Correct the entry and try again?"
        };
        if !prompt::confirm(&mut input, &mut output, question)? {
            break;
        }
    }

    Ok(())
}

fn outcome_json(outcome: &Result<RecordId, SubmissionError>) -> Value {
    match outcome {
        Ok(id) => json!({
            "status": "ok",
            "id": id,
        }),
        Err(err) => json!({
            "status": "error",
            "kind": err.kind(),
            "message": err.to_string(),
        }),
    }
}
