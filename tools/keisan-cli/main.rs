use clap::Parser;
use keisan::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Client for the calculus solver: fill an operation's fields and print the result
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Operation to run, e.g. `gradient` (defaults to the last one used in interactive mode)
    operation: Option<String>,

    /// Field value as `field=value`; may be repeated
    #[arg(short, long = "field", value_name = "FIELD=VALUE")]
    fields: Vec<String>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Solver endpoint, overriding the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// File that keeps field values between runs, overriding the config file
    #[arg(long)]
    store: Option<String>,

    /// List operations and their fields, then exit
    #[arg(short, long)]
    list: bool,

    /// Print the request payload instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

type CliSession = Session<Box<dyn KeyValueStore>, HttpSolverClient>;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = Arc::new(Registry::standard());
    if cli.list {
        print_operations(&registry);
        return;
    }

    let config = load_config(&cli);
    let mut session = open_session(registry, &config);

    if cli.human {
        run_interactive(&mut session, cli.operation, cli.dry_run);
    } else {
        run_non_interactive(&mut session, cli.operation, &cli.fields, cli.dry_run);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install logger: {}", e);
    }
}

fn load_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => Config::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(store) = &cli.store {
        config.store_path = Some(store.into());
    }
    config
}

fn open_session(registry: Arc<Registry>, config: &Config) -> CliSession {
    let store: Box<dyn KeyValueStore> = match &config.store_path {
        Some(path) => Box::new(FileStore::open(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to open field store: {}", e))
        })),
        None => Box::new(MemoryStore::new()),
    };
    let client = HttpSolverClient::new(config.endpoint.clone(), config.timeout())
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    Session::new(registry, store, client)
}

fn print_operations(registry: &Registry) {
    for operation in registry.operations() {
        println!("{} ({})", operation.id, operation.title);
        for field in &operation.fields {
            let default = if field.never_blank { ", default" } else { "" };
            println!(
                "    {:<14} {} [{}{}]",
                field.id, field.label, field.placeholder, default
            );
        }
    }
}

/// Runs the CLI in non-interactive mode, taking all values from the command line.
fn run_non_interactive(
    session: &mut CliSession,
    operation: Option<String>,
    fields: &[String],
    dry_run: bool,
) {
    let operation = operation.unwrap_or_else(|| {
        exit_with_error("An operation is required in non-interactive mode. Use --list to see them.")
    });
    session
        .select(&operation)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    for assignment in fields {
        let (field, value) = assignment.split_once('=').unwrap_or_else(|| {
            exit_with_error(&format!("Expected FIELD=VALUE, got '{}'", assignment))
        });
        session
            .form_mut()
            .fill(field.trim(), value)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    }

    calculate(session, dry_run);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(session: &mut CliSession, operation: Option<String>, dry_run: bool) {
    println!("--- Keisan Interactive Mode ---");

    let remembered = session.restore();
    let operation = loop {
        let default = operation.clone().or_else(|| remembered.clone());
        let choice = prompt_for_input("Enter operation (? to list)", default.as_deref());
        if choice == "?" {
            print_operations(session.registry());
            continue;
        }
        match session.select(&choice) {
            Ok(_) => break choice,
            Err(e) => println!("{}", e),
        }
    };

    if let Some(expression) = session.last_expression() {
        println!("Last expression: {}", expression);
    }

    let fields: Vec<(String, String, bool)> = session
        .form()
        .fields()
        .iter()
        .map(|f| {
            (
                f.id().to_string(),
                f.spec().label.clone(),
                f.is_placeholder(),
            )
        })
        .collect();

    println!("\nFields for '{}' (enter keeps the shown value, '-' clears it):", operation);
    for (id, label, is_placeholder) in fields {
        let form = session.form_mut();
        let shown = form.field(&id).map(|f| f.displayed().to_string());
        let prompt = if is_placeholder {
            format!("{} (hint: {})", label, shown.unwrap_or_default())
        } else {
            format!("{} [current: {}]", label, shown.unwrap_or_default())
        };
        let answer = prompt_for_input(&prompt, None);

        let outcome = match answer.as_str() {
            "" => Ok(()),
            "-" => form.fill(&id, ""),
            text => form.fill(&id, text),
        };
        if let Err(e) = outcome {
            exit_with_error(&e.to_string());
        }
    }

    calculate(session, dry_run);
}

fn calculate(session: &mut CliSession, dry_run: bool) {
    if dry_run {
        match session.prepare() {
            Ok(payload) => println!("{}", payload.to_json()),
            Err(e) => exit_with_error(&e.to_string()),
        }
        return;
    }

    match session.submit() {
        Ok(display) if display.is_error() => {
            eprintln!("\nSolver error: {}", display.text());
            std::process::exit(2);
        }
        Ok(display) => {
            println!("\nResult:");
            println!("{}", display.text());
            if display.copy_text != display.text() {
                println!("\nPlain text:");
                println!("{}", display.copy_text);
            }
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }

    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
