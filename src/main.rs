use anyhow::Context;
use calcpad::keypad::ButtonKind;
use calcpad::{Calculator, Config, Orientation};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Press calculator buttons from the command line.
#[derive(Parser, Debug)]
#[command(name = "calcpad", version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/calcpad/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print each readout as JSON
    #[arg(long)]
    json: bool,

    /// Print the button grid before pressing anything
    #[arg(long)]
    keypad: bool,

    /// Grid to print with --keypad
    #[arg(long, value_enum)]
    orientation: Option<Orientation>,

    /// Button labels to press in order, e.g. 1 2 + 3 =
    #[arg(allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.keypad {
        print_keypad(cli.orientation.unwrap_or(config.display.orientation));
    }

    let mut calculator = Calculator::from_config(&config);
    for label in &cli.tokens {
        let readout = calculator.press_label(label);
        if cli.json {
            println!("{}", serde_json::to_string(&readout)?);
        } else {
            let (expression, result) = readout.pair();
            println!("{:<6} {:>30} | {}", label, expression, result);
        }
    }

    Ok(())
}

fn print_keypad(orientation: Orientation) {
    const CELL: usize = 6;

    for row in orientation.layout() {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Some(key) => {
                    let face = match key.kind() {
                        ButtonKind::Operator => format!("[{}]", key.label),
                        ButtonKind::Special => format!("<{}>", key.label),
                        ButtonKind::Function | ButtonKind::Default => key.label.to_string(),
                    };
                    format!("{:^width$}", face, width = CELL * usize::from(key.span))
                }
                None => " ".repeat(CELL),
            })
            .collect();
        println!("{}", line.trim_end());
    }
    println!();
}
