// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bill_splitter::{logging, Config, Splitter};

#[derive(Parser, Debug)]
#[command(name = "bill-splitter")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON config with seed friends, placeholder avatar and log filter
    #[arg(long, value_name = "PATH", env = "BILL_SPLITTER_CONFIG", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print every friend's balance and exit
    Summary,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let log_guard = logging::init(&config.log_filter);
    tracing::info!(
        version = bill_splitter::VERSION,
        config = %args
            .config
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string()),
        friends = config.friends.len(),
        "starting"
    );

    let splitter = Splitter::new(&config);

    match args.command {
        Some(Command::Summary) => run_summary(&splitter, log_guard.as_ref()),
        None => run_ui_mode(splitter)?,
    }

    Ok(())
}

fn run_summary(splitter: &Splitter, log_guard: Option<&logging::LoggingGuard>) {
    for friend in splitter.friends() {
        println!("{:<20} {}", friend.name, friend.status_text());
    }

    let totals = splitter.registry().totals();
    println!();
    println!(
        "You owe ${}  |  Owed to you ${}  |  Net ${}",
        totals.you_owe,
        totals.owed_to_you,
        totals.net()
    );

    if let Some(guard) = log_guard {
        println!("Logs: {}", guard.log_dir().display());
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(splitter: Splitter) -> Result<()> {
    let mut app = ui::App::new(splitter);
    ui::run_ui(&mut app)?;
    tracing::info!(activity = app.splitter.activity().len(), "session closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_splitter: Splitter) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print balances with: bill-splitter summary");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let parsed = Args::try_parse_from(["bill-splitter"]).unwrap();
        assert_eq!(parsed.command, None);

        let parsed =
            Args::try_parse_from(["bill-splitter", "summary", "--config", "/tmp/c.json"]).unwrap();
        assert_eq!(parsed.command, Some(Command::Summary));
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/c.json")));

        let parsed =
            Args::try_parse_from(["bill-splitter", "--config", "/tmp/c.json", "summary"]).unwrap();
        assert_eq!(parsed.command, Some(Command::Summary));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(Args::try_parse_from(["bill-splitter", "--config"]).is_err());
        assert!(Args::try_parse_from(["bill-splitter", "import"]).is_err());
    }

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
