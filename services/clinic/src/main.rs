use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use auth::{AuthError, Confirm, LogoutOutcome, Navigation, SessionGate, StaticCredentials};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use clinic::{
    ActionOutcome, ClassifiedRecord, ClinicClient, ClinicConfig, ClinicService, Classifier,
    OverviewSource, VaccinationAlerts,
};
use common::storage::FileStore;
use tracing::warn;

/// SmartVet clinic front-end
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Settings file, overriding the default `smartvet.toml` lookup
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Log in with a demo account
    Login {
        email: String,
        password: String,
        /// Keep the session flagged as remembered
        #[arg(long)]
        remember: bool,
    },
    /// Log out after confirming on the terminal
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Print the navigation decision for a page
    Open { path: String },
    /// Clinic-wide overdue and due-soon vaccinations
    Alerts {
        /// Classify the full vaccination list locally
        #[arg(long)]
        client_side: bool,
    },
    /// An animal's vaccinations with their status
    Vaccinations { animal_id: u64 },
}

/// Asks the logout question on the terminal
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

type Gate = SessionGate<FileStore, StaticCredentials>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ClinicConfig::load(cli.config.as_deref())?;

    // Initialize logging
    common::logging::init_tracing(&config.log_level)?;

    let store = FileStore::open(&config.storage)?;
    let gate = SessionGate::new(store, StaticCredentials::demo(), config.session.clone());
    let today = Local::now().date_naive();

    match cli.command {
        Command::Login {
            email,
            password,
            remember,
        } => login(&gate, &email, &password, remember),
        Command::Logout => logout(&gate),
        Command::Whoami => {
            require_session(&gate, "/index.html")?;
            match gate.current_user() {
                Some(user) => println!("{} {} ({})", user.avatar, user.name, user.role),
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Command::Open { path } => {
            match gate.navigate(&path) {
                Navigation::Render => println!("render {path}"),
                Navigation::RedirectToLogin(target) | Navigation::RedirectToHome(target) => {
                    println!("redirect to {target}")
                }
            }
            Ok(())
        }
        Command::Alerts { client_side } => {
            require_session(&gate, "/vaccinations.html")?;
            alerts(&service(&config)?, today, client_side).await
        }
        Command::Vaccinations { animal_id } => {
            require_session(&gate, "/vaccinations.html")?;
            vaccinations(&service(&config)?, animal_id, today).await
        }
    }
}

fn service(config: &ClinicConfig) -> Result<ClinicService> {
    let client = ClinicClient::new(&config.api)?;
    Ok(ClinicService::new(
        client,
        Classifier::from(&config.vaccination),
    ))
}

fn require_session(gate: &Gate, page: &str) -> Result<()> {
    match gate.navigate(page) {
        Navigation::RedirectToLogin(target) => {
            anyhow::bail!("Not authenticated, please log in first (redirect to {target})")
        }
        _ => Ok(()),
    }
}

fn login(gate: &Gate, email: &str, password: &str, remember: bool) -> Result<()> {
    match gate.login(email, password, remember) {
        Ok(session) => {
            println!("Welcome, {} {}", session.user.avatar, session.user.name);
            println!("redirect to {}", gate.config().home_page);
            Ok(())
        }
        Err(AuthError::InvalidCredentials) => {
            println!("Incorrect email or password. Try again.");
            Ok(())
        }
        Err(AuthError::Validation(e)) => {
            println!("Please fill in all fields ({e})");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn logout(gate: &Gate) -> Result<()> {
    match gate.logout(&StdinConfirm)? {
        LogoutOutcome::LoggedOut { redirect } => println!("Logged out, redirect to {redirect}"),
        LogoutOutcome::Cancelled => println!("Still logged in"),
    }
    Ok(())
}

fn print_record(entry: &ClassifiedRecord) {
    let record = &entry.record;
    println!(
        "  #{} {} [{}] applied {}{}: {}",
        record.id,
        record.name,
        entry.classification.status.badge(),
        record.application_date,
        record
            .next_dose_date
            .map(|d| format!(", next dose {d}"))
            .unwrap_or_default(),
        entry.classification.message
    );
}

async fn alerts(service: &ClinicService, today: NaiveDate, client_side: bool) -> Result<()> {
    let source = if client_side {
        match service.load_all_vaccinations().await {
            Ok(ActionOutcome::Completed(records)) => OverviewSource::ClientSide(records),
            Ok(ActionOutcome::Superseded) => return Ok(()),
            Err(e) => {
                warn!("Loading vaccinations failed: {}", e);
                println!("{}", e.user_message());
                return Ok(());
            }
        }
    } else {
        OverviewSource::Server
    };

    let overview: VaccinationAlerts = match service.vaccination_overview(today, source).await {
        Ok(ActionOutcome::Completed(overview)) => overview,
        Ok(ActionOutcome::Superseded) => return Ok(()),
        Err(e) => {
            warn!("Overview failed: {}", e);
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    match overview.banner() {
        Some(banner) => println!("{}", banner.message()),
        None => {
            println!("All vaccinations are up to date!");
            return Ok(());
        }
    }

    if !overview.overdue.is_empty() {
        println!("Overdue:");
        overview.overdue.iter().for_each(print_record);
    }
    if !overview.due_soon.is_empty() {
        println!("Due soon:");
        overview.due_soon.iter().for_each(print_record);
    }
    Ok(())
}

async fn vaccinations(service: &ClinicService, animal_id: u64, today: NaiveDate) -> Result<()> {
    match service.load_vaccinations(animal_id, today).await {
        Ok(ActionOutcome::Completed(records)) if records.is_empty() => {
            println!("No vaccinations registered for this animal");
        }
        Ok(ActionOutcome::Completed(records)) => records.iter().for_each(print_record),
        Ok(ActionOutcome::Superseded) => {}
        Err(e) => println!("{}", e.user_message()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_login_flags() {
        let cli = Cli::try_parse_from(["smartvet", "login", "vet@smartvet.com", "vet123", "--remember"])
            .expect("parse");
        assert_eq!(
            cli.command,
            Command::Login {
                email: "vet@smartvet.com".to_string(),
                password: "vet123".to_string(),
                remember: true,
            }
        );

        let typo = Cli::try_parse_from(["smartvet", "login", "vet@smartvet.com", "vet123", "--remembr"]);
        assert!(typo.is_err());
    }

    #[test]
    fn test_global_config_and_subcommand_args() {
        let cli = Cli::try_parse_from(["smartvet", "alerts", "--client-side", "--config", "clinic.toml"])
            .expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("clinic.toml")));
        assert_eq!(cli.command, Command::Alerts { client_side: true });

        assert!(Cli::try_parse_from(["smartvet", "vaccinations", "rex"]).is_err());
        assert!(Cli::try_parse_from(["smartvet"]).is_err());
    }
}
