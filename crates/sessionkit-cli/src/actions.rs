//! Subcommand dispatch and execution.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use sessionkit_core::effects::LogNotifier;
use sessionkit_core::validation::{field_messages, LoginForm, RegisterForm};
use sessionkit_core::{
    ApiClient, ApiConfig, AuthFlow, AuthStore, ClientStorage, Config, Notifier, User,
};
use tracing::{debug, warn};
use validator::Validate;

use crate::terminal::{self, TerminalNavigator, TerminalNotifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login { email: Option<String> },
    Register { name: Option<String>, email: Option<String> },
    Logout,
    Whoami,
    Status,
}

impl Action {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self> {
        let value = |sub: &clap::ArgMatches, id: &str| sub.get_one::<String>(id).cloned();

        match matches.subcommand() {
            Some(("login", sub)) => Ok(Action::Login {
                email: value(sub, "email"),
            }),
            Some(("register", sub)) => Ok(Action::Register {
                name: value(sub, "name"),
                email: value(sub, "email"),
            }),
            Some(("logout", _)) => Ok(Action::Logout),
            Some(("whoami", _)) => Ok(Action::Whoami),
            Some(("status", _)) => Ok(Action::Status),
            Some((other, _)) => Err(anyhow::anyhow!("unknown command: {}", other)),
            None => Err(anyhow::anyhow!("missing command")),
        }
    }
}

/// An action with every input already collected.
#[derive(Debug)]
enum Command {
    Login(LoginForm),
    Register(RegisterForm),
    Logout,
    Whoami,
    Status,
}

impl Command {
    /// Prompt for whatever `action` left out.
    fn collect(action: Action, config: &Config) -> Result<Self> {
        match action {
            Action::Login { email } => {
                let email = match email {
                    Some(email) => email,
                    None => terminal::prompt("Email", config.last_email.as_deref())?,
                };
                Ok(Command::Login(LoginForm {
                    email,
                    password: terminal::prompt_password("Password")?,
                }))
            }
            Action::Register { name, email } => {
                let name = match name {
                    Some(name) => name,
                    None => terminal::prompt("Name", None)?,
                };
                let email = match email {
                    Some(email) => email,
                    None => terminal::prompt("Email", None)?,
                };
                Ok(Command::Register(RegisterForm {
                    name,
                    email,
                    password: terminal::prompt_password("Password")?,
                    confirm_password: terminal::prompt_password("Confirm password")?,
                }))
            }
            Action::Logout => Ok(Command::Logout),
            Action::Whoami => Ok(Command::Whoami),
            Action::Status => Ok(Command::Status),
        }
    }
}

/// Notifications go to the terminal when someone is watching it, and to
/// the log otherwise.
fn notifier(interactive: bool) -> Arc<dyn Notifier> {
    if interactive {
        Arc::new(TerminalNotifier)
    } else {
        Arc::new(LogNotifier)
    }
}

/// Everything a command needs, wired the way an app would wire it.
struct Session {
    flow: AuthFlow,
    navigator: Arc<TerminalNavigator>,
    config: Config,
    /// Where `config` is saved back to. `None` keeps changes in memory.
    config_path: Option<PathBuf>,
}

impl Session {
    fn new(
        api_config: &ApiConfig,
        storage: ClientStorage,
        notifier: Arc<dyn Notifier>,
        config: Config,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let navigator = Arc::new(TerminalNavigator::default());

        let api = ApiClient::new(api_config, storage.clone(), notifier.clone())
            .context("Failed to create API client")?;
        debug!(base_url = api.base_url(), "API client ready");

        let store = AuthStore::new(storage);
        let flow = AuthFlow::new(api, store, navigator.clone(), notifier);
        Ok(Self {
            flow,
            navigator,
            config,
            config_path,
        })
    }

    fn open(config: Config, api_url: Option<String>) -> Result<Self> {
        let storage = config.client_storage();
        let mut api_config = config.api_config();
        if let Some(api_url) = api_url {
            api_config.base_url = api_url;
        }
        let config_path = match Config::config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "No config directory, settings will not be saved");
                None
            }
        };
        let notifier = notifier(io::stderr().is_terminal());
        Self::new(&api_config, storage, notifier, config, config_path)
    }

    fn store(&self) -> &AuthStore {
        self.flow.store()
    }

    fn remember_email(&mut self, email: String) {
        self.config.last_email = Some(email);
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!(error = %e, "Failed to save config");
            }
        }
    }
}

/// Run `action`. `api_url` overrides the configured backend URL.
pub async fn run(action: Action, config: Config, api_url: Option<String>) -> Result<ExitCode> {
    let mut session = Session::open(config, api_url)?;
    let command = Command::collect(action, &session.config)?;
    execute(&mut session, command, &mut io::stdout(), &mut io::stderr()).await
}

async fn execute(
    session: &mut Session,
    command: Command,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ExitCode> {
    match command {
        Command::Login(form) => {
            if let Err(errors) = form.validate() {
                print_field_errors(err, &field_messages(&errors))?;
                return Ok(ExitCode::FAILURE);
            }
            if !session.flow.sign_in(&form).await {
                return Ok(ExitCode::FAILURE);
            }
            session.remember_email(form.email);
            print_landing(out, session)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Register(form) => {
            if let Err(errors) = form.validate() {
                print_field_errors(err, &field_messages(&errors))?;
                return Ok(ExitCode::FAILURE);
            }
            if !session.flow.sign_up(&form).await {
                return Ok(ExitCode::FAILURE);
            }
            session.remember_email(form.email);
            print_landing(out, session)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout => {
            session.flow.sign_out();
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami => {
            if session.store().token().is_none() {
                writeln!(err, "Not signed in")?;
                return Ok(ExitCode::FAILURE);
            }
            if !session.flow.check_auth().await {
                writeln!(err, "Session is no longer valid, please log in again")?;
                return Ok(ExitCode::FAILURE);
            }
            if let Some(user) = session.store().user() {
                print_user(out, &user)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => {
            let state = session.store().snapshot();
            writeln!(
                out,
                "Authenticated: {}",
                if state.is_authenticated { "yes" } else { "no" }
            )?;
            match state.user {
                Some(ref user) => print_user(out, user)?,
                None => writeln!(out, "User:          -")?,
            }
            writeln!(
                out,
                "Token:         {}",
                state
                    .token
                    .as_deref()
                    .map(terminal::mask_token)
                    .unwrap_or_else(|| "-".to_string())
            )?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_landing(out: &mut dyn Write, session: &Session) -> io::Result<()> {
    debug!(route = ?session.navigator.current(), "Landed");
    match session.store().user() {
        Some(user) => print_user(out, &user),
        None => Ok(()),
    }
}

fn print_user(out: &mut dyn Write, user: &User) -> io::Result<()> {
    writeln!(out, "User:          {} <{}>", user.name, user.email)?;
    writeln!(out, "Role:          {}", user.role.as_str())?;
    writeln!(out, "Member since:  {}", format_timestamp(&user.created_at))
}

fn print_field_errors(err: &mut dyn Write, messages: &BTreeMap<String, Vec<String>>) -> io::Result<()> {
    for (field, errors) in messages {
        for error in errors {
            writeln!(err, "✗ {}: {}", field, error)?;
        }
    }
    Ok(())
}

/// Show RFC 3339 timestamps as a date, anything else verbatim
fn format_timestamp(value: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.format("%b %d, %Y").to_string(),
        Err(_) => value.to_string(),
    }
}
