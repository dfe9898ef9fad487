// UI layer: the interactive side of the binary. Prompts for credentials with
// masked input, shows a spinner while requests run and prints results. All
// API work is delegated to `TimeularClient`.

use crate::api::{Credentials, TimeularClient};
use crate::cli::{Cli, Command};
use anyhow::{anyhow, bail, Context, Result};
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

/// Run one parsed command line against `api`.
///
/// Credentials are only prompted for here; everything after the prompt goes
/// through functions that take them as plain values.
pub fn run(api: &TimeularClient, cli: Cli) -> Result<()> {
    match cli.command {
        Command::Login => {
            let credentials = prompt_credentials()?;
            println!("{}", sign_in(api, &credentials)?);
        }
        Command::Logout { access_token } => {
            let text = with_spinner("Logging out...", || api.logout(&access_token))?;
            println!("{}", text);
        }
        command => {
            // A supplied token belongs to the caller, so it is neither
            // created nor invalidated here.
            let data = match cli.token {
                Some(token) => fetch(api, &command, &token)?,
                None => {
                    let credentials = prompt_credentials()?;
                    with_session(api, &credentials, |token| fetch(api, &command, token))?
                }
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }
    Ok(())
}

/// Sign in, hand the token to `work`, then log out.
///
/// Logout runs whether `work` succeeded or not, so a failed fetch never
/// leaves a live token behind. The error from `work` wins over a logout
/// failure.
pub fn with_session<T>(
    api: &TimeularClient,
    credentials: &Credentials,
    work: impl FnOnce(&str) -> Result<T>,
) -> Result<T> {
    let token = sign_in(api, credentials)?;
    let outcome = work(&token);
    let logged_out = api.logout(&token);

    let value = outcome?;
    let text = logged_out.context("Logout failed")?;
    eprintln!("Logged out: {}", text);
    Ok(value)
}

/// Run an `entry` or `range` command with an existing token.
pub fn fetch(api: &TimeularClient, command: &Command, token: &str) -> Result<Value> {
    match command {
        Command::Entry { id } => with_spinner("Fetching entry...", || api.get_entry_by_id(id, token))
            .with_context(|| format!("Failed to fetch time entry {}", id)),
        Command::Range { start, end, timezone } => with_spinner("Fetching entries...", || {
            api.get_entry_by_timestamp(*start, *end, token, timezone)
        })
        .context("Failed to fetch time entries"),
        Command::Login | Command::Logout { .. } => {
            bail!("{:?} does not fetch time entries", command)
        }
    }
}

/// Exchange the key pair for an access token.
///
/// The sign-in body is passed through by the client untouched, so a
/// rejected login only shows up here as a missing `token` field.
pub fn sign_in(api: &TimeularClient, credentials: &Credentials) -> Result<String> {
    let response = with_spinner("Logging in...", || api.login(credentials))
        .context("Login request failed")?;
    response.token().map(str::to_string).ok_or_else(|| {
        anyhow!(
            "Login response did not contain a token: {}",
            Value::Object(response.into_inner())
        )
    })
}

/// `Password` hides what is typed; nothing is echoed or stored.
fn prompt_credentials() -> Result<Credentials> {
    let api_key: String = Password::new().with_prompt("Provide apiKey").interact()?;
    let api_secret: String = Password::new().with_prompt("Provide apiSecret").interact()?;
    Ok(Credentials::new(api_key, api_secret))
}

fn with_spinner<T, E>(message: &'static str, work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work();
    spinner.finish_and_clear();
    result
}
