use crate::cli::{actions::Action, commands, dispatch, globals::GlobalArgs, telemetry};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

/// Map verbosity count to tracing level
const fn get_verbosity_level(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// Start the CLI: parse arguments, initialize telemetry and return the
/// action to run together with the global configuration.
///
/// # Errors
///
/// Returns an error if argument parsing, telemetry initialization, or action
/// dispatch fails
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let verbosity_level =
        get_verbosity_level(matches.get_one::<u8>("verbosity").copied().unwrap_or(0));

    telemetry::init(verbosity_level)?;

    let token_secret = matches
        .get_one::<String>("token-secret")
        .map(|s| SecretString::from(s.clone()))
        .ok_or_else(|| anyhow!("missing required argument: --token-secret"))?;

    let frontend_url = matches
        .get_one::<String>("frontend-url")
        .map(String::from)
        .ok_or_else(|| anyhow!("missing required argument: --frontend-url"))?;

    let action = dispatch::handler(&matches)?;

    Ok((action, GlobalArgs::new(token_secret, frontend_url)))
}
