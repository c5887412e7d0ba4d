/* 📖 # What is the halkit CLI for?

It lets you see what a halkit API would answer without running a server:

- `halkit negotiate <key> <accept>` prints the content type chosen for a body that would
  ideally be served as `<key>` (`vnd.error`, `hal+json` or `json`).
- `halkit error <status> [message]` prints the vnd.error response for a status, negotiated
  against the `HALKIT_ACCEPT` environment variable (default `application/json`).

Like the rest of halkit's tooling it does no argument parsing beyond positional arguments.
`halkit.toml` in the current directory is used when present, so `html_preview`, `base_uri` and
`default_accept` behave as they would in the service.

Exit codes:
- 0: Success
- 1: Error (bad usage, unreadable config)
*/

use std::env;
use std::path::Path;
use std::process;

use halkit_base::tracing::init_tracing;
use halkit_engine::{ApiError, Config, ErrorResponder, ResponseEncoder, load_config};

const CONFIG_FILE: &str = "halkit.toml";

const USAGE: &str = "Usage:
  halkit negotiate <key> <accept>
  halkit error <status> [message]";

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Warning: {}", e);
    }

    let config_path = Path::new(CONFIG_FILE);
    let config = if config_path.exists() {
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: Failed to load config from {}: {}", CONFIG_FILE, e);
                process::exit(1);
            }
        }
    } else {
        tracing::debug!("No {} found, using defaults", CONFIG_FILE);
        Config::default()
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["negotiate", key, accept] => {
            println!("{}", config.negotiator().best_content_type(key, accept));
        }
        ["error", status, message @ ..] if message.len() <= 1 => {
            let Ok(status) = status.parse::<u16>() else {
                eprintln!("Error: '{}' is not an HTTP status code", status);
                process::exit(1);
            };
            let accept = env::var("HALKIT_ACCEPT")
                .unwrap_or_else(|_| config.default_accept().to_string());
            print_error(&config, error_for_status(status, message.first().copied()), &accept);
        }
        _ => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    }
}

/// The error the service would raise for `status`.
fn error_for_status(status: u16, message: Option<&str>) -> ApiError {
    let error = match status {
        400 => ApiError::bad_request("Bad Request"),
        403 => ApiError::forbidden(),
        404 => ApiError::not_found(),
        _ => ApiError::internal().with_status(status),
    };
    match message {
        Some(message) => error.with_message(message),
        None => error,
    }
}

fn print_error(config: &Config, error: ApiError, accept: &str) {
    let context = match config.hal_context() {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let responder = ErrorResponder::new(ResponseEncoder::new(config.negotiator())).with_context(context);
    match responder.respond(error.into(), accept) {
        Ok(response) => {
            println!("{} {}", response.status, response.content_type);
            println!("{}", response.body);
        }
        Err(fault) => {
            eprintln!("Error: {}", fault);
            process::exit(1);
        }
    }
}
