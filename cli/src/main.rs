//! OCPP codec CLI
//!
//! Inspect OCPP-J traffic and charging profiles from the shell.
//!
//! ```sh
//! # Decode and validate a Call captured from a 1.6 charge point
//! echo '[2,"1","Heartbeat",{}]' | ocpp-codec decode --protocol ocpp1.6
//!
//! # Normalize a csChargingProfiles document
//! ocpp-codec normalize-profile profile.json
//!
//! # List the actions a protocol version defines
//! ocpp-codec actions --protocol ocpp2.1
//!
//! # Validate the config file and exit
//! ocpp-codec check-config
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, info};

use ocpp_codec::config::AppConfig;
use ocpp_codec::domain::ocpp::MessageKind;
use ocpp_codec::logging::init_tracing;
use ocpp_codec::{decode_call, normalize_cs_charging_profile, OcppVersion, ProtocolRegistry};

/// OCPP 1.6 / 2.0.1 / 2.1 message codec.
#[derive(Parser, Debug)]
#[command(
    name = "ocpp-codec",
    version,
    about = "Decode and validate OCPP-J messages and charging profiles",
    long_about = "Decode and validate OCPP-J messages against the OCPP 1.6, 2.0.1 \
                  and 2.1 action catalogs, and normalize csChargingProfiles.\n\n\
                  Default config: ~/.config/ocpp-codec/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "OCPP_CODEC_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a Call frame and print the validated request.
    Decode {
        /// File holding the frame; stdin when omitted.
        input: Option<PathBuf>,

        /// Negotiated subprotocol (`ocpp1.6`, `ocpp2.0.1`, `ocpp2.1`).
        #[arg(short, long)]
        protocol: Option<OcppVersion>,
    },

    /// Normalize a csChargingProfiles document.
    NormalizeProfile {
        /// File holding the profile; stdin when omitted.
        input: Option<PathBuf>,
    },

    /// List the actions defined for a protocol version.
    Actions {
        #[arg(short, long)]
        protocol: Option<OcppVersion>,

        /// List response (CallResult) schemas instead of requests.
        #[arg(long)]
        responses: bool,
    },

    /// Validate the configuration file and exit.
    CheckConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ocpp_codec::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);
    debug!("Configuration loaded from {}", config_path.display());

    match run(cli.command, &config, &config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Decode { input, protocol } => {
            let protocol = protocol.unwrap_or(config.codec.default_protocol);
            let text = read_input(input.as_deref())?;
            let call = decode_call(text.trim(), protocol.subprotocol())?;
            info!(action = call.action.as_str(), "Call is valid");
            print_json(
                config,
                &json!({
                    "messageId": call.message_id,
                    "action": call.action,
                    "protocolVersion": call.protocol_version,
                    "payload": call.request.to_payload(),
                }),
            )?;
        }

        Command::NormalizeProfile { input } => {
            let text = read_input(input.as_deref())?;
            match normalize_cs_charging_profile(&Value::String(text)) {
                Ok((profile, summary)) => print_json(
                    config,
                    &json!({
                        "csChargingProfiles": profile.to_value()?,
                        "summary": summary,
                    }),
                )?,
                Err(e) => {
                    print_json(config, &e.to_field_map())?;
                    return Err(e.into());
                }
            }
        }

        Command::Actions {
            protocol,
            responses,
        } => {
            let protocol = protocol.unwrap_or(config.codec.default_protocol);
            let kind = if responses {
                MessageKind::Response
            } else {
                MessageKind::Request
            };
            for action in ProtocolRegistry::global().actions(kind, protocol) {
                println!("{action}");
            }
        }

        Command::CheckConfig => {
            println!("Configuration is valid");
            println!("   Config file      : {}", config_path.display());
            println!("   Log level        : {}", config.logging.level);
            println!("   Log format       : {}", config.logging.format);
            println!("   Default protocol : {}", config.codec.default_protocol.subprotocol());
            println!("   Pretty output    : {}", config.codec.pretty);
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_json(config: &AppConfig, value: &Value) -> serde_json::Result<()> {
    let text = if config.codec.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_protocol_argument() {
        let cli = Cli::parse_from(["ocpp-codec", "decode", "--protocol", "ocpp2.0.1", "frame.json"]);
        match cli.command {
            Command::Decode { input, protocol } => {
                assert_eq!(protocol, Some(OcppVersion::V201));
                assert_eq!(input, Some(PathBuf::from("frame.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_protocol() {
        assert!(Cli::try_parse_from(["ocpp-codec", "actions", "--protocol", "ocpp3"]).is_err());
    }
}
