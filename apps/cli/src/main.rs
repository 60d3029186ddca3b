use std::process::ExitCode;

use anyhow::Context;
use args::{Command, TreeFormat};
use pathkey_identifier::{
    parse_lambda, to_identifier_string_bound, Bindings, Value, VisualizationFormat, Visualize,
};
use serde::Serialize;

mod args;
mod config;
mod logging;

#[derive(Serialize)]
struct ConvertOutput<'a> {
    expression: &'a str,
    identifier: &'a str,
}

fn main() -> ExitCode {
    let args = args::parse();
    logging::init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Convert {
            lambda,
            bindings,
            separator,
            static_naming,
            config,
            json,
        } => {
            let options = config::apply_overrides(
                config::load_options(config.as_deref())?,
                separator,
                static_naming.map(Into::into),
            );
            let bindings = bindings
                .iter()
                .map(|(name, raw)| {
                    raw.parse::<Value>()
                        .map(|value| (name.as_str(), value))
                        .with_context(|| format!("invalid value for binding '{}'", name))
                })
                .collect::<anyhow::Result<Bindings>>()?;

            let expr = parse_lambda(&lambda).context("failed to parse lambda")?;
            let identifier = to_identifier_string_bound(&expr, Some(&options), &bindings)
                .with_context(|| format!("failed to convert '{}'", lambda))?;

            if json {
                let output = ConvertOutput {
                    expression: &lambda,
                    identifier: &identifier,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", identifier);
            }
        }
        Command::Tree { lambda, format } => {
            let expr = parse_lambda(&lambda).context("failed to parse lambda")?;
            let format = match format {
                TreeFormat::Ascii => VisualizationFormat::AsciiTree,
                TreeFormat::Mermaid => VisualizationFormat::Mermaid,
            };
            print!("{}", expr.visualize(format));
        }
    }
    Ok(())
}
