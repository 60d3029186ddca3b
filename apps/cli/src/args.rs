use std::path::PathBuf;

use clap::ValueEnum;
use pathkey_identifier::StaticMemberConversion;

/// Render captured access paths as canonical identifier strings.
#[derive(clap::Parser, Debug)]
#[command(name = "pathkey", version)]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert a lambda such as `x => x.Items[i].Name` to its identifier string.
    Convert {
        /// Lambda source: `param => body`.
        lambda: String,

        /// Value of a captured variable, as NAME=VALUE. Repeatable.
        #[arg(short, long = "bind", value_name = "NAME=VALUE", value_parser = parse_binding)]
        bindings: Vec<(String, String)>,

        /// Separator placed between member names.
        #[arg(short, long)]
        separator: Option<String>,

        /// How static members are qualified.
        #[arg(long, value_enum)]
        static_naming: Option<StaticNaming>,

        /// JSON file with conversion options; flags override its fields.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print a JSON object instead of the bare identifier.
        #[arg(long)]
        json: bool,
    },

    /// Print the parsed expression tree.
    Tree {
        /// Lambda source: `param => body`.
        lambda: String,

        #[arg(short, long, value_enum, default_value_t = TreeFormat::Ascii)]
        format: TreeFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StaticNaming {
    MemberNameOnly,
    ParentTypeName,
    ParentTypeFullName,
}

impl From<StaticNaming> for StaticMemberConversion {
    fn from(value: StaticNaming) -> Self {
        match value {
            StaticNaming::MemberNameOnly => StaticMemberConversion::MemberNameOnly,
            StaticNaming::ParentTypeName => StaticMemberConversion::ParentTypeName,
            StaticNaming::ParentTypeFullName => StaticMemberConversion::ParentTypeFullName,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Ascii,
    Mermaid,
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn parse() -> Args {
    clap::Parser::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn binding_splits_on_first_equals() {
        assert_eq!(
            parse_binding("key='a=b'").unwrap(),
            ("key".to_string(), "'a=b'".to_string())
        );
        assert!(parse_binding("novalue").is_err());
        assert!(parse_binding("=1").is_err());
    }

    #[test]
    fn convert_arguments() {
        let args = Args::try_parse_from([
            "pathkey",
            "-v",
            "convert",
            "x => x.Items[i]",
            "--bind",
            "i=3",
            "--separator",
            "/",
            "--static-naming",
            "parent-type-full-name",
        ])
        .unwrap();
        assert_eq!(args.verbose, 1);
        match args.command {
            Command::Convert {
                lambda,
                bindings,
                separator,
                static_naming,
                ..
            } => {
                assert_eq!(lambda, "x => x.Items[i]");
                assert_eq!(bindings, vec![("i".to_string(), "3".to_string())]);
                assert_eq!(separator.as_deref(), Some("/"));
                assert!(matches!(static_naming, Some(StaticNaming::ParentTypeFullName)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
