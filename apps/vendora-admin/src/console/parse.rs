//! Console command grammar.
//!
//! One line is one command, split on whitespace and parsed with clap
//! (`help` and `<command> --help` come for free).

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "vendora",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

/// Commands accepted at the `>` prompt.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Sign in.
    Login { email: String, password: String },

    /// Sign out and forget the stored token.
    Logout,

    /// Show the signed-in operator.
    Whoami,

    /// Load the active catalog and start a new sale.
    Open,

    /// List products (inactive ones are marked).
    Products,

    /// List active clients.
    Clients,

    /// Select the product for the next `add` (no ID clears it).
    Select { product_id: Option<String> },

    /// Set the quantity for the next `add`.
    Qty {
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Add a product; without arguments, adds the staged selection.
    Add {
        product_id: Option<String>,
        #[arg(allow_negative_numbers = true)]
        quantity: Option<i64>,
    },

    /// Remove a product's line.
    #[command(name = "rm", alias = "remove")]
    Remove { product_id: String },

    /// Increase a line's quantity.
    Inc {
        product_id: String,
        #[arg(default_value_t = 1)]
        by: i64,
    },

    /// Decrease a line's quantity (not below 1).
    Dec {
        product_id: String,
        #[arg(default_value_t = 1)]
        by: i64,
    },

    /// Show the sale being composed.
    Show,

    /// Submit the sale, optionally for a client.
    Submit { client_id: Option<String> },

    /// Discard the sale being composed.
    Cancel,

    /// Sales history, or one sale in detail.
    Sales { sale_id: Option<String> },

    /// Cancel an already created sale.
    Void { sale_id: String },

    /// Leave the console.
    #[command(alias = "exit")]
    Quit,
}

/// Parses one console line. Blank lines yield `Ok(None)`.
///
/// Errors carry clap's rendered message, help output included.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }

    ConsoleLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| e.render().to_string().trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ConsoleCommand {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_add_forms() {
        assert_eq!(
            parse("add P1 2"),
            ConsoleCommand::Add {
                product_id: Some("P1".into()),
                quantity: Some(2)
            }
        );
        assert_eq!(
            parse("add P1"),
            ConsoleCommand::Add {
                product_id: Some("P1".into()),
                quantity: None
            }
        );
        assert_eq!(
            parse("add"),
            ConsoleCommand::Add {
                product_id: None,
                quantity: None
            }
        );
    }

    #[test]
    fn test_negative_quantity_reaches_the_composer() {
        assert_eq!(parse("qty -3"), ConsoleCommand::Qty { quantity: -3 });
    }

    #[test]
    fn test_adjust_defaults_to_one() {
        assert_eq!(
            parse("inc P1"),
            ConsoleCommand::Inc {
                product_id: "P1".into(),
                by: 1
            }
        );
        assert_eq!(
            parse("dec P1 2"),
            ConsoleCommand::Dec {
                product_id: "P1".into(),
                by: 2
            }
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            parse("remove P2"),
            ConsoleCommand::Remove {
                product_id: "P2".into()
            }
        );
        assert_eq!(parse("rm P2"), parse("remove P2"));
        assert_eq!(parse("exit"), ConsoleCommand::Quit);
    }

    #[test]
    fn test_submit_with_and_without_client() {
        assert_eq!(
            parse("submit C1"),
            ConsoleCommand::Submit {
                client_id: Some("C1".into())
            }
        );
        assert_eq!(parse("submit"), ConsoleCommand::Submit { client_id: None });
    }

    #[test]
    fn test_errors_are_rendered() {
        let err = parse_line("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));

        let err = parse_line("add P1 two").unwrap_err();
        assert!(err.contains("two"));

        assert!(parse_line("help").is_err());
    }
}
