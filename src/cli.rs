//! Clap adapter for inifig.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`ConfigArgs`] embeds into an application's clap derive to provide
//! `config check|list|get|set` subcommands. The only bridge to the core is
//! [`ConfigArgs::into_action()`], which produces a
//! [`ConfigAction`](crate::ConfigAction) for
//! [`InifigBuilder::handle()`](crate::InifigBuilder::handle).
//!
//! Applications using another argument parser can construct
//! [`ConfigAction`](crate::ConfigAction) values directly.

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Validate the config file against the schema.
    Check,
    /// Show every bound configuration key-value pair.
    List,
    /// Show the bound value of a key and the line that sets it.
    Get {
        /// Dotted key path (e.g. "Files.input").
        key: String,
    },
    /// Set a value and write the config file back.
    Set {
        /// Dotted key path (e.g. "Files.input").
        key: String,
        /// Raw value, coerced per the option's declared kind.
        value: String,
    },
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Check) => ConfigAction::Check,
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Set { key, value }) => ConfigAction::Set { key, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the subcommand.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        TestCli::try_parse_from(args).unwrap().config
    }

    #[test]
    fn parse_check() {
        let action = parse(&["test", "check"]).into_action();
        assert_eq!(action, ConfigAction::Check);
    }

    #[test]
    fn parse_bare_config_is_list() {
        let action = parse(&["test"]).into_action();
        assert_eq!(action, ConfigAction::List);
    }

    #[test]
    fn parse_explicit_list() {
        let action = parse(&["test", "list"]).into_action();
        assert_eq!(action, ConfigAction::List);
    }

    #[test]
    fn parse_get() {
        let action = parse(&["test", "get", "Files.input"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Get {
                key: "Files.input".into()
            }
        );
    }

    #[test]
    fn parse_set() {
        let action = parse(&["test", "set", "General.tags", "a, b"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Set {
                key: "General.tags".into(),
                value: "a, b".into(),
            }
        );
    }

    #[test]
    fn set_requires_value() {
        assert!(TestCli::try_parse_from(["test", "set", "General.name"]).is_err());
    }

    #[test]
    fn invalid_subcommand_errors() {
        let result = TestCli::try_parse_from(["test", "nope"]);
        assert!(result.is_err());
    }
}
