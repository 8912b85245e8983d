//! Command routing
//!
//! Maps a verb string to one of a closed set of operations for a resolved
//! environment. The set is statically enumerable and dispatch is an
//! explicit match, so there is no dynamically-named lookup to go wrong.

pub mod migrate;
pub mod service;
pub mod vhost;

use crate::environment::Environment;
use crate::error::{ShipwayError, ShipwayResult};
use crate::executor::RemoteExecutor;
use crate::report::{Prompter, Reporter};
use crate::workspace::Workspace;

/// The closed set of runtime commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Start,
    Stop,
    Restart,
    Reload,
    CreateVhost,
    UploadVhost,
    DownloadVhost,
    DeleteVhost,
    UpdateConfiguration,
}

impl Verb {
    /// Every recognized verb, in help order.
    pub const ALL: [Verb; 9] = [
        Verb::Start,
        Verb::Stop,
        Verb::Restart,
        Verb::Reload,
        Verb::CreateVhost,
        Verb::UploadVhost,
        Verb::DownloadVhost,
        Verb::DeleteVhost,
        Verb::UpdateConfiguration,
    ];

    /// Canonical spelling of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Start => "start",
            Verb::Stop => "stop",
            Verb::Restart => "restart",
            Verb::Reload => "reload",
            Verb::CreateVhost => "create-vhost",
            Verb::UploadVhost => "upload-vhost",
            Verb::DownloadVhost => "download-vhost",
            Verb::DeleteVhost => "delete-vhost",
            Verb::UpdateConfiguration => "update-configuration",
        }
    }

    /// Parse a verb, folding case and `_`/`-` separators first.
    ///
    /// Unrecognized verbs are a reported error, never a panic.
    pub fn parse(input: &str) -> ShipwayResult<Verb> {
        let normalized = input.trim().to_ascii_lowercase().replace('_', "-");
        Verb::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == normalized)
            .ok_or_else(|| ShipwayError::UnknownCommand {
                verb: input.to_string(),
            })
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a command handler needs for one invocation.
pub struct CommandContext<'a> {
    pub environment: &'a Environment,
    pub executor: &'a dyn RemoteExecutor,
    pub workspace: &'a Workspace,
    pub reporter: &'a dyn Reporter,
    pub prompter: &'a dyn Prompter,
}

/// Dispatch a verb to its handler.
pub fn dispatch(verb: Verb, ctx: &CommandContext) -> ShipwayResult<()> {
    match verb {
        Verb::Start => service::start(ctx),
        Verb::Stop => service::stop(ctx),
        Verb::Restart => service::restart(ctx),
        Verb::Reload => service::reload(ctx),
        Verb::CreateVhost => vhost::create(ctx),
        Verb::UploadVhost => vhost::upload(ctx),
        Verb::DownloadVhost => vhost::download(ctx),
        Verb::DeleteVhost => vhost::delete(ctx),
        Verb::UpdateConfiguration => migrate::update_configuration(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_spellings() {
        for verb in Verb::ALL {
            assert_eq!(Verb::parse(verb.as_str()).unwrap(), verb);
        }
    }

    #[test]
    fn parse_folds_case() {
        assert_eq!(Verb::parse("RESTART").unwrap(), Verb::Restart);
        assert_eq!(Verb::parse("Create-Vhost").unwrap(), Verb::CreateVhost);
    }

    #[test]
    fn parse_folds_underscores() {
        assert_eq!(Verb::parse("update_configuration").unwrap(), Verb::UpdateConfiguration);
        assert_eq!(Verb::parse("Upload_Vhost").unwrap(), Verb::UploadVhost);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(Verb::parse(" reload ").unwrap(), Verb::Reload);
    }

    #[test]
    fn parse_unknown_verb_reports_original_spelling() {
        let err = Verb::parse("explode").unwrap_err();
        match err {
            ShipwayError::UnknownCommand { verb } => assert_eq!(verb, "explode"),
            other => panic!("expected UnknownCommand, got {:?}", other),
        }
    }

    #[test]
    fn all_list_has_no_duplicates() {
        let mut names: Vec<_> = Verb::ALL.iter().map(|v| v.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Verb::ALL.len());
    }

    #[test]
    fn display_matches_canonical_spelling() {
        assert_eq!(Verb::DeleteVhost.to_string(), "delete-vhost");
    }
}
