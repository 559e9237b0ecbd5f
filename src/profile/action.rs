// src/profile/action.rs

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Built-in duplicity operations a profile can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    RunBackup,
    Verify,
    PruneOld,
    Cleanup,
}

impl Directive {
    pub const ALL: [Directive; 4] = [
        Directive::RunBackup,
        Directive::Verify,
        Directive::PruneOld,
        Directive::Cleanup,
    ];

    /// Canonical profile token.
    pub fn token(&self) -> &'static str {
        match self {
            Directive::RunBackup => "!backup",
            Directive::Verify => "!verify",
            Directive::PruneOld => "!remove_old",
            Directive::Cleanup => "!cleanup",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "!backup" | "!run-backup" => Some(Directive::RunBackup),
            "!verify" => Some(Directive::Verify),
            "!remove_old" | "!prune-old" => Some(Directive::PruneOld),
            "!cleanup" => Some(Directive::Cleanup),
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One step of a job: an external script or a built-in directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Script(PathBuf),
    Directive(Directive),
}

impl Action {
    pub fn is_directive(&self) -> bool {
        matches!(self, Action::Directive(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Script(path) => write!(f, "{}", path.display()),
            Action::Directive(d) => d.fmt(f),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    /// Syntactic parse only; whether a script exists is checked during
    /// profile validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('/') {
            Ok(Action::Script(PathBuf::from(s)))
        } else if s.starts_with('!') {
            Directive::from_token(s).map(Action::Directive).ok_or_else(|| {
                let valid: Vec<_> = Directive::ALL.iter().map(|d| d.token()).collect();
                format!("{s} is not a valid action, valid ones are: {}", valid.join(", "))
            })
        } else {
            Err(format!(
                "actions must be either an absolute path or a !directive, got: {s}"
            ))
        }
    }
}
