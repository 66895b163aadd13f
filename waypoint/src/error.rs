use alloc::boxed::Box;
use core::fmt;

/// The error type returned by a failing waypoint callback.
pub type CallbackError = Box<dyn core::error::Error + Send + Sync>;

/// The result every waypoint callback returns.
pub type CallbackResult = Result<(), CallbackError>;

/// Identifies which configured callback failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallbackKind {
    PositionChange,
    Enter,
    Leave,
}

impl CallbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PositionChange => "on_position_change",
            Self::Enter => "on_enter",
            Self::Leave => "on_leave",
        }
    }
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Setup-time configuration mistakes. These are fatal and never swallowed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("the `{old}` option has been renamed to `{new}`")]
    RenamedOption {
        old: &'static str,
        new: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A callback failed. Callbacks scheduled after it in the same evaluation did not run.
    #[error("{kind} callback failed")]
    Callback {
        kind: CallbackKind,
        #[source]
        source: CallbackError,
    },
}

impl Error {
    pub fn callback_kind(&self) -> Option<CallbackKind> {
        match self {
            Self::Callback { kind, .. } => Some(*kind),
            Self::Config(_) => None,
        }
    }
}
