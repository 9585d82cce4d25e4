/// Errors surfaced to the host.
///
/// Only construction and data transfer can fail from the host's point of view;
/// lifecycle command failures are logged and absorbed by the hook controller.
#[derive(thiserror::Error, Debug)]
pub enum HookError {
    #[error("Unknown field {0}")]
    UnknownField(String),

    #[error("Invalid type for {0}")]
    InvalidType(String),

    #[error("No slave defined for {0}")]
    MissingSlave(String),

    #[error("Configuration for {0} is not a compound node")]
    NotCompound(String),

    #[error("cannot allocate {0}")]
    OutOfMemory(String),

    #[error("Slave creation for {pcm} failed with code {code}")]
    SlaveCreate { pcm: String, code: i32 },

    #[error("Channel area copy failed: {0}")]
    AreaCopy(String),
}

impl HookError {
    /// Negative errno handed back to the host.
    pub fn errno(&self) -> i32 {
        match self {
            HookError::UnknownField(_)
            | HookError::InvalidType(_)
            | HookError::MissingSlave(_)
            | HookError::NotCompound(_)
            | HookError::AreaCopy(_) => -libc::EINVAL,
            HookError::OutOfMemory(_) => -libc::ENOMEM,
            // Host codes are already negative; normalise anything else.
            HookError::SlaveCreate { code, .. } => -code.abs(),
        }
    }

    /// True for errors caused by the user's configuration rather than the host.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HookError::UnknownField(_)
                | HookError::InvalidType(_)
                | HookError::MissingSlave(_)
                | HookError::NotCompound(_)
        )
    }
}
