//! OS-level glue
//!
//! A single query: whether the process runs with elevated privileges.
//! Consumed only for a startup warning; nothing in the pipeline branches
//! on it.

/// Check whether the current process is running with elevated privileges.
///
/// Uses `nix::unistd::geteuid()` on Unix; always returns `false` on other
/// platforms.
pub fn is_running_as_admin() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::geteuid().is_root()
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Log a warning if the process is running elevated
pub fn warn_if_elevated() {
    if is_running_as_admin() {
        tracing::warn!(
            "running with elevated privileges; serial access does not require them"
        );
    }
}
