//! Device descriptor sent with login and refresh requests.
//!
//! The backend keys refresh credentials to the device that requested
//! them, so the same string must accompany both calls. It is derived
//! from runtime signals and never stored.

/// Build the device classification string for this client.
///
/// Recomputed at each call site; the value is stable for the lifetime
/// of a given build on a given platform.
pub fn descriptor() -> String {
    format!(
        "{}-{}/rebanho-{}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_VERSION")
    )
}
