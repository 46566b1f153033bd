//! Global, resettable [`ReqwestTransport`] looked up by clients built without
//! an explicit transport.
//!
//! # Design
//! - Backing storage is `ArcSwapOption<ReqwestTransport>` inside a `OnceLock`.
//! - **Reads are lock-free**; `global_transport()` does a single atomic load and returns a
//!   **cheap clone** of the current transport.
//! - **Reset is safe**; `set_global_transport`/`drop_global_transport` publish a new instance
//!   (or `None`). Clients already holding a clone keep working with it.
//! - **Init is fallible** and returns `BuildError` instead of panicking.
//!
//! # Concurrency and races
//! - If multiple threads call `global_transport()` concurrently before initialization, more
//!   than one transport may be constructed; the last stored wins and the others are dropped.
//!
//! # Examples
//! Route every default-built client through a transport with a timeout:
//! ```
//! # use std::time::Duration;
//! # use github_auth::{set_global_transport, ReqwestTransport};
//! let transport = ReqwestTransport::builder()
//!     .request_timeout(Duration::from_secs(5))
//!     .build()?;
//! set_global_transport(transport);
//! # Ok::<(), github_auth::BuildError>(())
//! ```

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::sync::OnceLock;

use crate::{BuildError, ReqwestTransport};

/// Process-wide slot for the optional default transport.
static GLOBAL_TRANSPORT: OnceLock<ArcSwapOption<ReqwestTransport>> = OnceLock::new();

#[inline]
fn slot() -> &'static ArcSwapOption<ReqwestTransport> {
    GLOBAL_TRANSPORT.get_or_init(|| ArcSwapOption::from(None))
}

/// Get-or-init the process-wide default transport.
///
/// - On first use, constructs via `ReqwestTransport::new()`.
/// - Subsequent calls are lock-free and just clone the current instance.
pub fn global_transport() -> Result<ReqwestTransport, BuildError> {
    if let Some(current) = slot().load_full() {
        return Ok(current.as_ref().clone());
    }

    let fresh = ReqwestTransport::new()?;
    slot().store(Some(Arc::new(fresh.clone())));
    Ok(fresh)
}

/// Replace the global default transport.
pub fn set_global_transport(transport: ReqwestTransport) {
    slot().store(Some(Arc::new(transport)));
}

/// Clear the global default transport.
///
/// After this call, the next `global_transport()` will lazily construct a fresh one.
pub fn drop_global_transport() {
    slot().store(None);
}
