pub mod provider;
pub mod session;

pub use provider::{AuthProvider, CurrentUser, OwnerId, SessionAuth};
pub use session::{SessionStorage, SessionToken};

use anyhow::Result;

/// Initialize the auth module
pub fn init() -> Result<()> {
    tracing::info!("textsnap auth initialized");
    Ok(())
}
