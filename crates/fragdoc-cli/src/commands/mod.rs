pub mod ask;
pub mod login;
pub mod upload;

use anyhow::{bail, Context, Result};
use fragdoc::{strategy_for, ClientConfig, SessionController};

/// Build a controller from the environment and run the interactive login.
///
/// The session is not persisted: every invocation re-acquires a credential,
/// so each command performs its own login before the actual operation.
pub(crate) async fn authenticated_controller() -> Result<SessionController> {
    let config = ClientConfig::from_env().context("invalid FRAGDOC_* environment")?;
    if config.api_base.is_empty() {
        bail!("FRAGDOC_API_BASE is not set");
    }
    tracing::debug!(api_base = %config.api_base, flow = ?config.auth.flow, "loaded configuration");

    let auth = strategy_for(&config.auth);
    let mut controller = SessionController::new(&config, auth);
    if !controller.login().await {
        bail!("Anmeldung fehlgeschlagen");
    }
    Ok(controller)
}
