use anyhow::Context;
use log::trace;

use crate::error::Error;

/// Set up crate logging and environment variables.
pub(crate) fn setup() -> Result<(), Error> {
  dotenv::dotenv().ok();
  env_logger::try_init().context("failed to initialize logger")?;
  if std::env::var("DOTENV_OK").is_ok() {
    trace!("loaded dotenv");
  }
  Ok(())
}
