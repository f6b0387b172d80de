use clap::Args;

use super::KeySource;
use crate::error::Result;

#[derive(Args)]
pub(crate) struct Config {
    #[command(flatten)]
    pub(crate) source: KeySource,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    for key in config.source.load()? {
        println!("{}", key.to_pkcs8_pem()?);
    }
    Ok(())
}
