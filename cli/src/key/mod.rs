pub(crate) mod convert;
pub(crate) mod inspect;

use clap::{Args, Subcommand};
use kagi_pkcs::PrivateKeyRecord;

use crate::error::Result;
use crate::utils::{Input, read_input, read_password};

#[derive(Subcommand)]
pub(crate) enum KeyCommands {
    /// Show the algorithm, curve and size of a PEM private key
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
    /// Re-encode a private key as unencrypted PKCS#8 PEM
    Convert {
        #[command(flatten)]
        config: convert::Config,
    },
}

/// Input options shared by the key commands.
#[derive(Args)]
pub(crate) struct KeySource {
    /// Path to the PEM file. If not specified, reads from stdin
    pub(crate) file: Option<String>,

    /// Password for ENCRYPTED PRIVATE KEY blocks
    #[arg(long, conflicts_with = "password_env")]
    pub(crate) password: Option<String>,

    /// Read the password from this environment variable
    #[arg(long, value_name = "VAR")]
    pub(crate) password_env: Option<String>,

    /// Process every private key block instead of the first one
    #[arg(long)]
    pub(crate) all: bool,
}

impl KeySource {
    /// Reads and parses the selected key blocks.
    pub(crate) fn load(&self) -> Result<Vec<PrivateKeyRecord>> {
        let Input { origin, text } = read_input(self.file.as_deref())?;
        let password = read_password(self.password.as_deref(), self.password_env.as_deref())?;

        let keys = if self.all {
            kagi_pkcs::load_all(&origin, &text, password.as_deref())?
        } else {
            vec![kagi_pkcs::load(&origin, &text, password.as_deref())?]
        };
        Ok(keys)
    }
}
