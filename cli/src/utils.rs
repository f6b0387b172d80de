use std::fs;
use std::io::{self, Read};

use tracing::debug;

use crate::error::{Error, Result};

/// Input text together with where it came from, for error messages.
pub(crate) struct Input {
    pub(crate) origin: String,
    pub(crate) text: String,
}

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Input> {
    let (origin, bytes) = match file {
        Some(path) => (path.to_string(), fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            ("<stdin>".to_string(), buffer)
        }
    };
    debug!(origin = %origin, bytes = bytes.len(), "read key input");
    Ok(Input {
        origin,
        text: String::from_utf8(bytes)?,
    })
}

/// Resolve the password from `--password` or `--password-env`.
pub(crate) fn read_password(
    password: Option<&str>,
    password_env: Option<&str>,
) -> Result<Option<String>> {
    match (password, password_env) {
        (Some(password), _) => Ok(Some(password.to_string())),
        (None, Some(name)) => std::env::var(name)
            .map(Some)
            .map_err(|_| Error::MissingPasswordEnv(name.to_string())),
        (None, None) => Ok(None),
    }
}

/// Lowercase hex without separators.
pub(crate) fn hex(data: &[u8]) -> String {
    data.iter().map(|byte| format!("{:02x}", byte)).collect()
}
