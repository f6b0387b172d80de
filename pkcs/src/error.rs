use thiserror::Error;

/// Errors produced while turning PEM text into a [`PrivateKeyRecord`](crate::PrivateKeyRecord).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input holds no PEM private key block at all.
    #[error("no PEM encoded private key found")]
    NoKeyFound,

    /// PEM armor is broken (unterminated block, invalid base64).
    #[error("malformed PEM input: {0}")]
    MalformedInput(#[from] kagi_pem::error::Error),

    /// DER structural violation.
    #[error("malformed DER: {0}")]
    MalformedDer(#[from] kagi_der::Error),

    /// Valid DER that misses a field the format requires.
    #[error("malformed private key: {0}")]
    MalformedFormat(String),

    /// Recognized structure using an algorithm, curve or encryption that is not supported.
    #[error("Unrecognized private key format: {0}")]
    UnsupportedFormat(#[from] Unsupported),

    /// An encrypted key was found but no password was given.
    #[error("a password is required to decrypt the private key")]
    PasswordRequired,

    /// Decryption did not produce a valid key, usually a wrong password.
    #[error("failed to decrypt the private key")]
    DecryptionFailed,
}

/// The reason a key was recognized but rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Unsupported {
    #[error("unknown key algorithm {0}")]
    Algorithm(String),
    #[error("unknown elliptic curve {0}")]
    Curve(String),
    #[error("explicit elliptic curve parameters")]
    ExplicitCurve,
    #[error("{0} keys in the traditional format")]
    TraditionalFormat(String),
    #[error("legacy OpenSSL encryption of {0}")]
    LegacyEncryption(String),
    #[error("multi-prime RSA keys")]
    MultiPrimeRsa,
    #[error("version {0}")]
    Version(u64),
    #[error("encryption scheme {0}")]
    EncryptionScheme(String),
    #[error("key derivation function {0}")]
    KeyDerivation(String),
    #[error("PBKDF2 salt from an algorithm identifier")]
    SaltSource,
    #[error("pseudo-random function {0}")]
    Prf(String),
    #[error("cipher {0}")]
    Cipher(String),
}

/// Failure of one of the parsing entry points, keeping the underlying
/// [`Error`] as its source.
///
/// `origin` names where the text came from (usually a file path) when the
/// caller knows it.
#[derive(Debug, Error)]
#[error("Error loading private key{}", display_origin(.origin))]
pub struct KeyLoadError {
    origin: Option<String>,
    #[source]
    cause: Error,
}

fn display_origin(origin: &Option<String>) -> String {
    match origin {
        Some(origin) => format!(" from {}", origin),
        None => String::new(),
    }
}

impl KeyLoadError {
    pub fn new(origin: impl Into<String>, cause: Error) -> Self {
        KeyLoadError {
            origin: Some(origin.into()),
            cause,
        }
    }

    pub(crate) fn without_origin(cause: Error) -> Self {
        KeyLoadError {
            origin: None,
            cause,
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn cause(&self) -> &Error {
        &self.cause
    }

    pub fn into_cause(self) -> Error {
        self.cause
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use rstest::rstest;

    use super::{Error, KeyLoadError, Unsupported};

    #[rstest]
    #[case(Unsupported::Curve("1.3.36.3.3.2.8.1.1.8".to_string()))]
    #[case(Unsupported::TraditionalFormat("DSA".to_string()))]
    #[case(Unsupported::EncryptionScheme("1.2.840.113549.1.12.1.3".to_string()))]
    #[case(Unsupported::LegacyEncryption("RSA PRIVATE KEY".to_string()))]
    fn test_unsupported_message(#[case] reason: Unsupported) {
        let err = Error::from(reason);
        assert!(
            err.to_string()
                .starts_with("Unrecognized private key format")
        );
    }

    #[test]
    fn test_key_load_error_keeps_cause() {
        let err = KeyLoadError::new("server.key", Error::NoKeyFound);
        assert_eq!("Error loading private key from server.key", err.to_string());
        assert_eq!(Some("server.key"), err.origin());
        assert_eq!(&Error::NoKeyFound, err.cause());
        let source = err.source().unwrap();
        assert_eq!(Error::NoKeyFound.to_string(), source.to_string());
    }

    #[test]
    fn test_key_load_error_without_origin() {
        let err = KeyLoadError::without_origin(Error::DecryptionFailed);
        assert_eq!("Error loading private key", err.to_string());
        assert_eq!(None, err.origin());
        assert_eq!(
            Error::DecryptionFailed.to_string(),
            err.source().unwrap().to_string()
        );
    }
}
