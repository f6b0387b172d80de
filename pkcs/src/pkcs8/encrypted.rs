//! RFC 5958 EncryptedPrivateKeyInfo
//!
//! Encrypted private key container. Decryption is delegated to the PBES2
//! engine in [`super::pbes2`].

use kagi::decoder::{DecodableFrom, Decoder};
use kagi_der::{Reader, Writer};

use super::PrivateKeyInfo;
use super::pbes2::Pbes2Parameters;
use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result};

/// EncryptedPrivateKeyInfo
///
/// ```asn1
/// EncryptedPrivateKeyInfo ::= SEQUENCE {
///     encryptionAlgorithm  EncryptionAlgorithmIdentifier,
///     encryptedData        EncryptedData
/// }
///
/// EncryptedData ::= OCTET STRING
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPrivateKeyInfo {
    pub encryption_algorithm: AlgorithmIdentifier,
    pub encrypted_data: Vec<u8>,
}

impl EncryptedPrivateKeyInfo {
    /// Decrypts the payload and decodes the inner `PrivateKeyInfo`.
    ///
    /// Any failure past parameter validation is reported as
    /// [`Error::DecryptionFailed`], since a wrong password yields garbage that
    /// can fail at any later stage.
    pub fn decrypt(&self, password: &[u8]) -> Result<PrivateKeyInfo> {
        let parameters = self.parameters()?;
        let plaintext = parameters.decrypt(password, &self.encrypted_data)?;
        let info: Result<PrivateKeyInfo> = plaintext.as_slice().decode();
        info.map_err(|_| Error::DecryptionFailed)
    }

    /// Validated encryption parameters. Fails for anything but PBES2 with
    /// PBKDF2 and a supported CBC cipher.
    pub fn parameters(&self) -> Result<Pbes2Parameters> {
        Pbes2Parameters::from_algorithm(&self.encryption_algorithm)
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|w| {
            self.encryption_algorithm.write(w);
            w.write_octet_string(&self.encrypted_data);
        });
        writer.finish()
    }
}

impl DecodableFrom<[u8]> for EncryptedPrivateKeyInfo {}

impl Decoder<[u8], EncryptedPrivateKeyInfo> for [u8] {
    type Error = Error;

    fn decode(&self) -> Result<EncryptedPrivateKeyInfo> {
        let mut outer = Reader::new(self);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        let encryption_algorithm = AlgorithmIdentifier::read(&mut seq)?;
        let encrypted_data = seq.read_octet_string()?.to_vec();
        seq.finish()?;

        Ok(EncryptedPrivateKeyInfo {
            encryption_algorithm,
            encrypted_data,
        })
    }
}
