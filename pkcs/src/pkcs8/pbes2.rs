//! RFC 8018 PBES2 decryption with PBKDF2 key derivation.

use cbc::Decryptor;
use cbc::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
use kagi_der::{Reader, Tag};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use tracing::trace;
use zeroize::Zeroizing;

use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result, Unsupported};
use crate::oid;

/*
RFC 8018 - PKCS #5: Password-Based Cryptography Specification

PBES2-params ::= SEQUENCE {
    keyDerivationFunc AlgorithmIdentifier {{PBES2-KDFs}},
    encryptionScheme AlgorithmIdentifier {{PBES2-Encs}}
}

PBKDF2-params ::= SEQUENCE {
    salt CHOICE {
        specified OCTET STRING,
        otherSource AlgorithmIdentifier {{PBKDF2-SaltSources}}
    },
    iterationCount INTEGER (1..MAX),
    keyLength INTEGER (1..MAX) OPTIONAL,
    prf AlgorithmIdentifier {{PBKDF2-PRFs}} DEFAULT algid-hmacWithSHA1
}
*/

/// Pseudo-random function used by PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prf {
    HmacSha1,
    HmacSha224,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl Prf {
    fn from_oid(oid: &str) -> Option<Self> {
        match oid {
            oid::HMAC_WITH_SHA1 => Some(Prf::HmacSha1),
            oid::HMAC_WITH_SHA224 => Some(Prf::HmacSha224),
            oid::HMAC_WITH_SHA256 => Some(Prf::HmacSha256),
            oid::HMAC_WITH_SHA384 => Some(Prf::HmacSha384),
            oid::HMAC_WITH_SHA512 => Some(Prf::HmacSha512),
            _ => None,
        }
    }
}

/// Block cipher in CBC mode used by the encryption scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
    DesEde3Cbc,
}

impl Cipher {
    fn from_oid(oid: &str) -> Option<Self> {
        match oid {
            oid::AES128_CBC => Some(Cipher::Aes128Cbc),
            oid::AES192_CBC => Some(Cipher::Aes192Cbc),
            oid::AES256_CBC => Some(Cipher::Aes256Cbc),
            oid::DES_EDE3_CBC => Some(Cipher::DesEde3Cbc),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cipher::Aes128Cbc => "AES-128-CBC",
            Cipher::Aes192Cbc => "AES-192-CBC",
            Cipher::Aes256Cbc => "AES-256-CBC",
            Cipher::DesEde3Cbc => "DES-EDE3-CBC",
        }
    }

    pub fn key_len(&self) -> usize {
        match self {
            Cipher::Aes128Cbc => 16,
            Cipher::Aes192Cbc | Cipher::DesEde3Cbc => 24,
            Cipher::Aes256Cbc => 32,
        }
    }

    pub fn block_size(&self) -> usize {
        match self {
            Cipher::Aes128Cbc | Cipher::Aes192Cbc | Cipher::Aes256Cbc => 16,
            Cipher::DesEde3Cbc => 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbkdf2Parameters {
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub key_length: Option<usize>,
    pub prf: Prf,
}

impl Pbkdf2Parameters {
    fn read(algorithm: &AlgorithmIdentifier) -> Result<Self> {
        let oid = algorithm.oid.to_string();
        if oid != oid::PBKDF2 {
            return Err(Unsupported::KeyDerivation(oid).into());
        }

        let mut parameters = algorithm
            .parameters()
            .ok_or_else(|| Error::MalformedFormat("PBKDF2 without parameters".to_string()))?;
        let mut seq = parameters.read_sequence()?;
        parameters.finish()?;

        let salt = match seq.peek_tag() {
            Some(Tag::Sequence) => return Err(Unsupported::SaltSource.into()),
            _ => seq.read_octet_string()?.to_vec(),
        };

        let iterations = seq.read_u64()?;
        let iterations = u32::try_from(iterations)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                Error::MalformedFormat(format!("PBKDF2 iteration count {} out of range", iterations))
            })?;

        let key_length = if seq.peek_tag() == Some(Tag::Integer) {
            let length = seq.read_u64()?;
            Some(usize::try_from(length).map_err(|_| {
                Error::MalformedFormat(format!("PBKDF2 key length {} out of range", length))
            })?)
        } else {
            None
        };

        let prf = if seq.is_empty() {
            Prf::HmacSha1
        } else {
            let prf = AlgorithmIdentifier::read(&mut seq)?;
            let prf_oid = prf.oid.to_string();
            Prf::from_oid(&prf_oid).ok_or(Unsupported::Prf(prf_oid))?
        };
        seq.finish()?;

        Ok(Pbkdf2Parameters {
            salt,
            iterations,
            key_length,
            prf,
        })
    }

    fn derive(&self, password: &[u8], key: &mut [u8]) {
        match self.prf {
            Prf::HmacSha1 => pbkdf2::pbkdf2_hmac::<Sha1>(password, &self.salt, self.iterations, key),
            Prf::HmacSha224 => {
                pbkdf2::pbkdf2_hmac::<Sha224>(password, &self.salt, self.iterations, key)
            }
            Prf::HmacSha256 => {
                pbkdf2::pbkdf2_hmac::<Sha256>(password, &self.salt, self.iterations, key)
            }
            Prf::HmacSha384 => {
                pbkdf2::pbkdf2_hmac::<Sha384>(password, &self.salt, self.iterations, key)
            }
            Prf::HmacSha512 => {
                pbkdf2::pbkdf2_hmac::<Sha512>(password, &self.salt, self.iterations, key)
            }
        }
    }
}

/// Validated PBES2 parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbes2Parameters {
    pub kdf: Pbkdf2Parameters,
    pub cipher: Cipher,
    pub iv: Vec<u8>,
}

impl Pbes2Parameters {
    /// Reads the `encryptionAlgorithm` of an `EncryptedPrivateKeyInfo`.
    pub fn from_algorithm(algorithm: &AlgorithmIdentifier) -> Result<Self> {
        let oid = algorithm.oid.to_string();
        if oid != oid::PBES2 {
            return Err(Unsupported::EncryptionScheme(oid).into());
        }

        let mut parameters = algorithm
            .parameters()
            .ok_or_else(|| Error::MalformedFormat("PBES2 without parameters".to_string()))?;
        let mut seq = parameters.read_sequence()?;
        parameters.finish()?;
        let kdf = AlgorithmIdentifier::read(&mut seq)?;
        let scheme = AlgorithmIdentifier::read(&mut seq)?;
        seq.finish()?;

        let kdf = Pbkdf2Parameters::read(&kdf)?;

        let scheme_oid = scheme.oid.to_string();
        let cipher = Cipher::from_oid(&scheme_oid).ok_or(Unsupported::Cipher(scheme_oid))?;
        let iv = read_iv(&scheme)?;
        if iv.len() != cipher.block_size() {
            return Err(Error::MalformedFormat(format!(
                "{} needs a {} byte IV, got {}",
                cipher.name(),
                cipher.block_size(),
                iv.len()
            )));
        }

        if let Some(key_length) = kdf.key_length {
            if key_length != cipher.key_len() {
                return Err(Error::MalformedFormat(format!(
                    "PBKDF2 key length {} does not match {}",
                    key_length,
                    cipher.name()
                )));
            }
        }

        Ok(Pbes2Parameters { kdf, cipher, iv })
    }

    /// Derives the key and decrypts `ciphertext`, removing PKCS#7 padding.
    pub fn decrypt(&self, password: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        trace!(
            prf = ?self.kdf.prf,
            iterations = self.kdf.iterations,
            cipher = self.cipher.name(),
            "decrypting PBES2 payload"
        );

        if ciphertext.is_empty() || ciphertext.len() % self.cipher.block_size() != 0 {
            return Err(Error::DecryptionFailed);
        }

        let mut key = Zeroizing::new(vec![0u8; self.cipher.key_len()]);
        self.kdf.derive(password, key.as_mut_slice());

        let iv = self.iv.as_slice();
        let plaintext = match self.cipher {
            Cipher::Aes128Cbc => Decryptor::<aes::Aes128>::new_from_slices(&key, iv)
                .map_err(|_| invalid_key_length(self.cipher))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            Cipher::Aes192Cbc => Decryptor::<aes::Aes192>::new_from_slices(&key, iv)
                .map_err(|_| invalid_key_length(self.cipher))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            Cipher::Aes256Cbc => Decryptor::<aes::Aes256>::new_from_slices(&key, iv)
                .map_err(|_| invalid_key_length(self.cipher))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            Cipher::DesEde3Cbc => Decryptor::<des::TdesEde3>::new_from_slices(&key, iv)
                .map_err(|_| invalid_key_length(self.cipher))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        }
        .map_err(|_| Error::DecryptionFailed)?;

        Ok(Zeroizing::new(plaintext))
    }
}

fn read_iv(scheme: &AlgorithmIdentifier) -> Result<Vec<u8>> {
    let mut parameters: Reader<'_> = scheme
        .parameters()
        .ok_or_else(|| Error::MalformedFormat("cipher without IV".to_string()))?;
    let iv = parameters.read_octet_string()?.to_vec();
    parameters.finish()?;
    Ok(iv)
}

fn invalid_key_length(cipher: Cipher) -> Error {
    Error::MalformedFormat(format!("invalid key or IV length for {}", cipher.name()))
}
