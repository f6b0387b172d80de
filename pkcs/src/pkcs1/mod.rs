//! PKCS#1 - RSA Private Key Structure
//!
//! Traditional `RSA PRIVATE KEY` encoding as defined in
//! [RFC 8017 Appendix A.1.2](https://datatracker.ietf.org/doc/html/rfc8017#appendix-A.1.2).
//! PKCS#8 wraps the same structure for RSA and RSASSA-PSS keys.

mod types;

pub use types::{RSAPrivateKey, Version};
