//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. The source may be unsized, which lets a DER payload (`[u8]`) decode
//! straight into the structure it carries.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - Performs the actual conversion
//! 2. `DecodableFrom<T>` - Marker trait constraining valid conversions
//!
//! Only pairs that are explicitly marked can be converted, so asking for a
//! structure that has no decoder is a compile error rather than a runtime
//! failure.
//!
//! # Implementation Guide
//!
//! ```no_run
//! use kagi::decoder::{DecodableFrom, Decoder};
//!
//! struct Version(u8);
//!
//! #[derive(Debug)]
//! struct VersionError;
//!
//! impl DecodableFrom<[u8]> for Version {}
//!
//! impl Decoder<[u8], Version> for [u8] {
//!     type Error = VersionError;
//!
//!     fn decode(&self) -> Result<Version, Self::Error> {
//!         self.first().copied().map(Version).ok_or(VersionError)
//!     }
//! }
//!
//! let bytes: &[u8] = &[0x01];
//! let version: Version = bytes.decode().unwrap();
//! assert_eq!(version.0, 1);
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The destination must implement
/// [`DecodableFrom<T>`].
pub trait Decoder<T: ?Sized, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not a valid encoding of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
pub trait DecodableFrom<T: ?Sized> {}
