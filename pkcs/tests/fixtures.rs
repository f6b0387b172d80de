use std::error::Error as _;
use std::path::PathBuf;
use std::str::FromStr;

use kagi_pem::Pem;
use kagi_pkcs::{
    Error, KeyAlgorithm, KeyLoadError, KeyMaterial, RawKeyKind, Unsupported, load, load_all,
    parse, parse_all, parse_with_password,
};
use rstest::rstest;

const PASSWORD: &str = "test";

fn cause<T>(result: Result<T, KeyLoadError>) -> Result<T, Error> {
    result.map_err(KeyLoadError::into_cause)
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("testdata")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

#[test]
fn test_pkcs1_rsa() {
    let key = parse(&fixture("pkcs1/rsa.key")).unwrap();
    assert_eq!(KeyAlgorithm::Rsa, key.algorithm());
    assert_eq!(1024, key.key_size());
    assert!(key.curve().is_none());
    assert_eq!("PKCS#8", key.format());
}

#[test]
fn test_pkcs1_dsa_is_unsupported() {
    let err = parse(&fixture("pkcs1/dsa.key")).unwrap_err().into_cause();
    assert_eq!(
        Error::UnsupportedFormat(Unsupported::TraditionalFormat("DSA".to_string())),
        err
    );
    assert!(err.to_string().contains("Unrecognized private key format"));
}

#[rstest]
#[case("secp224r1", "secp224r1", "1.3.132.0.33", 224)]
#[case("secp256r1", "secp256r1", "1.2.840.10045.3.1.7", 256)]
#[case("prime256v1", "secp256r1", "1.2.840.10045.3.1.7", 256)]
#[case("secp256k1", "secp256k1", "1.3.132.0.10", 256)]
#[case("secp384r1", "secp384r1", "1.3.132.0.34", 384)]
#[case("secp521r1", "secp521r1", "1.3.132.0.35", 521)]
#[case("brainpoolP256r1", "brainpoolP256r1", "1.3.36.3.3.2.8.1.1.7", 256)]
#[case("brainpoolP320r1", "brainpoolP320r1", "1.3.36.3.3.2.8.1.1.9", 320)]
#[case("brainpoolP384r1", "brainpoolP384r1", "1.3.36.3.3.2.8.1.1.11", 384)]
#[case("brainpoolP512r1", "brainpoolP512r1", "1.3.36.3.3.2.8.1.1.13", 512)]
fn test_named_curves(
    #[case] file: &str,
    #[case] name: &str,
    #[case] oid: &str,
    #[case] bits: u64,
) {
    let sec1 = parse(&fixture(&format!("sec1/{}.key", file))).unwrap();
    let pkcs8_text = fixture(&format!("pkcs8/{}.key", file));
    let pkcs8 = parse(&pkcs8_text).unwrap();

    for key in [&sec1, &pkcs8] {
        assert_eq!(KeyAlgorithm::Ec, key.algorithm());
        let curve = key.curve().unwrap();
        assert_eq!(name, curve.name);
        assert_eq!(oid, curve.oid);
        assert_eq!(bits, key.key_size());
        assert!(key.public_key().is_some());
    }

    // Both encodings of the same key normalize to the same record, which
    // re-encodes to the PKCS#8 file.
    assert_eq!(sec1, pkcs8);
    let expected = Pem::from_str(&pkcs8_text).unwrap();
    assert_eq!(expected.data(), sec1.to_pkcs8_der().unwrap().as_slice());
}

#[rstest]
#[case("sec1/brainpoolP256t1.key", "1.3.36.3.3.2.8.1.1.8")]
#[case("sec1/brainpoolP320t1.key", "1.3.36.3.3.2.8.1.1.10")]
#[case("sec1/brainpoolP384t1.key", "1.3.36.3.3.2.8.1.1.12")]
#[case("sec1/brainpoolP512t1.key", "1.3.36.3.3.2.8.1.1.14")]
#[case("pkcs8/brainpoolP256t1.key", "1.3.36.3.3.2.8.1.1.8")]
#[case("pkcs8/brainpoolP320t1.key", "1.3.36.3.3.2.8.1.1.10")]
#[case("pkcs8/brainpoolP384t1.key", "1.3.36.3.3.2.8.1.1.12")]
#[case("pkcs8/brainpoolP512t1.key", "1.3.36.3.3.2.8.1.1.14")]
fn test_twisted_brainpool_is_unsupported(#[case] file: &str, #[case] oid: &str) {
    assert_eq!(
        Err(Error::UnsupportedFormat(Unsupported::Curve(oid.to_string()))),
        cause(parse(&fixture(file)))
    );
}

#[rstest]
#[case("pkcs8/rsa.key", KeyAlgorithm::Rsa, 1024)]
#[case("pkcs8/rsa-pss.key", KeyAlgorithm::RsaPss, 1024)]
#[case("pkcs8/rsa-pss-sha256.key", KeyAlgorithm::RsaPss, 1024)]
#[case("pkcs8/dsa.key", KeyAlgorithm::Dsa, 1024)]
#[case("pkcs8/ed25519.key", KeyAlgorithm::EdDsa, 256)]
#[case("pkcs8/ed448.key", KeyAlgorithm::EdDsa, 448)]
#[case("pkcs8/x25519.key", KeyAlgorithm::Xdh, 256)]
#[case("pkcs8/x448.key", KeyAlgorithm::Xdh, 448)]
fn test_pkcs8(#[case] file: &str, #[case] algorithm: KeyAlgorithm, #[case] bits: u64) {
    let text = fixture(file);
    let key = parse(&text).unwrap();
    assert_eq!(algorithm, key.algorithm());
    assert_eq!(bits, key.key_size());
    assert!(key.curve().is_none());

    let pem = Pem::from_str(&text).unwrap();
    assert_eq!(pem.data(), key.to_pkcs8_der().unwrap().as_slice());
    assert_eq!(text.trim_end(), key.to_pkcs8_pem().unwrap().to_string());
}

#[rstest]
#[case("pkcs8/ed25519.key", RawKeyKind::Ed25519, 32)]
#[case("pkcs8/ed448.key", RawKeyKind::Ed448, 57)]
#[case("pkcs8/x25519.key", RawKeyKind::X25519, 32)]
#[case("pkcs8/x448.key", RawKeyKind::X448, 56)]
fn test_raw_seed_is_unwrapped(#[case] file: &str, #[case] kind: RawKeyKind, #[case] len: usize) {
    let key = parse(&fixture(file)).unwrap();
    match key.material() {
        KeyMaterial::Raw(raw) => {
            assert_eq!(kind, raw.kind);
            assert_eq!(len, raw.private_key.len());
        }
        other => panic!("unexpected key material {:?}", other),
    }
}

#[test]
fn test_pkcs1_and_pkcs8_rsa_agree() {
    let pkcs1 = parse(&fixture("pkcs1/rsa.key")).unwrap();
    let pkcs8_text = fixture("pkcs8/rsa.key");
    let pkcs8 = parse(&pkcs8_text).unwrap();
    assert_eq!(pkcs1, pkcs8);
    assert_eq!(
        Pem::from_str(&pkcs8_text).unwrap().data(),
        pkcs1.to_pkcs8_der().unwrap().as_slice()
    );
}

#[rstest]
#[case("encrypted/rsa-aes256.key", "pkcs8/rsa.key")]
#[case("encrypted/rsa-aes128-sha1.key", "pkcs8/rsa.key")]
#[case("encrypted/rsa-aes192-sha512.key", "pkcs8/rsa.key")]
#[case("encrypted/ec-aes256.key", "pkcs8/secp256r1.key")]
#[case("encrypted/ed25519-des3.key", "pkcs8/ed25519.key")]
fn test_encrypted_matches_plain(#[case] encrypted: &str, #[case] plain: &str) {
    let decrypted = parse_with_password(&fixture(encrypted), PASSWORD).unwrap();
    let expected = parse(&fixture(plain)).unwrap();
    assert_eq!(expected, decrypted);
}

#[rstest]
#[case("encrypted/rsa-aes256.key")]
#[case("encrypted/ec-aes256.key")]
#[case("encrypted/ed25519-des3.key")]
fn test_encrypted_wrong_password(#[case] file: &str) {
    assert_eq!(
        Err(Error::DecryptionFailed),
        cause(parse_with_password(&fixture(file), "not the password"))
    );
}

#[test]
fn test_encrypted_without_password() {
    assert_eq!(
        Err(Error::PasswordRequired),
        cause(parse(&fixture("encrypted/rsa-aes256.key")))
    );
}

#[rstest]
#[case("encrypted/pkcs1-rsa.key")]
#[case("encrypted/sec1-prime256v1.key")]
#[case("encrypted/rsa-pbes1.key")]
#[case("encrypted/rsa-scrypt.key")]
fn test_unsupported_encryption(#[case] file: &str) {
    let text = fixture(file);
    for result in [parse(&text), parse_with_password(&text, PASSWORD)].map(cause) {
        assert!(
            matches!(result, Err(Error::UnsupportedFormat(_))),
            "{}: {:?}",
            file,
            result
        );
    }
}

#[test]
fn test_idempotent() {
    for file in ["pkcs1/rsa.key", "sec1/secp384r1.key", "pkcs8/x448.key"] {
        let text = fixture(file);
        assert_eq!(parse(&text).unwrap(), parse(&text).unwrap());
    }
    let text = fixture("encrypted/rsa-aes256.key");
    assert_eq!(
        parse_with_password(&text, PASSWORD).unwrap(),
        parse_with_password(&text, PASSWORD).unwrap()
    );
}

#[test]
fn test_not_pem() {
    assert_eq!(Err(Error::NoKeyFound), cause(parse(&fixture("banner.txt"))));
}

#[test]
fn test_mixed_documents() {
    let key = parse(&fixture("mixed/cert-and-key.pem")).unwrap();
    assert_eq!(parse(&fixture("pkcs8/secp256r1.key")).unwrap(), key);

    let keys = parse_all(&fixture("mixed/two-keys.pem"), None).unwrap();
    assert_eq!(2, keys.len());
    assert_eq!(parse(&fixture("pkcs8/ed25519.key")).unwrap(), keys[0]);
    assert_eq!(parse(&fixture("pkcs8/rsa.key")).unwrap(), keys[1]);
}

#[test]
fn test_load_wraps_cause() {
    let err = load("testdata/banner.txt", &fixture("banner.txt"), None).unwrap_err();
    assert_eq!(
        "Error loading private key from testdata/banner.txt",
        err.to_string()
    );
    assert_eq!(&Error::NoKeyFound, err.cause());
    assert!(err.source().is_some());

    let err = load(
        "server.key",
        &fixture("encrypted/rsa-aes256.key"),
        Some("wrong"),
    )
    .unwrap_err();
    assert_eq!(Error::DecryptionFailed, err.into_cause());

    let key = load("server.key", &fixture("mixed/cert-and-key.pem"), None).unwrap();
    assert_eq!(KeyAlgorithm::Ec, key.algorithm());

    let err = load_all("keys.pem", &fixture("banner.txt"), None).unwrap_err();
    assert_eq!(Some("keys.pem"), err.origin());
    assert_eq!(&Error::NoKeyFound, err.cause());
}

#[test]
fn test_parse_wraps_cause() {
    let err = parse("just some text\n").unwrap_err();
    assert_eq!("Error loading private key", err.to_string());
    assert_eq!(
        "no PEM encoded private key found",
        err.source().unwrap().to_string()
    );

    let err = parse_with_password(&fixture("encrypted/rsa-aes256.key"), "wrong").unwrap_err();
    assert!(err.to_string().contains("Error loading private key"));
    assert_eq!(&Error::DecryptionFailed, err.cause());
    assert_eq!(
        "failed to decrypt the private key",
        err.source().unwrap().to_string()
    );
}
