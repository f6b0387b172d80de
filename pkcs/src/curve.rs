//! Named elliptic curves and their domain parameters.
//!
//! All curves are short Weierstrass `y^2 = x^3 + ax + b` over a prime
//! field. Parameters are big-endian octets as published in SEC 2 and
//! RFC 5639. Twisted brainpool curves are intentionally not listed.

use hex_literal::hex;
use kagi_der::ObjectIdentifier;

use crate::oid;

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CurveParameters {
    pub name: &'static str,
    pub oid: &'static str,
    /// Size of the field prime in bits.
    pub field_size: u32,
    pub prime: &'static [u8],
    pub a: &'static [u8],
    pub b: &'static [u8],
    /// Base point in uncompressed form (`04 || x || y`).
    pub generator: &'static [u8],
    pub order: &'static [u8],
    pub cofactor: u32,
}

impl CurveParameters {
    /// Length in bytes of a private scalar on this curve.
    pub fn scalar_len(&self) -> usize {
        self.order.len()
    }
}

impl std::fmt::Display for CurveParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

static CURVES: [CurveParameters; 9] = [
    CurveParameters {
        name: "secp224r1",
        oid: oid::SECP224R1,
        field_size: 224,
        prime: &hex!("ffffffffffffffffffffffffffffffff000000000000000000000001"),
        a: &hex!("fffffffffffffffffffffffffffffffefffffffffffffffffffffffe"),
        b: &hex!("b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
        generator: &hex!(
            "04b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21bd3763"
            "88b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"
        ),
        order: &hex!("ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d"),
        cofactor: 1,
    },
    CurveParameters {
        name: "secp256r1",
        oid: oid::SECP256R1,
        field_size: 256,
        prime: &hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        a: &hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
        b: &hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        generator: &hex!(
            "046b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c2"
            "964fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51"
            "f5"
        ),
        order: &hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
        cofactor: 1,
    },
    CurveParameters {
        name: "secp256k1",
        oid: oid::SECP256K1,
        field_size: 256,
        prime: &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        a: &hex!("00"),
        b: &hex!("07"),
        generator: &hex!(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f817"
            "98483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4"
            "b8"
        ),
        order: &hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        cofactor: 1,
    },
    CurveParameters {
        name: "secp384r1",
        oid: oid::SECP384R1,
        field_size: 384,
        prime: &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
            "ffffffff0000000000000000ffffffff"
        ),
        a: &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
            "ffffffff0000000000000000fffffffc"
        ),
        b: &hex!(
            "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a"
            "c656398d8a2ed19d2a85c8edd3ec2aef"
        ),
        generator: &hex!(
            "04aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a"
            "385502f25dbf55296c3a545e3872760ab73617de4a96262c6f5d9e98bf9292dc"
            "29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e"
            "5f"
        ),
        order: &hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf"
            "581a0db248b0a77aecec196accc52973"
        ),
        cofactor: 1,
    },
    CurveParameters {
        name: "secp521r1",
        oid: oid::SECP521R1,
        field_size: 521,
        prime: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffff"
        ),
        a: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffc"
        ),
        b: &hex!(
            "51953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109"
            "e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f"
            "00"
        ),
        generator: &hex!(
            "0400c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b"
            "4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2"
            "e5bd66011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd"
            "17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94"
            "769fd16650"
        ),
        order: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138"
            "6409"
        ),
        cofactor: 1,
    },
    CurveParameters {
        name: "brainpoolP256r1",
        oid: oid::BRAINPOOL_P256R1,
        field_size: 256,
        prime: &hex!("a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377"),
        a: &hex!("7d5a0975fc2c3057eef67530417affe7fb8055c126dc5c6ce94a4b44f330b5d9"),
        b: &hex!("26dc5c6ce94a4b44f330b5d9bbd77cbf958416295cf7e1ce6bccdc18ff8c07b6"),
        generator: &hex!(
            "048bd2aeb9cb7e57cb2c4b482ffc81b7afb9de27e1e3bd23c23a4453bd9ace32"
            "62547ef835c3dac4fd97f8461a14611dc9c27745132ded8e545c1d54c72f0469"
            "97"
        ),
        order: &hex!("a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7"),
        cofactor: 1,
    },
    CurveParameters {
        name: "brainpoolP320r1",
        oid: oid::BRAINPOOL_P320R1,
        field_size: 320,
        prime: &hex!(
            "d35e472036bc4fb7e13c785ed201e065f98fcfa6f6f40def4f92b9ec7893ec28"
            "fcd412b1f1b32e27"
        ),
        a: &hex!(
            "3ee30b568fbab0f883ccebd46d3f3bb8a2a73513f5eb79da66190eb085ffa9f4"
            "92f375a97d860eb4"
        ),
        b: &hex!(
            "520883949dfdbc42d3ad198640688a6fe13f41349554b49acc31dccd88453981"
            "6f5eb4ac8fb1f1a6"
        ),
        generator: &hex!(
            "0443bd7e9afb53d8b85289bcc48ee5bfe6f20137d10a087eb6e7871e2a10a599"
            "c710af8d0d39e2061114fdd05545ec1cc8ab4093247f77275e0743ffed117182"
            "eaa9c77877aaac6ac7d35245d1692e8ee1"
        ),
        order: &hex!(
            "d35e472036bc4fb7e13c785ed201e065f98fcfa5b68f12a32d482ec7ee8658e9"
            "8691555b44c59311"
        ),
        cofactor: 1,
    },
    CurveParameters {
        name: "brainpoolP384r1",
        oid: oid::BRAINPOOL_P384R1,
        field_size: 384,
        prime: &hex!(
            "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b412b1da197fb71123"
            "acd3a729901d1a71874700133107ec53"
        ),
        a: &hex!(
            "7bc382c63d8c150c3c72080ace05afa0c2bea28e4fb22787139165efba91f90f"
            "8aa5814a503ad4eb04a8c7dd22ce2826"
        ),
        b: &hex!(
            "04a8c7dd22ce28268b39b55416f0447c2fb77de107dcd2a62e880ea53eeb62d5"
            "7cb4390295dbc9943ab78696fa504c11"
        ),
        generator: &hex!(
            "041d1c64f068cf45ffa2a63a81b7c13f6b8847a3e77ef14fe3db7fcafe0cbd10"
            "e8e826e03436d646aaef87b2e247d4af1e8abe1d7520f9c2a45cb1eb8e95cfd5"
            "5262b70b29feec5864e19c054ff99129280e4646217791811142820341263c53"
            "15"
        ),
        order: &hex!(
            "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7"
            "cf3ab6af6b7fc3103b883202e9046565"
        ),
        cofactor: 1,
    },
    CurveParameters {
        name: "brainpoolP512r1",
        oid: oid::BRAINPOOL_P512R1,
        field_size: 512,
        prime: &hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330871"
            "7d4d9b009bc66842aecda12ae6a380e62881ff2f2d82c68528aa6056583a48f3"
        ),
        a: &hex!(
            "7830a3318b603b89e2327145ac234cc594cbdd8d3df91610a83441caea9863bc"
            "2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a72bf2c7b9e7c1ac4d77fc94ca"
        ),
        b: &hex!(
            "3df91610a83441caea9863bc2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a7"
            "2bf2c7b9e7c1ac4d77fc94cadc083e67984050b75ebae5dd2809bd638016f723"
        ),
        generator: &hex!(
            "0481aee4bdd82ed9645a21322e9c4c6a9385ed9f70b5d916c1b43b62eef4d009"
            "8eff3b1f78e2d0d48d50d1687b93b97d5f7c6d5047406a5e688b352209bcb9f8"
            "227dde385d566332ecc0eabfa9cf7822fdf209f70024a57b1aa000c55b881f81"
            "11b2dcde494a5f485e5bca4bd88a2763aed1ca2b2fa8f0540678cd1e0f3ad808"
            "92"
        ),
        order: &hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330870"
            "553e5c414ca92619418661197fac10471db1d381085ddaddb58796829ca90069"
        ),
        cofactor: 1,
    },
];

/// Looks up a named curve, `None` for anything not in the table.
pub fn resolve_curve(oid: &ObjectIdentifier) -> Option<&'static CurveParameters> {
    CURVES.iter().find(|curve| *oid == curve.oid)
}

/// Looks up a named curve by its SEC 2 / RFC 5639 name.
///
/// `prime256v1` is accepted as an alias of `secp256r1`.
pub fn curve_by_name(name: &str) -> Option<&'static CurveParameters> {
    let name = match name {
        "prime256v1" | "P-256" => "secp256r1",
        "P-224" => "secp224r1",
        "P-384" => "secp384r1",
        "P-521" => "secp521r1",
        other => other,
    };
    CURVES.iter().find(|curve| curve.name == name)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use kagi_der::ObjectIdentifier;
    use num_bigint::BigUint;
    use rstest::rstest;

    use super::{CURVES, curve_by_name, resolve_curve};

    #[rstest]
    #[case("1.3.132.0.33", "secp224r1", 224)]
    #[case("1.2.840.10045.3.1.7", "secp256r1", 256)]
    #[case("1.3.132.0.10", "secp256k1", 256)]
    #[case("1.3.132.0.34", "secp384r1", 384)]
    #[case("1.3.132.0.35", "secp521r1", 521)]
    #[case("1.3.36.3.3.2.8.1.1.7", "brainpoolP256r1", 256)]
    #[case("1.3.36.3.3.2.8.1.1.9", "brainpoolP320r1", 320)]
    #[case("1.3.36.3.3.2.8.1.1.11", "brainpoolP384r1", 384)]
    #[case("1.3.36.3.3.2.8.1.1.13", "brainpoolP512r1", 512)]
    fn test_resolve_curve(#[case] oid: &str, #[case] name: &str, #[case] bits: u32) {
        let oid = ObjectIdentifier::from_str(oid).unwrap();
        let curve = resolve_curve(&oid).unwrap();
        assert_eq!(name, curve.name);
        assert_eq!(bits, curve.field_size);
        assert_eq!(Some(curve), curve_by_name(name));
    }

    #[rstest]
    #[case::brainpool_p256t1("1.3.36.3.3.2.8.1.1.8")]
    #[case::brainpool_p320t1("1.3.36.3.3.2.8.1.1.10")]
    #[case::brainpool_p384t1("1.3.36.3.3.2.8.1.1.12")]
    #[case::brainpool_p512t1("1.3.36.3.3.2.8.1.1.14")]
    #[case::sect283k1("1.3.132.0.16")]
    #[case::rsa_encryption("1.2.840.113549.1.1.1")]
    fn test_resolve_curve_unknown(#[case] oid: &str) {
        let oid = ObjectIdentifier::from_str(oid).unwrap();
        assert!(resolve_curve(&oid).is_none());
    }

    #[test]
    fn test_prime256v1_alias() {
        assert_eq!(curve_by_name("secp256r1"), curve_by_name("prime256v1"));
        assert!(curve_by_name("brainpoolP256t1").is_none());
    }

    #[test]
    fn test_domain_parameters_are_consistent() {
        for curve in CURVES.iter() {
            let prime = BigUint::from_bytes_be(curve.prime);
            assert_eq!(curve.field_size as u64, prime.bits(), "{}", curve.name);

            // generator is 04 || x || y with coordinates as wide as the prime
            assert_eq!(0x04, curve.generator[0], "{}", curve.name);
            assert_eq!(1 + 2 * curve.prime.len(), curve.generator.len(), "{}", curve.name);

            // the generator satisfies the curve equation
            let width = curve.prime.len();
            let x = BigUint::from_bytes_be(&curve.generator[1..1 + width]);
            let y = BigUint::from_bytes_be(&curve.generator[1 + width..]);
            let a = BigUint::from_bytes_be(curve.a);
            let b = BigUint::from_bytes_be(curve.b);
            let lhs = (&y * &y) % &prime;
            let rhs = (&x * &x * &x + &a * &x + &b) % &prime;
            assert_eq!(lhs, rhs, "{}", curve.name);
            assert_eq!(1, curve.cofactor);
        }
    }
}
