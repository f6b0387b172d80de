use std::fmt::Write;

use clap::Args;
use kagi_pkcs::{KeyMaterial, PrivateKeyRecord};
use serde::Serialize;

use super::KeySource;
use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::hex;

#[derive(Args)]
pub(crate) struct Config {
    #[command(flatten)]
    pub(crate) source: KeySource,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub(crate) output: OutputFormat,

    /// Show the algorithm OID next to its name
    #[arg(long)]
    pub(crate) show_oid: bool,
}

#[derive(Debug, Serialize)]
struct CurveSummary {
    name: &'static str,
    oid: &'static str,
}

/// What `inspect` reports about one key. Private material is never included.
#[derive(Debug, Serialize)]
struct KeySummary {
    format: &'static str,
    algorithm: &'static str,
    algorithm_oid: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<CurveSummary>,
    key_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_exponent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
}

impl From<&PrivateKeyRecord> for KeySummary {
    fn from(key: &PrivateKeyRecord) -> Self {
        let (kind, public_exponent) = match key.material() {
            KeyMaterial::Raw(raw) => (Some(raw.kind.name()), None),
            KeyMaterial::Rsa(rsa) => (None, Some(rsa.public_exponent.to_string())),
            KeyMaterial::Dsa(_) | KeyMaterial::Ec(_) => (None, None),
        };
        KeySummary {
            format: key.format(),
            algorithm: key.algorithm().name(),
            algorithm_oid: key.algorithm_oid(),
            kind,
            curve: key.curve().map(|curve| CurveSummary {
                name: curve.name,
                oid: curve.oid,
            }),
            key_size: key.key_size(),
            public_exponent,
            public_key: key.public_key().map(hex),
        }
    }
}

fn format_text(summary: &KeySummary, show_oid: bool) -> Result<String> {
    let mut output = String::new();
    writeln!(output, "Private Key ({})", summary.format)?;
    if show_oid {
        writeln!(
            output,
            "  Algorithm: {} ({})",
            summary.algorithm, summary.algorithm_oid
        )?;
    } else {
        writeln!(output, "  Algorithm: {}", summary.algorithm)?;
    }
    if let Some(kind) = summary.kind {
        writeln!(output, "  Type: {}", kind)?;
    }
    if let Some(curve) = &summary.curve {
        writeln!(output, "  Curve: {} ({})", curve.name, curve.oid)?;
    }
    writeln!(output, "  Key Size: {} bits", summary.key_size)?;
    if let Some(exponent) = &summary.public_exponent {
        writeln!(output, "  Public Exponent: {}", exponent)?;
    }
    match &summary.public_key {
        Some(public_key) => writeln!(output, "  Public Key: {} bytes", public_key.len() / 2)?,
        None => writeln!(output, "  Public Key: (not included)")?,
    }
    Ok(output)
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let keys = config.source.load()?;
    let summaries: Vec<KeySummary> = keys.iter().map(KeySummary::from).collect();

    match config.output {
        OutputFormat::Json => {
            if config.source.all {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in &summaries {
                    println!("{}", serde_json::to_string_pretty(summary)?);
                }
            }
        }
        OutputFormat::Text => {
            let texts = summaries
                .iter()
                .map(|summary| format_text(summary, config.show_oid))
                .collect::<Result<Vec<_>>>()?;
            print!("{}", texts.join("\n"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{KeySummary, format_text};

    const EC_KEY: &str = include_str!("../../../testdata/sec1/secp384r1.key");
    const ED448_KEY: &str = include_str!("../../../testdata/pkcs8/ed448.key");

    #[test]
    fn test_ec_summary() {
        let key = kagi_pkcs::parse(EC_KEY).unwrap();
        let summary = KeySummary::from(&key);
        let text = format_text(&summary, true).unwrap();
        assert!(text.contains("Algorithm: EC (1.2.840.10045.2.1)"));
        assert!(text.contains("Curve: secp384r1 (1.3.132.0.34)"));
        assert!(text.contains("Key Size: 384 bits"));
        assert!(text.contains("Public Key: 97 bytes"));
    }

    #[test]
    fn test_raw_summary_json() {
        let key = kagi_pkcs::parse(ED448_KEY).unwrap();
        let json = serde_json::to_value(KeySummary::from(&key)).unwrap();
        assert_eq!("EdDSA", json["algorithm"]);
        assert_eq!("Ed448", json["kind"]);
        assert_eq!(448, json["key_size"]);
        assert!(json.get("curve").is_none());
        assert!(json.get("public_key").is_none());
    }
}
