//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content address of an upload: the BLAKE3 hash of its raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentDigest(pub [u8; 32]);

impl ContentDigest {
    /// Hashes the given bytes.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// The digest as a BLAKE3 hash value.
    #[must_use]
    pub fn as_hash(&self) -> blake3::Hash {
        blake3::Hash::from(self.0)
    }

    /// Short hexadecimal prefix, enough to tell uploads apart in logs.
    #[must_use]
    pub fn short(&self) -> String {
        self.as_hash().to_hex()[..12].to_string()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hash().to_hex())
    }
}

/// The three fixed charts of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Line chart of monthly totals.
    MonthlySales,
    /// Bar chart of month-over-month growth.
    Growth,
    /// Dual-axis bars of totals plus growth line.
    Combined,
}

impl ChartKind {
    /// All chart kinds in display order.
    pub const ALL: [Self; 3] = [Self::MonthlySales, Self::Growth, Self::Combined];

    /// File name offered when the chart is downloaded.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MonthlySales => "grafico_vendas_mensais.png",
            Self::Growth => "grafico_crescimento_percentual.png",
            Self::Combined => "grafico_combinado.png",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthlySales => write!(f, "monthly_sales"),
            Self::Growth => write!(f, "growth"),
            Self::Combined => write!(f, "combined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_content_addressed() {
        let a = ContentDigest::of(b"Data,Produto,Venda_Total\n");
        let b = ContentDigest::of(b"Data,Produto,Venda_Total\n");
        let c = ContentDigest::of(b"Data,Produto,Venda_Total\n2024-01-01,A,1\n");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string().len(), 64);
        assert_eq!(a.short().len(), 12);
        assert!(a.to_string().starts_with(&a.short()));
    }

    #[test]
    fn test_digest_hex_matches_blake3() {
        let bytes = b"Data,Produto,Venda_Total\n2024-01-01,A,1\n";
        let digest = ContentDigest::of(bytes);

        assert_eq!(digest.as_hash(), blake3::hash(bytes));
        assert_eq!(digest.to_string(), blake3::hash(bytes).to_hex().as_str());
        assert_eq!(digest.short(), &blake3::hash(bytes).to_hex()[..12]);
    }

    #[test]
    fn test_chart_kind_file_names() {
        let names: Vec<_> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "grafico_vendas_mensais.png",
                "grafico_crescimento_percentual.png",
                "grafico_combinado.png",
            ]
        );
        assert_eq!(ChartKind::Growth.to_string(), "growth");
    }
}
