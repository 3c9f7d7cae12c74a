use std::fmt;

use serde::{de, de::Visitor, Deserialize, Serialize};

pub const MICRO_ALGO_PER_ALGO: u64 = 1_000_000;

pub const MICRO_ALGO_PER_ALGO_F64: f64 = 1_000_000_f64;

/// Whole-token amount. Explorer figures get folded into f64 arithmetic at the edges, so anything
/// above 2^53 micro units loses precision. The entire max supply (1e13 micro) fits comfortably.
pub type AlgoF64 = f64;

/// An amount of the chain's smallest unit. Explorers serve these either as JSON numbers or as
/// strings of numbers, so deserialization accepts both.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MicroAlgoNewtype(pub u64);

impl MicroAlgoNewtype {
    /// Converts to whole tokens, 10^6 micro units per token.
    pub fn to_algo(self) -> AlgoF64 {
        self.0 as f64 / MICRO_ALGO_PER_ALGO_F64
    }
}

impl fmt::Display for MicroAlgoNewtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} microalgo", self.0)
    }
}

/// Raw smallest-unit amount as a float, without unit conversion.
impl From<MicroAlgoNewtype> for f64 {
    fn from(MicroAlgoNewtype(amount): MicroAlgoNewtype) -> Self {
        amount as f64
    }
}

struct MicroAlgoAmountVisitor;

impl<'de> Visitor<'de> for MicroAlgoAmountVisitor {
    type Value = MicroAlgoNewtype;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "a number, or string of a number, smaller than u64::MAX, representing an amount in the chain's smallest unit",
        )
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse::<u64>()
            .map(MicroAlgoNewtype)
            .map_err(|error| {
                de::Error::invalid_value(
                    de::Unexpected::Str(&format!("unexpected value: {}, error: {}", v, error)),
                    &"a number as string: \"10000000000000\", which fits within u64",
                )
            })
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(v).map(MicroAlgoNewtype).map_err(|_| {
            de::Error::invalid_value(
                de::Unexpected::Signed(v),
                &"a non-negative amount in the chain's smallest unit",
            )
        })
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MicroAlgoNewtype(v))
    }
}

impl<'de> Deserialize<'de> for MicroAlgoNewtype {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(MicroAlgoAmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micro_algo_from_string_test() {
        let amount = serde_json::from_str::<MicroAlgoNewtype>(r#""10000000000000""#).unwrap();
        assert_eq!(amount, MicroAlgoNewtype(10000000000000));
    }

    #[test]
    fn micro_algo_from_number_test() {
        let amount = serde_json::from_str::<MicroAlgoNewtype>("500000000").unwrap();
        assert_eq!(amount, MicroAlgoNewtype(500000000));
    }

    #[test]
    fn micro_algo_from_garbage_fails_test() {
        let result = serde_json::from_str::<MicroAlgoNewtype>(r#""not-a-number""#);
        assert!(result.is_err());
    }

    #[test]
    fn micro_algo_from_negative_fails_test() {
        let result = serde_json::from_str::<MicroAlgoNewtype>("-1");
        assert!(result.is_err());
    }

    #[test]
    fn to_algo_test() {
        assert_eq!(MicroAlgoNewtype(500000000).to_algo(), 500.0);
    }

    #[test]
    fn raw_f64_skips_conversion_test() {
        let raw: f64 = MicroAlgoNewtype(10000000000000).into();
        assert_eq!(raw, 1e13);
    }
}
