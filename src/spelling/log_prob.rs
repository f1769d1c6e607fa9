//! Serde helpers for log-probabilities.
//!
//! JSON has no representation for infinities, and `serde_json` writes them as
//! `null`. These helpers write non-finite values as the strings `"-inf"`,
//! `"inf"` and `"NaN"` instead, and accept either form back. Use them with
//! `#[serde(with = "crate::spelling::log_prob")]` on an `f64` field, or with
//! `log_prob::seq` on a `Vec<f64>` field.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Serialize a log-probability, spelling out non-finite values.
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if *value < 0.0 {
        serializer.serialize_str("-inf")
    } else {
        serializer.serialize_str("inf")
    }
}

/// Deserialize a log-probability written as a number or as a spelled-out string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LogProbVisitor;

    impl Visitor<'_> for LogProbVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or one of \"-inf\", \"inf\", \"NaN\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            match v {
                "-inf" => Ok(f64::NEG_INFINITY),
                "inf" => Ok(f64::INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }

    deserializer.deserialize_any(LogProbVisitor)
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct LogProb(#[serde(with = "crate::spelling::log_prob")] f64);

/// The same encoding applied to every element of a `Vec<f64>`.
pub mod seq {
    use super::*;

    pub fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(|&v| LogProb(v)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<LogProb>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|LogProb(v)| v).collect())
    }
}
