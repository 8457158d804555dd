//! `serde` support: a [`Bitmap`] is (de)serialized as its persisted string.

use crate::Bitmap;
use ::serde::de::{self, Deserialize, Deserializer, Visitor};
use ::serde::ser::{Serialize, Serializer};
use core::fmt;

impl Serialize for Bitmap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct PersistedVisitor;

impl Visitor<'_> for PersistedVisitor {
    type Value = Bitmap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a persisted bitmap as a string of hex digit pairs")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Bitmap::from_persisted(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Bitmap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(PersistedVisitor)
    }
}
