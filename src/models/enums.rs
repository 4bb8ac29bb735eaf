//! Enumerations shared across models

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Campus site a book record or a staff account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreSpot {
    Sch,
    Sunmoon,
    Nasaret,
    Kongju,
    Mokwon,
}

impl StoreSpot {
    pub const ALL: [StoreSpot; 5] = [
        StoreSpot::Sch,
        StoreSpot::Sunmoon,
        StoreSpot::Nasaret,
        StoreSpot::Kongju,
        StoreSpot::Mokwon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreSpot::Sch => "sch",
            StoreSpot::Sunmoon => "sunmoon",
            StoreSpot::Nasaret => "nasaret",
            StoreSpot::Kongju => "kongju",
            StoreSpot::Mokwon => "mokwon",
        }
    }
}

impl std::fmt::Display for StoreSpot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StoreSpot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sch" => Ok(StoreSpot::Sch),
            "sunmoon" => Ok(StoreSpot::Sunmoon),
            "nasaret" => Ok(StoreSpot::Nasaret),
            "kongju" => Ok(StoreSpot::Kongju),
            "mokwon" => Ok(StoreSpot::Mokwon),
            _ => Err(format!("Invalid store spot: {}", s)),
        }
    }
}

// Stored as TEXT
impl sqlx::Type<Postgres> for StoreSpot {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for StoreSpot {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as Decode<Postgres>>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for StoreSpot {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_spot_round_trips_through_str() {
        for spot in StoreSpot::ALL {
            assert_eq!(spot.as_str().parse::<StoreSpot>(), Ok(spot));
        }
        assert_eq!(" Kongju ".parse::<StoreSpot>(), Ok(StoreSpot::Kongju));
        assert!("seoul".parse::<StoreSpot>().is_err());
    }

    #[test]
    fn test_store_spot_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&StoreSpot::Sunmoon).unwrap(), "\"sunmoon\"");
        let spot: StoreSpot = serde_json::from_str("\"mokwon\"").unwrap();
        assert_eq!(spot, StoreSpot::Mokwon);
    }
}
