use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Implements `FromStr`, `Display`, `new_v4` and the `Uuid` conversions for an id newtype.
macro_rules! impls_for_uuid_newtype {
    ($newtype: ident) => {
        impl $newtype {
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl std::str::FromStr for $newtype {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl std::fmt::Display for $newtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $newtype {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$newtype> for Uuid {
            fn from(value: $newtype) -> Self {
                value.0
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(Uuid);
impls_for_uuid_newtype!(ApplicantId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeId(Uuid);
impls_for_uuid_newtype!(SchemeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenefitId(Uuid);
impls_for_uuid_newtype!(BenefitId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaId(Uuid);
impls_for_uuid_newtype!(CriteriaId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);
impls_for_uuid_newtype!(ApplicationId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(Uuid);
impls_for_uuid_newtype!(RelationshipId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_round_trip() {
        let raw = "b6c29c96-024b-4e70-834b-8e0dd2c66645";
        let id: ApplicantId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert!("not-a-uuid".parse::<SchemeId>().is_err());
        assert!("".parse::<ApplicationId>().is_err());
    }
}
