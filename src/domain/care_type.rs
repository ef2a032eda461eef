use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareType {
    Water,
    Fertilize,
}

impl CareType {
    pub const ALL: [CareType; 2] = [CareType::Water, CareType::Fertilize];

    pub fn as_str(self) -> &'static str {
        match self {
            CareType::Water => "water",
            CareType::Fertilize => "fertilize",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            CareType::Water => "watered",
            CareType::Fertilize => "fertilized",
        }
    }
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareType {
    type Err = ParseCareTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Older rows carry the Indonesian UI literals.
        match value.trim().to_ascii_lowercase().as_str() {
            "water" | "watered" | "watering" | "disiram" | "siram" => Ok(CareType::Water),
            "fertilize" | "fertilized" | "fertilizer" | "fertilizing" | "dipupuk" | "pupuk" => {
                Ok(CareType::Fertilize)
            }
            _ => Err(ParseCareTypeError {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCareTypeError {
    value: String,
}

impl fmt::Display for ParseCareTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = CareType::ALL.iter().map(|care| care.as_str()).collect();
        write!(
            f,
            "unknown care type '{}'; use {}",
            self.value,
            known.join("|")
        )
    }
}

impl Error for ParseCareTypeError {}

#[cfg(test)]
mod tests {
    use super::CareType;
    use std::str::FromStr;

    #[test]
    fn parses_canonical_and_legacy_literals() {
        assert_eq!(CareType::from_str("water").unwrap(), CareType::Water);
        assert_eq!(CareType::from_str("Disiram").unwrap(), CareType::Water);
        assert_eq!(CareType::from_str(" Dipupuk ").unwrap(), CareType::Fertilize);
        assert_eq!(
            CareType::from_str("FERTILIZE").unwrap(),
            CareType::Fertilize
        );
    }

    #[test]
    fn rejects_unknown_literal() {
        let err = CareType::from_str("prune").expect_err("prune is not a care type");
        assert!(err.to_string().contains("prune"));
    }

    #[test]
    fn canonical_strings_round_trip() {
        for care_type in CareType::ALL {
            assert_eq!(CareType::from_str(care_type.as_str()).unwrap(), care_type);
        }
    }
}
