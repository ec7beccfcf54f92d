use serde::{Deserialize, Serialize};

/// Qualitative band for the provider's 1–5 air quality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiLevel {
    pub fn from_index(aqi: u8) -> Option<Self> {
        match aqi {
            1 => Some(Self::Good),
            2 => Some(Self::Fair),
            3 => Some(Self::Moderate),
            4 => Some(Self::Poor),
            5 => Some(Self::VeryPoor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

impl std::fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_covers_one_through_five() {
        assert_eq!(AqiLevel::from_index(1), Some(AqiLevel::Good));
        assert_eq!(AqiLevel::from_index(3), Some(AqiLevel::Moderate));
        assert_eq!(AqiLevel::from_index(5), Some(AqiLevel::VeryPoor));
    }

    #[test]
    fn out_of_range_has_no_level() {
        assert_eq!(AqiLevel::from_index(0), None);
        assert_eq!(AqiLevel::from_index(6), None);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(AqiLevel::Good < AqiLevel::Poor);
        assert_eq!(AqiLevel::VeryPoor.to_string(), "Very Poor");
    }
}
