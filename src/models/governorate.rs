//! Governorate model
//!
//! The fixed list of origin governorates offered by the budget screen and the
//! registration form, each with its road distance to the capital.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An origin governorate with a known distance to Cairo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Governorate {
    Cairo,
    Giza,
    Alexandria,
    #[serde(rename = "Port Said")]
    PortSaid,
    Suez,
    Ismailia,
    Sharqia,
    Dakahlia,
    Gharbia,
    #[serde(rename = "Kafr El Sheikh")]
    KafrElSheikh,
    Beheira,
    Minya,
    Assiut,
    Sohag,
    Qena,
    Luxor,
    Aswan,
}

impl Governorate {
    /// All governorates in display order
    pub const ALL: [Governorate; 17] = [
        Governorate::Cairo,
        Governorate::Giza,
        Governorate::Alexandria,
        Governorate::PortSaid,
        Governorate::Suez,
        Governorate::Ismailia,
        Governorate::Sharqia,
        Governorate::Dakahlia,
        Governorate::Gharbia,
        Governorate::KafrElSheikh,
        Governorate::Beheira,
        Governorate::Minya,
        Governorate::Assiut,
        Governorate::Sohag,
        Governorate::Qena,
        Governorate::Luxor,
        Governorate::Aswan,
    ];

    /// Display name, as shown in the select lists
    pub const fn name(&self) -> &'static str {
        match self {
            Governorate::Cairo => "Cairo",
            Governorate::Giza => "Giza",
            Governorate::Alexandria => "Alexandria",
            Governorate::PortSaid => "Port Said",
            Governorate::Suez => "Suez",
            Governorate::Ismailia => "Ismailia",
            Governorate::Sharqia => "Sharqia",
            Governorate::Dakahlia => "Dakahlia",
            Governorate::Gharbia => "Gharbia",
            Governorate::KafrElSheikh => "Kafr El Sheikh",
            Governorate::Beheira => "Beheira",
            Governorate::Minya => "Minya",
            Governorate::Assiut => "Assiut",
            Governorate::Sohag => "Sohag",
            Governorate::Qena => "Qena",
            Governorate::Luxor => "Luxor",
            Governorate::Aswan => "Aswan",
        }
    }

    /// Distance to the capital in kilometers
    pub const fn distance_km(&self) -> u32 {
        match self {
            Governorate::Cairo => 0,
            Governorate::Giza => 20,
            Governorate::Alexandria => 220,
            Governorate::PortSaid => 200,
            Governorate::Suez => 140,
            Governorate::Ismailia => 120,
            Governorate::Sharqia => 80,
            Governorate::Dakahlia => 150,
            Governorate::Gharbia => 120,
            Governorate::KafrElSheikh => 200,
            Governorate::Beheira => 180,
            Governorate::Minya => 250,
            Governorate::Assiut => 375,
            Governorate::Sohag => 460,
            Governorate::Qena => 600,
            Governorate::Luxor => 670,
            Governorate::Aswan => 880,
        }
    }

    /// Look up a governorate by its exact display name after trimming
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|g| g.name() == name)
    }
}

impl fmt::Display for Governorate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Governorate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown governorate: {}", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_seventeen_entries() {
        assert_eq!(Governorate::ALL.len(), 17);
        let mut names: Vec<_> = Governorate::ALL.iter().map(|g| g.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 17);
    }

    #[test]
    fn test_lookup_trims_and_is_exact() {
        assert_eq!(Governorate::from_name("  Aswan "), Some(Governorate::Aswan));
        assert_eq!(
            Governorate::from_name("Kafr El Sheikh"),
            Some(Governorate::KafrElSheikh)
        );
        assert_eq!(Governorate::from_name("aswan"), None);
        assert_eq!(Governorate::from_name(""), None);
    }

    #[test]
    fn test_distances() {
        assert_eq!(Governorate::Cairo.distance_km(), 0);
        assert_eq!(Governorate::Assiut.distance_km(), 375);
        assert_eq!(Governorate::Aswan.distance_km(), 880);
    }

    #[test]
    fn test_serializes_with_display_name() {
        let json = serde_json::to_string(&Governorate::PortSaid).unwrap();
        assert_eq!(json, "\"Port Said\"");
        let back: Governorate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Governorate::PortSaid);
    }
}
