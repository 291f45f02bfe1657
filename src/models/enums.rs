use serde::{Deserialize, Serialize};

/// Unknown string for one of the `str_enum!` types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The serde name of each variant is its string label.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $(#[$meta])*
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(TrendCategory {
    InsufficientData => "INSUFFICIENT_DATA",
    RapidIncrease => "RAPID_INCREASE",
    Improving => "IMPROVING",
    Stable => "STABLE",
});

str_enum!(ChronicCondition {
    Diabetes => "Diabetes",
    Pcos => "PCOS",
    Celiac => "Celiac",
    Hypertension => "Hypertension",
    Asthma => "Asthma",
    Arthritis => "Arthritis",
    Migraines => "Migraines",
    Ibs => "IBS",
    ChronicFatigueSyndrome => "Chronic Fatigue Syndrome",
    HeartDisease => "Heart Disease",
    MultipleSclerosis => "Multiple Sclerosis",
    Epilepsy => "Epilepsy",
    Cancer => "Cancer",
    Other => "Other",
});

impl ChronicCondition {
    /// Picklist order shown at registration.
    pub const ALL: [ChronicCondition; 14] = [
        Self::Diabetes,
        Self::Pcos,
        Self::Celiac,
        Self::Hypertension,
        Self::Asthma,
        Self::Arthritis,
        Self::Migraines,
        Self::Ibs,
        Self::ChronicFatigueSyndrome,
        Self::HeartDisease,
        Self::MultipleSclerosis,
        Self::Epilepsy,
        Self::Cancer,
        Self::Other,
    ];
}
