//! Köppen climate classification
//!
//! Every land tile carries one of these categories. Raster codes 1..=17 map
//! onto the classic Köppen groups; anything unmapped falls back to a
//! latitude-derived climate so the same rule applies during ingestion and
//! inside the engine.

use serde::{Deserialize, Serialize};

/// Latitude (absolute, degrees) at or beyond which land is ice cap
pub const POLAR_LATITUDE: f64 = 66.5;
/// Latitude (absolute, degrees) at or below which land is tropical
pub const TROPIC_LATITUDE: f64 = 23.5;
/// Upper bound (absolute, degrees) of the continental fallback band
pub const CONTINENTAL_LATITUDE: f64 = 45.0;

/// Climate category of a land tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Climate {
    #[serde(rename = "Af")]
    TropicalRainforest,
    #[serde(rename = "Am")]
    TropicalMonsoon,
    #[serde(rename = "Aw")]
    TropicalSavanna,
    #[serde(rename = "As")]
    TropicalSemiArid,
    #[serde(rename = "BWh")]
    HotDesert,
    #[serde(rename = "BSh")]
    HotSemiArid,
    #[serde(rename = "BWk")]
    ColdDesert,
    #[serde(rename = "BSk")]
    ColdSemiArid,
    #[serde(rename = "Cfa")]
    HumidSubtropical,
    #[serde(rename = "Cfb")]
    Oceanic,
    #[serde(rename = "Csa")]
    HotSummerMediterranean,
    #[serde(rename = "Csb")]
    WarmSummerMediterranean,
    #[serde(rename = "Cwa")]
    MonsoonHumidSubtropical,
    #[serde(rename = "Dfa")]
    HotSummerContinental,
    #[serde(rename = "Dfb")]
    WarmSummerContinental,
    #[serde(rename = "Dfc")]
    Subarctic,
    #[serde(rename = "ET")]
    Tundra,
    #[serde(rename = "EF")]
    IceCap,
    #[serde(rename = "H")]
    Highland,
    /// Legacy label without a Köppen code
    #[serde(rename = "TC")]
    TemperateContinental,
    /// Generic fallback used by the latitude rule
    #[serde(rename = "HS")]
    GenericHumidSubtropical,
}

impl Climate {
    pub const ALL: [Climate; 21] = [
        Climate::TropicalRainforest,
        Climate::TropicalMonsoon,
        Climate::TropicalSavanna,
        Climate::TropicalSemiArid,
        Climate::HotDesert,
        Climate::HotSemiArid,
        Climate::ColdDesert,
        Climate::ColdSemiArid,
        Climate::HumidSubtropical,
        Climate::Oceanic,
        Climate::HotSummerMediterranean,
        Climate::WarmSummerMediterranean,
        Climate::MonsoonHumidSubtropical,
        Climate::HotSummerContinental,
        Climate::WarmSummerContinental,
        Climate::Subarctic,
        Climate::Tundra,
        Climate::IceCap,
        Climate::Highland,
        Climate::TemperateContinental,
        Climate::GenericHumidSubtropical,
    ];

    /// Short abbreviation, e.g. "ET"
    pub fn code(&self) -> &'static str {
        match self {
            Self::TropicalRainforest => "Af",
            Self::TropicalMonsoon => "Am",
            Self::TropicalSavanna => "Aw",
            Self::TropicalSemiArid => "As",
            Self::HotDesert => "BWh",
            Self::HotSemiArid => "BSh",
            Self::ColdDesert => "BWk",
            Self::ColdSemiArid => "BSk",
            Self::HumidSubtropical => "Cfa",
            Self::Oceanic => "Cfb",
            Self::HotSummerMediterranean => "Csa",
            Self::WarmSummerMediterranean => "Csb",
            Self::MonsoonHumidSubtropical => "Cwa",
            Self::HotSummerContinental => "Dfa",
            Self::WarmSummerContinental => "Dfb",
            Self::Subarctic => "Dfc",
            Self::Tundra => "ET",
            Self::IceCap => "EF",
            Self::Highland => "H",
            Self::TemperateContinental => "TC",
            Self::GenericHumidSubtropical => "HS",
        }
    }

    /// Long display label, e.g. "ET (Tundra)"
    pub fn label(&self) -> &'static str {
        match self {
            Self::TropicalRainforest => "Af (Tropical Rainforest)",
            Self::TropicalMonsoon => "Am (Tropical Monsoon)",
            Self::TropicalSavanna => "Aw (Tropical Savanna)",
            Self::TropicalSemiArid => "As (Tropical Semi-arid)",
            Self::HotDesert => "BWh (Hot Desert)",
            Self::HotSemiArid => "BSh (Hot Semi-Arid)",
            Self::ColdDesert => "BWk (Cold Desert)",
            Self::ColdSemiArid => "BSk (Cold Semi-Arid)",
            Self::HumidSubtropical => "Cfa (Humid Subtropical)",
            Self::Oceanic => "Cfb (Oceanic)",
            Self::HotSummerMediterranean => "Csa (Hot-Summer Mediterranean)",
            Self::WarmSummerMediterranean => "Csb (Warm-Summer Mediterranean)",
            Self::MonsoonHumidSubtropical => "Cwa (Monsoon-influenced Humid Subtropical)",
            Self::HotSummerContinental => "Dfa (Hot Summer Continental)",
            Self::WarmSummerContinental => "Dfb (Warm Summer Continental)",
            Self::Subarctic => "Dfc (Subarctic)",
            Self::Tundra => "ET (Tundra)",
            Self::IceCap => "EF (Ice Cap)",
            Self::Highland => "H (Highland)",
            Self::TemperateContinental => "Temperate Continental",
            Self::GenericHumidSubtropical => "Humid Subtropical",
        }
    }

    /// Parse either the short code ("ET") or the long label ("ET (Tundra)")
    pub fn from_name(name: &str) -> Option<Climate> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == name || c.label() == name)
    }

    /// Map a raster cell value onto a climate. 0 is water; unknown values are None.
    pub fn from_raster_code(code: u8) -> Option<Climate> {
        match code {
            1 => Some(Self::TropicalRainforest),
            2 => Some(Self::TropicalMonsoon),
            3 => Some(Self::TropicalSavanna),
            4 => Some(Self::HotDesert),
            5 => Some(Self::HotSemiArid),
            6 => Some(Self::ColdDesert),
            7 => Some(Self::ColdSemiArid),
            8 => Some(Self::HumidSubtropical),
            9 => Some(Self::Oceanic),
            10 => Some(Self::HotSummerMediterranean),
            11 => Some(Self::WarmSummerMediterranean),
            12 => Some(Self::MonsoonHumidSubtropical),
            13 => Some(Self::HotSummerContinental),
            14 => Some(Self::WarmSummerContinental),
            15 => Some(Self::Subarctic),
            16 => Some(Self::Tundra),
            17 => Some(Self::IceCap),
            _ => None,
        }
    }

    /// Fallback climate for a land cell with no usable raster value
    pub fn from_latitude(latitude: f64) -> Climate {
        let abs = latitude.abs();
        if abs >= POLAR_LATITUDE {
            Self::IceCap
        } else if abs <= TROPIC_LATITUDE {
            Self::TropicalRainforest
        } else if abs < CONTINENTAL_LATITUDE {
            Self::WarmSummerContinental
        } else {
            Self::GenericHumidSubtropical
        }
    }

    /// Tundra or ice cap
    pub fn is_cold(&self) -> bool {
        matches!(self, Self::Tundra | Self::IceCap)
    }

    /// Group A climates (used by the wet/dry season rule)
    pub fn is_tropical(&self) -> bool {
        self.code().starts_with('A')
    }

    /// Arid group B climates plus tropical savanna
    pub fn is_hot_or_arid(&self) -> bool {
        let code = self.code();
        code.starts_with('B') || code.starts_with("Aw")
    }
}

impl std::fmt::Display for Climate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Latitude of a grid row: +90 at the top row, approaching -90 at the bottom
pub fn latitude_of_row(y: usize, height: usize) -> f64 {
    if height == 0 {
        return 0.0;
    }
    90.0 - (y as f64 / height as f64) * 180.0
}
