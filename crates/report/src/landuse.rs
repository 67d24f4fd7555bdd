//! Land-use category scheme and column labels
//!
//! The nine NLCD Level-I land-use categories and the human-readable
//! column names used throughout the report frames.

/// Land-use categories, coded 1-9 in the classified raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandUse {
    Water,
    Developed,
    Barren,
    ForestedUpland,
    Shrubland,
    NonNaturalWoody,
    HerbaceousUpland,
    HerbaceousPlanted,
    Wetlands,
}

/// All categories in code order
pub const ALL_LAND_USES: [LandUse; 9] = [
    LandUse::Water,
    LandUse::Developed,
    LandUse::Barren,
    LandUse::ForestedUpland,
    LandUse::Shrubland,
    LandUse::NonNaturalWoody,
    LandUse::HerbaceousUpland,
    LandUse::HerbaceousPlanted,
    LandUse::Wetlands,
];

impl LandUse {
    /// Class code in the reclassified land-use raster
    pub fn code(self) -> i32 {
        match self {
            LandUse::Water => 1,
            LandUse::Developed => 2,
            LandUse::Barren => 3,
            LandUse::ForestedUpland => 4,
            LandUse::Shrubland => 5,
            LandUse::NonNaturalWoody => 6,
            LandUse::HerbaceousUpland => 7,
            LandUse::HerbaceousPlanted => 8,
            LandUse::Wetlands => 9,
        }
    }

    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            LandUse::Water => "Water",
            LandUse::Developed => "Developed",
            LandUse::Barren => "Barren",
            LandUse::ForestedUpland => "Forested Upland",
            LandUse::Shrubland => "Shrubland",
            LandUse::NonNaturalWoody => "Non-natural Woody",
            LandUse::HerbaceousUpland => "Herbaceous Upland",
            LandUse::HerbaceousPlanted => "Herbaceous Planted / Cultivated",
            LandUse::Wetlands => "Wetlands",
        }
    }
}

/// Frame index name
pub const INDEX_NAME: &str = "Land Use";

/// Margins label for totals rows/columns
pub const TOTALS: &str = "TOTALS";

/// Elevation band count columns, keyed by dem_reclass zone id
pub const ELEV_BANDS: [(i32, &str); 4] = [
    (1, "1000ft and less pixel count"),
    (2, "1001 to 1400ft pixel count"),
    (3, "1401 to 1800ft pixel count"),
    (4, "1801 to 2200ft pixel count"),
];

/// Count column for cells inside the railroad buffer
pub const CLOSE_COL: &str = "Close to RR Pixel Count";

/// Derived count column for cells outside the railroad buffer
pub const FAR_COL: &str = "Far from RR Pixel Count";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_dense_and_ordered() {
        for (i, lu) in ALL_LAND_USES.iter().enumerate() {
            assert_eq!(lu.code(), i as i32 + 1);
        }
    }

    #[test]
    fn test_labels_are_distinct() {
        for (i, a) in ALL_LAND_USES.iter().enumerate() {
            for b in &ALL_LAND_USES[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
