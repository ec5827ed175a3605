//! Local Climate Zone reference tables
//!
//! The 17 standardized LCZ categories, their display names and
//! descriptions, and the Vulnerability Urban Climate Index (VUCI) score
//! assigned to each. All tables are fixed for the process lifetime.

use serde::{Deserialize, Serialize};

/// One of the 17 standardized Local Climate Zone categories.
///
/// Built categories carry the keys `"1"`..`"10"`, land-cover categories
/// `"A"`..`"G"`. Declaration order is the canonical key order used for
/// deterministic iteration and dominant-category tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lcz {
    #[serde(rename = "1")]
    CompactHighRise,
    #[serde(rename = "2")]
    CompactMidrise,
    #[serde(rename = "3")]
    CompactLowRise,
    #[serde(rename = "4")]
    OpenHighRise,
    #[serde(rename = "5")]
    OpenMidrise,
    #[serde(rename = "6")]
    OpenLowRise,
    #[serde(rename = "7")]
    LightweightLowRise,
    #[serde(rename = "8")]
    LargeLowRise,
    #[serde(rename = "9")]
    SparselyBuilt,
    #[serde(rename = "10")]
    HeavyIndustry,
    #[serde(rename = "A")]
    DenseTrees,
    #[serde(rename = "B")]
    ScatteredTrees,
    #[serde(rename = "C")]
    BushScrub,
    #[serde(rename = "D")]
    LowPlants,
    #[serde(rename = "E")]
    BareRockPaved,
    #[serde(rename = "F")]
    BareSoilSand,
    #[serde(rename = "G")]
    Water,
}

impl Lcz {
    /// All categories in canonical key order (`1`..`10`, `A`..`G`).
    pub const ALL: [Lcz; 17] = [
        Lcz::CompactHighRise,
        Lcz::CompactMidrise,
        Lcz::CompactLowRise,
        Lcz::OpenHighRise,
        Lcz::OpenMidrise,
        Lcz::OpenLowRise,
        Lcz::LightweightLowRise,
        Lcz::LargeLowRise,
        Lcz::SparselyBuilt,
        Lcz::HeavyIndustry,
        Lcz::DenseTrees,
        Lcz::ScatteredTrees,
        Lcz::BushScrub,
        Lcz::LowPlants,
        Lcz::BareRockPaved,
        Lcz::BareSoilSand,
        Lcz::Water,
    ];

    /// The dataset key for this category.
    pub fn code(self) -> &'static str {
        match self {
            Lcz::CompactHighRise => "1",
            Lcz::CompactMidrise => "2",
            Lcz::CompactLowRise => "3",
            Lcz::OpenHighRise => "4",
            Lcz::OpenMidrise => "5",
            Lcz::OpenLowRise => "6",
            Lcz::LightweightLowRise => "7",
            Lcz::LargeLowRise => "8",
            Lcz::SparselyBuilt => "9",
            Lcz::HeavyIndustry => "10",
            Lcz::DenseTrees => "A",
            Lcz::ScatteredTrees => "B",
            Lcz::BushScrub => "C",
            Lcz::LowPlants => "D",
            Lcz::BareRockPaved => "E",
            Lcz::BareSoilSand => "F",
            Lcz::Water => "G",
        }
    }

    /// Parse a dataset key. Unknown keys yield `None`.
    pub fn from_code(code: &str) -> Option<Lcz> {
        Lcz::ALL.iter().copied().find(|lcz| lcz.code() == code)
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Lcz::CompactHighRise => "compact high-rise",
            Lcz::CompactMidrise => "compact midrise",
            Lcz::CompactLowRise => "compact low-rise",
            Lcz::OpenHighRise => "open high-rise",
            Lcz::OpenMidrise => "open midrise",
            Lcz::OpenLowRise => "open low-rise",
            Lcz::LightweightLowRise => "lightweight low-rise",
            Lcz::LargeLowRise => "large low-rise",
            Lcz::SparselyBuilt => "sparsely built",
            Lcz::HeavyIndustry => "heavy industry",
            Lcz::DenseTrees => "dense trees",
            Lcz::ScatteredTrees => "scattered trees",
            Lcz::BushScrub => "bush, scrub",
            Lcz::LowPlants => "low plants",
            Lcz::BareRockPaved => "bare rock or paved",
            Lcz::BareSoilSand => "bare soil or sand",
            Lcz::Water => "water",
        }
    }

    /// One-paragraph morphology description (Stewart & Oke classification).
    pub fn description(self) -> &'static str {
        match self {
            Lcz::CompactHighRise => {
                "Dense mix of tall buildings to tens of stories. Few or no trees. \
                 Land cover mostly paved. Concrete, steel, stone and glass construction materials."
            }
            Lcz::CompactMidrise => {
                "Dense mix of midrise buildings (3-9 stories). Few or no trees. \
                 Land cover mostly paved. Stone, brick, tile, and concrete construction materials."
            }
            Lcz::CompactLowRise => {
                "Dense mix of low-rise buildings (1-3 stories). Few or no trees. \
                 Land cover mostly paved. Stone, brick, tile, and concrete construction materials."
            }
            Lcz::OpenHighRise => {
                "Open arrangement of tall buildings to tens of stories. Abundance of pervious \
                 land cover (low plants, scattered trees). Concrete, steel, stone, and glass \
                 construction materials."
            }
            Lcz::OpenMidrise => {
                "Open arrangement of midrise buildings (3-9 stories). Abundance of pervious \
                 land cover (low plants, scattered trees). Concrete, steel, stone, and glass \
                 construction materials."
            }
            Lcz::OpenLowRise => {
                "Open arrangement of low-rise buildings (1-3 stories). Abundance of pervious \
                 land cover (low plants, scattered trees). Wood, brick, stone, tile, and \
                 concrete construction materials."
            }
            Lcz::LightweightLowRise => {
                "Dense mix of single-story buildings. Few or no trees. Land cover mostly \
                 hard-packed. Lightweight construction materials (e.g., wood, thatch, \
                 corrugated metal)."
            }
            Lcz::LargeLowRise => {
                "Open arrangement of large low-rise buildings (1-3 stories). Few or no trees. \
                 Land cover mostly paved. Steel, concrete, metal, and stone construction materials."
            }
            Lcz::SparselyBuilt => {
                "Sparse arrangement of small or medium-sized buildings in a natural setting. \
                 Abundance of pervious land cover (low plants, scattered trees)."
            }
            Lcz::HeavyIndustry => {
                "Low-rise and midrise industrial structures (towers, tanks, stacks). Few or no \
                 trees. Land cover mostly paved or hard-packed. Metal, steel, and concrete \
                 construction materials."
            }
            Lcz::DenseTrees => {
                "Heavily wooded landscape of deciduous and/or evergreen trees. Land cover \
                 mostly pervious (low plants). Zone function is natural forest, tree \
                 cultivation, or urban park."
            }
            Lcz::ScatteredTrees => {
                "Lightly wooded landscape of deciduous and/or evergreen trees. Land cover \
                 mostly pervious (low plants). Zone function is natural forest, tree \
                 cultivation, or urban park."
            }
            Lcz::BushScrub => {
                "Open arrangement of bushes, shrubs, and short, woody trees. Land cover mostly \
                 pervious (bare soil or sand). Zone function is natural scrubland or agriculture."
            }
            Lcz::LowPlants => {
                "Featureless landscape of grass or herbaceous plants/crops. Few or no trees. \
                 Zone function is natural grassland, agriculture, or urban park."
            }
            Lcz::BareRockPaved => {
                "Featureless landscape of rock or paved cover. Few or no trees or plants. \
                 Zone function is natural desert (rock) or urban transportation."
            }
            Lcz::BareSoilSand => {
                "Featureless landscape of soil or sand cover. Few or no trees or plants. \
                 Zone function is natural desert or agriculture."
            }
            Lcz::Water => {
                "Large, open water bodies such as seas and lakes, or small bodies such as \
                 rivers, reservoirs, and lagoons."
            }
        }
    }

    /// Vulnerability Urban Climate Index score for this category.
    pub fn vuci(self) -> u8 {
        match self {
            Lcz::CompactHighRise => 100,
            Lcz::CompactMidrise => 80,
            Lcz::CompactLowRise => 70,
            Lcz::OpenHighRise => 70,
            Lcz::OpenMidrise => 60,
            Lcz::OpenLowRise => 50,
            Lcz::LightweightLowRise => 60,
            Lcz::LargeLowRise => 50,
            Lcz::SparselyBuilt => 30,
            Lcz::HeavyIndustry => 70,
            Lcz::DenseTrees => 50,
            Lcz::ScatteredTrees => 30,
            Lcz::BushScrub => 30,
            Lcz::LowPlants => 20,
            Lcz::BareRockPaved => 40,
            Lcz::BareSoilSand => 10,
            Lcz::Water => 20,
        }
    }
}

/// VUCI for a dominant category, total over the full key space: stations
/// without a land-cover classification score 0.
pub fn vuci_or_default(dominant: Option<Lcz>) -> u8 {
    dominant.map(Lcz::vuci).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vuci_lookup_is_total_and_in_range() {
        for lcz in Lcz::ALL {
            assert!(lcz.vuci() <= 100);
        }
        assert_eq!(vuci_or_default(None), 0);
        assert_eq!(Lcz::from_code("X"), None);
        assert_eq!(vuci_or_default(Lcz::from_code("X")), 0);
    }

    #[test]
    fn test_code_round_trip_in_canonical_order() {
        let codes: Vec<&str> = Lcz::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(
            codes,
            [
                "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "A", "B", "C", "D", "E", "F",
                "G"
            ]
        );
        for lcz in Lcz::ALL {
            assert_eq!(Lcz::from_code(lcz.code()), Some(lcz));
        }
    }

    #[test]
    fn test_vuci_table_values() {
        assert_eq!(Lcz::CompactHighRise.vuci(), 100);
        assert_eq!(Lcz::CompactMidrise.vuci(), 80);
        assert_eq!(Lcz::HeavyIndustry.vuci(), 70);
        assert_eq!(Lcz::BareSoilSand.vuci(), 10);
        assert_eq!(Lcz::Water.vuci(), 20);
    }

    #[test]
    fn test_name_table() {
        assert_eq!(Lcz::CompactMidrise.name(), "compact midrise");
        assert_eq!(Lcz::Water.name(), "water");
    }
}
