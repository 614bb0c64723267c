//! Region records and the fixed metric set.

use serde::{Deserialize, Serialize};

/// The nine statistics read from every country or state page.
///
/// `label()` is the token the page text collapses to once spaces are
/// removed, e.g. "Total Church Membership" -> "TotalChurchMembership".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalChurchMembership,
    Stakes,
    Congregations,
    Wards,
    Branches,
    FamilySearchCenters,
    Temples,
    Missions,
    Districts,
}

impl Metric {
    /// All metrics in column order.
    pub const ALL: [Metric; 9] = [
        Metric::TotalChurchMembership,
        Metric::Stakes,
        Metric::Congregations,
        Metric::Wards,
        Metric::Branches,
        Metric::FamilySearchCenters,
        Metric::Temples,
        Metric::Missions,
        Metric::Districts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalChurchMembership => "TotalChurchMembership",
            Metric::Stakes => "Stakes",
            Metric::Congregations => "Congregations",
            Metric::Wards => "Wards",
            Metric::Branches => "Branches",
            Metric::FamilySearchCenters => "FamilySearchCenters",
            Metric::Temples => "Temples",
            Metric::Missions => "Missions",
            Metric::Districts => "Districts",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One country or state snapshot.
///
/// A metric missing from the page is stored as 0, not as unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "TotalChurchMembership")]
    pub total_church_membership: u64,
    #[serde(rename = "Stakes")]
    pub stakes: u64,
    #[serde(rename = "Congregations")]
    pub congregations: u64,
    #[serde(rename = "Wards")]
    pub wards: u64,
    #[serde(rename = "Branches")]
    pub branches: u64,
    #[serde(rename = "FamilySearchCenters")]
    pub family_search_centers: u64,
    #[serde(rename = "Temples")]
    pub temples: u64,
    #[serde(rename = "Missions")]
    pub missions: u64,
    #[serde(rename = "Districts")]
    pub districts: u64,
}

impl RegionRecord {
    /// A record with every metric at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::TotalChurchMembership => self.total_church_membership,
            Metric::Stakes => self.stakes,
            Metric::Congregations => self.congregations,
            Metric::Wards => self.wards,
            Metric::Branches => self.branches,
            Metric::FamilySearchCenters => self.family_search_centers,
            Metric::Temples => self.temples,
            Metric::Missions => self.missions,
            Metric::Districts => self.districts,
        }
    }

    pub fn set(&mut self, metric: Metric, value: u64) {
        let slot = match metric {
            Metric::TotalChurchMembership => &mut self.total_church_membership,
            Metric::Stakes => &mut self.stakes,
            Metric::Congregations => &mut self.congregations,
            Metric::Wards => &mut self.wards,
            Metric::Branches => &mut self.branches,
            Metric::FamilySearchCenters => &mut self.family_search_centers,
            Metric::Temples => &mut self.temples,
            Metric::Missions => &mut self.missions,
            Metric::Districts => &mut self.districts,
        };
        *slot = value;
    }
}
