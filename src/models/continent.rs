use crate::error::{DashboardError, Result};
use crate::utils::constants::WORLD;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use validator::Validate;

/// Map centre and zoom used to frame a continent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct MapFraming {
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = 0.1))]
    pub scale: f64,
}

impl MapFraming {
    pub const fn new(lon: f64, lat: f64, scale: f64) -> Self {
        Self { lon, lat, scale }
    }

    /// Longitude/latitude window: 60° wide and 40° tall at scale 1.
    pub fn bounds(&self) -> GeoBounds {
        let half_lon = 30.0 / self.scale;
        let half_lat = 20.0 / self.scale;
        GeoBounds {
            lon_range: [self.lon - half_lon, self.lon + half_lon],
            lat_range: [self.lat - half_lat, self.lat + half_lat],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lon_range: [f64; 2],
    pub lat_range: [f64; 2],
}

const BUILTIN_FRAMINGS: &[(&str, MapFraming)] = &[
    ("Africa", MapFraming::new(50.0, 0.0, 2.0)),
    ("Asia", MapFraming::new(100.0, 30.0, 2.0)),
    (WORLD, MapFraming::new(0.0, 0.0, 1.0)),
    ("Europe", MapFraming::new(20.0, 50.0, 2.0)),
    ("North America", MapFraming::new(-100.0, 40.0, 2.0)),
    ("South America", MapFraming::new(-60.0, -15.0, 2.0)),
    ("Oceania", MapFraming::new(140.0, -25.0, 2.0)),
];

const BUILTIN_MEMBERSHIP: &[(&str, &str)] = &[
    ("United States", "North America"),
    ("Canada", "North America"),
    ("Mexico", "North America"),
    ("Cuba", "North America"),
    ("Guatemala", "North America"),
    ("Trinidad and Tobago", "North America"),
    ("Brazil", "South America"),
    ("Argentina", "South America"),
    ("Venezuela", "South America"),
    ("Colombia", "South America"),
    ("Ecuador", "South America"),
    ("Peru", "South America"),
    ("Bolivia", "South America"),
    ("Chile", "South America"),
    ("Germany", "Europe"),
    ("France", "Europe"),
    ("United Kingdom", "Europe"),
    ("Norway", "Europe"),
    ("Denmark", "Europe"),
    ("Netherlands", "Europe"),
    ("Italy", "Europe"),
    ("Spain", "Europe"),
    ("Poland", "Europe"),
    ("Romania", "Europe"),
    ("Ukraine", "Europe"),
    ("Russia", "Europe"),
    ("China", "Asia"),
    ("India", "Asia"),
    ("Japan", "Asia"),
    ("South Korea", "Asia"),
    ("Indonesia", "Asia"),
    ("Malaysia", "Asia"),
    ("Vietnam", "Asia"),
    ("Thailand", "Asia"),
    ("Pakistan", "Asia"),
    ("Saudi Arabia", "Asia"),
    ("Iran", "Asia"),
    ("Iraq", "Asia"),
    ("Kuwait", "Asia"),
    ("Qatar", "Asia"),
    ("Oman", "Asia"),
    ("United Arab Emirates", "Asia"),
    ("Kazakhstan", "Asia"),
    ("Azerbaijan", "Asia"),
    ("Turkey", "Asia"),
    ("Australia", "Oceania"),
    ("New Zealand", "Oceania"),
    ("Papua New Guinea", "Oceania"),
    ("South Africa", "Africa"),
    ("Nigeria", "Africa"),
    ("Angola", "Africa"),
    ("Algeria", "Africa"),
    ("Libya", "Africa"),
    ("Egypt", "Africa"),
    ("Gabon", "Africa"),
    ("Congo", "Africa"),
    ("Sudan", "Africa"),
    ("Chad", "Africa"),
    ("Equatorial Guinea", "Africa"),
    ("Ghana", "Africa"),
    ("Tunisia", "Africa"),
    ("Cameroon", "Africa"),
];

/// Which entities a continent selection admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinentSelection<'a> {
    /// No filtering.
    World,
    Members(HashSet<&'a str>),
}

impl ContinentSelection<'_> {
    pub fn admits(&self, entity: &str) -> bool {
        match self {
            ContinentSelection::World => true,
            ContinentSelection::Members(members) => members.contains(entity),
        }
    }
}

/// Static country → continent mapping plus per-continent map framing.
#[derive(Debug, Clone)]
pub struct ContinentCatalog {
    framings: Vec<(String, MapFraming)>,
    membership: HashMap<String, String>,
}

impl ContinentCatalog {
    pub fn builtin() -> Self {
        Self {
            framings: BUILTIN_FRAMINGS
                .iter()
                .map(|(name, framing)| (name.to_string(), *framing))
                .collect(),
            membership: BUILTIN_MEMBERSHIP
                .iter()
                .map(|(entity, continent)| (entity.to_string(), continent.to_string()))
                .collect(),
        }
    }

    /// Replace the built-in membership table. Every continent named must
    /// be one the catalog can frame, and "World" cannot be assigned.
    pub fn with_membership(mut self, membership: HashMap<String, String>) -> Result<Self> {
        for continent in membership.values() {
            if continent == WORLD {
                return Err(DashboardError::Config(format!(
                    "'{}' cannot be assigned as a country's continent",
                    WORLD
                )));
            }
            self.framing(continent)?;
        }
        self.membership = membership;
        Ok(self)
    }

    /// Continent names in dropdown order.
    pub fn continents(&self) -> Vec<&str> {
        self.framings.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn framing(&self, continent: &str) -> Result<&MapFraming> {
        self.framings
            .iter()
            .find(|(name, _)| name == continent)
            .map(|(_, framing)| framing)
            .ok_or_else(|| DashboardError::UnknownContinent {
                name: continent.to_string(),
                known: self.continents().join(", "),
            })
    }

    pub fn continent_of(&self, entity: &str) -> Option<&str> {
        self.membership.get(entity).map(String::as_str)
    }

    /// Member entities of a continent, sorted. "World" has no explicit members.
    pub fn members(&self, continent: &str) -> Result<Vec<&str>> {
        self.framing(continent)?;
        let mut members: Vec<&str> = self
            .membership
            .iter()
            .filter(|(_, c)| c.as_str() == continent)
            .map(|(entity, _)| entity.as_str())
            .collect();
        members.sort_unstable();
        Ok(members)
    }

    pub fn selection(&self, continent: &str) -> Result<ContinentSelection<'_>> {
        if continent == WORLD {
            self.framing(continent)?;
            return Ok(ContinentSelection::World);
        }
        Ok(ContinentSelection::Members(
            self.members(continent)?.into_iter().collect(),
        ))
    }
}

impl Default for ContinentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
