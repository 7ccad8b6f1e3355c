//! Rating engine configuration.

use crate::domain::ServiceArea;

/// Bounds and region for rating requests.
#[derive(Debug, Clone)]
pub struct RatingConfig {
    /// Fewest addresses a request may rank.
    /// Ranking needs at least two to compare.
    pub min_addresses: usize,

    /// Most addresses a request may rank.
    pub max_addresses: usize,

    /// Most points of interest a request may name.
    pub max_pois: usize,

    /// Region candidate addresses must lie in.
    pub area: ServiceArea,
}

impl RatingConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_addresses: usize,
        max_addresses: usize,
        max_pois: usize,
        area: ServiceArea,
    ) -> Self {
        Self {
            min_addresses,
            max_addresses,
            max_pois,
            area,
        }
    }

    /// Replace the service area.
    pub fn with_area(mut self, area: ServiceArea) -> Self {
        self.area = area;
        self
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            min_addresses: 2,
            max_addresses: 5,
            max_pois: 5,
            area: ServiceArea::hyde_park(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RatingConfig::default();

        assert_eq!(config.min_addresses, 2);
        assert_eq!(config.max_addresses, 5);
        assert_eq!(config.max_pois, 5);
        assert_eq!(config.area, ServiceArea::hyde_park());
    }

    #[test]
    fn custom_config() {
        let area = ServiceArea::new(41.0, 42.0, -88.0, -87.0);
        let config = RatingConfig::new(1, 10, 3, ServiceArea::default()).with_area(area);

        assert_eq!(config.min_addresses, 1);
        assert_eq!(config.max_addresses, 10);
        assert_eq!(config.max_pois, 3);
        assert_eq!(config.area, area);
    }
}
