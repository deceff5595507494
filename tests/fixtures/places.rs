//! Named places used across the integration tests.
//!
//! Same coordinates as the built-in gazetteer.

use fleet_dispatch::model::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ============================================================================
// Ports
// ============================================================================

pub const SAO_FRANCISCO_DO_SUL: Place = Place::new("Porto de Sao Francisco do Sul", -26.245, -48.623);
pub const SANTOS: Place = Place::new("Santos", -23.956, -46.333);
pub const PARANAGUA: Place = Place::new("Paranagua", -25.522, -48.517);
pub const ITAJAI: Place = Place::new("Itajai", -26.905, -48.647);
pub const NAVEGANTES: Place = Place::new("Navegantes", -26.896, -48.650);

// ============================================================================
// Inland cities
// ============================================================================

pub const CACHOEIRINHA: Place = Place::new("Cachoeirinha", -29.969, -51.150);
pub const BETIM: Place = Place::new("Betim", -19.968, -44.197);
pub const JOINVILLE: Place = Place::new("Joinville", -26.302, -48.846);
pub const CURITIBA: Place = Place::new("Curitiba", -25.4284, -49.2733);
pub const GUARULHOS: Place = Place::new("Guarulhos", -23.432, -46.533);

/// Not present in any gazetteer.
pub const ATLANTIS: Place = Place::new("Atlantis", 0.0, 0.0);
