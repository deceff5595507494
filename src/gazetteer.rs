//! Named places and their coordinates.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::model::Coordinate;
use crate::traits::LocationResolver;

/// Ports, cities and border crossings served by the fleet.
const BUILTIN_PLACES: &[(&str, f64, f64)] = &[
    ("Porto de Sao Francisco do Sul", -26.245, -48.623),
    ("Aduana Argentina", -31.528, -60.719),
    ("Cachoeirinha", -29.969, -51.150),
    ("Betim", -19.968, -44.197),
    ("Jundiai", -23.185, -46.897),
    ("Guarulhos", -23.432, -46.533),
    ("Navegantes", -26.896, -48.650),
    ("Maringa", -23.425, -51.938),
    ("Cordilheira dos Andes", -32.500, -69.200),
    ("Paranagua", -25.522, -48.517),
    ("Santos", -23.956, -46.333),
    ("Campinas", -23.185, -46.897),
    ("Rio de Janeiro", -22.9068, -43.1729),
    ("Curitiba", -25.4284, -49.2733),
    ("Itajai", -26.905, -48.647),
    ("Foz do Iguacu", -25.542, -54.585),
    ("Uberlandia", -18.918, -48.276),
    ("Joinville", -26.302, -48.846),
    ("Florianopolis", -27.595, -48.548),
    ("Buenos Aires", -34.6037, -58.3816),
    ("Sao Jose dos Pinhais", -25.5305, -49.2585),
    ("Sorocaba", -23.501, -47.458),
    ("Contagem", -19.9317, -44.0533),
    ("Americana", -23.209, -47.335),
    ("Sao Bernardo do Campo", -23.699, -46.564),
    ("Resende", -22.468, -44.467),
    ("Ribeirao Preto", -21.177, -47.810),
    ("Cordoba", -31.420, -64.180),
    ("Punta Arenas", -53.158, -70.909),
    ("Santiago", -33.4489, -70.6693),
];

/// In-memory place table. Lookups are exact, case-sensitive name matches.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: HashMap<String, Coordinate>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fleet's standard operating area.
    pub fn builtin() -> Self {
        BUILTIN_PLACES
            .iter()
            .map(|&(name, lat, lng)| (name, Coordinate::new(lat, lng)))
            .collect()
    }

    /// Load places from a CSV with `name,latitude,longitude` columns.
    ///
    /// Coordinates must be finite, with latitude in `[-90, 90]` and longitude
    /// in `[-180, 180]`.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, GazetteerError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut gazetteer = Self::new();

        for record in csv_reader.deserialize::<PlaceRow>() {
            let row = record?;
            if !valid_coordinate(row.latitude, row.longitude) {
                return Err(GazetteerError::InvalidCoordinate {
                    name: row.name,
                    latitude: row.latitude,
                    longitude: row.longitude,
                });
            }
            gazetteer.insert(row.name, Coordinate::new(row.latitude, row.longitude));
        }

        Ok(gazetteer)
    }

    /// Adds or replaces a place.
    pub fn insert(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        self.places.insert(name.into(), coordinate);
    }

    /// Merge another table on top of this one; later entries win.
    pub fn extend(&mut self, other: Gazetteer) {
        self.places.extend(other.places);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Coordinate)> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = (N, Coordinate)>>(iter: I) -> Self {
        Self {
            places: iter
                .into_iter()
                .map(|(name, coordinate)| (name.into(), coordinate))
                .collect(),
        }
    }
}

impl LocationResolver for Gazetteer {
    fn resolve(&self, name: &str) -> Option<Coordinate> {
        self.places.get(name).copied()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GazetteerError {
    #[error("failed to read gazetteer csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("place '{name}' has invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        name: String,
        latitude: f64,
        longitude: f64,
    },
}

fn valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

#[derive(Debug, Deserialize)]
struct PlaceRow {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_known_places() {
        let gazetteer = Gazetteer::builtin();
        assert_eq!(gazetteer.len(), BUILTIN_PLACES.len());
        assert_eq!(
            gazetteer.resolve("Cachoeirinha"),
            Some(Coordinate::new(-29.969, -51.150))
        );
        assert_eq!(gazetteer.resolve("Atlantis"), None);
    }

    #[test]
    fn lookups_are_exact() {
        let gazetteer = Gazetteer::builtin();
        assert_eq!(gazetteer.resolve("santos"), None);
        assert_eq!(gazetteer.resolve(" Santos"), None);
    }

    #[test]
    fn loads_places_from_csv() {
        let data = "name,latitude,longitude\nDepot A, -10.5, -40.25\nDepot B,1,2\n";
        let gazetteer = Gazetteer::from_csv(data.as_bytes()).expect("csv parses");

        assert_eq!(gazetteer.len(), 2);
        assert_eq!(gazetteer.resolve("Depot A"), Some(Coordinate::new(-10.5, -40.25)));
    }

    #[test]
    fn rejects_non_finite_and_out_of_range_coordinates() {
        for row in ["Broken Depot,NaN,-48.6", "Broken Depot,-26.2,inf", "Broken Depot,91,0", "Broken Depot,0,-180.5"] {
            let data = format!("name,latitude,longitude\nSantos,-23.956,-46.333\n{row}\n");
            let err = Gazetteer::from_csv(data.as_bytes()).unwrap_err();
            assert!(
                matches!(err, GazetteerError::InvalidCoordinate { ref name, .. } if name == "Broken Depot"),
                "row {row} gave {err}"
            );
        }
    }

    #[test]
    fn extend_overrides_existing_names() {
        let mut gazetteer = Gazetteer::builtin();
        let custom: Gazetteer = [("Santos", Coordinate::new(0.0, 0.0))].into_iter().collect();
        gazetteer.extend(custom);

        assert_eq!(gazetteer.resolve("Santos"), Some(Coordinate::new(0.0, 0.0)));
        assert_eq!(gazetteer.len(), BUILTIN_PLACES.len());
    }
}
