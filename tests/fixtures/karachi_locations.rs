//! Karachi neighbourhood coordinates for realistic fixtures.
//!
//! Approximate centroids; all lie within roughly 30 km of Saddar.

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

    pub fn location(&self) -> journey_planner::Location {
        super::loc(self.lat, self.lng)
    }
}

// ============================================================================
// Agent homes
// ============================================================================

pub const SADDAR: Place = Place::new("Saddar", 24.8546, 67.0222);
pub const GULSHAN: Place = Place::new("Gulshan-e-Iqbal", 24.9204, 67.0932);
pub const KORANGI: Place = Place::new("Korangi", 24.8310, 67.1290);
pub const MALIR: Place = Place::new("Malir", 24.8931, 67.2000);

// ============================================================================
// Outlet neighbourhoods
// ============================================================================

pub const OUTLET_AREAS: &[Place] = &[
    Place::new("Clifton", 24.8138, 67.0300),
    Place::new("DHA Phase 6", 24.7925, 67.0650),
    Place::new("Nazimabad", 24.9139, 67.0322),
    Place::new("North Nazimabad", 24.9432, 67.0430),
    Place::new("Landhi", 24.8500, 67.2200),
    Place::new("PECHS", 24.8700, 67.0600),
    Place::new("Bahadurabad", 24.8777, 67.0703),
    Place::new("Tariq Road", 24.8722, 67.0620),
    Place::new("Lyari", 24.8600, 66.9950),
    Place::new("Orangi", 24.9500, 66.9900),
    Place::new("Gulistan-e-Jauhar", 24.9180, 67.1300),
    Place::new("Shah Faisal", 24.8800, 67.1600),
    Place::new("Federal B Area", 24.9300, 67.0700),
    Place::new("Kemari", 24.8200, 66.9800),
    Place::new("SITE", 24.9000, 67.0000),
    Place::new("Baldia", 24.9300, 66.9600),
    Place::new("New Karachi", 24.9900, 67.0600),
    Place::new("Surjani", 25.0300, 67.0600),
    Place::new("Defence View", 24.8400, 67.0800),
    Place::new("Airport", 24.9000, 67.1600),
    Place::new("Sea View", 24.7800, 67.0400),
    Place::new("Saadi Town", 24.9600, 67.1400),
    Place::new("Scheme 33", 24.9700, 67.1200),
    Place::new("Garden", 24.8750, 67.0200),
    Place::new("Kharadar", 24.8550, 66.9950),
];
