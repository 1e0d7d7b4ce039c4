use serde::{Deserialize, Serialize};

/// Axis-aligned 3D bounding box (spec §3: `{x,y,z,w,h,d}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
    pub h: f32,
    pub d: f32,
}

/// Device/object orientation (spec §3: `{pitch,yaw,roll}`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Optional spatial descriptor attached to an entry's metadata (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialData {
    /// Depth from the sensor, in meters.
    pub depth_m: f32,
    pub bbox: BoundingBox3D,
    pub orientation: Orientation,
    pub confidence: f64,
}

/// Geographic coordinate (spec §3, §6 observation contract).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
    pub alt: Option<f64>,
}

impl GeoCoordinate {
    /// Haversine great-circle distance in meters. Altitude is ignored; the
    /// dedup engine's location tolerance (§4.2) is a horizontal figure.
    pub fn distance_m(&self, other: &GeoCoordinate) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_M * c
    }
}
