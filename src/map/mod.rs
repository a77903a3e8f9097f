//! Map lookup for the current object
//!
//! Converts a projected XY position to WGS84 latitude/longitude and opens
//! it in Google Maps. Supported coordinate systems are plain WGS84
//! (`EPSG:4326`) and WGS84 / UTM (`EPSG:326NN` north, `EPSG:327NN` south).

mod error;

pub use error::{MapError, Result};

use std::fmt;
use std::str::FromStr;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const UTM_K0: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Coordinate system of the point clouds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// `EPSG:4326`, x is longitude and y latitude
    Geographic,
    /// WGS84 / UTM zone `1..=60`
    Utm { zone: u8, north: bool },
}

impl FromStr for Projection {
    type Err = MapError;

    /// Accepts `EPSG:<code>` (any case) or the bare code
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let code = trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("epsg:"))
            .map_or(trimmed, |_| &trimmed[5..]);
        let unsupported = || MapError::UnsupportedProjection(s.to_string());

        let code: u32 = code.parse().map_err(|_| unsupported())?;
        match code {
            4326 => Ok(Self::Geographic),
            32601..=32660 => Ok(Self::Utm {
                zone: (code - 32600) as u8,
                north: true,
            }),
            32701..=32760 => Ok(Self::Utm {
                zone: (code - 32700) as u8,
                north: false,
            }),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geographic => write!(f, "EPSG:4326"),
            Self::Utm { zone, north: true } => write!(f, "EPSG:326{zone:02}"),
            Self::Utm { zone, north: false } => write!(f, "EPSG:327{zone:02}"),
        }
    }
}

impl Projection {
    /// Convert `(x, y)` to `(latitude, longitude)` in degrees
    #[must_use]
    pub fn to_wgs84(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::Geographic => (y, x),
            Self::Utm { zone, north } => utm_to_wgs84(x, y, zone, north),
        }
    }
}

/// Inverse transverse Mercator on the WGS84 ellipsoid
fn utm_to_wgs84(easting: f64, northing: f64, zone: u8, north: bool) -> (f64, f64) {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let ep2 = e2 / (1.0 - e2);

    let x = easting - UTM_FALSE_EASTING;
    let y = if north {
        northing
    } else {
        northing - UTM_FALSE_NORTHING_SOUTH
    };

    let m = y / UTM_K0;
    let mu = m / (WGS84_A * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

    let sqrt_1_e2 = (1.0 - e2).sqrt();
    let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);

    // Footpoint latitude
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let (sin_phi, cos_phi) = phi1.sin_cos();
    let tan_phi = phi1.tan();
    let c1 = ep2 * cos_phi.powi(2);
    let t1 = tan_phi.powi(2);
    let denom = 1.0 - e2 * sin_phi.powi(2);
    let n1 = WGS84_A / denom.sqrt();
    let r1 = WGS84_A * (1.0 - e2) / denom.powf(1.5);
    let d = x / (n1 * UTM_K0);

    let lat = phi1
        - (n1 * tan_phi / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2) - 252.0 * ep2 - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let central_meridian = f64::from(zone) * 6.0 - 183.0;
    let lon = central_meridian.to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
                * d.powi(5)
                / 120.0)
            / cos_phi;

    (lat.to_degrees(), lon.to_degrees())
}

/// Google Maps search URL for a WGS84 position
#[must_use]
pub fn google_maps_url(lat: f64, lon: f64) -> String {
    format!("https://www.google.com/maps/search/?api=1&query={lat:.7}%2C{lon:.7}")
}

/// Convert a projected position and open it in the default browser.
///
/// Returns the URL that was opened.
///
/// # Errors
///
/// Returns `MapError::NoProjection` without a projection and
/// `MapError::Open` if the browser cannot be launched.
pub fn open_location(projection: Option<Projection>, x: f64, y: f64) -> Result<String> {
    let projection = projection.ok_or(MapError::NoProjection)?;
    let (lat, lon) = projection.to_wgs84(x, y);
    let url = google_maps_url(lat, lon);

    tracing::info!(%projection, lat, lon, "opening map");
    open::that(&url).map_err(MapError::Open)?;
    Ok(url)
}
