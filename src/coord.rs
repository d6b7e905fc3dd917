use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

// Raw WGS84 position as delivered by a GPS receiver.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, ele: f64) -> Self {
        Self {
            lat: lat,
            lon: lon,
            ele: ele,
        }
    }

    pub fn project(&self) -> Point {
        let (e, n) = wgs84_to_lv95(self.lat, self.lon);

        Point::new(e, n, self.ele)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_fmt(format_args!("({:.6}, {:.6}, {:.0}m)",
                                         self.lat, self.lon, self.ele))
    }
}

/// Position in the Swiss LV95 grid (metres) with its altitude (metres).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub e: f64,
    pub n: f64,
    pub ele: f64,
}

impl Point {
    pub fn new(e: f64, n: f64, ele: f64) -> Self {
        Self {
            e: e,
            n: n,
            ele: ele,
        }
    }

    // Coordinates rounded to whole metres, the way they are printed on a
    // marching table.
    pub fn rounded(&self) -> (u64, u64) {
        (self.e.round().max(0.0) as u64, self.n.round().max(0.0) as u64)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (e, n) = self.rounded();
        formatter.write_fmt(format_args!("{} {} ({:.0}m)", e, n, self.ele))
    }
}

/// Horizontal difference between two points, in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Offset {
    pub de: f64,
    pub dn: f64,
}

impl Offset {
    pub fn new(de: f64, dn: f64) -> Self {
        Self {
            de: de,
            dn: dn,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn abs_sq(&self) -> f64 {
        self.de*self.de + self.dn*self.dn
    }

    pub fn abs(&self) -> f64 {
        self.abs_sq().sqrt()
    }

    // Rotated a quarter turn counter clockwise, i.e. pointing to the left
    // of the direction of this offset.
    pub fn left_normal(&self) -> Offset {
        Offset::new(-self.dn, self.de)
    }

    // Angle from east, counter clockwise, in degrees in the range -180..180.
    pub fn angle_deg(&self) -> f64 {
        self.dn.atan2(self.de).to_degrees()
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, other: Point) -> Offset {
        Offset::new(self.e - other.e, self.n - other.n)
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, other: Offset) -> Offset {
        Offset::new(self.de + other.de, self.dn + other.dn)
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;

    fn mul(self, f: f64) -> Offset {
        Offset::new(self.de*f, self.dn*f)
    }
}

// Approximate WGS84 -> LV95 transformation published by swisstopo. Accuracy
// is around one metre inside Switzerland. Outside the country the result is
// numerically defined but meaningless.
pub fn wgs84_to_lv95(lat: f64, lon: f64) -> (f64, f64) {
    // Auxiliary values, from degrees to sexagesimal seconds relative to Bern
    let phi = (lat*3600.0 - 169028.66)/10000.0;
    let lambda = (lon*3600.0 - 26782.5)/10000.0;

    let e = 2600072.37
        + 211455.93*lambda
        - 10938.51*lambda*phi
        - 0.36*lambda*phi*phi
        - 44.54*lambda*lambda*lambda;

    let n = 1200147.07
        + 308807.95*phi
        + 3745.25*lambda*lambda
        + 76.63*phi*phi
        - 194.56*lambda*lambda*phi
        + 119.79*phi*phi*phi;

    return (e, n);
}

/// Horizontal distance between two projected points, in kilometres.
pub fn distance(a: &Point, b: &Point) -> f64 {
    (*a - *b).abs()/1000.0
}

/// Distance in kilometres computed directly on WGS84 positions, using the
/// ellipsoidal Earth projected to a plane. Only meaningful below ~475 km.
pub fn ellipsoidal_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_phi = (a.lat - b.lat).abs();
    let d_lambda = (a.lon - b.lon).abs();
    let phi_m = ((a.lat + b.lat)/2.0).to_radians();

    let k1 = 111.13209 - 0.56605*(2.0*phi_m).cos() + 0.00120*(4.0*phi_m).cos();
    let k2 = 111.41513*phi_m.cos() - 0.09455*(3.0*phi_m).cos()
        + 0.00012*(5.0*phi_m).cos();

    let x = k1*d_phi;
    let y = k2*d_lambda;

    (x*x + y*y).sqrt()
}
