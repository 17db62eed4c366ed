//! Geographic to 3D sphere projection.

/// Radius of the rendered globe, in scene units.
pub const GLOBE_RADIUS: f64 = 2.0;
/// Radius at which point markers float just above the globe surface.
pub const MARKER_RADIUS: f64 = 2.05;
/// Radius of the atmosphere shell drawn around the globe.
pub const ATMOSPHERE_RADIUS: f64 = 2.1;

/// A point or direction in 3D scene space (Y up).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance from the origin.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Rotate around the Y (vertical) axis by `angle` radians.
    ///
    /// Positive angles turn +X towards -Z, matching a right-handed scene
    /// viewed from +Z.
    pub fn rotate_y(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Rotate around the X (horizontal) axis by `angle` radians.
    ///
    /// Positive angles tip +Y towards +Z, i.e. the top of the globe leans
    /// towards a viewer on +Z.
    pub fn rotate_x(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

/// Project a latitude/longitude pair (degrees) onto a sphere of `radius`.
///
/// Uses polar angle `90 - latitude` and azimuth `longitude + 180`:
/// `x = -r sin(polar) cos(azimuth)`, `z = r sin(polar) sin(azimuth)`,
/// `y = r cos(polar)`. Total over all finite inputs; the result lies on the
/// sphere up to floating-point rounding.
pub fn lat_lon_to_vec3(latitude: f64, longitude: f64, radius: f64) -> Vec3 {
    let polar = (90.0 - latitude).to_radians();
    let azimuth = (longitude + 180.0).to_radians();

    Vec3 {
        x: -(radius * polar.sin() * azimuth.cos()),
        y: radius * polar.cos(),
        z: radius * polar.sin() * azimuth.sin(),
    }
}
