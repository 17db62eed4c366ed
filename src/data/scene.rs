//! Globe camera, screen mapping, and marker geometry.
//!
//! The globe is drawn with an orthographic camera looking down -Z from +Z.
//! Scene points are spun around the vertical axis by the camera rotation,
//! tipped by the tilt, and then scaled onto a canvas whose units are one
//! terminal column horizontally and half a row vertically, so a circle in
//! scene space stays round on screen.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use groundwater_types::{MonitoringPoint, Vec3, GLOBE_RADIUS, MARKER_RADIUS};

/// Camera distance the scene is framed for.
pub const DEFAULT_CAMERA_DISTANCE: f64 = 5.0;
/// Closest the camera may zoom in.
pub const MIN_CAMERA_DISTANCE: f64 = 3.0;
/// Farthest the camera may zoom out.
pub const MAX_CAMERA_DISTANCE: f64 = 10.0;

/// Globe spin in radians per second (0.002 rad per frame at 60 fps).
pub const DEFAULT_ROTATION_SPEED: f64 = 0.12;

/// Fraction of the canvas the globe fills at the default distance.
const FRAME_FILL: f64 = 0.85;
/// Multiplicative step for one zoom keypress.
const ZOOM_STEP: f64 = 1.2;

/// Base marker radius in scene units.
const MARKER_BASE_SIZE: f64 = 0.02;

/// Orbit-style camera around the globe.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Spin around the vertical axis, in radians, kept within `[0, TAU)`.
    pub rotation: f64,
    /// Tilt around the horizontal axis, in radians, within `[-PI/2, PI/2]`.
    pub tilt: f64,
    /// Distance from the globe center, within the min/max camera distance.
    pub distance: f64,
    /// Whether the globe spins on its own.
    pub spinning: bool,
    /// Spin rate in radians per second.
    pub rotation_speed: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_SPEED)
    }
}

impl Camera {
    pub fn new(rotation_speed: f64) -> Self {
        Self {
            rotation: 0.0,
            tilt: 0.0,
            distance: DEFAULT_CAMERA_DISTANCE,
            spinning: true,
            rotation_speed,
        }
    }

    /// Advance the automatic spin by `elapsed` time.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.spinning {
            self.rotate_by(self.rotation_speed * elapsed.as_secs_f64());
        }
    }

    pub fn rotate_by(&mut self, delta: f64) {
        self.rotation = (self.rotation + delta).rem_euclid(TAU);
    }

    pub fn tilt_by(&mut self, delta: f64) {
        self.tilt = (self.tilt + delta).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn zoom_in(&mut self) {
        self.distance = (self.distance / ZOOM_STEP).max(MIN_CAMERA_DISTANCE);
    }

    pub fn zoom_out(&mut self) {
        self.distance = (self.distance * ZOOM_STEP).min(MAX_CAMERA_DISTANCE);
    }

    pub fn toggle_spin(&mut self) {
        self.spinning = !self.spinning;
    }

    /// Magnification relative to the default framing.
    pub fn zoom(&self) -> f64 {
        DEFAULT_CAMERA_DISTANCE / self.distance
    }

    /// Transform a scene point into view space (+Z towards the viewer).
    pub fn view(&self, point: Vec3) -> Vec3 {
        point.rotate_y(self.rotation).rotate_x(self.tilt)
    }
}

/// Maps view-space points onto a canvas of a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Half the canvas width, in columns.
    pub half_width: f64,
    /// Half the canvas height, in half-rows.
    pub half_height: f64,
    /// Canvas units per scene unit.
    pub scale: f64,
}

impl Viewport {
    /// Frame the globe in a canvas of `cols` x `rows` cells.
    pub fn new(cols: u16, rows: u16, camera: &Camera) -> Self {
        let half_width = cols as f64 / 2.0;
        let half_height = rows as f64;
        let fit = half_width.min(half_height) * FRAME_FILL;
        Self {
            half_width,
            half_height,
            scale: fit * camera.zoom() / GLOBE_RADIUS,
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [-self.half_width, self.half_width]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [-self.half_height, self.half_height]
    }

    /// Canvas position of a view-space point, or `None` if it faces away.
    pub fn project(&self, view: Vec3) -> Option<(f64, f64)> {
        (view.z > 0.0).then(|| (view.x * self.scale, view.y * self.scale))
    }

    /// Canvas position of a view-space point regardless of facing.
    pub fn project_any(&self, view: Vec3) -> (f64, f64) {
        (view.x * self.scale, view.y * self.scale)
    }

    /// Canvas coordinates of the center of the cell at (`col`, `row`),
    /// relative to the canvas' top-left corner.
    pub fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        (
            col as f64 + 0.5 - self.half_width,
            self.half_height - (row as f64 + 0.5) * 2.0,
        )
    }
}

/// Canvas position of a point's marker, if it is on the visible hemisphere.
pub fn marker_position(
    point: &MonitoringPoint,
    camera: &Camera,
    viewport: &Viewport,
) -> Option<(f64, f64)> {
    viewport.project(camera.view(point.position(MARKER_RADIUS)))
}

/// Find the front-facing marker nearest to `target`, within `max_distance`
/// canvas units. Returns the index into `points`.
pub fn pick_marker(
    points: &[&MonitoringPoint],
    camera: &Camera,
    viewport: &Viewport,
    target: (f64, f64),
    max_distance: f64,
) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let (x, y) = marker_position(p, camera, viewport)?;
            let d = ((x - target.0).powi(2) + (y - target.1).powi(2)).sqrt();
            (d <= max_distance).then_some((i, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Marker radius in scene units; lower water levels draw larger markers.
pub fn marker_size(water_level: f64) -> f64 {
    let multiplier = (100.0 - water_level) / 100.0 * 0.03 + 1.0;
    MARKER_BASE_SIZE * multiplier
}

/// Pulse factor for the selected marker after `elapsed_secs` of animation.
pub fn pulse_scale(elapsed_secs: f64) -> f64 {
    1.0 + (elapsed_secs * 3.0).sin() * 0.2
}
