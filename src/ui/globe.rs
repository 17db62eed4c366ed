//! Globe view rendering.
//!
//! Draws an orthographic globe on a braille canvas: atmosphere halo, limb,
//! graticule and coarse coastlines, then the visible monitoring points as
//! markers colored by severity. The selected point gets a pulsing ring and a
//! location label. Anything on the far hemisphere is culled.

use groundwater_types::{lat_lon_to_vec3, Severity, ATMOSPHERE_RADIUS, GLOBE_RADIUS};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::data::scene::{marker_position, marker_size, pulse_scale, Camera, Viewport};

/// Screen enlargement of marker geometry; true-scale markers are sub-dot.
const MARKER_SCALE: f64 = 6.0;
/// Smallest ring radius around the selected marker, in canvas units.
const MIN_RING_RADIUS: f64 = 0.8;
/// Markers narrower than this stay single dots, in canvas units.
const MIN_MARKER_RADIUS: f64 = 1.0;
/// Degrees between graticule lines.
const GRATICULE_STEP: i32 = 30;
/// Degrees between samples along a line.
const SAMPLE_STEP: f64 = 2.0;

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Coarse coastlines as (latitude, longitude) rings.
const COASTLINES: &[&[(f64, f64)]] = &[
    // North America
    &[
        (69.5, -90.5), (58.9, -94.7), (51.2, -79.9), (62.6, -77.4), (53.3, -55.8),
        (46.8, -71.1), (39.2, -76.3), (25.2, -80.4), (30.1, -84.1), (27.8, -97.1),
        (18.8, -95.9), (21.5, -87.1), (9.0, -82.2), (7.2, -80.9), (19.3, -105.0),
        (31.2, -113.1), (40.3, -124.4), (49.0, -122.8), (58.1, -134.1), (61.3, -150.6),
        (54.4, -164.8), (65.7, -168.1), (71.4, -156.6), (67.4, -108.9), (69.5, -90.5),
    ],
    // South America
    &[
        (11.1, -74.9), (10.7, -61.9), (-0.1, -50.4), (-7.3, -34.7), (-21.9, -40.9),
        (-34.4, -53.8), (-41.1, -65.1), (-53.8, -71.0), (-46.6, -75.6), (-18.3, -70.4),
        (-4.7, -81.4), (9.0, -79.1), (11.1, -74.9),
    ],
    // Europe
    &[
        (36.0, -5.9), (43.0, -9.4), (48.7, -4.6), (53.5, 8.1), (57.1, 8.5),
        (54.4, 19.7), (60.0, 29.1), (65.7, 22.2), (59.5, 10.4), (62.6, 5.9),
        (70.5, 31.3), (69.3, 33.8), (47.3, 39.1), (41.1, 28.8), (36.4, 23.2),
        (45.6, 13.9), (37.9, 15.7), (44.4, 8.9), (36.0, -5.9),
    ],
    // Africa
    &[
        (35.8, -5.9), (31.2, 29.7), (29.9, 32.4), (11.7, 42.7), (10.6, 51.0),
        (-4.7, 39.2), (-24.1, 35.5), (-34.8, 19.6), (-18.1, 11.8), (3.7, 9.4),
        (4.4, -8.0), (14.7, -17.6), (35.8, -5.9),
    ],
    // Asia
    &[
        (77.0, 107.0), (69.4, 178.6), (59.9, 163.5), (54.7, 135.1), (39.8, 127.5),
        (37.5, 122.4), (28.2, 121.7), (19.8, 105.9), (8.6, 105.2), (1.3, 104.2),
        (22.8, 91.4), (8.0, 77.5), (21.4, 72.6), (30.3, 48.9), (12.6, 43.5),
        (31.2, 34.3), (41.5, 41.6), (68.6, 43.5), (73.0, 69.9), (77.0, 107.0),
    ],
    // Australia
    &[
        (-13.8, 143.6), (-26.1, 153.1), (-37.4, 150.0), (-38.0, 140.6), (-31.5, 131.3),
        (-34.2, 115.0), (-21.8, 114.1), (-14.2, 125.7), (-11.1, 132.4), (-17.7, 140.2),
        (-13.8, 143.6),
    ],
    // Greenland
    &[
        (83.5, -27.1), (81.3, -12.2), (70.1, -22.3), (60.1, -43.4), (69.9, -50.9),
        (78.0, -73.3), (83.5, -27.1),
    ],
];

/// Render the globe view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(globe_title(&app.camera))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.globe_area = inner;

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if app.data.is_none() {
        render_loading(frame, app, inner);
        return;
    }

    let camera = &app.camera;
    let theme = &app.theme;
    let viewport = Viewport::new(inner.width, inner.height, camera);
    let points = app.visible_points();
    let selected = app.selected_point();
    let pulse = pulse_scale(app.animation_secs);

    let graticule = graticule_coords(camera, &viewport);
    let coastlines = coastline_coords(camera, &viewport);

    // One batch per severity, critical drawn last so it stays on top
    let order = [Severity::Normal, Severity::Moderate, Severity::Critical];
    let batches: Vec<MarkerBatch> = order
        .into_iter()
        .map(|severity| {
            let mut batch = MarkerBatch {
                severity,
                coords: Vec::new(),
                outlines: Vec::new(),
            };
            for p in points.iter().filter(|p| p.severity() == severity) {
                let Some((x, y)) = marker_position(p, camera, &viewport) else {
                    continue;
                };
                batch.coords.push((x, y));
                if let Some(radius) = marker_radius(p.water_level, &viewport) {
                    batch.outlines.push((x, y, radius));
                }
            }
            batch
        })
        .collect();

    let highlight = selected.and_then(|p| {
        let (x, y) = marker_position(p, camera, &viewport)?;
        let radius = (marker_size(p.water_level) * 1.5 * pulse * viewport.scale * MARKER_SCALE)
            .max(MIN_RING_RADIUS);
        Some((p, x, y, radius))
    });

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(viewport.x_bounds())
        .y_bounds(viewport.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: ATMOSPHERE_RADIUS * viewport.scale,
                color: theme.atmosphere,
            });
            ctx.draw(&Points {
                coords: &graticule,
                color: theme.graticule,
            });
            ctx.draw(&Points {
                coords: &coastlines,
                color: theme.land,
            });
            ctx.layer();

            for batch in &batches {
                let color = theme.severity_color(batch.severity);
                ctx.draw(&Points {
                    coords: &batch.coords,
                    color,
                });
                for &(x, y, radius) in &batch.outlines {
                    ctx.draw(&Circle { x, y, radius, color });
                }
            }

            if let Some((point, x, y, radius)) = highlight {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius,
                    color: theme.severity_color(point.severity()),
                });
                ctx.layer();
                ctx.print(
                    x + radius + 1.0,
                    y,
                    Line::from(Span::styled(
                        point.short_location().to_string(),
                        Style::default().fg(theme.label).add_modifier(Modifier::BOLD),
                    )),
                );
            }
        });

    frame.render_widget(canvas, inner);
}

/// Front-facing markers of one severity.
struct MarkerBatch {
    severity: Severity,
    coords: Vec<(f64, f64)>,
    /// Sized outlines, present once the globe is zoomed in far enough.
    outlines: Vec<(f64, f64, f64)>,
}

/// On-screen marker radius for a water level, or `None` while a marker
/// would be no wider than a dot.
fn marker_radius(water_level: f64, viewport: &Viewport) -> Option<f64> {
    let radius = marker_size(water_level) * viewport.scale * MARKER_SCALE;
    (radius >= MIN_MARKER_RADIUS).then_some(radius)
}

fn globe_title(camera: &Camera) -> String {
    let state = if camera.spinning { "spinning" } else { "paused" };
    format!(
        " Globe [{} {:.0}° tilt {:.0}° zoom {:.1}x] ",
        state,
        camera.rotation.to_degrees(),
        camera.tilt.to_degrees(),
        camera.zoom()
    )
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if let Some(ref err) = app.load_error {
        (
            format!("Failed to load data: {}", err),
            app.theme.status_style(Severity::Critical),
        )
    } else {
        let frame_index = (app.animation_secs * 8.0) as usize % SPINNER.len();
        (
            format!("{} Loading groundwater data...", SPINNER[frame_index]),
            Style::default().fg(app.theme.highlight),
        )
    };

    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y, area.width, 1);
    let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(paragraph, line_area);
}

/// Sample a polyline given in degrees and keep the front-facing samples.
fn sample_polyline(
    vertices: &[(f64, f64)],
    camera: &Camera,
    viewport: &Viewport,
    out: &mut Vec<(f64, f64)>,
) {
    for pair in vertices.windows(2) {
        let (lat0, lon0) = pair[0];
        let (lat1, lon1) = pair[1];
        let span = (lat1 - lat0).abs().max((lon1 - lon0).abs());
        let steps = ((span / SAMPLE_STEP).ceil() as usize).max(1);
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let lat = lat0 + (lat1 - lat0) * t;
            let lon = lon0 + (lon1 - lon0) * t;
            let view = camera.view(lat_lon_to_vec3(lat, lon, GLOBE_RADIUS));
            if let Some(xy) = viewport.project(view) {
                out.push(xy);
            }
        }
    }
}

fn graticule_coords(camera: &Camera, viewport: &Viewport) -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    for lat in (-60..=60).step_by(GRATICULE_STEP as usize) {
        let parallel = [(lat as f64, -180.0), (lat as f64, 0.0), (lat as f64, 180.0)];
        sample_polyline(&parallel, camera, viewport, &mut coords);
    }
    for lon in (-180..180).step_by(GRATICULE_STEP as usize) {
        let meridian = [(-90.0, lon as f64), (90.0, lon as f64)];
        sample_polyline(&meridian, camera, viewport, &mut coords);
    }
    coords
}

fn coastline_coords(camera: &Camera, viewport: &Viewport) -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    for ring in COASTLINES {
        sample_polyline(ring, camera, viewport, &mut coords);
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graticule_culls_far_side() {
        let camera = Camera::default();
        let viewport = Viewport::new(80, 40, &camera);
        let coords = graticule_coords(&camera, &viewport);
        assert!(!coords.is_empty());

        // Everything drawn lies within the globe disc
        let limit = GLOBE_RADIUS * viewport.scale + 1e-9;
        assert!(coords.iter().all(|(x, y)| (x * x + y * y).sqrt() <= limit));
    }

    #[test]
    fn test_marker_radius_follows_water_level() {
        let camera = Camera::default();
        let viewport = Viewport::new(80, 40, &camera);
        let shallow = marker_radius(90.0, &viewport).expect("sized at this zoom");
        let deep = marker_radius(10.0, &viewport).expect("sized at this zoom");
        assert!(deep > shallow);

        // Small canvases fall back to plain dots
        let small = Viewport::new(20, 10, &camera);
        assert!(marker_radius(10.0, &small).is_none());
    }
}
