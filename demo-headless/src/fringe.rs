//! Predicted interference maxima for the double-slit screen
//!
//! The two slits are treated as point sources `2A` apart, with
//! `A = (separation + aperture) / 2` measured between slit centres. For
//! order `n` the path difference to a screen point is `n * wavelength`,
//! which puts the point on a hyperbola. Intersecting it with the screen
//! line gives the exact lateral offset instead of the far-field
//! `L * tan(asin(n * wavelength / 2A))` approximation.

use serde::Serialize;
use wave_sim_core::DoubleSlitConfig;

/// One predicted maximum on the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fringe {
    /// Signed interference order
    pub order: i32,
    /// Position along the screen axis, in meters
    pub position: f64,
}

/// Lateral offset of the order-`order` maximum from the slit midline
///
/// Returns `None` when the order cannot form on the screen
/// (`order * wavelength >= separation + aperture`).
pub fn maxima_distance(
    order: u32,
    wavelength: f64,
    separation: f64,
    aperture: f64,
    screen_distance: f64,
) -> Option<f64> {
    let n = f64::from(order);
    let half = (separation + aperture) / 2.0;
    let path = n * wavelength;

    let a = path * path / (4.0 * half * half) - 1.0;
    let b = path - path.powi(3) / (4.0 * half * half);
    let c = screen_distance * screen_distance + path.powi(4) / (16.0 * half * half)
        - path * path / 2.0
        + half * half;

    let discriminant = b * b - 4.0 * a * c;
    if a >= 0.0 || discriminant < 0.0 {
        return None;
    }

    // Distance from the far slit to the maximum
    let far_path = (-b - discriminant.sqrt()) / (2.0 * a);
    let offset = path / (2.0 * half) * (far_path - path / 2.0);
    offset.is_finite().then_some(offset)
}

/// Maxima of orders `-N..=N` for a double-slit run, `N = prediction_order`
///
/// Positions are absolute coordinates along y, centred on the slit
/// midline. Orders with no real maximum are left out.
pub fn predicted_fringes(config: &DoubleSlitConfig) -> Vec<Fringe> {
    let wavelength = config.wavelength();
    let separation = config.slit.separation * config.height;
    let aperture = config.slit.aperture * config.height;
    let screen_distance = (config.screen.x_position - config.slit.x_position) * config.width;
    let centre = config.slit.y_position * config.height;

    let mut fringes = vec![Fringe {
        order: 0,
        position: centre,
    }];
    for order in 1..=config.prediction_order as u32 {
        let Some(offset) =
            maxima_distance(order, wavelength, separation, aperture, screen_distance)
        else {
            break;
        };
        let order = order as i32;
        fringes.push(Fringe {
            order: -order,
            position: centre - offset,
        });
        fringes.push(Fringe {
            order,
            position: centre + offset,
        });
    }

    fringes.sort_by_key(|fringe| fringe.order);
    fringes
}
