//! Placement of entity markers sharing a single map cell.
use std::f64::consts::PI;

/// A marker relative to the cell center, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub dx: i64,
    pub dy: i64,
    pub radius: i64,
}

/// Positions `count` markers inside a cell of `cell_size` pixels.
///
/// A lone marker sits in the center. Two to four markers are spread over fixed
/// positions and anything beyond that is arranged on a circle.
#[must_use]
pub fn marker_layout(count: usize, cell_size: i64) -> Vec<Marker> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![Marker {
            dx: 0,
            dy: 0,
            radius: cell_size.div_euclid(3),
        }];
    }

    let r = cell_size.div_euclid(4);
    let radius = if count > 2 {
        r.div_euclid(2)
    } else {
        (r * 2).div_euclid(3)
    };
    let half = r.div_euclid(2);
    let neg_half = (-r).div_euclid(2);

    let offsets: Vec<(i64, i64)> = match count {
        2 => vec![(neg_half, 0), (half, 0)],
        3 => vec![(neg_half, neg_half), (half, neg_half), (0, half)],
        4 => vec![
            (neg_half, neg_half),
            (half, neg_half),
            (neg_half, half),
            (half, half),
        ],
        _ => {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let ring = (0..count)
                .map(|i| {
                    let angle = 2.0 * PI * i as f64 / count as f64;
                    let distance = r as f64 * 0.8;
                    (
                        (distance * angle.cos()) as i64,
                        (distance * angle.sin()) as i64,
                    )
                })
                .collect();
            ring
        }
    };

    offsets
        .into_iter()
        .map(|(dx, dy)| Marker { dx, dy, radius })
        .collect()
}
