//! Geographic calculations along the route polyline

/// Earth radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two `[lat, lng]` points in miles
pub fn haversine_miles(from: [f64; 2], to: [f64; 2]) -> f64 {
    let d_lat = (to[0] - from[0]).to_radians();
    let d_lng = (to[1] - from[1]).to_radians();

    let lat1 = from[0].to_radians();
    let lat2 = to[0].to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Locate the point a given number of miles along the polyline.
///
/// Walks the geometry segment by segment, accumulating haversine lengths,
/// and linearly interpolates inside the segment that contains the target.
/// Targets at or before mile 0 return the first point; targets past the
/// polyline's total length return the last. `None` only for an empty
/// polyline.
///
/// Leg distances from the routing engine are authoritative for timing;
/// the haversine-summed geometry is generally shorter, so the returned
/// coordinate for mile `m` is approximate.
pub fn point_at_mile(geometry: &[[f64; 2]], target_miles: f64) -> Option<[f64; 2]> {
    let first = *geometry.first()?;
    if target_miles <= 0.0 {
        return Some(first);
    }

    let mut cumulative = 0.0;
    for pair in geometry.windows(2) {
        let segment = haversine_miles(pair[0], pair[1]);
        if cumulative + segment >= target_miles {
            let ratio = if segment > 0.0 {
                (target_miles - cumulative) / segment
            } else {
                0.0
            };
            return Some([
                pair[0][0] + ratio * (pair[1][0] - pair[0][0]),
                pair[0][1] + ratio * (pair[1][1] - pair[0][1]),
            ]);
        }
        cumulative += segment;
    }

    geometry.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_los_angeles_new_york() {
        let la = [34.0522, -118.2437];
        let nyc = [40.7128, -74.0060];

        let distance = haversine_miles(la, nyc);

        // LA to NYC is approximately 2450 miles great-circle
        assert!((distance - 2450.0).abs() < 20.0, "got {distance}");
    }

    #[test]
    fn haversine_same_point() {
        let point = [35.0, -100.0];
        assert!(haversine_miles(point, point).abs() < 1e-9);
    }

    #[test]
    fn point_at_mile_clamps_to_endpoints() {
        let geometry = vec![[35.0, -100.0], [36.0, -100.0]];

        assert_eq!(point_at_mile(&geometry, -5.0), Some([35.0, -100.0]));
        assert_eq!(point_at_mile(&geometry, 0.0), Some([35.0, -100.0]));
        assert_eq!(point_at_mile(&geometry, 10_000.0), Some([36.0, -100.0]));
    }

    #[test]
    fn point_at_mile_interpolates_along_meridian() {
        // One degree of latitude is ~69.1 mi at R = 3959
        let geometry = vec![[35.0, -100.0], [36.0, -100.0]];
        let total = haversine_miles(geometry[0], geometry[1]);

        let midpoint = point_at_mile(&geometry, total / 2.0).unwrap();
        assert!((midpoint[0] - 35.5).abs() < 1e-6);
        assert!((midpoint[1] + 100.0).abs() < 1e-9);
    }

    #[test]
    fn point_at_mile_walks_multiple_segments() {
        let geometry = vec![[35.0, -100.0], [35.5, -100.0], [36.0, -100.0]];
        let total = haversine_miles([35.0, -100.0], [36.0, -100.0]);

        let point = point_at_mile(&geometry, total * 0.75).unwrap();
        assert!((point[0] - 35.75).abs() < 1e-6);
    }

    #[test]
    fn point_at_mile_empty_geometry() {
        assert_eq!(point_at_mile(&[], 10.0), None);
    }
}
