use nalgebra::Point3;

/// Computes the axis-aligned bounding box of a set of points.
///
/// Returns `None` when the iterator is empty.
pub fn bounding_box<'a>(
    points: impl IntoIterator<Item = &'a Point3<f64>>,
) -> Option<(Point3<f64>, Point3<f64>)> {
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    Some(iter.fold((first, first), |(min, max), p| {
        (min.inf(p), max.sup(p))
    }))
}

/// Total length of a polyline through the given points.
pub fn polyline_length(points: &[Point3<f64>]) -> f64 {
    points
        .windows(2)
        .map(|w| nalgebra::distance(&w[0], &w[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn bounding_box_of_empty_set_is_none() {
        let points: Vec<Point3<f64>> = Vec::new();
        assert!(bounding_box(&points).is_none());
    }

    #[test]
    fn bounding_box_of_single_point_is_degenerate() {
        let p = Point3::new(1.0, -2.0, 3.0);
        assert_eq!(bounding_box([&p]), Some((p, p)));
    }

    #[test]
    fn bounding_box_covers_all_points() {
        let points = [
            Point3::new(1.0, 5.0, -1.0),
            Point3::new(-2.0, 0.5, 4.0),
            Point3::new(0.0, -3.0, 2.0),
        ];
        let (min, max) = bounding_box(&points).unwrap();
        assert_eq!(min, Point3::new(-2.0, -3.0, -1.0));
        assert_eq!(max, Point3::new(1.0, 5.0, 4.0));
    }

    #[test]
    fn polyline_length_sums_segments() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(3.0, 4.0, 2.0),
        ];
        assert!((polyline_length(&points) - 7.0).abs() < TOLERANCE);
    }

    #[test]
    fn polyline_length_of_short_inputs_is_zero() {
        assert_eq!(polyline_length(&[]), 0.0);
        assert_eq!(polyline_length(&[Point3::new(1.0, 1.0, 1.0)]), 0.0);
    }
}
