//! Unit tests for sn-geometry.

#[cfg(test)]
mod construction {
    use geo::Coord;
    use sn_core::Metric;

    use crate::{GeoAdapter, GeometryAdapter, GeometryError};

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn point_from_pair() {
        let p = GeoAdapter::default().make_point(&[3.0, 4.0]).unwrap();
        assert_eq!((p.x(), p.y()), (3.0, 4.0));
    }

    #[test]
    fn wrong_dimension_rejected() {
        let g = GeoAdapter::default();
        assert_eq!(
            g.make_point(&[1.0, 2.0, 3.0]),
            Err(GeometryError::Dimension { expected: 2, got: 3 })
        );
        assert_eq!(
            g.make_point(&[1.0]),
            Err(GeometryError::Dimension { expected: 2, got: 1 })
        );
    }

    #[test]
    fn non_finite_rejected() {
        let g = GeoAdapter::new(Metric::Haversine);
        assert!(matches!(
            g.make_point(&[0.0, f64::INFINITY]),
            Err(GeometryError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn path_needs_two_points() {
        let g = GeoAdapter::default();
        assert_eq!(g.make_path(&[c(0.0, 0.0)]), Err(GeometryError::TooFewPoints(1)));
        assert!(g.make_path(&[c(0.0, 0.0), c(1.0, 1.0), c(2.0, 0.0)]).is_ok());
    }

    #[test]
    fn path_rejects_nan() {
        let g = GeoAdapter::default();
        let err = g.make_path(&[c(0.0, 0.0), c(f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, GeometryError::NonFinite { index: 0, .. }));
    }

    #[test]
    fn make_line_is_two_point() {
        let line = GeoAdapter::default().make_line(c(0.0, 0.0), c(1.0, 2.0));
        assert_eq!(line.0, vec![c(0.0, 0.0), c(1.0, 2.0)]);
    }
}

#[cfg(test)]
mod length {
    use approx::assert_relative_eq;
    use geo::Coord;
    use sn_core::Metric;

    use crate::{GeoAdapter, GeometryAdapter, MAX_HAVERSINE_M, haversine_m};

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn euclidean_three_four_five() {
        let g = GeoAdapter::default();
        assert_relative_eq!(g.flying_distance(c(0.0, 0.0), c(3.0, 4.0)), 5.0);
    }

    #[test]
    fn multi_segment_length_is_sum() {
        let g = GeoAdapter::default();
        let path = g.make_path(&[c(0.0, 0.0), c(3.0, 0.0), c(3.0, 4.0)]).unwrap();
        assert_relative_eq!(g.length(&path), 7.0);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111.2 km
        let d = haversine_m(c(-88.0, 30.0), c(-88.0, 31.0));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn antipodes_are_half_a_great_circle() {
        let d = haversine_m(c(0.0, 0.0), c(180.0, 0.0));
        assert_relative_eq!(d, MAX_HAVERSINE_M, max_relative = 1e-12);

        let d = haversine_m(c(-88.04, 30.69), c(91.96, -30.69));
        assert!(d.is_finite() && d <= MAX_HAVERSINE_M, "got {d}");
    }

    #[test]
    fn haversine_adapter_sums_segments() {
        let g = GeoAdapter::new(Metric::Haversine);
        let a = c(-88.0, 30.0);
        let b = c(-88.0, 30.5);
        let d = c(-88.0, 31.0);
        let path = g.make_path(&[a, b, d]).unwrap();
        assert_relative_eq!(g.length(&path), haversine_m(a, d), max_relative = 1e-9);
    }

    #[test]
    fn endpoint_gap_is_coordinate_distance() {
        let g = GeoAdapter::new(Metric::Haversine);
        assert_relative_eq!(g.endpoint_gap(c(0.0, 0.0), c(0.0, 0.5)), 0.5);
    }
}

#[cfg(test)]
mod intersection {
    use geo::{Coord, LineString};

    use crate::{GeoAdapter, GeometryAdapter};

    fn line(points: &[(f64, f64)]) -> LineString<f64> {
        LineString::new(points.iter().map(|&(x, y)| Coord { x, y }).collect())
    }

    #[test]
    fn x_shape_crosses() {
        let g = GeoAdapter::default();
        let a = line(&[(0.0, 0.0), (2.0, 2.0)]);
        let b = line(&[(0.0, 2.0), (2.0, 0.0)]);
        assert!(g.intersects(&a, &b));
        assert!(g.crosses(&a, &b));
    }

    #[test]
    fn shared_end_point_does_not_cross() {
        let g = GeoAdapter::default();
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (1.0, 1.0)]);
        assert!(g.intersects(&a, &b));
        assert!(!g.crosses(&a, &b));
    }

    #[test]
    fn t_junction_crosses() {
        let g = GeoAdapter::default();
        let a = line(&[(0.0, 0.0), (2.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (1.0, 1.0)]);
        assert!(g.crosses(&a, &b));
    }

    #[test]
    fn collinear_overlap_crosses() {
        let g = GeoAdapter::default();
        let a = line(&[(0.0, 0.0), (2.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (3.0, 0.0)]);
        assert!(g.crosses(&a, &b));
    }

    #[test]
    fn disjoint_lines() {
        let g = GeoAdapter::default();
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(0.0, 1.0), (1.0, 1.0)]);
        assert!(!g.intersects(&a, &b));
        assert!(!g.crosses(&a, &b));
    }
}

#[cfg(test)]
mod properties {
    use geo::Coord;
    use proptest::prelude::*;
    use sn_core::Metric;

    use crate::{GeoAdapter, GeometryAdapter, MAX_HAVERSINE_M, haversine_m};

    fn coord() -> impl Strategy<Value = Coord<f64>> {
        (-1_000.0..1_000.0f64, -80.0..80.0f64).prop_map(|(x, y)| Coord { x, y })
    }

    fn lon_lat() -> impl Strategy<Value = Coord<f64>> {
        (-180.0..180.0f64, -90.0..=90.0f64).prop_map(|(x, y)| Coord { x, y })
    }

    proptest! {
        #[test]
        fn flying_distance_to_self_is_zero(a in coord()) {
            for metric in [Metric::Euclidean, Metric::Haversine] {
                prop_assert_eq!(GeoAdapter::new(metric).flying_distance(a, a), 0.0);
            }
        }

        #[test]
        fn flying_distance_is_symmetric(a in coord(), b in coord()) {
            let g = GeoAdapter::default();
            let ab = g.flying_distance(a, b);
            let ba = g.flying_distance(b, a);
            prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
            prop_assert!(ab >= 0.0);
        }

        #[test]
        fn haversine_is_finite_up_to_the_antipode(a in lon_lat(), nudge in -1e-6..1e-6f64) {
            let antipode = Coord { x: a.x + 180.0 + nudge, y: -a.y };
            let g = GeoAdapter::new(Metric::Haversine);
            for b in [antipode, Coord { x: antipode.x, y: (antipode.y + nudge).clamp(-90.0, 90.0) }] {
                let d = haversine_m(a, b);
                prop_assert!(d.is_finite(), "{a:?} -> {b:?} gave {d}");
                prop_assert!((0.0..=MAX_HAVERSINE_M).contains(&d));
                prop_assert!(g.flying_distance(a, b).is_finite());
            }
        }
    }
}
