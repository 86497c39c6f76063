use std::cmp::Ordering;

use crate::core::types::EnrichedPlace;

// Adding 0.0 folds -0.0 into 0.0 so `total_cmp` agrees with numeric equality.
fn trust_of(place: &EnrichedPlace) -> f64 {
    place.trust_score.unwrap_or(0.0) + 0.0
}

fn distance_of(place: &EnrichedPlace) -> f64 {
    place.distance().unwrap_or(f64::INFINITY) + 0.0
}

/// Orders by `(-trust, distance)`: higher trust first, then closer first.
pub fn compare_places(a: &EnrichedPlace, b: &EnrichedPlace) -> Ordering {
    trust_of(b)
        .total_cmp(&trust_of(a))
        .then_with(|| distance_of(a).total_cmp(&distance_of(b)))
}

/// Stable: places with equal keys keep their input order.
pub fn rank_places(mut places: Vec<EnrichedPlace>) -> Vec<EnrichedPlace> {
    places.sort_by(compare_places);
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Place;

    fn place(name: &str, trust: Option<f64>, distance: Option<f64>) -> EnrichedPlace {
        EnrichedPlace::new(Place::new(name, "", distance), "", trust, "")
    }

    fn names(places: &[EnrichedPlace]) -> Vec<&str> {
        places.iter().map(EnrichedPlace::name).collect()
    }

    #[test]
    fn test_rank_by_trust() {
        let ranked = rank_places(vec![
            place("A", Some(0.5), Some(10.0)),
            place("B", Some(0.9), Some(5.0)),
            place("C", Some(0.2), Some(1.0)),
        ]);
        assert_eq!(names(&ranked), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_distance_breaks_ties() {
        let ranked = rank_places(vec![
            place("far", Some(0.7), Some(8.0)),
            place("near", Some(0.7), Some(2.0)),
            place("unknown", Some(0.7), None),
        ]);
        assert_eq!(names(&ranked), vec!["near", "far", "unknown"]);
    }

    #[test]
    fn test_missing_trust_sorts_as_zero() {
        let ranked = rank_places(vec![place("none", None, Some(1.0)), place("low", Some(0.1), Some(9.0))]);
        assert_eq!(names(&ranked), vec!["low", "none"]);

        let ranked = rank_places(vec![place("zero", Some(0.0), Some(3.0)), place("none", None, Some(1.0))]);
        assert_eq!(names(&ranked), vec!["none", "zero"]);
    }

    #[test]
    fn test_negative_zero_trust_ties_by_distance() {
        let ranked = rank_places(vec![place("far", None, Some(9.0)), place("near", Some(-0.0), Some(1.0))]);
        assert_eq!(names(&ranked), vec!["near", "far"]);

        let ranked = rank_places(vec![place("far", Some(0.0), Some(9.0)), place("near", Some(-0.0), Some(1.0))]);
        assert_eq!(names(&ranked), vec!["near", "far"]);
    }

    #[test]
    fn test_negative_zero_distance_keeps_input_order() {
        let ranked = rank_places(vec![
            place("first", Some(0.5), Some(0.0)),
            place("second", Some(0.5), Some(-0.0)),
        ]);
        assert_eq!(names(&ranked), vec!["first", "second"]);
    }

    #[test]
    fn test_stable_on_equal_keys() {
        let ranked = rank_places(vec![
            place("first", Some(0.5), None),
            place("second", Some(0.5), None),
            place("top", Some(0.6), None),
            place("third", Some(0.5), None),
        ]);
        assert_eq!(names(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_output_is_ordered_permutation() {
        let input = vec![
            place("a", Some(0.3), Some(4.0)),
            place("b", None, None),
            place("c", Some(0.9), Some(7.0)),
            place("d", Some(0.3), Some(1.0)),
            place("e", Some(0.9), None),
        ];
        let ranked = rank_places(input.clone());

        assert_eq!(ranked.len(), input.len());
        for p in &input {
            assert!(ranked.contains(p));
        }
        for pair in ranked.windows(2) {
            let (x, y) = (&pair[0], &pair[1]);
            assert!(
                trust_of(x) > trust_of(y) || (trust_of(x) == trust_of(y) && distance_of(x) <= distance_of(y))
            );
        }
    }
}
