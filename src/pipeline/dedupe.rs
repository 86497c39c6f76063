use std::collections::HashSet;

use crate::core::types::EnrichedPlace;

/// Keeps the first occurrence of each identity key, in input order.
/// Places without a key never match each other and are all kept.
pub fn dedupe_places(places: Vec<EnrichedPlace>) -> Vec<EnrichedPlace> {
    let mut seen: HashSet<String> = HashSet::with_capacity(places.len());
    places
        .into_iter()
        .filter(|place| match place.identity_key() {
            Some(key) => seen.insert(key.to_string()),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Place;

    fn place(name: &str, address: &str) -> EnrichedPlace {
        EnrichedPlace::new(Place::new(name, address, None), "", None, "")
    }

    fn names(places: &[EnrichedPlace]) -> Vec<&str> {
        places.iter().map(EnrichedPlace::name).collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let unique = dedupe_places(vec![place("A", "X"), place("B", "Y"), place("A", "Z")]);
        assert_eq!(names(&unique), vec!["A", "B"]);
        assert_eq!(unique[0].place.address, "X");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let unique = dedupe_places(vec![place("Cafe", ""), place("cafe", ""), place("Cafe", "")]);
        assert_eq!(names(&unique), vec!["Cafe", "cafe"]);
    }

    #[test]
    fn test_unnamed_places_are_all_kept() {
        let unique = dedupe_places(vec![place("", "1"), place("A", ""), place("", "2"), place("A", "")]);
        assert_eq!(unique.len(), 3);
        assert_eq!(unique[0].place.address, "1");
        assert_eq!(unique[2].place.address, "2");
    }

    #[test]
    fn test_deduped_list_is_fixed_point() {
        let once = dedupe_places(vec![place("A", ""), place("B", ""), place("A", ""), place("C", "")]);
        let twice = dedupe_places(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe_places(Vec::new()).is_empty());
    }
}
