use super::DomainProfile;
use crate::core::types::EnrichedPlace;

pub const HEALTHCARE_TERMS: &[&str] = &[
    "doctor",
    "physician",
    "clinic",
    "hospital",
    "medical",
    "healthcare",
    "health care",
    "urgent care",
    "emergency room",
    "pediatrician",
    "nurse",
];

pub const FACILITY_MARKERS: &[&str] = &["clinic", "hospital"];

const DOCTOR_TERM: &str = "doctor";
const DOCTOR_QUALIFIERS: &str = "physician clinic";
const HEALTHCARE_QUALIFIER: &str = "healthcare";

#[derive(Debug, Default, Clone, Copy)]
pub struct HealthcareDomain;

impl HealthcareDomain {
    pub fn is_facility(place: &EnrichedPlace) -> bool {
        let name = place.name().to_lowercase();
        FACILITY_MARKERS.iter().any(|marker| name.contains(marker))
    }
}

impl DomainProfile for HealthcareDomain {
    fn tag(&self) -> &str {
        "healthcare"
    }

    fn expand(&self, query: &str) -> String {
        if query.to_lowercase().contains(DOCTOR_TERM) {
            format!("{query} {DOCTOR_QUALIFIERS}")
        } else {
            format!("{query} {HEALTHCARE_QUALIFIER}")
        }
    }

    /// Keeps only clinics and hospitals; everything else is dropped.
    fn filter(&self, places: Vec<EnrichedPlace>) -> Vec<EnrichedPlace> {
        places.into_iter().filter(Self::is_facility).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Place;

    fn named(names: &[&str]) -> Vec<EnrichedPlace> {
        names
            .iter()
            .map(|n| EnrichedPlace::new(Place::new(*n, "", None), "", None, ""))
            .collect()
    }

    #[test]
    fn test_expand_doctor_adds_role_synonyms() {
        assert_eq!(HealthcareDomain.expand("find a Doctor"), "find a Doctor physician clinic");
    }

    #[test]
    fn test_expand_without_doctor_adds_generic_qualifier() {
        assert_eq!(HealthcareDomain.expand("urgent care"), "urgent care healthcare");
    }

    #[test]
    fn test_filter_keeps_only_facilities() {
        let kept = HealthcareDomain.filter(named(&[
            "Riverside CLINIC",
            "Corner Pharmacy",
            "St. Mary's Hospital",
            "Dr. Smith",
            "",
        ]));
        let names: Vec<&str> = kept.iter().map(EnrichedPlace::name).collect();
        assert_eq!(names, vec!["Riverside CLINIC", "St. Mary's Hospital"]);
        assert!(kept.iter().all(HealthcareDomain::is_facility));
    }

    #[test]
    fn test_filter_preserves_order_and_entries() {
        let input = named(&["B Hospital", "A Clinic"]);
        assert_eq!(HealthcareDomain.filter(input.clone()), input);
    }

    #[test]
    fn test_postprocess_passes_through() {
        let input = named(&["B Hospital", "A Clinic"]);
        assert_eq!(HealthcareDomain.postprocess(input.clone()), input);
    }
}
