use super::DomainProfile;

pub const PROXIMITY_QUALIFIER: &str = "near me";

/// Appends a proximity qualifier. Filter and postprocess pass through.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDomain;

impl DomainProfile for GenericDomain {
    fn tag(&self) -> &str {
        "generic"
    }

    fn expand(&self, query: &str) -> String {
        format!("{query} {PROXIMITY_QUALIFIER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EnrichedPlace, Place};

    #[test]
    fn test_expand_appends_proximity() {
        assert_eq!(GenericDomain.expand("dentist"), "dentist near me");
    }

    #[test]
    fn test_filter_and_postprocess_pass_through() {
        let places = vec![
            EnrichedPlace::new(Place::new("B", "", Some(2.0)), "", None, ""),
            EnrichedPlace::new(Place::new("A", "", Some(1.0)), "", Some(0.3), ""),
        ];
        assert_eq!(GenericDomain.filter(places.clone()), places);
        assert_eq!(GenericDomain.postprocess(places.clone()), places);
    }
}
