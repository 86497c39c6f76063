use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::core::types::EnrichedPlace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RelaxDecision {
    Relax,
    End,
}

/// Relax only while nothing survived filtering and retries remain.
pub fn decide_relax(filtered: &[EnrichedPlace], relax_count: u32, max_relax: u32) -> RelaxDecision {
    if filtered.is_empty() && relax_count < max_relax {
        RelaxDecision::Relax
    } else {
        RelaxDecision::End
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Place;

    #[test]
    fn test_empty_with_retries_left_relaxes() {
        assert_eq!(decide_relax(&[], 0, 3), RelaxDecision::Relax);
        assert_eq!(decide_relax(&[], 2, 3), RelaxDecision::Relax);
    }

    #[test]
    fn test_empty_with_retries_exhausted_ends() {
        assert_eq!(decide_relax(&[], 3, 3), RelaxDecision::End);
        assert_eq!(decide_relax(&[], 0, 0), RelaxDecision::End);
    }

    #[test]
    fn test_non_empty_ends() {
        let one = [EnrichedPlace::new(Place::new("x", "", None), "", None, "")];
        assert_eq!(decide_relax(&one, 0, 3), RelaxDecision::End);
    }
}
