use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::types::Place;
use crate::tools::base::TrustAssessor;

/// Review count at which volume stops damping the rating.
const SATURATION_REVIEWS: f64 = 100.0;
const MAX_RATING: f64 = 5.0;

/// Rating scaled to [0, 1], damped for places with few reviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct RatingTrust;

impl RatingTrust {
    pub fn score(place: &Place) -> f64 {
        let Some(rating) = place.rating else {
            return 0.0;
        };
        let reviews = f64::from(place.user_ratings_total.unwrap_or(0));
        let volume = ((1.0 + reviews).ln() / (1.0 + SATURATION_REVIEWS).ln()).min(1.0);
        ((rating / MAX_RATING) * volume).clamp(0.0, 1.0)
    }
}

#[async_trait]
impl TrustAssessor for RatingTrust {
    async fn trust(&self, place: &Place) -> Result<f64> {
        Ok(Self::score(place))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedTrust(f64);

impl FixedTrust {
    pub fn new(score: f64) -> Self {
        Self(score.clamp(0.0, 1.0) + 0.0)
    }
}

impl Default for FixedTrust {
    fn default() -> Self {
        Self::new(0.8)
    }
}

#[async_trait]
impl TrustAssessor for FixedTrust {
    async fn trust(&self, _place: &Place) -> Result<f64> {
        Ok(self.0)
    }
}
