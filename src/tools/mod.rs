pub mod base;
pub mod google;
pub mod stub;
pub mod trust;

pub use base::{CommuteLookup, HoursLookup, PlaceSearch, TrustAssessor};
pub use google::{GoogleCommute, GoogleHours, GoogleMapsClient, GooglePlaces};
pub use stub::{StubCommute, StubDirectory, StubHours};
pub use trust::{FixedTrust, RatingTrust};
