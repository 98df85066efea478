//! Response models for the DVSA token and vehicle-history endpoints.
//!
//! All structs derive `Deserialize` matching the camelCase JSON of the MOT
//! history API. Fields the tool does not consume are simply not modeled;
//! serde ignores unknown fields by default.

use serde::Deserialize;

/// Body returned by the OAuth token endpoint on a successful
/// client-credentials exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The bearer token to present on vehicle-history calls.
    pub access_token: String,
    /// Token lifetime in seconds, as reported by the endpoint.
    pub expires_in: i64,
}

/// Vehicle record returned by `GET <base>/<registration>`.
///
/// Every field is optional at the wire level: which ones are present
/// determines how the resolver interprets the record (tested vehicle,
/// newly registered vehicle, or no information at all).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleHistory {
    /// Past MOT tests, newest not guaranteed first.
    pub mot_tests: Vec<MotTest>,
    /// First MOT due date for vehicles that have never been tested.
    pub mot_test_due_date: Option<String>,
    /// Date of first registration, present for brand-new vehicles.
    pub registration_date: Option<String>,
}

/// A single MOT test record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotTest {
    /// ISO date-time the test was completed. Zero-padded, so string
    /// ordering matches chronological ordering.
    pub completed_date: Option<String>,
    /// ISO date-time the resulting certificate expires, absent for fails.
    pub expiry_date: Option<String>,
}
