//! Per-registration MOT status resolution.
//!
//! [`MotResolver`] normalizes a registration number, obtains a bearer token,
//! queries the vehicle-history API and interprets the response into a
//! [`MotStatus`]. The interpretation follows a fixed precedence: latest MOT
//! test expiry, then the first-test due date, then a 3-year estimate from the
//! registration date, then "no info". Every outcome — including failures —
//! renders to a single display string, so the pipeline can treat a row's
//! result as ordinary data.

use std::fmt;

use chrono::NaiveDate;

use crate::dvsa::{DvsaError, TokenSource, VehicleHistory, VehicleLookup};

/// Flat 3-year offset used to estimate the first MOT due date for vehicles
/// that only have a registration date. Deliberately ignores leap years.
const NEW_VEHICLE_DUE_OFFSET_DAYS: i64 = 3 * 365;

/// Outcome of resolving one registration number.
///
/// The variants exist for testability; callers render them with `Display`
/// and write the string into the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotStatus {
    /// Expiry date of the latest MOT test, as `DD/MM/YYYY` (or the raw
    /// upstream string when it failed to parse).
    Expiry(String),
    /// First MOT due date for an untested vehicle, same formatting rule.
    Due(String),
    /// Estimated first due date derived from the registration date.
    NewVehicleEstimate(String),
    /// Brand-new vehicle whose registration date could not be parsed.
    NewVehicleRegisteredOnly(String),
    /// Latest test carries no expiry date field.
    NoExpiryDate,
    /// Record exists but has none of the expected fields.
    NoInfo,
    /// HTTP 404 — the registration is unknown upstream.
    NotFound,
    /// Any other upstream HTTP status.
    HttpError(u16),
    /// Transport failure or malformed response body.
    RequestFailure,
    /// No bearer token could be obtained.
    NoToken,
    /// The cell held no registration number at all.
    MissingRegistration,
}

impl MotStatus {
    /// True for outcomes that indicate something went wrong with the call
    /// itself, as opposed to a vehicle-level answer. Used only to pick the
    /// output color in the terminal UI.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            MotStatus::HttpError(_) | MotStatus::RequestFailure | MotStatus::NoToken
        )
    }
}

impl fmt::Display for MotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotStatus::Expiry(date) | MotStatus::Due(date) => write!(f, "{date}"),
            MotStatus::NewVehicleEstimate(date) => write!(f, "New - Due: {date}"),
            MotStatus::NewVehicleRegisteredOnly(raw) => write!(f, "New - Reg date: {raw}"),
            MotStatus::NoExpiryDate => write!(f, "No MOT expiry date found"),
            MotStatus::NoInfo => write!(f, "No MOT info"),
            MotStatus::NotFound => write!(f, "Vehicle not found"),
            MotStatus::HttpError(status) => write!(f, "Error: {status}"),
            MotStatus::RequestFailure => write!(f, "Error during request"),
            MotStatus::NoToken => write!(f, "Error: No token"),
            MotStatus::MissingRegistration => write!(f, "No registration number"),
        }
    }
}

/// Anything the pipeline can ask for a per-registration status.
/// Implemented by [`MotResolver`]; pipeline tests substitute canned
/// implementations.
#[allow(async_fn_in_trait)]
pub trait StatusResolver {
    async fn resolve(&self, registration: &str) -> MotStatus;
}

/// Resolves registration numbers against the MOT history API.
pub struct MotResolver<T, L> {
    tokens: T,
    lookup: L,
}

impl<T: TokenSource, L: VehicleLookup> MotResolver<T, L> {
    pub fn new(tokens: T, lookup: L) -> Self {
        Self { tokens, lookup }
    }
}

impl<T: TokenSource, L: VehicleLookup> StatusResolver for MotResolver<T, L> {
    async fn resolve(&self, registration: &str) -> MotStatus {
        // Plates are often entered with a visual gap ("AB12 CDE").
        let normalized = registration.trim().replace(' ', "");
        if normalized.is_empty() {
            return MotStatus::MissingRegistration;
        }

        let token = match self.tokens.bearer_token().await {
            Ok(token) => token,
            Err(_) => return MotStatus::NoToken,
        };

        match self.lookup.fetch(&normalized, &token).await {
            Ok(history) => interpret(&history),
            Err(DvsaError::NotFound) => MotStatus::NotFound,
            Err(DvsaError::Api { status }) => MotStatus::HttpError(status),
            Err(DvsaError::Network(_)) => MotStatus::RequestFailure,
        }
    }
}

/// Map a vehicle record to a status. First match wins:
/// MOT tests, then due date, then registration date, then nothing.
fn interpret(history: &VehicleHistory) -> MotStatus {
    // None sorts before Some, so a test without a completedDate never
    // outranks a dated one.
    if let Some(latest) = history
        .mot_tests
        .iter()
        .max_by(|a, b| a.completed_date.cmp(&b.completed_date))
    {
        return match latest.expiry_date.as_deref() {
            Some(expiry) => MotStatus::Expiry(reformat_iso_date(expiry)),
            None => MotStatus::NoExpiryDate,
        };
    }

    if let Some(due) = history
        .mot_test_due_date
        .as_deref()
        .filter(|s| !s.is_empty())
    {
        return MotStatus::Due(reformat_iso_date(due));
    }

    if let Some(registered) = history
        .registration_date
        .as_deref()
        .filter(|s| !s.is_empty())
    {
        return estimate_first_due(registered);
    }

    MotStatus::NoInfo
}

/// Reformat the date portion of an ISO date-time as `DD/MM/YYYY`,
/// returning the raw date portion unchanged when it does not parse.
fn reformat_iso_date(raw: &str) -> String {
    let date_part = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => date_part.to_string(),
    }
}

/// Estimate the first MOT due date for a vehicle that only has a
/// registration date.
fn estimate_first_due(raw: &str) -> MotStatus {
    let date_part = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(registered) => {
            let due = registered + chrono::Duration::days(NEW_VEHICLE_DUE_OFFSET_DAYS);
            MotStatus::NewVehicleEstimate(due.format("%d/%m/%Y").to_string())
        }
        Err(_) => MotStatus::NewVehicleRegisteredOnly(date_part.to_string()),
    }
}
