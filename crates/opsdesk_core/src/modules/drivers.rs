//! Fleet drivers module.

use crate::metrics::{average, count_where};
use crate::model::id::IdStrategy;
use crate::model::module::{require_text, RecordModule, StatusToggle, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverStatus {
    Available,
    #[serde(rename = "On Trip")]
    OnTrip,
    #[serde(rename = "Off Duty")]
    OffDuty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub license_number: String,
    /// Registration plate of the assigned vehicle, empty when unassigned.
    pub vehicle: String,
    pub status: DriverStatus,
    pub trips_completed: u32,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverDraft {
    pub name: String,
    pub phone: String,
    pub license_number: String,
    pub vehicle: String,
}

pub struct Drivers;

impl RecordModule for Drivers {
    type Record = Driver;
    type Draft = DriverDraft;

    const NAME: &'static str = "driver";
    const STORE_KEY: &'static str = "fleet.drivers";
    const ID_STRATEGY: IdStrategy = IdStrategy::Sequential {
        prefix: "DRV",
        width: 3,
    };

    fn record_id(record: &Driver) -> &str {
        &record.id
    }

    fn seed() -> Vec<Driver> {
        vec![
            seed_driver(
                "DRV-101",
                "Suresh Yadav",
                "MH12 20190004521",
                "MH-12-AB-4521",
                DriverStatus::Available,
                1_284,
                4.8,
            ),
            seed_driver(
                "DRV-102",
                "Ramesh Patil",
                "MH14 20170009876",
                "MH-14-CD-9876",
                DriverStatus::OnTrip,
                962,
                4.5,
            ),
            seed_driver(
                "DRV-103",
                "Farhan Ali",
                "DL03 20200001122",
                "",
                DriverStatus::OffDuty,
                311,
                4.1,
            ),
        ]
    }

    fn search_fields(record: &Driver) -> Vec<&str> {
        vec![&record.name, &record.license_number, &record.vehicle]
    }

    fn validate_draft(draft: &DriverDraft) -> Result<(), ValidationError> {
        require_text("name", &draft.name)?;
        require_text("phone", &draft.phone)?;
        require_text("license_number", &draft.license_number)
    }

    fn validate_record(record: &Driver) -> Result<(), ValidationError> {
        require_text("name", &record.name)?;
        require_text("license_number", &record.license_number)
    }

    fn build_record(id: String, draft: DriverDraft) -> Driver {
        Driver {
            id,
            name: draft.name.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            license_number: draft.license_number.trim().to_ascii_uppercase(),
            vehicle: draft.vehicle.trim().to_string(),
            status: DriverStatus::Available,
            trips_completed: 0,
            rating: 5.0,
        }
    }
}

impl StatusToggle for Drivers {
    /// Drivers on a trip cannot be toggled until the trip is closed.
    fn toggle_status(record: &mut Driver) -> bool {
        record.status = match record.status {
            DriverStatus::Available => DriverStatus::OffDuty,
            DriverStatus::OffDuty => DriverStatus::Available,
            DriverStatus::OnTrip => return false,
        };
        true
    }
}

fn seed_driver(
    id: &str,
    name: &str,
    license_number: &str,
    vehicle: &str,
    status: DriverStatus,
    trips_completed: u32,
    rating: f64,
) -> Driver {
    Driver {
        id: id.to_string(),
        name: name.to_string(),
        phone: "+91 90000 00000".to_string(),
        license_number: license_number.to_string(),
        vehicle: vehicle.to_string(),
        status,
        trips_completed,
        rating,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverSummary {
    pub total_drivers: usize,
    pub available: usize,
    pub on_trip: usize,
    pub average_rating: f64,
    pub total_trips: u64,
}

pub fn summarize(drivers: &[Driver]) -> DriverSummary {
    DriverSummary {
        total_drivers: drivers.len(),
        available: count_where(drivers, |driver| driver.status == DriverStatus::Available),
        on_trip: count_where(drivers, |driver| driver.status == DriverStatus::OnTrip),
        average_rating: average(drivers, |driver| driver.rating),
        total_trips: drivers
            .iter()
            .map(|driver| u64::from(driver.trips_completed))
            .sum(),
    }
}
