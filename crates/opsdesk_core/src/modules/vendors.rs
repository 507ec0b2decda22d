//! Vendor management module.
//!
//! New vendors enter as `Under Review` with a 5.0 rating until procurement
//! reviews them.

use crate::metrics::{average, count_where, percentage};
use crate::model::id::IdStrategy;
use crate::model::module::{require_text, RecordModule, ValidationError};
use serde::{Deserialize, Serialize};

const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorStatus {
    Active,
    #[serde(rename = "Under Review")]
    UnderReview,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub category: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    /// 0.0 to 5.0.
    pub rating: f64,
    pub status: VendorStatus,
    pub total_orders: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorDraft {
    pub name: String,
    pub category: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

pub struct Vendors;

impl RecordModule for Vendors {
    type Record = Vendor;
    type Draft = VendorDraft;

    const NAME: &'static str = "vendor";
    const STORE_KEY: &'static str = "vendors.vendors";
    const ID_STRATEGY: IdStrategy = IdStrategy::Sequential {
        prefix: "VEN",
        width: 4,
    };

    fn record_id(record: &Vendor) -> &str {
        &record.id
    }

    fn seed() -> Vec<Vendor> {
        vec![
            seed_vendor(
                "VEN-0001",
                "Shree Packaging Co.",
                "Packaging",
                "Manoj Gupta",
                4.6,
                VendorStatus::Active,
                128,
            ),
            seed_vendor(
                "VEN-0002",
                "Apex Electronics",
                "Electronics",
                "Sunita Rao",
                4.2,
                VendorStatus::Active,
                76,
            ),
            seed_vendor(
                "VEN-0003",
                "GreenLeaf Logistics",
                "Logistics",
                "Imran Khan",
                3.8,
                VendorStatus::Inactive,
                41,
            ),
            seed_vendor(
                "VEN-0004",
                "Metro Office Supplies",
                "Office Supplies",
                "Kavita Joshi",
                5.0,
                VendorStatus::UnderReview,
                0,
            ),
        ]
    }

    fn search_fields(record: &Vendor) -> Vec<&str> {
        vec![&record.name, &record.category, &record.contact_person]
    }

    fn validate_draft(draft: &VendorDraft) -> Result<(), ValidationError> {
        require_text("name", &draft.name)?;
        require_text("category", &draft.category)?;
        require_text("contact_person", &draft.contact_person)?;
        require_text("email", &draft.email)
    }

    fn validate_record(record: &Vendor) -> Result<(), ValidationError> {
        require_text("name", &record.name)?;
        require_text("category", &record.category)?;
        if !(0.0..=MAX_RATING).contains(&record.rating) {
            return Err(ValidationError::InvalidValue {
                field: "rating",
                message: format!("expected 0.0 to {MAX_RATING}, got {}", record.rating),
            });
        }
        Ok(())
    }

    fn build_record(id: String, draft: VendorDraft) -> Vendor {
        Vendor {
            id,
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            contact_person: draft.contact_person.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            rating: MAX_RATING,
            status: VendorStatus::UnderReview,
            total_orders: 0,
        }
    }
}

fn seed_vendor(
    id: &str,
    name: &str,
    category: &str,
    contact_person: &str,
    rating: f64,
    status: VendorStatus,
    total_orders: u32,
) -> Vendor {
    let slug = name
        .to_ascii_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>();
    Vendor {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        contact_person: contact_person.to_string(),
        email: format!("sales@{slug}.in"),
        phone: "+91 98765 43210".to_string(),
        rating,
        status,
        total_orders,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorSummary {
    pub total_vendors: usize,
    pub active: usize,
    pub under_review: usize,
    pub average_rating: f64,
    /// Share of vendors that are active, in percent.
    pub active_share: f64,
}

pub fn summarize(vendors: &[Vendor]) -> VendorSummary {
    let active = count_where(vendors, |vendor| vendor.status == VendorStatus::Active);
    VendorSummary {
        total_vendors: vendors.len(),
        active,
        under_review: count_where(vendors, |vendor| {
            vendor.status == VendorStatus::UnderReview
        }),
        average_rating: average(vendors, |vendor| vendor.rating),
        active_share: percentage(active as f64, vendors.len() as f64),
    }
}
