//! CRM marketing campaigns module.
//!
//! Campaign ids are `CMP-<uuid>`; seed campaigns keep their legacy numeric ids.

use crate::metrics::{count_where, percentage, sum};
use crate::model::id::IdStrategy;
use crate::model::module::{
    require_non_negative, require_text, RecordModule, StatusToggle, ValidationError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    /// Email, SMS, Social, Search, ...
    pub channel: String,
    pub budget: f64,
    pub spent: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub leads: u32,
    pub status: CampaignStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    pub name: String,
    pub channel: String,
    pub budget: f64,
}

pub struct Campaigns;

impl RecordModule for Campaigns {
    type Record = Campaign;
    type Draft = CampaignDraft;

    const NAME: &'static str = "campaign";
    const STORE_KEY: &'static str = "crm.campaigns";
    const PAGE_SIZE: usize = 6;
    const ID_STRATEGY: IdStrategy = IdStrategy::PrefixedUuid { prefix: "CMP" };

    fn record_id(record: &Campaign) -> &str {
        &record.id
    }

    fn seed() -> Vec<Campaign> {
        vec![
            Campaign {
                id: "CMP-1001".to_string(),
                name: "Diwali Mega Sale".to_string(),
                channel: "Email".to_string(),
                budget: 150_000.0,
                spent: 98_500.0,
                impressions: 420_000,
                clicks: 12_600,
                leads: 940,
                status: CampaignStatus::Active,
            },
            Campaign {
                id: "CMP-1002".to_string(),
                name: "Monsoon Clearance".to_string(),
                channel: "Social".to_string(),
                budget: 80_000.0,
                spent: 80_000.0,
                impressions: 310_000,
                clicks: 6_200,
                leads: 410,
                status: CampaignStatus::Completed,
            },
            Campaign {
                id: "CMP-1003".to_string(),
                name: "New Year Loyalty".to_string(),
                channel: "SMS".to_string(),
                budget: 40_000.0,
                spent: 12_000.0,
                impressions: 90_000,
                clicks: 1_800,
                leads: 150,
                status: CampaignStatus::Paused,
            },
        ]
    }

    fn search_fields(record: &Campaign) -> Vec<&str> {
        vec![&record.name, &record.channel]
    }

    fn validate_draft(draft: &CampaignDraft) -> Result<(), ValidationError> {
        require_text("name", &draft.name)?;
        require_text("channel", &draft.channel)?;
        require_non_negative("budget", draft.budget)
    }

    fn validate_record(record: &Campaign) -> Result<(), ValidationError> {
        require_text("name", &record.name)?;
        require_non_negative("budget", record.budget)?;
        require_non_negative("spent", record.spent)
    }

    fn build_record(id: String, draft: CampaignDraft) -> Campaign {
        Campaign {
            id,
            name: draft.name.trim().to_string(),
            channel: draft.channel.trim().to_string(),
            budget: draft.budget,
            spent: 0.0,
            impressions: 0,
            clicks: 0,
            leads: 0,
            status: CampaignStatus::Active,
        }
    }
}

impl StatusToggle for Campaigns {
    fn toggle_status(record: &mut Campaign) -> bool {
        record.status = match record.status {
            CampaignStatus::Active => CampaignStatus::Paused,
            CampaignStatus::Paused => CampaignStatus::Active,
            CampaignStatus::Completed => return false,
        };
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignSummary {
    pub total_campaigns: usize,
    pub active: usize,
    pub total_spend: f64,
    pub total_leads: u64,
    /// Clicks per impression, in percent.
    pub click_through_rate: f64,
}

pub fn summarize(campaigns: &[Campaign]) -> CampaignSummary {
    let impressions = sum(campaigns, |campaign| campaign.impressions as f64);
    let clicks = sum(campaigns, |campaign| campaign.clicks as f64);
    CampaignSummary {
        total_campaigns: campaigns.len(),
        active: count_where(campaigns, |campaign| {
            campaign.status == CampaignStatus::Active
        }),
        total_spend: sum(campaigns, |campaign| campaign.spent),
        total_leads: campaigns
            .iter()
            .map(|campaign| u64::from(campaign.leads))
            .sum(),
        click_through_rate: percentage(clicks, impressions),
    }
}
