//! Licensed content: assets, the grants that own them, and distributor
//! contacts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AssetId, ContactId, GrantId};

/// A titled piece of content (film) with its licensing terms.
///
/// `remaining_showings` is the countable unit of permitted airing. It is
/// unsigned so it can never go negative; only the schedule engine
/// decrements it, on the transition of a slot to aired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAsset {
    pub id: AssetId,
    pub title: String,
    /// Age rating label, e.g. "12+", "16+".
    pub age_rating: String,
    /// Running time in minutes.
    pub duration_minutes: u32,
    /// Path to the media file on disk.
    pub file_path: String,
    /// Date the showing rights were purchased, if recorded.
    pub purchase_date: Option<NaiveDate>,
    /// Last calendar date the rights are valid. Absent means unexpired.
    pub rights_expiration: Option<NaiveDate>,
    /// Permitted showings left on the license.
    pub remaining_showings: u32,
    /// When the asset record entered the system.
    pub added_at: DateTime<Utc>,
    /// Grant this asset belongs to. An asset always has exactly one owner.
    pub grant_id: GrantId,
}

/// A rights-holder record (studio, distributor) owning zero or more assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseGrant {
    pub id: GrantId,
    /// Name of the rights holder.
    pub name: String,
    pub description: String,
    /// Optional link to the distributor contact handling this grant.
    pub contact_id: Option<ContactId>,
    pub added_at: DateTime<Utc>,
}

/// Contact details of a rights seller or distributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorContact {
    pub id: ContactId,
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub contact_person: String,
    pub notes: String,
}
