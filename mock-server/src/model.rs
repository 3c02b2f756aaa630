//! Wire DTOs served by the mock fundraising API.
//!
//! Defined independently of the client crate so the integration suite
//! notices schema drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub rel: String,
    pub uri: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text_colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_colour: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCodes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code6: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RememberedPerson {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub town: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub date_of_death: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RememberedPersonReference {
    pub relationship: Option<String>,
    pub remembered_person: RememberedPerson,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RememberedPersonSummary {
    pub id: i64,
    pub name: String,
    pub next: Link,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPage {
    #[serde(default)]
    pub page_short_name: String,
    #[serde(default)]
    pub page_title: String,
    pub activity_type: Option<String>,
    pub event_name: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_id: Option<i64>,
    pub charity_id: Option<i64>,
    pub company_appeal_id: Option<i64>,
    pub target_amount: Option<f64>,
    pub attribution: Option<String>,
    pub page_summary_what: Option<String>,
    pub page_summary_why: Option<String>,
    pub theme: Option<Theme>,
    pub custom_codes: Option<CustomCodes>,
    pub remembered_person_reference: Option<RememberedPersonReference>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPageResponse {
    pub page_id: i64,
    pub sign_on_url: String,
    pub next: Link,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub caption: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_url: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub caption: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub images: Vec<Image>,
    pub videos: Vec<Video>,
}

/// Incoming image or video attachment.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMedia {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMediaResponse {
    pub next: Link,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub short_name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPage {
    pub page_id: i64,
    pub page_short_name: String,
    pub page_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_appeal_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    pub story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_summary_what: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_summary_why: Option<String>,
    pub total_raised_online: f64,
    pub grand_total_raised_excluding_gift_aid: f64,
    pub total_raised_sms: String,
    pub currency_code: String,
    pub sms_code: String,
    pub page_creator_name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_codes: Option<CustomCodes>,
    pub media: Media,
    pub teams: Vec<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remembered_person_summary: Option<RememberedPersonSummary>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub page_id: i64,
    pub page_short_name: String,
    pub page_title: String,
    pub page_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    pub raised_amount: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedNames {
    pub names: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryUpdate {
    #[serde(default)]
    pub story_supplement: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUpdate {
    pub id: i64,
    pub message: String,
    pub created_date: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUpdate {
    #[serde(default)]
    pub message: String,
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    #[serde(default)]
    pub attribution: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i64,
    pub amount: f64,
    pub currency_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub donation_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_ref: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_number: u32,
    pub page_size_requested: u32,
    pub page_size_returned: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDonations {
    pub page_short_name: String,
    pub donations: Vec<Donation>,
    pub pagination: Pagination,
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub id: String,
    pub desc: String,
}
