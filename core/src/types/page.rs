//! Page registration and retrieval payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::{FundraisingPageImage, FundraisingPageVideo};
use super::remember::{RememberedPersonReference, RememberedPersonSummary};
use crate::error::ApiError;

/// Hypermedia link returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default)]
    pub rel: String,
    #[serde(default)]
    pub uri: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// What the page is raising money for.
///
/// Carried as its name on the wire so both formats see plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ActivityType {
    OtherCelebration,
    InMemory,
    Birthday,
    Wedding,
    Christening,
    Anniversary,
    OtherPersonalChallenge,
    Running,
    Cycling,
    Swimming,
    Walking,
    Trekking,
    Triathlon,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::OtherCelebration => "OtherCelebration",
            ActivityType::InMemory => "InMemory",
            ActivityType::Birthday => "Birthday",
            ActivityType::Wedding => "Wedding",
            ActivityType::Christening => "Christening",
            ActivityType::Anniversary => "Anniversary",
            ActivityType::OtherPersonalChallenge => "OtherPersonalChallenge",
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::Swimming => "Swimming",
            ActivityType::Walking => "Walking",
            ActivityType::Trekking => "Trekking",
            ActivityType::Triathlon => "Triathlon",
        }
    }

    const ALL: [ActivityType; 13] = [
        ActivityType::OtherCelebration,
        ActivityType::InMemory,
        ActivityType::Birthday,
        ActivityType::Wedding,
        ActivityType::Christening,
        ActivityType::Anniversary,
        ActivityType::OtherPersonalChallenge,
        ActivityType::Running,
        ActivityType::Cycling,
        ActivityType::Swimming,
        ActivityType::Walking,
        ActivityType::Trekking,
        ActivityType::Triathlon,
    ];
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for ActivityType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ActivityType::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown activity type: {value}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_colour: Option<String>,
}

/// Free-text codes the page owner's organisation uses for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageCustomCodes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code6: Option<String>,
}

/// Request payload for registering a new fundraising page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPageRequest {
    pub page_short_name: String,
    pub page_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charity_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_appeal_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_summary_what: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_summary_why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<PageTheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_codes: Option<PageCustomCodes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remembered_person_reference: Option<RememberedPersonReference>,
}

/// How a new page is associated with an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventRef {
    #[default]
    None,
    ById(i64),
    ByReference(String),
}

impl RegisterPageRequest {
    /// Resolve the event association for this request, optionally routed
    /// through an event reference.
    ///
    /// An explicit `event_id` and an event reference are mutually exclusive.
    pub fn event_ref(&self, reference: Option<&str>) -> Result<EventRef, ApiError> {
        match (self.event_id, reference) {
            (Some(id), Some(reference)) => Err(ApiError::Validation(format!(
                "event id {id} and event reference {reference:?} cannot both be set"
            ))),
            (_, Some(reference)) if reference.trim().is_empty() => {
                Err(ApiError::Validation("event reference must not be empty".to_string()))
            }
            (_, Some(reference)) => Ok(EventRef::ByReference(reference.to_string())),
            (Some(id), None) => Ok(EventRef::ById(id)),
            (None, None) => Ok(EventRef::None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPageResponse {
    pub page_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_on_url: Option<String>,
    #[serde(default)]
    pub next: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageMedia {
    #[serde(default)]
    pub images: Vec<FundraisingPageImage>,
    #[serde(default)]
    pub videos: Vec<FundraisingPageVideo>,
}

/// Team a page fundraises with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPageTeam {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

/// Public view of a fundraising page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPage {
    pub page_id: i64,
    pub page_short_name: String,
    #[serde(default)]
    pub page_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charity_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_appeal_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_summary_what: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_summary_why: Option<String>,
    #[serde(default)]
    pub total_raised_online: f64,
    #[serde(default)]
    pub grand_total_raised_excluding_gift_aid: f64,
    #[serde(default)]
    pub total_raised_sms: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub sms_code: String,
    #[serde(default)]
    pub page_creator_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<PageTheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_codes: Option<PageCustomCodes>,
    #[serde(default)]
    pub media: PageMedia,
    #[serde(default)]
    pub teams: Vec<FundraisingPageTeam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remembered_person_summary: Option<RememberedPersonSummary>,
}

/// Entry in the authenticated user's page list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPageSummary {
    pub page_id: i64,
    pub page_short_name: String,
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub page_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub raised_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedNames {
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryUpdateRequest {
    pub story_supplement: String,
}
