//! Image and video payloads.

use serde::{Deserialize, Serialize};

use super::page::Link;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPageImage {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_url: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPageVideo {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub url: String,
}

/// Request payload for attaching an image by URL. The page short name is
/// part of the path, not the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddFundraisingPageImageRequest {
    #[serde(skip)]
    pub page_short_name: String,
    pub url: String,
    pub caption: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddFundraisingPageVideoRequest {
    #[serde(skip)]
    pub page_short_name: String,
    pub url: String,
    pub caption: String,
}

/// Acknowledgement for an added image or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddMediaResponse {
    #[serde(default)]
    pub next: Link,
}
