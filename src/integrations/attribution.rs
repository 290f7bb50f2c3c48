// src/integrations/attribution.rs
//
// Install attribution boundary (one-shot conversion data at launch).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

const NON_ORGANIC_STATUS: &str = "Non-organic";

/// Conversion data reported for this install
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversionData {
    /// "Organic" or "Non-organic"
    #[serde(rename = "af_status")]
    pub status: String,
    pub media_source: Option<String>,
    pub campaign: Option<String>,
}

impl ConversionData {
    pub fn organic() -> Self {
        Self {
            status: "Organic".to_string(),
            media_source: None,
            campaign: None,
        }
    }

    pub fn non_organic(media_source: &str, campaign: &str) -> Self {
        Self {
            status: NON_ORGANIC_STATUS.to_string(),
            media_source: Some(media_source.to_string()),
            campaign: Some(campaign.to_string()),
        }
    }

    pub fn is_non_organic(&self) -> bool {
        self.status == NON_ORGANIC_STATUS
    }

    /// Media source and campaign, only for non-organic installs that carry both
    pub fn campaign_data(&self) -> Option<(&str, &str)> {
        if !self.is_non_organic() {
            return None;
        }
        match (&self.media_source, &self.campaign) {
            (Some(source), Some(campaign)) => Some((source.as_str(), campaign.as_str())),
            _ => None,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttributionProvider: Send + Sync {
    async fn conversion_data(&self) -> AppResult<ConversionData>;
}
