//! Third-party resource links for the profile's chronic illness.
//!
//! These panels are opaque to the journal: the only data they carry is the
//! illness name, passed as a query term with spaces replaced by `%20`.

use serde::{Deserialize, Serialize};

pub const CHATBOT_ID: &str = "9312791544";
pub const CHATBOT_SCRIPT_URL: &str = "https://chatling.ai/js/embed.js";

const DOCTOR_SEARCH_BASE: &str = "https://doctor.webmd.com/results";
const DOCTOR_SEARCH_LOCALITY: &str = "pagenumber=1&pt=34.71,-86.7517&d=40&city=Madison&state=AL";
const CDC_SEARCH_BASE: &str = "https://www.cdc.gov/search/index.html";
const EDUCATION_BASE: &str = "https://hingehealth.com/";
const VIDEO_SEARCH_BASE: &str = "https://www.youtube.com/results";
const VIDEO_EMBED_BASE: &str = "https://www.youtube.com/embed/videoseries";

/// Links shown on the doctor, expert-resource and AI-support tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLinks {
    pub illness: String,
    pub doctor_search: String,
    pub cdc_search: String,
    pub health_education: String,
    pub video_search: String,
    pub video_embed: String,
    pub chatbot: ChatbotEmbed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotEmbed {
    pub chatbot_id: String,
    pub script_url: String,
}

impl Default for ChatbotEmbed {
    fn default() -> Self {
        Self {
            chatbot_id: CHATBOT_ID.to_string(),
            script_url: CHATBOT_SCRIPT_URL.to_string(),
        }
    }
}

/// Replaces spaces with `%20`. Nothing else is escaped.
pub fn encode_query_term(term: &str) -> String {
    term.replace(' ', "%20")
}

pub fn doctor_search_url(illness: &str) -> String {
    format!(
        "{DOCTOR_SEARCH_BASE}?entity=all&q={}&{DOCTOR_SEARCH_LOCALITY}",
        encode_query_term(illness)
    )
}

pub fn cdc_search_url(illness: &str) -> String {
    format!("{CDC_SEARCH_BASE}?query={}", encode_query_term(illness))
}

pub fn health_education_url(illness: &str) -> String {
    format!("{EDUCATION_BASE}?query={}", encode_query_term(illness))
}

pub fn video_search_url(illness: &str) -> String {
    format!("{VIDEO_SEARCH_BASE}?search_query={}", encode_query_term(illness))
}

pub fn video_embed_url(illness: &str) -> String {
    format!("{VIDEO_EMBED_BASE}?search_query={}", encode_query_term(illness))
}

pub fn resource_links(illness: &str) -> ResourceLinks {
    ResourceLinks {
        illness: illness.to_string(),
        doctor_search: doctor_search_url(illness),
        cdc_search: cdc_search_url(illness),
        health_education: health_education_url(illness),
        video_search: video_search_url(illness),
        video_embed: video_embed_url(illness),
        chatbot: ChatbotEmbed::default(),
    }
}
