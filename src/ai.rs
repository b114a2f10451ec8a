//! External AI collaborators behind narrow capability traits.
//!
//! The core never talks to a concrete provider; the gateway injects
//! implementations. Classification is best-effort and must never block
//! barrier creation; assistant failures surface as `Unavailable`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ServiceError, ServiceResult};
use crate::models::location::Location;
use crate::store::LocationStore;

/// Labels a barrier photo, e.g. "stairs_detected" or "pothole_detected".
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, photo_base64: &str) -> anyhow::Result<String>;
}

/// Completes a prepared prompt with free text.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

pub struct SearchQuery {
    pub query: String,
    pub user_mode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

#[derive(Debug)]
pub struct SearchAnswer {
    pub response: String,
    pub locations_considered: usize,
}

const SEARCH_CONTEXT_LIMIT: i64 = 20;

const SEARCH_SYSTEM_PROMPT: &str = "You are an accessibility assistant for the Sanchara app. \
Help users find accessible locations based on their needs. Consider: \
blind users need clear audio landmarks and minimal obstacles; \
deaf users need visual information and good lighting; \
wheelchair users need ramps, elevators, smooth surfaces and low incline. \
Provide specific location recommendations with accessibility scores.";

/// Builds the completion prompt from the user's query and nearby locations.
pub fn build_search_prompt(query: &SearchQuery, locations: &[Location]) -> String {
    let mut prompt = format!(
        "{}\n\nUser is searching for accessible locations. Their accessibility mode is: {}\n\
         Current location: ({}, {})\nSearch radius: {} meters\n\nAvailable locations:\n",
        SEARCH_SYSTEM_PROMPT, query.user_mode, query.latitude, query.longitude, query.radius_m
    );
    for loc in locations {
        prompt.push_str(&format!(
            "- {} at ({}, {}) - Score: {}/10, Ramp: {}, Elevator: {}, Surface: {}\n",
            loc.name,
            loc.latitude,
            loc.longitude,
            loc.sanchara_score,
            loc.has_ramp,
            loc.has_elevator,
            loc.surface_type
        ));
    }
    prompt.push_str(&format!("\nUser query: {}", query.query));
    prompt
}

/// Conversational accessibility search: gathers nearby locations as context
/// and asks the assistant. Any assistant failure becomes `Unavailable`; it
/// never panics the request path.
pub async fn accessibility_search(
    assistant: &dyn Assistant,
    locations: Arc<dyn LocationStore>,
    query: &SearchQuery,
) -> ServiceResult<SearchAnswer> {
    let nearby = locations
        .query_near(
            query.latitude,
            query.longitude,
            query.radius_m,
            None,
            SEARCH_CONTEXT_LIMIT,
        )
        .await?;

    let prompt = build_search_prompt(query, &nearby);
    let response = assistant
        .complete(&prompt)
        .await
        .map_err(|e| ServiceError::Unavailable(format!("assistant failed: {}", e)))?;

    Ok(SearchAnswer {
        response,
        locations_considered: nearby.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::LocationReport;
    use crate::store::memory::MemoryLocationStore;
    use anyhow::bail;

    struct CannedAssistant;

    #[async_trait]
    impl Assistant for CannedAssistant {
        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            assert!(prompt.contains("User query:"));
            Ok("Try the Central Library ramp entrance.".to_string())
        }
    }

    struct DownAssistant;

    #[async_trait]
    impl Assistant for DownAssistant {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            bail!("upstream timeout")
        }
    }

    fn query() -> SearchQuery {
        SearchQuery {
            query: "quiet cafe with a ramp".to_string(),
            user_mode: "wheelchair".to_string(),
            latitude: 12.97,
            longitude: 77.59,
            radius_m: 5000.0,
        }
    }

    fn sample_location(name: &str) -> Location {
        Location::from_report(
            LocationReport {
                name: name.to_string(),
                latitude: Some(12.97),
                longitude: Some(77.59),
                address: "MG Road".to_string(),
                sanchara_score: None,
                has_ramp: Some(true),
                has_elevator: Some(false),
                has_stairs: Some(false),
                surface_type: Some("smooth".to_string()),
                incline_level: Some("low".to_string()),
                description: None,
            },
            12.97,
            77.59,
        )
    }

    #[test]
    fn prompt_lists_each_location_with_its_score() {
        let loc = sample_location("Third Wave Cafe");
        let prompt = build_search_prompt(&query(), std::slice::from_ref(&loc));
        assert!(prompt.contains("Third Wave Cafe"));
        assert!(prompt.contains("Score: 10/10"));
        assert!(prompt.contains("quiet cafe with a ramp"));
    }

    #[tokio::test]
    async fn search_returns_assistant_response() {
        let locations = Arc::new(MemoryLocationStore::default());
        locations.create(sample_location("Cafe")).await.unwrap();

        let answer = accessibility_search(&CannedAssistant, locations, &query())
            .await
            .unwrap();
        assert_eq!(answer.locations_considered, 1);
        assert!(answer.response.contains("Central Library"));
    }

    #[tokio::test]
    async fn assistant_failure_is_unavailable() {
        let locations = Arc::new(MemoryLocationStore::default());
        let err = accessibility_search(&DownAssistant, locations, &query())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }
}
