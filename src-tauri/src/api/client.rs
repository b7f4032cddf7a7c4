use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::types::{
    Envelope, GroupsResponse, ScheduleDay, ScheduleResponse, SkippingRecord, SkippingResponse,
    ThemesResponse, ThesisTopic, UserResponse,
};
use crate::error::StudyMateError;
use crate::stores::group::Group;
use crate::stores::session::Session;

pub const DEFAULT_BASE_URL: &str = "https://schapi.ru";

/// JSON-over-HTTPS client for the institutional portal. Every endpoint is a
/// POST returning the `{code, response, message}` envelope.
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// The portal offers no abort primitive, so a hung request has to fail
    /// on its own: 10 second timeout on every call.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("StudyMate/0.1")
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Session, StudyMateError> {
        let payload: UserResponse = self
            .post(
                "user_data",
                &serde_json::json!({ "login": login, "password": password }),
            )
            .await?;
        Ok(payload.user)
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, StudyMateError> {
        let payload: GroupsResponse = self.post("groups", &serde_json::json!({})).await?;
        Ok(payload.groups)
    }

    pub async fn schedule(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<Vec<ScheduleDay>, StudyMateError> {
        let payload: ScheduleResponse = self
            .post(
                "schedule",
                &serde_json::json!({ "u_id": user_id, "g_id": group_id }),
            )
            .await?;
        Ok(payload.schedule)
    }

    pub async fn skipping(&self, user_id: i64) -> Result<Vec<SkippingRecord>, StudyMateError> {
        let payload: SkippingResponse = self
            .post("skipping", &serde_json::json!({ "u_id": user_id }))
            .await?;
        Ok(payload.skipping)
    }

    pub async fn themes(&self, user_id: i64) -> Result<Vec<ThesisTopic>, StudyMateError> {
        let payload: ThemesResponse = self
            .post("themes", &serde_json::json!({ "u_id": user_id }))
            .await?;
        Ok(payload.themes)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StudyMateError> {
        let url = format!("{}/{}", self.base_url, path);
        info!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            warn!("Request to '{}' failed: {}", url, e);
            StudyMateError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StudyMateError::Network(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        // Transport errors and malformed bodies are distinct failure kinds,
        // so the body is read first and decoded separately.
        let body = response
            .text()
            .await
            .map_err(|e| StudyMateError::Network(e.to_string()))?;
        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| StudyMateError::Decode(e.to_string()))?;
        decode_envelope(envelope)
    }
}

/// Unwrap the portal envelope into the expected payload type.
pub fn decode_envelope<T: DeserializeOwned>(envelope: Envelope) -> Result<T, StudyMateError> {
    match envelope.code {
        0 => {
            let payload = envelope.response.ok_or_else(|| {
                StudyMateError::Decode("envelope is missing the response field".to_string())
            })?;
            serde_json::from_value(payload).map_err(|e| StudyMateError::Decode(e.to_string()))
        }
        1 => Err(StudyMateError::Unauthorized),
        code => Err(StudyMateError::Api {
            code,
            message: envelope
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(raw: &str) -> Envelope {
        serde_json::from_str(raw).expect("Failed to parse envelope")
    }

    #[test]
    fn test_decode_success_payload() {
        let env = envelope(r#"{"code":0,"response":{"groups":[{"id":3,"name":"G3"}]}}"#);
        let payload: GroupsResponse = decode_envelope(env).unwrap();
        assert_eq!(payload.groups.len(), 1);
        assert_eq!(payload.groups[0].id, 3);
        assert_eq!(payload.groups[0].name, "G3");
    }

    #[test]
    fn test_code_one_is_unauthorized() {
        let env = envelope(r#"{"code":1,"message":"token expired"}"#);
        let result: Result<GroupsResponse, _> = decode_envelope(env);
        assert!(matches!(result, Err(StudyMateError::Unauthorized)));
    }

    #[test]
    fn test_unknown_code_carries_message() {
        let env = envelope(r#"{"code":7,"message":"maintenance"}"#);
        let result: Result<GroupsResponse, _> = decode_envelope(env);
        match result {
            Err(StudyMateError::Api { code, message }) => {
                assert_eq!(code, 7);
                assert_eq!(message, "maintenance");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_response_is_decode_error() {
        let env = envelope(r#"{"code":0}"#);
        let result: Result<GroupsResponse, _> = decode_envelope(env);
        assert!(matches!(result, Err(StudyMateError::Decode(_))));
    }

    #[test]
    fn test_wrong_payload_shape_is_decode_error() {
        let env = envelope(r#"{"code":0,"response":{"groups":"not-a-list"}}"#);
        let result: Result<GroupsResponse, _> = decode_envelope(env);
        assert!(matches!(result, Err(StudyMateError::Decode(_))));
    }

    #[test]
    fn test_schedule_payload_parses() {
        let env = envelope(
            r#"{"code":0,"response":{"schedule":[
                {"date":"ПН. 20.01.2025","lessons":[
                    {"lesson_num":4,"time_from":"13:50","time_to":"15:20",
                     "lesson_name":"МДК.02.02","teacher":"Блинов А.","room":"В. 217"}
                ]}
            ]}}"#,
        );
        let payload: ScheduleResponse = decode_envelope(env).unwrap();
        assert_eq!(payload.schedule.len(), 1);
        let day = &payload.schedule[0];
        assert_eq!(day.lessons[0].lesson_num, 4);
        assert_eq!(day.lessons[0].room, "В. 217");
    }

    #[test]
    fn test_theme_type_field_maps_to_kind() {
        let env = envelope(
            r#"{"code":0,"response":{"themes":[
                {"type":"Курсовая","theme":"Клиент расписания","curator":"Гапчук А.А."}
            ]}}"#,
        );
        let payload: ThemesResponse = decode_envelope(env).unwrap();
        assert_eq!(payload.themes[0].kind, "Курсовая");
    }

    #[test]
    fn test_skipping_hours_default_to_zero() {
        let env = envelope(
            r#"{"code":0,"response":{"skipping":[{"year":2025,"month":1,"day":20}]}}"#,
        );
        let payload: SkippingResponse = decode_envelope(env).unwrap();
        assert_eq!(payload.skipping[0].hours, 0);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PortalClient::new("https://schapi.ru/");
        assert_eq!(client.base_url, "https://schapi.ru");
    }
}
