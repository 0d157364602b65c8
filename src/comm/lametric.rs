use anyhow::{anyhow, Context, Result};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::model::{LametricConfig, SensorReading, GRADE_VALUE_ID, WRITTEN_GRADE_VALUE_ID};

pub const GREEN_ICON: u32 = 3307;
pub const YELLOW_ICON: u32 = 3273;
pub const RED_ICON: u32 = 3305;

const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub text: String,
    pub icon: u32,
    pub index: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notification {
    pub frames: Vec<Frame>,
}

pub fn grade_icon(grade: i64) -> u32 {
    match grade {
        1..=2 => GREEN_ICON,
        3..=4 => YELLOW_ICON,
        _ => RED_ICON,
    }
}

/// Builds the single frame shown for a reading. Fails when the grade values
/// are missing or the numeric grade isn't a number.
pub fn build_notification(reading: &SensorReading) -> Result<Notification> {
    let (grade, written_grade) = reading
        .value(GRADE_VALUE_ID)
        .zip(reading.value(WRITTEN_GRADE_VALUE_ID))
        .ok_or_else(|| anyhow!("Couldn't get a valid grade"))?;

    let grade: i64 = grade
        .value
        .parse()
        .map_err(|_| anyhow!("Couldn't get a valid grade: {:?} is not a number", grade.value))?;

    Ok(Notification {
        frames: vec![Frame {
            text: written_grade.value.replace('_', " "),
            icon: grade_icon(grade),
            index: 0,
        }],
    })
}

#[instrument(skip(config, notification), fields(url = %config.push_url))]
pub async fn push_notification(config: &LametricConfig, notification: &Notification) -> Result<()> {
    //The Lametric Time serves a self signed certificate
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .context("Couldn't build Lametric client")?;

    let response = client
        .post(&config.push_url)
        .header(ACCEPT, "application/json")
        .header(ACCESS_TOKEN_HEADER, &config.access_token)
        .header(CACHE_CONTROL, "no-cache")
        .json(notification)
        .send()
        .await
        .with_context(|| format!("Couldn't reach Lametric Time ({})", config.push_url))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("Lametric Time answered with {status}: {body}"));
    }

    debug!("Lametric Time accepted the notification");

    Ok(())
}

pub async fn forward(reading: &SensorReading, config: &LametricConfig) -> Result<()> {
    let notification = build_notification(reading)?;
    push_notification(config, &notification).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::test_server::{serve_once, unreachable_url};
    use crate::model::fixtures::{named, reading_with};
    use serde_json::json;

    #[test]
    fn grades_map_to_icons() {
        let expected = [
            (-1, RED_ICON),
            (0, RED_ICON),
            (1, GREEN_ICON),
            (2, GREEN_ICON),
            (3, YELLOW_ICON),
            (4, YELLOW_ICON),
            (5, RED_ICON),
            (100, RED_ICON),
            (i64::MIN, RED_ICON),
        ];

        for (grade, icon) in expected {
            assert_eq!(grade_icon(grade), icon, "grade {grade}");
        }
    }

    #[test]
    fn builds_frame_from_grades() {
        let reading = reading_with(vec![named("21", "3"), named("22", "moderate_air")]);

        let notification = build_notification(&reading).unwrap();

        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({"frames": [{"text": "moderate air", "icon": YELLOW_ICON, "index": 0}]})
        );
    }

    #[test]
    fn missing_grades_fail() {
        let only_written = reading_with(vec![named("22", "good")]);
        let only_numeric = reading_with(vec![named("21", "1")]);

        for reading in [only_written, only_numeric] {
            let err = build_notification(&reading).unwrap_err();
            assert!(err.to_string().contains("Couldn't get a valid grade"));
        }
    }

    #[test]
    fn non_numeric_grade_fails() {
        let reading = reading_with(vec![named("21", "three"), named("22", "moderate")]);

        assert!(build_notification(&reading).is_err());
    }

    #[test]
    fn padded_grade_is_not_a_number() {
        for padded in [" 3", "3 ", " 3 "] {
            let reading = reading_with(vec![named("21", padded), named("22", "moderate")]);

            let err = build_notification(&reading).unwrap_err();
            assert!(err.to_string().contains("Couldn't get a valid grade"), "grade {padded:?}");
        }
    }

    #[tokio::test]
    async fn missing_grade_fails_before_pushing() {
        let reading = reading_with(vec![named("5", "42")]);
        let config = LametricConfig {
            push_url: unreachable_url().await,
            access_token: "token".to_string(),
        };

        let err = forward(&reading, &config).await.unwrap_err();

        assert!(err.to_string().contains("Couldn't get a valid grade"));
    }

    #[tokio::test]
    async fn pushes_frame_with_headers() {
        let (push_url, request) = serve_once("200 OK", "{\"success\":{}}").await;
        let reading = reading_with(vec![named("21", "1"), named("22", "very_good_air")]);
        let config = LametricConfig {
            push_url,
            access_token: "secret".to_string(),
        };

        forward(&reading, &config).await.unwrap();

        let request = request.await.unwrap();
        assert!(request.head.starts_with("POST / HTTP/1.1"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("x-access-token"), Some("secret"));
        assert_eq!(request.header("cache-control"), Some("no-cache"));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            json!({"frames": [{"text": "very good air", "icon": GREEN_ICON, "index": 0}]})
        );
    }

    #[tokio::test]
    async fn rejected_push_fails() {
        let (push_url, _request) = serve_once("401 Unauthorized", "{}").await;
        let reading = reading_with(vec![named("21", "5"), named("22", "bad")]);
        let config = LametricConfig {
            push_url,
            access_token: String::new(),
        };

        let err = forward(&reading, &config).await.unwrap_err();

        assert!(err.to_string().contains("401"));
    }
}
