use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, instrument};

use crate::model::SensorReading;

pub fn status_url(base_url: &str) -> String {
    format!("{base_url}/?json")
}

#[instrument]
pub async fn fetch_status(base_url: &str) -> Result<Vec<u8>> {
    let url = status_url(base_url);

    let response = reqwest::get(&url)
        .await
        .with_context(|| format!("Couldn't reach AirSniffer ({url})"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("AirSniffer ({url}) answered with {status}"));
    }

    let body = response
        .bytes()
        .await
        .with_context(|| format!("Couldn't read AirSniffer response ({url})"))?;

    if body.is_empty() {
        return Err(anyhow!("No data received from AirSniffer ({url})..."));
    }

    debug!("Received {} bytes from {}", body.len(), url);

    Ok(body.to_vec())
}

pub async fn fetch_reading(base_url: &str) -> Result<SensorReading> {
    let body = fetch_status(base_url).await?;
    let reading = SensorReading::from_slice(&body)?;

    info!(
        module_type = %reading.module_type,
        firmware = %reading.system_info.firmware,
        uptime = %reading.system_info.seconds_since_last_reset,
        ssid = %reading.system_info.wlan_ssid,
        signal_dbm = %reading.system_info.wlan_signal_dbm,
        values = reading.values.len(),
        "Fetched AirSniffer reading"
    );

    Ok(reading)
}
