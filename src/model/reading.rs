use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Value id the sensor uses for its control entry; never persisted.
pub const CONTROL_VALUE_ID: &str = "1";
/// Numeric air quality grade.
pub const GRADE_VALUE_ID: &str = "21";
/// Written air quality grade, words joined by underscores.
pub const WRITTEN_GRADE_VALUE_ID: &str = "22";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(rename = "modultyp")]
    pub module_type: String,
    #[serde(rename = "vars")]
    pub values: Vec<NamedValue>,
    #[serde(rename = "Systeminfo")]
    pub system_info: SystemInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    #[serde(rename = "name")]
    pub id: String,
    pub homematic_name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub unit: String,
    pub value: String,
}

//Everything arrives as strings, numbers included
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(rename = "MAC-Adresse")]
    pub mac_address: String,
    #[serde(rename = "Homematic_CCU_ip")]
    pub homematic_ccu_ip: String,
    #[serde(rename = "WLAN_ssid")]
    pub wlan_ssid: String,
    #[serde(rename = "WLAN_Signal_dBm")]
    pub wlan_signal_dbm: String,
    #[serde(rename = "sec_seit_reset")]
    pub seconds_since_last_reset: String,
    pub firmware: String,
}

impl SensorReading {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).context("Couldn't decode AirSniffer payload")
    }

    /// First value carrying the given id, in payload order.
    pub fn value(&self, id: &str) -> Option<&NamedValue> {
        self.values.iter().find(|value| value.id == id)
    }
}

impl SystemInfo {
    pub fn seconds_since_last_reset(&self) -> Result<i32> {
        self.seconds_since_last_reset.parse().with_context(|| {
            format!(
                "Seconds since last reset is not an integer: {:?}",
                self.seconds_since_last_reset
            )
        })
    }
}
