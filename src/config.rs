// Session configuration options
use crate::error::TravelResult;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    pub booking_id: u32,
    pub payment_id: u32,
    pub payment_mode: String,
    pub opening_balance: Money,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            booking_id: 101,
            payment_id: 1,
            payment_mode: "Online".to_string(),
            opening_balance: Money::from_major(20000),
        }
    }
}

impl TravelConfig {
    // Fields missing from the document keep their default values
    pub fn from_json(json: &str) -> TravelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> TravelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
