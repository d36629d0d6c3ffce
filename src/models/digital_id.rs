use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const VERIFICATION_BASE_URL: &str = "https://gov.in/verify";

/// Credential shown on the ID card and encoded into its QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalId {
    pub tourist_id: String,
    pub name: String,
    pub nationality: String,
    pub passport_number: String,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub emergency_contact: String,
}

/// The record handed to the external QR encoder.
#[derive(Debug, Serialize)]
struct QrRecord<'a> {
    id: &'a str,
    name: &'a str,
    passport: &'a str,
    nationality: &'a str,
    issued: String,
    expires: String,
    emergency: &'a str,
    verification: String,
}

impl DigitalId {
    pub fn verification_url(&self) -> String {
        format!("{}/{}", VERIFICATION_BASE_URL, self.tourist_id)
    }

    pub fn qr_payload(&self) -> serde_json::Result<String> {
        let record = QrRecord {
            id: &self.tourist_id,
            name: &self.name,
            passport: &self.passport_number,
            nationality: &self.nationality,
            issued: self.issue_date.to_rfc3339(),
            expires: self.expiry_date.to_rfc3339(),
            emergency: &self.emergency_contact,
            verification: self.verification_url(),
        };
        serde_json::to_string(&record)
    }

    pub fn demo() -> Self {
        Self {
            tourist_id: "TUR001".to_string(),
            name: "John Doe".to_string(),
            nationality: "United States".to_string(),
            passport_number: "US123456789".to_string(),
            issue_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).single().unwrap_or_default(),
            expiry_date: Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).single().unwrap_or_default(),
            emergency_contact: "+1-555-0123".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_payload_fields() {
        let payload = DigitalId::demo().qr_payload().unwrap();
        let v: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(v["id"], "TUR001");
        assert_eq!(v["passport"], "US123456789");
        assert_eq!(v["emergency"], "+1-555-0123");
        assert_eq!(v["verification"], "https://gov.in/verify/TUR001");
        assert_eq!(v["issued"], "2024-01-15T00:00:00+00:00");
        assert_eq!(v.as_object().unwrap().len(), 8);
    }
}
