use std::fmt;

use serde::Deserialize;

use crate::settings::HueSettings;

pub mod light;

#[derive(Deserialize, Debug, Clone)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: u32,
    pub address: String,
    pub description: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (type {}, address {})",
            self.description, self.error_type, self.address
        )
    }
}

/// One entry of the arrays the v1 API answers with, either
/// `{"success": ...}` or `{"error": ...}`. Success entries only echo the
/// request back.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiResponseItem {
    pub error: Option<ApiError>,
}

/// Joins the errors of an API answer, one per line.
pub fn format_api_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn base_url(settings: &HueSettings) -> String {
    let scheme = if settings.use_https { "https" } else { "http" };

    format!("{}://{}/api/{}", scheme, settings.addr, settings.username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let mut settings = HueSettings {
            addr: "192.168.1.2".to_string(),
            username: "newdeveloper".to_string(),
            use_https: false,
            self_signed_cert: None,
            disable_host_name_verification: None,
        };

        assert_eq!(base_url(&settings), "http://192.168.1.2/api/newdeveloper");

        settings.use_https = true;
        assert_eq!(base_url(&settings), "https://192.168.1.2/api/newdeveloper");
    }

    #[test]
    fn test_format_api_errors() {
        let items: Vec<ApiResponseItem> = serde_json::from_str(
            r#"[
                {"success": {"/lights/1/state/on": true}},
                {"error": {"type": 6, "address": "/lights/1/state/foo", "description": "parameter, foo, not available"}},
                {"error": {"type": 7, "address": "/lights/1/state/bri", "description": "invalid value, 300, for parameter, bri"}}
            ]"#,
        )
        .unwrap();

        let errors: Vec<ApiError> = items.into_iter().filter_map(|x| x.error).collect();

        assert_eq!(
            format_api_errors(&errors),
            "parameter, foo, not available (type 6, address /lights/1/state/foo)\n\
             invalid value, 300, for parameter, bri (type 7, address /lights/1/state/bri)"
        );
    }
}
