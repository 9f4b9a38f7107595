use mdesk_domain::config::{ApiConfig, PresenceConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let presence = PresenceConfig::default();
    assert_eq!(presence.default_channel, "general");
    assert_eq!(presence.keep_alive_seconds, 15);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "presence": { "default_channel": "briefing", "keep_alive_seconds": 30 }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.presence.default_channel, "briefing");
    assert_eq!(cfg.presence.keep_alive_seconds, 30);
}

#[test]
fn api_config_fills_missing_sections() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert_eq!(cfg.server.port, 4583);
    assert_eq!(cfg.presence.default_channel, "general");
}
