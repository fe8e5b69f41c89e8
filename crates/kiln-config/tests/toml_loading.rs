//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use kiln_config::KilnConfig;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
host = "127.0.0.1"
port = 8080
secret_key = "0123456789abcdef0123456789abcdef"
scratch_dir = "/var/tmp/kiln"

[dropbox]
app_key = "toml-key"
app_secret = "toml-secret"
refresh_token = "toml-refresh"

[supabase]
url = "https://abcd.supabase.co"
key = "anon"

[upload]
chunk_size_bytes = 1048576
max_retries = 3
base_delay_ms = 250

[team]
members = ["a@studio.test", "b@studio.test"]
"#,
        )?;

        let config: KilnConfig = Figment::from(Serialized::defaults(KilnConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.server.scratch_dir.to_str(), Some("/var/tmp/kiln"));
        assert!(config.dropbox.is_configured());
        assert!(config.supabase.is_configured());
        assert_eq!(config.upload.chunk_size_bytes, 1_048_576);
        assert_eq!(config.upload.max_retries, 3);
        assert_eq!(config.upload.base_delay_ms, 250);
        // untouched keys keep their defaults
        assert_eq!(config.upload.max_delay_ms, 30_000);
        assert_eq!(config.team.members, vec!["a@studio.test", "b@studio.test"]);
        assert!(config.validate_for_server().is_ok());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[dropbox]
app_key = "from-toml"
"#,
        )?;
        jail.set_env("KILN_DROPBOX__APP_KEY", "from-env");
        jail.set_env("KILN_UPLOAD__MAX_RETRIES", "7");

        let config: KilnConfig = Figment::from(Serialized::defaults(KilnConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("KILN_").split("__"))
            .extract()?;

        assert_eq!(config.dropbox.app_key, "from-env");
        assert_eq!(config.upload.max_retries, 7);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "kiln.toml",
            r#"
[server]
port = 9000
"#,
        )?;

        let config = KilnConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 9000);
        Ok(())
    });
}
