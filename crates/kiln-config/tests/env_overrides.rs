use figment::Jail;
use kiln_config::KilnConfig;

#[test]
fn env_fills_credentials() {
    Jail::expect_with(|jail| {
        jail.set_env("KILN_SUPABASE__URL", "https://abcd.supabase.co");
        jail.set_env("KILN_SUPABASE__KEY", "anon-from-env");

        let config = KilnConfig::load().map_err(|e| e.to_string())?;
        assert!(config.supabase.is_configured());
        assert_eq!(config.supabase.key, "anon-from-env");
        Ok(())
    });
}

#[test]
fn env_list_overrides_team_roster() {
    Jail::expect_with(|jail| {
        jail.set_env("KILN_TEAM__MEMBERS", r#"["x@studio.test", "y@studio.test"]"#);

        let config = KilnConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.team.members, vec!["x@studio.test", "y@studio.test"]);
        Ok(())
    });
}

#[test]
fn single_underscore_is_not_a_section_separator() {
    Jail::expect_with(|jail| {
        jail.set_env("KILN_DROPBOX_APP_KEY", "ignored");

        let config = KilnConfig::load().map_err(|e| e.to_string())?;
        assert!(config.dropbox.app_key.is_empty());
        Ok(())
    });
}
