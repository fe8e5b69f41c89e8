use kiln_config::KilnConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &KilnConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &KilnConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.dropbox.is_configured() && has_env_prefix(&env_keys, "KILN_DROPBOX") {
        warnings.push(
            "Dropbox config appears default while KILN_DROPBOX* env vars exist. Use double underscores (example: KILN_DROPBOX__APP_KEY)."
                .to_string(),
        );
    }

    if !config.supabase.is_configured() && has_env_prefix(&env_keys, "KILN_SUPABASE") {
        warnings.push(
            "Supabase config appears default while KILN_SUPABASE* env vars exist. Use double underscores (example: KILN_SUPABASE__URL)."
                .to_string(),
        );
    }

    if !config.server.has_secret_key() && has_env_prefix(&env_keys, "KILN_SERVER") {
        warnings.push(
            "Server secret key is unset while KILN_SERVER* env vars exist. Use double underscores (example: KILN_SERVER__SECRET_KEY)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}
