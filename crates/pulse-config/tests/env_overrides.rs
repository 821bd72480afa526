use figment::Jail;
use pretty_assertions::assert_eq;
use pulse_config::PulseConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("PULSE_RETRY__BASE_DELAY_MS", "50");
        jail.set_env("PULSE_RETRY__BACKOFF", "false");
        jail.set_env("PULSE_SCORING__BASE_VALUE", "1500.5");

        let config = PulseConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.retry.base_delay_ms, 50);
        assert!(!config.retry.backoff);
        assert!((config.scoring.base_value - 1500.5).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn unprefixed_env_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("RETRY__MAX_ATTEMPTS", "9");

        let config = PulseConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.retry.max_attempts, 3);
        Ok(())
    });
}
