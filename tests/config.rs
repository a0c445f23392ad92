use idlefit::interfaces::config::Config;

#[test]
fn empty_config_uses_defaults() {
    let cfg = Config::from_yaml("").unwrap();
    assert_eq!(cfg.settings_path, "idlefit.yaml");
    assert!(cfg.webhook_url.is_none());
    assert!(!cfg.console);
    assert_eq!(cfg.bus_capacity, 64);
}

#[test]
fn env_vars_are_expanded() {
    // SAFETY: test-only variable, not read concurrently elsewhere
    unsafe { std::env::set_var("IDLEFIT_TEST_HOOK", "https://hooks.example.com/abc") };
    let cfg = Config::from_yaml(
        "settings_path: /tmp/idlefit.yaml\nwebhook_url: ${IDLEFIT_TEST_HOOK}\nconsole: true\n",
    )
    .unwrap();
    assert_eq!(cfg.settings_path, "/tmp/idlefit.yaml");
    assert_eq!(
        cfg.webhook_url.as_deref(),
        Some("https://hooks.example.com/abc")
    );
    assert!(cfg.console);
}

#[test]
fn unset_webhook_var_disables_webhook() {
    let cfg = Config::from_yaml("webhook_url: \"${IDLEFIT_TEST_UNSET_HOOK}\"\n").unwrap();
    assert!(cfg.webhook_url.is_none());
}

#[test]
fn zero_bus_capacity_is_rejected() {
    assert!(Config::from_yaml("bus_capacity: 0\n").is_err());
}
