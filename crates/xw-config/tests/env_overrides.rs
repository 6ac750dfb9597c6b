use figment::Jail;
use xw_config::XwConfig;

#[test]
fn env_overrides_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("XWORD_STORE__DB_PATH", ":memory:");
        jail.set_env("XWORD_QUERY__DEFAULT_PAGE_LENGTH", "50");

        let config = XwConfig::load().expect("config loads");
        assert!(config.store.is_in_memory());
        assert_eq!(config.query.default_page_length, 50);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".xword")?;
        jail.create_file(
            ".xword/config.toml",
            r#"
[report]
export_dir = "./from-file"
"#,
        )?;
        jail.set_env("XWORD_REPORT__EXPORT_DIR", "./from-env");

        let config = XwConfig::load().expect("config loads");
        assert_eq!(config.report.export_dir, "./from-env");
        Ok(())
    });
}
