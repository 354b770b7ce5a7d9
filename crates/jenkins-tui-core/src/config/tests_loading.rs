//! Loading-focused tests for configuration
//!
//! Tests for file loading, first-run defaults, saving, and overrides.

#[cfg(test)]
mod loading_tests {
    use std::time::Duration;

    use crate::config::{
        load_config, load_yaml_file, save_config, Config, ENV_REFRESH_INTERVAL, ENV_SERVER,
    };
    use crate::{Error, Result};

    fn temp_dir() -> Result<tempfile::TempDir> {
        tempfile::tempdir().map_err(|e| Error::config(format!("failed to create temp dir: {e}")))
    }

    fn write(path: &std::path::Path, content: &str) -> Result<()> {
        std::fs::write(path, content)
            .map_err(|e| Error::config(format!("failed to write test file: {e}")))
    }

    const TWO_SERVERS: &str = r#"
current: work
jenkins_servers:
  - name: home
    url: http://jenkins.home:8080
  - name: work
    url: https://ci.example.com
    username: alice
    token: 11aa22bb
    proxy: ""
    insecureSkipVerify: true
ui:
  refreshInterval: 10
  maxLogLines: 200
"#;

    #[test]
    fn test_missing_file_writes_defaults() -> Result<()> {
        let dir = temp_dir()?;
        let path = dir.path().join("nested").join(".jenkins-cli.yaml");

        let config = load_config(Some(&path))?;

        assert_eq!(config, Config::default());
        assert!(path.exists(), "defaults should be written on first run");
        assert_eq!(load_yaml_file(&path)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_full_file() -> Result<()> {
        let dir = temp_dir()?;
        let path = dir.path().join("config.yaml");
        write(&path, TWO_SERVERS)?;

        let config = load_yaml_file(&path)?;

        assert_eq!(config.current, "work");
        assert_eq!(config.jenkins_servers.len(), 2);
        let server = config.current_server()?;
        assert_eq!(server.url, "https://ci.example.com");
        assert_eq!(server.username, "alice");
        assert!(server.insecure_skip_verify);
        assert_eq!(config.ui.refresh_interval(), Duration::from_secs(10));
        assert_eq!(config.ui.max_log_lines, 200);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let dir = temp_dir()?;
        let path = dir.path().join("config.yaml");
        write(
            &path,
            "current: a\njenkins_servers:\n  - name: a\n    url: http://a:8080\n",
        )?;

        let config = load_yaml_file(&path)?;

        assert_eq!(config.ui.max_log_lines, 1000);
        assert_eq!(config.keybindings.quit, "q");
        assert_eq!(config.ui.refresh_interval(), Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn test_malformed_yaml_returns_config_error() -> Result<()> {
        let dir = temp_dir()?;
        let path = dir.path().join("bad.yaml");
        write(&path, "jenkins_servers: [[[\n  - : :")?;

        let result = load_yaml_file(&path);

        assert!(matches!(result, Err(Error::Config { .. })));
        if let Err(e) = result {
            assert!(e.to_string().contains("parse"));
        }
        Ok(())
    }

    #[test]
    fn test_directory_path_is_rejected() -> Result<()> {
        let dir = temp_dir()?;
        let result = load_yaml_file(dir.path());
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[test]
    fn test_save_then_load_preserves_yaml_field_names() -> Result<()> {
        let dir = temp_dir()?;
        let path = dir.path().join("saved.yaml");
        let mut config = Config::default();
        config.ui.compact_mode = true;

        save_config(&config, &path)?;
        let text = std::fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("failed to read back: {e}")))?;

        assert!(text.contains("jenkins_servers"));
        assert!(text.contains("refreshInterval"));
        assert!(text.contains("insecureSkipVerify"));
        assert_eq!(load_yaml_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_overrides_select_server_and_interval() -> Result<()> {
        let config = Config::default().apply_overrides(|key| match key {
            ENV_SERVER => Some("staging".to_string()),
            ENV_REFRESH_INTERVAL => Some(" 5 ".to_string()),
            _ => None,
        })?;

        assert_eq!(config.current, "staging");
        assert_eq!(config.ui.refresh_interval(), Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn test_no_overrides_leaves_config_untouched() -> Result<()> {
        let config = Config::default().apply_overrides(|_| None)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_interval_override_is_rejected() {
        let result = Config::default().apply_overrides(|key| {
            (key == ENV_REFRESH_INTERVAL).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_empty_server_override_is_rejected() {
        let result =
            Config::default().apply_overrides(|key| (key == ENV_SERVER).then(String::new));
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
