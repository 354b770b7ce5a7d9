//! Validation-focused tests for configuration

#[cfg(test)]
mod validation_tests {
    use crate::config::{Config, ServerConfig};
    use crate::{Error, Result};

    fn server(name: &str, url: &str) -> ServerConfig {
        ServerConfig {
            name: name.to_string(),
            url: url.to_string(),
            ..ServerConfig::default()
        }
    }

    fn two_servers() -> Config {
        Config {
            current: "b".to_string(),
            jenkins_servers: vec![server("a", "http://a:8080"), server("b", "https://b")],
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_current_server_by_name() -> Result<()> {
        let config = two_servers();
        assert_eq!(config.current_server()?.name, "b");
        Ok(())
    }

    #[test]
    fn test_current_server_falls_back_to_first() -> Result<()> {
        let config = Config {
            current: "missing".to_string(),
            ..two_servers()
        };
        assert_eq!(config.current_server()?.name, "a");
        Ok(())
    }

    #[test]
    fn test_no_servers_is_config_error() {
        let config = Config {
            jenkins_servers: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(
            config.current_server(),
            Err(Error::Config { .. })
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_select_server() -> Result<()> {
        let config = two_servers().select_server("a")?;
        assert_eq!(config.current, "a");
        assert!(two_servers().select_server("c").is_err());
        Ok(())
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let config = Config {
            jenkins_servers: vec![server("default", "ftp://jenkins")],
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_relative_url_is_rejected() {
        let config = Config {
            jenkins_servers: vec![server("default", "jenkins:8080/ci")],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let mut entry = server("default", "http://localhost:8080");
        entry.proxy = "not a url".to_string();
        let config = Config {
            jenkins_servers: vec![entry],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_log_lines_is_rejected() {
        let mut config = Config::default();
        config.ui.max_log_lines = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_multi_char_keybinding_is_rejected() {
        let mut config = Config::default();
        config.keybindings.quit = "qq".to_string();
        let message = config.validate().map_err(|e| e.to_string()).err();
        assert!(message.is_some_and(|m| m.contains("quit")));
    }

    #[test]
    fn test_duplicate_keybinding_is_rejected() {
        let mut config = Config::default();
        config.keybindings.refresh = "q".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_view_command_key_is_rejected() {
        for key in ["x", "/", "y", "N"] {
            let mut config = Config::default();
            config.keybindings.quit = key.to_string();
            let message = config.validate().map_err(|e| e.to_string()).err();
            assert!(
                message.is_some_and(|m| m.contains("reserved")),
                "key {key:?}"
            );
        }
    }
}
