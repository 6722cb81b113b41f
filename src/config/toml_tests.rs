//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [webhook]
            url = "https://discord.com/api/webhooks/1/token"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(
            config.webhook.url.as_deref(),
            Some("https://discord.com/api/webhooks/1/token")
        );
        assert!(config.dispatch.messages.is_empty());
    }

    #[test]
    fn parse_full_dispatch_section() {
        let toml = r#"
            [dispatch]
            messages = ["hello", "world"]
            messages_file = "~/msgs.txt"
            count = 20
            delay = 1.25
            random_order = true
            rate_limit_cooldown = 5
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let dispatch = &config.dispatch;

        assert_eq!(dispatch.messages, vec!["hello", "world"]);
        assert_eq!(dispatch.messages_file.as_deref(), Some("~/msgs.txt"));
        assert_eq!(dispatch.count, Some(20));
        assert_eq!(dispatch.delay, Some(1.25));
        assert!(dispatch.random_order);
        assert_eq!(dispatch.rate_limit_cooldown, Some(5.0));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.webhook.url.is_none());
        assert!(config.dispatch.count.is_none());
        assert!(!config.dispatch.random_order);
    }

    #[test]
    fn integer_delay_is_accepted_as_float() {
        let config = TomlConfig::parse("[dispatch]\ndelay = 2").unwrap();

        assert_eq!(config.dispatch.delay, Some(2.0));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[monitor]\npoll_interval = 60");

        assert!(result.is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[dispatch]\namount = 50");

        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[dispatch]\ncount = \"fifty\"");

        assert!(result.is_err());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let result = TomlConfig::parse("[webhook\nurl = ");

        assert!(matches!(result, Err(super::super::ConfigError::TomlParse(_))));
    }
}

mod load {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dispatch]\ncount = 7").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.dispatch.count, Some(7));
    }

    #[test]
    fn load_missing_file_returns_file_read_error() {
        let result = TomlConfig::load(std::path::Path::new("/nonexistent/hook-pacer.toml"));

        assert!(matches!(
            result,
            Err(super::super::ConfigError::FileRead { .. })
        ));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.dispatch.count, Some(50));
        assert_eq!(config.dispatch.delay, Some(0.75));
        assert!(config.webhook.url.is_none());
    }

    #[test]
    fn default_template_documents_every_dispatch_key() {
        let template = default_config_template();

        for key in [
            "url",
            "messages",
            "messages_file",
            "count",
            "delay",
            "random_order",
            "rate_limit_cooldown",
        ] {
            assert!(template.contains(key), "template is missing {key}");
        }
    }
}
