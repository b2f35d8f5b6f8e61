#[cfg(test)]
mod config_tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use crate::config::{Config, Environment};
    use crate::error::GatewayError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_development_defaults() {
        let config = Config::from_source(Environment::Development, &source(&[])).unwrap();
        assert_eq!(config.supabase.url, "http://localhost:54321");
        assert_eq!(config.supabase.images_bucket, "images");
        assert_eq!(config.supabase.timeout_seconds, 10);
        assert_eq!(config.mutations.image_retries, 2);
        assert!(config.mutations.rollback_on_failure);
        assert_eq!(config.storage.path, PathBuf::from(".majin-storage.json"));
    }

    #[test]
    fn test_production_requires_supabase_variables() {
        let result = Config::from_source(Environment::Production, &source(&[]));
        assert!(matches!(result, Err(GatewayError::Config(_))));

        let result = Config::from_source(
            Environment::Production,
            &source(&[("SUPABASE_URL", "https://abc.supabase.co/")]),
        );
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_production_with_variables() {
        let config = Config::from_source(
            Environment::Production,
            &source(&[
                ("SUPABASE_URL", "https://abc.supabase.co/"),
                ("SUPABASE_ANON_KEY", "eyJhbGciOi"),
                ("SUPABASE_IMAGES_BUCKET", "majin"),
                ("GATEWAY_TIMEOUT", "30"),
                ("IMAGE_RETRIES", "0"),
                ("IMAGE_ROLLBACK", "off"),
                ("MAJIN_STORAGE_PATH", "/tmp/majin.json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.supabase.url, "https://abc.supabase.co");
        assert_eq!(config.supabase.images_bucket, "majin");
        assert_eq!(config.supabase.timeout_seconds, 30);
        assert_eq!(config.mutations.image_retries, 0);
        assert!(!config.mutations.rollback_on_failure);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/majin.json"));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = Config::from_source(
            Environment::Development,
            &source(&[("SUPABASE_URL", "not a url")]),
        );
        assert!(matches!(result, Err(GatewayError::Url(_))));

        let result = Config::from_source(
            Environment::Development,
            &source(&[("SUPABASE_URL", "ftp://files.majin.it")]),
        );
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = Config::from_source(
            Environment::Test,
            &source(&[("GATEWAY_TIMEOUT", "soon")]),
        )
        .unwrap();
        assert_eq!(config.supabase.timeout_seconds, 10);
    }

    #[rstest]
    #[case("dev", Environment::Development)]
    #[case("Development", Environment::Development)]
    #[case("test", Environment::Test)]
    #[case("PROD", Environment::Production)]
    fn test_environment_parsing(#[case] raw: &str, #[case] expected: Environment) {
        assert_eq!(raw.parse::<Environment>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_environment() {
        assert!("staging".parse::<Environment>().is_err());
    }
}
