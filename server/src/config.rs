use anyhow::Result;
use platform_store::StoreSettings;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub store: StoreSettings,
    /// Empty means any origin, without credentials.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            store: StoreSettings::from_env(),
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://localhost:5173, ,https://annuaire.example.com "),
            vec![
                "http://localhost:5173".to_string(),
                "https://annuaire.example.com".to_string()
            ]
        );
        assert!(parse_origins("").is_empty());
    }
}
