use std::path::Path;

use crate::{
    infra::{self, error::AppError},
    usecases::context::AppContext,
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let context = build_context(config_path)?;
    infra::logging::init(&context.config.logging)?;

    Ok(context)
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = infra::config::load(config_path)?;

    Ok(AppContext::new(config))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let context = build_context(Some(Path::new("./missing-config.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, crate::infra::config::AppConfig::default());
    }

    #[test]
    fn surfaces_invalid_window_config() {
        let dir = tempfile::tempdir().expect("temp dir must be creatable");
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[window]\ntitle = \"\"\n").expect("must write test config");

        let error = build_context(Some(&config_path)).expect_err("blank title must fail");

        assert!(matches!(error, AppError::ConfigInvalid { .. }));
    }
}
