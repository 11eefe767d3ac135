use std::time::Duration;

use anyhow::{Context, Result};

use crate::{
    cli::{Cli, Command, RunArgs},
    domain,
    infra::{self, config::AppConfig},
    listener,
    usecases::{
        self, bootstrap,
        resize_session::{run_resize_session, SessionPlan},
    },
    window,
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        domain = domain::module_name(),
        listener = listener::module_name(),
        window = window::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Run(args) => {
            let plan = build_plan(&context.config, &args);
            let report = run_resize_session(&plan)?;

            tracing::info!(
                status = report.status.as_label(),
                applied = report.applied,
                rejected = report.rejected,
                "resize session finished"
            );

            for line in report.summary_lines() {
                println!("{line}");
            }
        }
        Command::ShowConfig => {
            print!("{}", render_config(&context.config)?);
        }
    }

    Ok(())
}

fn build_plan(config: &AppConfig, args: &RunArgs) -> SessionPlan {
    let mut plan = SessionPlan::from_config(config);

    if args.no_wait {
        plan.wait = false;
    }

    if let Some(timeout_ms) = args.wait_timeout_ms {
        plan.wait = true;
        plan.wait_timeout = Some(Duration::from_millis(timeout_ms));
    }

    plan.fail_at = args.fail_at;
    plan
}

fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to render config as TOML")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_override_config() {
        let args = RunArgs {
            no_wait: true,
            fail_at: Some(2),
            wait_timeout_ms: None,
        };

        let plan = build_plan(&AppConfig::default(), &args);

        assert!(!plan.wait);
        assert_eq!(plan.fail_at, Some(2));
    }

    #[test]
    fn timeout_flag_enables_bounded_wait() {
        let mut config = AppConfig::default();
        config.completion.wait = false;
        let args = RunArgs {
            wait_timeout_ms: Some(750),
            ..RunArgs::default()
        };

        let plan = build_plan(&config, &args);

        assert!(plan.wait);
        assert_eq!(plan.wait_timeout, Some(Duration::from_millis(750)));
    }

    #[test]
    fn rendered_config_parses_back() {
        let rendered = render_config(&AppConfig::default()).expect("config should render");

        let parsed: AppConfig = toml::from_str(&rendered).expect("rendered config should parse");

        assert_eq!(parsed, AppConfig::default());
        assert!(rendered.contains("[window]"));
    }
}
