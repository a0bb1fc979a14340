use clap::Parser;
use file_toolbox::config::{Command, CliConfig};
use file_toolbox::core::Outcome;
use file_toolbox::utils::error::{ErrorSeverity, Result, ToolboxError};
use file_toolbox::utils::{logger, validation::Validate};
use file_toolbox::{
    AnalyzeTool, CombineTool, LocalStorage, RenameTool, TomlConfig, ToolboxEngine,
};

async fn dispatch(cli: &CliConfig, file_config: &TomlConfig) -> Result<Outcome> {
    let monitor_enabled = cli.monitor_enabled(file_config);
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    let storage = LocalStorage::new(".");

    match &cli.command {
        Command::Rename(args) => {
            let settings = args.resolve(file_config);
            settings.validate()?;
            tracing::debug!("Rename settings: {:?}", settings);
            let tool = RenameTool::new(storage, settings);
            ToolboxEngine::new_with_monitoring(tool, monitor_enabled)
                .with_dry_run(cli.dry_run)
                .run()
                .await
        }
        Command::Combine(args) => {
            let settings = args.resolve(file_config);
            settings.validate()?;
            tracing::debug!("Combine settings: {:?}", settings);
            let tool = CombineTool::new(storage, settings);
            ToolboxEngine::new_with_monitoring(tool, monitor_enabled)
                .with_dry_run(cli.dry_run)
                .run()
                .await
        }
        Command::Analyze(args) => {
            let settings = args.resolve(file_config);
            settings.validate()?;
            tracing::debug!("Analyze settings: {:?}", settings);
            let tool = AnalyzeTool::new(storage, settings);
            ToolboxEngine::new_with_monitoring(tool, monitor_enabled)
                .with_dry_run(cli.dry_run)
                .run()
                .await
        }
    }
}

fn report_failure(e: &ToolboxError) -> i32 {
    let severity = e.severity();
    if severity == ErrorSeverity::Low {
        tracing::warn!("⚠️ {}", e);
        eprintln!("⚠️ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        return severity.exit_code();
    }

    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        severity
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    severity.exit_code()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 日誌尚未初始化，設定檔錯誤直接輸出到 stderr
    let file_config = match TomlConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(&cli.logger_options(&file_config));
    tracing::info!("Starting file-toolbox");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = file_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match dispatch(&cli, &file_config).await {
        Ok(outcome) => {
            for line in &outcome.lines {
                println!("{}", line);
            }
            if let Some(artifact) = &outcome.artifact {
                tracing::info!("📁 Output saved to: {}", artifact.display());
            }
            tracing::info!(
                "✅ {} completed{}",
                outcome.tool,
                if outcome.dry_run { " (dry run)" } else { "" }
            );
        }
        Err(e) => {
            let exit_code = report_failure(&e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
