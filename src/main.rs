use clap::Parser;
use reseller_catalog::core::ConfigProvider;
use reseller_catalog::utils::logger::{self, LogFormat};
use reseller_catalog::utils::validation::Validate;
use reseller_catalog::{
    CatalogPipeline, CliConfig, LocalStorage, PageEngine, ReqwestTransport, TomlConfig,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, LogFormat::from_json_flag(cli.json_logs));

    tracing::info!("Starting catalog-page");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", path);
                run(config).await
            }
            Err(e) => report_config_error(&e),
        },
        None => run(cli).await,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: C) -> i32 {
    if let Err(e) = config.validate() {
        return report_config_error(&e);
    }

    let transport = match build_transport(&config) {
        Ok(transport) => transport,
        Err(e) => return report_config_error(&e),
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = CatalogPipeline::new(transport, storage, config);
    let engine = PageEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Catalog page built successfully!");
            println!(
                "✅ Rendered {} products and {} categories",
                report.product_count, report.category_count
            );
            for file in &report.written_files {
                println!("📁 {}/{}", report.output_path, file);
            }
            0
        }
        Err(e) => {
            tracing::error!("❌ Catalog page build failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            2
        }
    }
}

fn build_transport<C: ConfigProvider>(config: &C) -> reseller_catalog::Result<ReqwestTransport> {
    let transport = ReqwestTransport::with_timeout(config.timeout_seconds().map(Duration::from_secs))?;
    match config.base_url() {
        Some(base) => transport.with_base_url(base),
        None => Ok(transport),
    }
}

fn report_config_error(e: &reseller_catalog::CatalogError) -> i32 {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    1
}
