use clap::Parser;
use freelancer_fetch::core::ConfigProvider;
use freelancer_fetch::utils::{logger, validation::Validate};
use freelancer_fetch::{
    ApiConfig, CliConfig, Command, FleschReadability, ReqwestTransport, UserLookup, WorkerPool,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            ApiConfig::from_file(path)?
        }
        None => ApiConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let pool = WorkerPool::shared_with_capacity(config.pool_size())?;
    let transport = ReqwestTransport::new(config.timeout_seconds());
    let lookup = UserLookup::from_config(transport, FleschReadability, pool, &config);

    let output = match cli.command {
        Command::User { id } => serde_json::to_string_pretty(&lookup.fetch_user(id).await?)?,
        Command::Search {
            query,
            limit,
            offset,
            descriptions,
        } => {
            if descriptions {
                serde_json::to_string_pretty(&lookup.search_descriptions(&query, limit, offset).await?)?
            } else {
                serde_json::to_string_pretty(&lookup.search_projects(&query, limit, offset).await?)?
            }
        }
    };

    println!("{}", output);
    Ok(())
}
