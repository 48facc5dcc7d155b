use std::sync::Arc;

use tablekit::designer::seed::{transform_seed, SeedData};
use tablekit::settings::default_config_path;
use tablekit::{init_logging, App, Config, FullAccess, InMemoryRepository, Role, BUILD_DATE, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!("TableKit {} (built {})", VERSION, BUILD_DATE);

    let config = match default_config_path() {
        Ok(path) => Config::load_or_default(&path)?,
        Err(err) => {
            tracing::warn!("No configuration directory: {}; using defaults", err);
            Config::default()
        }
    };

    // Demo restaurant served from memory
    let plans = transform_seed(&SeedData::demo(), &config.canvas);
    let repository = Arc::new(InMemoryRepository::with_plans(plans));

    let mut app = App::new(config, Arc::new(FullAccess), Role::from("admin"), repository);
    app.initialize().await?;

    for plan in app.editor().plans() {
        let status = plan.capacity_status();
        tracing::info!(
            "{}: {} tables, {} obstacles, {}/{} seats",
            plan.name,
            plan.tables.len(),
            plan.obstacles.len(),
            status.total,
            status.limit
        );
    }

    if let Some(dir) = std::env::args().nth(1) {
        let written = app.export_all(&dir)?;
        for path in written {
            println!("{}", path.display());
        }
    }

    Ok(())
}
