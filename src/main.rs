mod modules;

use anyhow::Context;
use biblio_kernel::settings::Settings;
use biblio_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load biblio settings")?;

    biblio_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "biblio bootstrap starting"
    );

    let db = biblio_db::Db::connect(&settings.database.url, settings.database.max_connections)
        .await
        .with_context(|| "failed to connect to database")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };
    registry.init_all(&ctx).await?;

    for (module, migration) in registry.collect_migrations() {
        db.apply_migration(&module, migration.id, migration.up)
            .await
            .with_context(|| {
                format!(
                    "failed to apply migration '{}' from module '{module}'",
                    migration.id
                )
            })?;
    }

    registry.start_all(&ctx).await?;

    tracing::info!("biblio bootstrap complete");

    biblio_http::start_server(&registry, &settings, &db).await
}
