use std::io::Write;

use jardine_mealplan::Reconciled;

use super::Session;
use crate::config::Config;

pub async fn sync(session: &mut Session, push: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if session.client.is_none() {
        writeln!(out, "Remote sync is disabled")?;
        return Ok(());
    }

    if push {
        session.coordinator.apply(|_| Ok(())).await?;
        session.coordinator.flush().await;

        writeln!(out, "Local plan pushed")?;
        return Ok(());
    }

    match session.reconciled {
        Some(Reconciled::Replaced) => writeln!(out, "Plan updated from the shared copy")?,
        Some(Reconciled::NotFound) => {
            writeln!(out, "No shared plan yet, run `jardine sync --push` to share this one")?
        }
        Some(Reconciled::Failed) | None => {
            anyhow::bail!("could not load the shared plan, local plan kept")
        }
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn migrate(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    tracing::info!("Running database migrations...");

    let pool = jardine_db::create_pool(&config.storage.database_url, 1).await?;
    jardine_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");
    writeln!(out, "Database ready at {}", config.storage.database_url)?;

    Ok(())
}
