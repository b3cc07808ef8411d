//! GameScoreService entry point: schema setup, sample data and the HTTP API.

mod cli;
mod server;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gamescoreservice::Settings;
use gamescoreservice::domain::FixtureSeeder;
use gamescoreservice::outbound::persistence::{
    DbPool, DieselFixtureRepository, PoolConfig, initialise_schema,
};

use cli::{Cli, Command};
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let Cli { command } = Cli::parse();
    let settings = command.apply(Settings::load()?);
    match command {
        Command::InitDb(_) => init_db(&settings).await,
        Command::PopulateDb(_) => populate_db(&settings).await,
        Command::Run(_) => run(&settings).await,
    }
}

async fn pool(settings: &Settings) -> Result<DbPool> {
    let config = PoolConfig::new(settings.database_url()?).with_max_size(settings.pool_max_size());
    DbPool::new(config)
        .await
        .wrap_err("failed to create database pool")
}

async fn init_db(settings: &Settings) -> Result<()> {
    let applied = initialise_schema(settings.database_url()?)
        .await
        .wrap_err("failed to initialise the database schema")?;
    info!(applied = applied.len(), "database schema ready");
    Ok(())
}

async fn populate_db(settings: &Settings) -> Result<()> {
    let repository = Arc::new(DieselFixtureRepository::new(pool(settings).await?));
    let seeder = FixtureSeeder::new(repository, Arc::new(DefaultClock));
    seeder
        .seed()
        .await
        .wrap_err("failed to populate the database")?;
    Ok(())
}

async fn run(settings: &Settings) -> Result<()> {
    let config = ServerConfig::new(settings.bind_addr()?, pool(settings).await?);
    info!(bind_addr = %config.bind_addr(), "starting server");
    create_server(config)?.await?;
    Ok(())
}
