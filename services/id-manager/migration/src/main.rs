use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(iim_migration::Migrator).await;
}
