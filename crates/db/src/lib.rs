use sqlx_migrator::{Info, Migrator};

mod m0001;
mod pool;
mod store;
pub mod table;

pub use pool::*;
pub use store::*;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::<sqlx::Sqlite>::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}
