use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::PgConnection;

use crate::errors::ApiError;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Checks a connection out of the pool for the current request. The guard
/// returns it on every exit path, including early error returns.
pub fn get_conn(pool: &DbPool) -> Result<DbConn, ApiError> {
    Ok(pool.get()?)
}
