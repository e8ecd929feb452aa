use mongodb::{Database, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Round-trip a `ping` against `db`.
pub async fn check_health(db: &Database) -> DatabaseResult<()> {
    db.run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
