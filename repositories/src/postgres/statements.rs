use deadpool_postgres::Object;
use tokio_postgres::Statement;
use tokio_postgres::types::Type;

/// `exists` collapses any number of matching rows into a single yes/no,
/// so duplicate ids in the store never turn into a lookup error.
const CERTIFICATION_EXISTS: &str =
    "select exists(select 1 from certifications where certification_id = $1) as found";

pub async fn certification_exists(client: &Object) -> Result<Statement, tokio_postgres::Error> {
    client
        .prepare_typed_cached(CERTIFICATION_EXISTS, &[Type::VARCHAR])
        .await
}
