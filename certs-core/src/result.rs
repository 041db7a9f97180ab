use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<RepoError>>;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("failed to look up certification")]
    Lookup,
    #[error("failed to acquire a store connection")]
    Connection,
}
