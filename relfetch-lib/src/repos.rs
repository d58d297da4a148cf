use crate::forge_client::ForgeClient;
use crate::github::Repository;
use anyhow::Result;

/// Repositories owned by the authenticated user whose full name satisfies
/// `predicate`, in the order the forge reports them. Transport and auth
/// errors from the client propagate to the caller.
pub async fn matching_repositories<C, P>(client: &C, predicate: P) -> Result<Vec<Repository>>
where
    C: ForgeClient,
    P: Fn(&str) -> bool,
{
    let repositories = client.owned_repositories().await?;
    Ok(repositories
        .into_iter()
        .filter(|repo| predicate(&repo.full_name))
        .collect())
}
