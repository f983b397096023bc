//! Resource resolution: account resource to table handle to table item.

use crate::errors::{ClientError, LedgerError};
use crate::ledger::LedgerClient;
use serde::de::DeserializeOwned;
use token_core::{Address, MoveResource, MoveStructTag, TableHandle, TableItemRequest, TokenResource, TokenStore};
use tracing::debug;

/// Resolves token tables through an account's resources.
///
/// Handles are fetched on every call; nothing is cached.
pub struct ResourceResolver<'a, L: LedgerClient + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: LedgerClient + ?Sized> ResourceResolver<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Fetches the resource carrying `store` from `account` and extracts its table handle.
    pub async fn resolve_table_handle(&self, account: &Address, store: TokenStore) -> Result<TableHandle, ClientError> {
        let expected = store.resource_tag();
        let resource = self
            .ledger
            .get_account_resource(account, &expected)
            .await
            .map_err(|e| match e {
                LedgerError::NotFound(_) => ClientError::ResourceNotFound {
                    address: account.to_string(),
                    resource: expected.to_string(),
                },
                other => ClientError::Ledger(other),
            })?;

        if resource.resource_type != expected {
            return Err(type_mismatch(&expected, &resource.resource_type));
        }

        let decoded = TokenResource::decode(&resource.resource_type, resource.data)?;
        let handle = decoded
            .table(store)
            .cloned()
            .ok_or_else(|| type_mismatch(&expected, &resource.resource_type))?;

        debug!(
            "Resolved {} of {} on {} to table {}",
            store.field_path(),
            expected,
            account,
            handle
        );
        Ok(handle)
    }

    /// Looks up one entry of a table and decodes it as `V`.
    pub async fn lookup<V: DeserializeOwned>(
        &self,
        handle: &TableHandle,
        request: &TableItemRequest,
    ) -> Result<V, ClientError> {
        debug!(
            "Looking up {} in table {} ({} -> {})",
            request.key, handle, request.key_type, request.value_type
        );
        let value = self
            .ledger
            .get_table_item(handle, request)
            .await
            .map_err(|e| match e {
                LedgerError::NotFound(_) => ClientError::TableItemNotFound {
                    handle: handle.to_string(),
                    key: request.key.to_string(),
                },
                other => ClientError::Ledger(other),
            })?;

        serde_json::from_value(value).map_err(|e| ClientError::Decode {
            type_name: request.value_type.to_string(),
            reason: e.to_string(),
        })
    }

    /// Searches one listing of an account's resources for each of `tags`.
    ///
    /// A resource naming the same struct with different generic parameters is
    /// a type mismatch rather than a miss.
    pub async fn find_resources(
        &self,
        account: &Address,
        tags: &[MoveStructTag],
    ) -> Result<Vec<Option<MoveResource>>, ClientError> {
        let resources = self.ledger.get_account_resources(account).await?;
        debug!("Account {} holds {} resources", account, resources.len());
        tags.iter()
            .map(|tag| select_resource(&resources, tag).map(|found| found.cloned()))
            .collect()
    }
}

/// Picks the resource structurally equal to `tag` out of a resource list.
pub fn select_resource<'r>(
    resources: &'r [MoveResource],
    tag: &MoveStructTag,
) -> Result<Option<&'r MoveResource>, ClientError> {
    let mut near_miss = None;
    for resource in resources {
        if resource.resource_type == *tag {
            return Ok(Some(resource));
        }
        if resource.resource_type.same_struct(tag) {
            near_miss = Some(&resource.resource_type);
        }
    }

    match near_miss {
        Some(actual) => Err(type_mismatch(tag, actual)),
        None => Ok(None),
    }
}

fn type_mismatch(expected: &MoveStructTag, actual: &MoveStructTag) -> ClientError {
    ClientError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}
