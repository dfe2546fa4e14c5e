//! Account credentials used to sign requests.

use crate::config::{CosmosConfig, DatabaseAccount, MasterKey};

/// The identity every request of a client is signed with.
///
/// A credential is immutable once built. The master key inside has already
/// been decoded by [`MasterKey::new`], so signing never decodes it again.
///
/// # Thread Safety
///
/// `Credential` is `Send + Sync` and is shared behind an `Arc` by
/// [`Signer`](crate::auth::Signer).
///
/// # Example
///
/// ```rust
/// use cosmosdb::auth::Credential;
/// use cosmosdb::{DatabaseAccount, MasterKey};
///
/// let credential = Credential::new(
///     DatabaseAccount::new("testaccount").unwrap(),
///     MasterKey::new("c2VjcmV0").unwrap(),
/// );
/// assert_eq!(credential.account().as_ref(), "testaccount");
/// assert!(!format!("{credential:?}").contains("c2VjcmV0"));
/// ```
#[derive(Clone, Debug)]
pub struct Credential {
    account: DatabaseAccount,
    key: MasterKey,
}

impl Credential {
    /// Creates a credential from an account and its decoded master key.
    #[must_use]
    pub const fn new(account: DatabaseAccount, key: MasterKey) -> Self {
        Self { account, key }
    }

    /// Creates a credential from a client configuration.
    #[must_use]
    pub fn from_config(config: &CosmosConfig) -> Self {
        Self::new(config.account().clone(), config.master_key().clone())
    }

    /// Returns the database account.
    #[must_use]
    pub const fn account(&self) -> &DatabaseAccount {
        &self.account
    }

    pub(crate) const fn key(&self) -> &MasterKey {
        &self.key
    }
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};
