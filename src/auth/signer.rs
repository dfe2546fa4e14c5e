//! Master-key request signing.
//!
//! Every request is authorized with an HMAC-SHA256 signature over a canonical
//! string built from the verb, the resource descriptor and the request date.
//! The signature is base64 encoded and wrapped as
//! `type=master&ver=1.0&sig=<signature>`, then percent-encoded as a whole.
//!
//! # Example
//!
//! ```rust
//! use cosmosdb::auth::{Credential, Signer};
//! use cosmosdb::{DatabaseAccount, HttpMethod, MasterKey, ResourceDescriptor, ResourceLink, ResourceType};
//!
//! let credential = Credential::new(
//!     DatabaseAccount::new("testaccount").unwrap(),
//!     MasterKey::new("c2VjcmV0").unwrap(),
//! );
//! let signer = Signer::new(credential);
//! let descriptor = ResourceDescriptor::new(ResourceType::Databases, ResourceLink::root());
//!
//! let token = signer.authorization(HttpMethod::Get, &descriptor, "Mon, 01 Jan 2024 00:00:00 GMT");
//! assert!(token.starts_with("type%3Dmaster%26ver%3D1.0%26sig%3D"));
//! ```

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::{Credential, ResourceDescriptor};
use crate::clients::HttpMethod;

type HmacSha256 = Hmac<Sha256>;

/// Authorization scheme for master-key tokens.
const TOKEN_TYPE: &str = "master";

/// Version of the master-key token format.
const TOKEN_VERSION: &str = "1.0";

/// Formats a timestamp the way the `x-ms-date` header expects (RFC 1123).
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use cosmosdb::auth::format_request_date;
///
/// let at = Utc.with_ymd_and_hms(1994, 11, 1, 8, 12, 31).unwrap();
/// assert_eq!(format_request_date(at), "Tue, 01 Nov 1994 08:12:31 GMT");
/// ```
#[must_use]
pub fn format_request_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Returns a fresh `x-ms-date` value for the current instant.
#[must_use]
pub fn request_date() -> String {
    format_request_date(Utc::now())
}

/// Builds the canonical string a master-key signature covers.
///
/// The final line is always empty.
#[must_use]
pub fn string_to_sign(method: HttpMethod, descriptor: &ResourceDescriptor, date: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}\n\n",
        method.as_str().to_lowercase(),
        descriptor.resource_type.as_str().to_lowercase(),
        descriptor.link,
        date.to_lowercase(),
    )
}

/// Produces authorization header values from a shared [`Credential`].
///
/// The signer holds no per-request state; cloning it is cheap and the same
/// instance may sign requests from many tasks at once.
#[derive(Clone, Debug)]
pub struct Signer {
    credential: Arc<Credential>,
}

impl Signer {
    /// Creates a signer for the given credential.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            credential: Arc::new(credential),
        }
    }

    /// Returns the credential this signer uses.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the `authorization` header value for one request.
    ///
    /// The output depends only on the arguments and the key, so identical
    /// inputs always produce identical tokens.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
    pub fn authorization(
        &self,
        method: HttpMethod,
        descriptor: &ResourceDescriptor,
        date: &str,
    ) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credential.key().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(string_to_sign(method, descriptor, date).as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type={TOKEN_TYPE}&ver={TOKEN_VERSION}&sig={signature}");
        urlencoding::encode(&token).into_owned()
    }
}
