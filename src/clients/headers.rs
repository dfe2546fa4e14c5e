//! Header names used by the Cosmos DB REST protocol.
//!
//! Response header lookups are done on lower-cased names.

/// Request timestamp, RFC 1123.
pub const DATE: &str = "x-ms-date";
/// Protocol version.
pub const VERSION: &str = "x-ms-version";
/// Master-key token.
pub const AUTHORIZATION: &str = "authorization";
/// Request body media type.
pub const CONTENT_TYPE: &str = "content-type";
/// Accepted response media type.
pub const ACCEPT: &str = "accept";
/// Client identification.
pub const USER_AGENT: &str = "user-agent";

/// Optimistic-concurrency precondition.
pub const IF_MATCH: &str = "if-match";
/// Entity tag of the returned entity.
pub const ETAG: &str = "etag";
/// Paging cursor, both directions.
pub const CONTINUATION: &str = "x-ms-continuation";
/// JSON-array encoded partition key value.
pub const PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
/// Marks a POST as a query.
pub const IS_QUERY: &str = "x-ms-documentdb-isquery";
/// Lets a query fan out over all partitions.
pub const ENABLE_CROSS_PARTITION_QUERY: &str = "x-ms-documentdb-query-enablecrosspartition";
/// Page size hint.
pub const MAX_ITEM_COUNT: &str = "x-ms-max-item-count";
/// Turns a create into an upsert.
pub const IS_UPSERT: &str = "x-ms-documentdb-is-upsert";

/// Wait hint on throttled responses, in milliseconds.
pub const RETRY_AFTER_MS: &str = "x-ms-retry-after-ms";
/// Server-side id of the operation.
pub const ACTIVITY_ID: &str = "x-ms-activity-id";
/// Request units consumed by the operation.
pub const REQUEST_CHARGE: &str = "x-ms-request-charge";
/// Session consistency token.
pub const SESSION_TOKEN: &str = "x-ms-session-token";
