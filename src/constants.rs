// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how the system pages: how many records a server page carries, how many
//! rows a display page shows, how long a fetch may hang.

// ---------------------------------------------------------------------------
// Pagination boundaries
// ---------------------------------------------------------------------------

/// How many records a single server page carries.
///
/// The admin console fetches in pages of 20. Display windowing happens
/// separately on the client side; see `DISPLAY_PAGE_SIZE`.
pub const SERVER_PAGE_SIZE: u32 = 20;

/// How many rows a display page shows at once.
///
/// A display page is a client-side slice over already-fetched (and
/// filtered) records. It is deliberately the same size as a server page
/// but counted by an independent cursor; the two never share a counter.
pub const DISPLAY_PAGE_SIZE: usize = 20;

/// Upper bound on server page size accepted from configuration.
///
/// Document-store gateways cap query fan-out; 100 matches the common
/// ceiling and keeps a single response comfortably in memory.
pub const MAX_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Fetch timing
// ---------------------------------------------------------------------------

/// How long a single page fetch may take before it is abandoned.
///
/// The store contract carries no cancellation token, so without this guard
/// a hung request would leave a controller loading forever.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Record field conventions
// ---------------------------------------------------------------------------

/// Field that carries the stable unique identifier of a record.
pub const ID_FIELD: &str = "id";

/// Field that carries the creation timestamp used for stable ordering.
pub const CREATED_AT_FIELD: &str = "created_at";

/// Field the users collection is narrowed by when an action tag is given.
pub const ACTION_FIELD: &str = "action";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
