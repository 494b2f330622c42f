/// Router Module Index
///
/// Organizes the application's routing into access-segregated modules so that
/// access control is applied explicitly at the module level (via Axum layers),
/// never ad hoc inside handlers.
///
/// The three modules map to the three kinds of traffic the portal serves.

/// Browser-facing page routes (marketing site + app shell) plus the root
/// infrastructure files. Guarded by the route-classification gate.
pub mod pages;

/// JSON API routes accessible to all users (anonymous, read-only).
pub mod public;

/// JSON API routes protected by the `AuthUser` extractor middleware.
/// Requires a recognized session cookie.
pub mod authenticated;
