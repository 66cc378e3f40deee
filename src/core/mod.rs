//! Core business logic - framework-agnostic operations over the store.
//!
//! Each submodule owns one entity's operations (validated create/update,
//! lookups, deletes) plus the interactive pieces that deserve isolated
//! testing: deal lifecycle evaluation, reorder coordination, expense
//! analytics, and variant reconciliation.

/// Expense analytics - breakdowns and aggregate stats over filtered expenses
pub mod analytics;
/// Account registration, login, and session management
pub mod auth;
/// Promotional banner operations
pub mod banner;
/// Blog post operations and publish workflow
pub mod blog;
/// Category operations and ordering
pub mod category;
/// Flash-deal operations, lifecycle evaluation, and the live countdown
pub mod deal;
/// Expense recording with write-time tax derivation, and filtered listing
pub mod expense;
/// Menu operations
pub mod menu;
/// Product operations, variant reconciliation, and badge conversion
pub mod product;
/// Drag-and-drop reorder coordination with optimistic persistence
pub mod reorder;
/// Supplier operations
pub mod supplier;
