//! GitHub infrastructure adapter.
//!
//! Implements the board traits defined in the [`filing`] crate
//! ([`filing::ClassicProjectBoard`] and [`filing::ProjectV2Board`]) on a
//! single [`GitHubClient`]:
//!
//! | Trait | API | Calls |
//! |-------|-----|-------|
//! | `ClassicProjectBoard` | REST | `GET /projects/{id}`, `GET /projects/{id}/columns`, `POST /projects/columns/{id}/cards` |
//! | `ProjectV2Board` | GraphQL | `organization.projectV2`, `addProjectV2ItemById`, `updateProjectV2ItemFieldValue` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. HTTP
//! transport, headers, and response decoding live here; the [`filing`] crate
//! never sees them. Every failure is mapped onto [`filing::BoardApiError`].

mod classic;
mod client;
mod project_v2;

pub use client::{GitHubClient, GitHubClientConfig, DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};
