//! JSON REST API for Casefile.
//!
//! Exposes an axum [`Router`] backed by any
//! [`casefile_core::store::RecordStore`]. Every handler expects a
//! [`Requester`](casefile_core::Requester) request extension; authenticating
//! the caller and inserting it is the embedding server's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", casefile_api::api_router(store.clone()))
//! ```

pub mod dashboard;
pub mod error;
pub mod joined;
pub mod profile;
pub mod records;


use std::sync::Arc;

use axum::{Router, routing::get};
use casefile_core::{
  Child, Record,
  case::Case,
  evidence::Evidence,
  lab_report::LabReport,
  officer::Officer,
  store::RecordStore,
  suspect::Suspect,
};

pub use dashboard::DashboardSummary;
pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  let router = Router::new()
    // Profile
    .route(
      "/profile",
      get(profile::get_own::<S>).put(profile::update_own::<S>),
    )
    // Joined reads; static segments win over `/{id}`.
    .route("/evidence/with-case", get(joined::evidence_with_case::<S>))
    .route("/suspects/with-case", get(joined::suspects_with_case::<S>))
    .route(
      "/lab-reports/with-evidence",
      get(joined::lab_reports_with_evidence::<S>),
    )
    // Dashboard
    .route("/dashboard", get(dashboard::summary::<S>));

  let router = crud::<S, Officer>(router, "/officers");
  let router = crud::<S, Case>(router, "/cases");
  let router = crud::<S, Suspect>(router, "/suspects");
  let router = crud::<S, Evidence>(router, "/evidence");
  let router = crud::<S, LabReport>(router, "/lab-reports");

  let router = children::<S, Evidence>(router, "/cases/{id}/evidence");
  let router = children::<S, Suspect>(router, "/cases/{id}/suspects");
  let router = children::<S, LabReport>(router, "/evidence/{id}/lab-reports");

  router.with_state(store)
}

/// `GET`/`POST {base}` and `GET`/`PUT`/`DELETE {base}/{id}` for one record
/// type.
fn crud<S, R>(router: Router<Arc<S>>, base: &str) -> Router<Arc<S>>
where
  S: RecordStore + 'static,
  R: Record,
{
  router
    .route(
      base,
      get(records::list::<S, R>).post(records::create::<S, R>),
    )
    .route(
      &format!("{base}/{{id}}"),
      get(records::get_one::<S, R>)
        .put(records::update::<S, R>)
        .delete(records::delete::<S, R>),
    )
}

fn children<S, R>(router: Router<Arc<S>>, path: &str) -> Router<Arc<S>>
where
  S: RecordStore + 'static,
  R: Child,
{
  router.route(path, get(records::list_children::<S, R>))
}
