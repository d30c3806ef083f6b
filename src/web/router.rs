//! Admin router.
//!
//! List pages answer GET and POST on the same path; writes are POST only.
//! Patients and scheduled tests have no delete route, statuses and
//! results only update.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::db::ConnectionProvider;
use crate::web::access_log;
use crate::web::endpoints::{
    appointments, clinics, export, home, lab_tests, patients, reset, results, scheduled_tests,
    statuses,
};
use crate::web::flash::FlashSigner;
use crate::web::types::AppContext;

/// Build the router from its parts.
pub fn admin_router(
    db: Arc<dyn ConnectionProvider>,
    flash: FlashSigner,
    static_dir: impl Into<std::path::PathBuf>,
) -> Router {
    build_router(AppContext::new(db, flash, static_dir.into()))
}

pub fn build_router(ctx: AppContext) -> Router {
    let static_files = ServeDir::new(&ctx.static_dir);

    Router::new()
        .route("/", get(home::index))
        .route("/reset", get(reset::reset))
        .route("/export", get(export::download))
        .route("/clinics", get(clinics::list).post(clinics::list))
        .route("/clinics/create", post(clinics::create))
        .route("/clinics/update", post(clinics::update))
        .route("/clinics/delete", post(clinics::delete))
        .route("/patients", get(patients::list).post(patients::list))
        .route("/patients/create", post(patients::create))
        .route("/patients/update", post(patients::update))
        .route("/appointments", get(appointments::list).post(appointments::list))
        .route("/appointments/create", post(appointments::create))
        .route("/appointments/update", post(appointments::update))
        .route("/appointments/delete", post(appointments::delete))
        .route("/statuses", get(statuses::list).post(statuses::list))
        .route("/statuses/update", post(statuses::update))
        .route("/tests", get(lab_tests::list).post(lab_tests::list))
        .route("/tests/create", post(lab_tests::create))
        .route("/tests/update", post(lab_tests::update))
        .route("/tests/delete", post(lab_tests::delete))
        .route("/results", get(results::list).post(results::list))
        .route("/results/update", post(results::update))
        .route(
            "/scheduledtests",
            get(scheduled_tests::list).post(scheduled_tests::list),
        )
        .route("/scheduledtests/create", post(scheduled_tests::create))
        .route("/scheduledtests/update", post(scheduled_tests::update))
        .nest_service("/static", static_files)
        .with_state(ctx)
        .layer(axum::middleware::from_fn(access_log::log_access))
}
