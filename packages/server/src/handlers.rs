//! HTTP handler functions for the candy map API.

use actix_web::{HttpResponse, web};
use candy_map_property::RecordFilter;
use candy_map_ranking::clamp_count;
use candy_map_server_models::{ApiError, ApiHealth, TopStreetsParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/neighborhoods`
///
/// Lists the assessor neighborhoods present in the loaded dataset.
pub async fn neighborhoods(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(candy_map_property::neighborhoods(&state.records))
}

/// `GET /api/top-streets`
///
/// Ranks the residential streets of one neighborhood.
pub async fn top_streets(
    state: web::Data<AppState>,
    params: web::Query<TopStreetsParams>,
) -> HttpResponse {
    let Some(neighborhood) = params.neighborhood.as_deref().filter(|n| !n.is_empty()) else {
        return HttpResponse::BadRequest().json(ApiError::missing_parameter("neighborhood"));
    };

    let records = RecordFilter::residential_in(neighborhood).apply(&state.records);
    let report = state.ranker.rank(&records, clamp_count(params.count));

    log::info!(
        "Ranked {} streets in {neighborhood} from {} records ({} skipped)",
        report.streets.len(),
        report.considered,
        report.skipped_count()
    );

    HttpResponse::Ok().json(report.streets)
}
