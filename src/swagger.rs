use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{CurrencyType, WheelRarity};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::spin_wheel::get_rewards,
        handlers::spin_wheel::get_eligibility,
        handlers::spin_wheel::spin,
        handlers::spin_wheel::claim,
        handlers::spin_wheel::get_history,
        handlers::spin_wheel::grant_first_time,
        handlers::spin_wheel::grant_random,
        handlers::wallet::get_balance,
        handlers::wallet::get_transactions,
        handlers::admin::validate_catalog,
        handlers::admin::get_stats,
        handlers::admin::grant_threshold,
    ),
    components(
        schemas(
            CurrencyType,
            WheelRarity,
            WheelRewardPublicResponse,
            WheelWonReward,
            SpinResponse,
            ClaimRequest,
            ClaimResponse,
            DrawHistoryQuery,
            DrawRecordResponse,
            EligibilityResponse,
            RandomGrantResponse,
            ThresholdGrantRequest,
            CatalogValidationResponse,
            StatsQuery,
            RarityCount,
            CurrencyDisbursement,
            AdminDrawRecordResponse,
            WheelStatsResponse,
            WalletBalanceResponse,
            CoinTransactionQuery,
            CoinTransactionResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "spin_wheel", description = "Spin wheel API"),
        (name = "wallet", description = "Wallet API"),
        (name = "admin", description = "Admin API"),
    ),
    info(
        title = "Sweepspin Backend API",
        version = "1.0.0",
        description = "Sweepspin Backend REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
