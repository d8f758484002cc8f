use crate::error::AppError;
use crate::middlewares::AuthedAccount;
use crate::models::*;
use crate::services::{CatalogService, EligibilityService, StatsService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

/// 管理端接口要求 admin 角色 (JWT claims 携带)
fn require_admin(req: &HttpRequest) -> std::result::Result<(), AppError> {
    match req.extensions().get::<AuthedAccount>() {
        Some(a) if a.is_admin => Ok(()),
        Some(_) => Err(AppError::PermissionDenied),
        None => Err(AppError::AuthError("Missing access token".to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/admin/spin-wheel/validate",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "校验完成 (valid 标识配置是否健康)", body = CatalogValidationResponse),
        (status = 401, description = "未授权"),
        (status = 403, description = "非管理员")
    )
)]
/// 校验奖励配置: 权重合计、单项金额与权重
pub async fn validate_catalog(
    service: web::Data<CatalogService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match service.validate().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/spin-wheel/stats",
    tag = "admin",
    params(
        ("recent_limit" = Option<u64>, Query, description = "最近记录条数 (默认20, 上限50)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取统计成功", body = WheelStatsResponse),
        (status = 401, description = "未授权"),
        (status = 403, description = "非管理员")
    )
)]
/// 抽奖统计: 总量 / 按稀有度 / 已领取按币种 / 最近记录
pub async fn get_stats(
    service: web::Data<StatsService>,
    req: HttpRequest,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match service.get_stats(&query.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/spin-wheel/grants/threshold",
    tag = "admin",
    request_body = ThresholdGrantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "发放成功 (同一门槛重复调用为空操作)", body = EligibilityResponse),
        (status = 400, description = "参数错误"),
        (status = 401, description = "未授权"),
        (status = 403, description = "非管理员")
    )
)]
/// 门槛发放: 账户消费跨过门槛后由消费流水侧调用
pub async fn grant_threshold(
    service: web::Data<EligibilityService>,
    req: HttpRequest,
    body: web::Json<ThresholdGrantRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    let body = body.into_inner();
    match service
        .grant_threshold(
            body.account_id,
            body.threshold_id,
            body.spend_threshold_cents,
            body.spins,
        )
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/spin-wheel")
            .route("/validate", web::get().to(validate_catalog))
            .route("/stats", web::get().to(get_stats))
            .route("/grants/threshold", web::post().to(grant_threshold)),
    );
}
