use crate::middlewares::AuthedAccount;
use crate::models::*;
use crate::services::{CatalogService, ClientMetadata, DrawService, EligibilityService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

/// 从请求扩展中获取账户上下文 (中间件在鉴权后注入)
fn get_account_from_request(req: &HttpRequest) -> Option<AuthedAccount> {
    req.extensions().get::<AuthedAccount>().copied()
}

/// 请求来源信息, 仅写入台账审计字段
fn client_metadata(req: &HttpRequest) -> ClientMetadata {
    ClientMetadata {
        ip: req
            .connection_info()
            .realip_remote_addr()
            .map(|s| s.to_string()),
        user_agent: req
            .headers()
            .get(actix_web::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/rewards",
    tag = "spin_wheel",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取奖励列表成功", body = [WheelRewardPublicResponse]),
        (status = 401, description = "未授权")
    )
)]
/// 获取当前启用的奖励配置 (仅展示信息, 不含权重)
pub async fn get_rewards(service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match service.list_public().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/eligibility",
    tag = "spin_wheel",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取抽奖资格成功", body = EligibilityResponse),
        (status = 401, description = "未授权")
    )
)]
/// 获取账户当前抽奖资格 (按来源拆分)
/// 如果账户从未产生过记录, 会自动初始化为0
pub async fn get_eligibility(
    service: web::Data<EligibilityService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    match service.get_eligibility(account_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin-wheel/spin",
    tag = "spin_wheel",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "抽奖成功", body = SpinResponse),
        (status = 400, description = "没有可用次数或其它业务错误"),
        (status = 401, description = "未授权")
    )
)]
/// 进行一次抽奖:
/// 1. 消耗一次资格 (无可用次数则拒绝)
/// 2. 按权重随机选取奖励
/// 3. 生成带领取凭证的台账记录并返回
pub async fn spin(service: web::Data<DrawService>, req: HttpRequest) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    let meta = client_metadata(&req);
    match service.spin(account_id, meta).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin-wheel/claim",
    tag = "spin_wheel",
    request_body = ClaimRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "领取成功", body = ClaimResponse),
        (status = 404, description = "凭证不存在"),
        (status = 409, description = "已领取"),
        (status = 401, description = "未授权")
    )
)]
/// 领取奖励 (按凭证入账, 幂等: 重复领取返回 ALREADY_CLAIMED, 余额不变)
pub async fn claim(
    service: web::Data<DrawService>,
    req: HttpRequest,
    body: web::Json<ClaimRequest>,
) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    match service.claim(account_id, &body.draw_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/history",
    tag = "spin_wheel",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20, 上限50)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取抽奖台账成功", body = PaginatedResponse<DrawRecordResponse>),
        (status = 401, description = "未授权")
    )
)]
/// 分页获取账户抽奖台账 (倒序)
pub async fn get_history(
    service: web::Data<DrawService>,
    req: HttpRequest,
    query: web::Query<DrawHistoryQuery>,
) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    match service.list_history(account_id, &query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin-wheel/grants/first-time",
    tag = "spin_wheel",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "发放成功 (已发放过则为空操作)", body = EligibilityResponse),
        (status = 401, description = "未授权")
    )
)]
/// 首次发放抽奖次数 (每账户一次, 重复调用为空操作)
pub async fn grant_first_time(
    service: web::Data<EligibilityService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    match service.grant_first_time(account_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin-wheel/grants/random",
    tag = "spin_wheel",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "检查完成 (granted 标识本次是否发放)", body = RandomGrantResponse),
        (status = 401, description = "未授权")
    )
)]
/// 随机发放检查: 冷却窗口内直接拒绝, 否则按配置概率掷签
pub async fn grant_random(
    service: web::Data<EligibilityService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    match service.grant_random_if_eligible(account_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn spin_wheel_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/spin-wheel")
            .route("/rewards", web::get().to(get_rewards))
            .route("/eligibility", web::get().to(get_eligibility))
            .route("/spin", web::post().to(spin))
            .route("/claim", web::post().to(claim))
            .route("/history", web::get().to(get_history))
            .route("/grants/first-time", web::post().to(grant_first_time))
            .route("/grants/random", web::post().to(grant_random)),
    );
}
