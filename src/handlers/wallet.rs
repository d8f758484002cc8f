use crate::middlewares::AuthedAccount;
use crate::models::*;
use crate::services::WalletService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

/// 从请求扩展中获取账户上下文 (中间件在鉴权后注入)
fn get_account_from_request(req: &HttpRequest) -> Option<AuthedAccount> {
    req.extensions().get::<AuthedAccount>().copied()
}

#[utoipa::path(
    get,
    path = "/wallet",
    tag = "wallet",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取余额成功", body = WalletBalanceResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "账户不存在")
    )
)]
/// 获取两种币余额
pub async fn get_balance(
    service: web::Data<WalletService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    match service.get_balances(account_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/wallet/transactions",
    tag = "wallet",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20, 上限50)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取流水成功", body = PaginatedResponse<CoinTransactionResponse>),
        (status = 401, description = "未授权")
    )
)]
/// 分页获取币流水 (倒序)
pub async fn get_transactions(
    service: web::Data<WalletService>,
    req: HttpRequest,
    query: web::Query<CoinTransactionQuery>,
) -> Result<HttpResponse> {
    let account_id = get_account_from_request(&req).map(|a| a.id).unwrap_or(0);
    match service
        .list_transactions(account_id, &query.into_inner())
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn wallet_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wallet")
            .route("", web::get().to(get_balance))
            .route("/transactions", web::get().to(get_transactions)),
    );
}
