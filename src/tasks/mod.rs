//! Background scheduled tasks for the application.
//!
//! This module centralizes all recurring background jobs (reward catalog
//! validation, unclaimed-draw bookkeeping). Call `spawn_all` once during
//! startup to launch them.

use crate::services::{CatalogService, StatsService};

/// Spawn all background tasks.
///
/// Notes
/// - Each task is read-only against the ledger and safe to run on every node.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(catalog_service: CatalogService, stats_service: StatsService) {
    // 每小时校验奖励配置, 配置问题只告警不阻断
    {
        let svc = catalog_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.validate().await {
                    Ok(v) if !v.valid => {
                        for issue in &v.issues {
                            log::warn!("Reward catalog issue: {issue}");
                        }
                    }
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to validate reward catalog: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            }
        });
    }

    // 每天记录未领取台账数量 (台账无过期策略, 存量需运营关注)
    {
        let svc = stats_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.count_unclaimed().await {
                    Ok(n) if n > 0 => log::info!("Unclaimed wheel draws outstanding: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to count unclaimed draws: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(24 * 3600)).await;
            }
        });
    }
}
