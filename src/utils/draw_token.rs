use uuid::Uuid;

/// 生成抽奖领取凭证
///
/// 凭证即领取能力 (claim capability), 必须不可枚举:
/// UUIDv4 由操作系统熵源生成 122 位随机数, 不含时间戳或计数器成分
pub fn generate_draw_id() -> String {
    format!("draw_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_id_format() {
        let id = generate_draw_id();
        assert!(id.starts_with("draw_"));
        // "draw_" + 32 位十六进制
        assert_eq!(id.len(), 5 + 32);
        assert!(id["draw_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_draw_ids_are_unique() {
        let a = generate_draw_id();
        let b = generate_draw_id();
        assert_ne!(a, b);
    }
}
