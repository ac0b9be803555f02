// ==========================================
// ANS 合规报告 - 罚金结果
// ==========================================
// 每个报告期间由系统级可用率计算一次,嵌入报告载荷,不单独持久化
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// PenaltyResult - 罚金结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyResult {
    pub applies: bool,             // 是否适用罚金
    pub deficit_pct: f64,          // 缺口 (百分点),达标时为 0
    pub penalty_rate_pct: Decimal, // 档位罚金比例 (%)
    pub penalty_value: Decimal,    // 罚金金额 = 月合同额 × 比例 / 100,按最小货币单位四舍五入
}

impl PenaltyResult {
    /// 达标时的零罚金结果
    pub fn not_applicable() -> Self {
        Self {
            applies: false,
            deficit_pct: 0.0,
            penalty_rate_pct: Decimal::ZERO,
            penalty_value: Decimal::ZERO,
        }
    }
}
