use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 발행되는 VWAP 스냅샷
///
/// 체결 한 건을 소비할 때마다 한 건씩 생성되며, 한 줄의 JSON 객체로 직렬화됩니다.
/// 예: `{"trading_pair":"BTC-USD","last_trade_at":"2022-11-02T14:27:48.932205Z","vwap":"20406.33"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vwap {
    pub trading_pair: String,
    pub last_trade_at: DateTime<Utc>,
    pub vwap: Decimal,
}
