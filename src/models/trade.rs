use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 피드에서 수신한 단일 체결
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trading_pair: String,
    pub price: Decimal,
    pub size: Decimal,
    pub time: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        trading_pair: impl Into<String>,
        price: Decimal,
        size: Decimal,
        time: DateTime<Utc>,
    ) -> Self {
        Trade {
            trading_pair: trading_pair.into(),
            price,
            size,
            time,
        }
    }
}
