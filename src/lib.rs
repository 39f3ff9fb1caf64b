//! 실시간 VWAP 계산 엔진 라이브러리
//!
//! 거래 체결 스트림으로부터 심볼별 윈도우 VWAP을 계산하여 발행하는 시스템입니다.

pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod publisher;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::VwapError;
pub use crate::models::trade::Trade;
pub use crate::models::vwap::Vwap;
pub use crate::engine::calculator::{VwapCalc, VwapCalculator};
pub use crate::engine::window::{DataPoint, Window};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, VwapError>;
