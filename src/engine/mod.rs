//! 윈도우 VWAP 계산 엔진
//!
//! 고정 크기 순환 버퍼 위에서 증분 방식으로 VWAP을 계산합니다.

pub mod calculator;
pub mod window;

pub use calculator::{VwapCalc, VwapCalculator};
pub use window::{DataPoint, Window};
