/**
* filename : calculator
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use rust_decimal::Decimal;

use crate::engine::window::Window;
use crate::error::VwapError;

/// VWAP 계산기 인터페이스
///
/// 처리 스테이지가 목 계산기로 테스트될 수 있도록 분리된 경계입니다.
#[cfg_attr(test, mockall::automock)]
pub trait VwapCalculator: Send {
  /// 현재 VWAP 값
  fn vwap(&self) -> Decimal;

  /// 새 체결을 윈도우에 반영하고 갱신된 VWAP을 반환
  fn add_data_point(&mut self, price: Decimal, size: Decimal) -> Result<Decimal, VwapError>;
}

/// 고정 윈도우 기반 증분 VWAP 계산기
///
/// 매 갱신은 O(1)입니다. 가장 오래된 데이터를 교체하면서 누적 합계를
/// 차액만큼 조정하므로, 처음부터 다시 계산한 값과 항상 정확히 일치합니다.
#[derive(Debug)]
pub struct VwapCalc {
  window: Window,
  vwap: Decimal,
}

impl VwapCalc {
  /// 윈도우 크기가 0이면 `ConfigError`
  pub fn new(window_size: usize) -> Result<Self, VwapError> {
    Ok(VwapCalc {
      window: Window::new(window_size)?,
      vwap: Decimal::ZERO,
    })
  }

  pub fn window(&self) -> &Window {
    &self.window
  }
}

impl VwapCalculator for VwapCalc {
  fn vwap(&self) -> Decimal {
    self.vwap
  }

  fn add_data_point(&mut self, price: Decimal, size: Decimal) -> Result<Decimal, VwapError> {
    self.window.insert(price, size)?;

    // 총 수량이 0이면 VWAP도 0 (윈도우가 아직 비었거나 전부 0 수량인 경우)
    self.vwap = if self.window.total_size().is_zero() {
      Decimal::ZERO
    } else {
      self.window.total_value() / self.window.total_size()
    };

    Ok(self.vwap)
  }
}
