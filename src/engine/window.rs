/**
* filename : window
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use rust_decimal::Decimal;

use crate::error::VwapError;

/// 윈도우에 저장되는 단일 체결 데이터
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DataPoint {
  pub price: Decimal,
  pub size: Decimal,
}

impl DataPoint {
  pub fn new(price: Decimal, size: Decimal) -> Self {
    DataPoint { price, size }
  }

  /// 체결 가치 (가격 * 수량)
  pub fn value(&self) -> Decimal {
    self.price * self.size
  }
}

/// 최근 체결 N건을 보관하는 고정 용량 순환 버퍼
///
/// 버퍼는 생성 시 0 값 데이터로 채워지며, 0 값은 두 누적 합계에
/// 아무 기여도 하지 않으므로 별도의 "채워짐" 상태 필드가 필요 없습니다.
/// 누적 합계는 항상 버퍼 내용의 합과 정확히 일치해야 합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
  capacity: usize,
  data_points: Vec<DataPoint>,
  oldest_idx: usize,
  total_value: Decimal,
  total_size: Decimal,
}

impl Window {
  /// 용량이 0이면 `ConfigError`
  pub fn new(capacity: usize) -> Result<Self, VwapError> {
    if capacity == 0 {
      return Err(VwapError::ConfigError(
        "window capacity must be positive".to_string(),
      ));
    }

    let window = Window {
      capacity,
      data_points: vec![DataPoint::default(); capacity],
      oldest_idx: 0,
      total_value: Decimal::ZERO,
      total_size: Decimal::ZERO,
    };

    window.check_integrity()?;

    Ok(window)
  }

  /// 가장 오래된 데이터를 새 데이터로 교체하고 누적 합계를 조정
  ///
  /// 축출된 데이터를 반환합니다. 축출 순서는 엄격한 FIFO입니다.
  pub fn insert(&mut self, price: Decimal, size: Decimal) -> Result<DataPoint, VwapError> {
    self.check_integrity().map_err(|e| {
      VwapError::InvariantViolation(format!("Window.insert failed integrity check: {}", e))
    })?;

    let new_dp = DataPoint::new(price, size);
    let old_dp = std::mem::replace(&mut self.data_points[self.oldest_idx], new_dp);

    self.total_value = self.total_value - old_dp.value() + new_dp.value();
    self.total_size = self.total_size - old_dp.size + new_dp.size;

    self.oldest_idx = (self.oldest_idx + 1) % self.capacity;

    Ok(old_dp)
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn total_value(&self) -> Decimal {
    self.total_value
  }

  pub fn total_size(&self) -> Decimal {
    self.total_size
  }

  /// 현재 버퍼 내용 (테스트 및 검증용)
  pub fn data_points(&self) -> &[DataPoint] {
    &self.data_points
  }

  /// 구조 무결성 검사: 버퍼 길이와 인덱스 범위 확인
  fn check_integrity(&self) -> Result<(), VwapError> {
    if self.data_points.is_empty() {
      return Err(VwapError::InvariantViolation(
        "data points pool is empty".to_string(),
      ));
    }

    if self.capacity != self.data_points.len() {
      return Err(VwapError::InvariantViolation(format!(
        "window capacity {} is not the same as data points size {}",
        self.capacity,
        self.data_points.len()
      )));
    }

    if self.oldest_idx >= self.data_points.len() {
      return Err(VwapError::InvariantViolation(format!(
        "oldest data point index out of range: {}",
        self.oldest_idx
      )));
    }

    Ok(())
  }
}
