//! VWAP 처리 스테이지
//!
//! 체결 채널에서 읽어 계산기를 갱신하고 스냅샷 채널로 내보냅니다.

use tokio::sync::mpsc;

use crate::engine::calculator::{VwapCalc, VwapCalculator};
use crate::error::VwapError;
use crate::models::trade::Trade;
use crate::models::vwap::Vwap;

/// 단일 심볼의 VWAP 처리기
pub struct Processor {
  calc: Box<dyn VwapCalculator>,
}

impl Processor {
  pub fn set_up(window_size: usize) -> Result<Self, VwapError> {
    Ok(Processor::new(Box::new(VwapCalc::new(window_size)?)))
  }

  pub fn new(calc: Box<dyn VwapCalculator>) -> Self {
    Processor { calc }
  }

  /// 처리 태스크 시작
  ///
  /// 체결 한 건마다 스냅샷 한 건을 내보냅니다. 입력 채널이 닫히거나 계산기
  /// 오류가 나면 멈추고, 송신단 드롭으로 하류에 종료가 전파됩니다.
  pub fn spawn(mut self, mut input: mpsc::Receiver<Trade>) -> mpsc::Receiver<Vwap> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
      loop {
        let trade = match input.recv().await {
          Some(trade) => trade,
          None => {
            log::info!("no more to read from the trade channel");
            break;
          }
        };

        let vwap = match self.calc.add_data_point(trade.price, trade.size) {
          Ok(vwap) => vwap,
          Err(e) => {
            log::error!("calculator error: {}", e);
            break;
          }
        };

        let snapshot = Vwap {
          trading_pair: trade.trading_pair,
          last_trade_at: trade.time,
          vwap,
        };

        if tx.send(snapshot).await.is_err() {
          // 하류 수신단이 사라짐
          break;
        }
      }
    });

    rx
  }
}
