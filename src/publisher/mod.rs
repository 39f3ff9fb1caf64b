//! 스냅샷 발행 스테이지
//!
//! 스냅샷 채널에서 읽어 직렬화한 뒤 싱크로 내보냅니다.

pub mod stdout;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::VwapError;
use crate::models::vwap::Vwap;
use crate::publisher::stdout::StdoutSender;

/// 직렬화된 스냅샷을 받는 싱크 인터페이스
#[async_trait]
pub trait Sender: Send {
  async fn send(&mut self, msg: &[u8]) -> Result<(), VwapError>;
}

/// 단일 심볼의 스냅샷 발행기
pub struct Publisher {
  sender: Box<dyn Sender>,
}

impl Publisher {
  pub fn set_up() -> Self {
    Publisher::new(Box::new(StdoutSender::new()))
  }

  pub fn new(sender: Box<dyn Sender>) -> Self {
    Publisher { sender }
  }

  /// 발행 태스크 시작
  ///
  /// 반환된 핸들의 완료가 파이프라인 전체의 완료 신호입니다.
  /// 전송 실패는 기록만 하고 재시도 없이 멈춥니다.
  pub fn spawn(mut self, mut input: mpsc::Receiver<Vwap>) -> JoinHandle<()> {
    tokio::spawn(async move {
      loop {
        let snapshot = match input.recv().await {
          Some(snapshot) => snapshot,
          None => {
            log::info!("no more to read from the vwap channel");
            break;
          }
        };

        let msg = match serde_json::to_vec(&snapshot) {
          Ok(msg) => msg,
          Err(e) => {
            log::error!("JSON marshal error in publisher: {}", e);
            break;
          }
        };

        if let Err(e) = self.sender.send(&msg).await {
          log::error!("sender error: {}", e);
          break;
        }
      }
    })
  }
}
