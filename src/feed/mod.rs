//! 체결 피드 스테이지
//!
//! 외부 피드에서 체결을 읽어 파이프라인의 첫 채널로 전달합니다.

pub mod coinbase;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::{FeedConfig, FeedName};
use crate::error::VwapError;
use crate::feed::coinbase::CoinbaseClient;
use crate::models::trade::Trade;

#[cfg(test)]
use mockall::automock;

/// 피드 WebSocket 클라이언트 인터페이스
///
/// `read_trade`가 `Ok(None)`을 반환하면 체결이 아닌 프레임이므로 계속 읽습니다.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WsClient: Send {
  async fn connect(&mut self) -> Result<(), VwapError>;

  async fn subscribe_to_matches(&mut self, trading_pair: &str) -> Result<(), VwapError>;

  async fn read_trade(&mut self) -> Result<Option<Trade>, VwapError>;

  async fn close(&mut self) -> Result<(), VwapError>;
}

/// 단일 심볼의 체결 피드
pub struct Feed {
  ws_client: Box<dyn WsClient>,
  trading_pair: String,
}

impl Feed {
  /// 설정에 맞는 클라이언트를 만들어 연결하고 구독까지 마친 피드 생성
  pub async fn set_up(feed_cfg: &FeedConfig, trading_pair: &str) -> Result<Self, VwapError> {
    let ws_client: Box<dyn WsClient> = match feed_cfg.name {
      FeedName::Coinbase => Box::new(CoinbaseClient::new(&feed_cfg.ws_connection_url)),
    };

    Feed::new(ws_client, trading_pair).await
  }

  pub async fn new(
    mut ws_client: Box<dyn WsClient>,
    trading_pair: impl Into<String>,
  ) -> Result<Self, VwapError> {
    let trading_pair = trading_pair.into();

    ws_client.connect().await?;
    ws_client.subscribe_to_matches(&trading_pair).await?;

    Ok(Feed {
      ws_client,
      trading_pair,
    })
  }

  /// 피드 태스크 시작
  ///
  /// 용량 1짜리 채널의 수신단을 반환합니다. 읽기 오류가 나면 태스크가 멈추고
  /// 송신단이 드롭되어 하류 스테이지에 종료가 전파됩니다. 재연결은 하지 않습니다.
  pub fn spawn(mut self) -> mpsc::Receiver<Trade> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
      loop {
        match self.ws_client.read_trade().await {
          Ok(Some(trade)) => {
            if tx.send(trade).await.is_err() {
              // 하류 수신단이 사라짐
              break;
            }
          }
          Ok(None) => continue,
          Err(e) => {
            log::warn!("[{}] failed to read from ws client: {}", self.trading_pair, e);
            break;
          }
        }
      }

      if let Err(e) = self.ws_client.close().await {
        log::warn!("[{}] failed to close ws client: {}", self.trading_pair, e);
      }
    });

    rx
  }
}
