//! 전체 경로 통합 테스트
//!
//! Coinbase 프레임 포맷을 흉내내는 프로세스 내 WebSocket 서버에 실제 소켓으로
//! 연결하여 피드 클라이언트부터 발행 출력까지 전체 파이프라인을 검증

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::protocol::Message;

use vwap_engine::config::{FeedConfig, FeedName};
use vwap_engine::feed::Feed;
use vwap_engine::models::vwap::Vwap;
use vwap_engine::pipeline::SymbolPipeline;
use vwap_engine::processor::Processor;
use vwap_engine::publisher::{Publisher, Sender};
use vwap_engine::VwapError;

const MATCH_TIME: &str = "2022-11-02T14:27:48.932205Z";

// 각 연결에 재생되는 체결: (메시지 타입, 가격, 수량)
const FAKE_MATCHES: [(&str, &str, &str); 4] = [
  ("last_match", "20433.31", "0.0043007"),
  ("match", "19405.75", "0.19671748"),
  ("match", "20405.35", "0.11671747"),
  ("match", "20605.78", "0.1267174"),
];

fn match_frame(msg_type: &str, price: &str, size: &str, trading_pair: &str) -> String {
  format!(
    r#"{{
      "type": "{}",
      "trade_id": 443907480,
      "maker_order_id": "746a0f12-e2b3-4b0e-9538-1d3d5015b7e6",
      "taker_order_id": "b6a0e535-be60-4403-b84c-d2f1b4913e3b",
      "side": "sell",
      "size": "{}",
      "price": "{}",
      "product_id": "{}",
      "sequence": 49509894759,
      "time": "{}"
    }}"#,
    msg_type, size, price, trading_pair, MATCH_TIME
  )
}

/// 구독 요청을 읽고 해당 거래쌍의 체결 프레임을 재생한 뒤 연결을 닫는 핸들러
async fn serve_connection(stream: TcpStream) {
  let mut ws = accept_async(stream).await.unwrap();

  let request = ws.next().await.unwrap().unwrap();
  let request: Value = serde_json::from_str(request.to_text().unwrap()).unwrap();

  assert_eq!(request["type"], "subscribe");
  assert_eq!(request["channels"][0], "matches");
  let trading_pair = request["product_ids"][0].as_str().unwrap().to_string();

  for (msg_type, price, size) in FAKE_MATCHES {
    ws.send(Message::Text(match_frame(msg_type, price, size, &trading_pair)))
      .await
      .unwrap();
  }

  let _ = ws.close(None).await;
}

/// 가짜 피드 서버를 시작하고 접속 URL을 반환
async fn spawn_fake_feed_server() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();

  tokio::spawn(async move {
    while let Ok((stream, _)) = listener.accept().await {
      tokio::spawn(serve_connection(stream));
    }
  });

  format!("ws://{}", addr)
}

/// 발행된 줄을 수집하는 싱크
#[derive(Clone)]
struct CollectingSender {
  lines: Arc<Mutex<Vec<String>>>,
}

impl CollectingSender {
  fn new() -> Self {
    CollectingSender {
      lines: Arc::new(Mutex::new(Vec::new())),
    }
  }

  fn lines(&self) -> Vec<String> {
    self.lines.lock().unwrap().clone()
  }
}

#[async_trait]
impl Sender for CollectingSender {
  async fn send(&mut self, msg: &[u8]) -> Result<(), VwapError> {
    self
      .lines
      .lock()
      .unwrap()
      .push(String::from_utf8_lossy(msg).to_string());

    Ok(())
  }
}

/// 윈도우 크기 3 기준, 버퍼 내용을 처음부터 다시 계산한 기대 VWAP 수열
fn expected_vwaps() -> Vec<Decimal> {
  let points = [
    (dec!(20433.31), dec!(0.0043007)),
    (dec!(19405.75), dec!(0.19671748)),
    (dec!(20405.35), dec!(0.11671747)),
    (dec!(20605.78), dec!(0.1267174)),
  ];

  (0..points.len())
    .map(|k| {
      let start = (k + 1).saturating_sub(3);
      let window = &points[start..=k];

      let value_sum: Decimal = window.iter().map(|(price, size)| price * size).sum();
      let size_sum: Decimal = window.iter().map(|(_, size)| *size).sum();

      value_sum / size_sum
    })
    .collect()
}

#[tokio::test]
async fn test_pipelines_against_fake_ws_server() {
  let url = spawn_fake_feed_server().await;
  let feed_cfg = FeedConfig {
    name: FeedName::Coinbase,
    ws_connection_url: url,
  };

  // 원본과 같이 두 거래쌍을 병렬로 실행
  let mut running = Vec::new();
  for trading_pair in ["BTC-USD", "ETH-USD"] {
    let sender = CollectingSender::new();
    let collected = sender.clone();

    let feed = Feed::set_up(&feed_cfg, trading_pair).await.unwrap();
    let processor = Processor::set_up(3).unwrap();
    let publisher = Publisher::new(Box::new(sender));

    let handle = SymbolPipeline::new(trading_pair, feed, processor, publisher).start();
    running.push((trading_pair, collected, handle));
  }

  let expected = expected_vwaps();
  let want_time: DateTime<Utc> = MATCH_TIME.parse().unwrap();

  for (trading_pair, collected, handle) in running {
    // 서버가 연결을 닫으면 파이프라인이 자연 종료되어야 함
    handle.await.unwrap();

    let lines = collected.lines();
    assert_eq!(lines.len(), FAKE_MATCHES.len());

    for (line, want) in lines.iter().zip(expected.iter()) {
      let snapshot: Vwap = serde_json::from_str(line).unwrap();

      assert_eq!(snapshot.trading_pair, trading_pair);
      assert_eq!(snapshot.last_trade_at, want_time);
      assert_eq!(snapshot.vwap, *want);
    }
  }
}

#[tokio::test]
async fn test_feed_setup_fails_when_server_unreachable() {
  // 아무도 수신하지 않는 주소로는 파이프라인 구성이 실패해야 함
  let feed_cfg = FeedConfig {
    name: FeedName::Coinbase,
    ws_connection_url: "ws://127.0.0.1:1".to_string(),
  };

  let result = Feed::set_up(&feed_cfg, "BTC-USD").await;
  assert!(matches!(result, Err(VwapError::FeedError(_))));
}
