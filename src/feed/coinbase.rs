/**
* filename : coinbase
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::VwapError;
use crate::feed::WsClient;
use crate::models::trade::Trade;

const CHANNEL_MATCHES: &str = "matches";
const RESPONSE_TYPE_MATCH: &str = "match";
const RESPONSE_TYPE_LAST_MATCH: &str = "last_match";

#[derive(Debug, Serialize)]
struct SubscribeRequest {
  #[serde(rename = "type")]
  request_type: String,
  product_ids: Vec<String>,
  channels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
  product_id: String,
  size: Decimal,
  price: Decimal,
  time: DateTime<Utc>,
}

/// Coinbase WebSocket 피드 클라이언트
///
/// matches 채널을 구독하고 match / last_match 메시지만 체결로 해석합니다.
pub struct CoinbaseClient {
  conn_url: String,
  stream: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl CoinbaseClient {
  pub fn new(conn_url: impl Into<String>) -> Self {
    CoinbaseClient {
      conn_url: conn_url.into(),
      stream: None,
    }
  }

  fn stream_mut(
    &mut self,
  ) -> Result<&mut WebSocketStream<MaybeTlsStream<TcpStream>>, VwapError> {
    self
      .stream
      .as_mut()
      .ok_or_else(|| VwapError::FeedError("not connected".to_string()))
  }

  fn parse_trade(text: &str) -> Result<Option<Trade>, VwapError> {
    let msg: Value = serde_json::from_str(text)?;

    match msg.get("type").and_then(Value::as_str) {
      Some(RESPONSE_TYPE_MATCH) | Some(RESPONSE_TYPE_LAST_MATCH) => {
        let resp: MatchesResponse = serde_json::from_value(msg)?;
        Ok(Some(Trade {
          trading_pair: resp.product_id,
          price: resp.price,
          size: resp.size,
          time: resp.time,
        }))
      }
      // 구독 확인 등 체결이 아닌 메시지
      _ => Ok(None),
    }
  }
}

#[async_trait]
impl WsClient for CoinbaseClient {
  async fn connect(&mut self) -> Result<(), VwapError> {
    let mut request = self.conn_url.as_str().into_client_request()?;

    // 메시지 압축 확장은 전체 처리량을 높이고 전달 지연을 줄일 수 있음
    // Ref: https://docs.cloud.coinbase.com/exchange/docs/websocket-overview#websocket-compression-extension
    request.headers_mut().insert(
      "Sec-WebSocket-Extensions",
      HeaderValue::from_static("permessage-deflate"),
    );

    let (stream, _) = connect_async(request).await.map_err(|e| {
      VwapError::FeedError(format!("failed to connect with URL {}: {}", self.conn_url, e))
    })?;

    self.stream = Some(stream);

    Ok(())
  }

  async fn subscribe_to_matches(&mut self, trading_pair: &str) -> Result<(), VwapError> {
    let request = SubscribeRequest {
      request_type: "subscribe".to_string(),
      product_ids: vec![trading_pair.to_string()],
      channels: vec![CHANNEL_MATCHES.to_string()],
    };

    let msg = serde_json::to_string(&request)?;

    self
      .stream_mut()?
      .send(Message::Text(msg))
      .await
      .map_err(|e| {
        VwapError::FeedError(format!(
          "failed to subscribe to trading pair \"{}\" on channel \"{}\": {}",
          trading_pair, CHANNEL_MATCHES, e
        ))
      })?;

    log::info!(
      "subscribed to product \"{}\" on channel \"{}\"",
      trading_pair,
      CHANNEL_MATCHES
    );

    Ok(())
  }

  async fn read_trade(&mut self) -> Result<Option<Trade>, VwapError> {
    let msg = match self.stream_mut()?.next().await {
      Some(msg) => msg?,
      None => return Err(VwapError::FeedError("connection closed".to_string())),
    };

    match msg {
      Message::Text(text) => Self::parse_trade(&text),
      Message::Close(_) => Err(VwapError::FeedError("received close frame".to_string())),
      // ping/pong 등은 무시
      _ => Ok(None),
    }
  }

  async fn close(&mut self) -> Result<(), VwapError> {
    if let Some(mut stream) = self.stream.take() {
      stream.close(None).await?;
    }

    Ok(())
  }
}
