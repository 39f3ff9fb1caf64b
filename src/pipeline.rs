/**
* filename : pipeline
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::VwapError;
use crate::feed::Feed;
use crate::processor::Processor;
use crate::publisher::Publisher;
use crate::utils::logging;

/// 단일 심볼의 3단계 파이프라인: 피드 -> 처리기 -> 발행기
///
/// 각 스테이지는 독립 태스크이며 용량 1짜리 채널로만 연결됩니다.
/// 어느 스테이지든 멈추면 채널 닫힘으로 하류에 종료가 전파됩니다.
pub struct SymbolPipeline {
  trading_pair: String,
  feed: Feed,
  processor: Processor,
  publisher: Publisher,
}

impl SymbolPipeline {
  /// 설정으로부터 파이프라인 구성
  ///
  /// 여기서의 실패(연결/구독/윈도우 크기)는 시작 자체를 중단시킵니다.
  pub async fn set_up(cfg: &Config, trading_pair: &str) -> Result<Self, VwapError> {
    let feed = Feed::set_up(&cfg.feed, trading_pair).await?;
    let processor = Processor::set_up(cfg.vwap.window_size)?;
    let publisher = Publisher::set_up();

    Ok(SymbolPipeline::new(trading_pair, feed, processor, publisher))
  }

  pub fn new(
    trading_pair: impl Into<String>,
    feed: Feed,
    processor: Processor,
    publisher: Publisher,
  ) -> Self {
    SymbolPipeline {
      trading_pair: trading_pair.into(),
      feed,
      processor,
      publisher,
    }
  }

  /// 세 스테이지를 모두 시작하고 발행기 핸들을 반환
  pub fn start(self) -> JoinHandle<()> {
    logging::log_pipeline_start(&self.trading_pair);

    let trades = self.feed.spawn();
    let snapshots = self.processor.spawn(trades);

    self.publisher.spawn(snapshots)
  }
}

/// 설정된 모든 심볼의 파이프라인을 시작하고 전부 끝날 때까지 대기
pub async fn run(cfg: &Config) -> Result<(), VwapError> {
  let mut handles = Vec::with_capacity(cfg.vwap.trading_pairs.len());

  for trading_pair in &cfg.vwap.trading_pairs {
    let pipeline = SymbolPipeline::set_up(cfg, trading_pair).await?;
    handles.push((trading_pair.clone(), pipeline.start()));
  }

  for (trading_pair, handle) in handles {
    if let Err(e) = handle.await {
      log::error!("[{}] pipeline task failed: {}", trading_pair, e);
    }
    logging::log_pipeline_end(&trading_pair);
  }

  Ok(())
}
