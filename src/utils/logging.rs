//! 로깅 유틸리티
//!
//! 로그 초기화 및 유틸리티 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::VwapError;

/// 로깅 시스템 초기화
///
/// RUST_LOG 환경변수가 있으면 그 값을, 없으면 설정의 레벨을 사용합니다.
pub fn init(default_level: &str) -> Result<(), VwapError> {
    let mut builder = Builder::from_default_env();

    // RUST_LOG 환경변수 확인
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    builder
      .filter_level(parse_level(&log_level))
      .format_timestamp_millis()
      .init();

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 로그 레벨 파싱
fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 파이프라인 시작 로그
pub fn log_pipeline_start(trading_pair: &str) {
    log::info!("파이프라인 시작: {}", trading_pair);
}

/// 파이프라인 종료 로그
pub fn log_pipeline_end(trading_pair: &str) {
    log::info!("파이프라인 종료: {}", trading_pair);
}
