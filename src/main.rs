/**
* filename : main
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use vwap_engine::config::Config;
use vwap_engine::pipeline;
use vwap_engine::utils::logging;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화 (RUST_LOG가 없으면 설정의 레벨 사용)
    logging::init(&config.logging.level)?;
    log::info!("VWAP 엔진 시작...");
    log::info!(
        "설정 로드 완료: 거래쌍 {:?}, 윈도우 크기 {}",
        config.vwap.trading_pairs,
        config.vwap.window_size
    );

    // 운영자 인터럽트 시 드레인 없이 즉시 종료
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("인터럽트 수신, 즉시 종료");
            std::process::exit(0);
        }
    });

    // 모든 파이프라인이 끝날 때까지 대기
    pipeline::run(&config).await?;

    Ok(())
}
