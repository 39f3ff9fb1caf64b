/**
* filename : stdout
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use async_trait::async_trait;

use crate::error::VwapError;
use crate::publisher::Sender;

/// 표준 출력으로 한 줄씩 내보내는 싱크
///
/// `println!`은 호출 단위로 stdout 잠금을 잡으므로 파이프라인이 여러 개라도
/// 줄이 섞이지 않습니다.
pub struct StdoutSender;

impl StdoutSender {
    pub fn new() -> Self {
        StdoutSender
    }
}

impl Default for StdoutSender {
    fn default() -> Self {
        StdoutSender::new()
    }
}

#[async_trait]
impl Sender for StdoutSender {
    async fn send(&mut self, msg: &[u8]) -> Result<(), VwapError> {
        println!("{}", String::from_utf8_lossy(msg));

        Ok(())
    }
}
