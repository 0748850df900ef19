//! 进度模拟任务

use super::{PROGRESS_MAX, PROGRESS_STEP, ProgressEvent, RunId};
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 正在运行的模拟传输
///
/// 丢弃 handle 会取消后台任务。
#[derive(Debug)]
pub struct TransferHandle {
    run: RunId,
    events: mpsc::Receiver<ProgressEvent>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl TransferHandle {
    /// 启动后台任务（需要 tokio 运行时）
    pub(crate) fn spawn(run: RunId, interval: Duration) -> Self {
        // 容量足够放下整次运行的事件，发送端不会因 UI 迟缓而阻塞
        let capacity = usize::from(PROGRESS_MAX / PROGRESS_STEP) + 1;
        let (tx, events) = mpsc::channel(capacity);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(simulate(run, interval, tx, cancel.clone()));

        Self {
            run,
            events,
            cancel,
            task,
        }
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    /// 等待下一个进度事件；任务结束且事件取完后返回 `None`
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }

    /// 非阻塞地取一个已到达的事件
    pub fn try_next_event(&mut self) -> Option<ProgressEvent> {
        self.events.try_recv().ok()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TransferHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn simulate(
    run: RunId,
    interval: Duration,
    tx: mpsc::Sender<ProgressEvent>,
    cancel: CancellationToken,
) {
    let mut progress: u8 = 0;

    while progress < PROGRESS_MAX {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Transfer {} cancelled at {}%", run, progress);
                return;
            }
            () = tokio::time::sleep(interval) => {}
        }

        progress = progress.saturating_add(PROGRESS_STEP).min(PROGRESS_MAX);
        if tx.send(ProgressEvent { run, progress }).await.is_err() {
            debug!("Transfer {} receiver gone at {}%", run, progress);
            return;
        }
    }

    debug!("Transfer {} finished", run);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_emits_twenty_events() {
        let run = RunId::new();
        let mut handle = TransferHandle::spawn(run, Duration::from_millis(200));

        let mut seen = Vec::new();
        while let Some(event) = handle.next_event().await {
            assert_eq!(event.run, run);
            seen.push(event.progress);
        }

        assert_eq!(seen.len(), 20);
        assert_eq!(seen.first(), Some(&5));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let start = tokio::time::Instant::now();
        let mut handle = TransferHandle::spawn(RunId::new(), Duration::from_millis(200));

        let first = handle.next_event().await.unwrap();
        assert_eq!(first.progress, 5);
        assert!(start.elapsed() >= Duration::from_millis(200));

        while handle.next_event().await.is_some() {}
        assert!(start.elapsed() >= Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_before_completion() {
        let mut handle = TransferHandle::spawn(RunId::new(), Duration::from_millis(200));

        for _ in 0..3 {
            handle.next_event().await.unwrap();
        }
        handle.cancel();
        assert!(handle.is_cancelled());

        let mut last = 15;
        while let Some(event) = handle.next_event().await {
            last = event.progress;
        }
        assert!(last < 100, "cancelled run reached {}", last);
    }
}
