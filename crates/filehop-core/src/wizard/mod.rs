//! 传输向导
//!
//! 线性步骤：选择来源平台 → 选择文件 → 选择目标存储 → 整理选项 → 确认 → 传输中。
//! 每一步前进前都要满足该步的前置条件，后退不受限制且不清除任何选择。
//!
//! # 使用示例
//!
//! ```ignore
//! use filehop_core::{Catalog, LogSink, PlatformKind, ProviderKind, Transition, Wizard};
//!
//! let mut wizard = Wizard::new(Catalog::demo(), LogSink);
//! wizard.select_platform(PlatformKind::Telegram)?;
//! wizard.advance()?;
//! wizard.select_all_files();
//! wizard.advance()?;
//! wizard.select_destination(ProviderKind::GoogleDrive)?;
//! wizard.advance()?;
//! wizard.advance()?;
//!
//! if let Transition::Started(mut handle) = wizard.advance()? {
//!     wizard.drive(&mut handle).await;
//! }
//! ```

mod organize;
mod step;


pub use organize::{FolderNode, OrganizationSettings};
pub use step::Step;

use crate::catalog::{Catalog, FileId, PlatformKind, ProviderKind};
use crate::error::WizardError;
use crate::notify::{Notice, NotificationSink, Severity};
use crate::transfer::{DEFAULT_TICK_INTERVAL, ProgressEvent, TransferHandle, TransferRun};
use log::{debug, info};
use serde::Serialize;
use std::time::Duration;

/// `advance()` 的结果
#[derive(Debug)]
pub enum Transition {
    /// 移动到了新步骤
    Moved(Step),
    /// 从确认页进入传输，返回模拟任务的 handle
    Started(TransferHandle),
}

impl Transition {
    pub fn step(&self) -> Step {
        match self {
            Transition::Moved(step) => *step,
            Transition::Started(_) => Step::Transferring,
        }
    }
}

/// 确认页摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSummary {
    pub platform: Option<PlatformKind>,
    pub destination: Option<ProviderKind>,
    pub file_count: usize,
    pub organization: OrganizationSettings,
}

/// 向导状态机
pub struct Wizard<N> {
    catalog: Catalog,
    step: Step,
    platform: Option<PlatformKind>,
    destination: Option<ProviderKind>,
    organization: OrganizationSettings,
    run: Option<TransferRun>,
    tick_interval: Duration,
    sink: N,
}

impl<N: NotificationSink> Wizard<N> {
    pub fn new(catalog: Catalog, sink: N) -> Self {
        Self {
            catalog,
            step: Step::Platform,
            platform: None,
            destination: None,
            organization: OrganizationSettings::default(),
            run: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            sink,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_organization(mut self, organization: OrganizationSettings) -> Self {
        self.organization = organization;
        self
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_platform(&self) -> Option<PlatformKind> {
        self.platform
    }

    pub fn selected_destination(&self) -> Option<ProviderKind> {
        self.destination
    }

    pub fn organization(&self) -> &OrganizationSettings {
        &self.organization
    }

    pub fn organization_mut(&mut self) -> &mut OrganizationSettings {
        &mut self.organization
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn run(&self) -> Option<&TransferRun> {
        self.run.as_ref()
    }

    /// 当前进度 (0..=100)，没有运行时为 0
    pub fn progress(&self) -> u8 {
        self.run.as_ref().map_or(0, |run| run.progress)
    }

    pub fn is_transferring(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.transferring)
    }

    pub fn is_complete(&self) -> bool {
        self.run.as_ref().is_some_and(TransferRun::is_complete)
    }

    /// 选择来源平台；平台未连接或不在目录中时不做任何修改
    pub fn select_platform(&mut self, kind: PlatformKind) -> Result<(), WizardError> {
        let platform = self
            .catalog
            .platform(kind)
            .ok_or(WizardError::PlatformMissing(kind))?;
        if !platform.connected {
            return Err(WizardError::PlatformNotConnected(kind));
        }
        debug!("Selected platform {}", kind);
        self.platform = Some(kind);
        Ok(())
    }

    /// 选择目标存储；规则同 [`Wizard::select_platform`]
    pub fn select_destination(&mut self, kind: ProviderKind) -> Result<(), WizardError> {
        let destination = self
            .catalog
            .destination(kind)
            .ok_or(WizardError::DestinationMissing(kind))?;
        if !destination.connected {
            return Err(WizardError::DestinationNotConnected(kind));
        }
        debug!("Selected destination {}", kind);
        self.destination = Some(kind);
        Ok(())
    }

    /// 检查当前步骤的前置条件
    ///
    /// Review 的检查与 [`Wizard::run_transfer`] 一致，但不会发出通知。
    pub fn gate(&self) -> Result<(), WizardError> {
        match self.step {
            Step::Platform => self.platform.map(|_| ()).ok_or(WizardError::NoPlatformSelected),
            Step::Files => self.require_files(),
            Step::Destination => self
                .destination
                .map(|_| ())
                .ok_or(WizardError::NoDestinationSelected),
            Step::Organize => Ok(()),
            Step::Review => {
                self.require_no_run()?;
                self.require_files()
            }
            Step::Transferring => Err(WizardError::NoNextStep(Step::Transferring)),
        }
    }

    fn require_no_run(&self) -> Result<(), WizardError> {
        match &self.run {
            Some(run) if run.is_complete() => Err(WizardError::TransferFinished),
            Some(_) => Err(WizardError::TransferInProgress),
            None => Ok(()),
        }
    }

    fn require_files(&self) -> Result<(), WizardError> {
        if self.catalog.selected_count() == 0 {
            Err(WizardError::NoFilesSelected)
        } else {
            Ok(())
        }
    }

    /// 前进一步
    ///
    /// 条件不满足时状态不变并返回原因。在 Review 上前进等同于 [`Wizard::run_transfer`]。
    pub fn advance(&mut self) -> Result<Transition, WizardError> {
        if self.step == Step::Review {
            return self.run_transfer().map(Transition::Started);
        }

        self.gate()?;
        let next = self.step.next().ok_or(WizardError::NoNextStep(self.step))?;
        debug!("Step {:?} -> {:?}", self.step, next);
        self.step = next;
        Ok(Transition::Moved(next))
    }

    /// 后退一步，不清除任何选择；已在第一步时保持不变
    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            debug!("Step {:?} -> {:?}", self.step, previous);
            self.step = previous;
        }
        self.step
    }

    /// 切换一个文件的勾选状态，返回新状态
    pub fn toggle_file(&mut self, id: FileId) -> Result<bool, WizardError> {
        let file = self
            .catalog
            .file_mut(id)
            .ok_or(WizardError::UnknownFile(id))?;
        file.selected = !file.selected;
        Ok(file.selected)
    }

    pub fn select_all_files(&mut self) {
        self.catalog.set_all_selected(true);
    }

    pub fn deselect_all_files(&mut self) {
        self.catalog.set_all_selected(false);
    }

    /// 开始模拟传输
    ///
    /// 只能在 Review 上、且没有保留中的运行时调用；已完成的运行必须先 [`Wizard::restart`]。
    /// 没有勾选文件时发出 "No files selected" 通知并保持当前步骤。
    /// 成功时进入 Transferring 并返回后台任务的 handle，需要在 tokio 运行时中调用。
    pub fn run_transfer(&mut self) -> Result<TransferHandle, WizardError> {
        self.require_no_run()?;
        if self.step != Step::Review {
            return Err(WizardError::NotAtReview(self.step));
        }

        let file_count = self.catalog.selected_count();
        if file_count == 0 {
            self.sink.notify(&Notice::new(
                "No files selected",
                "Please select at least one file to transfer.",
                Severity::Error,
            ));
            return Err(WizardError::NoFilesSelected);
        }

        let platform = self.platform.ok_or(WizardError::NoPlatformSelected)?;
        let destination = self
            .destination
            .ok_or(WizardError::NoDestinationSelected)?;

        let run = TransferRun::start(file_count, platform, destination);
        info!(
            "Transfer {} started: {} files from {} to {}",
            run.id, file_count, platform, destination
        );

        let handle = TransferHandle::spawn(run.id, self.tick_interval);
        self.run = Some(run);
        self.step = Step::Transferring;
        Ok(handle)
    }

    /// 应用一个进度事件，返回是否属于当前运行
    ///
    /// 进度到达 100 时结束运行并发出一次完成通知。
    pub fn apply(&mut self, event: ProgressEvent) -> bool {
        let Some(run) = self.run.as_mut() else {
            debug!("Ignoring progress event without an active run");
            return false;
        };
        if run.id != event.run {
            debug!("Ignoring progress event from stale run {}", event.run);
            return false;
        }

        if run.advance_to(event.progress) {
            info!("Transfer {} completed", run.id);
            self.sink.notify(&Notice::new(
                "Transfer completed!",
                format!(
                    "Successfully transferred {} files to {}.",
                    run.file_count, run.destination
                ),
                Severity::Success,
            ));
        }
        true
    }

    /// 持续应用 handle 的事件，直到当前运行完成或任务结束
    pub async fn drive(&mut self, handle: &mut TransferHandle) -> u8 {
        while let Some(event) = handle.next_event().await {
            self.apply(event);
            if self
                .run
                .as_ref()
                .is_some_and(|run| run.id == handle.run() && run.is_complete())
            {
                break;
            }
        }
        self.progress()
    }

    /// 回到第一步并丢弃当前运行；文件、平台和目标的选择保持不变
    pub fn restart(&mut self) {
        if let Some(run) = self.run.take() {
            debug!("Discarding transfer {} at {}%", run.id, run.progress);
        }
        self.step = Step::Platform;
    }

    pub fn summary(&self) -> TransferSummary {
        TransferSummary {
            platform: self.platform,
            destination: self.destination,
            file_count: self.catalog.selected_count(),
            organization: self.organization,
        }
    }
}
