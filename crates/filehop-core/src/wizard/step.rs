//! 向导步骤

use serde::{Deserialize, Serialize};

/// 向导的线性步骤，声明顺序即前进顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Platform,
    Files,
    Destination,
    Organize,
    Review,
    Transferring,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Platform,
        Step::Files,
        Step::Destination,
        Step::Organize,
        Step::Review,
        Step::Transferring,
    ];

    /// 步骤指示器中显示的步骤（不含 Transferring）
    pub const INDICATOR: [Step; 5] = [
        Step::Platform,
        Step::Files,
        Step::Destination,
        Step::Organize,
        Step::Review,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Option<Step> {
        Step::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Step::ALL[i])
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Platform => "Select Source",
            Step::Files => "Select Files",
            Step::Destination => "Select Destination",
            Step::Organize => "AI Organization",
            Step::Review => "Review & Transfer",
            Step::Transferring => "Transfer in Progress",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Step::Platform => "Choose platform",
            Step::Files => "Choose files to transfer",
            Step::Destination => "Choose storage provider",
            Step::Organize => "Configure auto-organization",
            Step::Review => "Confirm and start transfer",
            Step::Transferring => "Moving files",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert_eq!(Step::Platform.next(), Some(Step::Files));
        assert_eq!(Step::Review.next(), Some(Step::Transferring));
        assert_eq!(Step::Transferring.next(), None);
        assert_eq!(Step::Platform.previous(), None);
        assert_eq!(Step::Files.previous(), Some(Step::Platform));
    }

    #[test]
    fn test_index_matches_all() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }
}
