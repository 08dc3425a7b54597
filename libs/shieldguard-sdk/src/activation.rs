//! Scripted, purely cosmetic protection activation progress.
//!
//! The script is a pure function of elapsed time so the UI can render it from
//! any timer without holding state.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationStage {
    pub key: &'static str,
    pub text: &'static str,
    pub duration: Duration,
}

pub const ACTIVATION_STAGES: [ActivationStage; 5] = [
    ActivationStage {
        key: "initializing",
        text: "Initializing Security Protocols...",
        duration: Duration::from_millis(1000),
    },
    ActivationStage {
        key: "scanning",
        text: "Scanning Device Vulnerabilities...",
        duration: Duration::from_millis(1500),
    },
    ActivationStage {
        key: "encrypting",
        text: "Encrypting Data Channels...",
        duration: Duration::from_millis(1200),
    },
    ActivationStage {
        key: "activating",
        text: "Activating Shield Protection...",
        duration: Duration::from_millis(1300),
    },
    ActivationStage {
        key: "complete",
        text: "Protection Activated Successfully!",
        duration: Duration::from_millis(1000),
    },
];

/// Snapshot of the activation animation at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationProgress {
    pub stage: &'static ActivationStage,
    /// Stepped percentage, 0..=100
    pub percent: u8,
    pub complete: bool,
}

impl ActivationProgress {
    pub fn text(&self) -> &'static str {
        self.stage.text
    }
}

/// Timeline: lead-in, then each stage in `steps_per_stage` equal steps with a
/// gap between stages, then a tail before completion.
#[derive(Debug, Clone)]
pub struct ActivationScript {
    stages: &'static [ActivationStage],
    lead_in: Duration,
    gap: Duration,
    tail: Duration,
    steps_per_stage: u32,
}

impl Default for ActivationScript {
    fn default() -> Self {
        Self {
            stages: &ACTIVATION_STAGES,
            lead_in: Duration::from_millis(500),
            gap: Duration::from_millis(200),
            tail: Duration::from_millis(500),
            steps_per_stage: 20,
        }
    }
}

impl ActivationScript {
    pub fn stages(&self) -> &'static [ActivationStage] {
        self.stages
    }

    /// Time from start until the flow may move to the protected screen.
    pub fn total_duration(&self) -> Duration {
        let stage_time: Duration = self.stages.iter().map(|s| s.duration).sum();
        let gaps = self.gap * (self.stages.len().saturating_sub(1) as u32);
        self.lead_in + stage_time + gaps + self.tail
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total_duration()
    }

    pub fn progress_at(&self, elapsed: Duration) -> ActivationProgress {
        let stages: &'static [ActivationStage] = self.stages;
        let total_steps = stages.len() as u64 * self.steps_per_stage as u64;
        let percent_of = |steps_done: u64| (steps_done * 100 / total_steps) as u8;

        let first = &stages[0];
        if elapsed < self.lead_in {
            return ActivationProgress {
                stage: first,
                percent: 0,
                complete: false,
            };
        }

        let mut cursor = self.lead_in;
        for (index, stage) in stages.iter().enumerate() {
            let stage_end = cursor + stage.duration;
            let done_before = index as u64 * self.steps_per_stage as u64;

            if elapsed < stage_end {
                let into = (elapsed - cursor).as_millis();
                let step = into * self.steps_per_stage as u128 / stage.duration.as_millis().max(1);
                return ActivationProgress {
                    stage,
                    percent: percent_of(done_before + step as u64),
                    complete: false,
                };
            }

            let is_last = index + 1 == stages.len();
            let pause = if is_last { self.tail } else { self.gap };
            if elapsed < stage_end + pause {
                // The stage label only changes when the next stage starts
                return ActivationProgress {
                    stage,
                    percent: percent_of(done_before + self.steps_per_stage as u64),
                    complete: false,
                };
            }

            cursor = stage_end + pause;
        }

        ActivationProgress {
            stage: &stages[stages.len() - 1],
            percent: 100,
            complete: true,
        }
    }
}
