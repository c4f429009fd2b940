//! View/navigation shell state.
//!
//! All UI-visible state lives in `ShellState` and every mutation goes
//! through `reduce`, so section derivation and the per-slot response
//! bookkeeping are testable without a terminal. Advice responses carry a
//! per-slot sequence number: last write wins, stale writes are dropped.

use crate::catalog::WindowsVersion;
use std::collections::HashMap;

/// Navigation sections, in menu order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Section {
    Debloat,
    Storage,
    Fixes,
    Tldr,
    Troubleshoot,
    Apps,
    AiOptimizer,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Debloat,
        Section::Storage,
        Section::Fixes,
        Section::Tldr,
        Section::Troubleshoot,
        Section::Apps,
        Section::AiOptimizer,
    ];

    pub const DEFAULT: Section = Section::Debloat;

    /// Sections that only make sense when advice features are enabled.
    pub fn requires_advice(&self) -> bool {
        matches!(self, Section::Troubleshoot | Section::AiOptimizer)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Debloat => "Debloat",
            Section::Storage => "Storage",
            Section::Fixes => "Needed Fixes",
            Section::Tldr => "TL;DR",
            Section::Troubleshoot => "Problem Solver",
            Section::Apps => "Essential Apps",
            Section::AiOptimizer => "AI Optimizer",
        }
    }
}

/// Identifies the state slot an advice response is written into. Per-item
/// explanations get their own slot so concurrent requests never interfere.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SlotKey {
    Optimizer,
    StorageAudit,
    Troubleshoot,
    Item(&'static str),
}

/// One advisory result slot: latest issued sequence number, whether a call
/// is in flight, and the last applied response text.
#[derive(Clone, Debug, Default)]
pub struct AdviceSlot {
    pub seq: u64,
    pub loading: bool,
    pub text: Option<String>,
}

#[derive(Clone, Debug)]
pub enum ShellEvent {
    SelectSection(Section),
    SetVersion(WindowsVersion),
    ToggleAdvice,
    /// A gateway call was issued for this slot; bumps its sequence number.
    RequestIssued(SlotKey),
    /// A gateway call resolved. Applied only when `seq` is still current.
    ResponseArrived {
        key: SlotKey,
        seq: u64,
        text: String,
    },
    DismissResult(SlotKey),
}

pub struct ShellState {
    active: Section,
    advice_enabled: bool,
    version: WindowsVersion,
    slots: HashMap<SlotKey, AdviceSlot>,
}

impl ShellState {
    pub fn new(version: WindowsVersion, advice_enabled: bool) -> Self {
        Self {
            active: Section::DEFAULT,
            advice_enabled,
            version,
            slots: HashMap::new(),
        }
    }

    pub fn version(&self) -> WindowsVersion {
        self.version
    }

    pub fn advice_enabled(&self) -> bool {
        self.advice_enabled
    }

    /// The raw user-selected section, before the visibility filter.
    pub fn raw_section(&self) -> Section {
        self.active
    }

    /// The section actually rendered: the raw selection, unless advice
    /// features are off and the selection depends on them, in which case the
    /// default section. The raw selection is preserved, so re-enabling
    /// advice resumes it.
    pub fn effective_section(&self) -> Section {
        if !self.advice_enabled && self.active.requires_advice() {
            Section::DEFAULT
        } else {
            self.active
        }
    }

    /// Navigation entries shown in the menu.
    pub fn visible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.advice_enabled || !section.requires_advice())
            .collect()
    }

    pub fn slot(&self, key: SlotKey) -> Option<&AdviceSlot> {
        self.slots.get(&key)
    }

    pub fn is_loading(&self, key: SlotKey) -> bool {
        self.slots.get(&key).is_some_and(|slot| slot.loading)
    }

    /// Apply one event. The only state transition path.
    pub fn reduce(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::SelectSection(section) => {
                self.active = section;
            }
            ShellEvent::SetVersion(version) => {
                self.version = version;
            }
            ShellEvent::ToggleAdvice => {
                self.advice_enabled = !self.advice_enabled;
            }
            ShellEvent::RequestIssued(key) => {
                let slot = self.slots.entry(key).or_default();
                slot.seq += 1;
                slot.loading = true;
            }
            ShellEvent::ResponseArrived { key, seq, text } => {
                if let Some(slot) = self.slots.get_mut(&key) {
                    if slot.seq == seq {
                        slot.loading = false;
                        slot.text = Some(text);
                    }
                    // Stale responses are dropped: a newer request owns the
                    // slot and its loading flag.
                }
            }
            ShellEvent::DismissResult(key) => {
                if let Some(slot) = self.slots.get_mut(&key) {
                    slot.text = None;
                }
            }
        }
    }

    /// Record an issued request and hand back its sequence token.
    pub fn issue_request(&mut self, key: SlotKey) -> u64 {
        self.reduce(ShellEvent::RequestIssued(key));
        self.slots.get(&key).map(|slot| slot.seq).unwrap_or(0)
    }
}
