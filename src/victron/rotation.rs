//! # Output Rotation Selector
//!
//! Cycles through the configured output kinds so each enabled kind is
//! emitted on successive decode invocations. A marker is enabled when a
//! custom sentence template is configured for it; the default combined
//! sentence is always enabled and closes every cycle.

use super::fields::Marker;

/// Custom sentence template for one marker: a 6-character sentence type plus
/// a single unit character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTemplate {
    /// 6-character sentence type, e.g. `$IIXDR`
    pub template: String,
    /// Unit character appended after the value
    pub unit: char,
}

/// Per-marker template configuration; an absent entry disables the marker
/// for custom output
#[derive(Debug, Clone, Default)]
pub struct SentenceTemplates {
    pub battery_voltage: Option<SentenceTemplate>,
    pub panel_voltage: Option<SentenceTemplate>,
    pub battery_current: Option<SentenceTemplate>,
    pub panel_power: Option<SentenceTemplate>,
    pub energy_total: Option<SentenceTemplate>,
    pub energy_today: Option<SentenceTemplate>,
    pub energy_yesterday: Option<SentenceTemplate>,
}

impl SentenceTemplates {
    pub fn get(&self, marker: Marker) -> Option<&SentenceTemplate> {
        match marker {
            Marker::BatteryVoltage => self.battery_voltage.as_ref(),
            Marker::PanelVoltage => self.panel_voltage.as_ref(),
            Marker::BatteryCurrent => self.battery_current.as_ref(),
            Marker::PanelPower => self.panel_power.as_ref(),
            Marker::EnergyTotal => self.energy_total.as_ref(),
            Marker::EnergyToday => self.energy_today.as_ref(),
            Marker::EnergyYesterday => self.energy_yesterday.as_ref(),
        }
    }
}

/// Output kind selected for one decode invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// One custom-template sentence for this marker
    Custom(Marker),
    /// The combined default sentence covering every field in the block
    Default,
}

/// Cyclic marker order; the default kind occupies the slot after the last
/// marker
const ROTATION_ORDER: [Marker; 7] = [
    Marker::BatteryVoltage,
    Marker::PanelVoltage,
    Marker::BatteryCurrent,
    Marker::PanelPower,
    Marker::EnergyTotal,
    Marker::EnergyToday,
    Marker::EnergyYesterday,
];

/// Process-lifetime rotation cursor
///
/// Created once per decoder instance, advanced by one enabled entry per
/// decode invocation, never reset mid-stream.
#[derive(Debug)]
pub struct RotationState {
    slot: usize,
}

impl RotationState {
    /// Start at the default slot so the first advance lands on the first
    /// enabled marker
    pub fn new() -> Self {
        Self {
            slot: ROTATION_ORDER.len(),
        }
    }

    /// Advance to the next enabled output kind
    ///
    /// Disabled markers are skipped; the default slot is always enabled, so
    /// this terminates within one full cycle.
    pub fn advance(&mut self, templates: &SentenceTemplates) -> OutputKind {
        loop {
            self.slot = (self.slot + 1) % (ROTATION_ORDER.len() + 1);
            if self.slot == ROTATION_ORDER.len() {
                return OutputKind::Default;
            }
            let marker = ROTATION_ORDER[self.slot];
            if templates.get(marker).is_some() {
                return OutputKind::Custom(marker);
            }
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new()
    }
}
