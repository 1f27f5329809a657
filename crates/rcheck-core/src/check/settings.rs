use crate::check::util::fmt_num;
use crate::check::{Check, CheckContext};
use crate::violation::{Severity, Violation, ViolationKind};

/// HP drain rate and overall difficulty caps.
pub struct SettingsCheck;

impl Check for SettingsCheck {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let entry = ctx.entry();
        let caps = [
            (ViolationKind::HpDrainRate, ctx.chart.hp, entry.hp_cap),
            (ViolationKind::OverallDifficulty, ctx.chart.od, entry.od_cap),
        ];

        caps.into_iter()
            .filter_map(|(kind, value, cap)| {
                let cap = cap?;
                (value > cap).then(|| {
                    Violation::new(
                        kind,
                        Severity::Error,
                        format!(
                            "{} {} exceeds the {} cap of {}",
                            kind,
                            fmt_num(value),
                            ctx.tier(),
                            fmt_num(cap)
                        ),
                        format!("{} must be at most {} on {}", kind, fmt_num(cap), ctx.tier()),
                    )
                })
            })
            .collect()
    }
}
