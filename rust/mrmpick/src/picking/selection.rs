use crate::models::{
    PickedTrace,
    SeedPeak,
};

/// The unconsumed candidate with the highest intensity, scanning traces and
/// then peaks in order. The first one found wins on ties; `None` once every
/// candidate has been consumed.
pub fn find_largest_peak(picked: &[PickedTrace]) -> Option<SeedPeak> {
    let mut best: Option<(SeedPeak, f64)> = None;
    for (trace_index, trace) in picked.iter().enumerate() {
        for (peak_index, peak) in trace.peaks.iter().enumerate() {
            let current = best.map(|(_, x)| x).unwrap_or(0.0);
            if peak.intensity > current {
                best = Some((
                    SeedPeak {
                        trace_index,
                        peak_index,
                    },
                    peak.intensity,
                ));
            }
        }
    }
    best.map(|(seed, _)| seed)
}
