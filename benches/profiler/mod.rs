// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Shared bench configuration, tunable through `NAIAD_*` env knobs.
pub fn criterion() -> Criterion {
    let frequency = env_or("NAIAD_PROFILE_FREQ", 100_i32).clamp(1, 1000);
    let sample_size = env_or("NAIAD_BENCH_SAMPLE_SIZE", 60_usize).clamp(10, 200);
    let warmup_secs = env_or("NAIAD_BENCH_WARMUP_SECS", 3_u64).clamp(1, 60);
    let measurement_secs = env_or("NAIAD_BENCH_MEASUREMENT_SECS", 5_u64).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
