// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use grasp_dispatch::module::{DispatcherModule, ModuleContext};
use grasp_dispatch::scheduler::Dispatcher;
use grasp_dispatch::situation::Situation;
use grasp_dispatch::types::{
    ActivitySlots, ModuleError, ModuleParameters, RunResult, SituationFields,
};
use grasp_utils::HandPair;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

struct Synthetic {
    params: ModuleParameters,
    // Ready on frames where `frame % period != 0`.
    period: u64,
}

impl DispatcherModule for Synthetic {
    fn parameters(&self) -> ModuleParameters {
        self.params.clone()
    }

    fn is_ready(
        &mut self,
        _: &Situation,
        ctx: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        Ok(if ctx.frame() % self.period != 0 {
            RunResult::active()
        } else {
            RunResult::inactive()
        })
    }

    fn run(
        &mut self,
        _: &Situation,
        _: f32,
        _: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        Ok(RunResult::active())
    }
}

fn build(count: usize, seed: u64) -> Dispatcher {
    let mut rng = Rng::new(seed);
    let mut dispatcher = Dispatcher::default();
    for i in 0..count {
        let bits = (rng.next_u64() & 0x7f) as u8;
        let slots = ActivitySlots::from_bits_truncate(bits.max(1));
        let priority = (rng.next_u64() % 1000) as i32;
        let sleep = if i % 4 == 0 { 50 } else { 0 };
        let params = ModuleParameters::new(priority, slots, SituationFields::TRIGGER_VALUES, sleep);
        let period = rng.next_u64() % 5 + 2;
        dispatcher.register(format!("module{i}"), Box::new(Synthetic { params, period }));
    }
    dispatcher
}

fn bench_update(c: &mut Criterion) {
    let situation = Situation {
        trigger_values: Some(HandPair::new(0.3, 0.8)),
        ..Situation::default()
    };
    let mut group = c.benchmark_group("dispatch_update");
    for &count in &[8_usize, 32, 128] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("modules_{count}"), |b| {
            let mut dispatcher = build(count, 0x9e37_79b9_7f4a_7c15);
            let mut now = Duration::ZERO;
            b.iter(|| {
                now += Duration::from_millis(11);
                black_box(dispatcher.update(black_box(&situation), now))
            });
        });
    }
    group.finish();
}

fn bench_resort(c: &mut Criterion) {
    let situation = Situation::default();
    c.bench_function("dispatch_register_and_resort_64", |b| {
        b.iter_batched(
            || build(64, 7),
            |mut dispatcher| {
                dispatcher.unregister("module3");
                black_box(dispatcher.update(&situation, Duration::ZERO))
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_update, bench_resort);
criterion_main!(benches);
