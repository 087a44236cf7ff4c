criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_slipnet_topology,
        ticking_slipnet_activation,
        solving_abc_abd_ijk,
        aggregating_twenty_runs,
}

fn building_slipnet_topology(c: &mut criterion::Criterion) {
    c.bench_function("build the fixed slipnet topology", |b| {
        b.iter(copycat::slipnet::Slipnet::build)
    });
}

fn ticking_slipnet_activation(c: &mut criterion::Criterion) {
    let (mut net, platonic) = copycat::slipnet::Slipnet::build();
    net.clamp_initial_nodes();
    net.nudge(platonic.successor, 80);
    let mut rng = copycat::random::stream(Some(1));
    c.bench_function("one slipnet spreading-activation tick", |b| {
        b.iter(|| net.update(&mut rng))
    });
}

fn solving_abc_abd_ijk(c: &mut criterion::Criterion) {
    let config = copycat::Config { seed: Some(7), max_steps: 2000, ..copycat::Config::default() };
    c.bench_function("solve abc:abd::ijk:?", |b| {
        b.iter(|| copycat::run("abc", "abd", "ijk", &config))
    });
}

fn aggregating_twenty_runs(c: &mut criterion::Criterion) {
    let config = copycat::Config { seed: Some(7), max_steps: 2000, ..copycat::Config::default() };
    c.bench_function("run_many abc:abd::ijk:? x20", |b| {
        b.iter(|| copycat::run_many("abc", "abd", "ijk", 20, &config))
    });
}
