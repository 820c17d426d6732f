use criterion::{criterion_group, criterion_main, Criterion};
use profile::{extract, narrate::Silent, Profile, Sample, Style};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// A wiggly synthetic track of `n` samples heading north-east.
fn synthetic_track(n: u32) -> Vec<Sample> {
    (0..n)
        .map(|i| {
            let t = f64::from(i);
            Sample::new(
                -71.3 + t * 1.0e-5,
                44.25 + t * 0.7e-5 + (t / 40.0).sin() * 2.0e-5,
                600.0 + (t / 300.0).sin() * 400.0 + (t / 17.0).cos() * 8.0,
            )
        })
        .collect()
}

fn synthetic_gpx(samples: &[Sample]) -> String {
    let mut gpx = String::from("<gpx>\n<trk>\n<trkseg>\n");
    for s in samples {
        gpx.push_str(&format!(
            "<trkpt lat=\"{}\" lon=\"{}\">\n<ele>{}</ele>\n</trkpt>\n",
            s.latitude, s.longitude, s.elevation
        ));
    }
    gpx.push_str("</trkseg>\n</trk>\n</gpx>\n");
    gpx
}

fn elevation_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("Elevation Profile");

    let samples = synthetic_track(10_000);
    let gpx = synthetic_gpx(&samples);
    let builder = Profile::builder();

    group.bench_with_input("extract", &gpx, |b, text| {
        b.iter(|| extract(text, &mut Silent).unwrap())
    });

    group.bench_with_input("build", &samples, |b, s| {
        b.iter(|| builder.build(s, &mut Silent).unwrap())
    });

    let profile = builder.build(&samples, &mut Silent).unwrap();
    let style = Style {
        markers: true,
        ..Style::default()
    };
    group.bench_with_input("render", &(profile, style), |b, (p, s)| {
        b.iter(|| p.render(s, &mut Silent).unwrap())
    });
}

criterion_group!(benches, elevation_profile);
criterion_main!(benches);
