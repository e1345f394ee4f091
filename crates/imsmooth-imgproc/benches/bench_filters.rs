use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use imsmooth_image::Image;
use imsmooth_imgproc::filter::{window_filter, Reduction};
use imsmooth_imgproc::parallel::ExecutionStrategy;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Window Filter");

    for (width, height) in [(256, 224), (512, 448)].iter() {
        for filter_size in [3, 5, 7].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *filter_size * *filter_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, filter_size);

            // input image
            let image_data = (0..width * height).map(|i| (i % 251) as u8).collect();
            let image = Image::<u8, 1>::new([*width, *height].into(), image_data).unwrap();

            for (name, reduction) in [("mean", Reduction::Mean), ("median", Reduction::Median)] {
                for (strategy_name, strategy) in [
                    ("serial", ExecutionStrategy::Serial),
                    ("rows", ExecutionStrategy::ParallelRows),
                ] {
                    group.bench_with_input(
                        BenchmarkId::new(format!("{name}_{strategy_name}"), &parameter_string),
                        &image,
                        |b, i| {
                            b.iter(|| {
                                black_box(window_filter(i, *filter_size, reduction, strategy))
                            })
                        },
                    );
                }
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
