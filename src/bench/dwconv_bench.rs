use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dwconv::{
    Backend, ConvShape, KernelShape, PadShape, depthwise_conv_naive, depthwise_conv_with, pad,
    pad_f32_with,
};

fn bench_kernels(c: &mut Criterion) {
    let channels = 32;
    let size = 56;

    for kernel in KernelShape::ALL {
        let (fs, stride) = (kernel.filter_size(), kernel.stride());
        let shape = ConvShape::infer(channels, size, size, channels, fs, stride).unwrap();
        let input: Vec<f32> = (0..shape.input_len()).map(|i| (i % 13) as f32 * 0.25).collect();
        let filter: Vec<f32> = (0..shape.filter_len(fs)).map(|i| (i % 5) as f32 - 2.0).collect();
        let mut output = vec![0.0f32; shape.output_len()];

        let mut group = c.benchmark_group(format!("depthwise_{fs}x{fs}_s{stride}"));
        group.throughput(Throughput::Elements((shape.output_len() * fs * fs) as u64));

        group.bench_function("naive", |b| {
            b.iter(|| {
                depthwise_conv_naive(black_box(&input), black_box(&filter), &shape, fs, stride, &mut output)
            })
        });
        for backend in Backend::ALL.into_iter().filter(|b| b.is_available()) {
            group.bench_with_input(BenchmarkId::new("simd", backend), &backend, |b, &backend| {
                b.iter(|| {
                    depthwise_conv_with(
                        backend,
                        kernel,
                        black_box(&input),
                        black_box(&filter),
                        &shape,
                        &mut output,
                    )
                })
            });
        }
        group.finish();
    }
}

fn bench_padding(c: &mut Criterion) {
    let shape = PadShape {
        channels: 32,
        input_height: 56,
        input_width: 57,
        padding_height: 1,
        padding_width: 1,
    };
    let src: Vec<f32> = (0..shape.input_len()).map(|i| i as f32).collect();
    let mut dest = vec![0.0f32; shape.output_len()];

    let mut group = c.benchmark_group("pad");
    group.throughput(Throughput::Elements(shape.output_len() as u64));
    group.bench_function("generic", |b| b.iter(|| pad(black_box(&src), &mut dest, &shape)));
    for backend in Backend::ALL.into_iter().filter(|b| b.is_available()) {
        group.bench_with_input(BenchmarkId::new("lanes", backend), &backend, |b, &backend| {
            b.iter(|| pad_f32_with(backend, black_box(&src), &mut dest, &shape))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kernels, bench_padding);
criterion_main!(benches);
