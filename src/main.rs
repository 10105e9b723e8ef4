//! Benchmark runner for the depthwise kernels.

use dwconv::{Backend, ConvShape, KernelShape, depthwise_conv_naive, depthwise_conv_with};
use std::time::Instant;

fn main() {
    println!("=== Depthwise Convolution Benchmark ===\n");

    // (channels, height, width) of the unpadded input, MobileNet-ish layers
    let layers = [(32, 112, 112), (96, 56, 56), (256, 28, 28)];
    let iterations = 5;
    let mut all_results = Vec::new();

    let backends: Vec<Backend> = Backend::ALL.into_iter().filter(|b| b.is_available()).collect();
    println!(
        "Backends: {} (active: {})\n",
        backends.iter().map(|b| b.name()).collect::<Vec<_>>().join(", "),
        Backend::active()
    );

    for kernel in KernelShape::ALL {
        let (fs, stride) = (kernel.filter_size(), kernel.stride());
        println!("Kernel: {}×{} stride {}", fs, fs, stride);
        println!("{}", "-".repeat(60));

        let mut kernel_results = Vec::new();
        for &(channels, height, width) in &layers {
            let shape = ConvShape::infer(channels, height, width, channels, fs, stride)
                .expect("benchmark layers are valid");
            let input: Vec<f32> = (0..shape.input_len()).map(|i| (i % 100) as f32 / 100.0).collect();
            let filter: Vec<f32> = (0..shape.filter_len(fs)).map(|i| (i % 7) as f32 - 3.0).collect();

            let mut results: Vec<(String, (f64, f64))> = vec![(
                "Naive".to_string(),
                bench_fn(&shape, fs, iterations, |out| {
                    depthwise_conv_naive(&input, &filter, &shape, fs, stride, out)
                }),
            )];
            for &backend in &backends {
                results.push((
                    backend.name().to_string(),
                    bench_fn(&shape, fs, iterations, |out| {
                        depthwise_conv_with(backend, kernel, &input, &filter, &shape, out)
                    }),
                ));
            }

            println!("  {}×{}×{}", channels, height, width);
            let baseline_time = results[0].1.0;
            for (name, (time_ms, gflops)) in &results {
                println!(
                    "    {:10} {:8.3} ms  {:6.2} GFLOPS  ({:.1}×)",
                    name,
                    time_ms,
                    gflops,
                    baseline_time / time_ms
                );
            }
            kernel_results.push(results);
        }
        println!();
        all_results.push((kernel, kernel_results));
    }

    print_summary_table(&all_results);
}

/// Times `f` writing into a fresh output buffer; returns (ms, GFLOPS).
fn bench_fn<F>(shape: &ConvShape, filter_size: usize, iterations: usize, mut f: F) -> (f64, f64)
where
    F: FnMut(&mut [f32]),
{
    // Warmup
    let mut out = vec![0.0f32; shape.output_len()];
    f(&mut out);

    let mut total = 0.0;
    for _ in 0..iterations {
        let start = Instant::now();
        f(&mut out);
        total += start.elapsed().as_secs_f64();
    }

    let avg = total / iterations as f64;
    let flops = 2.0 * (shape.output_len() * filter_size * filter_size) as f64;
    (avg * 1000.0, flops / avg / 1e9)
}

#[allow(clippy::type_complexity)]
fn print_summary_table(all_results: &[(KernelShape, Vec<Vec<(String, (f64, f64))>>)]) {
    println!("\n{}", "=".repeat(60));
    println!("SUMMARY (average speedup over naive)");
    println!("{}", "=".repeat(60));

    for (kernel, layers) in all_results {
        let methods = layers[0].len();
        for m in 1..methods {
            let name = &layers[0][m].0;
            let speedups: Vec<f64> = layers.iter().map(|r| r[0].1.0 / r[m].1.0).collect();
            let avg = speedups.iter().sum::<f64>() / speedups.len() as f64;
            println!(
                "{}×{} s{}  {:<10} {:>6.1}×",
                kernel.filter_size(),
                kernel.filter_size(),
                kernel.stride(),
                name,
                avg
            );
        }
    }

    println!("{}", "=".repeat(60));
    println!("\nGFLOPS counts one multiply and one add per filter tap.\n");
}
