//! Benchmark for JDX serialization using synthetic image data.
//!
//! Builds a dataset of noisy gradient images, then measures write, read and
//! append throughput at several compression levels.
//!
//! Usage: `bench-synthetic [ITEMS] [WIDTH] [HEIGHT] [BIT_DEPTH] [--labels FILE] [--json]`

use std::fs;
use std::time::{Duration, Instant};

use jdx::{read_dataset, write_dataset_with_options, Dataset, DatasetBuilder, WriteOptions};
use serde::{Deserialize, Serialize};

// =============================================================================
// INPUT
// =============================================================================

/// Default label names (CIFAR-10 classes).
const DEFAULT_LABELS: [&str; 10] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

#[derive(Debug, Deserialize)]
struct LabelFile {
    labels: Vec<String>,
}

#[derive(Debug)]
struct Args {
    items: usize,
    width: u16,
    height: u16,
    bit_depth: u8,
    labels: Vec<String>,
    json: bool,
}

fn parse_args() -> Args {
    let mut positional = Vec::new();
    let mut labels: Vec<String> = DEFAULT_LABELS.iter().map(|s| s.to_string()).collect();
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--labels" => {
                let path = args.next().expect("--labels requires a file path");
                let text = fs::read_to_string(&path).expect("Failed to read label file");
                let file: LabelFile =
                    serde_json::from_str(&text).expect("Failed to parse label file");
                assert!(!file.labels.is_empty(), "label file must list at least one label");
                labels = file.labels;
            }
            _ => positional.push(arg),
        }
    }

    let get = |i: usize, default: &str| {
        positional
            .get(i)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };
    Args {
        items: get(0, "10000").parse().expect("ITEMS must be a number"),
        width: get(1, "32").parse().expect("WIDTH must be a number"),
        height: get(2, "32").parse().expect("HEIGHT must be a number"),
        bit_depth: get(3, "24").parse().expect("BIT_DEPTH must be 8, 24 or 32"),
        labels,
        json,
    }
}

// =============================================================================
// DATA GENERATION
// =============================================================================

/// Deterministic xorshift noise.
struct Noise(u64);

impl Noise {
    fn next_byte(&mut self) -> u8 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 56) as u8
    }
}

fn synthesize(args: &Args) -> Dataset {
    let channels = args.bit_depth as usize / 8;
    let mut noise = Noise(0x9e37_79b9_7f4a_7c15);
    let mut builder = DatasetBuilder::new(args.width, args.height, args.bit_depth);

    for i in 0..args.items {
        let mut data = Vec::with_capacity(args.width as usize * args.height as usize * channels);
        for y in 0..args.height as usize {
            for x in 0..args.width as usize {
                for c in 0..channels {
                    let gradient = (x * 255 / args.width.max(1) as usize + y + c * 40 + i) as u8;
                    data.push(gradient.wrapping_add(noise.next_byte() >> 5));
                }
            }
        }
        builder = builder.item(data, args.labels[i % args.labels.len()].clone());
    }

    builder.build().expect("Synthetic dataset is invalid")
}

// =============================================================================
// MEASUREMENT
// =============================================================================

#[derive(Debug, Serialize)]
struct LevelReport {
    level: u32,
    compressed_bytes: u64,
    ratio: f64,
    write_ms: f64,
    read_ms: f64,
    write_mb_per_s: f64,
    read_mb_per_s: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    items: usize,
    width: u16,
    height: u16,
    bit_depth: u8,
    labels: usize,
    uncompressed_bytes: usize,
    build_ms: f64,
    append_ms: f64,
    levels: Vec<LevelReport>,
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn throughput(bytes: usize, d: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / d.as_secs_f64()
}

fn measure_level(dataset: &Dataset, level: u32, uncompressed: usize) -> LevelReport {
    const READ_ITERS: u32 = 5;

    let mut copy = dataset.clone();
    let mut encoded = Vec::new();
    let write_start = Instant::now();
    let options = WriteOptions::new().compression_level(level);
    write_dataset_with_options(&mut copy, &mut encoded, options).expect("Failed to write dataset");
    let write_time = write_start.elapsed();

    // Warmup
    let _ = read_dataset(&mut encoded.as_slice()).expect("Failed to read dataset");

    let read_start = Instant::now();
    let mut decoded = None;
    for _ in 0..READ_ITERS {
        decoded = Some(read_dataset(&mut encoded.as_slice()).expect("Failed to read dataset"));
    }
    let read_time = read_start.elapsed() / READ_ITERS;
    let decoded = decoded.unwrap();
    assert_eq!(decoded.items, dataset.items, "Round trip changed the items");

    LevelReport {
        level,
        compressed_bytes: copy.header.compressed_size,
        ratio: uncompressed as f64 / copy.header.compressed_size as f64,
        write_ms: millis(write_time),
        read_ms: millis(read_time),
        write_mb_per_s: throughput(uncompressed, write_time),
        read_mb_per_s: throughput(uncompressed, read_time),
    }
}

fn main() {
    let args = parse_args();

    let build_start = Instant::now();
    let dataset = synthesize(&args);
    let build_time = build_start.elapsed();
    let uncompressed = dataset.len() * dataset.header.item_size();

    let mut doubled = dataset.clone();
    let append_start = Instant::now();
    doubled.append(&dataset).expect("Failed to append dataset");
    let append_time = append_start.elapsed();
    assert_eq!(doubled.len(), dataset.len() * 2);

    let levels = [1, 6, 9]
        .into_iter()
        .map(|level| measure_level(&dataset, level, uncompressed))
        .collect();

    let report = Report {
        items: dataset.len(),
        width: args.width,
        height: args.height,
        bit_depth: args.bit_depth,
        labels: dataset.header.labels.len(),
        uncompressed_bytes: uncompressed,
        build_ms: millis(build_time),
        append_ms: millis(append_time),
        levels,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).expect("Failed to serialize report"));
        return;
    }

    println!("=== Dataset ===");
    println!(
        "{} items of {}x{} @ {} bits, {} labels",
        report.items, report.width, report.height, report.bit_depth, report.labels
    );
    println!(
        "Uncompressed body: {} bytes ({:.1} MB)",
        report.uncompressed_bytes,
        report.uncompressed_bytes as f64 / 1_000_000.0
    );
    println!("Build: {:.2} ms", report.build_ms);
    println!("Append (self copy): {:.2} ms", report.append_ms);

    for level in &report.levels {
        println!("\n=== Level {} ===", level.level);
        println!(
            "Compressed: {} bytes (ratio {:.2}x)",
            level.compressed_bytes, level.ratio
        );
        println!(
            "Write: {:.2} ms ({:.2} MB/s)",
            level.write_ms, level.write_mb_per_s
        );
        println!(
            "Read: {:.2} ms ({:.2} MB/s, avg)",
            level.read_ms, level.read_mb_per_s
        );
    }
}
