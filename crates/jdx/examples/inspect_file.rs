//! Simple inspector for JDX files.

use jdx::{read_dataset_from_path, Dataset};

fn channel_name(bit_depth: u8) -> &'static str {
    match bit_depth {
        8 => "gray",
        24 => "RGB",
        32 => "RGBA",
        _ => "unknown",
    }
}

fn label_histogram(dataset: &Dataset) -> Vec<usize> {
    let mut counts = vec![0usize; dataset.header.labels.len()];
    for item in &dataset.items {
        counts[item.label as usize] += 1;
    }
    counts
}

fn mean_intensity(dataset: &Dataset) -> f64 {
    let (sum, count) = dataset
        .items
        .iter()
        .flat_map(|item| item.data.iter())
        .fold((0u64, 0u64), |(sum, count), &b| (sum + b as u64, count + 1));
    if count == 0 { 0.0 } else { sum as f64 / count as f64 }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./res/example.jdx".to_string());

    println!("Reading: {}", path);

    let dataset = read_dataset_from_path(&path).expect("Failed to read dataset");
    let header = &dataset.header;

    println!("\n=== Header ===");
    println!("Version: {}", header.version);
    println!(
        "Images: {}x{} {} ({} bits)",
        header.image_width,
        header.image_height,
        channel_name(header.bit_depth),
        header.bit_depth
    );
    println!("Items: {}", header.item_count);
    println!("Compressed body: {} bytes", header.compressed_size);

    let uncompressed = header.item_count as usize * header.item_size();
    if header.compressed_size > 0 {
        println!(
            "Compression ratio: {:.2}x",
            uncompressed as f64 / header.compressed_size as f64
        );
    }

    println!("\n=== Labels ({}) ===", header.labels.len());
    for (index, (label, count)) in header.labels.iter().zip(label_histogram(&dataset)).enumerate() {
        println!("  [{index:>3}] {label:<24} {count} items");
    }

    println!("\nMean channel intensity: {:.2}", mean_intensity(&dataset));

    if let Some(first) = dataset.image(0) {
        if let Some(pixel) = first.pixel(0, 0) {
            println!("First image ({}) top-left pixel: {:?}", first.label, pixel);
        }
    }
}
