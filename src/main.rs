//! Renders a synthetic network's activations to PNG files.
//!
//! Run with:
//!   cargo run -- [output_dir]
//!
//! Writes one PNG per neuron under the output directory (default
//! `rendered/`), painted with the default orange-to-blue heat-map palette.

use rand::prelude::*;

use neuroscope::{
    CanvasRenderer, ColorScale, MemorySurface, Network, Neuron, RenderConfig, SurfaceMap,
    VizResult,
};

const SIDE: usize = 100;

fn main() {
    env_logger::init();

    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "rendered".to_string());
    if let Err(err) = run(&out_dir) {
        eprintln!("render failed: {}", err);
        std::process::exit(1);
    }
}

fn run(out_dir: &str) -> VizResult<()> {
    std::fs::create_dir_all(out_dir)?;

    let config = RenderConfig::default();
    let palette = config.build_palette(&ColorScale::heatmap())?;

    let network = synthetic_network();
    let mut surfaces = SurfaceMap::new();
    for neuron in network.iter() {
        surfaces.insert(neuron.id.clone(), MemorySurface::new(SIDE));
    }

    let mut renderer = CanvasRenderer::new(config);
    for report in renderer.render(&network, &palette, &mut surfaces) {
        println!("{}: {:?}", report.id, report.outcome);
    }

    let ids: Vec<String> = surfaces.ids().map(str::to_string).collect();
    for id in ids {
        if let Some(surface) = surfaces.get(&id) {
            let path = format!("{}/{}.png", out_dir, id);
            std::fs::write(&path, surface.to_png_bytes()?)?;
            println!("wrote {}", path);
        }
    }
    Ok(())
}

/// Three neurons with recognizable decision-boundary shapes, plus a little
/// noise so the quantization is visible.
fn synthetic_network() -> Network {
    let mut rng = rand::thread_rng();
    let mut network = Network::default();

    let patterns: [(&str, fn(f64, f64) -> f64); 3] = [
        ("diagonal", |x, y| (x + y).tanh()),
        ("circle", |x, y| (2.0 - 2.5 * (x * x + y * y).sqrt()).tanh()),
        ("stripes", |x, y| (4.0 * x).sin() * (4.0 * y).cos()),
    ];

    for (id, f) in patterns {
        let mut neuron = Neuron::new(id, SIDE);
        for row in 0..SIDE {
            for col in 0..SIDE {
                let x = col as f64 / (SIDE - 1) as f64 * 2.0 - 1.0;
                let y = row as f64 / (SIDE - 1) as f64 * 2.0 - 1.0;
                let value = f(x, y) + rng.gen_range(-0.05..0.05);
                neuron
                    .outputs
                    .set(row * SIDE + col, value)
                    .expect("index within the grid");
            }
        }
        network.push(neuron);
    }
    network
}
