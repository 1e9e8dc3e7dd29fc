/// neuroscope Viewer
///
/// Renders a demo network once at startup and serves every neuron's surface
/// as a PNG over a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin viewer
/// Then open http://127.0.0.1:7878

mod routes;

use std::sync::{Arc, Mutex};

use tiny_http::Server;

use neuroscope::{
    CanvasRenderer, ColorScale, MemorySurface, Network, Neuron, RenderConfig, SurfaceMap,
};

const SIDE: usize = 50;

fn main() {
    env_logger::init();

    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");

    let config = RenderConfig::default();
    let palette = config
        .build_palette(&ColorScale::heatmap())
        .expect("default palette is valid");

    let network = demo_network();
    let mut surfaces = SurfaceMap::new();
    for neuron in network.iter() {
        surfaces.insert(neuron.id.clone(), MemorySurface::new(SIDE));
    }

    let mut renderer = CanvasRenderer::new(config);
    for report in renderer.render(&network, &palette, &mut surfaces) {
        println!("{}: {:?}", report.id, report.outcome);
    }

    let shared = Arc::new(Mutex::new(surfaces));

    println!("neuroscope viewer listening on http://{}", addr);

    // One thread per request; every handler only takes the surfaces lock
    // briefly, so page loads never stall each other.
    for request in server.incoming_requests() {
        let surfaces = Arc::clone(&shared);
        std::thread::spawn(move || routes::dispatch(request, surfaces));
    }
}

/// Two deterministic activation patterns for the demo page.
fn demo_network() -> Network {
    let mut network = Network::default();

    let patterns: [(&str, fn(f64, f64) -> f64); 2] = [
        ("saddle", |x, y| (x * x - y * y).tanh()),
        ("ring", |x, y| ((x * x + y * y) * 6.0).sin()),
    ];

    for (id, f) in patterns {
        let mut neuron = Neuron::new(id, SIDE);
        for row in 0..SIDE {
            for col in 0..SIDE {
                let x = col as f64 / (SIDE - 1) as f64 * 2.0 - 1.0;
                let y = row as f64 / (SIDE - 1) as f64 * 2.0 - 1.0;
                neuron
                    .outputs
                    .set(row * SIDE + col, f(x, y))
                    .expect("index within the grid");
            }
        }
        network.push(neuron);
    }
    network
}
