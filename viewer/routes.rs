use std::io::Cursor;
use std::sync::{Arc, Mutex};

use tiny_http::{Header, Method, Request, Response, StatusCode};

use neuroscope::SurfaceMap;

pub type SharedSurfaces = Arc<Mutex<SurfaceMap>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

fn png_response(bytes: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"image/png").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

fn server_error() -> Response<Cursor<Vec<u8>>> {
    let body = b"500 Internal Server Error".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(500),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(request: Request, surfaces: SharedSurfaces) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let response = match (method, url.as_str()) {
        (Method::Get, "/") => index_page(&surfaces),
        (Method::Get, path) if path.starts_with("/neuron/") && path.ends_with(".png") => {
            let id = &path["/neuron/".len()..path.len() - ".png".len()];
            neuron_png(&surfaces, id)
        }
        _ => not_found(),
    };

    let _ = request.respond(response);
}

fn index_page(surfaces: &SharedSurfaces) -> Response<Cursor<Vec<u8>>> {
    let guard = surfaces.lock().unwrap();
    let mut ids: Vec<String> = guard.ids().map(str::to_string).collect();
    ids.sort();

    let mut body = String::from(
        "<!doctype html><html><head><title>neuroscope</title><style>\
         body{font-family:sans-serif;background:#fafafa;padding:2em}\
         img{image-rendering:pixelated;width:200px;height:200px;border:1px solid #ccc}\
         figure{display:inline-block;text-align:center;margin:1em}\
         </style></head><body><h1>neuroscope</h1>",
    );
    for id in &ids {
        body.push_str(&format!(
            "<figure><img src=\"/neuron/{id}.png\" alt=\"{id}\"><figcaption>{id}</figcaption></figure>"
        ));
    }
    body.push_str("</body></html>");
    html_response(body)
}

fn neuron_png(surfaces: &SharedSurfaces, id: &str) -> Response<Cursor<Vec<u8>>> {
    let guard = surfaces.lock().unwrap();
    let surface = match guard.get(id) {
        Some(surface) => surface,
        None => return not_found(),
    };
    // An unknown id is a 404; a surface that exists but fails to encode is
    // a server fault and must not look like a missing neuron.
    match surface.to_png_bytes() {
        Ok(bytes) => png_response(bytes),
        Err(err) => {
            log::error!("failed to encode surface {}: {}", id, err);
            server_error()
        }
    }
}
