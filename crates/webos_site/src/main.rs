//! Binary entrypoint for the browser-hosted desktop.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    webos_site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "This binary runs in the browser. Build `webos_app` for wasm32 with the `csr` feature."
    );
}
