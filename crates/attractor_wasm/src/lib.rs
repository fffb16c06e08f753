//! WASM bridge exposing attractor integration and trajectory statistics to a
//! JavaScript front end. Plotting happens on the JavaScript side.

use wasm_bindgen::prelude::*;

mod analysis;
mod system;

pub use system::WasmAttractor;

/// Identifiers accepted by the `WasmAttractor` constructor.
#[wasm_bindgen]
pub fn available_systems() -> Vec<String> {
    attractor_core::registry::available_systems()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_systems_lists_every_law() {
        let systems = available_systems();
        assert_eq!(systems.len(), 10);
        assert!(systems.iter().any(|s| s == "lotka-volterra"));
        assert!(systems.iter().any(|s| s == "duffing-map"));
    }

    #[test]
    fn every_listed_system_builds() {
        for name in available_systems() {
            let mut attractor = WasmAttractor::new(
                &name,
                Vec::new(),
                Vec::new(),
                3,
                vec![0.1, 0.1, 0.1],
                100.0,
            )
            .expect("listed system should build");
            assert_eq!(attractor.len(), 3);
        }
    }
}
